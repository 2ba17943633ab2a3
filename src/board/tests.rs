use super::*;

#[test]
fn test_stone_opponent() {
    assert_eq!(Stone::Black.opponent(), Stone::White);
    assert_eq!(Stone::White.opponent(), Stone::Black);
    assert_eq!(Stone::Empty.opponent(), Stone::Empty);
}

#[test]
fn test_pos_new() {
    let pos = Pos::new(7, 7);
    assert_eq!(pos.row, 7);
    assert_eq!(pos.col, 7);
}

#[test]
fn test_board_defaults() {
    let board = Board::new();
    assert_eq!(board.size(), DEFAULT_BOARD_SIZE);
    assert_eq!(board.center(), Pos::new(7, 7));
    assert!(board.is_board_empty());
    assert!(!board.is_full());
    assert_eq!(board.empty_cells().len(), 225);
}

#[test]
fn test_bounds() {
    let board = Board::new();
    assert!(board.contains(0, 0));
    assert!(board.contains(14, 14));
    assert!(!board.contains(-1, 0));
    assert!(!board.contains(0, -1));
    assert!(!board.contains(15, 0));
    assert!(!board.contains(0, 15));
    assert_eq!(board.stone_at(15, 3), None);
    assert_eq!(board.stone_at(3, 3), Some(Stone::Empty));
    assert!(!board.contains_pos(Pos::new(15, 0)));
}

#[test]
fn test_place_and_remove() {
    let mut board = Board::new();
    let pos = Pos::new(3, 4);
    board.place_stone(pos, Stone::Black);
    assert_eq!(board.get(pos), Stone::Black);
    assert_eq!(board.stone_count(), 1);
    board.remove_stone(pos);
    assert!(board.is_empty(pos));
    assert!(board.is_board_empty());
}

#[test]
fn test_probe_restores_prior_mark() {
    let mut board = Board::new();
    let pos = Pos::new(5, 5);
    {
        let probe = board.probe(pos, Stone::White);
        assert_eq!(probe.get(pos), Stone::White);
        assert_eq!(probe.pos(), pos);
    }
    assert!(board.is_empty(pos));

    board.place_stone(pos, Stone::Black);
    {
        let _probe = board.probe(pos, Stone::White);
    }
    assert_eq!(board.get(pos), Stone::Black);
}

#[test]
fn test_nested_probes() {
    let mut board = Board::new();
    let snapshot = board.clone();
    {
        let mut outer = board.probe(Pos::new(1, 1), Stone::Black);
        let inner = outer.probe(Pos::new(2, 2), Stone::White);
        assert_eq!(inner.stone_count(), 2);
    }
    assert_eq!(board, snapshot);
}

#[test]
fn test_full_board() {
    let mut board = Board::with_size(9);
    for pos in board.empty_cells() {
        board.place_stone(pos, Stone::Black);
    }
    assert!(board.is_full());
    assert!(board.empty_cells().is_empty());
}

#[test]
fn test_pos_ordering() {
    let pos1 = Pos::new(0, 0);
    let pos2 = Pos::new(0, 1);
    let pos3 = Pos::new(1, 0);

    assert!(pos1 < pos2);
    assert!(pos2 < pos3);
    assert!(pos1 < pos3);
}

#[test]
fn test_manhattan() {
    assert_eq!(Pos::new(7, 7).manhattan(Pos::new(7, 7)), 0);
    assert_eq!(Pos::new(0, 0).manhattan(Pos::new(7, 7)), 14);
    assert_eq!(Pos::new(9, 5).manhattan(Pos::new(7, 7)), 4);
}

#[test]
fn test_positions_row_major() {
    let board = Board::with_size(9);
    let all: Vec<Pos> = board.positions().collect();
    assert_eq!(all.len(), 81);
    assert_eq!(all[0], Pos::new(0, 0));
    assert_eq!(all[1], Pos::new(0, 1));
    assert_eq!(all[9], Pos::new(1, 0));
}
