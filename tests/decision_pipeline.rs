//! End-to-end games through the public API.

use std::sync::Arc;
use std::time::Duration;

use wuziqi::advisor::{AiPlayer, MoveAdvisor};
use wuziqi::error::AdvisorError;
use wuziqi::{AIEngine, Board, DecisionKind, GameState, Outcome, Pos, Stone};

fn play(game: &mut GameState, moves: &[(u8, u8)]) {
    for &(r, c) in moves {
        game.place(Pos::new(r, c)).unwrap();
    }
}

#[test]
fn engine_blocks_open_four() {
    let mut game = GameState::new(15);
    // Black builds (7,5)..(7,8); White answers far away
    play(
        &mut game,
        &[(7, 5), (0, 0), (7, 6), (0, 14), (7, 7), (14, 0), (7, 8)],
    );
    assert_eq!(game.current(), Stone::White);

    let mut engine = AIEngine::with_seed(3);
    let result = engine.get_move_with_stats(game.board(), Stone::White);
    assert_eq!(result.kind, DecisionKind::BlockWin);
    assert_eq!(result.best_move, Some(Pos::new(7, 4)));

    assert_eq!(game.place(Pos::new(7, 4)), Ok(Outcome::Continue));
    // The other end still wins for Black
    assert_eq!(game.place(Pos::new(7, 9)), Ok(Outcome::Win(Stone::Black)));
    assert_eq!(game.winning_line().map(|l| l.len()), Some(5));
}

#[test]
fn engine_self_play_terminates() {
    let mut game = GameState::new(9);
    let mut black = AIEngine::with_seed(11);
    let mut white = AIEngine::with_seed(12);

    let mut outcome = Outcome::Continue;
    while outcome == Outcome::Continue {
        let side = game.current();
        let engine = if side == Stone::Black {
            &mut black
        } else {
            &mut white
        };
        let pos = engine
            .get_move(game.board(), side)
            .expect("a move exists while the game runs");
        outcome = game.place(pos).unwrap();
    }

    assert!(game.is_game_over());
    assert!(game.move_count() <= 81);
    match outcome {
        Outcome::Win(winner) => {
            assert_eq!(game.winner(), winner);
            assert_eq!(game.current(), winner);
        }
        Outcome::Draw => assert!(game.board().is_full()),
        Outcome::Continue => unreachable!(),
    }
    assert!(!game.can_undo());
}

#[test]
fn undo_walks_back_to_empty_board() {
    let mut game = GameState::new(15);
    let mut engine = AIEngine::with_seed(5);
    for _ in 0..6 {
        let side = game.current();
        let pos = engine.get_move(game.board(), side).unwrap();
        game.place(pos).unwrap();
    }

    while game.can_undo() {
        game.undo().unwrap();
    }
    assert!(game.board().is_board_empty());
    assert_eq!(game.current(), Stone::Black);
    assert_eq!(game.last_move(), None);
}

struct FixedReply(&'static str);

#[async_trait::async_trait]
impl MoveAdvisor for FixedReply {
    async fn suggest(&self, _board: &Board, _side: Stone) -> Result<String, AdvisorError> {
        Ok(self.0.to_string())
    }
}

#[tokio::test]
async fn advisor_move_is_played_when_legal() {
    let mut game = GameState::new(15);
    play(&mut game, &[(7, 7)]);

    let mut player = AiPlayer::new(AIEngine::with_seed(1), Duration::from_secs(5))
        .with_advisor(Arc::new(FixedReply("(6, 6)")));
    let result = player.choose_move(game.board(), Stone::White).await;
    assert_eq!(result.kind, DecisionKind::Advisor);
    assert_eq!(result.best_move, Some(Pos::new(6, 6)));

    let mut player = AiPlayer::new(AIEngine::with_seed(1), Duration::from_secs(5))
        .with_advisor(Arc::new(FixedReply("7,7")));
    let result = player.choose_move(game.board(), Stone::White).await;
    assert_ne!(result.kind, DecisionKind::Advisor);
    let pos = result.best_move.unwrap();
    assert!(game.board().is_empty(pos));
}
