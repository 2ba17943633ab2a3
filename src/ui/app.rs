//! Main application for the Gomoku GUI

use std::sync::Arc;
use std::time::Duration;

use eframe::egui;
use egui::{CentralPanel, Context, CornerRadius, Frame, RichText, SidePanel, TopBottomPanel, Vec2};

use super::board_view::{BoardFrame, BoardView};
use super::game_state::GameSession;
use super::theme::*;
use crate::advisor::MoveAdvisor;
use crate::config::Settings;
use crate::Stone;

/// Main Gomoku application
pub struct GomokuApp {
    session: GameSession,
    board_view: BoardView,
    show_debug: bool,
}

impl GomokuApp {
    pub fn new(
        _cc: &eframe::CreationContext<'_>,
        settings: Settings,
        advisor: Option<Arc<dyn MoveAdvisor>>,
    ) -> Self {
        Self {
            session: GameSession::new(settings, advisor),
            board_view: BoardView::default(),
            show_debug: false,
        }
    }

    fn undo(&mut self) {
        if let Err(e) = self.session.undo() {
            self.session.message = Some(e.to_string());
        }
    }

    fn render_menu_bar(&mut self, ctx: &Context) {
        TopBottomPanel::top("menu_bar").show(ctx, |ui| {
            egui::menu::bar(ui, |ui| {
                ui.menu_button("Game", |ui| {
                    if ui.button("New Game (N)").clicked() {
                        self.session.new_game();
                        ui.close_menu();
                    }
                    ui.add_enabled_ui(self.session.game.can_undo(), |ui| {
                        if ui.button("Undo (U)").clicked() {
                            self.undo();
                            ui.close_menu();
                        }
                    });
                });

                ui.menu_button("View", |ui| {
                    ui.checkbox(&mut self.show_debug, "Debug Panel (D)");
                });

                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    let opponent = if self.session.has_advisor() {
                        "LLM + rules"
                    } else {
                        "rules"
                    };
                    ui.label(format!(
                        "You: {} | AI: {}",
                        self.session.human_color().name(),
                        opponent
                    ));
                });
            });
        });
    }

    fn render_side_panel(&mut self, ctx: &Context) {
        SidePanel::right("info_panel")
            .min_width(240.0)
            .max_width(280.0)
            .frame(Frame::new().fill(PANEL_BG))
            .show(ctx, |ui| {
                ui.add_space(12.0);
                self.render_title_card(ui);
                ui.add_space(12.0);

                self.render_turn_card(ui);
                ui.add_space(10.0);

                self.render_timer_card(ui);
                ui.add_space(10.0);

                self.render_stats_card(ui);
                ui.add_space(10.0);

                self.render_actions_card(ui);

                if self.show_debug {
                    ui.add_space(10.0);
                    self.render_debug_card(ui);
                }

                if let Some(msg) = self.session.message.clone() {
                    ui.add_space(10.0);
                    self.render_message_card(ui, &msg);
                }
            });
    }

    fn card_frame() -> Frame {
        Frame::new()
            .fill(CARD_BG)
            .corner_radius(CornerRadius::same(8))
            .inner_margin(12.0)
    }

    fn render_title_card(&self, ui: &mut egui::Ui) {
        ui.horizontal(|ui| {
            ui.add_space(8.0);
            ui.label(RichText::new("●○").size(20.0).color(egui::Color32::from_rgb(180, 180, 185)));
            ui.add_space(4.0);
            ui.label(RichText::new("GOMOKU").size(22.0).strong().color(TEXT_PRIMARY));
        });
        ui.horizontal(|ui| {
            ui.add_space(8.0);
            ui.label(RichText::new("五子棋").size(11.0).color(TEXT_MUTED));
        });
    }

    fn render_turn_card(&self, ui: &mut egui::Ui) {
        Self::card_frame().show(ui, |ui| {
            let game = &self.session.game;
            let shown = if game.is_game_over() && game.winner() != Stone::Empty {
                game.winner()
            } else {
                game.current()
            };
            let is_black = shown == Stone::Black;
            let (stone_char, accent, glyph_color) = if is_black {
                ("●", egui::Color32::from_rgb(70, 70, 75), TEXT_PRIMARY)
            } else {
                ("○", egui::Color32::from_rgb(220, 220, 225), egui::Color32::from_rgb(30, 30, 35))
            };

            ui.horizontal(|ui| {
                let (rect, _) = ui.allocate_exact_size(Vec2::new(48.0, 48.0), egui::Sense::hover());
                ui.painter().circle_filled(rect.center(), 22.0, accent);
                ui.painter().text(
                    rect.center(),
                    egui::Align2::CENTER_CENTER,
                    stone_char,
                    egui::FontId::proportional(28.0),
                    glyph_color,
                );

                ui.add_space(12.0);

                ui.vertical(|ui| {
                    ui.add_space(4.0);
                    ui.label(
                        RichText::new(shown.name().to_uppercase())
                            .size(18.0)
                            .strong()
                            .color(TEXT_PRIMARY),
                    );

                    let status = if game.is_game_over() {
                        match game.winner() {
                            Stone::Empty => ("Draw", TIMER_WARNING),
                            w if w == self.session.human_color() => ("You win!", WIN_HIGHLIGHT),
                            _ => ("AI wins", TIMER_CRITICAL),
                        }
                    } else if self.session.is_ai_thinking() {
                        ("AI thinking...", TIMER_WARNING)
                    } else if self.session.is_human_turn() {
                        ("Your turn", TIMER_NORMAL)
                    } else {
                        ("AI to move", TEXT_SECONDARY)
                    };
                    ui.label(RichText::new(status.0).size(12.0).color(status.1));
                });
            });
        });
    }

    /// Countdown for the side to move
    fn render_timer_card(&self, ui: &mut egui::Ui) {
        Self::card_frame().show(ui, |ui| {
            ui.label(RichText::new("TIMER").size(10.0).color(TEXT_MUTED));
            ui.add_space(6.0);

            if let Some(left) = self.session.auto_new_game_in() {
                ui.label(
                    RichText::new(format!("New game in {:.1}s", left.as_secs_f32()))
                        .size(16.0)
                        .color(TEXT_SECONDARY),
                );
            } else if !self.session.game.is_game_over() {
                let remaining = self.session.remaining_time().as_secs_f32();
                ui.label(
                    RichText::new(format!("{remaining:.1}s"))
                        .size(28.0)
                        .strong()
                        .color(timer_color(remaining)),
                );
                if let Some(elapsed) = self.session.ai_thinking_elapsed() {
                    ui.label(
                        RichText::new(format!("AI thinking {:.2}s", elapsed.as_secs_f32()))
                            .size(10.0)
                            .color(TEXT_SECONDARY),
                    );
                }
            }

            if let Some(ai_time) = self.session.move_timer.ai_thinking_time {
                ui.add_space(4.0);
                ui.label(
                    RichText::new(format!("Last AI: {:.3}s", ai_time.as_secs_f32()))
                        .size(10.0)
                        .color(TEXT_SECONDARY),
                );
            }
        });
    }

    fn render_stats_card(&self, ui: &mut egui::Ui) {
        let stats = self.session.stats;
        Self::card_frame().show(ui, |ui| {
            ui.label(RichText::new("RECORD").size(10.0).color(TEXT_MUTED));
            ui.add_space(8.0);

            for (label, value) in [
                ("You", stats.human_wins),
                ("AI", stats.ai_wins),
                ("Draws", stats.draws),
            ] {
                ui.horizontal(|ui| {
                    ui.label(RichText::new(label).size(12.0).color(TEXT_SECONDARY));
                    ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                        ui.label(RichText::new(value.to_string()).size(14.0).strong().color(TEXT_PRIMARY));
                    });
                });
            }

            ui.add_space(4.0);
            ui.label(RichText::new(format!("{} games", stats.games())).size(10.0).color(TEXT_MUTED));
        });
    }

    fn render_actions_card(&mut self, ui: &mut egui::Ui) {
        Self::card_frame().show(ui, |ui| {
            ui.label(RichText::new("ACTIONS").size(10.0).color(TEXT_MUTED));
            ui.add_space(8.0);

            let btn_frame = Frame::new()
                .fill(BUTTON_BG)
                .corner_radius(CornerRadius::same(6))
                .inner_margin(8.0);

            ui.horizontal(|ui| {
                let undo_color = if self.session.game.can_undo() && self.session.is_human_turn() {
                    TEXT_PRIMARY
                } else {
                    TEXT_MUTED
                };
                btn_frame.show(ui, |ui| {
                    let undo = egui::Label::new(RichText::new("↩ Undo").size(12.0).color(undo_color))
                        .sense(egui::Sense::click());
                    if ui.add(undo).clicked() {
                        self.undo();
                    }
                });

                ui.add_space(4.0);

                btn_frame.show(ui, |ui| {
                    let new_game = egui::Label::new(RichText::new("New Game").size(12.0).color(TEXT_PRIMARY))
                        .sense(egui::Sense::click());
                    if ui.add(new_game).clicked() {
                        self.session.new_game();
                    }
                });
            });

            ui.add_space(8.0);
            ui.label(
                RichText::new(format!("Move #{}", self.session.game.move_count()))
                    .size(11.0)
                    .color(TEXT_SECONDARY),
            );
        });
    }

    fn render_debug_card(&self, ui: &mut egui::Ui) {
        Frame::new()
            .fill(egui::Color32::from_rgb(30, 33, 38))
            .corner_radius(CornerRadius::same(8))
            .inner_margin(12.0)
            .show(ui, |ui| {
                ui.label(RichText::new("AI DEBUG").size(10.0).color(TEXT_MUTED));
                ui.add_space(6.0);

                let Some(result) = &self.session.last_ai_result else {
                    ui.label(RichText::new("Waiting for AI...").size(10.0).color(TEXT_MUTED));
                    return;
                };

                ui.horizontal(|ui| {
                    ui.vertical(|ui| {
                        ui.label(RichText::new(result.kind.label()).size(11.0).strong().color(TIMER_NORMAL));
                        ui.label(RichText::new(format!("Score: {}", result.score)).size(10.0).color(TEXT_SECONDARY));
                    });
                    ui.with_layout(egui::Layout::right_to_left(egui::Align::TOP), |ui| {
                        ui.vertical(|ui| {
                            ui.label(RichText::new(format!("{}ms", result.time_ms)).size(10.0).color(TEXT_SECONDARY));
                            ui.label(RichText::new(format!("{} nodes", result.nodes)).size(10.0).color(TEXT_MUTED));
                        });
                    });
                });

                if let Some(pos) = result.best_move {
                    ui.add_space(4.0);
                    ui.label(RichText::new(format!("→ {pos}")).size(12.0).strong().color(WIN_HIGHLIGHT));
                }
            });
    }

    fn render_message_card(&self, ui: &mut egui::Ui, msg: &str) {
        Frame::new()
            .fill(egui::Color32::from_rgb(80, 60, 30))
            .corner_radius(CornerRadius::same(8))
            .inner_margin(10.0)
            .show(ui, |ui| {
                ui.label(RichText::new(msg).size(11.0).color(TEXT_PRIMARY));
            });
    }

    fn render_board(&mut self, ctx: &Context) {
        CentralPanel::default().show(ctx, |ui| {
            ui.style_mut().visuals.panel_fill = egui::Color32::from_rgb(40, 42, 46);

            let winning_line = self.session.winning_line();
            let frame = BoardFrame {
                board: self.session.game.board(),
                human: self.session.human_color(),
                accepting_input: self.session.is_human_turn() && !self.session.is_ai_thinking(),
                last_move: self.session.game.last_move(),
                winning_line: winning_line.as_deref(),
            };
            let clicked = self.board_view.show(ui, &frame);

            if let Some(pos) = clicked {
                if let Err(e) = self.session.try_place_stone(pos) {
                    self.session.message = Some(e.to_string());
                }
            }
        });
    }

    fn handle_input(&mut self, ctx: &Context) {
        let (debug, undo, new_game) = ctx.input(|i| {
            (
                i.key_pressed(egui::Key::D),
                i.key_pressed(egui::Key::U),
                i.key_pressed(egui::Key::N),
            )
        });

        if debug {
            self.show_debug = !self.show_debug;
        }
        if undo {
            self.undo();
        }
        if new_game {
            self.session.new_game();
        }
    }
}

impl eframe::App for GomokuApp {
    fn update(&mut self, ctx: &Context, _frame: &mut eframe::Frame) {
        self.handle_input(ctx);
        self.session.update();

        self.render_menu_bar(ctx);
        self.render_side_panel(ctx);
        self.render_board(ctx);

        // Turn clock and pending AI move both need polling
        if self.session.is_ai_thinking() {
            ctx.request_repaint();
        } else {
            ctx.request_repaint_after(Duration::from_millis(100));
        }
    }
}
