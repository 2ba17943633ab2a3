//! Command-line interface for wuziqi.

use std::path::PathBuf;

use clap::Parser;

use wuziqi::config::Settings;
use wuziqi::Stone;

/// Wuziqi - Gomoku against a rule engine, optionally advised by an LLM
#[derive(Parser, Debug)]
#[command(name = "wuziqi")]
#[command(about = "Play Gomoku against a rule-based AI", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Settings file (TOML). Defaults are used when it does not exist.
    #[arg(short, long, default_value = "wuziqi.toml")]
    pub config: PathBuf,

    /// Consult the LLM advisor before the rule engine
    #[arg(long)]
    pub llm: bool,

    /// Alpha-beta search depth
    #[arg(short, long)]
    pub depth: Option<i8>,

    /// Board size (9, 13, 15 or 19)
    #[arg(long)]
    pub board_size: Option<usize>,

    /// Play White; the AI opens as Black
    #[arg(long)]
    pub human_white: bool,

    /// Seconds per move before a random move is played
    #[arg(long)]
    pub turn_time: Option<u64>,
}

impl Cli {
    /// Apply command-line overrides on top of file and environment settings.
    pub fn apply_to(&self, settings: &mut Settings) {
        if self.llm {
            settings.advisor.enabled = true;
        }
        if let Some(depth) = self.depth {
            settings.search_depth = depth;
        }
        if let Some(size) = self.board_size {
            settings.board_size = size;
        }
        if self.human_white {
            settings.human_color = Stone::White;
        }
        if let Some(secs) = self.turn_time {
            settings.turn_time_secs = secs;
        }
    }
}
