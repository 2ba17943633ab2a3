//! Wuziqi GUI
//!
//! Play Gomoku against the rule engine, optionally advised by an LLM.

mod cli;

use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use wuziqi::advisor::{MoveAdvisor, OpenAiAdvisor};
use wuziqi::config::Settings;
use wuziqi::ui::GomokuApp;

use cli::Cli;

fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();

    let mut settings = Settings::load_or_default(&cli.config)
        .with_context(|| format!("loading {}", cli.config.display()))?;
    settings.apply_env();
    cli.apply_to(&mut settings);
    settings.validate().context("invalid settings")?;

    let advisor: Option<Arc<dyn MoveAdvisor>> = if settings.advisor.enabled {
        info!(model = %settings.advisor.model, endpoint = %settings.advisor.endpoint(), "LLM advisor enabled");
        Some(Arc::new(OpenAiAdvisor::new(settings.advisor.clone())))
    } else {
        None
    };
    if advisor.is_none() && !settings.advisor.api_key.is_empty() {
        warn!("API key present but advisor disabled; pass --llm to use it");
    }

    let size = settings.board_size;
    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1000.0, 750.0])
            .with_min_inner_size([800.0, 600.0])
            .with_title(format!("Gomoku {size}x{size}")),
        ..Default::default()
    };

    eframe::run_native(
        "Wuziqi",
        options,
        Box::new(move |cc| Ok(Box::new(GomokuApp::new(cc, settings, advisor)))),
    )
    .map_err(|e| anyhow::anyhow!("GUI failed: {e}"))
}
