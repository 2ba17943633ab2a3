//! Game settings, loadable from TOML and overridable from the environment

use std::path::Path;
use std::time::Duration;

use tracing::{info, warn};

use crate::board::{Stone, DEFAULT_BOARD_SIZE, SUPPORTED_SIZES};
use crate::error::ConfigError;
use crate::search::DEFAULT_DEPTH;

/// Deepest search the settings accept
pub const MAX_SEARCH_DEPTH: i8 = 6;

/// Default chat-completions endpoint
pub const DEFAULT_ADVISOR_URL: &str = "https://api.openai.com/v1/chat/completions";

/// Top-level game configuration, loadable from TOML.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct Settings {
    pub board_size: usize,
    /// Seconds each side has per move
    pub turn_time_secs: u64,
    pub auto_new_game: bool,
    pub auto_new_game_delay_ms: u64,
    pub search_depth: i8,
    /// Colour the human plays. Black always moves first.
    pub human_color: Stone,
    pub advisor: AdvisorSettings,
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            board_size: DEFAULT_BOARD_SIZE,
            turn_time_secs: 30,
            auto_new_game: true,
            auto_new_game_delay_ms: 2000,
            search_depth: DEFAULT_DEPTH,
            human_color: Stone::Black,
            advisor: AdvisorSettings::default(),
        }
    }
}

/// Connection settings for the LLM move advisor.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct AdvisorSettings {
    pub enabled: bool,
    pub api_key: String,
    /// Either the full chat-completions URL or the API root
    pub base_url: String,
    pub model: String,
    pub temperature: f32,
    pub max_tokens: u32,
}

impl Default for AdvisorSettings {
    fn default() -> Self {
        AdvisorSettings {
            enabled: false,
            api_key: String::new(),
            base_url: DEFAULT_ADVISOR_URL.to_string(),
            model: "gpt-4".to_string(),
            temperature: 0.1,
            max_tokens: 32,
        }
    }
}

impl AdvisorSettings {
    /// Chat-completions endpoint derived from `base_url`.
    pub fn endpoint(&self) -> String {
        let base = self.base_url.trim_end_matches('/');
        if base.ends_with("/chat/completions") {
            base.to_string()
        } else {
            format!("{base}/chat/completions")
        }
    }
}

impl Settings {
    /// Load configuration from a TOML file.
    ///
    /// Not validated: environment and command-line overrides are layered on
    /// top first, then [`Settings::validate`] runs on the merged result.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::FileRead {
            path: path.to_path_buf(),
            source: e,
        })?;
        Ok(toml::from_str(&content)?)
    }

    /// Load configuration from a TOML file, falling back to defaults if the file
    /// does not exist.
    pub fn load_or_default(path: &Path) -> Result<Self, ConfigError> {
        if path.exists() {
            info!(path = %path.display(), "loading settings");
            Self::load(path)
        } else {
            warn!(path = %path.display(), "config file not found, using defaults");
            Ok(Self::default())
        }
    }

    /// Override advisor connection fields from `OPENAI_API_KEY`,
    /// `OPENAI_BASE_URL` and `MODEL_NAME`.
    pub fn apply_env(&mut self) {
        self.apply_vars(|key| std::env::var(key).ok());
    }

    /// Same as [`Settings::apply_env`] with an explicit variable lookup.
    pub fn apply_vars<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_empty = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        if let Some(key) = non_empty("OPENAI_API_KEY") {
            self.advisor.api_key = key;
        }
        if let Some(url) = non_empty("OPENAI_BASE_URL") {
            self.advisor.base_url = url;
        }
        if let Some(model) = non_empty("MODEL_NAME") {
            self.advisor.model = model;
        }
    }

    /// Validate configuration values.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !SUPPORTED_SIZES.contains(&self.board_size) {
            return Err(ConfigError::Validation(format!(
                "board_size must be one of {:?}",
                SUPPORTED_SIZES
            )));
        }
        if self.turn_time_secs == 0 {
            return Err(ConfigError::Validation(
                "turn_time_secs must be > 0".into(),
            ));
        }
        if self.auto_new_game_delay_ms == 0 {
            return Err(ConfigError::Validation(
                "auto_new_game_delay_ms must be > 0".into(),
            ));
        }
        if !(0..=MAX_SEARCH_DEPTH).contains(&self.search_depth) {
            return Err(ConfigError::Validation(format!(
                "search_depth must be in [0, {MAX_SEARCH_DEPTH}]"
            )));
        }
        if self.human_color == Stone::Empty {
            return Err(ConfigError::Validation(
                "human_color must be black or white".into(),
            ));
        }
        if self.advisor.temperature < 0.0 || self.advisor.temperature > 2.0 {
            return Err(ConfigError::Validation(
                "advisor.temperature must be in [0, 2]".into(),
            ));
        }
        if self.advisor.max_tokens == 0 {
            return Err(ConfigError::Validation(
                "advisor.max_tokens must be > 0".into(),
            ));
        }
        if self.advisor.enabled && self.advisor.api_key.is_empty() {
            return Err(ConfigError::Validation(
                "advisor.api_key must be set when the advisor is enabled".into(),
            ));
        }
        Ok(())
    }

    #[inline]
    pub fn turn_limit(&self) -> Duration {
        Duration::from_secs(self.turn_time_secs)
    }

    #[inline]
    pub fn auto_new_game_delay(&self) -> Duration {
        Duration::from_millis(self.auto_new_game_delay_ms)
    }

    /// Colour played by the engine
    #[inline]
    pub fn ai_color(&self) -> Stone {
        self.human_color.opponent()
    }
}
