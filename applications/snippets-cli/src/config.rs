/// CLI configuration
use crate::error::{CliError, Result};
use chrono::FixedOffset;
use serde::{Deserialize, Serialize};
use snippets_carousel::CarouselConfig;
use snippets_core::deck::DeckOptions;
use std::path::{Path, PathBuf};

/// Default configuration file, looked up in the working directory
pub const DEFAULT_CONFIG_FILE: &str = "snippets.toml";

#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct SnippetsConfig {
    #[serde(default)]
    pub carousel: CarouselConfig,

    #[serde(default = "default_feed")]
    pub feed: FeedSettings,

    #[serde(default = "default_simulator")]
    pub simulator: SimulatorSettings,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct FeedSettings {
    /// JSON file holding `users` and `messages`
    #[serde(default = "default_messages_path")]
    pub messages_path: PathBuf,

    /// Conversation to show; the first conversation in the file when unset
    #[serde(default)]
    pub conversation_id: Option<String>,

    /// Viewing user (drives `liked_by_current_user`)
    #[serde(default)]
    pub current_user: Option<String>,

    #[serde(default = "default_poll_interval_ms")]
    pub poll_interval_ms: u64,

    #[serde(default = "default_max_cards")]
    pub max_cards: usize,

    /// Offset from UTC used for card timestamps
    #[serde(default)]
    pub utc_offset_minutes: i32,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct SimulatorSettings {
    /// Time between `prepare` and readiness
    #[serde(default = "default_load_latency_ms")]
    pub load_latency_ms: u64,

    /// Length of every simulated clip
    #[serde(default = "default_clip_length_ms")]
    pub clip_length_ms: u64,

    /// URLs containing any of these fragments fail to load
    #[serde(default)]
    pub failing_urls: Vec<String>,
}

impl SnippetsConfig {
    /// Load configuration from file and environment
    ///
    /// Reads `path` (or `snippets.toml` when present), then applies
    /// `SNIPPETS_` environment overrides such as `SNIPPETS_FEED__MAX_CARDS=3`.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut settings = config::Config::builder();

        match path {
            Some(path) => {
                if !path.exists() {
                    return Err(CliError::Config(format!(
                        "Config file not found: {}",
                        path.display()
                    )));
                }
                settings = settings.add_source(config::File::from(path.to_path_buf()));
            }
            None => {
                let default_path = PathBuf::from(DEFAULT_CONFIG_FILE);
                if default_path.exists() {
                    settings = settings.add_source(config::File::from(default_path));
                }
            }
        }

        // Override with environment variables (prefixed with SNIPPETS_)
        settings = settings.add_source(
            config::Environment::with_prefix("SNIPPETS")
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true),
        );

        let config = settings
            .build()
            .map_err(|e| CliError::Config(e.to_string()))?;

        config
            .try_deserialize()
            .map_err(|e| CliError::Config(e.to_string()))
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        let gesture = &self.carousel.gesture;
        if !(0.0..=1.0).contains(&gesture.distance_fraction) {
            return Err(CliError::Config(format!(
                "gesture.distance_fraction must be within 0..=1, got {}",
                gesture.distance_fraction
            )));
        }

        if !gesture.min_velocity.is_finite() || gesture.min_velocity < 0.0 {
            return Err(CliError::Config(format!(
                "gesture.min_velocity must be a non-negative number, got {}",
                gesture.min_velocity
            )));
        }

        if !self.carousel.layout.card_width.is_finite() || self.carousel.layout.card_width <= 0.0 {
            return Err(CliError::Config(
                "layout.card_width must be positive".to_string(),
            ));
        }

        if self.feed.poll_interval_ms == 0 {
            return Err(CliError::Config(
                "feed.poll_interval_ms must be greater than zero".to_string(),
            ));
        }

        if self.feed.max_cards == 0 {
            return Err(CliError::Config(
                "feed.max_cards must be greater than zero".to_string(),
            ));
        }

        self.timezone()?;

        Ok(())
    }

    /// Zone for card timestamps
    pub fn timezone(&self) -> Result<FixedOffset> {
        FixedOffset::east_opt(self.feed.utc_offset_minutes * 60).ok_or_else(|| {
            CliError::Config(format!(
                "feed.utc_offset_minutes out of range: {}",
                self.feed.utc_offset_minutes
            ))
        })
    }

    /// Conversion options for the feed
    pub fn deck_options(&self) -> Result<DeckOptions> {
        Ok(DeckOptions {
            max_cards: self.feed.max_cards,
            timezone: self.timezone()?,
        })
    }
}

// Default values
fn default_feed() -> FeedSettings {
    FeedSettings {
        messages_path: default_messages_path(),
        conversation_id: None,
        current_user: None,
        poll_interval_ms: default_poll_interval_ms(),
        max_cards: default_max_cards(),
        utc_offset_minutes: 0,
    }
}

fn default_messages_path() -> PathBuf {
    PathBuf::from("messages.json")
}

fn default_poll_interval_ms() -> u64 {
    500
}

fn default_max_cards() -> usize {
    5
}

fn default_simulator() -> SimulatorSettings {
    SimulatorSettings {
        load_latency_ms: default_load_latency_ms(),
        clip_length_ms: default_clip_length_ms(),
        failing_urls: Vec::new(),
    }
}

fn default_load_latency_ms() -> u64 {
    150
}

fn default_clip_length_ms() -> u64 {
    30_000
}

impl Default for FeedSettings {
    fn default() -> Self {
        default_feed()
    }
}

impl Default for SimulatorSettings {
    fn default() -> Self {
        default_simulator()
    }
}
