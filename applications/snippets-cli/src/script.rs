/// Scripted interactions for `replay`
///
/// A script is a TOML file of `[[step]]` tables, each naming an `action`:
///
/// ```toml
/// [[step]]
/// action = "play"
///
/// [[step]]
/// action = "wait"
/// ms = 200
///
/// [[step]]
/// action = "swipe"
/// translation = -150.0
/// velocity = -900.0
/// ```
use crate::error::{CliError, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// One host input
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum Step {
    /// Re-read the feed
    Refresh,

    /// Programmatic rotation
    Rotate { steps: i64 },

    /// Completed drag on the focused slot
    Swipe { translation: f32, velocity: f32 },

    /// Tap on a lane
    Tap { lane: usize },

    Play,
    Pause,
    Toggle,

    /// Like button; the focused card when `card_id` is omitted
    Like {
        #[serde(default)]
        card_id: Option<String>,
    },

    /// Let time pass, delivering audio events as they arrive
    Wait { ms: u64 },

    /// Print the current window
    Show,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Script {
    #[serde(rename = "step", default)]
    pub steps: Vec<Step>,
}

impl Script {
    pub fn parse(source: &str) -> Result<Self> {
        toml::from_str(source).map_err(|e| CliError::Script(e.to_string()))
    }

    pub async fn load(path: &Path) -> Result<Self> {
        let source = tokio::fs::read_to_string(path).await?;
        Self::parse(&source)
    }
}
