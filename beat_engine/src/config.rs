/// BeatEngine v1: Launch Configuration
///
/// Read from the page query string.
/// Recognised keys:
///   `godmode`   - disables all damage when set to a truthy value
///   `challenge` - challenge id committed at start-up
///   `assets`    - base URL for per-challenge assets

use serde::{Deserialize, Serialize};
use url::Url;

use crate::error::EngineError;

/// Public bucket holding challenge cover images.
pub const DEFAULT_ASSET_BASE_URL: &str = "https://s3-us-west-2.amazonaws.com/supersaber";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LaunchConfig {
    pub god_mode: bool,
    pub challenge_id: Option<String>,
    pub asset_base_url: String,
}

impl Default for LaunchConfig {
    fn default() -> Self {
        Self {
            god_mode: false,
            challenge_id: None,
            asset_base_url: DEFAULT_ASSET_BASE_URL.to_string(),
        }
    }
}

impl LaunchConfig {
    /// Parse a query string, with or without the leading `?`.
    /// Unknown keys are ignored; later duplicates win.
    pub fn from_query(query: &str) -> Self {
        let query = query.strip_prefix('?').unwrap_or(query);
        let mut config = Self::default();
        for (key, value) in url::form_urlencoded::parse(query.as_bytes()) {
            match key.as_ref() {
                "godmode" => config.god_mode = is_truthy(&value),
                "challenge" => {
                    config.challenge_id = (!value.is_empty()).then(|| value.into_owned());
                }
                "assets" if !value.is_empty() => config.asset_base_url = value.into_owned(),
                _ => {}
            }
        }
        config
    }

    /// Parse the query part of a full launch URL.
    pub fn from_url(launch_url: &str) -> Result<Self, EngineError> {
        let url = Url::parse(launch_url)?;
        Ok(Self::from_query(url.query().unwrap_or("")))
    }
}

fn is_truthy(value: &str) -> bool {
    !matches!(value.trim(), "" | "0" | "false")
}
