//! Configuration types for favicon-dl

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};

/// Fetch behavior configuration (request path, client identity)
///
/// Used as a flattened sub-config within [`Config`].
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct FetchConfig {
    /// Resource path appended verbatim to each item's URL (default: "favicon.ico")
    ///
    /// No separator is inserted, so items are expected to carry URLs that
    /// already end with `/`.
    #[serde(default = "default_icon_path")]
    pub icon_path: String,

    /// Optional `User-Agent` header (None = reqwest default)
    #[serde(default)]
    pub user_agent: Option<String>,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            icon_path: default_icon_path(),
            user_agent: None,
        }
    }
}

/// Main configuration for [`BatchRunner`](crate::BatchRunner)
///
/// Sub-config fields are flattened, so the JSON format stays a single flat
/// object: `{"icon_path": "favicon.ico", "user_agent": "..."}`.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// Per-item fetch settings
    #[serde(flatten)]
    pub fetch: FetchConfig,
}

impl Config {
    /// Parse a configuration from a JSON document, filling in defaults and validating it
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Config = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Check settings that serde cannot express
    pub fn validate(&self) -> Result<()> {
        if self.fetch.icon_path.trim().is_empty() {
            return Err(Error::config("icon_path", "icon_path must not be empty"));
        }
        if let Some(agent) = &self.fetch.user_agent
            && agent.trim().is_empty()
        {
            return Err(Error::config(
                "user_agent",
                "user_agent must not be blank when set",
            ));
        }
        Ok(())
    }
}

fn default_icon_path() -> String {
    "favicon.ico".to_string()
}
