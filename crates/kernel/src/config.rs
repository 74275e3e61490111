//! Configuration loaded from environment variables.

use std::env;
use std::path::PathBuf;

use anyhow::{Context, Result};

use crate::menu::EmptyGroupPolicy;

/// Application configuration.
#[derive(Debug, Clone)]
pub struct Config {
    /// HTTP server port (default: 3000).
    pub port: u16,

    /// Navigation document (YAML or JSON). When None, the bundled default is used.
    pub navigation_file: Option<PathBuf>,

    /// Shared secret for verifying session tokens. When None, bearer tokens
    /// are rejected and every caller is anonymous.
    pub session_secret: Option<String>,

    /// Handling of grouping nodes left without children: "retain" (default) or "drop".
    pub empty_group_policy: EmptyGroupPolicy,
}

impl Config {
    /// Load configuration from environment variables.
    pub fn from_env() -> Result<Self> {
        let port = env::var("PORT")
            .unwrap_or_else(|_| "3000".to_string())
            .parse()
            .context("PORT must be a valid u16")?;

        let navigation_file = env::var("NAVIGATION_FILE")
            .ok()
            .filter(|v| !v.trim().is_empty())
            .map(PathBuf::from);

        let session_secret = env::var("SESSION_SECRET")
            .ok()
            .filter(|v| !v.is_empty());

        let empty_group_policy = env::var("NAV_EMPTY_GROUPS")
            .unwrap_or_else(|_| "retain".to_string())
            .parse::<EmptyGroupPolicy>()
            .map_err(anyhow::Error::msg)
            .context("NAV_EMPTY_GROUPS must be 'retain' or 'drop'")?;

        Ok(Self {
            port,
            navigation_file,
            session_secret,
            empty_group_policy,
        })
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            port: 3000,
            navigation_file: None,
            session_secret: None,
            empty_group_policy: EmptyGroupPolicy::default(),
        }
    }
}
