//! Application state shared across all handlers.

use std::sync::Arc;

use anyhow::{Context, Result};
use tracing::{info, warn};

use crate::config::Config;
use crate::guard::GuardTable;
use crate::menu::{NavigationConfig, NavigationRegistry};
use crate::session::SessionVerifier;

/// Shared application state.
///
/// Wrapped in Arc internally so Clone is cheap.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    /// Navigation menus, immutable for the process lifetime.
    registry: NavigationRegistry,

    /// Page guards declared alongside the menus.
    guards: GuardTable,

    /// Session token verifier (None when no secret is configured).
    verifier: Option<SessionVerifier>,
}

impl AppState {
    /// Build state from configuration, loading the navigation document.
    pub fn new(config: &Config) -> Result<Self> {
        let navigation = match &config.navigation_file {
            Some(path) => {
                info!(path = %path.display(), "loading navigation config");
                NavigationConfig::load(path).with_context(|| {
                    format!("failed to load navigation config from {}", path.display())
                })?
            }
            None => {
                info!("using bundled navigation config");
                NavigationConfig::bundled().context("bundled navigation config is invalid")?
            }
        };

        let (registry, guards) = navigation.into_parts(config.empty_group_policy);

        let verifier = config
            .session_secret
            .as_deref()
            .map(|secret| SessionVerifier::new(secret.as_bytes()));
        if verifier.is_none() {
            warn!("SESSION_SECRET not set; bearer tokens will be rejected");
        }

        Ok(Self::from_parts(registry, guards, verifier))
    }

    /// Build state from already-constructed parts.
    pub fn from_parts(
        registry: NavigationRegistry,
        guards: GuardTable,
        verifier: Option<SessionVerifier>,
    ) -> Self {
        Self {
            inner: Arc::new(AppStateInner {
                registry,
                guards,
                verifier,
            }),
        }
    }

    pub fn registry(&self) -> &NavigationRegistry {
        &self.inner.registry
    }

    pub fn guards(&self) -> &GuardTable {
        &self.inner.guards
    }

    pub fn verifier(&self) -> Option<&SessionVerifier> {
        self.inner.verifier.as_ref()
    }
}
