//! Navigation registry - loads, validates and serves menu trees.
//!
//! Menus come from a single YAML or JSON document:
//!
//! ```yaml
//! menus:
//!   sidebar:
//!     - name: dashboard
//!       label: Dashboard
//!       href: /
//! pages:
//!   - path: /settings/roles
//!     allowedRoles: [admin]
//! ```
//!
//! Trees are immutable once registered. Filtered views are memoized per
//! registry version, menu and caller context.

use std::collections::{BTreeMap, HashMap, HashSet};
use std::path::Path;
use std::sync::Arc;

use dashmap::DashMap;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use super::{EmptyGroupPolicy, NavigationNode, filter_with};
use crate::access::AuthorizationContext;
use crate::error::NavError;
use crate::guard::{GuardTable, PageGuard};

/// Navigation config bundled with the binary.
pub const DEFAULT_NAVIGATION: &str = include_str!("../../config/navigation.yml");

/// Pseudo menu name used when reporting invalid page guards.
const PAGES_SECTION: &str = "pages";

/// Parsed navigation document.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NavigationConfig {
    #[serde(default)]
    pub menus: BTreeMap<String, Vec<NavigationNode>>,
    #[serde(default)]
    pub pages: Vec<PageGuard>,
}

impl NavigationConfig {
    /// Parse and validate a YAML document.
    pub fn from_yaml_str(yaml: &str) -> Result<Self, NavError> {
        let config: Self =
            serde_yml::from_str(yaml).map_err(|e| NavError::config("<document>", e))?;
        config.validate()?;
        Ok(config)
    }

    /// Parse and validate a JSON document.
    pub fn from_json_str(json: &str) -> Result<Self, NavError> {
        let config: Self =
            serde_json::from_str(json).map_err(|e| NavError::config("<document>", e))?;
        config.validate()?;
        Ok(config)
    }

    /// Load from disk; `.json` files are parsed as JSON, anything else as YAML.
    pub fn load(path: &Path) -> Result<Self, NavError> {
        let raw = std::fs::read_to_string(path)?;
        let is_json = path
            .extension()
            .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));

        if is_json {
            Self::from_json_str(&raw)
        } else {
            Self::from_yaml_str(&raw)
        }
    }

    /// The bundled default configuration.
    pub fn bundled() -> Result<Self, NavError> {
        Self::from_yaml_str(DEFAULT_NAVIGATION)
    }

    /// Check structural well-formedness: non-empty names, unique sibling
    /// names, clean role/permission tags, absolute guard paths.
    pub fn validate(&self) -> Result<(), NavError> {
        for (menu, nodes) in &self.menus {
            validate_siblings(menu, nodes, "")?;
        }

        let mut seen = HashSet::new();
        for guard in &self.pages {
            if !guard.path.starts_with('/') {
                return Err(NavError::config(
                    PAGES_SECTION,
                    format!("guard path '{}' must start with '/'", guard.path),
                ));
            }
            if !seen.insert(guard.path.as_str()) {
                return Err(NavError::config(
                    PAGES_SECTION,
                    format!("duplicate guard for '{}'", guard.path),
                ));
            }
            check_tags(PAGES_SECTION, &guard.path, &guard.allowed_roles)?;
            check_tags(PAGES_SECTION, &guard.path, &guard.allowed_permissions)?;
        }

        Ok(())
    }

    /// Split into a registry and a guard table.
    pub fn into_parts(self, policy: EmptyGroupPolicy) -> (NavigationRegistry, GuardTable) {
        let mut registry = NavigationRegistry::new(policy);
        for (name, nodes) in self.menus {
            registry.replace_menu(name, nodes);
        }
        let guards = self.pages.into_iter().collect();
        (registry, guards)
    }
}

fn validate_siblings(menu: &str, nodes: &[NavigationNode], parent: &str) -> Result<(), NavError> {
    let mut names = HashSet::new();

    for node in nodes {
        if node.name.trim().is_empty() {
            let location = if parent.is_empty() { "top level" } else { parent };
            return Err(NavError::config(
                menu,
                format!("node '{}' under {location} has an empty name", node.label),
            ));
        }
        if !names.insert(node.name.as_str()) {
            return Err(NavError::config(
                menu,
                format!("duplicate sibling name '{}'", node.name),
            ));
        }

        let path = if parent.is_empty() {
            node.name.clone()
        } else {
            format!("{parent}/{}", node.name)
        };
        for tags in [&node.roles, &node.permissions].into_iter().flatten() {
            check_tags(menu, &path, tags)?;
        }
        validate_siblings(menu, node.children(), &path)?;
    }

    Ok(())
}

/// Tags are compared verbatim, so a blank or padded one can never match.
fn check_tags<'a>(
    menu: &str,
    owner: &str,
    tags: impl IntoIterator<Item = &'a String>,
) -> Result<(), NavError> {
    match tags.into_iter().find(|t| t.trim().is_empty() || t.trim() != t.as_str()) {
        Some(tag) => Err(NavError::config(
            menu,
            format!("'{owner}' has a blank or padded tag '{tag}'"),
        )),
        None => Ok(()),
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
struct CacheKey {
    version: u64,
    menu: String,
    ctx: AuthorizationContext,
}

/// Registry of named navigation trees.
#[derive(Debug)]
pub struct NavigationRegistry {
    menus: HashMap<String, Arc<[NavigationNode]>>,
    /// Bumped on every replacement so stale cache entries can never match.
    version: u64,
    policy: EmptyGroupPolicy,
    cache: DashMap<CacheKey, Arc<Vec<NavigationNode>>>,
}

impl NavigationRegistry {
    /// Create an empty registry.
    pub fn new(policy: EmptyGroupPolicy) -> Self {
        Self {
            menus: HashMap::new(),
            version: 0,
            policy,
            cache: DashMap::new(),
        }
    }

    /// Register (or replace) a menu tree.
    pub fn replace_menu(&mut self, name: impl Into<String>, nodes: Vec<NavigationNode>) {
        let name = name.into();
        info!(menu = %name, nodes = nodes.len(), "registered navigation menu");

        self.menus.insert(name, Arc::from(nodes));
        self.version += 1;
        self.cache.clear();
    }

    /// The unfiltered tree for a menu.
    pub fn menu(&self, name: &str) -> Option<&[NavigationNode]> {
        self.menus.get(name).map(|nodes| &**nodes)
    }

    /// The tree for a menu as `ctx` is allowed to see it.
    pub fn filtered(
        &self,
        name: &str,
        ctx: &AuthorizationContext,
    ) -> Option<Arc<Vec<NavigationNode>>> {
        let nodes = self.menus.get(name)?;

        let key = CacheKey {
            version: self.version,
            menu: name.to_string(),
            ctx: ctx.clone(),
        };
        if let Some(hit) = self.cache.get(&key) {
            return Some(Arc::clone(&hit));
        }

        let visible = Arc::new(filter_with(nodes, ctx, self.policy));
        debug!(
            menu = %name,
            roles = ctx.roles().len(),
            permissions = ctx.permissions().len(),
            visible = visible.len(),
            "filtered navigation menu"
        );
        self.cache.insert(key, Arc::clone(&visible));
        Some(visible)
    }

    /// Menu names, sorted.
    pub fn menu_names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.menus.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    pub fn policy(&self) -> EmptyGroupPolicy {
        self.policy
    }

    pub fn version(&self) -> u64 {
        self.version
    }

    /// Drop every memoized filter result.
    pub fn invalidate_all(&self) {
        self.cache.clear();
    }

    /// Get the number of cached entries (for monitoring).
    pub fn cache_size(&self) -> usize {
        self.cache.len()
    }

    pub fn len(&self) -> usize {
        self.menus.len()
    }

    pub fn is_empty(&self) -> bool {
        self.menus.is_empty()
    }
}

impl Default for NavigationRegistry {
    fn default() -> Self {
        Self::new(EmptyGroupPolicy::default())
    }
}
