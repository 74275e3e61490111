//! Navigation menus gated by role and permission.
//!
//! Menus are loaded from configuration and provide:
//! - The navigation trees rendered by the sidebar and header
//! - Per-caller pruning of those trees
//! - Page guards declared next to the menus

mod node;
mod registry;
mod visibility;

pub use node::{IconProps, NavigationNode, RenderKind};
pub use registry::{DEFAULT_NAVIGATION, NavigationConfig, NavigationRegistry};
pub use visibility::{EmptyGroupPolicy, filter, filter_with};
