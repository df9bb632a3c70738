//! Session layouts: selector parsing and preset resolution.

pub mod errors;
pub mod resolver;
pub mod types;

pub use errors::LayoutError;
pub use resolver::{EDITOR_COMMANDS, resolve_layout};
pub use types::{PanePlan, ProjectSelector, SessionLayoutPlan, WindowPlan};
