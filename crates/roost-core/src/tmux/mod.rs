//! tmux integration: command runner, multiplexer primitives and the
//! session driver.

pub mod driver;
pub mod errors;
pub mod executor;
pub mod multiplexer;

pub use driver::{SessionOutcome, materialize};
pub use errors::TmuxError;
pub use executor::{TmuxCommandRunner, TmuxExecutor};
pub use multiplexer::{Multiplexer, NewWindow, TmuxMultiplexer};

/// tmux format string matching the sessions of a workspace prefix,
/// for use in status-line filters.
pub fn session_filter(prefix: &str) -> String {
    format!("#{{m:{prefix}-*,#{{session_name}}}}")
}
