//! Session flows: pick, open, create, choose among active, close all, and
//! the GitHub-backed views of a project.

mod active;
mod create;
pub mod errors;
mod github;
pub mod handler;
mod open;
mod pick;
pub mod types;

pub use active::ACTIVE_TITLE;
pub use errors::SessionError;
pub use github::{DEFAULT_WORKFLOW, SEARCH_RESULT_LIMIT};
pub use pick::PICK_TITLE;
pub use types::{
    ActiveOutcome, CloseSummary, NewProjectOptions, OpenResult, PickOutcome, SearchOutcome,
    SessionContext,
};
