//! Re-export facade for session flows.

pub use super::active::{
    active_projects, choose_active_session, close_all_sessions, workspace_sessions,
};
pub use super::create::create_project;
pub use super::github::{open_pull_requests, search_code, workflow_branches, workflow_status};
pub use super::open::open_project;
pub use super::pick::pick_project;
