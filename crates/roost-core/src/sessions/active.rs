//! Flows over the live sessions of a workspace.

use tracing::{info, warn};

use crate::picker::PickerItem;
use crate::usage;

use super::errors::SessionError;
use super::open::{ensure_root, load_workspace_cache};
use super::types::{ActiveOutcome, CloseSummary, SessionContext};

pub const ACTIVE_TITLE: &str = "Open projects";

/// `(session, project)` pairs of live sessions belonging to the workspace.
pub fn workspace_sessions(
    ctx: &SessionContext<'_>,
) -> Result<Vec<(String, String)>, SessionError> {
    Ok(ctx
        .mux
        .list_sessions()?
        .into_iter()
        .filter_map(|session| {
            let project = ctx.workspace.project_from_session(&session)?;
            Some((session, project))
        })
        .collect())
}

/// Projects with a live session; an unreachable multiplexer means none.
pub fn active_projects(ctx: &SessionContext<'_>) -> Vec<String> {
    match workspace_sessions(ctx) {
        Ok(sessions) => sessions.into_iter().map(|(_, project)| project).collect(),
        Err(e) => {
            warn!(event = "core.session.list_failed", error = %e);
            Vec::new()
        }
    }
}

/// Pick one of the workspace's live sessions and attach to it.
pub fn choose_active_session(ctx: &SessionContext<'_>) -> Result<ActiveOutcome, SessionError> {
    let sessions = workspace_sessions(ctx)?;
    if sessions.is_empty() {
        info!(event = "core.session.none_active");
        return Ok(ActiveOutcome::NoneActive);
    }

    let items: Vec<PickerItem> = sessions
        .iter()
        .map(|(session, project)| PickerItem {
            label: project.clone(),
            subtitle: session.clone(),
            key: session.clone(),
            active: true,
        })
        .collect();

    let title = format!("{ACTIVE_TITLE} in workspace: {}", ctx.workspace.name);
    let Some(chosen) = ctx.picker.pick(&title, &items)? else {
        return Ok(ActiveOutcome::Cancelled);
    };

    if let Some((_, project)) = sessions.iter().find(|(s, _)| s == &chosen)
        && ctx.workspace.tracks_usage()
        && let Ok(root) = ensure_root(ctx.workspace)
    {
        let mut cache = load_workspace_cache(ctx.workspace, &root);
        usage::record_access(ctx.workspace, &mut cache, project);
        usage::save_best_effort(ctx.workspace, &mut cache);
    }

    ctx.mux.attach(&chosen)?;
    Ok(ActiveOutcome::Attached { session: chosen })
}

/// Kill every live session of the workspace.
///
/// Refuses to run with an empty prefix, which would match every session.
/// Individual kill failures are collected and do not stop the sweep.
pub fn close_all_sessions(ctx: &SessionContext<'_>) -> Result<CloseSummary, SessionError> {
    if ctx.workspace.prefix.is_empty() {
        return Err(SessionError::EmptyPrefix {
            workspace: ctx.workspace.name.clone(),
        });
    }

    let mut summary = CloseSummary::default();
    for (session, _) in workspace_sessions(ctx)? {
        match ctx.mux.kill_session(&session) {
            Ok(()) => summary.closed.push(session),
            Err(e) => {
                warn!(event = "core.session.kill_failed", session = %session, error = %e);
                summary.failed.push((session, e.to_string()));
            }
        }
    }

    info!(
        event = "core.session.close_all_completed",
        closed = summary.closed.len(),
        failed = summary.failed.len()
    );
    Ok(summary)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::load_cache;
    use crate::test_support::{Fixture, MuxCall};

    #[test]
    fn test_workspace_sessions_filters_by_prefix() {
        let fixture = Fixture::new().with_sessions(&["ws-a", "notes-b", "ws-c", "misc"]);
        assert_eq!(
            workspace_sessions(&fixture.ctx()).unwrap(),
            vec![
                ("ws-a".to_string(), "a".to_string()),
                ("ws-c".to_string(), "c".to_string()),
            ]
        );
    }

    #[test]
    fn test_empty_prefix_marks_nothing_active() {
        let mut fixture = Fixture::new().with_sessions(&["alpha", "ws-beta"]);
        fixture.workspace.prefix = String::new();
        assert!(active_projects(&fixture.ctx()).is_empty());
    }

    #[test]
    fn test_active_projects_tolerates_unreachable_mux() {
        let fixture = Fixture::new().unreachable_mux();
        assert!(active_projects(&fixture.ctx()).is_empty());
    }

    #[test]
    fn test_choose_active_attaches_and_records_usage() {
        let fixture = Fixture::new()
            .with_sessions(&["ws-a", "ws-c"])
            .picking(Some("ws-c"));

        let outcome = choose_active_session(&fixture.ctx()).unwrap();
        assert_eq!(
            outcome,
            ActiveOutcome::Attached {
                session: "ws-c".to_string()
            }
        );
        assert!(fixture.mux.calls().contains(&MuxCall::Attach("ws-c".to_string())));
        assert_eq!(load_cache(fixture.root()).projects["c"].access_count_total, 1);

        let (_, labels) = fixture.picker.last_call().unwrap();
        assert_eq!(labels, vec!["a", "c"]);
    }

    #[test]
    fn test_choose_active_with_no_sessions() {
        let fixture = Fixture::new().with_sessions(&["other"]);
        assert_eq!(
            choose_active_session(&fixture.ctx()).unwrap(),
            ActiveOutcome::NoneActive
        );
        assert!(fixture.picker.last_call().is_none());
    }

    #[test]
    fn test_close_all_only_touches_workspace_sessions() {
        let fixture = Fixture::new().with_sessions(&["ws-a", "notes-b", "ws-c"]);
        let summary = close_all_sessions(&fixture.ctx()).unwrap();
        assert_eq!(summary.closed, vec!["ws-a", "ws-c"]);
        assert!(summary.failed.is_empty());
        assert_eq!(fixture.mux.sessions(), vec!["notes-b"]);
    }

    #[test]
    fn test_close_all_refuses_empty_prefix() {
        let fixture = Fixture::new().with_sessions(&["ws-a"]);
        let mut workspace = fixture.workspace.clone();
        workspace.prefix = String::new();
        let ctx = SessionContext {
            workspace: &workspace,
            ..fixture.ctx()
        };
        let err = close_all_sessions(&ctx).unwrap_err();
        assert!(matches!(err, SessionError::EmptyPrefix { .. }));
        assert_eq!(fixture.mux.sessions(), vec!["ws-a"]);
    }
}
