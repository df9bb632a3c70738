//! Session materialization.
//!
//! `Absent -> Created -> Attached`, or `Absent -> Attached` when a session of
//! the same name is already running. Provisioning failures return before
//! attaching and leave whatever exists in place; the next run sees the
//! session and re-attaches.

use tracing::{info, warn};

use crate::layout::SessionLayoutPlan;

use super::errors::TmuxError;
use super::multiplexer::Multiplexer;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionOutcome {
    /// The session already existed; only attached.
    Reattached,
    /// Windows and panes were provisioned, then attached.
    Created,
}

pub fn materialize(
    mux: &dyn Multiplexer,
    session_name: &str,
    plan: &SessionLayoutPlan,
) -> Result<SessionOutcome, TmuxError> {
    if mux.session_exists(session_name)? {
        info!(event = "core.session.reattach", session = session_name);
        mux.attach(session_name)?;
        return Ok(SessionOutcome::Reattached);
    }

    info!(
        event = "core.session.provision_started",
        session = session_name,
        windows = plan.windows.len(),
        panes = plan.pane_count()
    );

    if let Err(e) = provision(mux, session_name, plan) {
        warn!(
            event = "core.session.provision_failed",
            session = session_name,
            error = %e
        );
        return Err(e);
    }

    mux.attach(session_name)?;
    info!(event = "core.session.provision_completed", session = session_name);
    Ok(SessionOutcome::Created)
}

fn provision(
    mux: &dyn Multiplexer,
    session_name: &str,
    plan: &SessionLayoutPlan,
) -> Result<(), TmuxError> {
    mux.create_session(session_name, &plan.base_path)?;

    // (window id, pane ids in creation order) per window
    let mut created: Vec<(String, Vec<String>)> = Vec::with_capacity(plan.windows.len());

    for window in &plan.windows {
        let first_path = window
            .panes
            .first()
            .map(|p| p.path.as_path())
            .unwrap_or(window.path.as_path());

        let new_window = mux.create_window(session_name, &window.name, first_path)?;
        let mut pane_ids = vec![new_window.pane_id];

        for pane in window.panes.iter().skip(1) {
            let target = pane_ids.last().cloned().unwrap_or_default();
            let pane_id = mux.create_pane(&target, pane.orientation, pane.size, &pane.path)?;
            pane_ids.push(pane_id);
        }

        if let Some(layout) = &window.layout {
            mux.apply_layout(&new_window.window_id, layout)?;
        }

        created.push((new_window.window_id, pane_ids));
    }

    for (window, (_, pane_ids)) in plan.windows.iter().zip(&created) {
        for (pane, pane_id) in window.panes.iter().zip(pane_ids) {
            if !pane.command.is_empty() {
                mux.run_command(pane_id, &pane.command)?;
            }
        }
    }

    if let Some((window_id, pane_ids)) = created.first() {
        mux.select_window(window_id)?;
        if let Some(pane_id) = pane_ids.first() {
            mux.select_pane(pane_id)?;
        }
    }

    Ok(())
}
