//! Concurrent collection of git facts across a workspace.
//!
//! A bounded set of scoped worker threads pulls targets from a shared index.
//! Each worker sends `(name, info)` over a channel; the map is built by the
//! calling thread alone, after every worker has been joined.

use std::collections::BTreeMap;
use std::path::Path;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::mpsc;
use std::thread;

use tracing::{debug, info};

use super::inspector::{GitInspector, inspect};
use super::types::{GitTarget, RepoGitInfo};

/// Upper bound on concurrent git queries.
pub const MAX_GIT_WORKERS: usize = 8;

pub fn collect_git_info(
    inspector: &dyn GitInspector,
    root: &Path,
    targets: &[GitTarget],
) -> BTreeMap<String, RepoGitInfo> {
    collect_git_info_with(inspector, root, targets, MAX_GIT_WORKERS)
}

pub fn collect_git_info_with(
    inspector: &dyn GitInspector,
    root: &Path,
    targets: &[GitTarget],
    max_workers: usize,
) -> BTreeMap<String, RepoGitInfo> {
    if targets.is_empty() {
        return BTreeMap::new();
    }

    let workers = max_workers.clamp(1, targets.len());
    let next = AtomicUsize::new(0);
    let (tx, rx) = mpsc::channel();

    debug!(
        event = "core.git.collect_started",
        targets = targets.len(),
        workers = workers
    );

    thread::scope(|scope| {
        for _ in 0..workers {
            let tx = tx.clone();
            let next = &next;
            scope.spawn(move || {
                loop {
                    let index = next.fetch_add(1, Ordering::Relaxed);
                    let Some(target) = targets.get(index) else {
                        break;
                    };
                    let info = RepoGitInfo {
                        status: inspect(inspector, &root.join(&target.name)),
                        tenant: target
                            .tenant
                            .as_ref()
                            .map(|tenant| inspect(inspector, &root.join(tenant))),
                    };
                    if tx.send((target.name.clone(), info)).is_err() {
                        break;
                    }
                }
            });
        }
    });
    // All workers have joined; dropping the last sender closes the channel.
    drop(tx);

    let results: BTreeMap<String, RepoGitInfo> = rx.into_iter().collect();

    info!(
        event = "core.git.collect_completed",
        collected = results.len(),
        failed = results.values().filter(|r| r.status.has_error).count()
    );

    results
}
