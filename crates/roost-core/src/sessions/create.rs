//! Creating a new project, optionally published to GitHub.

use std::fs;

use tracing::{error, info};

use crate::git::{INITIAL_BRANCH, init_published_project, validate_git_arg};
use crate::layout::ProjectSelector;
use crate::remote::RemoteError;

use super::errors::SessionError;
use super::open::{ensure_root, launch};
use super::types::{NewProjectOptions, OpenResult, SessionContext};

/// Create `<root>/<name>` and open it.
///
/// With `publish`, the GitHub repository is created first so a rejected name
/// leaves nothing on disk. The directory then gets a README commit, an
/// `origin` remote and an upstream push.
pub fn create_project(
    ctx: &SessionContext<'_>,
    name: &str,
    options: NewProjectOptions,
) -> Result<OpenResult, SessionError> {
    validate_git_arg(name, "project name")?;
    let ws = ctx.workspace;
    let root = ensure_root(ws)?;
    let path = root.join(name);
    if path.exists() {
        return Err(SessionError::ProjectExists {
            path: path.display().to_string(),
        });
    }

    info!(
        event = "core.project.create_started",
        name = name,
        publish = options.publish,
        private = options.private
    );

    let published = if options.publish {
        let owner = ws
            .remote_owner
            .as_deref()
            .filter(|o| !o.is_empty())
            .ok_or_else(|| RemoteError::OwnerNotConfigured {
                workspace: ws.name.clone(),
            })?;
        let created = ctx
            .github
            .create_repo(owner, ws.is_org, name, options.private)?;
        Some((owner, created))
    } else {
        None
    };

    fs::create_dir(&path).map_err(|source| SessionError::CreateProject {
        path: path.display().to_string(),
        source,
    })?;

    if let Some((owner, created)) = published {
        let pushed = init_published_project(&path, owner, &created)
            .and_then(|()| ctx.cloner.push_upstream(&path, INITIAL_BRANCH));
        if let Err(e) = pushed {
            error!(
                event = "core.project.publish_failed",
                name = name,
                error = %e
            );
            return Err(e.into());
        }
    }

    info!(event = "core.project.create_completed", name = name);
    launch(ctx, &ProjectSelector::new(name), &path, false)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{Fixture, MuxCall};
    use crate::tmux::SessionOutcome;

    const PUBLISH: NewProjectOptions = NewProjectOptions {
        publish: true,
        private: true,
    };

    #[test]
    fn test_create_local_project_opens_session() {
        let fixture = Fixture::new();
        let result =
            create_project(&fixture.ctx(), "fresh", NewProjectOptions::default()).unwrap();

        assert_eq!(result.session, "ws-fresh");
        assert_eq!(result.outcome, SessionOutcome::Created);
        assert!(fixture.root().join("fresh").is_dir());
        assert!(!fixture.root().join("fresh/.git").exists());
        assert!(fixture.github.created().is_empty());
        assert!(fixture.mux.calls().contains(&MuxCall::Attach("ws-fresh".to_string())));
    }

    #[test]
    fn test_create_refuses_existing_directory() {
        let fixture = Fixture::new().with_dirs(&["taken"]);
        let err = create_project(&fixture.ctx(), "taken", PUBLISH).unwrap_err();
        assert!(matches!(err, SessionError::ProjectExists { .. }));
        assert!(fixture.github.created().is_empty());
        assert!(fixture.mux.calls().is_empty());
    }

    #[test]
    fn test_create_rejects_path_like_name() {
        let fixture = Fixture::new();
        let err = create_project(&fixture.ctx(), "../escape", NewProjectOptions::default())
            .unwrap_err();
        assert!(matches!(err, SessionError::Git { .. }));
        assert!(!fixture.root().join("escape").exists());
    }

    #[test]
    fn test_publish_creates_repo_commits_and_pushes() {
        let fixture = Fixture::new();
        create_project(&fixture.ctx(), "svc", PUBLISH).unwrap();

        assert_eq!(fixture.github.created(), vec!["octocat/svc private".to_string()]);
        let path = fixture.root().join("svc");
        let repo = git2::Repository::open(&path).unwrap();
        assert_eq!(
            repo.find_remote("origin").unwrap().url(),
            Some("git@github.com:octocat/svc.git")
        );
        assert_eq!(fixture.cloner.pushed(), vec![format!("{}@main", path.display())]);
    }

    #[test]
    fn test_publish_without_owner_touches_nothing() {
        let mut fixture = Fixture::new();
        fixture.workspace.remote_owner = None;
        let err = create_project(&fixture.ctx(), "svc", PUBLISH).unwrap_err();

        assert!(matches!(
            err,
            SessionError::Remote {
                source: RemoteError::OwnerNotConfigured { .. }
            }
        ));
        assert!(!fixture.root().join("svc").exists());
    }

    #[test]
    fn test_rejected_repo_leaves_no_directory() {
        let fixture = Fixture::new().failing_github();
        let err = create_project(&fixture.ctx(), "svc", PUBLISH).unwrap_err();
        assert!(matches!(err, SessionError::Remote { .. }));
        assert!(!fixture.root().join("svc").exists());
        assert!(fixture.mux.calls().is_empty());
    }
}
