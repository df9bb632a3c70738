//! Initial repository setup for newly created projects.

use std::fs;
use std::path::Path;

use git2::{Repository, RepositoryInitOptions, Signature};
use tracing::info;

use super::cli::clone_url;
use super::errors::GitError;

pub const INITIAL_BRANCH: &str = "main";
pub const INITIAL_COMMIT_MESSAGE: &str = "Initial commit";

/// Initialise `path` with a README commit on [`INITIAL_BRANCH`] and an
/// `origin` remote pointing at `owner/name` on GitHub.
pub fn init_published_project(path: &Path, owner: &str, name: &str) -> Result<(), GitError> {
    let mut opts = RepositoryInitOptions::new();
    opts.initial_head(INITIAL_BRANCH);
    let repo = Repository::init_opts(path, &opts)?;

    fs::write(path.join("README.md"), format!("# {name}\n"))?;

    let mut index = repo.index()?;
    index.add_path(Path::new("README.md"))?;
    index.write()?;
    let tree = repo.find_tree(index.write_tree()?)?;

    let signature = match repo.signature() {
        Ok(sig) => sig,
        Err(_) => Signature::now("roost", "roost@localhost")?,
    };
    repo.commit(
        Some("HEAD"),
        &signature,
        &signature,
        INITIAL_COMMIT_MESSAGE,
        &tree,
        &[],
    )?;

    let url = clone_url(owner, name);
    repo.remote("origin", &url)?;

    info!(
        event = "core.git.project_initialised",
        path = %path.display(),
        origin = %url
    );
    Ok(())
}
