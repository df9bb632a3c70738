//! `gh` CLI backend.

use std::process::Command;

use serde::Deserialize;
use tracing::{info, warn};

use crate::remote::errors::RemoteError;
use crate::remote::traits::RemoteRepoProvider;

const GH: &str = "gh";
const LIST_LIMIT: &str = "1000";

/// Lists repositories with `gh repo list`, using the user's gh login.
#[derive(Debug, Default, Clone, Copy)]
pub struct GhCliProvider;

#[derive(Debug, Deserialize)]
struct GhRepo {
    name: String,
}

/// Parse `gh repo list --json name` output, dropping any `owner/` prefix.
fn parse_repo_list(owner: &str, stdout: &str) -> Result<Vec<String>, RemoteError> {
    let repos: Vec<GhRepo> =
        serde_json::from_str(stdout).map_err(|e| RemoteError::ParseFailed {
            source_name: GH.to_string(),
            message: e.to_string(),
        })?;

    let prefix = format!("{owner}/");
    Ok(repos
        .into_iter()
        .map(|r| match r.name.strip_prefix(&prefix) {
            Some(short) => short.to_string(),
            None => r.name,
        })
        .collect())
}

impl RemoteRepoProvider for GhCliProvider {
    fn name(&self) -> &'static str {
        "cli"
    }

    fn list_repo_names(&self, owner: &str, _is_org: bool) -> Result<Vec<String>, RemoteError> {
        let gh = which::which(GH).map_err(|_| RemoteError::CommandNotFound {
            command: GH.to_string(),
        })?;

        let output = Command::new(gh)
            .args(["repo", "list", owner, "--json", "name", "--limit", LIST_LIMIT])
            .output()
            .map_err(|e| RemoteError::CommandFailed {
                command: format!("{GH} repo list {owner}"),
                message: e.to_string(),
            })?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            warn!(
                event = "core.remote.gh_failed",
                owner = owner,
                stderr = %stderr.trim()
            );
            return Err(RemoteError::CommandFailed {
                command: format!("{GH} repo list {owner}"),
                message: stderr.trim().to_string(),
            });
        }

        let names = parse_repo_list(owner, &String::from_utf8_lossy(&output.stdout))?;
        info!(
            event = "core.remote.gh_listed",
            owner = owner,
            count = names.len()
        );
        Ok(names)
    }
}
