//! GitHub REST backend for repository creation, code search, workflow runs
//! and pull requests.

use reqwest::StatusCode;
use reqwest::blocking::{Client, RequestBuilder};
use serde::Deserialize;
use serde_json::json;
use tracing::{debug, info, warn};

use crate::remote::errors::RemoteError;
use crate::remote::traits::GitHubService;
use crate::remote::types::{CodeMatch, PullRequestSummary, RunState, WorkflowRun};

use super::api::TOKEN_ENV;

const API_ROOT: &str = "https://api.github.com";
const SEARCH_PAGE_SIZE: &str = "100";
const ACCEPT_JSON: &str = "application/vnd.github+json";
const ACCEPT_TEXT_MATCH: &str = "application/vnd.github.text-match+json";

/// Talks to the REST API with the token from `GITHUB_AUTH`.
///
/// Unlike repository listing, every operation here needs the token.
pub struct RestClient {
    token: Option<String>,
    api_root: String,
}

impl RestClient {
    pub fn new(token: Option<String>) -> Self {
        Self {
            token: token.filter(|t| !t.is_empty()),
            api_root: API_ROOT.to_string(),
        }
    }

    pub fn from_env() -> Self {
        Self::new(std::env::var(TOKEN_ENV).ok())
    }

    fn token(&self, operation: &str) -> Result<&str, RemoteError> {
        self.token
            .as_deref()
            .ok_or_else(|| RemoteError::TokenRequired {
                operation: operation.to_string(),
            })
    }

    fn client(&self, operation: &str) -> Result<Client, RemoteError> {
        Client::builder()
            .user_agent(concat!("roost/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| request_failed(operation, e))
    }

    /// Send and return the status with the body text.
    fn send(
        &self,
        operation: &str,
        request: RequestBuilder,
        accept: &str,
    ) -> Result<(StatusCode, String), RemoteError> {
        let token = self.token(operation)?;
        let response = request
            .bearer_auth(token)
            .header("Accept", accept)
            .header("X-GitHub-Api-Version", "2022-11-28")
            .send()
            .map_err(|e| request_failed(operation, e))?;
        let status = response.status();
        let body = response.text().map_err(|e| request_failed(operation, e))?;
        debug!(
            event = "core.remote.rest_response",
            operation = operation,
            status = status.as_u16()
        );
        Ok((status, body))
    }
}

fn request_failed(operation: &str, e: reqwest::Error) -> RemoteError {
    RemoteError::RequestFailed {
        owner: operation.to_string(),
        message: e.to_string(),
    }
}

fn parse_failed(operation: &str, e: serde_json::Error) -> RemoteError {
    RemoteError::ParseFailed {
        source_name: format!("GitHub REST ({operation})"),
        message: e.to_string(),
    }
}

#[derive(Debug, Deserialize)]
struct ApiMessage {
    message: String,
}

/// Turn a non-success response into an error carrying GitHub's message.
fn api_failure(operation: &str, status: StatusCode, body: &str) -> RemoteError {
    let message = serde_json::from_str::<ApiMessage>(body)
        .map(|m| m.message)
        .unwrap_or_else(|_| body.trim().to_string());
    RemoteError::ApiStatus {
        operation: operation.to_string(),
        status: status.as_u16(),
        message,
    }
}

fn search_query(owner: &str, is_org: bool, terms: &str) -> String {
    let qualifier = if is_org { "org" } else { "user" };
    format!("{} {qualifier}:{owner}", terms.trim())
}

#[derive(Debug, Deserialize)]
struct CreatedRepo {
    name: String,
}

#[derive(Debug, Deserialize)]
struct SearchResponse {
    items: Vec<SearchItem>,
}

#[derive(Debug, Deserialize)]
struct SearchItem {
    path: String,
    repository: SearchRepo,
    #[serde(default)]
    text_matches: Vec<TextMatch>,
}

#[derive(Debug, Deserialize)]
struct SearchRepo {
    name: String,
}

#[derive(Debug, Deserialize)]
struct TextMatch {
    fragment: String,
}

fn parse_search(body: &str) -> Result<Vec<CodeMatch>, RemoteError> {
    let response: SearchResponse =
        serde_json::from_str(body).map_err(|e| parse_failed("code search", e))?;
    Ok(response
        .items
        .into_iter()
        .map(|item| {
            let language = std::path::Path::new(&item.path)
                .extension()
                .and_then(|ext| ext.to_str())
                .unwrap_or_default()
                .to_string();
            CodeMatch {
                repo: item.repository.name,
                fragment: item
                    .text_matches
                    .into_iter()
                    .next()
                    .map(|m| m.fragment)
                    .unwrap_or_default(),
                path: item.path,
                language,
            }
        })
        .collect())
}

#[derive(Debug, Deserialize)]
struct RunsResponse {
    workflow_runs: Vec<RunItem>,
}

#[derive(Debug, Deserialize)]
struct RunItem {
    status: String,
    conclusion: Option<String>,
    html_url: String,
}

/// GitHub lists runs newest first.
fn parse_latest_run(body: &str) -> Result<Option<WorkflowRun>, RemoteError> {
    let response: RunsResponse =
        serde_json::from_str(body).map_err(|e| parse_failed("workflow runs", e))?;
    Ok(response.workflow_runs.into_iter().next().map(|run| WorkflowRun {
        state: RunState::from_api(&run.status, run.conclusion.as_deref()),
        url: run.html_url,
    }))
}

#[derive(Debug, Deserialize)]
struct PullItem {
    number: u64,
    title: String,
    html_url: String,
    #[serde(default)]
    draft: bool,
    user: Option<PullUser>,
}

#[derive(Debug, Deserialize)]
struct PullUser {
    login: String,
}

fn parse_pulls(body: &str) -> Result<Vec<PullRequestSummary>, RemoteError> {
    let pulls: Vec<PullItem> =
        serde_json::from_str(body).map_err(|e| parse_failed("pull requests", e))?;
    Ok(pulls
        .into_iter()
        .map(|p| PullRequestSummary {
            number: p.number,
            title: p.title,
            url: p.html_url,
            author: p.user.map(|u| u.login).unwrap_or_default(),
            draft: p.draft,
        })
        .collect())
}

impl GitHubService for RestClient {
    fn create_repo(
        &self,
        owner: &str,
        is_org: bool,
        name: &str,
        private: bool,
    ) -> Result<String, RemoteError> {
        let operation = "repository creation";
        let url = if is_org {
            format!("{}/orgs/{owner}/repos", self.api_root)
        } else {
            format!("{}/user/repos", self.api_root)
        };

        let request = self
            .client(operation)?
            .post(url)
            .json(&json!({ "name": name, "private": private }));
        let (status, body) = self.send(operation, request, ACCEPT_JSON)?;
        if !status.is_success() {
            return Err(api_failure(operation, status, &body));
        }

        let created: CreatedRepo =
            serde_json::from_str(&body).map_err(|e| parse_failed(operation, e))?;
        info!(
            event = "core.remote.repo_created",
            owner = owner,
            name = %created.name,
            private = private
        );
        Ok(created.name)
    }

    fn search_code(
        &self,
        owner: &str,
        is_org: bool,
        terms: &str,
    ) -> Result<Vec<CodeMatch>, RemoteError> {
        let operation = "code search";
        let query = search_query(owner, is_org, terms);
        let request = self
            .client(operation)?
            .get(format!("{}/search/code", self.api_root))
            .query(&[("q", query.as_str()), ("per_page", SEARCH_PAGE_SIZE)]);
        let (status, body) = self.send(operation, request, ACCEPT_TEXT_MATCH)?;
        if !status.is_success() {
            return Err(api_failure(operation, status, &body));
        }

        let matches = parse_search(&body)?;
        info!(
            event = "core.remote.search_completed",
            owner = owner,
            count = matches.len()
        );
        Ok(matches)
    }

    fn latest_workflow_run(
        &self,
        owner: &str,
        repo: &str,
        workflow: &str,
        branch: &str,
    ) -> Result<Option<WorkflowRun>, RemoteError> {
        let operation = "workflow run listing";
        let request = self
            .client(operation)?
            .get(format!(
                "{}/repos/{owner}/{repo}/actions/workflows/{workflow}/runs",
                self.api_root
            ))
            .query(&[("branch", branch), ("per_page", "1")]);
        let (status, body) = self.send(operation, request, ACCEPT_JSON)?;
        if status == StatusCode::NOT_FOUND {
            warn!(
                event = "core.remote.workflow_not_found",
                repo = repo,
                workflow = workflow
            );
            return Ok(None);
        }
        if !status.is_success() {
            return Err(api_failure(operation, status, &body));
        }
        parse_latest_run(&body)
    }

    fn open_pull_requests(
        &self,
        owner: &str,
        repo: &str,
        branch: &str,
    ) -> Result<Vec<PullRequestSummary>, RemoteError> {
        let operation = "pull request listing";
        let head = format!("{owner}:{branch}");
        let request = self
            .client(operation)?
            .get(format!("{}/repos/{owner}/{repo}/pulls", self.api_root))
            .query(&[("state", "open"), ("head", head.as_str())]);
        let (status, body) = self.send(operation, request, ACCEPT_JSON)?;
        if !status.is_success() {
            return Err(api_failure(operation, status, &body));
        }
        parse_pulls(&body)
    }
}
