//! GitHub GraphQL backend.

use reqwest::blocking::Client;
use serde::Deserialize;
use serde_json::json;
use tracing::{debug, info};

use crate::remote::errors::RemoteError;
use crate::remote::traits::RemoteRepoProvider;

const GRAPHQL_ENDPOINT: &str = "https://api.github.com/graphql";
pub(super) const TOKEN_ENV: &str = "GITHUB_AUTH";
const PAGE_SIZE: u32 = 100;

/// Lists repositories through the GraphQL API, 100 per page.
///
/// Without a token the listing is empty rather than an error.
pub struct ApiProvider {
    token: Option<String>,
    endpoint: String,
}

impl ApiProvider {
    pub fn new(token: Option<String>) -> Self {
        Self {
            token: token.filter(|t| !t.is_empty()),
            endpoint: GRAPHQL_ENDPOINT.to_string(),
        }
    }

    /// Read the token from `GITHUB_AUTH`.
    pub fn from_env() -> Self {
        Self::new(std::env::var(TOKEN_ENV).ok())
    }
}

#[derive(Debug, Deserialize)]
struct GraphQlResponse {
    data: Option<OwnerData>,
    #[serde(default)]
    errors: Vec<GraphQlError>,
}

#[derive(Debug, Deserialize)]
struct GraphQlError {
    message: String,
}

#[derive(Debug, Deserialize)]
struct OwnerData {
    #[serde(alias = "organization", alias = "user")]
    owner: Option<OwnerRepos>,
}

#[derive(Debug, Deserialize)]
struct OwnerRepos {
    repositories: RepoConnection,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RepoConnection {
    nodes: Vec<RepoNode>,
    page_info: PageInfo,
}

#[derive(Debug, Deserialize)]
struct RepoNode {
    name: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PageInfo {
    has_next_page: bool,
    end_cursor: Option<String>,
}

fn build_query(is_org: bool) -> String {
    let field = if is_org { "organization" } else { "user" };
    format!(
        "query($login: String!, $cursor: String) {{ {field}(login: $login) {{ \
         repositories(first: {PAGE_SIZE}, after: $cursor) {{ \
         nodes {{ name }} pageInfo {{ hasNextPage endCursor }} }} }} }}"
    )
}

/// One page of names plus the cursor for the next page, if any.
fn parse_page(owner: &str, body: &str) -> Result<(Vec<String>, Option<String>), RemoteError> {
    let response: GraphQlResponse =
        serde_json::from_str(body).map_err(|e| RemoteError::ParseFailed {
            source_name: "GitHub GraphQL".to_string(),
            message: e.to_string(),
        })?;

    if !response.errors.is_empty() {
        let message = response
            .errors
            .iter()
            .map(|e| e.message.as_str())
            .collect::<Vec<_>>()
            .join("; ");
        return Err(RemoteError::QueryFailed {
            owner: owner.to_string(),
            message,
        });
    }

    let repos = response
        .data
        .and_then(|d| d.owner)
        .ok_or_else(|| RemoteError::QueryFailed {
            owner: owner.to_string(),
            message: "owner not found".to_string(),
        })?
        .repositories;

    let names = repos.nodes.into_iter().map(|n| n.name).collect();
    let next = if repos.page_info.has_next_page {
        repos.page_info.end_cursor
    } else {
        None
    };
    Ok((names, next))
}

impl RemoteRepoProvider for ApiProvider {
    fn name(&self) -> &'static str {
        "api"
    }

    fn list_repo_names(&self, owner: &str, is_org: bool) -> Result<Vec<String>, RemoteError> {
        let Some(token) = &self.token else {
            debug!(event = "core.remote.api_no_token", owner = owner);
            return Ok(Vec::new());
        };

        let request_err = |e: reqwest::Error| RemoteError::RequestFailed {
            owner: owner.to_string(),
            message: e.to_string(),
        };

        let client = Client::builder()
            .user_agent(concat!("roost/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(request_err)?;

        let query = build_query(is_org);
        let mut names = Vec::new();
        let mut cursor: Option<String> = None;

        loop {
            let body = client
                .post(&self.endpoint)
                .bearer_auth(token)
                .json(&json!({
                    "query": query,
                    "variables": { "login": owner, "cursor": cursor },
                }))
                .send()
                .and_then(|r| r.error_for_status())
                .and_then(|r| r.text())
                .map_err(request_err)?;

            let (page, next) = parse_page(owner, &body)?;
            names.extend(page);

            match next {
                Some(next) => cursor = Some(next),
                None => break,
            }
        }

        info!(
            event = "core.remote.api_listed",
            owner = owner,
            count = names.len()
        );
        Ok(names)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_token_yields_empty_list() {
        let provider = ApiProvider::new(None);
        assert!(provider.list_repo_names("octocat", false).unwrap().is_empty());

        let provider = ApiProvider::new(Some(String::new()));
        assert!(provider.list_repo_names("octocat", true).unwrap().is_empty());
    }

    #[test]
    fn test_query_targets_owner_kind() {
        assert!(build_query(true).contains("organization(login: $login)"));
        assert!(build_query(false).contains("user(login: $login)"));
        assert!(build_query(false).contains("first: 100"));
    }

    #[test]
    fn test_parse_page_with_next_cursor() {
        let body = r#"{"data":{"organization":{"repositories":{
            "nodes":[{"name":"one"},{"name":"two"}],
            "pageInfo":{"hasNextPage":true,"endCursor":"abc"}}}}}"#;
        let (names, next) = parse_page("org", body).unwrap();
        assert_eq!(names, vec!["one", "two"]);
        assert_eq!(next.as_deref(), Some("abc"));
    }

    #[test]
    fn test_parse_last_page() {
        let body = r#"{"data":{"user":{"repositories":{
            "nodes":[{"name":"solo"}],
            "pageInfo":{"hasNextPage":false,"endCursor":"zzz"}}}}}"#;
        let (names, next) = parse_page("me", body).unwrap();
        assert_eq!(names, vec!["solo"]);
        assert_eq!(next, None);
    }

    #[test]
    fn test_parse_graphql_errors() {
        let body = r#"{"data":{"user":null},"errors":[{"message":"Could not resolve to a User"}]}"#;
        let err = parse_page("ghost", body).unwrap_err();
        assert!(matches!(err, RemoteError::QueryFailed { .. }));
        assert!(err.to_string().contains("Could not resolve"));
    }

    #[test]
    fn test_parse_null_owner() {
        let err = parse_page("ghost", r#"{"data":{"user":null}}"#).unwrap_err();
        assert!(err.to_string().contains("owner not found"));
    }
}
