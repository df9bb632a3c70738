use crate::config::RemoteBackend;

use super::backends::{ApiProvider, GhCliProvider, RestClient};
use super::traits::{GitHubService, RemoteRepoProvider};

/// Construct the provider for a configured backend.
pub fn get_provider(backend: RemoteBackend) -> Box<dyn RemoteRepoProvider> {
    match backend {
        RemoteBackend::Api => Box::new(ApiProvider::from_env()),
        RemoteBackend::Cli => Box::new(GhCliProvider),
    }
}

/// REST-backed service for operations beyond listing, whatever the
/// configured listing backend.
pub fn get_github_service() -> Box<dyn GitHubService> {
    Box::new(RestClient::from_env())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_get_provider_matches_backend() {
        assert_eq!(get_provider(RemoteBackend::Api).name(), "api");
        assert_eq!(get_provider(RemoteBackend::Cli).name(), "cli");
    }
}
