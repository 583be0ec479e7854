//! GitHub API client for the GraphQL endpoint

use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, AUTHORIZATION};
use tracing::info;
use url::Url;

use crate::{Error, Result};

const USER_AGENT: &str = concat!("projectlink/", env!("CARGO_PKG_VERSION"));

/// GitHub GraphQL client
///
/// Relies on reqwest's default transport timeouts; requests are never retried.
#[derive(Clone)]
pub struct GitHubClient {
    http: reqwest::Client,
    endpoint: Url,
}

impl GitHubClient {
    /// Create a client authenticated with `token` against `endpoint`
    pub fn new(token: &str, endpoint: Url) -> Result<Self> {
        let token = token.trim();
        if token.is_empty() {
            return Err(Error::Auth("GitHub token is empty".to_string()));
        }

        let mut auth = HeaderValue::from_str(&format!("Bearer {}", token))
            .map_err(|_| Error::Auth("GitHub token contains invalid characters".to_string()))?;
        auth.set_sensitive(true);

        let mut headers = HeaderMap::new();
        headers.insert(AUTHORIZATION, auth);
        headers.insert(ACCEPT, HeaderValue::from_static("application/vnd.github+json"));

        let http = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .default_headers(headers)
            .build()?;

        info!(endpoint = %endpoint, "Created GitHub client");

        Ok(Self { http, endpoint })
    }

    /// Get the GraphQL endpoint
    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }

    pub(crate) fn http(&self) -> &reqwest::Client {
        &self.http
    }
}

impl std::fmt::Debug for GitHubClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GitHubClient")
            .field("endpoint", &self.endpoint.as_str())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn endpoint() -> Url {
        Url::parse("https://api.github.com/graphql").unwrap()
    }

    #[test]
    fn test_new_client() {
        let client = GitHubClient::new("ghp_test", endpoint()).unwrap();
        assert_eq!(client.endpoint().as_str(), "https://api.github.com/graphql");
    }

    #[test]
    fn test_empty_token_rejected() {
        assert!(matches!(
            GitHubClient::new("  ", endpoint()),
            Err(Error::Auth(_))
        ));
    }

    #[test]
    fn test_token_with_newline_rejected() {
        assert!(matches!(
            GitHubClient::new("ghp\ntest", endpoint()),
            Err(Error::Auth(_))
        ));
    }

    #[test]
    fn test_debug_hides_token() {
        let client = GitHubClient::new("ghp_secret", endpoint()).unwrap();
        let rendered = format!("{:?}", client);
        assert!(!rendered.contains("ghp_secret"));
        assert!(rendered.contains("api.github.com"));
    }
}
