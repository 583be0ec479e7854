//! GitHub GraphQL request plumbing

use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::json;
use tracing::debug;

use crate::{Error, GitHubClient, Result};

/// GraphQL query response wrapper
#[derive(Debug, Deserialize)]
pub(crate) struct GraphQLResponse<T> {
    data: Option<T>,
    errors: Option<Vec<GraphQLError>>,
}

/// GraphQL error
#[derive(Debug, Deserialize)]
struct GraphQLError {
    message: String,
}

impl<T> GraphQLResponse<T> {
    /// Turn the response into its data, failing on any reported error
    pub(crate) fn into_data(self) -> Result<T> {
        if let Some(errors) = self.errors.filter(|e| !e.is_empty()) {
            return Err(Error::GraphQL(
                errors.into_iter().map(|e| e.message).collect(),
            ));
        }

        self.data.ok_or(Error::MissingData)
    }
}

/// Parse a raw GraphQL response body
pub(crate) fn parse_response<T: DeserializeOwned>(body: &str) -> Result<T> {
    let response: GraphQLResponse<T> = serde_json::from_str(body)
        .map_err(|e| Error::Parse(format!("Failed to parse GraphQL response: {}", e)))?;
    response.into_data()
}

impl GitHubClient {
    /// Execute a GraphQL query or mutation
    pub(crate) async fn graphql_query<T: DeserializeOwned>(
        &self,
        query: &str,
        variables: &serde_json::Value,
    ) -> Result<T> {
        let request_body = json!({
            "query": query,
            "variables": variables,
        });

        debug!(endpoint = %self.endpoint(), "Sending GraphQL request");

        let response = self
            .http()
            .post(self.endpoint().clone())
            .json(&request_body)
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            return Err(Error::Status { status, body });
        }

        parse_response(&body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Deserialize)]
    struct Viewer {
        login: String,
    }

    #[derive(Debug, Deserialize)]
    struct ViewerData {
        viewer: Viewer,
    }

    #[test]
    fn test_parse_data() {
        let data: ViewerData = parse_response(r#"{"data": {"viewer": {"login": "octocat"}}}"#).unwrap();
        assert_eq!(data.viewer.login, "octocat");
    }

    #[test]
    fn test_errors_take_precedence_over_data() {
        let body = r#"{
            "data": null,
            "errors": [
                {"type": "NOT_FOUND", "path": ["nodes", 0], "message": "Could not resolve to a node with the global id of 'PR_x'"}
            ]
        }"#;
        let err = parse_response::<ViewerData>(body).unwrap_err();
        assert!(matches!(err, Error::GraphQL(ref msgs) if msgs.len() == 1));
        assert!(err.to_string().contains("Could not resolve"));
    }

    #[test]
    fn test_empty_error_list_is_ignored() {
        let body = r#"{"data": {"viewer": {"login": "octocat"}}, "errors": []}"#;
        assert!(parse_response::<ViewerData>(body).is_ok());
    }

    #[test]
    fn test_missing_data() {
        assert!(matches!(
            parse_response::<ViewerData>("{}"),
            Err(Error::MissingData)
        ));
    }

    #[test]
    fn test_malformed_body() {
        assert!(matches!(
            parse_response::<ViewerData>("<html>Bad Gateway</html>"),
            Err(Error::Parse(_))
        ));
    }
}
