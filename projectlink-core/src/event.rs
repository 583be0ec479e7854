//! Reading the triggering workflow event
//!
//! GitHub Actions writes the webhook payload that started the workflow to the
//! file named by `GITHUB_EVENT_PATH`. Only the pull request's node id is needed;
//! everything else in the payload is ignored.

use std::path::Path;

use serde::Deserialize;
use tracing::debug;

use crate::{Error, PullRequestRef, Result};

/// Environment variable naming the event payload file
pub const EVENT_PATH_ENV: &str = "GITHUB_EVENT_PATH";

/// The subset of a workflow event payload that matters here
#[derive(Debug, Clone, Default, Deserialize)]
pub struct EventPayload {
    /// Present only for `pull_request` and `pull_request_target` events
    #[serde(default)]
    pub pull_request: Option<PullRequestPayload>,
}

/// Pull request object embedded in the event payload
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PullRequestPayload {
    /// GraphQL node id
    #[serde(default)]
    pub node_id: Option<String>,

    /// PR number, used for logging only
    #[serde(default)]
    pub number: Option<u64>,
}

impl EventPayload {
    /// Parse a payload from JSON text
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Load the payload from a file
    pub fn load(path: &Path) -> Result<Self> {
        debug!(path = %path.display(), "Reading event payload");
        let contents = std::fs::read_to_string(path).map_err(Error::Io)?;
        Self::from_json(&contents)
    }

    /// Get the triggering pull request
    ///
    /// Fails with [`Error::NotAPullRequest`] when the event carries no pull
    /// request or the pull request has no node id.
    pub fn pull_request_ref(&self) -> Result<PullRequestRef> {
        let node_id = self
            .pull_request
            .as_ref()
            .and_then(|pr| pr.node_id.as_deref())
            .ok_or(Error::NotAPullRequest)?;

        PullRequestRef::new(node_id)
    }

    /// PR number if the payload carried one
    pub fn pull_request_number(&self) -> Option<u64> {
        self.pull_request.as_ref().and_then(|pr| pr.number)
    }
}
