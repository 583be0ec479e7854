//! Project board abstraction and the attach run
//!
//! A run reads the pull request out of the triggering event, asks the board
//! which projects the pull request already belongs to, merges the target
//! project in, and writes the full list back. Each step completes before the
//! next one starts and nothing is retried.

use async_trait::async_trait;
use tracing::{debug, info};

use crate::{merge_project_ids, EventPayload, ProjectId, ProjectIdSet, PullRequestRef, Result};

/// Remote system holding pull request to project associations
#[async_trait]
pub trait ProjectBoard: Send + Sync {
    /// Project ids already associated with the pull request
    ///
    /// An unknown node or a node without project cards yields an empty list.
    async fn existing_project_ids(&self, pull_request: &PullRequestRef)
        -> Result<Vec<ProjectId>>;

    /// Replace the pull request's project list with exactly `project_ids`
    async fn set_project_ids(
        &self,
        pull_request: &PullRequestRef,
        project_ids: &ProjectIdSet,
    ) -> Result<()>;
}

/// What a successful run did
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyncReport {
    /// The pull request that was updated
    pub pull_request: PullRequestRef,
    /// The full project list that was written
    pub project_ids: ProjectIdSet,
    /// Whether the target project was already attached before the run
    pub previously_attached: bool,
}

impl SyncReport {
    /// True when the run attached the target for the first time
    pub fn newly_attached(&self) -> bool {
        !self.previously_attached
    }
}

/// Ensure the event's pull request is attached to `target`
///
/// Fails before touching the board if the event is not a pull request event.
/// Lookup and mutation errors are returned unchanged.
pub async fn sync_pull_request<B>(
    board: &B,
    event: &EventPayload,
    target: &ProjectId,
) -> Result<SyncReport>
where
    B: ProjectBoard + ?Sized,
{
    let pull_request = event.pull_request_ref()?;

    debug!(
        pull_request = %pull_request,
        number = ?event.pull_request_number(),
        "Looking up existing projects"
    );
    let existing = board.existing_project_ids(&pull_request).await?;
    let previously_attached = existing.contains(target);

    let project_ids = merge_project_ids(target.clone(), existing);

    debug!(
        pull_request = %pull_request,
        count = project_ids.len(),
        "Updating pull request projects"
    );
    board.set_project_ids(&pull_request, &project_ids).await?;

    info!(
        pull_request = %pull_request,
        project = %target,
        total = project_ids.len(),
        previously_attached,
        "Pull request attached to project"
    );

    Ok(SyncReport {
        pull_request,
        project_ids,
        previously_attached,
    })
}
