//! Pull request project cards: lookup and replacement

use async_trait::async_trait;
use projectlink_core::{ProjectBoard, ProjectId, ProjectIdSet, PullRequestRef};
use serde::de::IgnoredAny;
use serde::Deserialize;
use serde_json::json;
use tracing::{debug, warn};

use crate::GitHubClient;

/// Number of project cards requested; later pages are never fetched
pub const CARDS_PAGE_SIZE: u32 = 100;

const PROJECTS_QUERY: &str = r#"
    query GetProjects($prId: ID!, $first: Int!) {
        nodes(ids: [$prId]) {
            ... on PullRequest {
                id
                projectCards(first: $first) {
                    pageInfo {
                        hasNextPage
                    }
                    nodes {
                        project {
                            id
                        }
                    }
                }
            }
        }
    }
"#;

const UPDATE_PROJECTS_MUTATION: &str = r#"
    mutation AddProject($prId: ID!, $projectIds: [ID!]!) {
        updatePullRequest(input: {pullRequestId: $prId, projectIds: $projectIds}) {
            clientMutationId
        }
    }
"#;

#[derive(Debug, Deserialize)]
struct NodesData {
    #[serde(default)]
    nodes: Option<Vec<Option<PullRequestNode>>>,
}

/// A node matched by `... on PullRequest`; other node types come back as `{}`
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PullRequestNode {
    #[serde(default)]
    project_cards: Option<ProjectCardConnection>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ProjectCardConnection {
    #[serde(default)]
    page_info: Option<PageInfo>,
    #[serde(default)]
    nodes: Option<Vec<Option<ProjectCardNode>>>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PageInfo {
    #[serde(default)]
    has_next_page: bool,
}

#[derive(Debug, Deserialize)]
struct ProjectCardNode {
    #[serde(default)]
    project: Option<ProjectNode>,
}

#[derive(Debug, Deserialize)]
struct ProjectNode {
    #[serde(default)]
    id: Option<String>,
}

impl NodesData {
    /// Whether any card connection reported more pages than were read
    fn truncated(&self) -> bool {
        self.nodes
            .iter()
            .flatten()
            .flatten()
            .filter_map(|node| node.project_cards.as_ref())
            .filter_map(|cards| cards.page_info.as_ref())
            .any(|page| page.has_next_page)
    }

    /// Distinct project ids referenced by the cards, skipping every null level
    fn project_ids(self) -> Vec<ProjectId> {
        let ids: ProjectIdSet = self
            .nodes
            .into_iter()
            .flatten()
            .flatten()
            .filter_map(|node| node.project_cards)
            .filter_map(|cards| cards.nodes)
            .flatten()
            .flatten()
            .filter_map(|card| card.project)
            .filter_map(|project| project.id)
            .filter(|id| !id.is_empty())
            .map(ProjectId::from)
            .collect();

        ids.into_vec()
    }
}

/// Variables for [`PROJECTS_QUERY`]
fn lookup_variables(pull_request: &PullRequestRef) -> serde_json::Value {
    json!({
        "prId": pull_request.as_str(),
        "first": CARDS_PAGE_SIZE,
    })
}

/// Variables for [`UPDATE_PROJECTS_MUTATION`]
fn mutation_variables(
    pull_request: &PullRequestRef,
    project_ids: &ProjectIdSet,
) -> serde_json::Value {
    json!({
        "prId": pull_request.as_str(),
        "projectIds": project_ids,
    })
}

#[async_trait]
impl ProjectBoard for GitHubClient {
    async fn existing_project_ids(
        &self,
        pull_request: &PullRequestRef,
    ) -> projectlink_core::Result<Vec<ProjectId>> {
        debug!(pull_request = %pull_request, "Fetching project cards via GraphQL");

        let variables = lookup_variables(pull_request);
        let data: NodesData = self.graphql_query(PROJECTS_QUERY, &variables).await?;

        if data.truncated() {
            warn!(
                pull_request = %pull_request,
                page_size = CARDS_PAGE_SIZE,
                "Pull request has more project cards than one page; later pages are not read"
            );
        }

        let ids = data.project_ids();
        debug!(pull_request = %pull_request, count = ids.len(), "Found existing projects");

        Ok(ids)
    }

    async fn set_project_ids(
        &self,
        pull_request: &PullRequestRef,
        project_ids: &ProjectIdSet,
    ) -> projectlink_core::Result<()> {
        debug!(
            pull_request = %pull_request,
            project_ids = ?project_ids.as_slice(),
            "Replacing pull request projects"
        );

        // Only success matters; the payload is discarded
        let variables = mutation_variables(pull_request, project_ids);
        let _: IgnoredAny = self
            .graphql_query(UPDATE_PROJECTS_MUTATION, &variables)
            .await?;

        Ok(())
    }
}
