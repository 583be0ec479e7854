//! Identifier types shared by the event reader, the board adapters and the run
//!
//! Node identifiers are opaque strings handed out by the GitHub GraphQL API.
//! They are wrapped in newtypes so a pull request id can never be passed where
//! a project id is expected.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;

use crate::{Error, Result};

/// Node identifier of a pull request
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PullRequestRef(String);

impl PullRequestRef {
    /// Create a pull request reference, rejecting empty identifiers
    pub fn new(node_id: impl Into<String>) -> Result<Self> {
        let node_id = node_id.into();
        if node_id.trim().is_empty() {
            return Err(Error::NotAPullRequest);
        }
        Ok(Self(node_id))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PullRequestRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Node identifier of a project board
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProjectId(String);

impl ProjectId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ProjectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ProjectId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

impl From<String> for ProjectId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

/// Duplicate-free collection of project ids
///
/// Insertion order is kept so the configured target stays first when it is
/// inserted first, but equality compares the members as a set.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(transparent)]
pub struct ProjectIdSet {
    ids: Vec<ProjectId>,
}

impl ProjectIdSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a set that contains only `target`
    pub fn with_target(target: ProjectId) -> Self {
        Self { ids: vec![target] }
    }

    /// Add an id, returning false if it was already present
    pub fn insert(&mut self, id: ProjectId) -> bool {
        if self.ids.contains(&id) {
            return false;
        }
        self.ids.push(id);
        true
    }

    pub fn contains(&self, id: &ProjectId) -> bool {
        self.ids.contains(id)
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, ProjectId> {
        self.ids.iter()
    }

    pub fn as_slice(&self) -> &[ProjectId] {
        &self.ids
    }

    pub fn into_vec(self) -> Vec<ProjectId> {
        self.ids
    }
}

impl PartialEq for ProjectIdSet {
    fn eq(&self, other: &Self) -> bool {
        let lhs: HashSet<&ProjectId> = self.ids.iter().collect();
        let rhs: HashSet<&ProjectId> = other.ids.iter().collect();
        lhs == rhs
    }
}

impl Eq for ProjectIdSet {}

impl Extend<ProjectId> for ProjectIdSet {
    fn extend<I: IntoIterator<Item = ProjectId>>(&mut self, iter: I) {
        for id in iter {
            self.insert(id);
        }
    }
}

impl FromIterator<ProjectId> for ProjectIdSet {
    fn from_iter<I: IntoIterator<Item = ProjectId>>(iter: I) -> Self {
        let mut set = Self::new();
        set.extend(iter);
        set
    }
}

impl IntoIterator for ProjectIdSet {
    type Item = ProjectId;
    type IntoIter = std::vec::IntoIter<ProjectId>;

    fn into_iter(self) -> Self::IntoIter {
        self.ids.into_iter()
    }
}

impl<'a> IntoIterator for &'a ProjectIdSet {
    type Item = &'a ProjectId;
    type IntoIter = std::slice::Iter<'a, ProjectId>;

    fn into_iter(self) -> Self::IntoIter {
        self.ids.iter()
    }
}
