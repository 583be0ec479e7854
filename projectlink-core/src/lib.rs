//! Projectlink Core - attach pull requests to project boards
//!
//! This crate holds the domain types, the event reader, configuration and the
//! sequential lookup/merge/mutate run that keeps a pull request attached to a
//! configured project without dropping the projects it already belongs to.

pub mod board;
pub mod config;
pub mod error;
pub mod event;
pub mod merge;
pub mod secrets;
pub mod types;

pub use board::{sync_pull_request, ProjectBoard, SyncReport};
pub use config::{Config, GitHubConfig, ProjectConfig};
pub use error::{Error, Result};
pub use event::{EventPayload, PullRequestPayload};
pub use merge::merge_project_ids;
pub use secrets::Secrets;
pub use types::{ProjectId, ProjectIdSet, PullRequestRef};
