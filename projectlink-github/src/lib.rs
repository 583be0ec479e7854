//! Projectlink GitHub - GraphQL adapter for project boards
//!
//! This crate talks to the GitHub GraphQL API to read a pull request's project
//! cards and to replace its project list.

mod client;
mod error;
mod graphql;
mod projects;

pub use client::GitHubClient;
pub use error::{Error, Result};
pub use projects::CARDS_PAGE_SIZE;
