// GitHub API module.
// Provides the client and types for the GitHub REST search API.

pub mod client;
pub mod endpoints;
pub mod types;

pub use client::{GITHUB_API_BASE, GitHubClient};
pub use types::*;
