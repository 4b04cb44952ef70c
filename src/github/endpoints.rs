// GitHub API endpoint functions.
// Provides typed methods for the search and repository endpoints.

use crate::error::Result;

use super::client::GitHubClient;
use super::types::{Repository, SearchResult};

impl GitHubClient {
    /// Run a repository search.
    ///
    /// `path` is the full request path including its query string, as built by
    /// [`crate::search::SearchQuery::request_path`].
    pub async fn search_repositories(&self, path: &str) -> Result<SearchResult> {
        let response = self.get(path).await?;
        let result: SearchResult = response.json().await?;
        Ok(result)
    }

    /// Get a specific repository.
    pub async fn get_repo(&self, owner: &str, repo: &str) -> Result<Repository> {
        let response = self.get(&format!("/repos/{}/{}", owner, repo)).await?;
        let repository: Repository = response.json().await?;
        Ok(repository)
    }
}
