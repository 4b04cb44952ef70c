// GitHub API response types.
// Defines structs for deserializing search and repository responses.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Owner type discriminator (user or organization).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum OwnerType {
    #[default]
    User,
    Organization,
    Bot,
    #[serde(other)]
    Unknown,
}

impl OwnerType {
    pub fn label(self) -> &'static str {
        match self {
            OwnerType::User => "User",
            OwnerType::Organization => "Organization",
            OwnerType::Bot => "Bot",
            OwnerType::Unknown => "Account",
        }
    }
}

/// GitHub user or organization.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Owner {
    pub id: u64,
    pub login: String,
    #[serde(rename = "type", default)]
    pub owner_type: OwnerType,
    pub avatar_url: Option<String>,
    pub html_url: Option<String>,
}

/// License summary attached to a repository.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct License {
    pub key: String,
    pub name: String,
    pub spdx_id: Option<String>,
}

/// Repository summary as returned by search and repository endpoints.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Repository {
    pub id: u64,
    pub name: String,
    pub full_name: String,
    pub owner: Owner,
    #[serde(default)]
    pub private: bool,
    pub html_url: String,
    pub description: Option<String>,
    #[serde(default)]
    pub fork: bool,
    pub homepage: Option<String>,
    pub language: Option<String>,
    #[serde(default)]
    pub stargazers_count: u64,
    #[serde(default)]
    pub forks_count: u64,
    #[serde(default)]
    pub open_issues_count: u64,
    #[serde(default)]
    pub watchers_count: u64,
    pub license: Option<License>,
    #[serde(default)]
    pub topics: Vec<String>,
    pub default_branch: Option<String>,
    pub updated_at: DateTime<Utc>,
    pub pushed_at: Option<DateTime<Utc>>,
    /// Present on search results only.
    pub score: Option<f64>,
}

/// Body of `GET /search/repositories`.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct SearchResult {
    pub total_count: u64,
    #[serde(default)]
    pub incomplete_results: bool,
    #[serde(default)]
    pub items: Vec<Repository>,
}

impl SearchResult {
    /// The payload rendered when no search term was given.
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

/// Error payload GitHub sends with 4xx responses.
#[derive(Debug, Clone, Deserialize)]
pub struct ApiErrorBody {
    pub message: String,
}

/// Rate limit information from response headers.
#[derive(Debug, Clone, Default)]
pub struct RateLimit {
    pub limit: u64,
    pub remaining: u64,
    pub reset: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    const SEARCH_BODY: &str = r#"{
        "total_count": 5000,
        "incomplete_results": false,
        "items": [
            {
                "id": 10270250,
                "name": "react",
                "full_name": "facebook/react",
                "owner": {"id": 69631, "login": "facebook", "type": "Organization"},
                "private": false,
                "html_url": "https://github.com/facebook/react",
                "description": "The library for web and native user interfaces.",
                "fork": false,
                "language": "JavaScript",
                "stargazers_count": 230000,
                "forks_count": 47000,
                "open_issues_count": 900,
                "license": {"key": "mit", "name": "MIT License", "spdx_id": "MIT"},
                "topics": ["react", "ui"],
                "updated_at": "2024-05-01T12:00:00Z",
                "pushed_at": "2024-05-01T11:00:00Z",
                "score": 1.0
            }
        ]
    }"#;

    #[test]
    fn test_deserialize_search_result() {
        let result: SearchResult = serde_json::from_str(SEARCH_BODY).unwrap();
        assert_eq!(result.total_count, 5000);
        assert_eq!(result.items.len(), 1);

        let repo = &result.items[0];
        assert_eq!(repo.full_name, "facebook/react");
        assert_eq!(repo.owner.owner_type, OwnerType::Organization);
        assert_eq!(repo.language.as_deref(), Some("JavaScript"));
        assert_eq!(repo.license.as_ref().map(|l| l.key.as_str()), Some("mit"));
    }

    #[test]
    fn test_empty_result_has_zero_count() {
        let result = SearchResult::empty();
        assert_eq!(result.total_count, 0);
        assert!(result.is_empty());
    }

    #[test]
    fn test_unknown_owner_type() {
        let owner: Owner =
            serde_json::from_str(r#"{"id": 1, "login": "x", "type": "Enterprise"}"#).unwrap();
        assert_eq!(owner.owner_type, OwnerType::Unknown);
    }
}
