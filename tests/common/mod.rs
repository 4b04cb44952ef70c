// Shared fixtures for integration tests.
// A scripted repository source that records every upstream call.

#![allow(dead_code)]

use std::sync::Mutex;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

use async_trait::async_trait;
use serde_json::json;

use hubsearch::error::{HubsearchError, Result};
use hubsearch::github::{Repository, SearchResult};
use hubsearch::search::RepoSource;

pub fn repository(owner: &str, name: &str) -> Repository {
    serde_json::from_value(json!({
        "id": 1,
        "name": name,
        "full_name": format!("{}/{}", owner, name),
        "owner": {"id": 2, "login": owner, "type": "Organization"},
        "html_url": format!("https://github.com/{}/{}", owner, name),
        "description": "A repository used in tests",
        "language": "Rust",
        "stargazers_count": 1234,
        "forks_count": 56,
        "topics": ["testing"],
        "updated_at": "2024-05-01T12:00:00Z"
    }))
    .expect("fixture repository deserializes")
}

fn requested_page(path: &str) -> Option<u64> {
    path.split(['?', '&'])
        .find_map(|part| part.strip_prefix("page="))
        .and_then(|page| page.parse().ok())
}

/// Repository source that counts calls and can be told to fail.
pub struct FakeSource {
    total_count: u64,
    failing: AtomicBool,
    search_calls: AtomicUsize,
    detail_calls: AtomicUsize,
    paths: Mutex<Vec<String>>,
}

impl FakeSource {
    pub fn new(total_count: u64) -> Self {
        Self {
            total_count,
            failing: AtomicBool::new(false),
            search_calls: AtomicUsize::new(0),
            detail_calls: AtomicUsize::new(0),
            paths: Mutex::new(Vec::new()),
        }
    }

    pub fn set_failing(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }

    pub fn search_calls(&self) -> usize {
        self.search_calls.load(Ordering::SeqCst)
    }

    pub fn detail_calls(&self) -> usize {
        self.detail_calls.load(Ordering::SeqCst)
    }

    pub fn paths(&self) -> Vec<String> {
        self.paths.lock().unwrap().clone()
    }

    fn upstream_error() -> HubsearchError {
        HubsearchError::Upstream {
            status: reqwest::StatusCode::SERVICE_UNAVAILABLE,
            body: "unavailable".to_string(),
        }
    }
}

#[async_trait]
impl RepoSource for FakeSource {
    async fn search(&self, path: &str) -> Result<SearchResult> {
        self.search_calls.fetch_add(1, Ordering::SeqCst);
        self.paths.lock().unwrap().push(path.to_string());
        if self.failing.load(Ordering::SeqCst) {
            return Err(Self::upstream_error());
        }
        if requested_page(path).is_some_and(|page| page * 20 > 1000) {
            return Err(HubsearchError::InvalidQuery {
                message: "Only the first 1000 search results are available".to_string(),
            });
        }

        Ok(SearchResult {
            total_count: self.total_count,
            incomplete_results: false,
            items: vec![repository("tanstack", "react-query")],
        })
    }

    async fn repository(&self, owner: &str, name: &str) -> Result<Repository> {
        self.detail_calls.fetch_add(1, Ordering::SeqCst);
        if self.failing.load(Ordering::SeqCst) {
            return Err(Self::upstream_error());
        }
        if name == "missing" {
            return Err(HubsearchError::NotFound(format!("/repos/{}/{}", owner, name)));
        }

        Ok(repository(owner, name))
    }
}
