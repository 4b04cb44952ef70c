// Search service.
// Resolves queries through the render cache, falling back to the upstream API on a miss.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::{debug, info};

use crate::cache::{CacheKey, RenderCache};
use crate::config::CacheSettings;
use crate::error::Result;
use crate::github::{GitHubClient, Repository, SearchResult};

use super::query::SearchQuery;

/// Route of the repository detail page; part of the detail cache key.
pub const DETAIL_PATH: &str = "/detail";

/// Upstream source of repository data.
#[async_trait]
pub trait RepoSource: Send + Sync {
    /// Run a search for a full request path (see [`SearchQuery::request_path`]).
    async fn search(&self, path: &str) -> Result<SearchResult>;

    async fn repository(&self, owner: &str, name: &str) -> Result<Repository>;
}

#[async_trait]
impl RepoSource for GitHubClient {
    async fn search(&self, path: &str) -> Result<SearchResult> {
        self.search_repositories(path).await
    }

    async fn repository(&self, owner: &str, name: &str) -> Result<Repository> {
        self.get_repo(owner, name).await
    }
}

/// Cache-fronted access to search listings and repository details.
pub struct SearchService {
    source: Arc<dyn RepoSource>,
    listings: RenderCache<SearchResult>,
    details: RenderCache<Repository>,
    cache_enabled: bool,
}

impl SearchService {
    pub fn new(source: Arc<dyn RepoSource>, settings: &CacheSettings) -> Self {
        Self {
            source,
            listings: RenderCache::with_ttl(settings.ttl),
            details: RenderCache::with_ttl(settings.ttl),
            cache_enabled: settings.enabled,
        }
    }

    /// Result set for a search page.
    ///
    /// A query without a term yields an empty result and never reaches the
    /// upstream API. Upstream failures are returned as errors and leave the
    /// cache untouched.
    pub async fn search(&self, query: &SearchQuery) -> Result<Arc<SearchResult>> {
        let Some(path) = query.request_path() else {
            return Ok(Arc::new(SearchResult::empty()));
        };

        let key = query.cache_key();
        if let Some(hit) = self.lookup(&self.listings, &key) {
            return Ok(hit);
        }

        let result = Arc::new(self.source.search(&path).await?);
        info!(
            path = %path,
            total_count = result.total_count,
            items = result.items.len(),
            "search fetched"
        );

        self.store(&self.listings, key, &result);
        Ok(result)
    }

    /// A single repository, for the detail page.
    pub async fn repository(&self, owner: &str, name: &str) -> Result<Arc<Repository>> {
        let key = CacheKey::detail(DETAIL_PATH, owner, name);
        if let Some(hit) = self.lookup(&self.details, &key) {
            return Ok(hit);
        }

        let repository = Arc::new(self.source.repository(owner, name).await?);
        self.store(&self.details, key, &repository);
        Ok(repository)
    }

    /// Drop every cached listing and detail, returning how many entries were removed.
    pub fn clear_cache(&self) -> usize {
        let cleared = self.listings.clear() + self.details.clear();
        info!(cleared, "render cache cleared");
        cleared
    }

    pub fn cached_entries(&self) -> usize {
        self.listings.len() + self.details.len()
    }

    fn lookup<T>(&self, cache: &RenderCache<T>, key: &CacheKey) -> Option<Arc<T>> {
        if !self.cache_enabled {
            return None;
        }

        let hit = cache.get(key);
        debug!(key = %key, hit = hit.is_some(), "render cache lookup");
        hit
    }

    fn store<T>(&self, cache: &RenderCache<T>, key: CacheKey, value: &Arc<T>) {
        if self.cache_enabled {
            cache.insert(key, Arc::clone(value));
        }
    }
}
