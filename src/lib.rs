//! # hubsearch
//!
//! A server-rendered front-end for the GitHub repository search API.
//!
//! A search page request flows through:
//!
//! ```text
//! query pairs ─▶ SearchQuery ─▶ CacheKey ─▶ RenderCache ─┬─▶ hit: stored SearchResult
//!                                                        └─▶ miss: request_path ─▶ GitHub ─▶ store
//! ```
//!
//! ## Module Overview
//!
//! - [`cache`] - Cache-key derivation and the in-memory render cache
//! - [`search`] - Query translation, pagination, filter links, and the search service
//! - [`github`] - GitHub REST client and response types
//! - [`web`] - Axum router, handlers, and askama views
//! - [`config`] - Layered settings (file, environment, CLI)
//! - [`telemetry`] - Tracing subscriber installation
//! - [`error`] - Error type shared by the core

pub mod cache;
pub mod config;
pub mod error;
pub mod github;
pub mod search;
pub mod telemetry;
pub mod web;
