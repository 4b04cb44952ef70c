// Cache module for render payloads.
// Derives cache keys from request context and stores fetched results in memory.

pub mod keys;
pub mod store;

pub use keys::{CacheKey, derive_detail_key, derive_list_key};
pub use store::{CachedData, RenderCache};
