// Search module.
// Query translation, pagination, filter links, and the cache-fronted search service.

pub mod links;
pub mod pagination;
pub mod query;
pub mod service;

pub use links::{FilterLink, LANGUAGES, SORT_OPTIONS, SortOption};
pub use pagination::{MAX_SEARCH_RESULTS, PageItem, Pagination};
pub use query::{DEFAULT_ORDER, PER_PAGE, SearchQuery};
pub use service::{DETAIL_PATH, RepoSource, SearchService};
