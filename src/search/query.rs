// Search query parsing and upstream request translation.
// Maps the user-facing filter state onto a GitHub search request path.

use tracing::warn;
use url::form_urlencoded;

use crate::cache::CacheKey;

/// Fixed upstream page size.
pub const PER_PAGE: u32 = 20;

/// Sort direction used when a sort field is given without one.
pub const DEFAULT_ORDER: &str = "desc";

const SEARCH_ENDPOINT: &str = "/search/repositories";

/// Filter state of a search page.
///
/// Built from the `query`, `lang`, `sort`, `order`, `page` and `per_page`
/// parameters. Blank values count as absent.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchQuery {
    pub term: Option<String>,
    pub lang: Option<String>,
    pub sort: Option<String>,
    pub order: Option<String>,
    pub page: Option<u32>,
    /// Requested page size. Recorded but never forwarded; upstream always gets [`PER_PAGE`].
    pub per_page: Option<u32>,
}

impl SearchQuery {
    /// Parse from raw query pairs. Later duplicates override earlier ones and
    /// unrecognized parameters are ignored.
    pub fn from_pairs<K, V>(pairs: &[(K, V)]) -> Self
    where
        K: AsRef<str>,
        V: AsRef<str>,
    {
        let mut query = SearchQuery::default();

        for (name, value) in pairs {
            let value = value.as_ref().trim();
            let text = (!value.is_empty()).then(|| value.to_string());

            match name.as_ref() {
                "query" => query.term = text,
                "lang" => query.lang = text,
                "sort" => query.sort = text,
                "order" => query.order = text,
                "page" => query.page = parse_page("page", text.as_deref()),
                "per_page" => query.per_page = parse_page("per_page", text.as_deref()),
                _ => {}
            }
        }

        query
    }

    pub fn new(term: impl Into<String>) -> Self {
        SearchQuery {
            term: Some(term.into()),
            ..Default::default()
        }
    }

    pub fn with_lang(mut self, lang: Option<&str>) -> Self {
        self.lang = lang.map(str::to_string);
        self
    }

    pub fn with_sort(mut self, sort: Option<&str>, order: Option<&str>) -> Self {
        self.sort = sort.map(str::to_string);
        self.order = order.map(str::to_string);
        self
    }

    pub fn with_page(mut self, page: Option<u32>) -> Self {
        self.page = page;
        self
    }

    /// The search term, if any non-blank term was given.
    pub fn term(&self) -> Option<&str> {
        self.term.as_deref().filter(|t| !t.is_empty())
    }

    /// Sort direction paired with the active sort field, defaulting to `desc`.
    pub fn effective_order(&self) -> Option<&str> {
        self.sort
            .as_ref()
            .map(|_| self.order.as_deref().unwrap_or(DEFAULT_ORDER))
    }

    /// Page being displayed; page 1 when none was requested.
    pub fn current_page(&self) -> u32 {
        self.page.unwrap_or(1)
    }

    /// Build the upstream request path, or `None` when there is no term.
    ///
    /// The language rides inside `q` as `+language:<lang>`. `sort` and
    /// `order` are only ever emitted together, and `page` only when one was
    /// requested explicitly.
    pub fn request_path(&self) -> Option<String> {
        let term = self.term()?;

        let mut path = format!("{}?q={}", SEARCH_ENDPOINT, encode(term));

        if let Some(lang) = &self.lang {
            path.push_str("+language:");
            path.push_str(&encode(lang));
        }

        if let (Some(sort), Some(order)) = (&self.sort, self.effective_order()) {
            path.push_str(&format!("&sort={}&order={}", encode(sort), encode(order)));
        }

        if let Some(page) = self.page {
            path.push_str(&format!("&page={}", page));
        }

        path.push_str(&format!("&per_page={}", PER_PAGE));
        Some(path)
    }

    /// Recognized dimensions as normalized `(name, value)` pairs.
    ///
    /// `order` is filled in with its default when a sort is active and left
    /// out otherwise, so equivalent queries produce identical pairs.
    pub fn pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = Vec::with_capacity(5);
        if let Some(term) = self.term() {
            pairs.push(("query", term.to_string()));
        }
        if let Some(lang) = &self.lang {
            pairs.push(("lang", lang.clone()));
        }
        if let (Some(sort), Some(order)) = (&self.sort, self.effective_order()) {
            pairs.push(("sort", sort.clone()));
            pairs.push(("order", order.to_string()));
        }
        if let Some(page) = self.page {
            pairs.push(("page", page.to_string()));
        }
        pairs
    }

    /// Render-cache key for this query.
    pub fn cache_key(&self) -> CacheKey {
        CacheKey::list(&self.pairs())
    }

    /// Href of the search page showing this filter state.
    pub fn href(&self) -> String {
        let mut href = format!("/search?query={}", encode(self.term().unwrap_or_default()));

        if let Some(lang) = &self.lang {
            href.push_str(&format!("&lang={}", encode(lang)));
        }

        if let (Some(sort), Some(order)) = (&self.sort, self.effective_order()) {
            href.push_str(&format!("&sort={}&order={}", encode(sort), encode(order)));
        }

        if let Some(page) = self.page {
            href.push_str(&format!("&page={}", page));
        }

        href.push_str(&format!("&per_page={}", PER_PAGE));
        href
    }
}

fn parse_page(name: &str, value: Option<&str>) -> Option<u32> {
    let value = value?;
    match value.parse::<u32>() {
        Ok(page) if page > 0 => Some(page),
        _ => {
            warn!(parameter = name, value, "ignoring invalid page parameter");
            None
        }
    }
}

fn encode(value: &str) -> String {
    form_urlencoded::byte_serialize(value.as_bytes()).collect()
}
