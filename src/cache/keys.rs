// Cache key derivation.
// Builds render-cache keys from a page's path and query parameters.

use std::fmt;

use url::form_urlencoded;

/// Concatenate every query value in iteration order.
///
/// This is the legacy list-key format: no separators and no parameter names,
/// so `[("a", "bc")]` and `[("a", "b"), ("c", "c")]`-style inputs can collide
/// and reordering the same parameters yields a different key. It is kept for
/// callers that need to match keys produced by that format. The render path
/// uses [`CacheKey::list`] instead.
pub fn derive_list_key<K, V>(query: &[(K, V)]) -> String
where
    K: AsRef<str>,
    V: AsRef<str>,
{
    query.iter().fold(String::new(), |mut key, (_, value)| {
        key.push_str(value.as_ref());
        key
    })
}

/// Key for a single-repository detail page: `pathname-owner-name`.
pub fn derive_detail_key(pathname: &str, owner: &str, name: &str) -> String {
    format!("{}-{}-{}", pathname, owner, name)
}

/// Render-cache key.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum CacheKey {
    /// A search listing, canonically encoded from its query pairs.
    List(String),
    /// A repository detail page.
    Detail(String),
}

impl CacheKey {
    /// Canonical, order-independent key for a search listing.
    ///
    /// Pairs with empty values are dropped, the rest are sorted by name and
    /// then value and form-encoded as `name=value` joined by `&`. Encoding
    /// keeps the separators out of names and values, so distinct parameter
    /// sets never share a key.
    pub fn list<K, V>(query: &[(K, V)]) -> Self
    where
        K: AsRef<str>,
        V: AsRef<str>,
    {
        let mut pairs: Vec<(&str, &str)> = query
            .iter()
            .map(|(k, v)| (k.as_ref(), v.as_ref()))
            .filter(|(_, v)| !v.is_empty())
            .collect();
        pairs.sort_unstable();

        let encoded = form_urlencoded::Serializer::new(String::new())
            .extend_pairs(pairs)
            .finish();
        CacheKey::List(encoded)
    }

    pub fn detail(pathname: &str, owner: &str, name: &str) -> Self {
        CacheKey::Detail(derive_detail_key(pathname, owner, name))
    }
}

impl fmt::Display for CacheKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CacheKey::List(key) => write!(f, "list:{}", key),
            CacheKey::Detail(key) => write!(f, "detail:{}", key),
        }
    }
}
