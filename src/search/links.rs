// Filter, sort, and page links for the search page.
// Each link overrides one filter dimension and carries the rest of the current state.

use super::pagination::{PageItem, Pagination};
use super::query::SearchQuery;

/// Languages offered in the language filter list.
pub const LANGUAGES: &[&str] = &[
    "JavaScript",
    "HTML",
    "CSS",
    "TypeScript",
    "Java",
    "Vue",
    "React",
];

/// One entry of the sort list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SortOption {
    pub name: &'static str,
    pub sort: Option<&'static str>,
    pub order: Option<&'static str>,
}

pub const SORT_OPTIONS: &[SortOption] = &[
    SortOption {
        name: "Best Match",
        sort: None,
        order: None,
    },
    SortOption {
        name: "Most Stars",
        sort: Some("stars"),
        order: Some("desc"),
    },
    SortOption {
        name: "Fewest Stars",
        sort: Some("stars"),
        order: Some("asc"),
    },
    SortOption {
        name: "Most Forks",
        sort: Some("forks"),
        order: Some("desc"),
    },
    SortOption {
        name: "Fewest Forks",
        sort: Some("forks"),
        order: Some("asc"),
    },
];

impl SortOption {
    /// Best Match is active when no sort is set; the others when both
    /// field and direction match.
    pub fn is_selected(&self, query: &SearchQuery) -> bool {
        match self.sort {
            None => query.sort.is_none(),
            Some(sort) => {
                query.sort.as_deref() == Some(sort) && query.effective_order() == self.order
            }
        }
    }
}

/// A navigation link. Selected and disabled links render as plain text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterLink {
    pub label: String,
    pub href: String,
    pub selected: bool,
    pub disabled: bool,
}

impl FilterLink {
    fn new(label: impl Into<String>, target: &SearchQuery, selected: bool) -> Self {
        Self {
            label: label.into(),
            href: target.href(),
            selected,
            disabled: false,
        }
    }

    fn disabled_if(mut self, disabled: bool) -> Self {
        self.disabled = disabled;
        self
    }

    /// Whether this renders as a navigable anchor.
    pub fn is_link(&self) -> bool {
        !self.selected && !self.disabled
    }
}

/// Language filter list.
pub fn language_links(query: &SearchQuery) -> Vec<FilterLink> {
    LANGUAGES
        .iter()
        .map(|&language| {
            let selected = query.lang.as_deref() == Some(language);
            let target = query.clone().with_lang(Some(language));
            FilterLink::new(language, &target, selected)
        })
        .collect()
}

/// Sort list.
pub fn sort_links(query: &SearchQuery) -> Vec<FilterLink> {
    SORT_OPTIONS
        .iter()
        .map(|option| {
            let target = query.clone().with_sort(option.sort, option.order);
            FilterLink::new(option.name, &target, option.is_selected(query))
        })
        .collect()
}

/// Page control strip. Gaps are represented by `None`.
pub fn page_links(query: &SearchQuery, pagination: &Pagination) -> Vec<Option<FilterLink>> {
    pagination
        .items()
        .into_iter()
        .map(|item| match item {
            PageItem::Page { number, current } => {
                let target = query.clone().with_page(Some(number));
                Some(FilterLink::new(number.to_string(), &target, current))
            }
            PageItem::Gap => None,
        })
        .collect()
}

/// "Previous" control; rendered as plain text when its target is outside the page range.
pub fn prev_link(query: &SearchQuery, pagination: &Pagination) -> FilterLink {
    let target = query.clone().with_page(Some(pagination.prev_page()));
    FilterLink::new("Previous", &target, false).disabled_if(!pagination.has_prev())
}

/// "Next" control; rendered as plain text when its target is outside the page range.
pub fn next_link(query: &SearchQuery, pagination: &Pagination) -> FilterLink {
    let target = query.clone().with_page(Some(pagination.next_page()));
    FilterLink::new("Next", &target, false).disabled_if(!pagination.has_next())
}
