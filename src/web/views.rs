// Page templates and view models.
// Flattens search results and repositories into plain strings for the askama templates.

use askama::Template;
use axum::{
    http::StatusCode,
    response::{Html, IntoResponse, Response},
};
use chrono::{DateTime, Utc};

use crate::github::{Repository, SearchResult};
use crate::search::{FilterLink, PER_PAGE, Pagination, SearchQuery, links};

use super::middleware::ErrorReport;

pub fn render_template<T: Template>(template: T) -> Result<Html<String>, askama::Error> {
    template.render().map(Html)
}

pub fn render_template_response<T: Template>(template: T, status: StatusCode) -> Response {
    match render_template(template) {
        Ok(html) => (status, html).into_response(),
        Err(err) => {
            let mut response = (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Template rendering failed",
            )
                .into_response();
            ErrorReport::new("web::views::render_template_response", err.to_string())
                .attach(&mut response);
            response
        }
    }
}

/// One repository in a result list.
#[derive(Debug, Clone)]
pub struct RepoCardView {
    pub full_name: String,
    pub html_url: String,
    pub detail_href: String,
    pub description: String,
    pub language: String,
    pub license: String,
    pub stars: String,
    pub forks: String,
    pub updated: String,
}

impl RepoCardView {
    pub fn new(repo: &Repository, now: DateTime<Utc>) -> Self {
        Self {
            full_name: repo.full_name.clone(),
            html_url: repo.html_url.clone(),
            detail_href: detail_href(&repo.owner.login, &repo.name),
            description: repo.description.clone().unwrap_or_default(),
            language: repo.language.clone().unwrap_or_default(),
            license: repo
                .license
                .as_ref()
                .map(|license| license.name.clone())
                .unwrap_or_default(),
            stars: compact_count(repo.stargazers_count),
            forks: compact_count(repo.forks_count),
            updated: time_from_now(repo.updated_at, now),
        }
    }
}

#[derive(Template)]
#[template(path = "search.html")]
pub struct SearchTemplate {
    pub title: String,
    pub term: String,
    pub total_count: u64,
    pub repos: Vec<RepoCardView>,
    pub languages: Vec<FilterLink>,
    pub sorts: Vec<FilterLink>,
    pub pages: Vec<FilterLink>,
    pub prev: FilterLink,
    pub next: FilterLink,
    pub show_pagination: bool,
    pub out_of_range: bool,
    /// More matches exist than GitHub lets anyone page through.
    pub capped: bool,
    pub navigable_total: u64,
}

impl SearchTemplate {
    pub fn new(query: &SearchQuery, result: &SearchResult, now: DateTime<Utc>) -> Self {
        let pagination = Pagination::new(result.total_count, query.current_page(), PER_PAGE);
        let term = query.term().unwrap_or_default().to_string();

        let pages = links::page_links(query, &pagination)
            .into_iter()
            .map(|link| link.unwrap_or_else(gap_link))
            .collect();

        Self {
            title: if term.is_empty() {
                "Search".to_string()
            } else {
                format!("{} · Search", term)
            },
            total_count: result.total_count,
            repos: result
                .items
                .iter()
                .map(|repo| RepoCardView::new(repo, now))
                .collect(),
            languages: links::language_links(query),
            sorts: links::sort_links(query),
            pages,
            prev: links::prev_link(query, &pagination),
            next: links::next_link(query, &pagination),
            show_pagination: pagination.page_count() > 1,
            out_of_range: !term.is_empty()
                && result.total_count > 0
                && pagination.is_out_of_range(),
            capped: result.total_count > pagination.navigable_total(),
            navigable_total: pagination.navigable_total(),
            term,
        }
    }
}

#[derive(Template)]
#[template(path = "detail.html")]
pub struct DetailTemplate {
    pub title: String,
    pub card: RepoCardView,
    pub owner_login: String,
    pub owner_kind: &'static str,
    pub owner_url: String,
    pub homepage: String,
    pub topics: Vec<String>,
    pub open_issues: u64,
    pub watchers: u64,
    pub default_branch: String,
    pub search_href: String,
}

impl DetailTemplate {
    pub fn new(repo: &Repository, now: DateTime<Utc>) -> Self {
        let card = RepoCardView::new(repo, now);
        let language = repo.language.as_deref();

        Self {
            title: repo.full_name.clone(),
            owner_login: repo.owner.login.clone(),
            owner_kind: repo.owner.owner_type.label(),
            owner_url: repo
                .owner
                .html_url
                .clone()
                .unwrap_or_else(|| format!("https://github.com/{}", repo.owner.login)),
            homepage: repo.homepage.clone().unwrap_or_default(),
            topics: repo.topics.clone(),
            open_issues: repo.open_issues_count,
            watchers: repo.watchers_count,
            default_branch: repo.default_branch.clone().unwrap_or_default(),
            search_href: SearchQuery::new(repo.name.as_str())
                .with_lang(language)
                .href(),
            card,
        }
    }
}

#[derive(Template)]
#[template(path = "error.html")]
pub struct ErrorTemplate {
    pub title: String,
    pub status: u16,
    pub message: String,
}

impl ErrorTemplate {
    pub fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            title: status.canonical_reason().unwrap_or("Error").to_string(),
            status: status.as_u16(),
            message: message.into(),
        }
    }
}

pub fn detail_href(owner: &str, name: &str) -> String {
    let query = url::form_urlencoded::Serializer::new(String::new())
        .append_pair("owner", owner)
        .append_pair("name", name)
        .finish();
    format!("/detail?{}", query)
}

fn gap_link() -> FilterLink {
    FilterLink {
        label: "…".to_string(),
        href: String::new(),
        selected: false,
        disabled: true,
    }
}

/// Star and fork counts: `950`, `1.2k`, `230k`.
pub fn compact_count(count: u64) -> String {
    match count {
        0..=999 => count.to_string(),
        1_000..=9_999 => {
            let tenths = count / 100;
            if tenths % 10 == 0 {
                format!("{}k", tenths / 10)
            } else {
                format!("{}.{}k", tenths / 10, tenths % 10)
            }
        }
        _ => format!("{}k", count / 1_000),
    }
}

/// Relative age such as "3 days ago", bucketed the way people say it.
pub fn time_from_now(then: DateTime<Utc>, now: DateTime<Utc>) -> String {
    let seconds = now.signed_duration_since(then).num_seconds();
    if seconds < 0 {
        return "in the future".to_string();
    }

    let minutes = (seconds as f64 / 60.0).round() as i64;
    let hours = (seconds as f64 / 3_600.0).round() as i64;
    let days = (seconds as f64 / 86_400.0).round() as i64;

    match seconds {
        0..45 => "a few seconds ago".to_string(),
        45..90 => "a minute ago".to_string(),
        90..2_700 => format!("{} minutes ago", minutes),
        2_700..5_400 => "an hour ago".to_string(),
        5_400..79_200 => format!("{} hours ago", hours),
        79_200..129_600 => "a day ago".to_string(),
        _ if days < 26 => format!("{} days ago", days),
        _ if days < 46 => "a month ago".to_string(),
        _ if days < 320 => format!("{} months ago", ((days as f64) / 30.4).round() as i64),
        _ if days < 548 => "a year ago".to_string(),
        _ => format!("{} years ago", ((days as f64) / 365.0).round() as i64),
    }
}
