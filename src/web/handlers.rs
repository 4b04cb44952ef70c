// Page handlers.
// Parse request context, resolve it through the search service, and render a template.

use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::{Redirect, Response},
};
use chrono::Utc;
use serde::Deserialize;
use tracing::warn;

use crate::error::HubsearchError;
use crate::search::{MAX_SEARCH_RESULTS, PER_PAGE, Pagination, SearchQuery};

use super::AppState;
use super::middleware::ErrorReport;
use super::views::{DetailTemplate, ErrorTemplate, SearchTemplate, render_template_response};

pub async fn index() -> Redirect {
    Redirect::to("/search")
}

/// `GET /search?query=&lang=&sort=&order=&page=&per_page=`
pub async fn search_page(
    State(state): State<AppState>,
    Query(pairs): Query<Vec<(String, String)>>,
) -> Response {
    let query = SearchQuery::from_pairs(&pairs);

    match state.search.search(&query).await {
        Ok(result) => {
            let pagination = Pagination::new(result.total_count, query.current_page(), PER_PAGE);
            if query.term().is_some() && result.total_count > 0 && pagination.is_out_of_range() {
                warn!(
                    page = query.current_page(),
                    page_count = pagination.page_count(),
                    "requested page is beyond the navigable results"
                );
            }

            render_template_response(
                SearchTemplate::new(&query, &result, Utc::now()),
                StatusCode::OK,
            )
        }
        Err(HubsearchError::InvalidQuery { message }) => {
            let past_limit =
                u64::from(query.current_page()) * u64::from(PER_PAGE) > MAX_SEARCH_RESULTS;
            let shown = if past_limit {
                format!(
                    "GitHub only serves the first {} results of a search.",
                    MAX_SEARCH_RESULTS
                )
            } else {
                format!("GitHub rejected this search: {}", message)
            };

            let status = StatusCode::UNPROCESSABLE_ENTITY;
            let mut response =
                render_template_response(ErrorTemplate::new(status, shown), status);
            ErrorReport::new("web::handlers::search_page", message).attach(&mut response);
            response
        }
        Err(err) => error_response("web::handlers::search_page", err),
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct DetailParams {
    owner: Option<String>,
    name: Option<String>,
}

/// `GET /detail?owner=&name=`
pub async fn detail_page(
    State(state): State<AppState>,
    Query(params): Query<DetailParams>,
) -> Response {
    let (Some(owner), Some(name)) = (params.owner.as_deref(), params.name.as_deref()) else {
        return bad_request("owner and name are required");
    };
    if !is_valid_segment(owner) || !is_valid_segment(name) {
        return bad_request("owner and name may only contain letters, digits, '-', '_' and '.'");
    }

    match state.search.repository(owner, name).await {
        Ok(repository) => render_template_response(
            DetailTemplate::new(&repository, Utc::now()),
            StatusCode::OK,
        ),
        Err(err) => error_response("web::handlers::detail_page", err),
    }
}

pub async fn health() -> &'static str {
    "ok"
}

/// `POST /_cache/clear`
pub async fn clear_cache(State(state): State<AppState>) -> String {
    let cleared = state.search.clear_cache();
    format!("cleared {}\n", cleared)
}

pub async fn not_found() -> Response {
    let mut response = render_template_response(
        ErrorTemplate::new(StatusCode::NOT_FOUND, "There is nothing at this address."),
        StatusCode::NOT_FOUND,
    );
    ErrorReport::new("web::handlers::not_found", "no route").attach(&mut response);
    response
}

fn error_response(source: &'static str, err: HubsearchError) -> Response {
    let status = err.http_status();
    let message = match &err {
        HubsearchError::NotFound(_) => "That repository does not exist.".to_string(),
        HubsearchError::RateLimited { reset_at } => {
            format!("GitHub rate limit reached. Try again after {}.", reset_at)
        }
        HubsearchError::Unauthorized => "GitHub rejected the configured token.".to_string(),
        HubsearchError::InvalidQuery { message } => {
            format!("GitHub rejected this request: {}", message)
        }
        _ => "GitHub could not be reached. Try again shortly.".to_string(),
    };

    let mut response = render_template_response(ErrorTemplate::new(status, message), status);
    ErrorReport::new(source, err.to_string()).attach(&mut response);
    response
}

fn bad_request(message: &str) -> Response {
    let mut response = render_template_response(
        ErrorTemplate::new(StatusCode::BAD_REQUEST, message),
        StatusCode::BAD_REQUEST,
    );
    ErrorReport::new("web::handlers::detail_page", message).attach(&mut response);
    response
}

/// GitHub owner and repository names.
fn is_valid_segment(segment: &str) -> bool {
    !segment.is_empty()
        && segment != "."
        && segment != ".."
        && segment
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.'))
}
