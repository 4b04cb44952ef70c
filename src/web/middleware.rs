// Response logging middleware.
// Emits one structured event per failed request, with the error report when a handler attached one.

use std::time::Instant;

use axum::{body::Body, http::Request, middleware::Next, response::Response};
use tracing::{debug, error, warn};

/// Diagnostic attached to error responses by the handlers.
#[derive(Debug, Clone)]
pub struct ErrorReport {
    pub source: &'static str,
    pub detail: String,
}

impl ErrorReport {
    pub fn new(source: &'static str, detail: impl Into<String>) -> Self {
        Self {
            source,
            detail: detail.into(),
        }
    }

    pub fn attach(self, response: &mut Response) {
        response.extensions_mut().insert(self);
    }
}

pub async fn log_responses(request: Request<Body>, next: Next) -> Response {
    let method = request.method().clone();
    let uri = request.uri().clone();
    let start = Instant::now();

    let mut response = next.run(request).await;
    let status = response.status();
    let elapsed_ms = start.elapsed().as_millis();

    let report = response.extensions_mut().remove::<ErrorReport>();
    let (source, detail) = match report {
        Some(report) => (report.source, report.detail),
        None => ("unknown", "no diagnostic available".to_string()),
    };

    if status.is_server_error() {
        error!(
            target: "hubsearch::http::response",
            status = status.as_u16(),
            method = %method,
            path = %uri.path(),
            query = uri.query().unwrap_or(""),
            elapsed_ms = elapsed_ms,
            source = source,
            detail = %detail,
            "request failed"
        );
    } else if status.is_client_error() {
        warn!(
            target: "hubsearch::http::response",
            status = status.as_u16(),
            method = %method,
            path = %uri.path(),
            query = uri.query().unwrap_or(""),
            elapsed_ms = elapsed_ms,
            source = source,
            detail = %detail,
            "request rejected"
        );
    } else {
        debug!(
            target: "hubsearch::http::response",
            status = status.as_u16(),
            method = %method,
            path = %uri.path(),
            elapsed_ms = elapsed_ms,
            "request served"
        );
    }

    response
}
