//! GitHub client tests against a local mock server.

use std::sync::Arc;
use std::time::Duration;

use axum::{body::Body, http::Request};
use http_body_util::BodyExt;
use mockito::Matcher;
use tower::ServiceExt;

use hubsearch::config::CacheSettings;
use hubsearch::error::HubsearchError;
use hubsearch::github::GitHubClient;
use hubsearch::search::{SearchQuery, SearchService};
use hubsearch::web::{AppState, build_router};

const SEARCH_BODY: &str = r#"{
    "total_count": 5000,
    "incomplete_results": false,
    "items": [
        {
            "id": 1,
            "name": "react-query",
            "full_name": "tanstack/react-query",
            "owner": {"id": 2, "login": "tanstack", "type": "Organization"},
            "html_url": "https://github.com/tanstack/react-query",
            "description": "Powerful asynchronous state management",
            "language": "TypeScript",
            "stargazers_count": 40000,
            "forks_count": 2700,
            "updated_at": "2024-05-01T12:00:00Z"
        }
    ]
}"#;

fn client(base: &str, token: Option<&str>) -> GitHubClient {
    GitHubClient::new(base, token, "hubsearch-tests", Duration::from_secs(5))
        .expect("client should build")
}

#[tokio::test]
async fn search_sends_translated_query() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("GET", "/search/repositories")
        .match_query(Matcher::AllOf(vec![
            Matcher::UrlEncoded("q".into(), "react language:TypeScript".into()),
            Matcher::UrlEncoded("per_page".into(), "20".into()),
        ]))
        .match_header("accept", "application/vnd.github+json")
        .match_header("user-agent", "hubsearch-tests")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_header("x-ratelimit-limit", "60")
        .with_header("x-ratelimit-remaining", "59")
        .with_body(SEARCH_BODY)
        .create_async()
        .await;

    let client = client(&server.url(), None);
    let path = SearchQuery::new("react")
        .with_lang(Some("TypeScript"))
        .request_path()
        .expect("term present");

    let result = client.search_repositories(&path).await.expect("search succeeds");

    mock.assert_async().await;
    assert_eq!(result.total_count, 5000);
    assert_eq!(result.items[0].full_name, "tanstack/react-query");
    assert_eq!(client.rate_limit().limit, 60);
    assert_eq!(client.rate_limit().remaining, 59);
}

#[tokio::test]
async fn token_is_sent_as_bearer() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("GET", "/repos/tanstack/react-query")
        .match_header("authorization", "Bearer secret-token")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(
            r#"{
                "id": 1,
                "name": "react-query",
                "full_name": "tanstack/react-query",
                "owner": {"id": 2, "login": "tanstack"},
                "html_url": "https://github.com/tanstack/react-query",
                "updated_at": "2024-05-01T12:00:00Z"
            }"#,
        )
        .create_async()
        .await;

    let client = client(&server.url(), Some("secret-token"));
    let repo = client
        .get_repo("tanstack", "react-query")
        .await
        .expect("repository loads");

    mock.assert_async().await;
    assert_eq!(repo.owner.login, "tanstack");
    assert_eq!(repo.stargazers_count, 0);
}

#[tokio::test]
async fn missing_repository_is_not_found() {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("GET", "/repos/nobody/nothing")
        .with_status(404)
        .with_body(r#"{"message": "Not Found"}"#)
        .create_async()
        .await;

    let err = client(&server.url(), None)
        .get_repo("nobody", "nothing")
        .await
        .expect_err("404 must fail");

    assert!(matches!(err, HubsearchError::NotFound(_)));
}

#[tokio::test]
async fn exhausted_rate_limit_is_reported() {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("GET", "/search/repositories")
        .match_query(Matcher::Any)
        .with_status(403)
        .with_header("x-ratelimit-limit", "60")
        .with_header("x-ratelimit-remaining", "0")
        .with_header("x-ratelimit-reset", "1700000000")
        .with_body(r#"{"message": "API rate limit exceeded"}"#)
        .create_async()
        .await;

    let err = client(&server.url(), None)
        .search_repositories("/search/repositories?q=react&per_page=20")
        .await
        .expect_err("rate limited request must fail");

    assert!(matches!(err, HubsearchError::RateLimited { .. }));
}

#[tokio::test]
async fn server_error_is_upstream_failure() {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("GET", "/search/repositories")
        .match_query(Matcher::Any)
        .with_status(503)
        .with_body("unavailable")
        .create_async()
        .await;

    let err = client(&server.url(), None)
        .search_repositories("/search/repositories?q=react&per_page=20")
        .await
        .expect_err("503 must fail");

    match err {
        HubsearchError::Upstream { status, body } => {
            assert_eq!(status.as_u16(), 503);
            assert_eq!(body, "unavailable");
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[tokio::test]
async fn unprocessable_query_carries_github_message() {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("GET", "/search/repositories")
        .match_query(Matcher::UrlEncoded("page".into(), "60".into()))
        .with_status(422)
        .with_header("content-type", "application/json")
        .with_body(
            r#"{
                "message": "Only the first 1000 search results are available",
                "documentation_url": "https://docs.github.com/v3/search/"
            }"#,
        )
        .create_async()
        .await;

    let path = SearchQuery::new("react")
        .with_page(Some(60))
        .request_path()
        .expect("term present");
    let err = client(&server.url(), None)
        .search_repositories(&path)
        .await
        .expect_err("422 must fail");

    match &err {
        HubsearchError::InvalidQuery { message } => {
            assert_eq!(message, "Only the first 1000 search results are available");
        }
        other => panic!("unexpected error: {other}"),
    }
    assert_eq!(err.http_status().as_u16(), 422);
}

#[tokio::test]
async fn page_past_search_limit_renders_limit_notice() {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("GET", "/search/repositories")
        .match_query(Matcher::Any)
        .with_status(422)
        .with_header("content-type", "application/json")
        .with_body(r#"{"message": "Only the first 1000 search results are available"}"#)
        .create_async()
        .await;

    let service = SearchService::new(
        Arc::new(client(&server.url(), None)),
        &CacheSettings::default(),
    );
    let response = build_router(AppState::new(service))
        .oneshot(
            Request::builder()
                .uri("/search?query=react&page=60")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status().as_u16(), 422);
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let body = String::from_utf8(bytes.to_vec()).unwrap();
    assert!(body.contains("GitHub only serves the first 1000 results"));
    assert!(!body.contains("could not be reached"));
}
