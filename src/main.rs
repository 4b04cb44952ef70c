use std::{process, sync::Arc};

use tokio::net::TcpListener;
use tracing::{Dispatch, Level, dispatcher, error, info};
use tracing_subscriber::fmt as tracing_fmt;

use hubsearch::{
    config,
    error::{HubsearchError, Result},
    github::GitHubClient,
    search::SearchService,
    telemetry,
    web::{AppState, build_router},
};

#[tokio::main]
async fn main() {
    if let Err(error) = run().await {
        report_application_error(&error);
        process::exit(1);
    }
}

fn report_application_error(error: &HubsearchError) {
    if dispatcher::has_been_set() {
        error!(error = %error, "application error");
        return;
    }

    let subscriber = tracing_fmt().with_max_level(Level::ERROR).finish();
    let dispatch = Dispatch::new(subscriber);
    dispatcher::with_default(&dispatch, || {
        error!(error = %error, "application error");
    });
}

async fn run() -> Result<()> {
    let (_cli, settings) = config::load_with_cli()
        .map_err(|err| HubsearchError::Config(format!("failed to load configuration: {err}")))?;

    telemetry::init(&settings.logging)?;

    let client = GitHubClient::from_settings(&settings.github)?;
    info!(
        api_base = client.api_base(),
        authenticated = settings.github.token.is_some(),
        cache_enabled = settings.cache.enabled,
        cache_ttl_secs = settings.cache.ttl.map(|ttl| ttl.as_secs()),
        "starting hubsearch"
    );

    let service = SearchService::new(Arc::new(client), &settings.cache);
    let app = build_router(AppState::new(service));

    let listener = TcpListener::bind(settings.server.addr)
        .await
        .map_err(|err| {
            HubsearchError::Other(format!("failed to bind {}: {err}", settings.server.addr))
        })?;
    info!(addr = %settings.server.addr, "listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|err| HubsearchError::Other(format!("server error: {err}")))
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        error!(error = %err, "failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    info!("shutdown signal received");
}
