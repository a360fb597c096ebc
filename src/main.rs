use std::net::SocketAddr;

use axum::extract::MatchedPath;
use dotenvy::dotenv;
use http::HeaderValue;
use tower_http::cors::{AllowOrigin, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::info;

use placereview::bootstrap::app_context::AppContext;
use placereview::bootstrap::config::Config;
use placereview::infrastructure::db::Store;
use placereview::presentation::http::api_router;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            std::env::var("RUST_LOG")
                .unwrap_or_else(|_| "placereview=debug,axum=info,tower_http=info".into()),
        )
        .init();

    let cfg = Config::from_env()?;
    info!(
        api_port = cfg.api_port,
        database = %cfg.database_path().display(),
        production = cfg.is_production,
        "Starting place review backend"
    );

    let store = Store::initialize(cfg.database_path()).await?;
    let ctx = AppContext::from_store(cfg.clone(), &store);

    let methods = [
        http::Method::GET,
        http::Method::POST,
        http::Method::OPTIONS,
    ];
    let headers = [http::header::CONTENT_TYPE, http::header::AUTHORIZATION];
    let cors = match cfg.frontend_url.as_deref().map(HeaderValue::from_str) {
        Some(Ok(origin)) => CorsLayer::new()
            .allow_origin(origin)
            .allow_methods(methods)
            .allow_headers(headers)
            .allow_credentials(true),
        // Production requires FRONTEND_URL, so only a malformed value lands here
        Some(Err(_)) if cfg.is_production => {
            anyhow::bail!("FRONTEND_URL is not a valid origin header value")
        }
        _ if cfg.is_production => CorsLayer::new()
            .allow_origin(AllowOrigin::exact(HeaderValue::from_static(
                "http://invalid",
            )))
            .allow_methods(methods)
            .allow_headers(headers),
        // Development convenience
        _ => CorsLayer::new()
            .allow_origin(AllowOrigin::mirror_request())
            .allow_methods(methods)
            .allow_headers(headers)
            .allow_credentials(true),
    };

    let app = api_router(ctx, store.reader().clone()).layer(cors).layer(
        TraceLayer::new_for_http().make_span_with(|req: &http::Request<_>| {
            let method = req.method().clone();
            let uri = req.uri().clone();
            let matched = req
                .extensions()
                .get::<MatchedPath>()
                .map(|p| p.as_str().to_string())
                .unwrap_or_default();
            tracing::info_span!("http", %method, %uri, matched_path = %matched)
        }),
    );

    let api_addr = SocketAddr::from(([0, 0, 0, 0], cfg.api_port));
    info!(%api_addr, "HTTP API listening");
    let listener = tokio::net::TcpListener::bind(api_addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    store.close().await;
    info!("Shutdown complete");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = ?e, "failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received");
}
