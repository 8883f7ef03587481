//! MidianText Engine - Main entry point.

use std::sync::Arc;
use std::time::Duration;

use axum::http::header::{AUTHORIZATION, CONTENT_TYPE};
use axum::http::{HeaderValue, Method};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use midian_engine::api;
use midian_engine::app::{App, AppParts, Repositories};
use midian_engine::infrastructure::catalog::{ItemCatalog, MissionCatalog};
use midian_engine::infrastructure::config::AppConfig;

/// How often expired login tokens are swept out of memory.
const TOKEN_SWEEP_INTERVAL: Duration = Duration::from_secs(300);

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment from repo root (the binary may run from `crates/engine`).
    load_dotenv_from_repo_root();

    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "midian_engine=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting MidianText Engine");

    // Load configuration
    let config = AppConfig::from_env()?;

    let missions = match &config.missions_path {
        Some(path) => {
            tracing::info!(path = %path.display(), "Loading missions from file");
            MissionCatalog::from_path(path)?
        }
        None => MissionCatalog::builtin()?,
    };
    let items = ItemCatalog::builtin()?;
    tracing::info!(
        missions = missions.len(),
        items = items.all().len(),
        token_ttl_secs = config.token_ttl.as_secs(),
        "Catalogs loaded"
    );

    // Create application
    let app = Arc::new(App::new(
        Repositories::in_memory(),
        AppParts::system(missions, items, config.token_ttl),
    ));

    // Spawn expired token sweeper
    let tokens = app.stores.tokens.clone();
    tokio::spawn(async move {
        let mut interval = tokio::time::interval(TOKEN_SWEEP_INTERVAL);
        loop {
            interval.tick().await;
            let purged = tokens.purge_expired().await;
            if purged > 0 {
                tracing::debug!(purged, "Swept expired login tokens");
            }
        }
    });

    let mut router = api::routes()
        .with_state(app)
        .layer(TraceLayer::new_for_http());

    if let Some(cors) = build_cors_layer(config.cors_allowed_origins.as_deref()) {
        router = router.layer(cors);
    }

    // Start server
    let addr = config.bind_addr()?;
    tracing::info!("Listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, router).await?;

    Ok(())
}

fn load_dotenv_from_repo_root() {
    let repo_root = std::path::Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("..")
        .join("..");

    // Prefer local overrides.
    for filename in [".env.local", ".env"] {
        let path = repo_root.join(filename);
        if path.exists() {
            let _ = dotenvy::from_path(path);
        }
    }
}

fn build_cors_layer(allowed_origins: Option<&str>) -> Option<CorsLayer> {
    let allowed_origins = allowed_origins?;

    let mut cors = CorsLayer::new()
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::PATCH,
            Method::DELETE,
            Method::OPTIONS,
        ])
        // Clients send the login key and JSON bodies, both of which trigger preflights.
        .allow_headers([AUTHORIZATION, CONTENT_TYPE]);

    if allowed_origins == "*" {
        cors = cors.allow_origin(Any);
    } else {
        let origins: Vec<HeaderValue> = allowed_origins
            .split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .filter_map(|s| HeaderValue::from_str(s).ok())
            .collect();

        if origins.is_empty() {
            return None;
        }

        cors = cors.allow_origin(origins);
    }

    Some(cors)
}
