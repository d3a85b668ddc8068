mod config;
mod db;
mod entities;
mod error;
mod models;
mod resolver;
mod routes;
mod store;

use std::sync::Arc;

use axum::{Router, routing::get};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use crate::{config::Config, db::SeaOrmStore, resolver::SectionResolver};

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub resolver: SectionResolver,
}

pub fn app(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/health", get(routes::health))
        .route("/api/sections", get(routes::list_sections))
        .route("/api/sections/{id}", get(routes::get_section))
        .route("/api/sections/{id}/movies", get(routes::section_movies))
        .route("/api/recommendations", get(routes::recommendations))
        .with_state(state)
        .layer(CorsLayer::new().allow_origin(Any).allow_headers(Any))
        .layer(TraceLayer::new_for_http())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            std::env::var("RUST_LOG")
                .unwrap_or_else(|_| "info,reelshelf=debug,sqlx=warn".to_string()),
        )
        .init();

    let config = Arc::new(Config::from_env()?);

    let db = db::connect_and_migrate(config.database_url.as_str()).await?;
    let resolver = SectionResolver::new(Arc::new(SeaOrmStore::new(db)))
        .with_policy(config.pinned_page_policy)
        .with_concurrency(config.section_concurrency);

    tracing::info!(
        policy = ?config.pinned_page_policy,
        first_page_size = config.first_page_size,
        "section resolver ready"
    );

    let state = Arc::new(AppState { config: config.clone(), resolver });

    let listener = tokio::net::TcpListener::bind(config.addr).await?;
    tracing::info!(addr = %config.addr, "listening");
    axum::serve(listener, app(state)).await?;

    Ok(())
}
