//! HTTP API for the map frontend.

mod handlers;

use std::path::PathBuf;
use std::sync::Arc;

use axum::{
    routing::{get, post},
    Router,
};
use tower_http::cors::CorsLayer;
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

use crate::catalog::Catalog;
use crate::config::Config;

/// Application state shared across handlers
pub struct AppState {
    pub catalog: Catalog,
    pub index_html: PathBuf,
    pub llm_dir: PathBuf,
}

impl AppState {
    pub fn new(catalog: Catalog, config: &Config) -> Self {
        Self {
            catalog,
            index_html: config.server.index_html.clone(),
            llm_dir: config.server.llm_dir.clone(),
        }
    }
}

/// Build the router with every endpoint and the `/llm-html` static mount
pub fn build_router(state: Arc<AppState>) -> Router {
    let llm_assets = ServeDir::new(&state.llm_dir);

    Router::new()
        .route("/", get(handlers::index))
        .route("/health", get(handlers::health))
        .route("/points", get(handlers::get_points))
        .route("/reload-points", post(handlers::reload_points))
        .route("/route-geojson", get(handlers::get_route_geojson))
        .route(
            "/routes",
            get(handlers::list_routes)
                .post(handlers::add_route)
                .delete(handlers::delete_route),
        )
        .route("/api/route-config", get(handlers::route_config))
        .route("/lokalzacja.csv", get(handlers::points_csv))
        .route("/lokalizacja.csv", get(handlers::points_csv))
        .route("/database.csv", get(handlers::database_csv))
        .nest_service("/llm-html", llm_assets)
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
