//! Endpoint handlers. Failures are rendered as `{"error": ..}` bodies.

use std::path::Path;
use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, State},
    http::{header, StatusCode},
    response::{IntoResponse, Json, Response},
};
use serde::Serialize;
use serde_json::{json, Value};
use tracing::error;

use super::AppState;
use crate::catalog::{CatalogStats, RouteConfig};
use crate::error::{Error, Result};
use crate::models::{Connection, ConnectionRequest, FeatureCollection, Point};

#[derive(Serialize)]
pub(super) struct HealthResponse {
    status: &'static str,
    #[serde(flatten)]
    catalog: CatalogStats,
}

pub(super) async fn health(State(state): State<Arc<AppState>>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        catalog: state.catalog.stats().await,
    })
}

/// All merged points
pub(super) async fn get_points(State(state): State<Arc<AppState>>) -> Json<Vec<Point>> {
    Json(state.catalog.points().await)
}

/// Reload points from CSV and reset connections
pub(super) async fn reload_points(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<Point>>, (StatusCode, Json<Value>)> {
    state.catalog.reload().await.map(Json).map_err(|e| {
        error!("Reload failed: {}", e);
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(json!({ "error": e.to_string() })),
        )
    })
}

/// OSRM-backed walking route through the master sequence
pub(super) async fn get_route_geojson(
    State(state): State<Arc<AppState>>,
) -> Result<Json<FeatureCollection>> {
    state.catalog.route_geojson().await.map(Json)
}

pub(super) async fn list_routes(State(state): State<Arc<AppState>>) -> Json<Vec<Connection>> {
    Json(state.catalog.connections().await)
}

pub(super) async fn add_route(
    State(state): State<Arc<AppState>>,
    payload: std::result::Result<Json<ConnectionRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<Connection>)> {
    let Json(request) = payload?;
    let connection = state
        .catalog
        .add_connection(&request.from_id, &request.to_id)
        .await?;
    Ok((StatusCode::CREATED, Json(connection)))
}

pub(super) async fn delete_route(
    State(state): State<Arc<AppState>>,
    payload: std::result::Result<Json<ConnectionRequest>, JsonRejection>,
) -> Result<Json<Value>> {
    let Json(request) = payload?;
    state
        .catalog
        .remove_connection(&request.from_id, &request.to_id)
        .await?;
    Ok(Json(json!({ "message": "Route removed successfully" })))
}

pub(super) async fn route_config(State(state): State<Arc<AppState>>) -> Result<Json<RouteConfig>> {
    state.catalog.route_config().await.map(Json)
}

/// Frontend entry page, served byte for byte
pub(super) async fn index(State(state): State<Arc<AppState>>) -> Result<Response> {
    let body = read_file(&state.index_html).await?;
    Ok(([(header::CONTENT_TYPE, "text/html; charset=utf-8")], body).into_response())
}

pub(super) async fn points_csv(State(state): State<Arc<AppState>>) -> Result<Response> {
    csv_passthrough(state.catalog.points_csv()).await
}

pub(super) async fn database_csv(State(state): State<Arc<AppState>>) -> Result<Response> {
    csv_passthrough(state.catalog.database_csv()).await
}

async fn csv_passthrough(path: &Path) -> Result<Response> {
    let body = read_file(path).await?;
    Ok(([(header::CONTENT_TYPE, "text/csv; charset=utf-8")], body).into_response())
}

async fn read_file(path: &Path) -> Result<Vec<u8>> {
    match tokio::fs::read(path).await {
        Ok(body) => Ok(body),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Err(Error::NotFound(
            path.file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_else(|| path.display().to_string()),
        )),
        Err(e) => Err(e.into()),
    }
}
