//! In-memory catalog of points, connections and the cached walking route.

use chrono::{DateTime, Utc};
use hashbrown::HashSet;
use serde::Serialize;
use std::path::{Path, PathBuf};
use tokio::sync::{Mutex, RwLock};
use tracing::{info, warn};

use crate::config::Config;
use crate::error::{Error, Result};
use crate::graph::RouteGraph;
use crate::loader::{load_dataset, Dataset};
use crate::models::{Connection, FeatureCollection, Point};
use crate::osrm::{fetch_walking_route, OsrmClient, WalkingRoute};

#[derive(Debug, Default)]
struct Snapshot {
    dataset: Dataset,
    graph: RouteGraph,
    route: Option<WalkingRoute>,
    loaded_at: Option<DateTime<Utc>>,
}

impl Snapshot {
    fn sequence_points(&self) -> Vec<Point> {
        self.dataset
            .sequence
            .iter()
            .filter_map(|id| self.dataset.get(id).cloned())
            .collect()
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct PointRef {
    pub id: String,
    pub name: String,
}

/// Suggested start and end for the frontend route picker
#[derive(Debug, Clone, Serialize)]
pub struct RouteConfig {
    pub start: PointRef,
    pub end: PointRef,
}

#[derive(Debug, Clone, Serialize)]
pub struct CatalogStats {
    pub points: usize,
    pub connections: usize,
    pub route_cached: bool,
    pub loaded_at: Option<DateTime<Utc>>,
}

pub struct Catalog {
    points_csv: PathBuf,
    database_csv: PathBuf,
    osrm: Option<OsrmClient>,
    snapshot: RwLock<Snapshot>,
    /// Serializes on-demand route fetches
    refetch: Mutex<()>,
}

impl Catalog {
    /// Create an empty catalog. Call [`Catalog::reload`] to read the files.
    pub fn new(config: &Config) -> Result<Self> {
        let osrm = if config.osrm.enabled {
            Some(OsrmClient::new(&config.osrm)?)
        } else {
            None
        };

        Ok(Self {
            points_csv: config.points_csv_path(),
            database_csv: config.database_csv_path(),
            osrm,
            snapshot: RwLock::new(Snapshot::default()),
            refetch: Mutex::new(()),
        })
    }

    pub fn points_csv(&self) -> &Path {
        &self.points_csv
    }

    pub fn database_csv(&self) -> &Path {
        &self.database_csv
    }

    /// Re-read both CSV files, refetch the walking route and reset connections.
    ///
    /// The new state is built without holding the lock and swapped in at the end.
    pub async fn reload(&self) -> Result<Vec<Point>> {
        let points_csv = self.points_csv.clone();
        let database_csv = self.database_csv.clone();
        let dataset = tokio::task::spawn_blocking(move || load_dataset(&points_csv, &database_csv))
            .await
            .map_err(|e| Error::Io(std::io::Error::other(e)))??;

        let mut snapshot = Snapshot {
            dataset,
            loaded_at: Some(Utc::now()),
            ..Snapshot::default()
        };

        snapshot.route = match &self.osrm {
            Some(osrm) => match fetch_walking_route(osrm, &snapshot.sequence_points()).await {
                Ok(route) => Some(route),
                Err(e) => {
                    warn!("Route geometry unavailable after reload: {}", e);
                    None
                }
            },
            None => None,
        };

        let order = snapshot
            .route
            .as_ref()
            .map(|r| r.order.clone())
            .unwrap_or_else(|| snapshot.dataset.sequence.clone());
        snapshot.graph = {
            let known: HashSet<&str> = snapshot.dataset.points.iter().map(|p| p.id.as_str()).collect();
            RouteGraph::from_sequence(&order, |id| known.contains(id))
        };

        let points = snapshot.dataset.points.clone();
        info!(
            "Catalog loaded: {} points, {} connections",
            points.len(),
            snapshot.graph.len()
        );

        *self.snapshot.write().await = snapshot;
        Ok(points)
    }

    pub async fn points(&self) -> Vec<Point> {
        self.snapshot.read().await.dataset.points.clone()
    }

    /// Cached route geometry, fetched on demand when the cache is empty.
    ///
    /// Only one fetch runs at a time; callers waiting behind it reuse its result.
    pub async fn route_geojson(&self) -> Result<FeatureCollection> {
        if let Some(route) = &self.snapshot.read().await.route {
            return Ok(route.geojson.clone());
        }

        let _refetch = self.refetch.lock().await;
        let (points, loaded_at) = {
            let snapshot = self.snapshot.read().await;
            if let Some(route) = &snapshot.route {
                return Ok(route.geojson.clone());
            }
            (snapshot.sequence_points(), snapshot.loaded_at)
        };

        let Some(osrm) = &self.osrm else {
            return Err(Error::NotFound("route geometry".into()));
        };

        let route = fetch_walking_route(osrm, &points).await?;
        let geojson = route.geojson.clone();

        let mut snapshot = self.snapshot.write().await;
        // a reload may have replaced the points meanwhile
        if snapshot.route.is_none() && snapshot.loaded_at == loaded_at {
            snapshot.route = Some(route);
        }
        Ok(geojson)
    }

    pub async fn connections(&self) -> Vec<Connection> {
        self.snapshot.read().await.graph.connections().to_vec()
    }

    pub async fn add_connection(&self, from_id: &str, to_id: &str) -> Result<Connection> {
        let mut guard = self.snapshot.write().await;
        let snapshot = &mut *guard;
        let dataset = &snapshot.dataset;
        let connection = snapshot
            .graph
            .add(from_id, to_id, |id| dataset.get(id).is_some())?;
        info!("Added route {} -> {}", connection.from_id, connection.to_id);
        Ok(connection)
    }

    pub async fn remove_connection(&self, from_id: &str, to_id: &str) -> Result<Connection> {
        let connection = self.snapshot.write().await.graph.remove(from_id, to_id)?;
        info!("Removed route {} -> {}", connection.from_id, connection.to_id);
        Ok(connection)
    }

    /// Start/end from the first connection, or from the first two points.
    pub async fn route_config(&self) -> Result<RouteConfig> {
        let snapshot = self.snapshot.read().await;

        let connection = match snapshot.graph.first() {
            Some(c) => c.clone(),
            None => match snapshot.dataset.points.as_slice() {
                [a, b, ..] => Connection::normalized(&a.id, &b.id),
                _ => return Err(Error::NotFound("enough points to suggest a route".into())),
            },
        };

        let lookup = |id: &str| {
            snapshot
                .dataset
                .get(id)
                .map(|p| PointRef {
                    id: p.id.clone(),
                    name: p.name.clone(),
                })
                .ok_or_else(|| Error::NotFound(format!("point {}", id)))
        };

        Ok(RouteConfig {
            start: lookup(&connection.from_id)?,
            end: lookup(&connection.to_id)?,
        })
    }

    pub async fn stats(&self) -> CatalogStats {
        let snapshot = self.snapshot.read().await;
        CatalogStats {
            points: snapshot.dataset.points.len(),
            connections: snapshot.graph.len(),
            route_cached: snapshot.route.is_some(),
            loaded_at: snapshot.loaded_at,
        }
    }
}
