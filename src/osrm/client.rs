//! OSRM route service client.

use reqwest::Client;
use serde::Deserialize;
use tracing::{debug, warn};
use url::Url;

use crate::config::OsrmConfig;
use crate::error::{Error, Result};

/// One route leg set returned by OSRM, geometry already in `[lng, lat]` order
#[derive(Debug, Clone, PartialEq)]
pub struct OsrmRoute {
    pub coordinates: Vec<[f64; 2]>,
    pub distance: Option<f64>,
    pub duration: Option<f64>,
}

#[derive(Debug, Deserialize)]
struct RouteResponse {
    #[serde(default)]
    code: Option<String>,
    #[serde(default)]
    routes: Vec<RouteEntry>,
}

#[derive(Debug, Deserialize)]
struct RouteEntry {
    geometry: Option<Geometry>,
    distance: Option<f64>,
    duration: Option<f64>,
}

#[derive(Debug, Deserialize)]
struct Geometry {
    #[serde(rename = "type")]
    geo_type: String,
    #[serde(default)]
    coordinates: Vec<[f64; 2]>,
}

/// Thin client for the `/route/v1/{profile}` endpoint
#[derive(Clone)]
pub struct OsrmClient {
    client: Client,
    base: Url,
    profile: String,
}

impl OsrmClient {
    pub fn new(config: &OsrmConfig) -> Result<Self> {
        let client = Client::builder()
            .user_agent(concat!("waypoint/", env!("CARGO_PKG_VERSION")))
            .timeout(config.timeout())
            .build()?;

        Ok(Self {
            client,
            base: config.base_url()?,
            profile: config.profile.clone(),
        })
    }

    /// Build `{base}/{profile}/{lng,lat;...}?overview=full&geometries=geojson`
    pub fn route_url(&self, coordinates: &[[f64; 2]]) -> Result<Url> {
        let joined = coordinates
            .iter()
            .map(|[lng, lat]| format!("{},{}", lng, lat))
            .collect::<Vec<_>>()
            .join(";");

        let mut url = self
            .base
            .join(&format!("{}/{}", self.profile, joined))
            .map_err(|e| Error::Config(format!("cannot build OSRM URL: {}", e)))?;
        url.query_pairs_mut()
            .append_pair("overview", "full")
            .append_pair("geometries", "geojson");
        Ok(url)
    }

    /// Request a route through the given `[lng, lat]` coordinates in order.
    pub async fn route(&self, coordinates: &[[f64; 2]]) -> Result<OsrmRoute> {
        let url = self.route_url(coordinates)?;
        debug!("OSRM request: {}", url);

        let response = self.client.get(url).send().await?;
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            warn!("OSRM responded with {}: {}", status, body);
            return Err(Error::Upstream(format!("OSRM responded with {}", status)));
        }

        let payload: RouteResponse = response.json().await?;
        parse_route(payload)
    }
}

fn parse_route(payload: RouteResponse) -> Result<OsrmRoute> {
    let Some(route) = payload.routes.into_iter().next() else {
        return Err(Error::Upstream(format!(
            "OSRM returned no routes (code {})",
            payload.code.as_deref().unwrap_or("unknown")
        )));
    };

    match route.geometry {
        Some(geometry) if geometry.geo_type == "LineString" => Ok(OsrmRoute {
            coordinates: geometry.coordinates,
            distance: route.distance,
            duration: route.duration,
        }),
        _ => Err(Error::Upstream("OSRM response missing geometry".into())),
    }
}
