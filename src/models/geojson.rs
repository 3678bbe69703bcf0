//! Minimal GeoJSON types for the walking route.

use serde::{Deserialize, Serialize};

pub const ROUTE_SOURCE: &str = "router.project-osrm.org-route";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeatureCollection {
    #[serde(rename = "type")]
    pub collection_type: String,
    pub features: Vec<Feature>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Feature {
    #[serde(rename = "type")]
    pub feature_type: String,
    pub geometry: LineString,
    pub properties: RouteProperties,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LineString {
    #[serde(rename = "type")]
    pub geo_type: String,
    pub coordinates: Vec<[f64; 2]>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RouteProperties {
    pub via_points: Vec<String>,
    pub source: String,
    pub distance_m: Option<f64>,
    pub duration_s: Option<f64>,
}

impl LineString {
    pub fn new(coordinates: Vec<[f64; 2]>) -> Self {
        Self {
            geo_type: "LineString".to_string(),
            coordinates,
        }
    }
}

impl FeatureCollection {
    /// Wrap a single route line into a collection
    pub fn single_route(geometry: LineString, properties: RouteProperties) -> Self {
        Self {
            collection_type: "FeatureCollection".to_string(),
            features: vec![Feature {
                feature_type: "Feature".to_string(),
                geometry,
                properties,
            }],
        }
    }
}
