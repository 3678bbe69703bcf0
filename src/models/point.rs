//! Point of interest and connection types served to the map frontend.

use serde::{Deserialize, Serialize};

/// A point of interest reconciled from the coordinate list and the description table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub id: String,
    pub name: String,
    /// Latitude (`y` column)
    pub lat: f64,
    /// Longitude (`x` column)
    pub lng: f64,
    /// Narrative text; empty when no description row matched
    #[serde(default)]
    pub description: String,
    /// Identifier the description table used for this point, when it differs from `id`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fallback_id: Option<String>,
}

impl Point {
    pub fn new(id: impl Into<String>, name: impl Into<String>, lat: f64, lng: f64) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            lat,
            lng,
            description: String::new(),
            fallback_id: None,
        }
    }

    /// Coordinate in OSRM/GeoJSON order
    pub fn lng_lat(&self) -> [f64; 2] {
        [self.lng, self.lat]
    }
}

/// Bidirectional connection between two points, stored with ordered ids.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Connection {
    pub from_id: String,
    pub to_id: String,
}

impl Connection {
    /// Build the canonical form so that `a-b` and `b-a` compare equal.
    pub fn normalized(a: &str, b: &str) -> Self {
        let (from_id, to_id) = if a <= b { (a, b) } else { (b, a) };
        Self {
            from_id: from_id.to_string(),
            to_id: to_id.to_string(),
        }
    }
}

/// Body of `POST /routes` and `DELETE /routes`
#[derive(Debug, Clone, Deserialize)]
pub struct ConnectionRequest {
    pub from_id: String,
    pub to_id: String,
}
