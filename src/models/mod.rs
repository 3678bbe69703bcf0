//! Core data models for the map backend.

pub mod geojson;
pub mod point;

pub use geojson::{Feature, FeatureCollection, LineString, RouteProperties, ROUTE_SOURCE};
pub use point::{Connection, ConnectionRequest, Point};
