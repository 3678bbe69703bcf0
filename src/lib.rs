//! Waypoint - a small backend for a points-of-interest map.
//!
//! Reconciles a coordinate CSV with a description CSV, serves the merged
//! points over HTTP and proxies a walking route from OSRM.

pub mod catalog;
pub mod config;
pub mod error;
pub mod graph;
pub mod loader;
pub mod models;
pub mod osrm;
pub mod server;

pub use catalog::Catalog;
pub use config::Config;
pub use error::{Error, Result};
pub use models::{Connection, FeatureCollection, Point};
