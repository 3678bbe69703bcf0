//! External routing service (OSRM) proxy.

mod client;
mod route;

pub use client::{OsrmClient, OsrmRoute};
pub use route::{fetch_walking_route, stitch, WalkingRoute};
