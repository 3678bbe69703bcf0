//! Walking route composition over the master sequence.

use tracing::{info, warn};

use super::client::OsrmClient;
use crate::error::{Error, Result};
use crate::models::{FeatureCollection, LineString, Point, RouteProperties, ROUTE_SOURCE};

/// GeoJSON for the route plus the point order it follows.
#[derive(Debug, Clone, PartialEq)]
pub struct WalkingRoute {
    pub geojson: FeatureCollection,
    pub order: Vec<String>,
}

/// Fetch a route through `points` in order.
///
/// One request for the whole path is tried first. If that fails every
/// consecutive pair is requested separately and the pieces are stitched.
pub async fn fetch_walking_route(osrm: &OsrmClient, points: &[Point]) -> Result<WalkingRoute> {
    if points.len() < 2 {
        return Err(Error::NotFound("route geometry (fewer than two points)".into()));
    }

    let order: Vec<String> = points.iter().map(|p| p.id.clone()).collect();
    let coordinates: Vec<[f64; 2]> = points.iter().map(Point::lng_lat).collect();

    match osrm.route(&coordinates).await {
        Ok(route) => {
            info!("OSRM route order: {}", order.join(" -> "));
            let properties = RouteProperties {
                via_points: order.clone(),
                source: ROUTE_SOURCE.to_string(),
                distance_m: route.distance,
                duration_s: route.duration,
            };
            Ok(WalkingRoute {
                geojson: FeatureCollection::single_route(
                    LineString::new(route.coordinates),
                    properties,
                ),
                order,
            })
        }
        Err(e) => {
            warn!("Full OSRM route failed ({}), falling back to segments", e);
            let geojson = fetch_segmented_route(osrm, points).await?;
            info!("Using segment-based fallback geometry");
            Ok(WalkingRoute { geojson, order })
        }
    }
}

async fn fetch_segmented_route(osrm: &OsrmClient, points: &[Point]) -> Result<FeatureCollection> {
    let mut segments = Vec::with_capacity(points.len().saturating_sub(1));
    let mut total_distance = 0.0;
    let mut total_duration = 0.0;

    for pair in points.windows(2) {
        let coordinates = [pair[0].lng_lat(), pair[1].lng_lat()];
        match osrm.route(&coordinates).await {
            Ok(segment) => {
                total_distance += segment.distance.unwrap_or(0.0);
                total_duration += segment.duration.unwrap_or(0.0);
                segments.push(segment.coordinates);
            }
            Err(e) => warn!("Segment {} -> {} failed: {}", pair[0].id, pair[1].id, e),
        }
    }

    let combined = stitch(segments);
    if combined.len() < 2 {
        return Err(Error::Upstream("failed to compose route geometry".into()));
    }

    let properties = RouteProperties {
        via_points: points.iter().map(|p| p.id.clone()).collect(),
        source: ROUTE_SOURCE.to_string(),
        distance_m: non_zero(total_distance),
        duration_s: non_zero(total_duration),
    };
    Ok(FeatureCollection::single_route(
        LineString::new(combined),
        properties,
    ))
}

/// Concatenate segments, dropping a joint vertex repeated at the seam.
pub fn stitch(segments: Vec<Vec<[f64; 2]>>) -> Vec<[f64; 2]> {
    let mut combined: Vec<[f64; 2]> = Vec::new();
    for segment in segments.into_iter().filter(|s| !s.is_empty()) {
        let skip = usize::from(combined.last() == segment.first());
        combined.extend(segment.into_iter().skip(skip));
    }
    combined
}

fn non_zero(value: f64) -> Option<f64> {
    (value != 0.0).then_some(value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stitch_drops_shared_vertex() {
        let combined = stitch(vec![
            vec![[0.0, 0.0], [1.0, 0.0]],
            vec![[1.0, 0.0], [1.0, 1.0]],
            vec![],
            vec![[2.0, 2.0], [3.0, 3.0]],
        ]);
        assert_eq!(
            combined,
            vec![[0.0, 0.0], [1.0, 0.0], [1.0, 1.0], [2.0, 2.0], [3.0, 3.0]]
        );
    }

    #[test]
    fn test_stitch_empty() {
        assert!(stitch(vec![]).is_empty());
    }

    #[test]
    fn test_non_zero() {
        assert_eq!(non_zero(0.0), None);
        assert_eq!(non_zero(12.5), Some(12.5));
    }
}
