//! Spatial math for survey planning: distances, bearings, local offsets and polygon helpers.
//!
//! Everything here is a pure function of its inputs. Local offsets use a flat
//! small-angle approximation that is fine at field-survey scale but drifts at
//! high latitude and over tens of kilometers.

use crate::error::{Result, SurveyError};
use crate::models::GeoPoint;

/// Mean Earth radius in meters.
pub const EARTH_RADIUS_M: f64 = 6_371_000.0;

/// Flat-earth meters per degree of latitude used by [`offset`].
pub const METERS_PER_DEG_LAT: f64 = 111_111.0;

const SQ_FT_PER_SQ_M: f64 = 10.763_910_4;
const SQ_FT_PER_ACRE: f64 = 43_560.0;
const ACRES_PER_SQ_MI: f64 = 640.0;
/// Half an acre; smaller areas are reported in square feet.
const SQ_FT_DISPLAY_LIMIT: f64 = 21_780.0;

/// Calculate distance between two points in meters using Haversine formula.
///
/// # Arguments
/// * `lat1`, `lon1` - First point coordinates in decimal degrees
/// * `lat2`, `lon2` - Second point coordinates in decimal degrees
///
/// # Returns
/// Distance in meters
pub fn haversine_distance(lat1: f64, lon1: f64, lat2: f64, lon2: f64) -> f64 {
    let phi1 = lat1.to_radians();
    let phi2 = lat2.to_radians();
    let dphi = (lat2 - lat1).to_radians();
    let dlambda = (lon2 - lon1).to_radians();
    let a = (dphi / 2.0).sin().powi(2) + phi1.cos() * phi2.cos() * (dlambda / 2.0).sin().powi(2);
    2.0 * EARTH_RADIUS_M * a.sqrt().atan2((1.0 - a).sqrt())
}

/// Great-circle distance between two points in meters.
pub fn distance_m(a: GeoPoint, b: GeoPoint) -> f64 {
    haversine_distance(a.lat, a.lon, b.lat, b.lon)
}

/// Initial bearing from `from` to `to` in degrees, normalized to [0, 360).
/// 0 = north, 90 = east.
pub fn bearing_deg(from: GeoPoint, to: GeoPoint) -> f64 {
    let phi1 = from.lat.to_radians();
    let phi2 = to.lat.to_radians();
    let delta_lambda = (to.lon - from.lon).to_radians();

    let x = delta_lambda.sin() * phi2.cos();
    let y = phi1.cos() * phi2.sin() - phi1.sin() * phi2.cos() * delta_lambda.cos();

    let bearing = x.atan2(y).to_degrees().rem_euclid(360.0);
    // rem_euclid can round a tiny negative angle up to exactly 360.0
    if bearing >= 360.0 {
        0.0
    } else {
        bearing
    }
}

/// Offset a position by meters in the east and north directions.
///
/// # Arguments
/// * `point` - Reference position
/// * `east_m` - Offset in meters (positive = east)
/// * `north_m` - Offset in meters (positive = north)
///
/// # Returns
/// The displaced position
pub fn offset(point: GeoPoint, east_m: f64, north_m: f64) -> GeoPoint {
    let meters_per_deg_lon = (METERS_PER_DEG_LAT * point.lat.to_radians().cos()).max(1e-9);
    GeoPoint::new(
        point.lat + north_m / METERS_PER_DEG_LAT,
        point.lon + east_m / meters_per_deg_lon,
    )
}

/// Arithmetic mean of the vertices (not area weighted).
pub fn centroid(polygon: &[GeoPoint]) -> Result<GeoPoint> {
    if polygon.is_empty() {
        return Err(SurveyError::DegenerateInput(
            "centroid of an empty polygon".to_string(),
        ));
    }
    let n = polygon.len() as f64;
    let (lat_sum, lon_sum) = polygon
        .iter()
        .fold((0.0, 0.0), |(lat, lon), p| (lat + p.lat, lon + p.lon));
    Ok(GeoPoint::new(lat_sum / n, lon_sum / n))
}

/// Southwest and northeast corners of the polygon, or `None` when it has no vertices.
pub fn bounding_box(polygon: &[GeoPoint]) -> Option<(GeoPoint, GeoPoint)> {
    let first = polygon.first()?;
    let mut sw = *first;
    let mut ne = *first;
    for p in &polygon[1..] {
        sw.lat = sw.lat.min(p.lat);
        sw.lon = sw.lon.min(p.lon);
        ne.lat = ne.lat.max(p.lat);
        ne.lon = ne.lon.max(p.lon);
    }
    Some((sw, ne))
}

/// Bearing in degrees of the longest edge of the closed ring; 0 for fewer than 2 vertices.
/// Ties keep the first edge found.
pub fn longest_edge_bearing(polygon: &[GeoPoint]) -> f64 {
    if polygon.len() < 2 {
        return 0.0;
    }
    let mut longest = 0.0;
    let mut bearing = 0.0;
    for (i, from) in polygon.iter().enumerate() {
        let to = polygon[(i + 1) % polygon.len()];
        let length = distance_m(*from, to);
        if length > longest {
            longest = length;
            bearing = bearing_deg(*from, to);
        }
    }
    bearing
}

/// Check if a point is inside the polygon.
/// Uses even-odd ray casting in (lon, lat) space. Points exactly on an edge
/// may land either way.
pub fn point_in_polygon(point: GeoPoint, polygon: &[GeoPoint]) -> bool {
    let n = polygon.len();
    if n < 3 {
        return false;
    }

    let mut inside = false;
    let mut j = n - 1;
    for i in 0..n {
        let yi = polygon[i].lat;
        let xi = polygon[i].lon;
        let yj = polygon[j].lat;
        let xj = polygon[j].lon;

        if ((yi > point.lat) != (yj > point.lat))
            && (point.lon < (xj - xi) * (point.lat - yi) / (yj - yi) + xi)
        {
            inside = !inside;
        }
        j = i;
    }

    inside
}

/// Polygon area in square meters from the spherical excess of the ring.
/// Returns 0 for fewer than 3 vertices.
pub fn polygon_area_m2(polygon: &[GeoPoint]) -> f64 {
    if polygon.len() < 3 {
        return 0.0;
    }

    // Sum the signed areas of the polar triangles formed by each edge.
    let tan_half_colat = |p: &GeoPoint| ((std::f64::consts::FRAC_PI_2 - p.lat.to_radians()) / 2.0).tan();

    let mut total = 0.0;
    let mut prev = polygon[polygon.len() - 1];
    let mut prev_tan = tan_half_colat(&prev);
    for point in polygon {
        let tan = tan_half_colat(point);
        let delta_lon = (point.lon - prev.lon).to_radians();
        let t = tan * prev_tan;
        total += 2.0 * (t * delta_lon.sin()).atan2(1.0 + t * delta_lon.cos());
        prev = *point;
        prev_tan = tan;
    }

    (total * EARTH_RADIUS_M * EARTH_RADIUS_M).abs()
}

/// Human-readable polygon area, e.g. `"12.3 acres"`.
pub fn format_area(polygon: &[GeoPoint]) -> String {
    format_area_m2(polygon_area_m2(polygon))
}

/// Format an area as ft² below half an acre, acres below a square mile, mi² above.
pub fn format_area_m2(area_m2: f64) -> String {
    let sq_ft = area_m2 * SQ_FT_PER_SQ_M;
    if sq_ft < SQ_FT_DISPLAY_LIMIT {
        return format!("{sq_ft:.0} ft²");
    }
    let acres = sq_ft / SQ_FT_PER_ACRE;
    if acres < ACRES_PER_SQ_MI {
        format!("{acres:.1} acres")
    } else {
        format!("{:.1} mi²", acres / ACRES_PER_SQ_MI)
    }
}
