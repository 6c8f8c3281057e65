//! Polygon input files.

use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::Path;
use survey_core::GeoPoint;

/// A vertex as either `[lat, lon]` or `{ "lat": .., "lon": .. }`.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum Vertex {
    Pair([f64; 2]),
    Point(GeoPoint),
}

impl From<Vertex> for GeoPoint {
    fn from(vertex: Vertex) -> Self {
        match vertex {
            Vertex::Pair(pair) => GeoPoint::from(pair),
            Vertex::Point(point) => point,
        }
    }
}

/// Parse a JSON array of vertices. A repeated closing vertex is dropped since
/// the ring is closed implicitly.
pub fn parse_polygon(json: &str) -> Result<Vec<GeoPoint>> {
    let vertices: Vec<Vertex> =
        serde_json::from_str(json).context("polygon must be a JSON array of vertices")?;
    let mut polygon: Vec<GeoPoint> = vertices.into_iter().map(GeoPoint::from).collect();
    if polygon.len() > 3 && polygon.first() == polygon.last() {
        polygon.pop();
    }
    Ok(polygon)
}

pub fn read_polygon(path: &Path) -> Result<Vec<GeoPoint>> {
    let json = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read polygon file {}", path.display()))?;
    parse_polygon(&json).with_context(|| format!("invalid polygon in {}", path.display()))
}
