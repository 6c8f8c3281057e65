//! Boustrophedon grid generation over a survey polygon.
//!
//! Sweep lines are laid out parallel to the sweep bearing, centered on the
//! polygon centroid, and clipped to the polygon by sampling. Sampling can miss
//! concavities thinner than one sample step (segment length / `clip_samples`).

use crate::error::{Result, SurveyError};
use crate::models::{GeoPoint, GridLine, GridSurveyResult, GridWaypoint, SurveyParams};
use crate::spatial;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GridConfig {
    /// Sample intervals per sweep line; `clip_samples + 1` points are tested
    pub clip_samples: usize,
    /// Multiplier on the larger bounding-box side so rotated lines still cross the polygon
    pub dimension_buffer: f64,
    /// Upper bound on sweep lines before clipping
    pub max_lines: usize,
}

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            clip_samples: 100,
            dimension_buffer: 1.5,
            max_lines: 10_000,
        }
    }
}

/// Turns a polygon and [`SurveyParams`] into a [`GridSurveyResult`].
#[derive(Debug, Clone, Default)]
pub struct GridSurveyGenerator {
    config: GridConfig,
}

impl GridSurveyGenerator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: GridConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &GridConfig {
        &self.config
    }

    /// Generate the survey grid.
    ///
    /// Parameters are validated before any geometry is computed. A polygon
    /// with fewer than 3 vertices yields an empty result, not an error.
    pub fn generate(&self, polygon: &[GeoPoint], params: &SurveyParams) -> Result<GridSurveyResult> {
        if let Err(err) = params.validate() {
            warn!(%err, "rejected survey parameters");
            return Err(err);
        }
        if let Some(idx) = polygon.iter().position(|p| !p.is_finite()) {
            return Err(SurveyError::invalid(
                "polygon",
                format!("vertex {idx} is not finite"),
            ));
        }

        let area_label = spatial::format_area(polygon);
        if polygon.len() < 3 {
            debug!(vertices = polygon.len(), "degenerate polygon, no coverage");
            return Ok(GridSurveyResult::empty(area_label));
        }

        let center = spatial::centroid(polygon)?;
        let Some((sw, ne)) = spatial::bounding_box(polygon) else {
            return Ok(GridSurveyResult::empty(area_label));
        };
        let width_m = spatial::distance_m(sw, GeoPoint::new(sw.lat, ne.lon));
        let height_m = spatial::distance_m(sw, GeoPoint::new(ne.lat, sw.lon));

        let angle_deg = if params.grid_angle_deg == 0.0 {
            spatial::longest_edge_bearing(polygon)
        } else {
            params.grid_angle_deg
        };
        let (sin, cos) = angle_deg.to_radians().sin_cos();

        let max_dimension = width_m.max(height_m) * self.config.dimension_buffer;
        let spacing = params.line_spacing_m;
        let line_count = (max_dimension / spacing).ceil() as usize;
        if line_count > self.config.max_lines {
            return Err(SurveyError::invalid(
                "line_spacing_m",
                format!(
                    "{spacing} m needs {line_count} sweep lines, limit is {}",
                    self.config.max_lines
                ),
            ));
        }
        debug!(angle_deg, width_m, height_m, line_count, "resolved sweep geometry");

        let half_length = max_dimension / 2.0;
        // Integer halving keeps an odd line count centered on the centroid.
        let center_line = (line_count / 2) as f64;
        let speed = params.waypoint_speed();

        let mut grid_lines = Vec::new();
        let mut waypoints = Vec::new();

        for i in 0..line_count {
            let offset_m = (i as f64 - center_line) * spacing;
            // Perpendicular is the sweep bearing + 90°.
            let cross_east = offset_m * cos;
            let cross_north = -offset_m * sin;
            let along_east = half_length * sin;
            let along_north = half_length * cos;

            let start = spatial::offset(center, cross_east - along_east, cross_north - along_north);
            let end = spatial::offset(center, cross_east + along_east, cross_north + along_north);

            let Some(line) = self.clip_to_polygon(start, end, polygon) else {
                debug!(sweep = i, offset_m, "sweep line misses polygon");
                continue;
            };

            // Parity follows the sweep index counted before clipping.
            let line_index = i;
            let (first, last) = if line_index % 2 == 0 {
                (line.start, line.end)
            } else {
                (line.end, line.start)
            };
            waypoints.push(GridWaypoint {
                position: first,
                altitude_m: params.altitude_m,
                speed_mps: speed,
                is_line_start: true,
                is_line_end: false,
                line_index,
            });
            waypoints.push(GridWaypoint {
                position: last,
                altitude_m: params.altitude_m,
                speed_mps: speed,
                is_line_start: false,
                is_line_end: true,
                line_index,
            });
            grid_lines.push(line);
        }

        let total_distance_m: f64 = waypoints
            .windows(2)
            .map(|pair| spatial::distance_m(pair[0].position, pair[1].position))
            .sum();
        let estimated_time_s = if params.speed_mps > 0.0 {
            total_distance_m / params.speed_mps
        } else {
            0.0
        };

        Ok(GridSurveyResult {
            num_lines: grid_lines.len(),
            waypoints,
            grid_lines,
            total_distance_m,
            estimated_time_s,
            polygon_area_label: area_label,
        })
    }

    /// First and last sampled points of the segment that fall inside the polygon.
    fn clip_to_polygon(&self, start: GeoPoint, end: GeoPoint, polygon: &[GeoPoint]) -> Option<GridLine> {
        let samples = self.config.clip_samples.max(1);
        let mut first = None;
        let mut last = None;

        for k in 0..=samples {
            let t = k as f64 / samples as f64;
            let point = GeoPoint::new(
                start.lat + t * (end.lat - start.lat),
                start.lon + t * (end.lon - start.lon),
            );
            if spatial::point_in_polygon(point, polygon) {
                if first.is_none() {
                    first = Some(point);
                }
                last = Some(point);
            }
        }

        Some(GridLine {
            start: first?,
            end: last?,
        })
    }
}

/// Generate a survey grid with the default [`GridConfig`].
pub fn generate_grid_survey(polygon: &[GeoPoint], params: &SurveyParams) -> Result<GridSurveyResult> {
    GridSurveyGenerator::new().generate(polygon, params)
}
