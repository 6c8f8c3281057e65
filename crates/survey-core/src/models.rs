//! Core data models for survey planning.

use crate::error::{Result, SurveyError};
use serde::{Deserialize, Serialize};

/// A geographic position in decimal degrees (WGS84, no altitude).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    pub lat: f64,
    pub lon: f64,
}

impl GeoPoint {
    pub const fn new(lat: f64, lon: f64) -> Self {
        Self { lat, lon }
    }

    pub fn is_finite(&self) -> bool {
        self.lat.is_finite() && self.lon.is_finite()
    }
}

/// `[lat, lon]` pairs, the same vertex layout geofence polygons use.
impl From<[f64; 2]> for GeoPoint {
    fn from(pair: [f64; 2]) -> Self {
        Self::new(pair[0], pair[1])
    }
}

impl From<GeoPoint> for [f64; 2] {
    fn from(point: GeoPoint) -> Self {
        [point.lat, point.lon]
    }
}

/// Polygon vertices, interpreted as a closed ring (last vertex connects to the first).
/// Fewer than 3 vertices is degenerate.
pub type Polygon = Vec<GeoPoint>;

// ========== SURVEY PARAMETERS ==========

/// Inputs for a grid survey, as entered on the map screen.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SurveyParams {
    /// Distance between parallel sweep lines in meters
    pub line_spacing_m: f64,
    /// Sweep bearing in degrees; 0 = derive from the longest polygon edge
    #[serde(default)]
    pub grid_angle_deg: f64,
    /// Cruise speed in m/s; <= 0 disables speed commands and time estimates
    #[serde(default)]
    pub speed_mps: f64,
    /// Survey altitude relative to home, in meters
    pub altitude_m: f64,
    #[serde(default)]
    pub include_speed_commands: bool,
    /// Reserved. Accepted and persisted but not consumed by the encoder.
    #[serde(default)]
    pub hold_nose_position: bool,
}

impl Default for SurveyParams {
    fn default() -> Self {
        Self {
            line_spacing_m: 30.0,
            grid_angle_deg: 0.0,
            speed_mps: 10.0,
            altitude_m: 60.0,
            include_speed_commands: true,
            hold_nose_position: false,
        }
    }
}

impl SurveyParams {
    /// Reject inputs that would make grid generation meaningless or unbounded.
    pub fn validate(&self) -> Result<()> {
        if !self.line_spacing_m.is_finite() {
            return Err(SurveyError::invalid(
                "line_spacing_m",
                format!("must be finite, got {}", self.line_spacing_m),
            ));
        }
        if self.line_spacing_m <= 0.0 {
            return Err(SurveyError::invalid(
                "line_spacing_m",
                format!("must be positive, got {}", self.line_spacing_m),
            ));
        }
        for (name, value) in [
            ("grid_angle_deg", self.grid_angle_deg),
            ("speed_mps", self.speed_mps),
            ("altitude_m", self.altitude_m),
        ] {
            if !value.is_finite() {
                return Err(SurveyError::invalid(
                    name,
                    format!("must be finite, got {value}"),
                ));
            }
        }
        Ok(())
    }

    /// Speed carried on generated waypoints, if speed commands are wanted.
    pub fn waypoint_speed(&self) -> Option<f64> {
        (self.include_speed_commands && self.speed_mps > 0.0).then_some(self.speed_mps)
    }
}

// ========== GRID SURVEY OUTPUT ==========

/// One turn point of the boustrophedon pattern.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GridWaypoint {
    pub position: GeoPoint,
    pub altitude_m: f64,
    #[serde(default)]
    pub speed_mps: Option<f64>,
    pub is_line_start: bool,
    pub is_line_end: bool,
    /// Index of the sweep line this waypoint belongs to, counted before clipping
    pub line_index: usize,
}

/// A clipped sweep line, kept for display.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GridLine {
    pub start: GeoPoint,
    pub end: GeoPoint,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GridSurveyResult {
    /// Flight order; never reordered downstream
    pub waypoints: Vec<GridWaypoint>,
    pub grid_lines: Vec<GridLine>,
    pub total_distance_m: f64,
    pub estimated_time_s: f64,
    /// Lines that survived clipping
    pub num_lines: usize,
    pub polygon_area_label: String,
}

impl GridSurveyResult {
    /// The "no coverage possible" result.
    pub fn empty(polygon_area_label: impl Into<String>) -> Self {
        Self {
            waypoints: Vec::new(),
            grid_lines: Vec::new(),
            total_distance_m: 0.0,
            estimated_time_s: 0.0,
            num_lines: 0,
            polygon_area_label: polygon_area_label.into(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.waypoints.is_empty()
    }
}

// ========== MISSION COMMANDS ==========

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CommandKind {
    /// Navigate to a position
    Waypoint,
    Takeoff,
    /// Change ground speed
    ChangeSpeed,
    ReturnToLaunch,
}

impl CommandKind {
    /// MAVLink `MAV_CMD` identifier.
    pub fn mav_cmd(self) -> u16 {
        match self {
            CommandKind::Waypoint => 16,
            CommandKind::Takeoff => 22,
            CommandKind::ChangeSpeed => 178,
            CommandKind::ReturnToLaunch => 20,
        }
    }

    pub fn has_position(self) -> bool {
        matches!(self, CommandKind::Waypoint | CommandKind::Takeoff)
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MissionFrame {
    /// Altitude relative to home
    #[default]
    GlobalRelativeAlt,
}

impl MissionFrame {
    /// MAVLink `MAV_FRAME` identifier.
    pub fn mav_frame(self) -> u8 {
        match self {
            MissionFrame::GlobalRelativeAlt => 3,
        }
    }
}

/// One mission item ready for uplink.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MissionCommand {
    pub seq: u32,
    pub command: CommandKind,
    pub frame: MissionFrame,
    pub current: bool,
    pub autocontinue: bool,
    pub param1: f32,
    pub param2: f32,
    pub param3: f32,
    pub param4: f32,
    /// Latitude × 10^7, 0 when the command has no position
    pub x: i32,
    /// Longitude × 10^7, 0 when the command has no position
    pub y: i32,
    pub z: f32,
}

impl MissionCommand {
    /// Decode the integer position, if this command carries one.
    pub fn position(&self) -> Option<GeoPoint> {
        if !self.command.has_position() {
            return None;
        }
        Some(GeoPoint::new(
            f64::from(self.x) / 1e7,
            f64::from(self.y) / 1e7,
        ))
    }
}
