//! Mission encoding: turns a grid survey into an ordered autopilot mission.
//!
//! Output layout is `HOME, TAKEOFF, [CHANGE_SPEED], WAYPOINT, WAYPOINT, ...,
//! [CHANGE_SPEED], WAYPOINT, ..., RTL`. Sequence numbers start at 0 with no
//! gaps, and only item 0 is marked current.

use crate::models::{
    CommandKind, GeoPoint, GridSurveyResult, GridWaypoint, MissionCommand, MissionFrame,
};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Scale factor for integer-encoded latitude/longitude.
pub const COORD_SCALE: f64 = 1e7;

/// `DO_CHANGE_SPEED` speed type for ground speed.
const SPEED_TYPE_GROUND: f32 = 1.0;
/// `DO_CHANGE_SPEED` throttle value meaning "leave unchanged".
const THROTTLE_NO_CHANGE: f32 = -1.0;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MissionConfig {
    /// Altitude of the home item
    pub home_altitude_m: f32,
    pub takeoff_altitude_m: f32,
    /// Fixed allowance for arming and climb-out
    pub setup_minutes: f64,
    /// Fixed allowance for the return leg
    pub rtl_minutes: f64,
}

impl Default for MissionConfig {
    fn default() -> Self {
        Self {
            home_altitude_m: 10.0,
            takeoff_altitude_m: 15.0,
            setup_minutes: 2.0,
            rtl_minutes: 1.0,
        }
    }
}

/// Encodes a [`GridSurveyResult`] plus a home position into mission commands.
#[derive(Debug, Clone, Default)]
pub struct MissionEncoder {
    config: MissionConfig,
}

impl MissionEncoder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: MissionConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &MissionConfig {
        &self.config
    }

    /// Build the full mission for upload.
    pub fn encode(&self, result: &GridSurveyResult, home: GeoPoint) -> Vec<MissionCommand> {
        let mut mission = MissionBuilder::with_capacity(self.count_commands(result));

        mission.push_position(CommandKind::Waypoint, [0.0; 4], home, self.config.home_altitude_m);
        mission.push_position(CommandKind::Takeoff, [0.0; 4], home, self.config.takeoff_altitude_m);

        let mut last_line_index: Option<usize> = None;
        for (idx, waypoint) in result.waypoints.iter().enumerate() {
            let is_first = idx == 0;
            if let Some(speed) = waypoint.speed_mps {
                let new_line =
                    waypoint.is_line_start && last_line_index != Some(waypoint.line_index);
                if is_first || new_line {
                    mission.push_change_speed(speed);
                    last_line_index = Some(waypoint.line_index);
                }
            }
            mission.push_waypoint(waypoint);
        }

        mission.push(CommandKind::ReturnToLaunch, [0.0; 4], 0, 0, 0.0);

        debug!(
            commands = mission.commands.len(),
            waypoints = result.waypoints.len(),
            "encoded survey mission"
        );
        mission.commands
    }

    /// Number of commands [`encode`](Self::encode) emits for this result.
    ///
    /// Assumes generator-shaped waypoints: the first waypoint starts a line and
    /// each line index starts exactly once.
    pub fn count_commands(&self, result: &GridSurveyResult) -> usize {
        let speed_changes = result
            .waypoints
            .iter()
            .filter(|wp| wp.is_line_start && wp.speed_mps.is_some())
            .count();
        2 + result.waypoints.len() + speed_changes + 1
    }

    /// Flight time in minutes at `cruise_speed_mps`, plus setup and RTL allowances.
    /// A non-positive cruise speed contributes no flight time.
    pub fn estimate_duration_minutes(&self, result: &GridSurveyResult, cruise_speed_mps: f64) -> f64 {
        let flight_minutes = if cruise_speed_mps > 0.0 {
            result.total_distance_m / cruise_speed_mps / 60.0
        } else {
            0.0
        };
        flight_minutes + self.config.setup_minutes + self.config.rtl_minutes
    }
}

/// Assigns contiguous sequence numbers in emission order.
struct MissionBuilder {
    commands: Vec<MissionCommand>,
}

impl MissionBuilder {
    fn with_capacity(capacity: usize) -> Self {
        Self {
            commands: Vec::with_capacity(capacity),
        }
    }

    fn push(&mut self, command: CommandKind, params: [f32; 4], x: i32, y: i32, z: f32) {
        let seq = self.commands.len() as u32;
        self.commands.push(MissionCommand {
            seq,
            command,
            frame: MissionFrame::GlobalRelativeAlt,
            current: seq == 0,
            autocontinue: true,
            param1: params[0],
            param2: params[1],
            param3: params[2],
            param4: params[3],
            x,
            y,
            z,
        });
    }

    fn push_position(&mut self, command: CommandKind, params: [f32; 4], at: GeoPoint, altitude_m: f32) {
        self.push(
            command,
            params,
            encode_coordinate(at.lat),
            encode_coordinate(at.lon),
            altitude_m,
        );
    }

    fn push_change_speed(&mut self, speed_mps: f64) {
        self.push(
            CommandKind::ChangeSpeed,
            [SPEED_TYPE_GROUND, speed_mps as f32, THROTTLE_NO_CHANGE, 0.0],
            0,
            0,
            0.0,
        );
    }

    /// Hold time, acceptance radius, pass radius and yaw are all left at 0.
    fn push_waypoint(&mut self, waypoint: &GridWaypoint) {
        self.push_position(
            CommandKind::Waypoint,
            [0.0; 4],
            waypoint.position,
            waypoint.altitude_m as f32,
        );
    }
}

/// Scale degrees by 10^7, truncating toward zero.
pub fn encode_coordinate(deg: f64) -> i32 {
    (deg * COORD_SCALE) as i32
}

/// Encode with the default [`MissionConfig`].
pub fn encode_mission(result: &GridSurveyResult, home: GeoPoint) -> Vec<MissionCommand> {
    MissionEncoder::new().encode(result, home)
}

pub fn count_commands(result: &GridSurveyResult) -> usize {
    MissionEncoder::new().count_commands(result)
}

pub fn estimate_duration_minutes(result: &GridSurveyResult, cruise_speed_mps: f64) -> f64 {
    MissionEncoder::new().estimate_duration_minutes(result, cruise_speed_mps)
}
