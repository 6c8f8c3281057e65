pub mod error;
pub mod grid;
pub mod mission;
pub mod models;
pub mod plan;
pub mod spatial;

pub use error::SurveyError;
pub use grid::{generate_grid_survey, GridConfig, GridSurveyGenerator};
pub use mission::{
    count_commands, encode_coordinate, encode_mission, estimate_duration_minutes, MissionConfig,
    MissionEncoder,
};
pub use models::{
    CommandKind, GeoPoint, GridLine, GridSurveyResult, GridWaypoint, MissionCommand, MissionFrame,
    Polygon, SurveyParams,
};
pub use plan::SurveyPlan;
pub use spatial::{distance_m, format_area, haversine_distance, point_in_polygon};
