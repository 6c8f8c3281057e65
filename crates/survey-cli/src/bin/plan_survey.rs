//! CLI tool to generate a survey grid and mission from a polygon file.

use anyhow::{Context, Result};
use clap::Parser;
use std::path::PathBuf;
use survey_cli::{init_tracing, read_polygon, Config, PlanSummary};
use survey_core::{GeoPoint, GridSurveyGenerator, MissionEncoder, SurveyParams, SurveyPlan};

/// Generate a boustrophedon survey plan for a polygon
#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Args {
    /// Polygon file: JSON array of [lat, lon] pairs or {"lat", "lon"} objects
    #[arg(long)]
    polygon: PathBuf,

    /// Distance between sweep lines in meters
    #[arg(long, default_value_t = 30.0)]
    spacing: f64,

    /// Sweep bearing in degrees (0 = follow the longest polygon edge)
    #[arg(long, default_value_t = 0.0)]
    angle: f64,

    /// Survey speed in m/s (0 disables speed commands)
    #[arg(long, default_value_t = 10.0)]
    speed: f64,

    /// Altitude relative to home in meters
    #[arg(long, default_value_t = 60.0)]
    altitude: f64,

    /// Emit a speed change at the start of each line
    #[arg(long)]
    speed_commands: bool,

    /// Hold nose position (reserved, stored with the plan)
    #[arg(long)]
    hold_nose: bool,

    /// Home latitude
    #[arg(long, allow_hyphen_values = true)]
    home_lat: f64,

    /// Home longitude
    #[arg(long, allow_hyphen_values = true)]
    home_lon: f64,

    /// Plan name
    #[arg(long, default_value = "survey")]
    name: String,

    /// Output file (stdout if omitted)
    #[arg(long)]
    output: Option<PathBuf>,
}

fn main() -> Result<()> {
    init_tracing()?;
    let args = Args::parse();
    let config = Config::from_env();

    let polygon = read_polygon(&args.polygon)?;
    tracing::info!(vertices = polygon.len(), "Loaded polygon from {}", args.polygon.display());

    let params = SurveyParams {
        line_spacing_m: args.spacing,
        grid_angle_deg: args.angle,
        speed_mps: args.speed,
        altitude_m: args.altitude,
        include_speed_commands: args.speed_commands,
        hold_nose_position: args.hold_nose,
    };
    let home = GeoPoint::new(args.home_lat, args.home_lon);

    let plan = SurveyPlan::build_with(
        &GridSurveyGenerator::with_config(config.grid.clone()),
        &MissionEncoder::new(),
        args.name,
        polygon,
        params,
        home,
    )
    .context("failed to generate survey plan")?;

    if plan.result.is_empty() {
        tracing::warn!("Survey grid is empty; no coverage possible for this polygon");
    }
    let summary = PlanSummary::from_plan(&plan, config.cruise_speed_mps);
    for line in summary.to_string().lines() {
        tracing::info!("{line}");
    }

    let json = plan.to_json()?;
    match &args.output {
        Some(path) => {
            std::fs::write(path, json)
                .with_context(|| format!("failed to write plan to {}", path.display()))?;
            tracing::info!("Plan written to {}", path.display());
        }
        None => println!("{json}"),
    }

    Ok(())
}
