//! Human-readable plan summaries.

use std::fmt;
use survey_core::{CommandKind, MissionEncoder, SurveyPlan};

#[derive(Debug, Clone, PartialEq)]
pub struct PlanSummary {
    pub name: String,
    pub num_lines: usize,
    pub waypoints: usize,
    pub total_distance_m: f64,
    pub estimated_time_s: f64,
    pub area_label: String,
    pub commands: usize,
    pub speed_changes: usize,
    pub estimated_duration_min: f64,
}

impl PlanSummary {
    /// Summarize a plan. Duration uses `cruise_speed_mps` when given, else the survey speed.
    pub fn from_plan(plan: &SurveyPlan, cruise_speed_mps: Option<f64>) -> Self {
        let cruise = cruise_speed_mps.unwrap_or(plan.params.speed_mps);
        Self {
            name: plan.name.clone(),
            num_lines: plan.result.num_lines,
            waypoints: plan.result.waypoints.len(),
            total_distance_m: plan.result.total_distance_m,
            estimated_time_s: plan.result.estimated_time_s,
            area_label: plan.result.polygon_area_label.clone(),
            commands: plan.commands.len(),
            speed_changes: plan
                .commands
                .iter()
                .filter(|c| c.command == CommandKind::ChangeSpeed)
                .count(),
            estimated_duration_min: MissionEncoder::new()
                .estimate_duration_minutes(&plan.result, cruise),
        }
    }
}

impl fmt::Display for PlanSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Plan: {}", self.name)?;
        writeln!(f, "Area: {}", self.area_label)?;
        if self.num_lines == 0 {
            return writeln!(f, "No coverage possible for this polygon");
        }
        writeln!(f, "Lines: {}, waypoints: {}", self.num_lines, self.waypoints)?;
        writeln!(
            f,
            "Distance: {:.0}m, survey time: {:.0}s",
            self.total_distance_m, self.estimated_time_s
        )?;
        writeln!(
            f,
            "Mission: {} commands ({} speed changes), ~{:.1} min",
            self.commands, self.speed_changes, self.estimated_duration_min
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use survey_core::{GeoPoint, SurveyParams};

    fn plan(polygon: Vec<GeoPoint>) -> SurveyPlan {
        SurveyPlan::build("test", polygon, SurveyParams::default(), GeoPoint::new(0.0, 0.0))
            .unwrap()
    }

    #[test]
    fn summary_counts_match_plan() {
        let plan = plan(vec![
            GeoPoint::new(0.0, 0.0),
            GeoPoint::new(0.0, 0.001),
            GeoPoint::new(0.001, 0.001),
            GeoPoint::new(0.001, 0.0),
        ]);
        let summary = PlanSummary::from_plan(&plan, None);
        assert_eq!(summary.num_lines, plan.result.num_lines);
        assert_eq!(summary.speed_changes, summary.num_lines);
        assert_eq!(summary.commands, 2 + summary.waypoints + summary.speed_changes + 1);
        assert!(summary.estimated_duration_min > 3.0);
        assert!(summary.to_string().contains("Lines:"));
    }

    #[test]
    fn empty_plan_reports_no_coverage() {
        let summary = PlanSummary::from_plan(&plan(vec![GeoPoint::new(0.0, 0.0)]), Some(5.0));
        assert_eq!(summary.commands, 3);
        assert!(summary.to_string().contains("No coverage possible"));
    }
}
