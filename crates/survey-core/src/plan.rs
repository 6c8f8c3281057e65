//! Saved survey plans.
//!
//! A plan bundles the inputs of one generation with its grid and mission so the
//! persistence layer can store and reload it field for field.

use crate::error::Result;
use crate::grid::GridSurveyGenerator;
use crate::mission::MissionEncoder;
use crate::models::{CommandKind, GeoPoint, GridSurveyResult, MissionCommand, SurveyParams};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SurveyPlan {
    pub name: String,
    pub created_at: DateTime<Utc>,
    /// Polygon vertices in drawing order
    pub polygon: Vec<GeoPoint>,
    pub params: SurveyParams,
    pub home: GeoPoint,
    pub result: GridSurveyResult,
    pub commands: Vec<MissionCommand>,
}

impl SurveyPlan {
    /// Generate and encode a plan with default configuration.
    pub fn build(
        name: impl Into<String>,
        polygon: Vec<GeoPoint>,
        params: SurveyParams,
        home: GeoPoint,
    ) -> Result<Self> {
        Self::build_with(
            &GridSurveyGenerator::new(),
            &MissionEncoder::new(),
            name,
            polygon,
            params,
            home,
        )
    }

    pub fn build_with(
        generator: &GridSurveyGenerator,
        encoder: &MissionEncoder,
        name: impl Into<String>,
        polygon: Vec<GeoPoint>,
        params: SurveyParams,
        home: GeoPoint,
    ) -> Result<Self> {
        let result = generator.generate(&polygon, &params)?;
        let commands = encoder.encode(&result, home);
        Ok(Self {
            name: name.into(),
            created_at: Utc::now(),
            polygon,
            params,
            home,
            result,
            commands,
        })
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Check the mission against the uplink contract.
    /// Returns list of problems (empty = valid).
    pub fn verify(&self) -> Vec<String> {
        let mut errors = Vec::new();

        for (idx, command) in self.commands.iter().enumerate() {
            if command.seq as usize != idx {
                errors.push(format!(
                    "Command at position {idx} has sequence {}",
                    command.seq
                ));
            }
            if command.current != (idx == 0) {
                errors.push(format!(
                    "Command {} has current={} (only sequence 0 may be current)",
                    command.seq, command.current
                ));
            }
        }

        match self.commands.last() {
            Some(last) if last.command == CommandKind::ReturnToLaunch => {
                if last.x != 0 || last.y != 0 {
                    errors.push("Return-to-launch must not carry a position".to_string());
                }
            }
            Some(last) => errors.push(format!(
                "Mission must end with return-to-launch, found {:?}",
                last.command
            )),
            None => errors.push("Mission has no commands".to_string()),
        }

        let expected = MissionEncoder::new().count_commands(&self.result);
        if expected != self.commands.len() {
            errors.push(format!(
                "Expected {expected} commands for {} waypoints, found {}",
                self.result.waypoints.len(),
                self.commands.len()
            ));
        }

        errors
    }

    pub fn is_valid(&self) -> bool {
        self.verify().is_empty()
    }
}
