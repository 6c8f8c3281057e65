//! CLI tool to verify and summarize a saved survey plan.

use anyhow::{bail, Context, Result};
use clap::Parser;
use std::path::PathBuf;
use survey_cli::{init_tracing, Config, PlanSummary};
use survey_core::SurveyPlan;

/// Verify a saved survey plan and print a summary
#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Args {
    /// Plan file written by plan_survey
    plan: PathBuf,
}

fn main() -> Result<()> {
    init_tracing()?;
    let args = Args::parse();
    let config = Config::from_env();

    let json = std::fs::read_to_string(&args.plan)
        .with_context(|| format!("failed to read plan {}", args.plan.display()))?;
    let plan = SurveyPlan::from_json(&json)
        .with_context(|| format!("failed to parse plan {}", args.plan.display()))?;

    print!("{}", PlanSummary::from_plan(&plan, config.cruise_speed_mps));

    let errors = plan.verify();
    if !errors.is_empty() {
        for error in &errors {
            tracing::error!("{error}");
        }
        bail!("plan {} failed verification ({} problems)", plan.name, errors.len());
    }
    tracing::info!(created_at = %plan.created_at, "Plan verified");

    Ok(())
}
