//! Survey CLI - command line tools for survey grid planning.
//!
//! This crate provides the binaries:
//! - plan_survey: Generate a survey plan from a polygon file
//! - inspect_plan: Verify and summarize a saved plan

pub mod config;
pub mod input;
pub mod report;

pub use config::Config;
pub use input::{parse_polygon, read_polygon};
pub use report::PlanSummary;

use anyhow::Result;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// `RUST_LOG` plus debug output from both workspace crates.
pub fn default_filter() -> Result<EnvFilter> {
    Ok(EnvFilter::from_default_env()
        .add_directive("survey_cli=debug".parse()?)
        .add_directive("survey_core=debug".parse()?))
}

/// Install the tracing subscriber. Logs go to stderr so stdout stays usable for plan output.
pub fn init_tracing() -> Result<()> {
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(default_filter()?)
        .init();
    Ok(())
}
