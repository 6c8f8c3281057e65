//! Error types for survey planning.

use thiserror::Error;

/// Errors surfaced by the survey planning core.
///
/// Degenerate polygons are not errors at the generator entry point; they
/// resolve to an empty result. Only rejected inputs and plan
/// (de)serialization failures reach the caller.
#[derive(Debug, Error)]
pub enum SurveyError {
    /// A polygon helper that needs at least one vertex was given none.
    #[error("degenerate input: {0}")]
    DegenerateInput(String),

    /// A numeric input is out of range or not finite.
    #[error("invalid parameter `{name}`: {reason}")]
    InvalidParameter { name: &'static str, reason: String },

    #[error("plan serialization failed: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl SurveyError {
    pub(crate) fn invalid(name: &'static str, reason: impl Into<String>) -> Self {
        Self::InvalidParameter {
            name,
            reason: reason.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, SurveyError>;
