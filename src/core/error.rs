use thiserror::Error;
use crate::models::UnknownAttribute;
use crate::services::StoreError;

/// Errors that can occur while resolving charts or scoring a pair
///
/// Scoring is atomic: any of these aborts the call before a report exists.
#[derive(Debug, Error)]
pub enum ScoringError {
    /// A chart, or a field needed to build one, is absent
    #[error("Missing chart data: {0}")]
    MissingChartData(String),

    /// A value lies outside its closed set; points at an upstream data defect
    #[error("Invalid attribute {field}: {value}")]
    InvalidAttribute { field: &'static str, value: String },

    #[error("Profile {0} cannot be scored against itself")]
    SelfComparison(String),

    #[error("Profile store error: {0}")]
    Store(#[from] StoreError),
}

impl ScoringError {
    pub fn invalid(field: &'static str, value: impl ToString) -> Self {
        Self::InvalidAttribute {
            field,
            value: value.to_string(),
        }
    }

    /// Short machine-readable code used in API error bodies
    pub fn code(&self) -> &'static str {
        match self {
            Self::MissingChartData(_) => "missing_chart_data",
            Self::InvalidAttribute { .. } => "invalid_attribute",
            Self::SelfComparison(_) => "self_comparison",
            Self::Store(_) => "profile_store_error",
        }
    }
}

impl From<UnknownAttribute> for ScoringError {
    fn from(err: UnknownAttribute) -> Self {
        Self::InvalidAttribute {
            field: err.kind,
            value: err.value,
        }
    }
}
