use chrono::NaiveDate;
use thiserror::Error;

/// A classified, recoverable data condition.
///
/// Every failure of loading or filtering ends up here and is shown to the
/// user as informational text; none of them aborts the dashboard.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Condition {
    #[error("Data file for '{resource}' not found (expected at {path}).")]
    ResourceAbsent { resource: String, path: String },

    #[error("Data file for '{resource}' could not be read: {reason}")]
    ResourceMalformed { resource: String, reason: String },

    #[error("Invalid date range: start {start} is after end {end}.")]
    InvalidRange { start: NaiveDate, end: NaiveDate },

    #[error("No data for '{resource}' between {start} and {end}.")]
    EmptyAfterFilter {
        resource: String,
        start: NaiveDate,
        end: NaiveDate,
    },
}

impl Condition {
    /// Short label used in notice headers.
    pub fn title(&self) -> &'static str {
        match self {
            Condition::ResourceAbsent { .. } => "File missing",
            Condition::ResourceMalformed { .. } => "Invalid data",
            Condition::InvalidRange { .. } => "Invalid date range",
            Condition::EmptyAfterFilter { .. } => "No data in range",
        }
    }
}
