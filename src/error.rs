//! Error types for dispatching requests.
//!
//! Every failure is scoped to a single request. Errors fall into four
//! categories (see [`ErrorKind`]) so the boundary layer can map them to
//! response statuses without matching on individual variants.

use std::fmt;

use thiserror::Error;

use crate::dispatching::Rule;
use crate::models::Column;

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, DispatchError>;

/// Categories of dispatching errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// The job table lacks a column a requested rule needs.
    Schema,
    /// The request itself is malformed (unknown rule, unknown mode).
    Validation,
    /// Input values are out of domain.
    Data,
    /// An internal invariant was broken.
    Internal,
}

/// Errors raised while validating input or computing schedules.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum DispatchError {
    #[error("{rule} requires column(s): {}", join(.missing))]
    MissingColumns { rule: Rule, missing: Vec<Column> },
    #[error("Invalid rule: {0}")]
    UnknownRule(String),
    #[error("Rule requested more than once: {0}")]
    DuplicateRule(String),
    #[error("Invalid mode: {0}")]
    UnknownMode(String),
    #[error("Invalid job data: {}", join(.0))]
    InvalidData(Vec<DataIssue>),
    #[error("Job table is empty")]
    EmptyTable,
    #[error("{rule} simulation exceeded the step limit of {limit}")]
    StepLimitExceeded { rule: Rule, limit: u64 },
    #[error("Internal error: {0}")]
    Internal(String),
}

impl DispatchError {
    /// Category of this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::MissingColumns { .. } => ErrorKind::Schema,
            Self::UnknownRule(_) | Self::DuplicateRule(_) | Self::UnknownMode(_) => {
                ErrorKind::Validation
            }
            Self::InvalidData(_) | Self::EmptyTable | Self::StepLimitExceeded { .. } => {
                ErrorKind::Data
            }
            Self::Internal(_) => ErrorKind::Internal,
        }
    }
}

/// A single out-of-domain value in the job table.
#[derive(Debug, Clone, PartialEq)]
pub struct DataIssue {
    /// Id of the offending job.
    pub job: String,
    /// Issue category.
    pub kind: DataIssueKind,
    /// Human-readable description.
    pub message: String,
}

/// Categories of data issues.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DataIssueKind {
    /// Processing time is zero, negative, or not finite.
    NonPositiveProcessingTime,
    /// Release time is negative or not finite.
    InvalidReleaseTime,
    /// Due date is not finite.
    InvalidDueDate,
    /// Weight is zero, negative, or not finite.
    NonPositiveWeight,
    /// A required column has no value in this row.
    MissingValue,
    /// The simulation clock would pass the range where unit steps are exact.
    TimeHorizonExceeded,
}

impl DataIssue {
    pub(crate) fn new(
        job: impl Into<String>,
        kind: DataIssueKind,
        message: impl Into<String>,
    ) -> Self {
        Self {
            job: job.into(),
            kind,
            message: message.into(),
        }
    }
}

impl fmt::Display for DataIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "job '{}': {}", self.job, self.message)
    }
}

fn join<T: fmt::Display>(items: &[T]) -> String {
    items
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}
