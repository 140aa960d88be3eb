use chrono::NaiveDate;
use thiserror::Error;

use crate::validate::ValidationError;

/// Errors raised by the reshape pipeline.
///
/// An empty selection is not an error: it produces an empty `Matrix`.
#[derive(Debug, Error)]
pub enum MatrixError {
    /// The input table failed schema validation. Processing stops before
    /// normalization and no partial matrix is produced.
    #[error("Invalid file: {} validation error(s)", .0.len())]
    Schema(Vec<ValidationError>),

    /// The normalizer was handed data that never passed validation.
    #[error("Contract violation: {0}")]
    ContractViolation(String),

    #[error("Invalid date range: start {start} is after end {end}")]
    InvalidRange { start: NaiveDate, end: NaiveDate },
}

pub type MatrixResult<T> = Result<T, MatrixError>;

impl MatrixError {
    pub fn contract_violation(msg: impl Into<String>) -> Self {
        Self::ContractViolation(msg.into())
    }

    /// Validation errors carried by a `Schema` failure, empty otherwise.
    pub fn validation_errors(&self) -> &[ValidationError] {
        match self {
            MatrixError::Schema(errors) => errors,
            _ => &[],
        }
    }
}
