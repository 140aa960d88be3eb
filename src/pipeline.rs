//! Validator -> normalizer, the gate every upload goes through before it
//! can be pivoted.

use tracing::info;

use crate::error::{MatrixError, MatrixResult};
use crate::model::RawTable;
use crate::normalize::{self, NormalizedTable};
use crate::validate;
use crate::variant::SchemaVariant;

/// Validate `raw` (against `variant`, or the detected layout when `None`)
/// and normalize it. Nothing is normalized unless validation passes.
pub fn prepare(raw: &RawTable, variant: Option<SchemaVariant>) -> MatrixResult<NormalizedTable> {
    let report = match variant {
        Some(v) => validate::validate(raw, v),
        None => validate::validate_any(raw),
    }
    .map_err(MatrixError::Schema)?;

    let table = normalize::normalize(raw, report.variant)?;
    info!(
        layout = %report.variant,
        rows = table.len(),
        symbols = table.symbols().len(),
        "prepared options table"
    );
    Ok(table)
}
