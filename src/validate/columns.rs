use crate::model::RawTable;
use crate::variant::{self, SchemaVariant};

use super::ValidationError;

/// Check that every required column of `variant` is present.
pub fn check_required_columns(table: &RawTable, variant: SchemaVariant) -> Vec<ValidationError> {
    variant
        .required_fields()
        .filter(|spec| variant::find_column(table.headers(), spec).is_none())
        .map(|spec| ValidationError::MissingColumn {
            column: spec.source.to_string(),
        })
        .collect()
}
