use rust_decimal::Decimal;

use crate::model::{OptionType, RawTable};
use crate::normalize::parse;
use crate::variant::{self, FieldKind, SchemaVariant};

use super::ValidationError;

/// Check every present column of `variant` against its type constraint.
pub fn check_values(table: &RawTable, variant: SchemaVariant) -> Vec<ValidationError> {
    let mut errors = Vec::new();

    for spec in variant.fields() {
        let Some(col) = variant::find_column(table.headers(), spec) else {
            continue;
        };
        let column = table.headers()[col].trim().to_string();
        let kind = spec.field.kind();

        for (i, cell) in table.column(col).enumerate() {
            let row = i + 1;
            let value = cell.trim();

            if value.is_empty() {
                if spec.field.is_key() {
                    errors.push(ValidationError::MissingValue {
                        column: column.clone(),
                        row,
                    });
                }
                continue;
            }

            if let Some(e) = check_cell(kind, &column, row, value) {
                errors.push(e);
            }
        }
    }

    errors
}

fn check_cell(kind: FieldKind, column: &str, row: usize, value: &str) -> Option<ValidationError> {
    match kind {
        FieldKind::Text | FieldKind::Upper => None,
        FieldKind::Date => parse::parse_date(value)
            .is_none()
            .then(|| ValidationError::InvalidDate {
                column: column.to_string(),
                row,
                value: value.to_string(),
            }),
        FieldKind::OptionType => OptionType::parse(value)
            .is_none()
            .then(|| ValidationError::UnknownOptionType {
                column: column.to_string(),
                row,
                value: value.to_string(),
            }),
        FieldKind::Quantity | FieldKind::Price => match parse::parse_decimal(value) {
            None => Some(ValidationError::NonNumeric {
                column: column.to_string(),
                row,
                value: value.to_string(),
            }),
            // Non-positive prices are a display policy, not a data error.
            Some(n) if kind == FieldKind::Quantity && n < Decimal::ZERO => {
                Some(ValidationError::NegativeValue {
                    column: column.to_string(),
                    row,
                    value: value.to_string(),
                })
            }
            Some(_) => None,
        },
    }
}
