mod columns;
mod values;

use std::collections::BTreeSet;

use thiserror::Error;

use crate::model::RawTable;
use crate::variant::SchemaVariant;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    #[error("Missing required column `{column}`")]
    MissingColumn { column: String },

    #[error("Row {row}: column `{column}` must be numeric, got `{value}`")]
    NonNumeric {
        column: String,
        row: usize,
        value: String,
    },

    #[error("Row {row}: column `{column}` must not be negative, got `{value}`")]
    NegativeValue {
        column: String,
        row: usize,
        value: String,
    },

    #[error("Row {row}: column `{column}` is not a date, got `{value}`")]
    InvalidDate {
        column: String,
        row: usize,
        value: String,
    },

    #[error("Row {row}: column `{column}` must be CALL or PUT, got `{value}`")]
    UnknownOptionType {
        column: String,
        row: usize,
        value: String,
    },

    #[error("Row {row}: column `{column}` is empty")]
    MissingValue { column: String, row: usize },

    #[error("No supported layout matches the file (closest: {closest})")]
    UnknownLayout { closest: String },
}

/// Summary of a table that passed validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationReport {
    pub variant: SchemaVariant,
    /// Sheet the layout is read from, if not the default one.
    pub sheet: Option<&'static str>,
    pub rows: usize,
}

/// Validate `table` against `variant`, collecting all errors.
///
/// Row numbers in errors are 1-based data rows (header excluded). The
/// table is never modified.
pub fn validate(
    table: &RawTable,
    variant: SchemaVariant,
) -> Result<ValidationReport, Vec<ValidationError>> {
    let mut errors = columns::check_required_columns(table, variant);

    // Cell checks need every required column in place.
    if errors.is_empty() {
        errors.extend(values::check_values(table, variant));
    }

    if errors.is_empty() {
        Ok(ValidationReport {
            variant,
            sheet: variant.sheet_name(),
            rows: table.len(),
        })
    } else {
        Err(errors)
    }
}

/// Detect the layout of `table`, then validate against it. When nothing
/// matches, the errors describe what the closest layout is missing.
pub fn validate_any(table: &RawTable) -> Result<ValidationReport, Vec<ValidationError>> {
    match SchemaVariant::detect(table.headers()) {
        Some(variant) => validate(table, variant),
        None => {
            let closest = SchemaVariant::closest(table.headers());
            let mut errors = vec![ValidationError::UnknownLayout {
                closest: closest.to_string(),
            }];
            errors.extend(columns::check_required_columns(table, closest));
            Err(errors)
        }
    }
}

/// Names of the required columns reported missing.
pub fn missing_columns(errors: &[ValidationError]) -> BTreeSet<String> {
    errors
        .iter()
        .filter_map(|e| match e {
            ValidationError::MissingColumn { column } => Some(column.clone()),
            _ => None,
        })
        .collect()
}

/// CLI entry point for the `validate` subcommand.
#[cfg(feature = "full")]
pub fn run(path: &std::path::Path, variant: Option<SchemaVariant>) -> anyhow::Result<()> {
    use anyhow::Context;

    const MAX_LISTED: usize = 25;

    let table = crate::data::load_table(path)
        .with_context(|| format!("loading {}", path.display()))?;
    let result = match variant {
        Some(v) => validate(&table, v),
        None => validate_any(&table),
    };

    match result {
        Ok(report) => {
            println!(
                "File '{}' is valid: {} layout{}, {} rows.",
                path.display(),
                report.variant,
                report
                    .sheet
                    .map(|s| format!(" (sheet '{s}')"))
                    .unwrap_or_default(),
                report.rows
            );
            Ok(())
        }
        Err(errors) => {
            eprintln!("Validation failed with {} error(s):", errors.len());
            for (i, e) in errors.iter().take(MAX_LISTED).enumerate() {
                eprintln!("  {}. {}", i + 1, e);
            }
            if errors.len() > MAX_LISTED {
                eprintln!("  ... and {} more", errors.len() - MAX_LISTED);
            }
            let missing = missing_columns(&errors);
            if !missing.is_empty() {
                let names: Vec<&str> = missing.iter().map(String::as_str).collect();
                eprintln!("Missing columns: {}", names.join(", "));
            }
            std::process::exit(1);
        }
    }
}
