use schemars::{Schema, schema_for};

use crate::model::Matrix;

/// JSON Schema of the structured matrix written by `matrix --format json`.
pub fn matrix_schema() -> Schema {
    schema_for!(Matrix)
}

/// The `schema` subcommand.
pub fn run() -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(&matrix_schema())?);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_schema_describes_rows_and_columns() {
        let value = serde_json::to_value(matrix_schema()).unwrap();
        let props = &value["properties"];
        for field in ["symbol", "mode", "expiries", "columns", "rows"] {
            assert!(props.get(field).is_some(), "missing property {field}");
        }
        assert!(props.get("range").is_some());
    }
}
