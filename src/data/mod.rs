use std::io::Read;
use std::path::Path;

use anyhow::{Context, Result};
use tracing::debug;

use crate::model::RawTable;

/// Load a delimited export of the quotes sheet into a `RawTable`.
pub fn load_table(path: &Path) -> Result<RawTable> {
    let file = std::fs::File::open(path)
        .with_context(|| format!("opening {}", path.display()))?;
    let delimiter = match path.extension().and_then(|e| e.to_str()) {
        Some(ext) if ext.eq_ignore_ascii_case("tsv") => b'\t',
        _ => b',',
    };
    load_table_from_reader(file, delimiter).with_context(|| format!("parsing {}", path.display()))
}

/// Read CSV-shaped text. Cells are trimmed, blank lines skipped and ragged
/// rows padded to the header width.
pub fn load_table_from_reader<R: Read>(reader: R, delimiter: u8) -> Result<RawTable> {
    let mut rdr = csv::ReaderBuilder::new()
        .delimiter(delimiter)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(reader);

    let headers: Vec<String> = rdr
        .headers()
        .context("reading header row")?
        .iter()
        .map(|h| h.trim_start_matches('\u{feff}').to_string())
        .collect();
    let mut table = RawTable::new(headers);

    for (i, record) in rdr.records().enumerate() {
        let record = record.with_context(|| format!("reading row {}", i + 1))?;
        if record.iter().all(str::is_empty) {
            continue;
        }
        table.push_row(record.iter().map(str::to_string).collect());
    }

    debug!(
        rows = table.len(),
        columns = table.headers().len(),
        "loaded table"
    );
    Ok(table)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_load_trims_and_pads() {
        let text = "\u{feff}TckrSymb, Asst ,Last\nABCD1, nifty ,3.5\nABCD2,NIFTY\n,,\n";
        let table = load_table_from_reader(text.as_bytes(), b',').unwrap();
        assert_eq!(table.headers(), ["TckrSymb", "Asst", "Last"]);
        assert_eq!(table.len(), 2);
        assert_eq!(table.rows()[0], vec!["ABCD1", "nifty", "3.5"]);
        assert_eq!(table.rows()[1], vec!["ABCD2", "NIFTY", ""]);
    }
}
