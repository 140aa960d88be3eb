//! Output adapters for a finished matrix.

use std::io::Write;

use anyhow::Result;

use crate::format::{fixed2, CellFormat};
use crate::model::Matrix;

/// Output encoding of the `matrix` command.
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// Aligned table for a terminal.
    Text,
    Csv,
    /// Structured cells with ticker and price kept apart.
    Json,
}

pub fn write(
    matrix: &Matrix,
    format: OutputFormat,
    cell: &CellFormat,
    out: impl Write,
) -> Result<()> {
    match format {
        OutputFormat::Text => write_text(matrix, cell, out),
        OutputFormat::Csv => write_csv(matrix, cell, out),
        OutputFormat::Json => write_json(matrix, out),
    }
}

/// Display strings, Strike first, one entry per matrix column after it.
fn text_rows(matrix: &Matrix, cell: &CellFormat) -> Vec<Vec<String>> {
    matrix
        .rows
        .iter()
        .map(|row| {
            std::iter::once(fixed2(row.strike))
                .chain(
                    matrix
                        .columns
                        .iter()
                        .zip(&row.cells)
                        .map(|(col, c)| cell.render(c, col.side)),
                )
                .collect()
        })
        .collect()
}

pub fn write_text(matrix: &Matrix, cell: &CellFormat, mut out: impl Write) -> Result<()> {
    writeln!(out, "{}", matrix.symbol)?;
    if let Some(range) = matrix.range {
        writeln!(out, "Expiries {range}")?;
    }
    if matrix.is_empty() {
        writeln!(out, "(no contracts in selection)")?;
        return Ok(());
    }

    let headers: Vec<String> = std::iter::once("Strike".to_string())
        .chain(matrix.headers())
        .collect();
    let rows = text_rows(matrix, cell);
    let widths: Vec<usize> = headers
        .iter()
        .enumerate()
        .map(|(i, h)| {
            rows.iter()
                .map(|r| r[i].chars().count())
                .chain(std::iter::once(h.chars().count()))
                .max()
                .unwrap_or(0)
        })
        .collect();

    let line = |cells: &[String]| -> String {
        cells
            .iter()
            .zip(&widths)
            .enumerate()
            .map(|(i, (c, &w))| {
                if i == 0 {
                    format!("{c:>w$}")
                } else {
                    format!("{c:<w$}")
                }
            })
            .collect::<Vec<_>>()
            .join("  ")
            .trim_end()
            .to_string()
    };

    writeln!(out, "{}", line(&headers))?;
    let total: usize = widths.iter().sum::<usize>() + 2 * widths.len().saturating_sub(1);
    writeln!(out, "{}", "-".repeat(total))?;
    for row in &rows {
        writeln!(out, "{}", line(row))?;
    }
    Ok(())
}

pub fn write_csv(matrix: &Matrix, cell: &CellFormat, out: impl Write) -> Result<()> {
    let mut wtr = csv::Writer::from_writer(out);
    let mut header = vec!["Strike".to_string()];
    header.extend(matrix.headers());
    wtr.write_record(&header)?;
    for row in matrix.rows.iter() {
        let mut record = vec![row.strike.to_string()];
        record.extend(
            matrix
                .columns
                .iter()
                .zip(&row.cells)
                .map(|(col, c)| cell.render(c, col.side)),
        );
        wtr.write_record(&record)?;
    }
    wtr.flush()?;
    Ok(())
}

pub fn write_json(matrix: &Matrix, mut out: impl Write) -> Result<()> {
    serde_json::to_writer_pretty(&mut out, matrix)?;
    writeln!(out)?;
    Ok(())
}
