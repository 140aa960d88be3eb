//! The `matrix` command: load, validate, normalize, pivot, render.

use std::io::Write;
use std::path::Path;

use anyhow::{bail, Context, Result};
use tracing::{info, warn};

use crate::cli::MatrixArgs;
use crate::config::ViewConfig;
use crate::data;
use crate::error::MatrixError;
use crate::model::Matrix;
use crate::normalize::NormalizedTable;
use crate::pipeline;
use crate::pivot::{self, PivotRequest};
use crate::range;
use crate::render;
use crate::variant::SchemaVariant;

pub fn run(args: &MatrixArgs) -> Result<()> {
    let config = ViewConfig::from_cli(args)?;
    let table = load_prepared(&args.file, args.schema.variant())?;
    let matrix = build_matrix(&table, args, &config)?;

    match &args.output {
        Some(path) => {
            let file = std::fs::File::create(path)
                .with_context(|| format!("creating {}", path.display()))?;
            let mut out = std::io::BufWriter::new(file);
            render::write(&matrix, args.format, &config.cell, &mut out)?;
            out.flush()?;
            println!(
                "Wrote {} strikes x {} columns to {}",
                matrix.rows.len(),
                matrix.columns.len(),
                path.display()
            );
        }
        None => {
            let stdout = std::io::stdout();
            render::write(&matrix, args.format, &config.cell, stdout.lock())?;
        }
    }
    Ok(())
}

/// Pick the symbol and expiry window for `args` and pivot `table`.
///
/// Without `--symbol` the first symbol alphabetically is used. An unknown
/// symbol yields an empty matrix; bounds that leave no valid window are an
/// `InvalidRange` error.
pub fn build_matrix(
    table: &NormalizedTable,
    args: &MatrixArgs,
    config: &ViewConfig,
) -> Result<Matrix> {
    let symbols = table.symbols();
    let symbol = match &args.symbol {
        Some(s) => s.trim().to_uppercase(),
        None => match symbols.first() {
            Some(s) => s.clone(),
            None => bail!("'{}' contains no contracts", args.file.display()),
        },
    };
    if !symbols.contains(&symbol) {
        warn!(symbol = %symbol, "symbol not present in file, matrix will be empty");
    }

    // The window is computed over the whole dataset's expiries.
    let range = if args.all_dates {
        None
    } else {
        let expiries = range::available_expiries(table, None);
        range::resolve_range(&expiries, args.from, args.to, config.today)?
    };

    let request = PivotRequest::new(symbol)
        .with_range(range)
        .with_mode(config.mode)
        .with_price(config.price.unwrap_or(table.variant().default_price()));
    info!(
        symbol = %request.symbol,
        range = ?request.range,
        price = %request.price,
        "building matrix"
    );
    Ok(pivot::pivot(table, &request))
}

/// Load a sheet and run it through validation and normalization, turning
/// a schema failure into a readable list of problems.
pub fn load_prepared(path: &Path, variant: Option<SchemaVariant>) -> Result<NormalizedTable> {
    let raw = data::load_table(path)?;
    pipeline::prepare(&raw, variant).map_err(|e| match e {
        MatrixError::Schema(errors) => {
            let msgs: Vec<String> = errors.iter().map(|e| e.to_string()).collect();
            anyhow::anyhow!(
                "Invalid file '{}':\n  {}",
                path.display(),
                msgs.join("\n  ")
            )
        }
        other => anyhow::Error::new(other),
    })
}
