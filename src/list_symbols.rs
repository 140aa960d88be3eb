use std::path::Path;

use crate::range;
use crate::variant::SchemaVariant;
use crate::view;

/// Print each underlying in the sheet with its contract count and expiry span.
pub fn run(path: &Path, variant: Option<SchemaVariant>) -> anyhow::Result<()> {
    let table = view::load_prepared(path, variant)?;

    println!("{} layout, {} contracts", table.variant(), table.len());
    println!("  {:<16} {:>9} {:>8}  {}", "Symbol", "Contracts", "Expiries", "Span");
    println!("  {}", "-".repeat(60));
    for symbol in table.symbols() {
        let contracts = table.contracts().iter().filter(|c| c.symbol == symbol).count();
        let expiries = range::available_expiries(&table, Some(&symbol));
        let span = match (expiries.first(), expiries.last()) {
            (Some(first), Some(last)) => format!("{first} .. {last}"),
            _ => String::new(),
        };
        println!(
            "  {:<16} {:>9} {:>8}  {}",
            symbol,
            contracts,
            expiries.len(),
            span
        );
    }
    Ok(())
}
