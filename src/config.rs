use anyhow::{bail, Result};
use chrono::{Local, NaiveDate};

use crate::cli::MatrixArgs;
use crate::format::CellFormat;
use crate::model::{DisplayMode, PriceField};

const MAX_FIELD_WIDTH: usize = 64;

/// Resolved settings for one `matrix` invocation.
#[derive(Debug, Clone, PartialEq)]
pub struct ViewConfig {
    pub cell: CellFormat,
    pub mode: DisplayMode,
    /// `None` means the layout's default price field.
    pub price: Option<PriceField>,
    /// Reference date for the default expiry window.
    pub today: NaiveDate,
}

impl ViewConfig {
    pub fn from_cli(args: &MatrixArgs) -> Result<Self> {
        for (name, width) in [
            ("ticker-width", args.ticker_width),
            ("price-width", args.price_width),
        ] {
            if width == 0 || width > MAX_FIELD_WIDTH {
                bail!("Invalid --{name} {width}. Use 1..={MAX_FIELD_WIDTH}.");
            }
        }

        Ok(ViewConfig {
            cell: CellFormat {
                ticker_width: args.ticker_width,
                price_width: args.price_width,
            },
            mode: if args.combined {
                DisplayMode::Combined
            } else {
                DisplayMode::Split
            },
            price: args.price,
            today: args.today.unwrap_or_else(|| Local::now().date_naive()),
        })
    }
}
