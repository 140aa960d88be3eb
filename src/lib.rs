//! Reshape an options quote sheet (one row per contract) into a matrix of
//! strikes by expiry.
//!
//! The flow is validate -> normalize -> pivot -> format:
//!
//! ```no_run
//! use chrono::NaiveDate;
//! use options_matrix::{pipeline, pivot, range, RawTable};
//!
//! # fn load() -> RawTable { unimplemented!() }
//! let raw: RawTable = load();
//! let table = pipeline::prepare(&raw, None)?;
//! let today = NaiveDate::from_ymd_opt(2024, 2, 1).unwrap();
//! let window = range::default_range(&range::available_expiries(&table, None), today);
//! let request = pivot::PivotRequest::new("NIFTY").with_range(window);
//! let matrix = pivot::pivot(&table, &request);
//! println!("{:?}", matrix.headers());
//! # Ok::<(), options_matrix::MatrixError>(())
//! ```

pub mod error;
pub mod format;
pub mod model;
pub mod normalize;
pub mod pipeline;
pub mod pivot;
pub mod range;
pub mod validate;
pub mod variant;

// Host-side modules: CLI, file loading, rendering.
#[cfg(feature = "full")]
pub mod cli;
#[cfg(feature = "full")]
pub mod config;
#[cfg(feature = "full")]
pub mod data;
#[cfg(feature = "full")]
pub mod list_symbols;
#[cfg(feature = "full")]
pub mod logging;
#[cfg(feature = "full")]
pub mod render;
#[cfg(feature = "full")]
pub mod schema;
#[cfg(feature = "full")]
pub mod view;

pub use error::{MatrixError, MatrixResult};
pub use format::{CellFormat, Quote};
pub use model::{Contract, DateRange, DisplayMode, Matrix, OptionType, PriceField, RawTable};
pub use normalize::NormalizedTable;
pub use variant::SchemaVariant;
