pub mod contract;
pub mod matrix;
pub mod range;
pub mod table;

pub use contract::{Contract, OptionType, PriceField};
pub use matrix::{ColumnSide, DisplayMode, Matrix, MatrixCell, MatrixColumn, MatrixRow};
pub use range::DateRange;
pub use table::RawTable;
