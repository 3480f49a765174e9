//! spendlens-ingest: bank export loading and cell normalization.

pub mod normalize;
pub mod parsers;
pub mod types;

pub use parsers::bank_export::{parse_bank_export, parse_bank_export_reader};
pub use types::{ColumnSet, ParsedExport, RawTransaction};
