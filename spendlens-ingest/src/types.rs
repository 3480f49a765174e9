use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use spendlens_core::Notice;

/// A normalized row, before validation.
/// Every field is present; defaults are already filled in.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawTransaction {
    /// Zero-based data row (header excluded)
    pub row: usize,
    pub date: Option<NaiveDate>,
    /// Signed as exported; 0.0 when the cell was blank or unparseable
    pub amount: f64,
    pub category: String,
    /// Already sanitized to printable ASCII
    pub description: String,
}

/// Which of the known columns the source file carried
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnSet {
    pub date: bool,
    pub amount: bool,
    pub category: bool,
    pub description: bool,
}

/// Output of a parser: rows plus what had to be defaulted
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ParsedExport {
    pub rows: Vec<RawTransaction>,
    pub columns: ColumnSet,
    /// Non-blank cells in the Date column
    pub date_values: usize,
    /// Non-blank Date cells that did not parse
    pub unparsed_dates: usize,
    /// Non-blank Amount cells that did not parse
    pub unparsed_amounts: usize,
    /// Ingestion notices, in the order they were raised
    pub notices: Vec<Notice>,
}

impl ParsedExport {
    /// True when the Date column exists and none of its values parsed
    pub fn date_column_unreadable(&self) -> bool {
        self.columns.date && self.date_values > 0 && self.unparsed_dates == self.date_values
    }
}
