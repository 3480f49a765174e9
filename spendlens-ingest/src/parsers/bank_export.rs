//! Generic bank export parser (CSV with a header row)
//!
//! Recognized columns, matched case-insensitively and in any order:
//!   Date, Amount, Category, Description
//! Every column is optional and extra columns are ignored.

use csv::{ByteRecord, ReaderBuilder};
use spendlens_core::{Error, Notice, Result};
use std::io::Read;
use std::path::Path;
use tracing::debug;

use crate::normalize::{
    DEFAULT_CATEGORY, DEFAULT_DESCRIPTION, is_blank, parse_amount, parse_date,
    sanitize_description, text_or,
};
use crate::types::{ColumnSet, ParsedExport, RawTransaction};

#[derive(Debug, Default)]
struct ColumnIndex {
    date: Option<usize>,
    amount: Option<usize>,
    category: Option<usize>,
    description: Option<usize>,
}

impl ColumnIndex {
    fn from_headers(headers: &ByteRecord) -> Self {
        let mut idx = ColumnIndex::default();
        for (i, raw) in headers.iter().enumerate() {
            let name = String::from_utf8_lossy(raw);
            let name = name.trim().trim_start_matches('\u{feff}').to_lowercase();
            let slot = match name.as_str() {
                "date" => &mut idx.date,
                "amount" => &mut idx.amount,
                "category" => &mut idx.category,
                "description" => &mut idx.description,
                _ => continue,
            };
            // first occurrence wins
            if slot.is_none() {
                *slot = Some(i);
            }
        }
        idx
    }

    fn columns(&self) -> ColumnSet {
        ColumnSet {
            date: self.date.is_some(),
            amount: self.amount.is_some(),
            category: self.category.is_some(),
            description: self.description.is_some(),
        }
    }
}

fn cell(record: &ByteRecord, idx: Option<usize>) -> Option<String> {
    idx.and_then(|i| record.get(i))
        .map(|b| String::from_utf8_lossy(b).into_owned())
}

/// Parse a bank export file.
///
/// A missing file is [`Error::SourceNotFound`]; malformed cells never fail.
pub fn parse_bank_export(path: impl AsRef<Path>) -> Result<ParsedExport> {
    let path = path.as_ref();
    if !path.exists() {
        return Err(Error::SourceNotFound(path.to_path_buf()));
    }
    let file = std::fs::File::open(path)?;
    let parsed = parse_bank_export_reader(file)?;
    debug!(
        path = %path.display(),
        rows = parsed.rows.len(),
        "parsed bank export"
    );
    Ok(parsed)
}

/// Parse a bank export from any reader
pub fn parse_bank_export_reader<R: Read>(reader: R) -> Result<ParsedExport> {
    let mut rdr = ReaderBuilder::new()
        .flexible(true)
        .has_headers(true)
        .from_reader(reader);

    let headers = rdr.byte_headers()?.clone();
    let idx = ColumnIndex::from_headers(&headers);
    let columns = idx.columns();
    debug!(?columns, header_count = headers.len(), "resolved columns");

    let mut out = ParsedExport {
        columns,
        ..ParsedExport::default()
    };

    if !columns.date {
        out.notices.push(Notice::info("No 'Date' column found; dates left empty"));
    }
    if !columns.amount {
        out.notices.push(Notice::info("No 'Amount' column found; amounts set to 0.00"));
    }
    if !columns.category {
        out.notices.push(Notice::info(format!(
            "No 'Category' column found; using '{}'",
            DEFAULT_CATEGORY
        )));
    }
    if !columns.description {
        out.notices.push(Notice::info(format!(
            "No 'Description' column found; using '{}'",
            DEFAULT_DESCRIPTION
        )));
    }

    for (row, result) in rdr.byte_records().enumerate() {
        let record = result?;

        let date_raw = cell(&record, idx.date).filter(|s| !is_blank(s));
        let date = date_raw.as_deref().and_then(parse_date);
        if let Some(raw) = &date_raw {
            out.date_values += 1;
            if date.is_none() {
                out.unparsed_dates += 1;
                debug!(row, value = %raw, "unparseable date");
            }
        }

        let amount = match cell(&record, idx.amount).filter(|s| !is_blank(s)) {
            Some(raw) => parse_amount(&raw).unwrap_or_else(|| {
                out.unparsed_amounts += 1;
                debug!(row, value = %raw, "unparseable amount");
                0.0
            }),
            None => 0.0,
        };

        let category = text_or(cell(&record, idx.category).as_deref(), DEFAULT_CATEGORY);
        let description = sanitize_description(&text_or(
            cell(&record, idx.description).as_deref(),
            DEFAULT_DESCRIPTION,
        ));

        out.rows.push(RawTransaction {
            row,
            date,
            amount,
            category,
            description,
        });
    }

    // A Date column with no readable value at all is reported by validation.
    if out.unparsed_dates > 0 && !out.date_column_unreadable() {
        out.notices.push(Notice::warning(format!(
            "{} date value(s) could not be parsed and were left empty",
            out.unparsed_dates
        )));
    }
    if out.unparsed_amounts > 0 {
        out.notices.push(Notice::warning(format!(
            "{} amount value(s) could not be parsed and were set to 0.00",
            out.unparsed_amounts
        )));
    }

    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use std::io::Write;

    fn parse(text: &str) -> ParsedExport {
        parse_bank_export_reader(text.as_bytes()).unwrap()
    }

    #[test]
    fn test_parse_basic_export() {
        let p = parse(
            "Date,Amount,Category,Description\n\
             2024-01-05,-50,Groceries,Store A\n\
             2024-01-10,2000,Salary,Employer\n",
        );
        assert_eq!(p.rows.len(), 2);
        assert!(p.notices.is_empty());
        assert_eq!(p.rows[0].row, 0);
        assert_eq!(p.rows[0].date, NaiveDate::from_ymd_opt(2024, 1, 5));
        assert_eq!(p.rows[0].amount, -50.0);
        assert_eq!(p.rows[0].category, "Groceries");
        assert_eq!(p.rows[1].description, "Employer");
    }

    #[test]
    fn test_headers_any_order_and_case() {
        let p = parse(
            " description ,CATEGORY,amount,Date,Memo\n\
             Coffee,Dining,-4.5,2024-03-01,ignored\n",
        );
        let r = &p.rows[0];
        assert_eq!(r.description, "Coffee");
        assert_eq!(r.category, "Dining");
        assert_eq!(r.amount, -4.5);
        assert_eq!(r.date, NaiveDate::from_ymd_opt(2024, 3, 1));
    }

    #[test]
    fn test_missing_columns_default() {
        let p = parse("Date\n2024-01-05\n2024-01-06\n");
        assert!(!p.columns.amount);
        assert!(p.rows.iter().all(|r| r.amount == 0.0));
        assert!(p.rows.iter().all(|r| r.category == "Other"));
        assert!(p.rows.iter().all(|r| r.description == "Unknown"));
        assert_eq!(p.notices.len(), 3);
    }

    #[test]
    fn test_blank_cells_default() {
        let p = parse("Date,Amount,Category,Description\n,,,\n");
        let r = &p.rows[0];
        assert_eq!(r.date, None);
        assert_eq!(r.amount, 0.0);
        assert_eq!(r.category, "Other");
        assert_eq!(r.description, "Unknown");
        assert_eq!(p.unparsed_dates, 0);
        assert_eq!(p.unparsed_amounts, 0);
        assert!(p.notices.is_empty());
    }

    #[test]
    fn test_malformed_cells_are_counted_not_fatal() {
        let p = parse(
            "Date,Amount,Category,Description\n\
             not-a-date,abc,Dining,Lunch\n\
             2024-01-02,-10,Dining,Lunch\n",
        );
        assert_eq!(p.rows.len(), 2);
        assert_eq!(p.rows[0].date, None);
        assert_eq!(p.rows[0].amount, 0.0);
        assert_eq!(p.unparsed_dates, 1);
        assert_eq!(p.unparsed_amounts, 1);
        assert!(!p.date_column_unreadable());
        assert_eq!(p.notices.len(), 2);
        assert!(p.notices.iter().all(|n| n.is_warning()));
    }

    #[test]
    fn test_fully_unreadable_date_column() {
        let p = parse("Date,Amount\nsoon,-1\nlater,-2\n");
        assert!(p.date_column_unreadable());
        // left for validation to report; only the missing-column notices remain
        assert!(!p.notices.iter().any(|n| n.is_warning()));
        assert_eq!(p.notices.len(), 2);
    }

    #[test]
    fn test_short_rows_and_non_utf8() {
        let mut bytes = b"Date,Amount,Category,Description\n2024-01-05,-3\n".to_vec();
        bytes.extend_from_slice(b"2024-01-06,-4,Dining,Caf\xe9\n");
        let p = parse_bank_export_reader(bytes.as_slice()).unwrap();
        assert_eq!(p.rows.len(), 2);
        assert_eq!(p.rows[0].category, "Other");
        assert_eq!(p.rows[0].description, "Unknown");
        assert_eq!(p.rows[1].description, "Caf?");
    }

    #[test]
    fn test_missing_file_is_source_not_found() {
        let err = parse_bank_export("/definitely/not/here.csv").unwrap_err();
        assert!(matches!(err, Error::SourceNotFound(_)));
    }

    #[test]
    fn test_parse_from_file() {
        let mut f = tempfile::NamedTempFile::new().unwrap();
        writeln!(f, "Date,Amount,Category,Description").unwrap();
        writeln!(f, "2024-02-05,-50,Groceries,Store A").unwrap();
        let p = parse_bank_export(f.path()).unwrap();
        assert_eq!(p.rows.len(), 1);
        assert_eq!(p.rows[0].amount, -50.0);
    }
}
