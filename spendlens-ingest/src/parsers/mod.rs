//! Statement parsers. Each returns a [`crate::ParsedExport`].

pub mod bank_export;
