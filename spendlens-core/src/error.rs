//! Error types shared by the library crates

use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("CSV file not found: {}", .0.display())]
    SourceNotFound(PathBuf),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid necessity score {score} for '{category}' (expected 0.0 to 1.0)")]
    InvalidNecessity { category: String, score: f64 },
}

pub type Result<T> = std::result::Result<T, Error>;
