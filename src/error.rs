use std::path::PathBuf;

use polars::prelude::PolarsError;
use thiserror::Error;

/// Failures while loading a reference table.
///
/// Lookups themselves never fail: a missing match is `None`, not an error.
#[derive(Error, Debug)]
pub enum LoadError {
    /// The configured table file does not exist.
    #[error("reference table not found: {0}")]
    MissingFile(PathBuf),

    /// File extension is not `.csv`, `.parquet` or `.xlsx`.
    #[error("unsupported reference table format: {0} (expected .csv, .parquet or .xlsx)")]
    UnsupportedFormat(PathBuf),

    /// The workbook has no worksheet, or its first worksheet has no header row.
    #[error("workbook has no readable sheet: {0}")]
    EmptyWorkbook(PathBuf),

    /// A required column is absent from the file header.
    #[error("{table}: missing column '{column}'")]
    MissingColumn { table: String, column: String },

    /// Propagated calamine workbook failure.
    #[error("xlsx error: {0}")]
    Xlsx(#[from] calamine::XlsxError),

    /// Propagated Polars read/collect failure.
    #[error("polars error: {0}")]
    Polars(#[from] PolarsError),
}
