//! LazyFrame helpers with column validation
//!
//! Reference tables are read through Polars and materialized with every
//! required column cast to `String`. Payload cells are returned verbatim, so
//! the string form is what callers see.

use std::path::Path;

use polars::prelude::*;

use crate::error::LoadError;
use crate::utils::xlsx::read_first_sheet;

/// Open a reference table lazily, dispatching on file extension.
///
/// `.csv` files go through the eager CSV reader (header row required),
/// `.parquet` files are scanned, `.xlsx` workbooks are read from their first
/// sheet.
pub fn scan_table(path: &Path) -> Result<LazyFrame, LoadError> {
    if !path.exists() {
        return Err(LoadError::MissingFile(path.to_path_buf()));
    }

    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase());

    match extension.as_deref() {
        Some("csv") => {
            let df = CsvReadOptions::default()
                .with_has_header(true)
                .try_into_reader_with_file_path(Some(path.to_path_buf()))?
                .finish()?;
            Ok(df.lazy())
        }
        Some("parquet") => Ok(LazyFrame::scan_parquet(path, Default::default())?),
        Some("xlsx") => Ok(read_first_sheet(path)?.lazy()),
        _ => Err(LoadError::UnsupportedFormat(path.to_path_buf())),
    }
}

/// Materialize the named columns as strings, validating the schema first
///
/// # Arguments
/// * `lazy` - LazyFrame to materialize
/// * `columns` - Required column names, exactly as they appear in the file
/// * `context` - Table name for error messages (e.g., "BP table")
///
/// # Errors
/// `LoadError::MissingColumn` for the first required column absent from the
/// schema; `LoadError::Polars` if the collect fails.
pub fn materialize_as_strings(
    lazy: &LazyFrame,
    columns: &[&str],
    context: &str,
) -> Result<DataFrame, LoadError> {
    let schema = lazy.clone().collect_schema()?;

    if let Some(missing) = columns.iter().find(|&&name| schema.get(name).is_none()) {
        return Err(LoadError::MissingColumn {
            table: context.to_string(),
            column: missing.to_string(),
        });
    }

    let exprs: Vec<Expr> = columns
        .iter()
        .map(|&name| col(name).cast(DataType::String))
        .collect();

    let df = lazy.clone().select(exprs).collect()?;
    Ok(df)
}

/// Read one cell of a string column; nulls become the empty string.
pub fn string_cell(column: &StringChunked, idx: usize) -> String {
    column.get(idx).map(str::to_string).unwrap_or_default()
}
