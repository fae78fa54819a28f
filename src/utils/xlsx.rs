//! Excel workbook reading
//!
//! The first worksheet is read with calamine and turned into a Polars
//! `DataFrame`: the first row is the header, every following row is data.
//! Columns whose cells are all numbers become `Int64` (all whole) or
//! `Float64`, anything else becomes `String`, so the string form after
//! `materialize_as_strings` matches the CSV reader's output for the same data.

use std::path::Path;

use calamine::{open_workbook, Data, Reader, Xlsx};
use polars::prelude::*;

use crate::error::LoadError;

static EMPTY_CELL: Data = Data::Empty;

/// Read the first worksheet of an `.xlsx` file into a `DataFrame`
pub fn read_first_sheet(path: &Path) -> Result<DataFrame, LoadError> {
    let mut workbook: Xlsx<_> = open_workbook(path)?;

    let range = workbook
        .worksheet_range_at(0)
        .ok_or_else(|| LoadError::EmptyWorkbook(path.to_path_buf()))??;

    let mut rows = range.rows();
    let header = rows
        .next()
        .ok_or_else(|| LoadError::EmptyWorkbook(path.to_path_buf()))?;

    let names: Vec<String> = header.iter().map(|cell| cell.to_string()).collect();
    let mut cells: Vec<Vec<&Data>> = vec![Vec::new(); names.len()];

    for row in rows {
        for (idx, column) in cells.iter_mut().enumerate() {
            column.push(row.get(idx).unwrap_or(&EMPTY_CELL));
        }
    }

    let columns: Vec<Column> = names
        .iter()
        .zip(&cells)
        .map(|(name, column)| sheet_column(name, column))
        .collect();

    tracing::debug!("Read {} rows from {}", range.height().saturating_sub(1), path.display());

    Ok(DataFrame::new(columns)?)
}

/// Build one typed column from a sheet column's cells
fn sheet_column(name: &str, cells: &[&Data]) -> Column {
    let numbers: Option<Vec<Option<f64>>> = cells
        .iter()
        .map(|cell| match cell {
            Data::Empty => Some(None),
            Data::Int(v) => Some(Some(*v as f64)),
            Data::Float(v) => Some(Some(*v)),
            _ => None,
        })
        .collect();

    match numbers {
        Some(values) if values.iter().flatten().all(|v| is_whole(*v)) => {
            let ints: Vec<Option<i64>> = values.iter().map(|v| v.map(|v| v as i64)).collect();
            Column::new(name.into(), ints)
        }
        Some(values) => Column::new(name.into(), values),
        None => {
            let strings: Vec<Option<String>> = cells
                .iter()
                .map(|cell| match cell {
                    Data::Empty => None,
                    other => Some(other.to_string()),
                })
                .collect();
            Column::new(name.into(), strings)
        }
    }
}

fn is_whole(value: f64) -> bool {
    value.is_finite() && value.fract() == 0.0 && value.abs() < i64::MAX as f64
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn fixture(name: &str) -> PathBuf {
        PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures").join(name)
    }

    #[test]
    fn test_reads_header_and_rows() {
        let df = read_first_sheet(&fixture("High low BP data.xlsx")).unwrap();

        assert_eq!(df.height(), 6);
        assert_eq!(df.width(), 10);
        assert_eq!(df.get_column_names()[2].as_str(), "Blood_Pressure_Level");
    }

    #[test]
    fn test_column_types_follow_cells() {
        let df = read_first_sheet(&fixture("High low BP data.xlsx")).unwrap();

        assert_eq!(df.column("Age").unwrap().dtype(), &DataType::Int64);
        assert_eq!(df.column("Daily_Salt_Intake(g)").unwrap().dtype(), &DataType::Float64);
        assert_eq!(df.column("Gender").unwrap().dtype(), &DataType::String);
    }

    #[test]
    fn test_sheet_column_mixed_cells_fall_back_to_strings() {
        let cells = [Data::Float(45.0), Data::String("40-49".to_string()), Data::Empty];
        let refs: Vec<&Data> = cells.iter().collect();

        let column = sheet_column("Age", &refs);
        let values = column.str().unwrap();
        assert_eq!(values.get(0), Some("45"));
        assert_eq!(values.get(1), Some("40-49"));
        assert_eq!(values.get(2), None);
    }

    #[test]
    fn test_missing_workbook_is_an_error() {
        assert!(read_first_sheet(&fixture("nope.xlsx")).is_err());
    }
}
