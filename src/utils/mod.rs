//! Utility modules shared by the loader and lookups
//!
//! - Normalization: categorical key normalization
//! - LazyFrame helpers: table scanning and string materialization with column validation
//! - Xlsx: first-sheet workbook reading

pub mod normalization;
pub mod lazy_helpers;
pub mod xlsx;

// Re-export commonly used helpers
pub use normalization::{normalize_key, normalize_key_in_place};
pub use lazy_helpers::{materialize_as_strings, scan_table, string_cell};
