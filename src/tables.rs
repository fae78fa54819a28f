//! Reference Tables
//!
//! Typed, immutable in-memory tables for the two recommendation domains.
//! Rows keep their original file order; that order is the tie-break when
//! several rows share the same key attributes.

use std::collections::BTreeSet;
use std::convert::Infallible;
use std::fmt;
use std::str::FromStr;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize, Serializer};

use crate::utils::normalize_key_in_place;

// ============================================================================
// Key types
// ============================================================================

/// Age key: either whole years or a categorical bucket such as "40-49".
///
/// Table cells and user input are parsed with the same `FromStr`, so "45"
/// and "45.0" both become `Years(45)` on either side.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Deserialize)]
#[serde(from = "String")]
pub enum Age {
    Years(i64),
    Bucket(String),
}

impl FromStr for Age {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();

        if let Ok(years) = trimmed.parse::<i64>() {
            return Ok(Age::Years(years));
        }

        // Integer ages stored in a float column (e.g. because of blanks)
        if let Ok(value) = trimmed.parse::<f64>() {
            if value.is_finite() && value.fract() == 0.0 && value.abs() < i64::MAX as f64 {
                return Ok(Age::Years(value as i64));
            }
        }

        Ok(Age::Bucket(trimmed.to_string()))
    }
}

impl From<String> for Age {
    fn from(raw: String) -> Self {
        match raw.parse() {
            Ok(age) => age,
            Err(never) => match never {},
        }
    }
}

impl From<i64> for Age {
    fn from(years: i64) -> Self {
        Age::Years(years)
    }
}

impl From<i32> for Age {
    fn from(years: i32) -> Self {
        Age::Years(i64::from(years))
    }
}

impl fmt::Display for Age {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Age::Years(years) => write!(f, "{}", years),
            Age::Bucket(bucket) => f.write_str(bucket),
        }
    }
}

impl Serialize for Age {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Age::Years(years) => serializer.serialize_i64(*years),
            Age::Bucket(bucket) => serializer.serialize_str(bucket),
        }
    }
}

/// Health condition offered to the user
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Condition {
    #[serde(rename = "Blood Pressure")]
    BloodPressure,
    #[serde(rename = "Diabetes")]
    Diabetes,
}

impl Condition {
    pub const ALL: [Condition; 2] = [Condition::BloodPressure, Condition::Diabetes];

    /// Display label, as shown in the condition picker
    pub fn label(&self) -> &'static str {
        match self {
            Condition::BloodPressure => "Blood Pressure",
            Condition::Diabetes => "Diabetes",
        }
    }

    /// Short dataset name used in "not found" messages
    pub fn dataset_name(&self) -> &'static str {
        match self {
            Condition::BloodPressure => "BP",
            Condition::Diabetes => "Diabetes",
        }
    }
}

// ============================================================================
// Rows
// ============================================================================

/// Blood pressure recommendation row
///
/// Key attributes: `age`, `gender`, `blood_pressure_level`.
/// Everything else is payload and is returned as read from the file.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BpPlan {
    pub age: Age,
    pub gender: String,
    pub blood_pressure_level: String,

    pub foods_to_eat: String,
    pub foods_to_avoid: String,
    pub recommended_drinks: String,
    pub daily_salt_intake_g: String,
    pub sleep_hours: String,
    pub exercise_type: String,
    pub exercise_duration_min: String,
}

/// Diabetes recommendation row
///
/// Key attributes: `age`, `gender`, `diabetes_type`, `a1c_level`.
/// `a1c_level` is `None` when the cell could not be read as a decimal; such
/// a row can never be matched.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DiabetesPlan {
    pub age: Age,
    pub gender: String,
    pub diabetes_type: String,
    pub a1c_level: Option<Decimal>,

    pub foods_to_eat: String,
    pub foods_to_avoid: String,
    pub recommended_drinks: String,
    pub daily_carbohydrates_target_g: String,
    pub sleep_hours: String,
    pub exercise_type: String,
    pub exercise_duration_min: String,
}

/// Rows whose categorical keys are normalized when a table is built.
pub trait KeyedRow {
    fn normalize_keys(&mut self);
}

impl KeyedRow for BpPlan {
    fn normalize_keys(&mut self) {
        normalize_key_in_place(&mut self.gender);
        normalize_key_in_place(&mut self.blood_pressure_level);
    }
}

impl KeyedRow for DiabetesPlan {
    fn normalize_keys(&mut self) {
        normalize_key_in_place(&mut self.gender);
        normalize_key_in_place(&mut self.diabetes_type);
    }
}

// ============================================================================
// Tables
// ============================================================================

/// Ordered, immutable sequence of rows of one flavour.
///
/// There is no way to add, remove, or mutate rows after construction.
#[derive(Debug, Clone)]
pub struct ReferenceTable<R> {
    rows: Vec<R>,
}

impl<R> Default for ReferenceTable<R> {
    fn default() -> Self {
        Self { rows: Vec::new() }
    }
}

pub type BpTable = ReferenceTable<BpPlan>;
pub type DiabetesTable = ReferenceTable<DiabetesPlan>;

impl<R: KeyedRow> ReferenceTable<R> {
    /// Build a table, normalizing every row's categorical keys.
    pub fn from_rows(mut rows: Vec<R>) -> Self {
        for row in &mut rows {
            row.normalize_keys();
        }
        Self { rows }
    }
}

impl<R> ReferenceTable<R> {
    pub fn rows(&self) -> &[R] {
        &self.rows
    }

    pub fn iter(&self) -> std::slice::Iter<'_, R> {
        self.rows.iter()
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    fn distinct_sorted<T, F>(&self, key: F) -> Vec<T>
    where
        T: Ord,
        F: Fn(&R) -> T,
    {
        self.rows
            .iter()
            .map(key)
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }
}

impl BpTable {
    /// Distinct ages, sorted
    pub fn ages(&self) -> Vec<Age> {
        self.distinct_sorted(|row| row.age.clone())
    }

    /// Distinct (normalized) genders, sorted
    pub fn genders(&self) -> Vec<String> {
        self.distinct_sorted(|row| row.gender.clone())
    }

    /// Distinct (normalized) blood pressure levels, sorted
    pub fn levels(&self) -> Vec<String> {
        self.distinct_sorted(|row| row.blood_pressure_level.clone())
    }
}

impl DiabetesTable {
    /// Distinct ages, sorted
    pub fn ages(&self) -> Vec<Age> {
        self.distinct_sorted(|row| row.age.clone())
    }

    /// Distinct (normalized) genders, sorted
    pub fn genders(&self) -> Vec<String> {
        self.distinct_sorted(|row| row.gender.clone())
    }

    /// Distinct (normalized) diabetes types, sorted
    pub fn diabetes_types(&self) -> Vec<String> {
        self.distinct_sorted(|row| row.diabetes_type.clone())
    }
}
