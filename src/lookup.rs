//! Lookup Engine
//!
//! Resolves a user's selection into the first matching recommendation row.
//!
//! Matching is a conjunctive exact filter:
//! - `age` by value equality
//! - categorical keys after `normalize_key` on the input (tables are already
//!   normalized at construction)
//! - `a1c_level` by exact `Decimal` equality, no tolerance
//!
//! When several rows share the same keys the first one in table order wins.
//! `None` means no row matched; it is an ordinary outcome, not an error.

use rust_decimal::Decimal;
use serde::Deserialize;

use crate::tables::{Age, BpPlan, BpTable, DiabetesPlan, DiabetesTable};
use crate::utils::normalize_key;

/// Blood pressure lookup criteria
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct BpQuery {
    pub age: Age,
    pub gender: String,
    pub level: String,
}

impl BpQuery {
    pub fn new(age: impl Into<Age>, gender: impl Into<String>, level: impl Into<String>) -> Self {
        Self {
            age: age.into(),
            gender: gender.into(),
            level: level.into(),
        }
    }
}

/// Diabetes lookup criteria
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct DiabetesQuery {
    pub age: Age,
    pub gender: String,
    pub diabetes_type: String,
    pub a1c_level: Decimal,
}

impl DiabetesQuery {
    pub fn new(
        age: impl Into<Age>,
        gender: impl Into<String>,
        diabetes_type: impl Into<String>,
        a1c_level: Decimal,
    ) -> Self {
        Self {
            age: age.into(),
            gender: gender.into(),
            diabetes_type: diabetes_type.into(),
            a1c_level,
        }
    }
}

/// First BP row matching age, gender and blood pressure level.
pub fn find_bp_plan<'a>(table: &'a BpTable, query: &BpQuery) -> Option<&'a BpPlan> {
    let gender = normalize_key(&query.gender);
    let level = normalize_key(&query.level);

    table.iter().find(|row| {
        row.age == query.age && row.gender == gender && row.blood_pressure_level == level
    })
}

/// First diabetes row matching age, gender, diabetes type and A1C level.
pub fn find_diabetes_plan<'a>(
    table: &'a DiabetesTable,
    query: &DiabetesQuery,
) -> Option<&'a DiabetesPlan> {
    let gender = normalize_key(&query.gender);
    let diabetes_type = normalize_key(&query.diabetes_type);

    table.iter().find(|row| {
        row.age == query.age
            && row.gender == gender
            && row.diabetes_type == diabetes_type
            && row.a1c_level == Some(query.a1c_level)
    })
}
