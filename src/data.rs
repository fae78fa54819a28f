//! Reference Table Loading
//!
//! Loads the blood pressure and diabetes tables with Polars and converts them
//! into typed, immutable `ReferenceTable`s. Column names must match the
//! reference files exactly.

use std::path::Path;
use std::str::FromStr;

use polars::prelude::*;
use rust_decimal::Decimal;

use crate::config::DataConfig;
use crate::error::LoadError;
use crate::tables::{Age, BpPlan, BpTable, DiabetesPlan, DiabetesTable};
use crate::utils::{materialize_as_strings, scan_table, string_cell};

/// Blood pressure table columns, in file order
pub mod bp_columns {
    pub const AGE: &str = "Age";
    pub const GENDER: &str = "Gender";
    pub const LEVEL: &str = "Blood_Pressure_Level";
    pub const FOODS_TO_EAT: &str = "Foods_To_Eat";
    pub const FOODS_TO_AVOID: &str = "Foods_To_Avoid";
    pub const DRINKS: &str = "Recommended_Drinks";
    pub const SALT: &str = "Daily_Salt_Intake(g)";
    pub const SLEEP: &str = "Sleep_Hours";
    pub const EXERCISE_TYPE: &str = "Exercise_Type";
    pub const EXERCISE_DURATION: &str = "Exercise_Duration(min)";

    pub const ALL: [&str; 10] = [
        AGE, GENDER, LEVEL, FOODS_TO_EAT, FOODS_TO_AVOID, DRINKS, SALT, SLEEP,
        EXERCISE_TYPE, EXERCISE_DURATION,
    ];
}

/// Diabetes table columns, in file order (note the spaces before units)
pub mod diabetes_columns {
    pub const AGE: &str = "Age";
    pub const GENDER: &str = "Gender";
    pub const DIABETES_TYPE: &str = "Diabetes_Type";
    pub const A1C: &str = "A1C_Level (%)";
    pub const FOODS_TO_EAT: &str = "Foods_To_Eat";
    pub const FOODS_TO_AVOID: &str = "Foods_To_Avoid";
    pub const DRINKS: &str = "Recommended_Drinks";
    pub const CARBS: &str = "Daily_carbohydrates_Target (g)";
    pub const SLEEP: &str = "Sleep_Hours";
    pub const EXERCISE_TYPE: &str = "Exercise_Type";
    pub const EXERCISE_DURATION: &str = "Exercise_Duration (min)";

    pub const ALL: [&str; 11] = [
        AGE, GENDER, DIABETES_TYPE, A1C, FOODS_TO_EAT, FOODS_TO_AVOID, DRINKS,
        CARBS, SLEEP, EXERCISE_TYPE, EXERCISE_DURATION,
    ];
}

/// Both reference tables, loaded once and shared read-only
#[derive(Debug, Clone)]
pub struct ReferenceData {
    pub bp: BpTable,
    pub diabetes: DiabetesTable,
}

impl ReferenceData {
    /// Load both tables from the configured locations
    pub fn load(config: &DataConfig) -> Result<Self, LoadError> {
        let bp_path = config.bp_path();
        let diabetes_path = config.diabetes_path();

        tracing::info!("Loading BP table from {}", bp_path.display());
        let bp = load_bp_table(&bp_path)?;

        tracing::info!("Loading diabetes table from {}", diabetes_path.display());
        let diabetes = load_diabetes_table(&diabetes_path)?;

        tracing::info!("  BP rows: {}", bp.len());
        tracing::info!("  Diabetes rows: {}", diabetes.len());

        Ok(Self { bp, diabetes })
    }
}

/// Load the blood pressure table (`.xlsx`, `.csv` or `.parquet`)
pub fn load_bp_table(path: &Path) -> Result<BpTable, LoadError> {
    let lazy = scan_table(path)?;
    let df = materialize_as_strings(&lazy, &bp_columns::ALL, "BP table")?;
    bp_table_from_dataframe(&df)
}

/// Load the diabetes table (`.xlsx`, `.csv` or `.parquet`)
pub fn load_diabetes_table(path: &Path) -> Result<DiabetesTable, LoadError> {
    let lazy = scan_table(path)?;
    let df = materialize_as_strings(&lazy, &diabetes_columns::ALL, "Diabetes table")?;
    diabetes_table_from_dataframe(&df)
}

/// Build a BP table from a frame whose columns are all strings
fn bp_table_from_dataframe(df: &DataFrame) -> Result<BpTable, LoadError> {
    use bp_columns::{
        AGE, DRINKS, EXERCISE_DURATION, EXERCISE_TYPE, FOODS_TO_AVOID, FOODS_TO_EAT, GENDER,
        LEVEL, SALT, SLEEP,
    };

    let age = df.column(AGE)?.str()?;
    let gender = df.column(GENDER)?.str()?;
    let level = df.column(LEVEL)?.str()?;
    let foods_to_eat = df.column(FOODS_TO_EAT)?.str()?;
    let foods_to_avoid = df.column(FOODS_TO_AVOID)?.str()?;
    let drinks = df.column(DRINKS)?.str()?;
    let salt = df.column(SALT)?.str()?;
    let sleep = df.column(SLEEP)?.str()?;
    let exercise_type = df.column(EXERCISE_TYPE)?.str()?;
    let exercise_duration = df.column(EXERCISE_DURATION)?.str()?;

    let rows = (0..df.height())
        .map(|i| BpPlan {
            age: parse_age(&string_cell(age, i)),
            gender: string_cell(gender, i),
            blood_pressure_level: string_cell(level, i),
            foods_to_eat: string_cell(foods_to_eat, i),
            foods_to_avoid: string_cell(foods_to_avoid, i),
            recommended_drinks: string_cell(drinks, i),
            daily_salt_intake_g: string_cell(salt, i),
            sleep_hours: string_cell(sleep, i),
            exercise_type: string_cell(exercise_type, i),
            exercise_duration_min: string_cell(exercise_duration, i),
        })
        .collect();

    Ok(BpTable::from_rows(rows))
}

/// Build a diabetes table from a frame whose columns are all strings
fn diabetes_table_from_dataframe(df: &DataFrame) -> Result<DiabetesTable, LoadError> {
    use diabetes_columns::{
        A1C, AGE, CARBS, DIABETES_TYPE, DRINKS, EXERCISE_DURATION, EXERCISE_TYPE, FOODS_TO_AVOID,
        FOODS_TO_EAT, GENDER, SLEEP,
    };

    let age = df.column(AGE)?.str()?;
    let gender = df.column(GENDER)?.str()?;
    let diabetes_type = df.column(DIABETES_TYPE)?.str()?;
    let a1c = df.column(A1C)?.str()?;
    let foods_to_eat = df.column(FOODS_TO_EAT)?.str()?;
    let foods_to_avoid = df.column(FOODS_TO_AVOID)?.str()?;
    let drinks = df.column(DRINKS)?.str()?;
    let carbs = df.column(CARBS)?.str()?;
    let sleep = df.column(SLEEP)?.str()?;
    let exercise_type = df.column(EXERCISE_TYPE)?.str()?;
    let exercise_duration = df.column(EXERCISE_DURATION)?.str()?;

    let mut unreadable_a1c = 0usize;

    let rows = (0..df.height())
        .map(|i| {
            let a1c_level = a1c.get(i).and_then(|s| Decimal::from_str(s.trim()).ok());
            if a1c_level.is_none() {
                unreadable_a1c += 1;
            }

            DiabetesPlan {
                age: parse_age(&string_cell(age, i)),
                gender: string_cell(gender, i),
                diabetes_type: string_cell(diabetes_type, i),
                a1c_level,
                foods_to_eat: string_cell(foods_to_eat, i),
                foods_to_avoid: string_cell(foods_to_avoid, i),
                recommended_drinks: string_cell(drinks, i),
                daily_carbohydrates_target_g: string_cell(carbs, i),
                sleep_hours: string_cell(sleep, i),
                exercise_type: string_cell(exercise_type, i),
                exercise_duration_min: string_cell(exercise_duration, i),
            }
        })
        .collect();

    if unreadable_a1c > 0 {
        tracing::warn!("Diabetes table: {} rows with unreadable A1C level will never match", unreadable_a1c);
    }

    Ok(DiabetesTable::from_rows(rows))
}

fn parse_age(raw: &str) -> Age {
    Age::from(raw.to_string())
}
