// Lookup Integration Tests
//
// Purpose: Load the CSV and XLSX fixtures through Polars and exercise both lookups
// Run with: cargo test --test lookup_integration_tests

use std::path::PathBuf;
use std::str::FromStr;

use health_plan_rust::{
    a1c_options, find_bp_plan, find_diabetes_plan, load_bp_table, load_diabetes_table, Age,
    BpQuery, DataConfig, DiabetesQuery, LoadError, ReferenceData,
};
use rust_decimal::Decimal;

fn fixtures_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures")
}

fn csv_config() -> DataConfig {
    DataConfig {
        bp_file: "bp_data.csv".to_string(),
        diabetes_file: "diabetes_data.csv".to_string(),
        ..DataConfig::new(fixtures_dir())
    }
}

fn load_fixtures() -> ReferenceData {
    ReferenceData::load(&csv_config()).expect("fixtures should load")
}

fn dec(s: &str) -> Decimal {
    Decimal::from_str(s).unwrap()
}

// =========================================================================
// Section 1: Loading
// =========================================================================

#[test]
fn test_fixtures_load_in_file_order() {
    let data = load_fixtures();

    assert_eq!(data.bp.len(), 6);
    assert_eq!(data.diabetes.len(), 42);

    let first = &data.bp.rows()[0];
    assert_eq!(first.age, Age::Years(30));
    assert_eq!(first.gender, "male");
    assert_eq!(first.blood_pressure_level, "normal");
    assert_eq!(first.foods_to_eat, "Vegetables, fruits, whole grains");
}

#[test]
fn test_categorical_columns_are_lowercased() {
    let data = load_fixtures();

    assert_eq!(data.bp.genders(), vec!["female", "male"]);
    assert_eq!(data.bp.levels(), vec!["high", "low", "normal"]);
    assert_eq!(data.diabetes.diabetes_types(), vec!["type 1", "type 2"]);
}

#[test]
fn test_missing_file_is_reported() {
    let err = load_bp_table(&fixtures_dir().join("nope.csv")).unwrap_err();
    assert!(matches!(err, LoadError::MissingFile(_)));
}

#[test]
fn test_missing_column_is_reported() {
    let err = load_bp_table(&fixtures_dir().join("bp_missing_columns.csv")).unwrap_err();
    match err {
        LoadError::MissingColumn { column, .. } => assert_eq!(column, "Blood_Pressure_Level"),
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn test_column_names_are_exact() {
    // The BP file has no Diabetes_Type / A1C columns
    let err = load_diabetes_table(&fixtures_dir().join("bp_data.csv")).unwrap_err();
    assert!(matches!(err, LoadError::MissingColumn { .. }));
}

// =========================================================================
// Section 2: Blood pressure lookups
// =========================================================================

#[test]
fn test_bp_lookup_returns_payload() {
    let data = load_fixtures();

    let plan = find_bp_plan(&data.bp, &BpQuery::new(45, "female", "high"))
        .expect("row should match");

    assert_eq!(plan.foods_to_eat, "Leafy greens, oats, bananas");
    assert_eq!(plan.foods_to_avoid, "Pickles, chips, canned soup");
    assert_eq!(plan.recommended_drinks, "Water, hibiscus tea");
    assert_eq!(plan.daily_salt_intake_g, "3.5");
    assert_eq!(plan.sleep_hours, "8");
    assert_eq!(plan.exercise_type, "Brisk walking");
    assert_eq!(plan.exercise_duration_min, "40");
}

#[test]
fn test_bp_absent_level_is_not_found() {
    let data = load_fixtures();
    assert!(find_bp_plan(&data.bp, &BpQuery::new(45, "female", "extreme")).is_none());
}

#[test]
fn test_bp_mixed_case_input() {
    let data = load_fixtures();
    let plan = find_bp_plan(&data.bp, &BpQuery::new(60, "Male", "LOW")).unwrap();
    assert_eq!(plan.exercise_type, "Yoga");
}

#[test]
fn test_bp_duplicate_keys_return_first_row() {
    let data = load_fixtures();
    let query = BpQuery::new(45, "female", "high");

    let first = find_bp_plan(&data.bp, &query).unwrap();
    let again = find_bp_plan(&data.bp, &query).unwrap();

    assert!(std::ptr::eq(first, &data.bp.rows()[1]));
    assert!(std::ptr::eq(first, again));
}

#[test]
fn test_bp_every_row_round_trips_to_first_with_same_keys() {
    let data = load_fixtures();

    for row in data.bp.iter() {
        let query = BpQuery::new(row.age.clone(), &row.gender, &row.blood_pressure_level);
        let found = find_bp_plan(&data.bp, &query).expect("row keys should match");
        let first = data
            .bp
            .iter()
            .find(|r| {
                r.age == row.age
                    && r.gender == row.gender
                    && r.blood_pressure_level == row.blood_pressure_level
            })
            .unwrap();

        // Payload included
        assert_eq!(found, first);
        assert!(std::ptr::eq(found, first));
    }
}

// =========================================================================
// Section 3: Diabetes lookups
// =========================================================================

#[test]
fn test_diabetes_lookup_returns_payload() {
    let data = load_fixtures();

    let query = DiabetesQuery::new(30, "male", "type 1", dec("7.2"));
    let plan = find_diabetes_plan(&data.diabetes, &query).expect("row should match");

    assert_eq!(plan.foods_to_eat, "Plan for A1C 7.2");
    assert_eq!(plan.daily_carbohydrates_target_g, "128");
    assert_eq!(plan.a1c_level, Some(dec("7.2")));
}

#[test]
fn test_diabetes_off_grid_a1c_is_not_found() {
    let data = load_fixtures();
    let query = DiabetesQuery::new(30, "male", "type 1", dec("7.25"));
    assert!(find_diabetes_plan(&data.diabetes, &query).is_none());
}

#[test]
fn test_every_generated_a1c_matches_the_fixture() {
    let data = load_fixtures();

    for a1c in a1c_options() {
        let query = DiabetesQuery::new(30, "male", "type 1", a1c);
        let plan = find_diabetes_plan(&data.diabetes, &query);
        assert!(plan.is_some(), "no row for generated A1C {}", a1c);
        assert_eq!(plan.unwrap().foods_to_eat, format!("Plan for A1C {}", a1c));
    }
}

#[test]
fn test_diabetes_duplicate_keys_return_first_row() {
    let data = load_fixtures();
    let query = DiabetesQuery::new(50, "female", "Type 2", dec("8.4"));
    let plan = find_diabetes_plan(&data.diabetes, &query).unwrap();
    assert_eq!(plan.foods_to_eat, "Whole grains, legumes");
}

#[test]
fn test_diabetes_every_row_round_trips_to_first_with_same_keys() {
    let data = load_fixtures();

    for row in data.diabetes.iter() {
        let a1c = row.a1c_level.expect("fixture A1C levels are readable");
        let query = DiabetesQuery::new(row.age.clone(), &row.gender, &row.diabetes_type, a1c);
        let found = find_diabetes_plan(&data.diabetes, &query).expect("row keys should match");
        let first = data
            .diabetes
            .iter()
            .find(|r| {
                r.age == row.age
                    && r.gender == row.gender
                    && r.diabetes_type == row.diabetes_type
                    && r.a1c_level == row.a1c_level
            })
            .unwrap();

        assert_eq!(found, first);
        assert_eq!(found.foods_to_eat, first.foods_to_eat);
        assert_eq!(found.daily_carbohydrates_target_g, first.daily_carbohydrates_target_g);
    }
}

// =========================================================================
// Section 4: Excel workbooks
// =========================================================================

#[test]
fn test_default_config_loads_the_workbooks() {
    // Default file names are the original workbook names
    let data = ReferenceData::load(&DataConfig::new(fixtures_dir())).expect("workbooks should load");

    assert_eq!(data.bp.len(), 6);
    assert_eq!(data.diabetes.len(), 42);
}

#[test]
fn test_workbooks_match_csv_tables() {
    let csv = load_fixtures();
    let xlsx = ReferenceData::load(&DataConfig::new(fixtures_dir())).unwrap();

    assert_eq!(xlsx.bp.rows(), csv.bp.rows());
    assert_eq!(xlsx.diabetes.rows(), csv.diabetes.rows());
}

#[test]
fn test_workbook_lookups() {
    let data = ReferenceData::load(&DataConfig::new(fixtures_dir())).unwrap();

    let bp = find_bp_plan(&data.bp, &BpQuery::new(45, "Female", "High")).unwrap();
    assert_eq!(bp.foods_to_eat, "Leafy greens, oats, bananas");
    assert_eq!(bp.daily_salt_intake_g, "3.5");

    for a1c in a1c_options() {
        let query = DiabetesQuery::new(30, "male", "type 1", a1c);
        assert!(find_diabetes_plan(&data.diabetes, &query).is_some(), "no row for {}", a1c);
    }
}

#[test]
fn test_workbook_missing_column_is_reported() {
    let err = load_diabetes_table(&fixtures_dir().join("High low BP data.xlsx")).unwrap_err();
    assert!(matches!(err, LoadError::MissingColumn { .. }));
}
