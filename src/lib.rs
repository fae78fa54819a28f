//! Health Plan Lookup
//!
//! Looks up precomputed diet, drink, sleep and exercise recommendations for
//! blood pressure and diabetes from two static reference tables.
//!
//! Layout:
//! - `config`: data file locations
//! - `data`: table loading with Polars
//! - `tables`: typed immutable tables and row types
//! - `lookup`: first-match conjunctive lookups
//! - `a1c`: selectable A1C level generator
//! - `report`: section rendering for the front ends
//! - `api_server`: Axum JSON API (feature `api`)

pub mod a1c;
pub mod config;
pub mod data;
pub mod error;
pub mod lookup;
pub mod report;
pub mod tables;
pub mod utils;

#[cfg(feature = "api")]
pub mod api_server;

// Re-export commonly used types
pub use a1c::{a1c_options, generate_range, A1cRange};
pub use config::DataConfig;
pub use data::{load_bp_table, load_diabetes_table, ReferenceData};
pub use error::LoadError;
pub use lookup::{find_bp_plan, find_diabetes_plan, BpQuery, DiabetesQuery};
pub use tables::{Age, BpPlan, BpTable, Condition, DiabetesPlan, DiabetesTable, ReferenceTable};

#[cfg(feature = "api")]
pub use api_server::{create_router, AppState};
