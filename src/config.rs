//! Data location configuration
//!
//! Read once at startup from the environment:
//! - `DATA_DIR` (default `data`)
//! - `BP_DATA_FILE` (default `High low BP data.xlsx`)
//! - `DIABETES_DATA_FILE` (default `Diabetic data.xlsx`)

use std::path::{Path, PathBuf};

pub const DEFAULT_DATA_DIR: &str = "data";
pub const DEFAULT_BP_FILE: &str = "High low BP data.xlsx";
pub const DEFAULT_DIABETES_FILE: &str = "Diabetic data.xlsx";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DataConfig {
    pub data_dir: PathBuf,
    pub bp_file: String,
    pub diabetes_file: String,
}

impl Default for DataConfig {
    fn default() -> Self {
        Self::new(DEFAULT_DATA_DIR)
    }
}

impl DataConfig {
    /// Default file names inside `data_dir`
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
            bp_file: DEFAULT_BP_FILE.to_string(),
            diabetes_file: DEFAULT_DIABETES_FILE.to_string(),
        }
    }

    pub fn from_env() -> Self {
        Self::from_vars(|key| std::env::var(key).ok())
    }

    /// Build from any variable source; unset or blank values fall back to defaults.
    pub fn from_vars<F>(var: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str, default: &str| {
            var(key)
                .filter(|v| !v.trim().is_empty())
                .unwrap_or_else(|| default.to_string())
        };

        Self {
            data_dir: PathBuf::from(get("DATA_DIR", DEFAULT_DATA_DIR)),
            bp_file: get("BP_DATA_FILE", DEFAULT_BP_FILE),
            diabetes_file: get("DIABETES_DATA_FILE", DEFAULT_DIABETES_FILE),
        }
    }

    /// Absolute file names are used as-is; relative ones resolve against `data_dir`.
    fn resolve(&self, file: &str) -> PathBuf {
        let path = Path::new(file);
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            self.data_dir.join(path)
        }
    }

    pub fn bp_path(&self) -> PathBuf {
        self.resolve(&self.bp_file)
    }

    pub fn diabetes_path(&self) -> PathBuf {
        self.resolve(&self.diabetes_file)
    }
}
