use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::error::Result;

fn default_input() -> PathBuf {
    PathBuf::from("AviationData.csv")
}

fn default_output() -> PathBuf {
    PathBuf::from("AviationData_cleaned.csv")
}

fn default_recency_years() -> i32 {
    40
}

fn default_min_make_count() -> usize {
    50
}

fn default_excluded_engine_types() -> Vec<String> {
    vec!["NONE".to_string(), "Hybrid Rocket".to_string()]
}

/// Run configuration, read from TOML.
///
/// ```toml
/// input = "data/AviationData.csv"
/// output = "data/AviationData_cleaned.csv"
///
/// [filters]
/// reference_year = 2023
/// recency_years = 40
/// min_make_count = 50
/// ```
#[derive(Debug, Clone, Deserialize)]
pub struct PipelineConfig {
    #[serde(default = "default_input")]
    pub input: PathBuf,
    #[serde(default = "default_output")]
    pub output: PathBuf,
    #[serde(default)]
    pub filters: FilterConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct FilterConfig {
    /// Effective "current" year of the dataset. Taken from the latest event
    /// date when unset.
    #[serde(default)]
    pub reference_year: Option<i32>,
    #[serde(default = "default_recency_years")]
    pub recency_years: i32,
    #[serde(default = "default_min_make_count")]
    pub min_make_count: usize,
    #[serde(default = "default_excluded_engine_types")]
    pub excluded_engine_types: Vec<String>,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            input: default_input(),
            output: default_output(),
            filters: FilterConfig::default(),
        }
    }
}

impl Default for FilterConfig {
    fn default() -> Self {
        Self {
            reference_year: None,
            recency_years: default_recency_years(),
            min_make_count: default_min_make_count(),
            excluded_engine_types: default_excluded_engine_types(),
        }
    }
}

impl PipelineConfig {
    pub fn from_toml_str(s: &str) -> Result<Self> {
        Ok(toml::from_str(s)?)
    }

    /// Load a config file. Relative `input`/`output` paths are resolved
    /// against the config file's directory.
    pub fn load(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path)?;
        let mut config = Self::from_toml_str(&text)?;
        if let Some(base) = path.parent() {
            if config.input.is_relative() {
                config.input = base.join(&config.input);
            }
            if config.output.is_relative() {
                config.output = base.join(&config.output);
            }
        }
        Ok(config)
    }
}
