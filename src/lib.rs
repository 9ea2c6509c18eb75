//! Cleaning and filtering pipeline for aviation accident records.
//!
//! Raw CSV rows are read into typed [`Accident`] records, threaded through the
//! ordered cleaning [`STAGES`](pipeline::STAGES), reduced by the
//! [`FilterCascade`], and written out as a fixed column projection.

pub mod aliases;
pub mod config;
pub mod derive;
pub mod error;
pub mod filter;
pub mod io;
pub mod normalize;
pub mod pipeline;
pub mod record;
pub mod schema;

#[cfg(feature = "python")]
mod python;

pub use config::{FilterConfig, PipelineConfig};
pub use error::{PrepError, Result};
pub use filter::{FilterCascade, FilterReport, StepCount};
pub use pipeline::{clean, clean_frame, run, run_stages, RunSummary};
pub use record::{
    Accident, AccidentTable, AircraftCategory, AmateurBuilt, EngineConfiguration, Retention,
    WeatherCondition,
};
