use std::path::PathBuf;

use pyo3::prelude::*;
use pyo3::types::PyModule;
use pyo3_polars::PyDataFrame;

use crate::config::{FilterConfig, PipelineConfig};
use crate::schema::{derived, export, injuries, source};
use crate::{io, pipeline};

/// Read a raw accident CSV with canonical headers, all columns as strings.
#[pyfunction]
fn read_csv(path: PathBuf) -> PyResult<PyDataFrame> {
    let df = io::normalize_frame(io::read_csv(&path)?)?;
    Ok(PyDataFrame(df))
}

/// Clean and filter a raw frame, returning the export projection.
#[pyfunction]
#[pyo3(signature = (df, reference_year=None, recency_years=40, min_make_count=50))]
fn clean_frame(
    df: PyDataFrame,
    reference_year: Option<i32>,
    recency_years: i32,
    min_make_count: usize,
) -> PyResult<PyDataFrame> {
    let filters = FilterConfig {
        reference_year,
        recency_years,
        min_make_count,
        ..Default::default()
    };
    Ok(PyDataFrame(pipeline::clean_frame(df.0, &filters)?))
}

/// Run the whole pipeline from a TOML config. Returns the rows written.
#[pyfunction]
fn run(config_path: PathBuf) -> PyResult<usize> {
    let config = PipelineConfig::load(&config_path)?;
    Ok(pipeline::run(&config)?.rows_written)
}

/// Export column names as a Python submodule
fn add_column_exports(m: &Bound<'_, PyModule>) -> PyResult<()> {
    let columns = PyModule::new(m.py(), "columns")?;
    columns.add("EVENT_ID", source::EVENT_ID)?;
    columns.add("EVENT_DATE", source::EVENT_DATE)?;
    columns.add("MAKE", source::MAKE)?;
    columns.add("MODEL", source::MODEL)?;
    columns.add("AIRCRAFT_CATEGORY", source::AIRCRAFT_CATEGORY)?;
    columns.add("FATAL", injuries::FATAL)?;
    columns.add("SERIOUS", injuries::SERIOUS)?;
    columns.add("MINOR", injuries::MINOR)?;
    columns.add("UNINJURED", injuries::UNINJURED)?;
    columns.add("INJURY_COUNTS", injuries::ALL.to_vec())?;
    columns.add("AIRCRAFT_INVOLVED", derived::AIRCRAFT_INVOLVED)?;
    columns.add("MAKE_MODEL", derived::MAKE_MODEL)?;
    columns.add("ENGINE_CONFIGURATION", derived::ENGINE_CONFIGURATION)?;
    columns.add("FINAL_FATALITIES", derived::FINAL_FATALITIES)?;
    columns.add("TOTAL_PASSENGERS", derived::TOTAL_PASSENGERS)?;
    columns.add("BAD_INJURIES", derived::BAD_INJURIES)?;
    columns.add("EXPORT", export::COLUMNS.to_vec())?;
    m.add_submodule(&columns)?;
    Ok(())
}

#[pymodule]
#[pyo3(name = "_core")]
fn core_module(m: &Bound<'_, PyModule>) -> PyResult<()> {
    m.add_function(wrap_pyfunction!(read_csv, m)?)?;
    m.add_function(wrap_pyfunction!(clean_frame, m)?)?;
    m.add_function(wrap_pyfunction!(run, m)?)?;
    add_column_exports(m)?;
    Ok(())
}
