//! Ordered cleaning stages and the end-to-end run.

use std::path::PathBuf;

use polars::prelude::DataFrame;
use tracing::{debug, info};

use crate::config::{FilterConfig, PipelineConfig};
use crate::derive;
use crate::error::Result;
use crate::filter::{FilterCascade, FilterReport};
use crate::io;
use crate::normalize;
use crate::record::{AccidentTable, AmateurBuilt};
use crate::schema::values;

pub type StageFn = fn(AccidentTable) -> AccidentTable;

/// A named transformation over the whole table.
#[derive(Clone, Copy)]
pub struct Stage {
    pub name: &'static str,
    pub apply: StageFn,
}

/// Cleaning stages in execution order. `misc` runs last: the aircraft count
/// and category simplification rely on the row set and columns the earlier
/// stages leave untouched.
pub const STAGES: [Stage; 5] = [
    Stage {
        name: "injuries",
        apply: clean_injuries,
    },
    Stage {
        name: "engines",
        apply: clean_engines,
    },
    Stage {
        name: "weather",
        apply: clean_weather,
    },
    Stage {
        name: "make_model",
        apply: clean_make_model,
    },
    Stage {
        name: "misc",
        apply: clean_misc,
    },
];

/// Injury counts, the two aggregates and fatality reconciliation.
pub fn clean_injuries(table: AccidentTable) -> AccidentTable {
    table.map_records(|r| {
        let fatal = derive::injury_count(r.total_fatal_injuries);
        let serious = derive::injury_count(r.total_serious_injuries);
        let minor = derive::injury_count(r.total_minor_injuries);
        let uninjured = derive::injury_count(r.total_uninjured);

        r.total_fatal_injuries = Some(fatal);
        r.total_serious_injuries = Some(serious);
        r.total_minor_injuries = Some(minor);
        r.total_uninjured = Some(uninjured);

        r.bad_injuries = fatal.saturating_add(serious);
        r.total_passengers = r
            .bad_injuries
            .saturating_add(minor)
            .saturating_add(uninjured);
        r.final_fatalities = derive::final_fatalities(r.injury_severity.as_deref(), fatal);
    })
}

pub fn clean_engines(table: AccidentTable) -> AccidentTable {
    table.map_records(|r| {
        r.engine_type = Some(normalize::engine_type(r.engine_type.as_deref()));
        r.engine_configuration = derive::engine_configuration(r.number_of_engines);
    })
}

pub fn clean_weather(table: AccidentTable) -> AccidentTable {
    table.map_records(|r| {
        r.weather_condition = normalize::weather_condition(r.weather_code.as_deref());
    })
}

pub fn clean_make_model(table: AccidentTable) -> AccidentTable {
    table.map_records(|r| {
        r.make = normalize::make(r.make.as_deref());
        r.model = normalize::model(r.model.as_deref());
        r.make_model = derive::make_model(r.make.as_deref(), r.model.as_deref());
    })
}

/// Defaults for damage and amateur-built, the per-event aircraft count and
/// category simplification.
pub fn clean_misc(table: AccidentTable) -> AccidentTable {
    let table = table.map_records(|r| {
        if r.aircraft_damage.is_none() {
            r.aircraft_damage = Some(values::UNKNOWN.to_string());
        }
        if r.amateur_built.is_none() {
            r.amateur_built = Some(AmateurBuilt::No);
        }
        r.aircraft_category = normalize::aircraft_category(r.category_code.as_deref());
    });
    derive::count_aircraft_involved(table)
}

/// Thread `table` through every stage in order.
pub fn run_stages(table: AccidentTable) -> AccidentTable {
    STAGES.iter().fold(table, |table, stage| {
        let table = (stage.apply)(table);
        debug!("stage {:<10} {} rows", stage.name, table.len());
        table
    })
}

/// Cleaning stages followed by the filter cascade.
pub fn clean(
    table: AccidentTable,
    filters: &FilterConfig,
) -> Result<(AccidentTable, FilterReport)> {
    let table = run_stages(table);
    FilterCascade::new(filters).apply(table)
}

/// Clean a raw frame (as read from CSV) and return the export projection.
pub fn clean_frame(raw: DataFrame, filters: &FilterConfig) -> Result<DataFrame> {
    let table = io::frame_to_table(&io::normalize_frame(raw)?)?;
    let (table, _) = clean(table, filters)?;
    io::project(&table)
}

#[derive(Debug, Clone)]
pub struct RunSummary {
    pub rows_read: usize,
    pub rows_written: usize,
    pub output: PathBuf,
    pub report: FilterReport,
}

/// Read, clean, filter and export according to `config`.
pub fn run(config: &PipelineConfig) -> Result<RunSummary> {
    info!("reading {}", config.input.display());
    let table = io::read_accidents(&config.input)?;
    let rows_read = table.len();

    let (table, report) = clean(table, &config.filters)?;
    info!(
        "kept {} of {} rows (cutoff {})",
        table.len(),
        rows_read,
        report.cutoff
    );

    let rows_written = io::export(&table, &config.output)?;
    info!("wrote {} rows to {}", rows_written, config.output.display());

    Ok(RunSummary {
        rows_read,
        rows_written,
        output: config.output.clone(),
        report,
    })
}
