//! CSV ingestion, typed record conversion and export projection.

use std::fs::{self, File};
use std::path::Path;

use chrono::{NaiveDate, NaiveDateTime};
use polars::prelude::*;

use crate::error::{PrepError, Result};
use crate::normalize;
use crate::record::{Accident, AccidentTable};
use crate::schema::{derived, export, injuries, source};

const DATE_FORMATS: [&str; 3] = ["%Y-%m-%d", "%m/%d/%Y", "%d-%m-%Y"];
const DATETIME_FORMATS: [&str; 2] = ["%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S"];

// ── Reading ─────────────────────────────────────────────────────────────────

/// Read a CSV file with all columns as String dtype. Invalid UTF-8 is
/// replaced rather than rejected.
pub fn read_csv(path: &Path) -> Result<DataFrame> {
    let df = CsvReadOptions::default()
        .with_has_header(true)
        .with_infer_schema_length(Some(0)) // all columns as String
        .map_parse_options(|opts| opts.with_encoding(CsvEncoding::LossyUtf8))
        .try_into_reader_with_file_path(Some(path.to_path_buf()))?
        .finish()?;
    Ok(df)
}

/// Read and convert an accident CSV into typed records.
pub fn read_accidents(path: &Path) -> Result<AccidentTable> {
    let df = normalize_frame(read_csv(path)?)?;
    frame_to_table(&df)
}

/// Canonical column name: "Event.Id" -> "EventId",
/// "Broad.phase.of.flight" -> "BroadPhaseOfFlight". Names already in
/// canonical form come back unchanged.
pub fn canonical_column_name(name: &str) -> String {
    name.trim()
        .split(['.', '_', ' '])
        .filter(|part| !part.is_empty())
        .map(|part| {
            let mut chars = part.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect::<String>(),
                None => String::new(),
            }
        })
        .collect()
}

/// Canonicalize headers, then trim every cell and turn blanks into nulls.
pub fn normalize_frame(mut df: DataFrame) -> Result<DataFrame> {
    let renamed: Vec<String> = df
        .get_column_names_str()
        .iter()
        .map(|c| canonical_column_name(c))
        .collect();
    df.set_column_names(renamed.as_slice())?;

    let exprs: Vec<Expr> = renamed
        .iter()
        .map(|name| {
            let trimmed = col(name.as_str())
                .cast(DataType::String)
                .str()
                .strip_chars(lit(" \t\r\n"));
            when(trimmed.clone().eq(lit("")))
                .then(lit(NULL).cast(DataType::String))
                .otherwise(trimmed)
                .alias(name.as_str())
        })
        .collect();

    Ok(df.lazy().with_columns(exprs).collect()?)
}

pub fn require_columns(df: &DataFrame, required: &[&str]) -> Result<()> {
    for &col_name in required {
        if df.column(col_name).is_err() {
            return Err(PrepError::MissingColumn(col_name.to_string()));
        }
    }
    Ok(())
}

fn text_column<'a>(df: &'a DataFrame, name: &str) -> Result<&'a StringChunked> {
    let column = df
        .column(name)
        .map_err(|_| PrepError::MissingColumn(name.to_string()))?;
    Ok(column.str()?)
}

/// Lenient date parsing; anything unreadable is `None`.
pub fn parse_date(s: &str) -> Option<NaiveDate> {
    let s = s.trim();
    DATE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(s, fmt).ok())
        .or_else(|| {
            DATETIME_FORMATS
                .iter()
                .find_map(|fmt| NaiveDateTime::parse_from_str(s, fmt).ok())
                .map(|dt| dt.date())
        })
}

/// Integer or decimal text ("2", "2.0") as an integer; anything else is
/// `None`.
pub fn parse_count(s: &str) -> Option<i64> {
    let s = s.trim();
    if let Ok(n) = s.parse::<i64>() {
        return Some(n);
    }
    match s.parse::<f64>() {
        Ok(f) if f.is_finite() => Some(f.trunc() as i64),
        _ => None,
    }
}

/// Convert a normalized, all-string frame into typed records.
pub fn frame_to_table(df: &DataFrame) -> Result<AccidentTable> {
    require_columns(df, &source::REQUIRED)?;

    let event_ids = text_column(df, source::EVENT_ID)?;
    let event_dates = text_column(df, source::EVENT_DATE)?;
    let severities = text_column(df, source::INJURY_SEVERITY)?;
    let damages = text_column(df, source::AIRCRAFT_DAMAGE)?;
    let categories = text_column(df, source::AIRCRAFT_CATEGORY)?;
    let makes = text_column(df, source::MAKE)?;
    let models = text_column(df, source::MODEL)?;
    let amateur = text_column(df, source::AMATEUR_BUILT)?;
    let engines = text_column(df, source::NUMBER_OF_ENGINES)?;
    let engine_types = text_column(df, source::ENGINE_TYPE)?;
    let fatal = text_column(df, injuries::FATAL)?;
    let serious = text_column(df, injuries::SERIOUS)?;
    let minor = text_column(df, injuries::MINOR)?;
    let uninjured = text_column(df, injuries::UNINJURED)?;
    let weather = text_column(df, source::WEATHER_CONDITION)?;
    let phases = text_column(df, source::BROAD_PHASE_OF_FLIGHT)?;
    let purposes = text_column(df, source::PURPOSE_OF_FLIGHT)?;

    let owned = |ca: &StringChunked, i: usize| ca.get(i).map(str::to_string);
    let count = |ca: &StringChunked, i: usize| ca.get(i).and_then(parse_count);

    let records = (0..df.height())
        .map(|i| Accident {
            event_id: event_ids.get(i).unwrap_or_default().to_string(),
            event_date: event_dates.get(i).and_then(parse_date),
            injury_severity: owned(severities, i),
            aircraft_damage: owned(damages, i),
            make: owned(makes, i),
            model: owned(models, i),
            amateur_built: amateur.get(i).and_then(normalize::amateur_built),
            number_of_engines: count(engines, i),
            engine_type: owned(engine_types, i),
            total_fatal_injuries: count(fatal, i),
            total_serious_injuries: count(serious, i),
            total_minor_injuries: count(minor, i),
            total_uninjured: count(uninjured, i),
            weather_code: owned(weather, i),
            category_code: owned(categories, i),
            broad_phase_of_flight: owned(phases, i),
            purpose_of_flight: owned(purposes, i),
            ..Default::default()
        })
        .collect();

    Ok(AccidentTable::new(records))
}

// ── Writing ─────────────────────────────────────────────────────────────────

fn text_column_of<'a>(
    name: &str,
    rows: &'a [Accident],
    f: impl Fn(&'a Accident) -> Option<&'a str>,
) -> Column {
    Series::new(name.into(), rows.iter().map(f).collect::<Vec<_>>()).into()
}

fn int_column_of(name: &str, rows: &[Accident], f: impl Fn(&Accident) -> Option<i64>) -> Column {
    Series::new(name.into(), rows.iter().map(f).collect::<Vec<_>>()).into()
}

/// Typed frame holding every record field that has an output column.
pub fn table_to_frame(table: &AccidentTable) -> Result<DataFrame> {
    let rows = table.records.as_slice();
    let dates: Vec<Option<NaiveDate>> = rows.iter().map(|r| r.event_date).collect();
    let involved: Vec<u32> = rows.iter().map(|r| r.aircraft_involved).collect();

    let columns: Vec<Column> = vec![
        text_column_of(source::EVENT_ID, rows, |r| Some(r.event_id.as_str())),
        Series::new(source::EVENT_DATE.into(), dates).into(),
        text_column_of(source::INJURY_SEVERITY, rows, |r| r.injury_severity.as_deref()),
        text_column_of(source::AIRCRAFT_DAMAGE, rows, |r| r.aircraft_damage.as_deref()),
        text_column_of(source::MAKE, rows, |r| r.make.as_deref()),
        text_column_of(source::MODEL, rows, |r| r.model.as_deref()),
        text_column_of(source::AMATEUR_BUILT, rows, |r| {
            r.amateur_built.as_ref().map(|a| a.as_str())
        }),
        int_column_of(source::NUMBER_OF_ENGINES, rows, |r| r.number_of_engines),
        text_column_of(source::ENGINE_TYPE, rows, |r| r.engine_type.as_deref()),
        int_column_of(injuries::FATAL, rows, |r| r.total_fatal_injuries),
        int_column_of(injuries::SERIOUS, rows, |r| r.total_serious_injuries),
        int_column_of(injuries::MINOR, rows, |r| r.total_minor_injuries),
        int_column_of(injuries::UNINJURED, rows, |r| r.total_uninjured),
        text_column_of(source::WEATHER_CONDITION, rows, |r| {
            Some(r.weather_condition.as_str())
        }),
        text_column_of(source::BROAD_PHASE_OF_FLIGHT, rows, |r| {
            r.broad_phase_of_flight.as_deref()
        }),
        text_column_of(source::PURPOSE_OF_FLIGHT, rows, |r| r.purpose_of_flight.as_deref()),
        text_column_of(source::AIRCRAFT_CATEGORY, rows, |r| r.aircraft_category.label()),
        text_column_of(derived::ENGINE_CONFIGURATION, rows, |r| {
            Some(r.engine_configuration.as_str())
        }),
        text_column_of(derived::MAKE_MODEL, rows, |r| r.make_model.as_deref()),
        int_column_of(derived::BAD_INJURIES, rows, |r| Some(r.bad_injuries)),
        int_column_of(derived::TOTAL_PASSENGERS, rows, |r| Some(r.total_passengers)),
        int_column_of(derived::FINAL_FATALITIES, rows, |r| Some(r.final_fatalities)),
        Series::new(derived::AIRCRAFT_INVOLVED.into(), involved).into(),
    ];

    Ok(DataFrame::new(columns)?)
}

/// Select exactly `columns`, in order. Fails if any is absent.
pub fn select_columns(df: DataFrame, columns: &[&str]) -> Result<DataFrame> {
    require_columns(&df, columns)?;
    let exprs: Vec<Expr> = columns.iter().map(|c| col(*c)).collect();
    Ok(df.lazy().select(exprs).collect()?)
}

/// The export projection of `table`.
pub fn project(table: &AccidentTable) -> Result<DataFrame> {
    select_columns(table_to_frame(table)?, &export::COLUMNS)
}

/// Write the export projection. Paths ending in `.parquet` are written as
/// Parquet, everything else as CSV. Returns the number of rows written.
pub fn export(table: &AccidentTable, path: &Path) -> Result<usize> {
    let mut df = project(table)?;
    write_frame(&mut df, path)?;
    Ok(df.height())
}

pub fn write_frame(df: &mut DataFrame, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }
    let mut file = File::create(path)?;
    let is_parquet = path
        .extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("parquet"));
    if is_parquet {
        ParquetWriter::new(&mut file).finish(df)?;
    } else {
        CsvWriter::new(&mut file).include_header(true).finish(df)?;
    }
    Ok(())
}
