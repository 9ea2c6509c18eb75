//! Filter cascade.
//!
//! Six order-sensitive row-exclusion steps. Each step sees only the rows the
//! previous one kept; in particular the manufacturer floor is counted on the
//! table as it stands after the first four steps.

use std::collections::HashMap;

use chrono::{Datelike, NaiveDate};
use tracing::{info, warn};

use crate::config::FilterConfig;
use crate::error::{PrepError, Result};
use crate::record::{Accident, AccidentTable, AircraftCategory, Retention};

/// Row counts on either side of one filter step.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StepCount {
    pub step: &'static str,
    pub before: usize,
    pub after: usize,
}

impl StepCount {
    pub fn removed(&self) -> usize {
        self.before - self.after
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterReport {
    pub cutoff: NaiveDate,
    pub steps: Vec<StepCount>,
}

impl FilterReport {
    pub fn rows_before(&self) -> usize {
        self.steps.first().map(|s| s.before).unwrap_or(0)
    }

    pub fn rows_after(&self) -> usize {
        self.steps.last().map(|s| s.after).unwrap_or(0)
    }
}

pub fn amateur_retention(record: &Accident) -> Retention {
    if record.is_amateur_built() {
        Retention::KeepIfCollision
    } else {
        Retention::Keep
    }
}

pub fn category_retention(category: &AircraftCategory) -> Retention {
    match category {
        AircraftCategory::Airplane | AircraftCategory::OtherUnknown => Retention::Keep,
        AircraftCategory::Rotorcraft | AircraftCategory::Excluded(_) => Retention::KeepIfCollision,
    }
}

pub fn engine_retention(engine_type: Option<&str>, excluded: &[String]) -> Retention {
    match engine_type {
        Some(t) if excluded.iter().any(|e| e == t) => Retention::Drop,
        _ => Retention::Keep,
    }
}

/// January 1st of `reference_year - recency_years`.
pub fn cutoff_date(reference_year: i32, recency_years: i32) -> Result<NaiveDate> {
    let year = reference_year - recency_years;
    NaiveDate::from_ymd_opt(year, 1, 1)
        .ok_or_else(|| PrepError::InvalidData(format!("Cutoff year {year} is out of range")))
}

/// Keep rows whose make occurs at least `min_count` times in `table`.
pub fn retain_frequent_makes(table: AccidentTable, min_count: usize) -> AccidentTable {
    let mut counts: HashMap<String, usize> = HashMap::new();
    for make in table.records.iter().filter_map(|r| r.make.as_ref()) {
        *counts.entry(make.clone()).or_insert(0) += 1;
    }
    table.retain(|r| {
        r.make
            .as_ref()
            .and_then(|m| counts.get(m))
            .is_some_and(|&n| n >= min_count)
    })
}

pub struct FilterCascade<'a> {
    config: &'a FilterConfig,
}

impl<'a> FilterCascade<'a> {
    pub fn new(config: &'a FilterConfig) -> Self {
        Self { config }
    }

    fn reference_year(&self, table: &AccidentTable) -> i32 {
        if let Some(year) = self.config.reference_year {
            return year;
        }
        match table.latest_year() {
            Some(year) => year,
            None => {
                let year = chrono::Local::now().year();
                warn!("No parseable event dates; using {year} as the reference year");
                year
            }
        }
    }

    pub fn apply(&self, table: AccidentTable) -> Result<(AccidentTable, FilterReport)> {
        let cutoff = cutoff_date(self.reference_year(&table), self.config.recency_years)?;
        let excluded = &self.config.excluded_engine_types;
        let mut steps = Vec::with_capacity(6);

        let mut run = |step: &'static str,
                       table: AccidentTable,
                       f: &dyn Fn(AccidentTable) -> AccidentTable| {
            let before = table.len();
            let table = f(table);
            let count = StepCount {
                step,
                before,
                after: table.len(),
            };
            info!(
                "filter {:<14} {:>7} -> {:>7} (-{})",
                count.step,
                count.before,
                count.after,
                count.removed()
            );
            steps.push(count);
            table
        };

        let table = run("recency", table, &|t: AccidentTable| {
            t.retain(|r| r.event_date.is_some_and(|d| d >= cutoff))
        });
        let table = run("amateur_built", table, &|t: AccidentTable| {
            t.retain(|r| amateur_retention(r).retains(r.aircraft_involved))
        });
        let table = run("category", table, &|t: AccidentTable| {
            t.retain(|r| category_retention(&r.aircraft_category).retains(r.aircraft_involved))
        });
        let table = run("engine_type", table, &|t: AccidentTable| {
            t.retain(|r| {
                engine_retention(r.engine_type.as_deref(), excluded).retains(r.aircraft_involved)
            })
        });
        let table = run("make_count", table, &|t: AccidentTable| {
            retain_frequent_makes(t, self.config.min_make_count)
        });
        let table = run("model", table, &|t: AccidentTable| t.retain(|r| r.model.is_some()));

        Ok((table, FilterReport { cutoff, steps }))
    }
}
