//! Derived metric builders.

use std::collections::HashMap;

use crate::record::{AccidentTable, EngineConfiguration};

/// Cleaned injury count: null and negative values become 0.
pub fn injury_count(raw: Option<i64>) -> i64 {
    raw.unwrap_or(0).max(0)
}

/// Fatality count encoded in a severity label.
///
/// "Fatal(N)" yields N, or 1 when N cannot be read; bare "Fatal" yields 1;
/// every other label yields 0.
pub fn fatalities_from_severity(label: Option<&str>) -> i64 {
    let Some(label) = label.map(str::trim) else {
        return 0;
    };
    if label == "Fatal" {
        return 1;
    }
    match label
        .strip_prefix("Fatal(")
        .and_then(|rest| rest.strip_suffix(')'))
    {
        Some(inner) => inner.trim().parse::<i64>().map(|n| n.max(0)).unwrap_or(1),
        None => 0,
    }
}

/// The larger of the label-derived and tabulated fatality counts.
pub fn final_fatalities(severity: Option<&str>, fatal_injuries: i64) -> i64 {
    fatalities_from_severity(severity).max(fatal_injuries)
}

pub fn engine_configuration(engines: Option<i64>) -> EngineConfiguration {
    match engines {
        Some(0) => EngineConfiguration::None,
        Some(1) => EngineConfiguration::Single,
        Some(2) => EngineConfiguration::Twin,
        Some(n) if n >= 3 => EngineConfiguration::Multi,
        _ => EngineConfiguration::Unknown,
    }
}

pub fn make_model(make: Option<&str>, model: Option<&str>) -> Option<String> {
    match (make, model) {
        (Some(make), Some(model)) => Some(format!("{make} {model}")),
        _ => None,
    }
}

/// Set every row's `aircraft_involved` to the number of rows sharing its
/// event id in `table`. Rows without an id count as single-aircraft events.
pub fn count_aircraft_involved(table: AccidentTable) -> AccidentTable {
    let mut counts: HashMap<String, u32> = HashMap::new();
    for record in table.records.iter().filter(|r| !r.event_id.is_empty()) {
        *counts.entry(record.event_id.clone()).or_insert(0) += 1;
    }
    table.map_records(|r| {
        r.aircraft_involved = counts.get(&r.event_id).copied().unwrap_or(1);
    })
}
