//! Per-column normalizers.
//!
//! Each function maps one raw cell to its canonical value without looking at
//! any other column. None of them fail: unrecognized values fold into an
//! "Unknown"-style bucket. Canonical outputs map to themselves, so cleaned
//! data can be fed back through unchanged.

use crate::aliases::canonical_make;
use crate::record::{AircraftCategory, AmateurBuilt, WeatherCondition};
use crate::schema::values;

const UNKNOWN_ENGINE_TYPES: [&str; 3] = ["UNK", "Unknown", "Unk"];
const ROTORCRAFT: [&str; 4] = ["Helicopter", "Gyrocraft", "Powered-Lift", "Rotorcraft"];
const UNKNOWN_CATEGORIES: [&str; 3] = ["Unknown", "UNK", values::OTHER_UNKNOWN];

/// Null and the unknown spellings become "Unknown"; everything else,
/// including "NONE" and "Hybrid Rocket", is kept verbatim.
pub fn engine_type(raw: Option<&str>) -> String {
    match raw {
        None => values::UNKNOWN.to_string(),
        Some(s) if UNKNOWN_ENGINE_TYPES.contains(&s) => values::UNKNOWN.to_string(),
        Some(s) => s.to_string(),
    }
}

pub fn weather_condition(raw: Option<&str>) -> WeatherCondition {
    match raw {
        Some("VMC") | Some("Good") => WeatherCondition::Good,
        Some("IMC") | Some("Bad") => WeatherCondition::Bad,
        _ => WeatherCondition::Unknown,
    }
}

pub fn aircraft_category(raw: Option<&str>) -> AircraftCategory {
    match raw {
        None => AircraftCategory::OtherUnknown,
        Some("Airplane") => AircraftCategory::Airplane,
        Some(s) if ROTORCRAFT.contains(&s) => AircraftCategory::Rotorcraft,
        Some(s) if UNKNOWN_CATEGORIES.contains(&s) => AircraftCategory::OtherUnknown,
        Some(other) => AircraftCategory::Excluded(other.to_string()),
    }
}

pub fn amateur_built(raw: &str) -> Option<AmateurBuilt> {
    match raw.trim() {
        s if s.eq_ignore_ascii_case("yes") || s.eq_ignore_ascii_case("y") => {
            Some(AmateurBuilt::Yes)
        }
        s if s.eq_ignore_ascii_case("no") || s.eq_ignore_ascii_case("n") => {
            Some(AmateurBuilt::No)
        }
        _ => None,
    }
}

/// Trimmed, title-cased, alias-merged manufacturer. Blank input is null.
pub fn make(raw: Option<&str>) -> Option<String> {
    let trimmed = raw.map(str::trim).filter(|s| !s.is_empty())?;
    let titled = title_case(trimmed);
    Some(canonical_make(&titled).to_string())
}

/// Model codes are case-sensitive; only surrounding whitespace goes.
pub fn model(raw: Option<&str>) -> Option<String> {
    raw.map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}

/// Upper-case the first letter of every alphabetic run, lower-case the rest.
pub fn title_case(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut prev_alpha = false;
    for c in s.chars() {
        if c.is_alphabetic() {
            if prev_alpha {
                out.extend(c.to_lowercase());
            } else {
                out.extend(c.to_uppercase());
            }
            prev_alpha = true;
        } else {
            out.push(c);
            prev_alpha = false;
        }
    }
    out
}
