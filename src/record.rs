use std::fmt;

use chrono::NaiveDate;

use crate::schema::values;

/// Weather at the time of the event, collapsed from METAR-style codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum WeatherCondition {
    Good,
    Bad,
    #[default]
    Unknown,
}

impl WeatherCondition {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Good => "Good",
            Self::Bad => "Bad",
            Self::Unknown => values::UNKNOWN,
        }
    }
}

/// Coarse bucket over the engine count.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EngineConfiguration {
    None,
    Single,
    Twin,
    Multi,
    #[default]
    Unknown,
}

impl EngineConfiguration {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::None => "None",
            Self::Single => "Single",
            Self::Twin => "Twin",
            Self::Multi => "Multi",
            Self::Unknown => values::UNKNOWN,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AmateurBuilt {
    Yes,
    No,
}

impl AmateurBuilt {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Yes => values::YES,
            Self::No => values::NO,
        }
    }
}

/// Simplified aircraft category.
///
/// `Excluded` keeps the literal it was classified from so that logs can say
/// what was dropped; it is written out as null.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum AircraftCategory {
    Airplane,
    Rotorcraft,
    #[default]
    OtherUnknown,
    Excluded(String),
}

impl AircraftCategory {
    /// Export value. `None` for excluded categories.
    pub fn label(&self) -> Option<&'static str> {
        match self {
            Self::Airplane => Some("Airplane"),
            Self::Rotorcraft => Some("Rotorcraft"),
            Self::OtherUnknown => Some(values::OTHER_UNKNOWN),
            Self::Excluded(_) => None,
        }
    }
}

/// How a row fares in the filter cascade for one rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Retention {
    Keep,
    /// Kept only when the row belongs to a multi-aircraft event.
    KeepIfCollision,
    Drop,
}

impl Retention {
    pub fn retains(self, aircraft_involved: u32) -> bool {
        match self {
            Self::Keep => true,
            Self::KeepIfCollision => aircraft_involved > 1,
            Self::Drop => false,
        }
    }
}

/// One accident record: one aircraft within one event.
///
/// Source fields are filled at ingestion; derived fields hold their defaults
/// until the owning pipeline stage has run.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Accident {
    pub event_id: String,
    pub event_date: Option<NaiveDate>,
    pub injury_severity: Option<String>,
    pub aircraft_damage: Option<String>,
    pub make: Option<String>,
    pub model: Option<String>,
    pub amateur_built: Option<AmateurBuilt>,
    pub number_of_engines: Option<i64>,
    pub engine_type: Option<String>,
    pub total_fatal_injuries: Option<i64>,
    pub total_serious_injuries: Option<i64>,
    pub total_minor_injuries: Option<i64>,
    pub total_uninjured: Option<i64>,
    /// Raw weather code ("VMC", "IMC", "UNK", ...).
    pub weather_code: Option<String>,
    /// Raw category literal ("Airplane", "Helicopter", ...).
    pub category_code: Option<String>,
    pub broad_phase_of_flight: Option<String>,
    pub purpose_of_flight: Option<String>,

    // derived
    pub weather_condition: WeatherCondition,
    pub aircraft_category: AircraftCategory,
    pub engine_configuration: EngineConfiguration,
    pub make_model: Option<String>,
    pub bad_injuries: i64,
    pub total_passengers: i64,
    pub final_fatalities: i64,
    pub aircraft_involved: u32,
}

impl Accident {
    pub fn is_amateur_built(&self) -> bool {
        self.amateur_built == Some(AmateurBuilt::Yes)
    }
}

/// The table threaded through the pipeline. Owned by exactly one stage at a
/// time.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AccidentTable {
    pub records: Vec<Accident>,
}

impl AccidentTable {
    pub fn new(records: Vec<Accident>) -> Self {
        Self { records }
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Apply `f` to every record, returning the table.
    pub fn map_records(mut self, mut f: impl FnMut(&mut Accident)) -> Self {
        self.records.iter_mut().for_each(|r| f(r));
        self
    }

    pub fn retain(mut self, f: impl FnMut(&Accident) -> bool) -> Self {
        self.records.retain(f);
        self
    }

    /// Latest event year present in the table.
    pub fn latest_year(&self) -> Option<i32> {
        use chrono::Datelike;
        self.records
            .iter()
            .filter_map(|r| r.event_date.map(|d| d.year()))
            .max()
    }
}

impl fmt::Display for AccidentTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "AccidentTable({} rows)", self.records.len())
    }
}
