/// Column-name constants for the accident table.
/// Single source of truth for ingestion, export and the Python bindings.

// ── Source columns ──────────────────────────────────────────────────────────
pub mod source {
    pub const EVENT_ID: &str = "EventId";
    pub const EVENT_DATE: &str = "EventDate";
    pub const INJURY_SEVERITY: &str = "InjurySeverity";
    pub const AIRCRAFT_DAMAGE: &str = "AircraftDamage";
    pub const AIRCRAFT_CATEGORY: &str = "AircraftCategory";
    pub const MAKE: &str = "Make";
    pub const MODEL: &str = "Model";
    pub const AMATEUR_BUILT: &str = "AmateurBuilt";
    pub const NUMBER_OF_ENGINES: &str = "NumberOfEngines";
    pub const ENGINE_TYPE: &str = "EngineType";
    pub const WEATHER_CONDITION: &str = "WeatherCondition";
    pub const BROAD_PHASE_OF_FLIGHT: &str = "BroadPhaseOfFlight";
    pub const PURPOSE_OF_FLIGHT: &str = "PurposeOfFlight";

    pub const REQUIRED: [&str; 17] = [
        EVENT_ID,
        EVENT_DATE,
        INJURY_SEVERITY,
        AIRCRAFT_DAMAGE,
        AIRCRAFT_CATEGORY,
        MAKE,
        MODEL,
        AMATEUR_BUILT,
        NUMBER_OF_ENGINES,
        ENGINE_TYPE,
        super::injuries::FATAL,
        super::injuries::SERIOUS,
        super::injuries::MINOR,
        super::injuries::UNINJURED,
        WEATHER_CONDITION,
        BROAD_PHASE_OF_FLIGHT,
        PURPOSE_OF_FLIGHT,
    ];
}

// ── Injury count columns ────────────────────────────────────────────────────
pub mod injuries {
    pub const FATAL: &str = "TotalFatalInjuries";
    pub const SERIOUS: &str = "TotalSeriousInjuries";
    pub const MINOR: &str = "TotalMinorInjuries";
    pub const UNINJURED: &str = "TotalUninjured";

    pub const ALL: [&str; 4] = [FATAL, SERIOUS, MINOR, UNINJURED];
}

// ── Derived columns ─────────────────────────────────────────────────────────
pub mod derived {
    pub const AIRCRAFT_INVOLVED: &str = "AircraftInvolved";
    pub const MAKE_MODEL: &str = "MakeModel";
    pub const ENGINE_CONFIGURATION: &str = "EngineConfiguration";
    pub const FINAL_FATALITIES: &str = "FinalFatalities";
    pub const TOTAL_PASSENGERS: &str = "TotalPassengers";
    pub const BAD_INJURIES: &str = "BadInjuries";
}

// ── Export projection ───────────────────────────────────────────────────────
pub mod export {
    use super::{derived, injuries, source};

    /// Output columns, in file order.
    pub const COLUMNS: [&str; 23] = [
        source::EVENT_DATE,
        source::INJURY_SEVERITY,
        source::AIRCRAFT_DAMAGE,
        source::MAKE,
        source::MODEL,
        source::AMATEUR_BUILT,
        source::NUMBER_OF_ENGINES,
        source::ENGINE_TYPE,
        injuries::FATAL,
        injuries::SERIOUS,
        injuries::MINOR,
        injuries::UNINJURED,
        source::WEATHER_CONDITION,
        source::BROAD_PHASE_OF_FLIGHT,
        source::PURPOSE_OF_FLIGHT,
        source::AIRCRAFT_CATEGORY,
        derived::AIRCRAFT_INVOLVED,
        derived::MAKE_MODEL,
        derived::ENGINE_CONFIGURATION,
        derived::FINAL_FATALITIES,
        source::EVENT_ID,
        derived::TOTAL_PASSENGERS,
        derived::BAD_INJURIES,
    ];
}

// ── Categorical values ──────────────────────────────────────────────────────
pub mod values {
    pub const UNKNOWN: &str = "Unknown";
    pub const OTHER_UNKNOWN: &str = "Other/Unknown";
    pub const YES: &str = "Yes";
    pub const NO: &str = "No";
}
