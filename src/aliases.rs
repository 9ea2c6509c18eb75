use std::collections::HashMap;

use once_cell::sync::Lazy;

/// Known manufacturer name variants (after title-casing) and the canonical
/// name they merge into. Corporate renames and punctuation variants of the
/// same manufacturer share one key downstream.
const MAKE_ALIASES: &[(&str, &str)] = &[
    ("Airbus Industrie", "Airbus"),
    ("Cirrus Design Corp", "Cirrus"),
    ("Cirrus Design Corp.", "Cirrus"),
    ("Cessna Aircraft Co", "Cessna"),
    ("Piper Aircraft Inc", "Piper"),
    ("The New Piper Aircraft Inc", "Piper"),
    ("Beechcraft", "Beech"),
    ("Hawker Beechcraft Corp", "Beech"),
    ("Raytheon Aircraft Company", "Beech"),
    ("Boeing Company", "Boeing"),
    ("Mcdonnell Douglas Aircraft Co", "Mcdonnell Douglas"),
    ("Mooney Airplane Co Inc", "Mooney"),
    ("Mooney Aircraft Corp.", "Mooney"),
    ("Diamond Aircraft Ind Inc", "Diamond Aircraft"),
    ("Air Tractor Inc", "Air Tractor"),
    ("American Champion Aircraft", "American Champion"),
    ("Bellanca Aircraft Corp", "Bellanca"),
    ("Embraer S A", "Embraer"),
    ("Bombardier Inc", "Bombardier"),
];

static ALIAS_TABLE: Lazy<HashMap<&'static str, &'static str>> =
    Lazy::new(|| MAKE_ALIASES.iter().copied().collect());

/// Canonical manufacturer for an already title-cased make.
pub fn canonical_make(make: &str) -> &str {
    ALIAS_TABLE.get(make).copied().unwrap_or(make)
}
