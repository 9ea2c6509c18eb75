use std::fs;
use std::io::Write;
use std::path::Path;

use accident_prep::schema::export;
use accident_prep::{io, FilterConfig, PipelineConfig, PrepError};
use polars::prelude::*;
use tempfile::{NamedTempFile, TempDir};

const HEADER: &str = "Event.Id,Investigation.Type,Event.Date,Injury.Severity,Aircraft.damage,\
Aircraft.Category,Make,Model,Amateur.Built,Number.of.Engines,Engine.Type,\
Total.Fatal.Injuries,Total.Serious.Injuries,Total.Minor.Injuries,Total.Uninjured,\
Weather.Condition,Broad.phase.of.flight,Purpose.of.flight";

const ROWS: &[&str] = &[
    // kept
    "E1,Accident,2010-05-01,Fatal(3),Destroyed,Airplane,CESSNA,172,No,1,Reciprocating,2,0,0,0,VMC,Cruise,Personal",
    "E2,Accident,2011-01-01,Non-Fatal,,Airplane,Cessna,150,No,1,UNK,,,1,1,IMC,Landing,Instructional",
    "E3,Accident,2012-07-04,Fatal,Substantial,, cessna ,182 ,,1,Reciprocating,0,1,0,0,UNK,Takeoff,Personal",
    // midair: amateur-built and rotorcraft rescued by the collision group
    "E6,Accident,2015-02-02,Fatal(2),Destroyed,Airplane,Cessna,172,Yes,1,Reciprocating,1,0,0,0,VMC,Cruise,Personal",
    "E6,Accident,2015-02-02,Fatal(2),Destroyed,Helicopter,Cessna,CH-7,No,1,Turbo Shaft,1,0,0,0,VMC,Cruise,Personal",
    // alias variants merge into one manufacturer
    "E20,Accident,2001-01-01,Non-Fatal,Minor,Airplane,Airbus Industrie,A320,No,2,Turbo Fan,0,0,0,150,VMC,Cruise,",
    "E21,Accident,2002-01-01,Non-Fatal,Minor,Airplane,AIRBUS,A330,No,2,Turbo Fan,0,0,0,200,VMC,Cruise,",
    "E22,Accident,2003-01-01,Non-Fatal,Minor,Airplane,airbus industrie,A319,No,2,Turbo Fan,0,0,0,120,VMC,Cruise,",
    // dropped
    "E4,Accident,1975-03-03,Fatal(1),Destroyed,Airplane,Cessna,172,No,1,Reciprocating,1,0,0,0,VMC,Cruise,Personal",
    "E5,Accident,2016-01-01,Non-Fatal,Substantial,Airplane,Cessna,172,Yes,1,Reciprocating,0,0,0,1,VMC,Cruise,Personal",
    "E7,Accident,2016-01-01,Non-Fatal,Substantial,Glider,Cessna,G1,No,0,NONE,0,0,0,1,VMC,Cruise,Personal",
    "E8,Accident,2016-01-01,Non-Fatal,Substantial,Airplane,Cessna,,No,1,Reciprocating,0,0,0,1,VMC,Cruise,Personal",
    "E9,Accident,sometime,Non-Fatal,Substantial,Airplane,Cessna,172,No,1,Reciprocating,0,0,0,1,VMC,Cruise,Personal",
    "E10,Accident,2016-01-01,Non-Fatal,Substantial,Airplane,Piper,PA-28,No,1,Reciprocating,0,0,0,1,VMC,Cruise,Personal",
    "E11,Accident,2017-01-01,Non-Fatal,Substantial,Airplane,Piper,PA-18,No,1,Reciprocating,0,0,0,1,VMC,Cruise,Personal",
];

fn create_temp_csv(content: &str) -> NamedTempFile {
    let mut temp_file = NamedTempFile::new().unwrap();
    write!(temp_file, "{}", content).unwrap();
    temp_file
}

fn fixture() -> String {
    let mut csv = String::from(HEADER);
    for row in ROWS {
        csv.push('\n');
        csv.push_str(row);
    }
    csv.push('\n');
    csv
}

fn config(input: &Path, output: &Path) -> PipelineConfig {
    PipelineConfig {
        input: input.to_path_buf(),
        output: output.to_path_buf(),
        filters: FilterConfig {
            reference_year: Some(2022),
            min_make_count: 3,
            ..Default::default()
        },
    }
}

fn column<'a>(df: &'a DataFrame, name: &str) -> Vec<Option<&'a str>> {
    df.column(name).unwrap().str().unwrap().into_iter().collect()
}

fn row_of<'a>(df: &'a DataFrame, event_id: &str, name: &str) -> Vec<Option<&'a str>> {
    column(df, "EventId")
        .into_iter()
        .zip(column(df, name))
        .filter(|(id, _)| *id == Some(event_id))
        .map(|(_, v)| v)
        .collect()
}

#[test]
fn test_run_end_to_end() {
    let input = create_temp_csv(&fixture());
    let dir = TempDir::new().unwrap();
    let output = dir.path().join("out").join("cleaned.csv");

    let summary = accident_prep::run(&config(input.path(), &output)).unwrap();
    assert_eq!(summary.rows_read, ROWS.len());
    assert_eq!(summary.rows_written, 8);

    let df = io::read_csv(&output).unwrap();
    assert_eq!(df.get_column_names_str(), export::COLUMNS.to_vec());
    assert_eq!(df.height(), 8);

    let mut ids: Vec<&str> = column(&df, "EventId").into_iter().flatten().collect();
    ids.sort();
    assert_eq!(ids, vec!["E1", "E2", "E20", "E21", "E22", "E3", "E6", "E6"]);

    assert_eq!(row_of(&df, "E1", "FinalFatalities"), vec![Some("3")]);
    assert_eq!(row_of(&df, "E1", "BadInjuries"), vec![Some("2")]);
    assert_eq!(row_of(&df, "E1", "EngineConfiguration"), vec![Some("Single")]);
    assert_eq!(row_of(&df, "E1", "WeatherCondition"), vec![Some("Good")]);
    assert_eq!(row_of(&df, "E1", "EventDate"), vec![Some("2010-05-01")]);

    assert_eq!(row_of(&df, "E2", "EngineType"), vec![Some("Unknown")]);
    assert_eq!(row_of(&df, "E2", "AircraftDamage"), vec![Some("Unknown")]);
    assert_eq!(row_of(&df, "E2", "TotalFatalInjuries"), vec![Some("0")]);
    assert_eq!(row_of(&df, "E2", "TotalPassengers"), vec![Some("2")]);
    assert_eq!(row_of(&df, "E2", "WeatherCondition"), vec![Some("Bad")]);

    assert_eq!(row_of(&df, "E3", "Make"), vec![Some("Cessna")]);
    assert_eq!(row_of(&df, "E3", "MakeModel"), vec![Some("Cessna 182")]);
    assert_eq!(row_of(&df, "E3", "AircraftCategory"), vec![Some("Other/Unknown")]);
    assert_eq!(row_of(&df, "E3", "AmateurBuilt"), vec![Some("No")]);
    assert_eq!(row_of(&df, "E3", "FinalFatalities"), vec![Some("1")]);

    assert_eq!(row_of(&df, "E6", "AircraftInvolved"), vec![Some("2"), Some("2")]);
    assert_eq!(
        row_of(&df, "E6", "AircraftCategory"),
        vec![Some("Airplane"), Some("Rotorcraft")]
    );

    assert_eq!(
        row_of(&df, "E20", "Make"),
        vec![Some("Airbus")],
        "alias should merge into canonical make"
    );
    assert_eq!(row_of(&df, "E21", "Make"), vec![Some("Airbus")]);

    let steps: Vec<(&str, usize)> = summary
        .report
        .steps
        .iter()
        .map(|s| (s.step, s.removed()))
        .collect();
    assert_eq!(
        steps,
        vec![
            ("recency", 2),
            ("amateur_built", 1),
            ("category", 1),
            ("engine_type", 0),
            ("make_count", 2),
            ("model", 1),
        ]
    );
}

#[test]
fn test_missing_column_is_fatal() {
    let csv = "Event.Id,Event.Date,Make\nE1,2010-01-01,Cessna\n";
    let input = create_temp_csv(csv);
    let dir = TempDir::new().unwrap();
    let output = dir.path().join("cleaned.csv");

    let err = accident_prep::run(&config(input.path(), &output)).unwrap_err();
    assert!(matches!(err, PrepError::MissingColumn(_)), "got {err:?}");
    assert!(!output.exists());
}

#[test]
fn test_lossy_encoding_tolerated() {
    let mut bytes = fixture().into_bytes();
    // Latin-1 "é" in a trailing free-text cell
    bytes.truncate(bytes.len() - 1);
    bytes.extend_from_slice(b"\xe9\n");
    let mut input = NamedTempFile::new().unwrap();
    input.write_all(&bytes).unwrap();

    let dir = TempDir::new().unwrap();
    let output = dir.path().join("cleaned.csv");
    let summary = accident_prep::run(&config(input.path(), &output)).unwrap();
    assert_eq!(summary.rows_read, ROWS.len());
}

#[test]
fn test_parquet_export() {
    let input = create_temp_csv(&fixture());
    let dir = TempDir::new().unwrap();
    let output = dir.path().join("cleaned.parquet");

    accident_prep::run(&config(input.path(), &output)).unwrap();

    let df = ParquetReader::new(fs::File::open(&output).unwrap())
        .finish()
        .unwrap();
    assert_eq!(df.height(), 8);
    assert_eq!(df.get_column_names_str(), export::COLUMNS.to_vec());
    assert_eq!(df.column("EventDate").unwrap().dtype(), &DataType::Date);
    assert_eq!(df.column("BadInjuries").unwrap().dtype(), &DataType::Int64);
}

#[test]
fn test_rerun_on_output_removes_nothing() {
    let input = create_temp_csv(&fixture());
    let dir = TempDir::new().unwrap();
    let first = dir.path().join("first.csv");
    let second = dir.path().join("second.csv");

    let once = accident_prep::run(&config(input.path(), &first)).unwrap();
    let twice = accident_prep::run(&config(&first, &second)).unwrap();

    assert_eq!(twice.rows_read, once.rows_written);
    assert_eq!(twice.rows_written, once.rows_written);
    assert_eq!(
        fs::read_to_string(&first).unwrap(),
        fs::read_to_string(&second).unwrap()
    );
}

#[test]
fn test_clean_frame_from_dataframe() {
    let input = create_temp_csv(&fixture());
    let raw = io::read_csv(input.path()).unwrap();
    let filters = FilterConfig {
        reference_year: Some(2022),
        min_make_count: 3,
        ..Default::default()
    };

    let df = accident_prep::clean_frame(raw, &filters).unwrap();
    assert_eq!(df.height(), 8);
    assert_eq!(df.width(), export::COLUMNS.len());
}

#[test]
fn test_config_file_drives_run() {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("raw.csv"), fixture()).unwrap();
    fs::write(
        dir.path().join("run.toml"),
        "input = \"raw.csv\"\noutput = \"clean.csv\"\n\n[filters]\nreference_year = 2022\nmin_make_count = 3\n",
    )
    .unwrap();

    let config = PipelineConfig::load(&dir.path().join("run.toml")).unwrap();
    let summary = accident_prep::run(&config).unwrap();
    assert_eq!(summary.rows_written, 8);
    assert!(dir.path().join("clean.csv").exists());
}
