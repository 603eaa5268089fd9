//! End-to-end tests: directory of sheets -> results table -> query

use mx_results::app::services::batch_processor::BatchProcessor;
use mx_results::app::services::race_table::{
    RaceTableWriter, ResultQuery, SourceRewrite, TableFormat, load_events, load_records,
};
use mx_results::config::{Config, ProcessingConfig};
use std::path::Path;
use tempfile::TempDir;

const HANGTOWN_450: &str = "Hangtown Motocross Classic - Rancho Cordova, CA
ROUND 1 - May 18, 2024
450 Class
Overall Results
POS # RIDER HOMETOWN BIKE
1 1 Jett Lawrence Landsborough, Australia Honda CRF450R
2 32 Justin Cooper Cairo, NY Yamaha YZ450F
3 94 Ken Roczen Mattstedt Suzuki RM-Z450
";

const PALA_450: &str = "Fox Raceway - Pala, California
ROUND 2 - May 25, 2024
450 Class
Overall Results
POS # RIDER HOMETOWN BIKE
1 94 Ken Roczen Mattstedt Suzuki RM-Z450
2 1 Jett Lawrence Landsborough, Australia Honda CRF450R
";

fn sheet_dir() -> TempDir {
    let temp_dir = TempDir::new().unwrap();
    for (relative, content) in [
        ("2024/hangtown/450_overall.txt", HANGTOWN_450),
        ("2024/pala/450_overall.txt", PALA_450),
        ("2024/pala/schedule.txt", "Practice Schedule\n"),
        ("2024/pala/450_overall.pdf", "%PDF-1.7"),
    ] {
        let path = temp_dir.path().join(relative);
        std::fs::create_dir_all(path.parent().unwrap()).unwrap();
        std::fs::write(path, content).unwrap();
    }
    temp_dir
}

fn processor() -> BatchProcessor {
    BatchProcessor::new(&ProcessingConfig {
        workers: 2,
        ..Default::default()
    })
    .unwrap()
}

#[tokio::test]
async fn test_directory_to_csv_and_back() {
    let sheets = sheet_dir();
    let out_dir = TempDir::new().unwrap();
    let output = out_dir.path().join("race_results.csv");

    let outcome = processor().process_directory(sheets.path()).await.unwrap();
    assert_eq!(outcome.stats.files_seen, 3);
    assert_eq!(outcome.stats.events, 2);
    assert_eq!(outcome.stats.rows, 5);
    assert_eq!(outcome.stats.files_skipped, 1);
    assert_eq!(outcome.stats.diagnostics, 2);

    let summary = RaceTableWriter::new(TableFormat::Csv)
        .write(&outcome.events, &output)
        .unwrap();
    assert_eq!(summary.rows, 5);

    let reloaded = load_events(&output).unwrap();
    assert_eq!(reloaded, outcome.events);
}

#[tokio::test]
async fn test_compact_parquet_with_published_sources() {
    let sheets = sheet_dir();
    let out_dir = TempDir::new().unwrap();
    let output = out_dir.path().join("race_results.parquet");
    let local_root = format!("{}/", sheets.path().display());

    let outcome = processor().process_directory(sheets.path()).await.unwrap();
    RaceTableWriter::new(TableFormat::from_path(&output))
        .with_compact(true)
        .with_source_rewrite(Some(SourceRewrite::new(
            local_root,
            "https://americanmotocrossresults.com/live/archives/mx/",
        )))
        .write(&outcome.events, &output)
        .unwrap();

    let records = load_records(&output).unwrap();
    assert_eq!(records.len(), 5);
    assert!(records.iter().all(|r| r.round.is_none() && r.hometown.is_none()));
    assert_eq!(
        records[0].source,
        "https://americanmotocrossresults.com/live/archives/mx/2024/hangtown/450_overall.pdf"
    );
}

#[tokio::test]
async fn test_driver_history_query() {
    let sheets = sheet_dir();
    let out_dir = TempDir::new().unwrap();
    let output = out_dir.path().join("race_results.csv");

    let outcome = processor().process_directory(sheets.path()).await.unwrap();
    RaceTableWriter::new(TableFormat::Csv)
        .write(&outcome.events, &output)
        .unwrap();

    let records = load_records(&output).unwrap();
    let finishes = ResultQuery::new().driver("ken roczen").year(2024).apply(&records);
    let summary: Vec<(Option<&str>, u32)> = finishes
        .iter()
        .map(|r| (r.track_name.as_deref(), r.position))
        .collect();
    assert_eq!(
        summary,
        vec![
            (Some("Hangtown Motocross Classic"), 3),
            (Some("Fox Raceway"), 1),
        ]
    );

    let events = load_events(&output).unwrap();
    let at_pala = ResultQuery::new().track("Fox Raceway").select_events(&events);
    assert_eq!(at_pala.len(), 1);
    assert_eq!(at_pala[0].rows[0].driver_name, "Ken Roczen");
}

#[test]
fn test_config_file_drives_processing() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("config.json");
    std::fs::write(
        &path,
        r#"{"processing": {"workers": 1, "file_pattern": "*_overall.txt"}, "export": {"compact": true}}"#,
    )
    .unwrap();

    let config = Config::from_file(&path).unwrap();
    assert!(config.validate().is_ok());
    assert_eq!(config.processing.workers, 1);
    assert!(config.export.compact);

    let sheets = sheet_dir();
    let files = BatchProcessor::new(&config.processing)
        .unwrap()
        .discover_files(sheets.path())
        .unwrap();
    assert_eq!(files.len(), 2);
    assert!(files.iter().all(|f| f.extension() == Some(Path::new("txt").as_os_str())));
}
