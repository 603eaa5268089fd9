//! Concurrent parsing of result sheet directories
//!
//! Files are discovered with `walkdir` and a glob pattern on the file name,
//! then parsed on tokio's blocking pool with a bounded number of sheets in
//! flight. A failing file is logged and counted; it never stops the batch.

use futures::stream::{self, StreamExt};
use glob::Pattern;
use indicatif::{ProgressBar, ProgressStyle};
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};
use tokio::task;
use tracing::{debug, error, info, warn};
use walkdir::WalkDir;

use crate::app::models::RaceEvent;
use crate::app::services::results_parser::{ParseOutcome, ResultsParser};
use crate::config::ProcessingConfig;
use crate::{Error, Result};

/// Counters for one batch run
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BatchStats {
    pub files_seen: usize,
    pub events: usize,
    pub rows: usize,

    /// Files read fine but holding no result rows
    pub files_skipped: usize,

    /// Files that could not be read
    pub files_failed: usize,

    /// Unresolved-field notes across all files
    pub diagnostics: usize,

    pub elapsed: Duration,
}

impl BatchStats {
    /// Share of seen files that produced an event, as a percentage
    pub fn success_rate(&self) -> f64 {
        if self.files_seen == 0 {
            0.0
        } else {
            (self.events as f64 / self.files_seen as f64) * 100.0
        }
    }
}

/// Parsed events, ordered by source, plus batch counters
#[derive(Debug, Clone)]
pub struct BatchOutcome {
    pub events: Vec<RaceEvent>,
    pub stats: BatchStats,
}

/// Parses many result sheets concurrently
#[derive(Debug, Clone)]
pub struct BatchProcessor {
    parser: ResultsParser,
    pattern: Pattern,
    workers: usize,
    show_progress: bool,
}

impl BatchProcessor {
    pub fn new(config: &ProcessingConfig) -> Result<Self> {
        let pattern = Pattern::new(&config.file_pattern).map_err(|e| {
            Error::configuration(format!("invalid file pattern '{}': {}", config.file_pattern, e))
        })?;
        let parser = match &config.track_name {
            Some(track) => ResultsParser::new().with_track_name(track.clone()),
            None => ResultsParser::new(),
        };

        Ok(Self {
            parser,
            pattern,
            workers: config.workers.max(1),
            show_progress: false,
        })
    }

    /// Draw a progress bar while parsing
    pub fn with_progress(mut self, show_progress: bool) -> Self {
        self.show_progress = show_progress;
        self
    }

    /// Find matching files under `input`, sorted by path
    pub fn discover_files(&self, input: &Path) -> Result<Vec<PathBuf>> {
        if !input.exists() {
            return Err(Error::source_not_found(input.display().to_string()));
        }
        if input.is_file() {
            return Ok(vec![input.to_path_buf()]);
        }

        let mut files = Vec::new();
        for entry in WalkDir::new(input).follow_links(true) {
            let entry = entry.map_err(|e| {
                Error::directory_traversal(format!("Failed to scan {}", input.display()), e)
            })?;
            if !entry.file_type().is_file() {
                continue;
            }
            let name = entry.file_name().to_string_lossy();
            if self.pattern.matches(&name) {
                files.push(entry.into_path());
            }
        }

        files.sort();
        info!(
            "Found {} files matching '{}' under {}",
            files.len(),
            self.pattern.as_str(),
            input.display()
        );
        Ok(files)
    }

    /// Discover and parse every matching file under `input`
    pub async fn process_directory(&self, input: &Path) -> Result<BatchOutcome> {
        let files = self.discover_files(input)?;
        Ok(self.process_files(&files).await)
    }

    /// Parse the given files with at most `workers` in flight
    pub async fn process_files(&self, files: &[PathBuf]) -> BatchOutcome {
        let start = Instant::now();
        let pb = self.progress_bar(files.len());

        let results: Vec<(PathBuf, Result<ParseOutcome>)> = stream::iter(files.iter().cloned())
            .map(|path| {
                let parser = self.parser.clone();
                let pb = pb.clone();
                async move {
                    if let Some(file_name) = path.file_name() {
                        pb.set_message(format!("Parsing: {}", file_name.to_string_lossy()));
                    }

                    let result = task::spawn_blocking({
                        let path = path.clone();
                        move || parser.parse_file(&path)
                    })
                    .await
                    .unwrap_or_else(|e| {
                        Err(Error::task_failed(format!("{}: {}", path.display(), e)))
                    });
                    pb.inc(1);
                    (path, result)
                }
            })
            .buffer_unordered(self.workers)
            .collect()
            .await;

        pb.finish_with_message("All result sheets parsed");

        let mut stats = BatchStats {
            files_seen: files.len(),
            ..Default::default()
        };
        let mut events = Vec::new();

        for (path, result) in results {
            match result {
                Ok(outcome) => {
                    stats.diagnostics += outcome.stats.diagnostics.len();
                    match outcome.event {
                        Some(event) => {
                            debug!("{}: {} rows", path.display(), event.rows.len());
                            stats.rows += event.rows.len();
                            events.push(event);
                        }
                        None => {
                            debug!("Skipped file (no result rows): {}", path.display());
                            stats.files_skipped += 1;
                        }
                    }
                }
                Err(e @ Error::TaskFailed { .. }) => {
                    error!("Failed to parse {}: {}", path.display(), e);
                    stats.files_failed += 1;
                }
                Err(e) => {
                    warn!("Failed to parse {}: {}", path.display(), e);
                    stats.files_failed += 1;
                }
            }
        }

        events.sort_by(|a, b| a.source.cmp(&b.source));
        stats.events = events.len();
        stats.elapsed = start.elapsed();

        info!(
            "Parsed {} events ({} rows) from {} files in {:.2?}",
            stats.events, stats.rows, stats.files_seen, stats.elapsed
        );
        BatchOutcome { events, stats }
    }

    fn progress_bar(&self, len: usize) -> ProgressBar {
        if !self.show_progress {
            return ProgressBar::hidden();
        }

        let pb = ProgressBar::new(len as u64);
        let style = ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} ({eta}) {msg}")
            .map(|style| style.progress_chars("#>-"))
            .unwrap_or_else(|_| ProgressStyle::default_bar());
        pb.set_style(style);
        pb.set_message("Parsing result sheets");
        pb
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    const SHEET: &str = "Hangtown Motocross Classic - Rancho Cordova, CA\n\
                         ROUND 1 - May 18, 2024\n\
                         450 Class\n\
                         Moto 1 Results\n\
                         POS # RIDER HOMETOWN BIKE\n\
                         1 1 Jett Lawrence Landsborough, Australia Honda CRF450R\n\
                         2 32 Justin Cooper Cairo, NY Yamaha YZ450F\n";

    fn write(dir: &Path, relative: &str, content: &str) -> PathBuf {
        let path = dir.join(relative);
        std::fs::create_dir_all(path.parent().unwrap()).unwrap();
        std::fs::write(&path, content).unwrap();
        path
    }

    fn processor(workers: usize) -> BatchProcessor {
        let config = ProcessingConfig {
            workers,
            ..Default::default()
        };
        BatchProcessor::new(&config).unwrap()
    }

    #[test]
    fn test_discovery_matches_pattern_recursively() {
        let temp_dir = TempDir::new().unwrap();
        write(temp_dir.path(), "2024/b.txt", SHEET);
        write(temp_dir.path(), "a.txt", SHEET);
        write(temp_dir.path(), "2024/450_overall.pdf", "binary");

        let files = processor(2).discover_files(temp_dir.path()).unwrap();
        let names: Vec<String> = files
            .iter()
            .map(|p| p.strip_prefix(temp_dir.path()).unwrap().display().to_string())
            .collect();
        assert_eq!(names, vec!["2024/b.txt", "a.txt"]);
    }

    #[test]
    fn test_discovery_of_missing_directory() {
        let result = processor(1).discover_files(Path::new("/nonexistent/results"));
        assert!(matches!(result, Err(Error::SourceNotFound { .. })));
    }

    #[test]
    fn test_invalid_pattern() {
        let config = ProcessingConfig {
            file_pattern: "[".to_string(),
            ..Default::default()
        };
        assert!(matches!(
            BatchProcessor::new(&config),
            Err(Error::Configuration { .. })
        ));
    }

    #[tokio::test]
    async fn test_process_directory() {
        let temp_dir = TempDir::new().unwrap();
        write(temp_dir.path(), "pala/250.txt", SHEET);
        write(temp_dir.path(), "hangtown/450.txt", SHEET);
        write(temp_dir.path(), "hangtown/cover.txt", "Entry List\nPractice Schedule\n");

        let outcome = processor(3)
            .process_directory(temp_dir.path())
            .await
            .unwrap();

        assert_eq!(outcome.stats.files_seen, 3);
        assert_eq!(outcome.stats.events, 2);
        assert_eq!(outcome.stats.rows, 4);
        assert_eq!(outcome.stats.files_skipped, 1);
        assert_eq!(outcome.stats.files_failed, 0);

        let sources: Vec<&str> = outcome.events.iter().map(|e| e.source.as_str()).collect();
        let mut sorted = sources.clone();
        sorted.sort();
        assert_eq!(sources, sorted);
        assert!(sources[0].ends_with("450.txt"));
    }

    #[tokio::test]
    async fn test_unreadable_file_is_counted_not_fatal() {
        let temp_dir = TempDir::new().unwrap();
        let good = write(temp_dir.path(), "good.txt", SHEET);
        let missing = temp_dir.path().join("missing.txt");

        let outcome = processor(2).process_files(&[missing, good]).await;
        assert_eq!(outcome.stats.files_failed, 1);
        assert_eq!(outcome.stats.events, 1);
        assert_eq!(outcome.stats.success_rate(), 50.0);
    }

    #[tokio::test]
    async fn test_track_name_override() {
        let temp_dir = TempDir::new().unwrap();
        write(temp_dir.path(), "sheet.txt", SHEET);

        let config = ProcessingConfig {
            track_name: Some("Hangtown".to_string()),
            ..Default::default()
        };
        let outcome = BatchProcessor::new(&config)
            .unwrap()
            .process_directory(temp_dir.path())
            .await
            .unwrap();
        assert_eq!(outcome.events[0].track_name.as_deref(), Some("Hangtown"));
    }
}
