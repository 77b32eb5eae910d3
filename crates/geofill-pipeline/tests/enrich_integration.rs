//! End-to-end pipeline tests: input file through enrichment to output file.

use std::collections::VecDeque;
use std::io::Write;
use std::path::PathBuf;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use geofill_core::EnrichConfig;
use geofill_pipeline::enrich_file;
use geofill_resolve::{CountryLookup, Outcome};

struct ScriptedLookup {
    script: Mutex<VecDeque<Outcome>>,
}

impl ScriptedLookup {
    fn new(script: Vec<Outcome>) -> Arc<Self> {
        Arc::new(Self {
            script: Mutex::new(script.into()),
        })
    }
}

#[async_trait]
impl CountryLookup for ScriptedLookup {
    async fn lookup(&self, _lat: &str, _lon: &str) -> Outcome {
        self.script
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or(Outcome::ZeroResult)
    }
}

fn write_input(dir: &tempfile::TempDir, contents: &str) -> PathBuf {
    let path = dir.path().join("posts.csv");
    let mut file = std::fs::File::create(&path).unwrap();
    file.write_all(contents.as_bytes()).unwrap();
    path
}

/// The single output file a run produced next to the input.
fn find_output(dir: &tempfile::TempDir) -> PathBuf {
    let mut outputs: Vec<PathBuf> = std::fs::read_dir(dir.path())
        .unwrap()
        .filter_map(|e| e.ok())
        .map(|e| e.path())
        .filter(|p| p.to_string_lossy().contains("-withCountries-"))
        .collect();
    assert_eq!(outputs.len(), 1, "expected exactly one output file");
    outputs.pop().unwrap()
}

#[tokio::test(start_paused = true)]
async fn test_mixed_sources_end_to_end() {
    let dir = tempfile::tempdir().unwrap();
    // Row 1 already has a country, row 2 resolves locally (Paris),
    // row 3 needs the remote provider, row 4 gets no result anywhere.
    let input = write_input(
        &dir,
        "id,location_latitude,location_longitude,country\r\n\
         1,10.0,10.0,Atlantis\r\n\
         2,48.8566,2.3522,\r\n\
         3,0.0,-30.0,\r\n\
         4,0.0,-31.0,\r\n",
    );

    let lookup = ScriptedLookup::new(vec![
        Outcome::Resolved("Germany".to_string()),
        Outcome::ZeroResult,
    ]);
    let report = enrich_file(&input, EnrichConfig::default(), lookup)
        .await
        .unwrap();

    assert_eq!(report.total, 4);
    assert_eq!(report.completed(), 4);
    assert_eq!(report.prefilled, 1);
    assert_eq!(report.resolved_locally, 1);
    assert_eq!(report.resolved_remotely, 1);
    assert_eq!(report.zero_results, 1);

    let raw = std::fs::read_to_string(find_output(&dir)).unwrap();
    let lines: Vec<&str> = raw.split("\r\n").collect();
    assert_eq!(lines[0], "id,location_latitude,location_longitude,country");
    assert_eq!(lines[1], "1,10.0,10.0,Atlantis");
    assert_eq!(lines[2], "2,48.8566,2.3522,France");
    assert_eq!(lines[3], "3,0.0,-30.0,Germany");
    assert_eq!(lines[4], "4,0.0,-31.0,");
}

#[tokio::test(start_paused = true)]
async fn test_quota_exhaustion_still_writes_every_row() {
    let dir = tempfile::tempdir().unwrap();
    let mut rows = String::from("id,location_latitude,location_longitude\r\n");
    for i in 0..10 {
        rows.push_str(&format!("{},0.0,-{}.0\r\n", i, 30 + i));
    }
    let input = write_input(&dir, &rows);

    let lookup = ScriptedLookup::new(vec![
        Outcome::Resolved("Germany".to_string()),
        Outcome::Resolved("France".to_string()),
        Outcome::Resolved("Spain".to_string()),
        Outcome::QuotaExceeded,
    ]);
    let report = enrich_file(&input, EnrichConfig::default(), lookup)
        .await
        .unwrap();

    assert!(report.quota_hit);
    assert_eq!(report.resolved_remotely, 3);

    // Partial results are flushed: all ten rows, the last seven unresolved
    let raw = std::fs::read_to_string(find_output(&dir)).unwrap();
    let lines: Vec<&str> = raw.split("\r\n").filter(|l| !l.is_empty()).collect();
    assert_eq!(lines.len(), 11);
    assert!(lines[1].ends_with(",Germany"));
    assert!(lines[3].ends_with(",Spain"));
    for line in &lines[4..] {
        assert!(line.ends_with(','), "unexpected country in {:?}", line);
    }
}

#[tokio::test(start_paused = true)]
async fn test_output_name_carries_input_path_and_timestamp() {
    let dir = tempfile::tempdir().unwrap();
    let input = write_input(&dir, "id,location_latitude,location_longitude\r\n");

    let lookup = ScriptedLookup::new(vec![]);
    let report = enrich_file(&input, EnrichConfig::default(), lookup)
        .await
        .unwrap();
    assert_eq!(report.total, 0);

    // Empty input still produces a header-only output file
    let output = find_output(&dir);
    let name = output.file_name().unwrap().to_string_lossy().into_owned();
    assert!(name.starts_with("posts.csv-withCountries-"));
    assert!(name.ends_with(".csv"));

    let raw = std::fs::read_to_string(&output).unwrap();
    assert_eq!(raw, "id,location_latitude,location_longitude,country\r\n");
}
