//! Single-file CSV ingestion
//!
//! Expected header: `race, date, circuit, driver, nationality, team, position`
//! in any order. `race`, `driver` and `position` are required. The others
//! fall back to "Unknown" when absent or blank and are otherwise kept
//! verbatim, so team names match exactly. Only `race`, `driver` and
//! `position` are trimmed.
//!
//! Rows need not match the header length. Extra trailing fields are ignored
//! and missing trailing optional fields count as blank. A row too short to
//! carry a required field is a row-level error, like a bad position.

use std::io::Read;
use std::path::Path;
use serde::Deserialize;
use crate::entity::{RaceResult, UNKNOWN};
use crate::event::{EventSink, IngestEvent};
use crate::ingest::{FileSummary, RowPolicy};
use crate::season::Season;
use crate::{Error, Result};

/// Raw row as it appears in the file
#[derive(Debug, Deserialize)]
struct ResultRow {
    race: String,
    driver: String,
    position: String,
    #[serde(default)]
    date: Option<String>,
    #[serde(default)]
    circuit: Option<String>,
    #[serde(default)]
    nationality: Option<String>,
    #[serde(default)]
    team: Option<String>,
}

/// A row with defaults applied and its position parsed
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResultRecord {
    pub race: String,
    pub date: String,
    pub circuit: String,
    pub driver: String,
    pub nationality: String,
    pub team: String,
    pub position: i64,
}

impl ResultRow {
    fn into_record(self, file: &Path, line: u64) -> Result<ResultRecord> {
        let position = self.position.trim().parse::<i64>().map_err(|_| Error::Parse {
            file: file.to_path_buf(),
            line,
            value: self.position.clone(),
        })?;

        Ok(ResultRecord {
            race: self.race.trim().to_string(),
            date: or_unknown(self.date),
            circuit: or_unknown(self.circuit),
            driver: self.driver.trim().to_string(),
            nationality: or_unknown(self.nationality),
            team: or_unknown(self.team),
            position,
        })
    }
}

fn or_unknown(value: Option<String>) -> String {
    value
        .filter(|v| !v.trim().is_empty())
        .unwrap_or_else(|| UNKNOWN.to_string())
}

const REQUIRED_COLUMNS: [&str; 3] = ["race", "driver", "position"];

/// Header index of each required column present in the file
fn required_columns(headers: &csv::StringRecord) -> Vec<(&'static str, usize)> {
    REQUIRED_COLUMNS
        .iter()
        .filter_map(|name| headers.iter().position(|h| h == *name).map(|idx| (*name, idx)))
        .collect()
}

/// Bring a row to the header length: extra fields are dropped, missing
/// optional fields become blank. Fails if a required field is cut off.
fn conform_row(
    record: &mut csv::StringRecord,
    width: usize,
    required: &[(&'static str, usize)],
    file: &Path,
    line: u64,
) -> Result<()> {
    if let Some((field, _)) = required.iter().find(|(_, idx)| *idx >= record.len()) {
        return Err(Error::MissingField {
            file: file.to_path_buf(),
            line,
            field: field.to_string(),
        });
    }
    record.truncate(width);
    while record.len() < width {
        record.push_field("");
    }
    Ok(())
}

impl<'a> Season<'a> {
    /// Ingest one CSV file
    pub fn ingest_file(&self, path: &Path, sink: &mut dyn EventSink) -> Result<FileSummary> {
        let file = std::fs::File::open(path)?;
        self.ingest_reader(path, file, sink)
    }

    /// Ingest CSV content from any reader. `source` names it in events and errors.
    pub fn ingest_reader<R: Read>(
        &self,
        source: &Path,
        input: R,
        sink: &mut dyn EventSink,
    ) -> Result<FileSummary> {
        let mut reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .trim(csv::Trim::Headers)
            .from_reader(input);
        let headers = reader.headers()?.clone();
        let required = required_columns(&headers);

        let mut summary = FileSummary::new(source.to_path_buf());
        let mut record = csv::StringRecord::new();

        while reader.read_record(&mut record)? {
            let line = record.position().map(|p| p.line()).unwrap_or(0);

            match self.parse_row(&mut record, &headers, &required, source, line) {
                Ok(parsed) => {
                    self.load_record(&parsed, sink)?;
                    summary.rows_loaded += 1;
                }
                Err(err) if err.is_row_error() && self.policy == RowPolicy::Skip => {
                    tracing::debug!("Skipping row: {}", err);
                    sink.emit(IngestEvent::RowSkipped {
                        path: source.to_path_buf(),
                        line,
                        reason: err.to_string(),
                    });
                    summary.rows_skipped += 1;
                }
                Err(err) => return Err(err),
            }
        }

        tracing::info!(
            "Loaded {} rows from {} ({} skipped)",
            summary.rows_loaded,
            source.display(),
            summary.rows_skipped
        );
        sink.emit(IngestEvent::FileLoaded(summary.clone()));
        Ok(summary)
    }

    fn parse_row(
        &self,
        record: &mut csv::StringRecord,
        headers: &csv::StringRecord,
        required: &[(&'static str, usize)],
        source: &Path,
        line: u64,
    ) -> Result<ResultRecord> {
        conform_row(record, headers.len(), required, source, line)?;
        let row: ResultRow = record.deserialize(Some(headers))?;
        row.into_record(source, line)
    }

    /// Create whatever entities the record references, then record its result
    pub fn load_record(&self, record: &ResultRecord, sink: &mut dyn EventSink) -> Result<RaceResult> {
        if self.store.ensure_team(&record.team)? {
            tracing::debug!("Created team {}", record.team);
            sink.emit(IngestEvent::TeamCreated { name: record.team.clone() });
        }

        if self.store.ensure_driver(&record.driver, &record.nationality)? {
            tracing::debug!("Created driver {} ({})", record.driver, record.nationality);
            sink.emit(IngestEvent::DriverCreated {
                name: record.driver.clone(),
                nationality: record.nationality.clone(),
            });
        }

        if self.store.ensure_race(&record.race, &record.date, &record.circuit)? {
            tracing::debug!("Created race {} ({}, {})", record.race, record.date, record.circuit);
            sink.emit(IngestEvent::RaceCreated {
                grand_prix: record.race.clone(),
                date: record.date.clone(),
                circuit: record.circuit.clone(),
            });
        }

        self.recorder()
            .record_result(&record.race, &record.driver, &record.team, record.position)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::SqliteStore;

    fn ingest(season: &Season, csv: &str, events: &mut Vec<IngestEvent>) -> Result<FileSummary> {
        season.ingest_reader(Path::new("round.csv"), csv.as_bytes(), events)
    }

    #[test]
    fn test_defaults_applied() {
        let store = SqliteStore::open_in_memory().unwrap();
        let season = Season::new(&store);
        let mut events = Vec::new();

        ingest(&season, "race,driver,position\nMonza,Driver1,1\n", &mut events).unwrap();

        let driver = store.get_driver("Driver1").unwrap().unwrap();
        assert_eq!(driver.nationality, UNKNOWN);
        let race = store.get_race("Monza").unwrap().unwrap();
        assert_eq!(race.date, UNKNOWN);
        assert_eq!(race.circuit, UNKNOWN);
        assert!(store.get_team(UNKNOWN).unwrap().is_some());
    }

    #[test]
    fn test_blank_optional_fields_default() {
        let store = SqliteStore::open_in_memory().unwrap();
        let season = Season::new(&store);
        let mut events = Vec::new();

        ingest(
            &season,
            "race,date,circuit,driver,nationality,team,position\nMonza, , ,Driver1,,  ,4\n",
            &mut events,
        )
        .unwrap();

        assert!(store.get_team(UNKNOWN).unwrap().is_some());
        assert_eq!(store.get_driver("Driver1").unwrap().unwrap().nationality, UNKNOWN);
        assert_eq!(store.get_race("Monza").unwrap().unwrap().date, UNKNOWN);
    }

    #[test]
    fn test_names_trimmed() {
        let store = SqliteStore::open_in_memory().unwrap();
        let season = Season::new(&store);
        let mut events = Vec::new();

        ingest(&season, "race,driver,position,team\n  Monza  ,  Driver1 , 2 ,TeamA\n", &mut events).unwrap();

        assert!(store.get_driver("Driver1").unwrap().is_some());
        assert!(store.get_race("Monza").unwrap().is_some());
    }

    #[test]
    fn test_creation_events_in_order() {
        let store = SqliteStore::open_in_memory().unwrap();
        let season = Season::new(&store);
        let mut events = Vec::new();

        ingest(
            &season,
            "race,date,circuit,driver,nationality,team,position\n\
             Monza,2024-09-01,Monza Circuit,New Driver,Thai,Williams,7\n",
            &mut events,
        )
        .unwrap();

        assert_eq!(
            events[..3],
            [
                IngestEvent::TeamCreated { name: "Williams".into() },
                IngestEvent::DriverCreated { name: "New Driver".into(), nationality: "Thai".into() },
                IngestEvent::RaceCreated {
                    grand_prix: "Monza".into(),
                    date: "2024-09-01".into(),
                    circuit: "Monza Circuit".into(),
                },
            ]
        );
        assert!(matches!(events[3], IngestEvent::FileLoaded(ref s) if s.rows_loaded == 1));
    }

    #[test]
    fn test_known_entities_not_announced_twice() {
        let store = SqliteStore::open_in_memory().unwrap();
        let season = Season::new(&store);
        let mut events = Vec::new();

        ingest(
            &season,
            "race,driver,position,team\nMonza,A,1,X\nMonza,B,2,X\n",
            &mut events,
        )
        .unwrap();

        let teams = events.iter().filter(|e| matches!(e, IngestEvent::TeamCreated { .. })).count();
        let races = events.iter().filter(|e| matches!(e, IngestEvent::RaceCreated { .. })).count();
        let drivers = events.iter().filter(|e| matches!(e, IngestEvent::DriverCreated { .. })).count();
        assert_eq!((teams, races, drivers), (1, 1, 2));
    }

    #[test]
    fn test_later_row_overwrites_earlier() {
        let store = SqliteStore::open_in_memory().unwrap();
        let season = Season::new(&store);
        let mut events = Vec::new();

        ingest(
            &season,
            "race,driver,position,team\nMonza,A,3,X\nMonza,A,1,X\n",
            &mut events,
        )
        .unwrap();

        assert_eq!(store.count_results().unwrap(), 1);
        let standings = season.standings().driver_standings().unwrap();
        assert_eq!(standings[0].points, 25);
    }

    #[test]
    fn test_bad_position_aborts_by_default() {
        let store = SqliteStore::open_in_memory().unwrap();
        let season = Season::new(&store);
        let mut events = Vec::new();

        let err = ingest(
            &season,
            "race,driver,position\nMonza,A,1\nMonza,B,DNF\nMonza,C,3\n",
            &mut events,
        )
        .unwrap_err();

        match err {
            Error::Parse { line, value, .. } => {
                assert_eq!(line, 3);
                assert_eq!(value, "DNF");
            }
            other => panic!("unexpected error: {other}"),
        }
        // rows before the bad one stay committed
        assert_eq!(store.count_results().unwrap(), 1);
        assert!(store.get_driver("C").unwrap().is_none());
    }

    #[test]
    fn test_bad_position_skipped_with_skip_policy() {
        let store = SqliteStore::open_in_memory().unwrap();
        let season = Season::new(&store).with_row_policy(RowPolicy::Skip);
        let mut events = Vec::new();

        let summary = ingest(
            &season,
            "race,driver,position\nMonza,A,1\nMonza,B,2.5\nMonza,C,3\n",
            &mut events,
        )
        .unwrap();

        assert_eq!(summary.rows_loaded, 2);
        assert_eq!(summary.rows_skipped, 1);
        assert!(events.iter().any(|e| matches!(e, IngestEvent::RowSkipped { line: 3, .. })));
        assert!(store.get_driver("B").unwrap().is_none());
    }

    #[test]
    fn test_missing_required_column_is_fatal() {
        let store = SqliteStore::open_in_memory().unwrap();
        let season = Season::new(&store).with_row_policy(RowPolicy::Skip);
        let mut events = Vec::new();

        let err = ingest(&season, "race,driver\nMonza,A\n", &mut events).unwrap_err();
        assert!(matches!(err, Error::Csv(_)));
    }

    #[test]
    fn test_team_names_kept_verbatim() {
        let store = SqliteStore::open_in_memory().unwrap();
        let season = Season::new(&store);
        let mut events = Vec::new();

        ingest(
            &season,
            "race,driver,position,team\nMonza,A,1,Ferrari\nMonza,B,2, Ferrari\n",
            &mut events,
        )
        .unwrap();

        assert_eq!(store.count_teams().unwrap(), 2);
        assert!(store.get_team("Ferrari").unwrap().is_some());
        assert!(store.get_team(" Ferrari").unwrap().is_some());
    }

    #[test]
    fn test_optional_values_not_trimmed() {
        let store = SqliteStore::open_in_memory().unwrap();
        let season = Season::new(&store);
        let mut events = Vec::new();

        ingest(
            &season,
            "race,driver,nationality,position\nMonza,A, Finnish ,1\n",
            &mut events,
        )
        .unwrap();

        assert_eq!(store.get_driver("A").unwrap().unwrap().nationality, " Finnish ");
    }

    #[test]
    fn test_trailing_comma_ignored() {
        let store = SqliteStore::open_in_memory().unwrap();
        let season = Season::new(&store);
        let mut events = Vec::new();

        let summary = ingest(
            &season,
            "race,driver,position\nMonza,A,1\nMonza,B,2,\nMonza,C,3,extra,fields\n",
            &mut events,
        )
        .unwrap();

        assert_eq!(summary.rows_loaded, 3);
        assert_eq!(store.count_results().unwrap(), 3);
    }

    #[test]
    fn test_short_row_defaults_optional_fields() {
        let store = SqliteStore::open_in_memory().unwrap();
        let season = Season::new(&store);
        let mut events = Vec::new();

        ingest(
            &season,
            "race,driver,position,team,nationality\nMonza,A,1\n",
            &mut events,
        )
        .unwrap();

        assert!(store.get_team(UNKNOWN).unwrap().is_some());
        assert_eq!(store.get_driver("A").unwrap().unwrap().nationality, UNKNOWN);
    }

    #[test]
    fn test_short_row_missing_required_field() {
        let store = SqliteStore::open_in_memory().unwrap();
        let season = Season::new(&store);
        let mut events = Vec::new();

        let err = ingest(&season, "race,driver,position\nMonza,A\n", &mut events).unwrap_err();
        match err {
            Error::MissingField { line, field, .. } => {
                assert_eq!(line, 2);
                assert_eq!(field, "position");
            }
            other => panic!("unexpected error: {other}"),
        }

        let store = SqliteStore::open_in_memory().unwrap();
        let season = Season::new(&store).with_row_policy(RowPolicy::Skip);
        let summary = ingest(&season, "race,driver,position\nMonza,A\nMonza,B,2\n", &mut events).unwrap();
        assert_eq!(summary.rows_skipped, 1);
        assert_eq!(summary.rows_loaded, 1);
    }

    #[test]
    fn test_header_only_file() {
        let store = SqliteStore::open_in_memory().unwrap();
        let season = Season::new(&store);
        let mut events = Vec::new();

        let summary = ingest(&season, "race,driver,position\n", &mut events).unwrap();
        assert_eq!(summary.rows_loaded, 0);
        assert_eq!(store.count_results().unwrap(), 0);
    }
}
