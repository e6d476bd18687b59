//! CSV loading of raw track rows.
//!
//! The header must list the dataset columns in order (names compared ignoring
//! case and surrounding whitespace). Every numeric field of a row is parsed
//! here; categorical and boolean fields are left as text for the cleaner.

use super::error::DatasetError;
use super::models::{AudioFeatures, Engagement, RawTrack, COLUMNS};
use csv::StringRecord;
use std::io::Read;
use std::path::Path;
use tracing::{debug, info, warn};

/// What to do with a row whose numeric fields do not parse.
#[derive(PartialEq, Eq, Clone, Copy, Debug, Default, clap::ValueEnum)]
pub enum MalformedRowPolicy {
    /// Skip the row and keep loading.
    Drop,
    /// Abort the whole load.
    #[default]
    Fail,
}

impl std::fmt::Display for MalformedRowPolicy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MalformedRowPolicy::Drop => f.write_str("drop"),
            MalformedRowPolicy::Fail => f.write_str("fail"),
        }
    }
}

#[derive(Debug, Default)]
pub struct LoadOutcome {
    pub rows: Vec<RawTrack>,
    /// Rows skipped under [`MalformedRowPolicy::Drop`].
    pub malformed_dropped: usize,
}

pub fn load_csv<P: AsRef<Path>>(
    path: P,
    policy: MalformedRowPolicy,
) -> Result<LoadOutcome, DatasetError> {
    let path = path.as_ref();
    let path_str = path.display().to_string();
    info!("Loading tracks from {}", path_str);

    let file = std::fs::File::open(path).map_err(|e| DatasetError::Io {
        path: path_str.clone(),
        source: e,
    })?;
    read_csv(file, &path_str, policy)
}

/// Reads raw rows from any CSV source. `source_name` is only used in errors
/// and logs.
pub fn read_csv<R: Read>(
    source: R,
    source_name: &str,
    policy: MalformedRowPolicy,
) -> Result<LoadOutcome, DatasetError> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .from_reader(source);

    let headers = reader.headers().map_err(|e| DatasetError::Csv {
        path: source_name.to_string(),
        source: e,
    })?;
    check_headers(headers, source_name)?;

    let mut outcome = LoadOutcome::default();
    for result in reader.records() {
        let record = result.map_err(|e| DatasetError::Csv {
            path: source_name.to_string(),
            source: e,
        })?;
        let line = record.position().map(|p| p.line()).unwrap_or(0);

        match parse_row(&record, line) {
            Ok(row) => outcome.rows.push(row),
            Err(e) => match policy {
                MalformedRowPolicy::Fail => return Err(e),
                MalformedRowPolicy::Drop => {
                    warn!("Dropping row from {}: {}", source_name, e);
                    outcome.malformed_dropped += 1;
                }
            },
        }
    }

    debug!(
        "Read {} rows from {} ({} malformed dropped)",
        outcome.rows.len(),
        source_name,
        outcome.malformed_dropped
    );
    Ok(outcome)
}

fn check_headers(headers: &StringRecord, source_name: &str) -> Result<(), DatasetError> {
    if headers.len() != COLUMNS.len() {
        return Err(DatasetError::SchemaMismatch {
            path: source_name.to_string(),
            reason: format!(
                "expected {} columns, found {} ({})",
                COLUMNS.len(),
                headers.len(),
                headers.iter().collect::<Vec<_>>().join(", ")
            ),
        });
    }
    for (index, (actual, expected)) in headers.iter().zip(COLUMNS.iter()).enumerate() {
        if !actual.trim().eq_ignore_ascii_case(expected) {
            return Err(DatasetError::SchemaMismatch {
                path: source_name.to_string(),
                reason: format!(
                    "column {} should be '{}', found '{}'",
                    index + 1,
                    expected,
                    actual
                ),
            });
        }
    }
    Ok(())
}

/// Positional access to a record whose header has already been checked.
struct Row<'a> {
    record: &'a StringRecord,
    line: u64,
}

impl Row<'_> {
    fn text(&self, column: usize) -> &str {
        self.record.get(column).unwrap_or("")
    }

    fn invalid(&self, column: usize, reason: impl Into<String>) -> DatasetError {
        DatasetError::Validation {
            line: self.line,
            column: COLUMNS[column],
            value: self.text(column).to_string(),
            reason: reason.into(),
        }
    }

    fn real(&self, column: usize) -> Result<f64, DatasetError> {
        let raw = self.text(column).trim();
        if raw.is_empty() {
            return Err(self.invalid(column, "missing value"));
        }
        let value: f64 = raw
            .parse()
            .map_err(|e: std::num::ParseFloatError| self.invalid(column, e.to_string()))?;
        if !value.is_finite() {
            return Err(self.invalid(column, "not a finite number"));
        }
        Ok(value)
    }

    /// Engagement counter. Empty means missing; `123.0` is accepted.
    fn counter(&self, column: usize) -> Result<Option<i64>, DatasetError> {
        let raw = self.text(column).trim();
        if raw.is_empty() {
            return Ok(None);
        }
        if let Ok(value) = raw.parse::<i64>() {
            if value < 0 {
                return Err(self.invalid(column, "counter must be non-negative"));
            }
            return Ok(Some(value));
        }
        let value: f64 = raw
            .parse()
            .map_err(|e: std::num::ParseFloatError| self.invalid(column, e.to_string()))?;
        if !value.is_finite() || value.fract() != 0.0 {
            return Err(self.invalid(column, "counter must be a whole number"));
        }
        if value < 0.0 {
            return Err(self.invalid(column, "counter must be non-negative"));
        }
        if value >= i64::MAX as f64 {
            return Err(self.invalid(column, "counter out of range"));
        }
        Ok(Some(value as i64))
    }
}

fn parse_row(record: &StringRecord, line: u64) -> Result<RawTrack, DatasetError> {
    let row = Row { record, line };
    Ok(RawTrack {
        artist: row.text(0).to_string(),
        track: row.text(1).to_string(),
        album: row.text(2).to_string(),
        album_type: row.text(3).to_string(),
        features: AudioFeatures {
            danceability: row.real(4)?,
            energy: row.real(5)?,
            loudness: row.real(6)?,
            speechiness: row.real(7)?,
            acousticness: row.real(8)?,
            instrumentalness: row.real(9)?,
            liveness: row.real(10)?,
            valence: row.real(11)?,
            tempo: row.real(12)?,
        },
        duration_min: row.real(13)?,
        title: row.text(14).to_string(),
        channel: row.text(15).to_string(),
        engagement: Engagement {
            views: row.counter(16)?,
            likes: row.counter(17)?,
            comments: row.counter(18)?,
            stream: row.counter(21)?,
        },
        licensed: row.text(19).to_string(),
        official_video: row.text(20).to_string(),
        energy_liveness: row.real(22)?,
        most_played_on: row.text(23).to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const HEADER: &str = "artist,track,album,album_type,danceability,energy,loudness,speechiness,acousticness,instrumentalness,liveness,valence,tempo,duration_min,title,channel,views,likes,comments,licensed,official_video,stream,energy_liveness,most_played_on";

    fn row(views: &str, energy: &str) -> String {
        format!(
            "Gorillaz,Feel Good Inc.,Demon Days,album,0.818,{},-6.679,0.177,0.00836,0.00233,0.613,0.772,138.559,3.71,Gorillaz - Feel Good Inc.,Gorillaz,{},6220896.0,169907.0,True,True,1040234854.0,1.3,Spotify",
            energy, views
        )
    }

    fn read(body: &str, policy: MalformedRowPolicy) -> Result<LoadOutcome, DatasetError> {
        read_csv(body.as_bytes(), "test.csv", policy)
    }

    #[test]
    fn test_reads_well_formed_row() {
        let csv = format!("{}\n{}\n", HEADER, row("693555221.0", "0.705"));
        let outcome = read(&csv, MalformedRowPolicy::Fail).unwrap();

        assert_eq!(outcome.rows.len(), 1);
        assert_eq!(outcome.malformed_dropped, 0);
        let track = &outcome.rows[0];
        assert_eq!(track.artist, "Gorillaz");
        assert_eq!(track.album_type, "album");
        assert_eq!(track.features.energy, 0.705);
        assert_eq!(track.duration_min, 3.71);
        assert_eq!(track.engagement.views, Some(693555221));
        assert_eq!(track.engagement.stream, Some(1040234854));
        assert_eq!(track.licensed, "True");
        assert_eq!(track.most_played_on, "Spotify");
    }

    #[test]
    fn test_empty_counter_is_missing() {
        let csv = format!("{}\n{}\n", HEADER, row("", "0.705"));
        let outcome = read(&csv, MalformedRowPolicy::Fail).unwrap();
        assert_eq!(outcome.rows[0].engagement.views, None);
    }

    #[test]
    fn test_header_names_ignore_case() {
        let csv = format!(
            "{}\n{}\n",
            HEADER.to_ascii_uppercase(),
            row("1", "0.5")
        );
        assert_eq!(read(&csv, MalformedRowPolicy::Fail).unwrap().rows.len(), 1);
    }

    #[test]
    fn test_header_mismatch_is_load_error() {
        let csv = HEADER.replace("energy,loudness", "loudness,energy");
        let err = read(&csv, MalformedRowPolicy::Drop).unwrap_err();
        assert!(err.is_load_error());
        assert!(matches!(err, DatasetError::SchemaMismatch { .. }));
    }

    #[test]
    fn test_missing_column_is_load_error() {
        let csv = HEADER.replace(",most_played_on", "");
        let err = read(&csv, MalformedRowPolicy::Drop).unwrap_err();
        assert!(matches!(err, DatasetError::SchemaMismatch { .. }));
    }

    #[test]
    fn test_short_row_is_load_error_even_when_dropping() {
        let csv = format!("{}\nGorillaz,Feel Good Inc.\n", HEADER);
        let err = read(&csv, MalformedRowPolicy::Drop).unwrap_err();
        assert!(matches!(err, DatasetError::Csv { .. }));
    }

    #[test]
    fn test_malformed_numeric_fails_with_line_and_column() {
        let csv = format!(
            "{}\n{}\n{}\n",
            HEADER,
            row("10", "0.5"),
            row("10", "loud")
        );
        let err = read(&csv, MalformedRowPolicy::Fail).unwrap_err();
        match err {
            DatasetError::Validation {
                line,
                column,
                value,
                ..
            } => {
                assert_eq!(line, 3);
                assert_eq!(column, "energy");
                assert_eq!(value, "loud");
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[test]
    fn test_malformed_numeric_is_dropped_by_policy() {
        let csv = format!(
            "{}\n{}\n{}\n{}\n",
            HEADER,
            row("10", "0.5"),
            row("-4", "0.5"),
            row("2.5", "0.5")
        );
        let outcome = read(&csv, MalformedRowPolicy::Drop).unwrap();
        assert_eq!(outcome.rows.len(), 1);
        assert_eq!(outcome.malformed_dropped, 2);
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let err = load_csv("/definitely/not/here.csv", MalformedRowPolicy::Fail).unwrap_err();
        assert!(matches!(err, DatasetError::Io { .. }));
        assert!(err.is_load_error());
    }
}
