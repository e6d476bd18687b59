//! Loading and cleaning of the `spotify` track dataset.

mod cleaner;
mod error;
mod loader;
mod models;

pub use cleaner::{clean, CleanOutcome};
pub use error::DatasetError;
pub use loader::{load_csv, read_csv, LoadOutcome, MalformedRowPolicy};
pub use models::*;

use std::path::Path;
use tracing::info;

/// Cleaned tracks plus what was discarded on the way.
#[derive(Debug)]
pub struct Dataset {
    pub tracks: Vec<Track>,
    pub malformed_dropped: usize,
    pub dropped_non_positive_duration: usize,
    pub dropped_malformed_fields: usize,
}

impl Dataset {
    /// Cleans loaded rows. Fails when nothing survives.
    pub fn from_outcome(loaded: LoadOutcome) -> Result<Self, DatasetError> {
        let malformed_dropped = loaded.malformed_dropped;
        let cleaned = clean(loaded.rows);
        if cleaned.tracks.is_empty() {
            return Err(DatasetError::EmptyInput);
        }
        Ok(Self {
            tracks: cleaned.tracks,
            malformed_dropped,
            dropped_non_positive_duration: cleaned.dropped_non_positive_duration,
            dropped_malformed_fields: cleaned.dropped_malformed_fields,
        })
    }
}

/// Loads and cleans a CSV file.
pub fn load_tracks<P: AsRef<Path>>(
    path: P,
    policy: MalformedRowPolicy,
) -> Result<Dataset, DatasetError> {
    let dataset = Dataset::from_outcome(load_csv(path, policy)?)?;
    info!(
        "Loaded {} tracks ({} malformed, {} non-positive duration, {} malformed fields dropped)",
        dataset.tracks.len(),
        dataset.malformed_dropped,
        dataset.dropped_non_positive_duration,
        dataset.dropped_malformed_fields
    );
    Ok(dataset)
}
