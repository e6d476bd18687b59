//! spotify-eda library
//!
//! Loads the `spotify` track dataset, cleans it, and computes the top tracks
//! per artist and the energy diversity per album, either in memory or with SQL
//! over a SQLite copy of the table.

pub mod analysis;
pub mod cli_style;
pub mod config;
pub mod dataset;
pub mod report_output;
pub mod spotify_store;
pub mod sqlite_persistence;

// Re-export commonly used types for convenience
pub use analysis::{AnalysisError, BatchAnalyzer, EnergyDiversityRow, TopTrackRow, DEFAULT_TOP_N};
pub use dataset::{load_tracks, Dataset, DatasetError, MalformedRowPolicy, Track};
pub use spotify_store::{SqliteSpotifyStore, TrackStore};
