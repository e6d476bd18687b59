mod schema;
mod sqlite_spotify_store;

pub use schema::{SPOTIFY_TABLE_V1, SPOTIFY_SCHEMA};
pub use sqlite_spotify_store::SqliteSpotifyStore;

use crate::analysis::{EnergyDiversityRow, TopTrackRow};
use crate::dataset::Track;
use anyhow::Result;

/// Storage of the `spotify` table and the SQL renditions of the reports.
pub trait TrackStore: Send + Sync {
    /// Replaces the table contents with `tracks` in one transaction.
    /// Returns the number of inserted rows.
    fn replace_tracks(&self, tracks: &[Track]) -> Result<usize>;
    fn count_tracks(&self) -> Result<usize>;
    fn all_tracks(&self) -> Result<Vec<Track>>;

    // Reports, same ordering as the in-memory ones
    fn top_tracks_per_artist(&self, top_n: u32) -> Result<Vec<TopTrackRow>>;
    fn energy_diversity_per_album(&self) -> Result<Vec<EnergyDiversityRow>>;
}
