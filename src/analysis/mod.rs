//! The two reports over a cleaned track set, plus a dataset summary.

mod energy_diversity;
mod top_tracks;

pub use energy_diversity::{energy_diversity_per_album, EnergyDiversityRow};
pub use top_tracks::{top_tracks_per_artist, TopTrackRow};

use crate::dataset::{AlbumType, MostPlayedOn, Track};
use std::collections::{BTreeMap, BTreeSet};
use thiserror::Error;

/// Default depth of the top tracks report.
pub const DEFAULT_TOP_N: u32 = 3;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum AnalysisError {
    #[error("Total views of {track:?} by {artist:?} overflow a 64-bit integer")]
    ViewsOverflow { artist: String, track: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DatasetSummary {
    pub tracks: usize,
    pub artists: usize,
    pub albums: usize,
    pub by_album_type: BTreeMap<AlbumType, usize>,
    pub by_most_played_on: BTreeMap<MostPlayedOn, usize>,
}

/// Read-only view over cleaned tracks.
pub struct BatchAnalyzer<'a> {
    tracks: &'a [Track],
}

impl<'a> BatchAnalyzer<'a> {
    pub fn new(tracks: &'a [Track]) -> Self {
        Self { tracks }
    }

    pub fn top_tracks_per_artist(&self, top_n: u32) -> Result<Vec<TopTrackRow>, AnalysisError> {
        top_tracks_per_artist(self.tracks, top_n)
    }

    pub fn energy_diversity_per_album(&self) -> Vec<EnergyDiversityRow> {
        energy_diversity_per_album(self.tracks)
    }

    pub fn summary(&self) -> DatasetSummary {
        let mut artists = BTreeSet::new();
        let mut albums = BTreeSet::new();
        let mut by_album_type = BTreeMap::new();
        let mut by_most_played_on = BTreeMap::new();
        for track in self.tracks {
            artists.insert(track.artist.as_str());
            albums.insert(track.album.as_str());
            *by_album_type.entry(track.album_type).or_insert(0) += 1;
            *by_most_played_on.entry(track.most_played_on).or_insert(0) += 1;
        }
        DatasetSummary {
            tracks: self.tracks.len(),
            artists: artists.len(),
            albums: albums.len(),
            by_album_type,
            by_most_played_on,
        }
    }
}

#[cfg(test)]
pub(crate) mod test_support {
    use crate::dataset::{AlbumType, AudioFeatures, Engagement, MostPlayedOn, Track};

    pub fn track(artist: &str, name: &str, album: &str, views: Option<i64>, energy: f64) -> Track {
        Track {
            artist: artist.to_string(),
            track: name.to_string(),
            album: album.to_string(),
            album_type: AlbumType::Album,
            features: AudioFeatures {
                energy,
                ..Default::default()
            },
            duration_min: 3.5,
            title: String::new(),
            channel: String::new(),
            engagement: Engagement {
                views,
                ..Default::default()
            },
            licensed: true,
            official_video: true,
            energy_liveness: 1.0,
            most_played_on: MostPlayedOn::Spotify,
        }
    }
}
