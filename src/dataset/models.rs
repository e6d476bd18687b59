//! Track records of the `spotify` dataset.

use std::fmt;

/// Column names of the dataset, in CSV header and table order.
pub const COLUMNS: [&str; 24] = [
    "artist",
    "track",
    "album",
    "album_type",
    "danceability",
    "energy",
    "loudness",
    "speechiness",
    "acousticness",
    "instrumentalness",
    "liveness",
    "valence",
    "tempo",
    "duration_min",
    "title",
    "channel",
    "views",
    "likes",
    "comments",
    "licensed",
    "official_video",
    "stream",
    "energy_liveness",
    "most_played_on",
];

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum AlbumType {
    Album,
    Single,
}

impl AlbumType {
    /// Parses the dataset representation, ignoring case.
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "album" => Some(AlbumType::Album),
            "single" => Some(AlbumType::Single),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            AlbumType::Album => "album",
            AlbumType::Single => "single",
        }
    }
}

impl fmt::Display for AlbumType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Platform where the track has the most plays.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum MostPlayedOn {
    Spotify,
    Youtube,
}

impl MostPlayedOn {
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "spotify" => Some(MostPlayedOn::Spotify),
            "youtube" => Some(MostPlayedOn::Youtube),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            MostPlayedOn::Spotify => "Spotify",
            MostPlayedOn::Youtube => "Youtube",
        }
    }
}

impl fmt::Display for MostPlayedOn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Parses a dataset boolean: `true`/`false` or `1`/`0`, ignoring case.
pub fn parse_flag(s: &str) -> Option<bool> {
    match s.trim().to_ascii_lowercase().as_str() {
        "true" | "1" => Some(true),
        "false" | "0" => Some(false),
        _ => None,
    }
}

/// Audio features as reported by Spotify.
#[derive(Clone, Debug, PartialEq, Default)]
pub struct AudioFeatures {
    pub danceability: f64,
    pub energy: f64,
    pub loudness: f64,
    pub speechiness: f64,
    pub acousticness: f64,
    pub instrumentalness: f64,
    pub liveness: f64,
    pub valence: f64,
    pub tempo: f64,
}

/// Engagement counters. A missing counter is `None` and counts as zero in sums.
#[derive(Clone, Debug, PartialEq, Eq, Default)]
pub struct Engagement {
    pub views: Option<i64>,
    pub likes: Option<i64>,
    pub comments: Option<i64>,
    pub stream: Option<i64>,
}

/// A row whose numeric fields parsed, but whose categorical and boolean
/// fields are still the raw text from the source.
#[derive(Clone, Debug, PartialEq)]
pub struct RawTrack {
    pub artist: String,
    pub track: String,
    pub album: String,
    pub album_type: String,
    pub features: AudioFeatures,
    pub duration_min: f64,
    pub title: String,
    pub channel: String,
    pub engagement: Engagement,
    pub licensed: String,
    pub official_video: String,
    pub energy_liveness: f64,
    pub most_played_on: String,
}

/// A cleaned record. `duration_min` is always positive.
#[derive(Clone, Debug, PartialEq)]
pub struct Track {
    pub artist: String,
    pub track: String,
    pub album: String,
    pub album_type: AlbumType,
    pub features: AudioFeatures,
    pub duration_min: f64,
    pub title: String,
    pub channel: String,
    pub engagement: Engagement,
    pub licensed: bool,
    pub official_video: bool,
    pub energy_liveness: f64,
    pub most_played_on: MostPlayedOn,
}

impl Track {
    pub fn views_or_zero(&self) -> i64 {
        self.engagement.views.unwrap_or(0)
    }
}
