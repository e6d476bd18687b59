//! SQLite schema of the `spotify` table.
//!
//! One flat, denormalized table with the dataset columns in CSV order. There
//! is no primary key column; SQLite's rowid is enough for a load-once table.

use crate::sqlite_column;
use crate::sqlite_persistence::{Column, SqlType, Table, VersionedSchema};

// =============================================================================
// Version 1 - spotify table
// =============================================================================

pub const SPOTIFY_TABLE_V1: Table = Table {
    name: "spotify",
    columns: &[
        sqlite_column!("artist", &SqlType::Text, non_null = true),
        sqlite_column!("track", &SqlType::Text, non_null = true),
        sqlite_column!("album", &SqlType::Text, non_null = true),
        sqlite_column!("album_type", &SqlType::Text, non_null = true), // 'album' | 'single'
        sqlite_column!("danceability", &SqlType::Real, non_null = true),
        sqlite_column!("energy", &SqlType::Real, non_null = true),
        sqlite_column!("loudness", &SqlType::Real, non_null = true),
        sqlite_column!("speechiness", &SqlType::Real, non_null = true),
        sqlite_column!("acousticness", &SqlType::Real, non_null = true),
        sqlite_column!("instrumentalness", &SqlType::Real, non_null = true),
        sqlite_column!("liveness", &SqlType::Real, non_null = true),
        sqlite_column!("valence", &SqlType::Real, non_null = true),
        sqlite_column!("tempo", &SqlType::Real, non_null = true),
        sqlite_column!("duration_min", &SqlType::Real, non_null = true),
        sqlite_column!("title", &SqlType::Text, non_null = true),
        sqlite_column!("channel", &SqlType::Text, non_null = true),
        sqlite_column!("views", &SqlType::Integer),
        sqlite_column!("likes", &SqlType::Integer),
        sqlite_column!("comments", &SqlType::Integer),
        sqlite_column!("licensed", &SqlType::Integer, non_null = true), // 0/1
        sqlite_column!("official_video", &SqlType::Integer, non_null = true), // 0/1
        sqlite_column!("stream", &SqlType::Integer),
        sqlite_column!("energy_liveness", &SqlType::Real, non_null = true),
        sqlite_column!("most_played_on", &SqlType::Text, non_null = true), // 'Spotify' | 'Youtube'
    ],
    indices: &[
        ("idx_spotify_artist_track", "artist, track"),
        ("idx_spotify_album", "album"),
    ],
};

/// Version 1: spotify table
pub const SPOTIFY_SCHEMA: VersionedSchema = VersionedSchema {
    version: 1,
    tables: &[SPOTIFY_TABLE_V1],
};
