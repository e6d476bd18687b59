//! Shared constants for end-to-end tests

/// Header of the `spotify` dataset, in column order.
pub const HEADER: &str = "artist,track,album,album_type,danceability,energy,loudness,speechiness,acousticness,instrumentalness,liveness,valence,tempo,duration_min,title,channel,views,likes,comments,licensed,official_video,stream,energy_liveness,most_played_on";

pub const ARTIST_A: &str = "Artist A";
pub const ARTIST_B: &str = "Artist B";

pub const ALBUM_X: &str = "Album X";
pub const ALBUM_Y: &str = "Album Y";
pub const SINGLE_Z: &str = "Single Z";
