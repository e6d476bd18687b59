use super::models::{parse_flag, AlbumType, MostPlayedOn, RawTrack, Track};
use tracing::debug;

#[derive(Debug, Default)]
pub struct CleanOutcome {
    pub tracks: Vec<Track>,
    /// Rows with `duration_min <= 0`.
    pub dropped_non_positive_duration: usize,
    /// Rows with a blank artist or track, an unknown album type or platform,
    /// or an unreadable flag.
    pub dropped_malformed_fields: usize,
}

/// Keeps the rows with a positive duration, a non-blank artist and track, and
/// well-formed categorical and boolean fields, converting them into typed
/// tracks.
pub fn clean(raw: Vec<RawTrack>) -> CleanOutcome {
    let mut outcome = CleanOutcome::default();
    for row in raw {
        if row.duration_min.is_nan() || row.duration_min <= 0.0 {
            outcome.dropped_non_positive_duration += 1;
            continue;
        }
        match into_track(row) {
            Some(track) => outcome.tracks.push(track),
            None => outcome.dropped_malformed_fields += 1,
        }
    }
    debug!(
        "Cleaning kept {} tracks, dropped {} with non-positive duration and {} with malformed fields",
        outcome.tracks.len(),
        outcome.dropped_non_positive_duration,
        outcome.dropped_malformed_fields
    );
    outcome
}

fn into_track(row: RawTrack) -> Option<Track> {
    if row.artist.trim().is_empty() || row.track.trim().is_empty() {
        return None;
    }
    let album_type = AlbumType::parse(&row.album_type)?;
    let most_played_on = MostPlayedOn::parse(&row.most_played_on)?;
    let licensed = parse_flag(&row.licensed)?;
    let official_video = parse_flag(&row.official_video)?;
    Some(Track {
        artist: row.artist,
        track: row.track,
        album: row.album,
        album_type,
        features: row.features,
        duration_min: row.duration_min,
        title: row.title,
        channel: row.channel,
        engagement: row.engagement,
        licensed,
        official_video,
        energy_liveness: row.energy_liveness,
        most_played_on,
    })
}
