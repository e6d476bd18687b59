use super::AnalysisError;
use crate::dataset::Track;
use serde::Serialize;
use std::collections::BTreeMap;

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct TopTrackRow {
    pub artist: String,
    pub track: String,
    pub total_views: i64,
    pub rank: u32,
}

/// Sums views per (artist, track), dense-ranks each artist's tracks by
/// descending total and keeps ranks `<= top_n`.
///
/// Rows come out ordered by artist, rank, then track. Tracks tied on views
/// share a rank, so an artist can yield more than `top_n` rows. A total that
/// does not fit in an `i64` is an error, as it is for SQLite's `SUM`.
pub fn top_tracks_per_artist(
    tracks: &[Track],
    top_n: u32,
) -> Result<Vec<TopTrackRow>, AnalysisError> {
    let mut views_by_artist: BTreeMap<&str, BTreeMap<&str, i64>> = BTreeMap::new();
    for track in tracks {
        let total = views_by_artist
            .entry(track.artist.as_str())
            .or_default()
            .entry(track.track.as_str())
            .or_insert(0);
        *total = total
            .checked_add(track.views_or_zero())
            .ok_or_else(|| AnalysisError::ViewsOverflow {
                artist: track.artist.clone(),
                track: track.track.clone(),
            })?;
    }

    let mut rows = Vec::new();
    for (artist, views_by_track) in views_by_artist {
        let mut ranked: Vec<(&str, i64)> = views_by_track.into_iter().collect();
        // Stable sort keeps the track-name order of the BTreeMap among ties
        ranked.sort_by(|a, b| b.1.cmp(&a.1));

        let mut rank = 0u32;
        let mut previous_views = None;
        for (track, total_views) in ranked {
            if previous_views != Some(total_views) {
                rank += 1;
                previous_views = Some(total_views);
            }
            if rank > top_n {
                break;
            }
            rows.push(TopTrackRow {
                artist: artist.to_string(),
                track: track.to_string(),
                total_views,
                rank,
            });
        }
    }
    Ok(rows)
}
