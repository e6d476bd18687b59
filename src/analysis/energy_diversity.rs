use crate::dataset::Track;
use serde::Serialize;
use std::collections::BTreeMap;

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct EnergyDiversityRow {
    pub album: String,
    pub energy_diff: f64,
}

/// Spread of the energy feature (max - min) per album, widest first.
/// Albums with the same spread are ordered by name.
pub fn energy_diversity_per_album(tracks: &[Track]) -> Vec<EnergyDiversityRow> {
    let mut range_by_album: BTreeMap<&str, (f64, f64)> = BTreeMap::new();
    for track in tracks {
        let energy = track.features.energy;
        range_by_album
            .entry(track.album.as_str())
            .and_modify(|(min, max)| {
                *min = min.min(energy);
                *max = max.max(energy);
            })
            .or_insert((energy, energy));
    }

    let mut rows: Vec<EnergyDiversityRow> = range_by_album
        .into_iter()
        .map(|(album, (min, max))| EnergyDiversityRow {
            album: album.to_string(),
            energy_diff: max - min,
        })
        .collect();
    // BTreeMap order is by album already, the stable sort keeps it among ties
    rows.sort_by(|a, b| b.energy_diff.total_cmp(&a.energy_diff));
    rows
}
