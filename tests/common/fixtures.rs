//! Dataset fixtures written as CSV files

use super::constants::*;
use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

/// The fields of a row the reports look at. Everything else gets a
/// plausible constant.
#[derive(Clone, Debug)]
pub struct TrackSpec {
    pub artist: &'static str,
    pub track: &'static str,
    pub album: &'static str,
    pub album_type: &'static str,
    pub energy: &'static str,
    pub duration_min: &'static str,
    pub views: &'static str,
    pub licensed: &'static str,
}

impl TrackSpec {
    pub fn new(artist: &'static str, track: &'static str, album: &'static str) -> Self {
        Self {
            artist,
            track,
            album,
            album_type: "album",
            energy: "0.5",
            duration_min: "3.5",
            views: "0",
            licensed: "True",
        }
    }

    pub fn views(mut self, views: &'static str) -> Self {
        self.views = views;
        self
    }

    pub fn energy(mut self, energy: &'static str) -> Self {
        self.energy = energy;
        self
    }

    pub fn duration(mut self, duration_min: &'static str) -> Self {
        self.duration_min = duration_min;
        self
    }

    pub fn album_type(mut self, album_type: &'static str) -> Self {
        self.album_type = album_type;
        self
    }

    pub fn licensed(mut self, licensed: &'static str) -> Self {
        self.licensed = licensed;
        self
    }
}

pub fn csv_row(spec: &TrackSpec) -> String {
    format!(
        "{},{},{},{},0.6,{},-7.1,0.05,0.1,0.0,0.2,0.4,120.0,{},{} - {},{},{},100.0,10.0,{},False,5000.0,2.5,Spotify",
        spec.artist,
        spec.track,
        spec.album,
        spec.album_type,
        spec.energy,
        spec.duration_min,
        spec.artist,
        spec.track,
        spec.artist,
        spec.views,
        spec.licensed,
    )
}

/// A CSV dataset inside a temporary directory, removed on drop.
pub struct TestDataset {
    pub dir: TempDir,
    pub csv_path: PathBuf,
}

impl TestDataset {
    pub fn from_specs(specs: &[TrackSpec]) -> Self {
        let body: Vec<String> = specs.iter().map(csv_row).collect();
        Self::from_lines(&body)
    }

    pub fn from_lines(lines: &[String]) -> Self {
        let dir = TempDir::new().expect("Failed to create temp dir");
        let csv_path = dir.path().join("spotify.csv");
        let mut body = String::from(HEADER);
        body.push('\n');
        for line in lines {
            body.push_str(line);
            body.push('\n');
        }
        fs::write(&csv_path, body).expect("Failed to write dataset");
        Self { dir, csv_path }
    }

    pub fn db_path(&self) -> PathBuf {
        self.dir.path().join("spotify.db")
    }

    /// Two artists, three albums.
    ///
    /// Artist A: "t1" appears twice (100 + 50 views) and ties with "t3" at
    /// 150, "t2" has 80, "t4" has no views, "t5" has 10 and falls past rank 3.
    /// Album X energies are 0.2, 0.9 and 0.5.
    pub fn standard() -> Self {
        Self::from_specs(&standard_specs())
    }
}

pub fn standard_specs() -> Vec<TrackSpec> {
    vec![
        TrackSpec::new(ARTIST_A, "t1", ALBUM_X).views("100.0").energy("0.2"),
        TrackSpec::new(ARTIST_A, "t1", ALBUM_X).views("50").energy("0.9"),
        TrackSpec::new(ARTIST_A, "t2", ALBUM_X).views("80.0").energy("0.5"),
        TrackSpec::new(ARTIST_A, "t3", ALBUM_Y).views("150").energy("0.3"),
        TrackSpec::new(ARTIST_A, "t4", ALBUM_Y).views("").energy("0.35"),
        TrackSpec::new(ARTIST_A, "t5", ALBUM_Y).views("10").energy("0.4"),
        TrackSpec::new(ARTIST_B, "b1", SINGLE_Z)
            .views("500")
            .energy("0.8")
            .album_type("single"),
    ]
}
