use super::schema::{SPOTIFY_TABLE_V1, SPOTIFY_SCHEMA};
use super::TrackStore;
use crate::analysis::{EnergyDiversityRow, TopTrackRow};
use crate::dataset::{AlbumType, AudioFeatures, Engagement, MostPlayedOn, Track};
use crate::sqlite_persistence::open_versioned;
use anyhow::{anyhow, Context, Result};
use rusqlite::{params, types::Type, Connection};
use std::path::Path;
use std::sync::{Mutex, MutexGuard};
use tracing::{debug, info};

const TOP_TRACKS_SQL: &str = "
    WITH track_views AS (
        SELECT artist, track, COALESCE(SUM(views), 0) AS total_views
        FROM spotify
        GROUP BY artist, track
    ),
    ranked AS (
        SELECT artist, track, total_views,
               DENSE_RANK() OVER (PARTITION BY artist ORDER BY total_views DESC) AS track_rank
        FROM track_views
    )
    SELECT artist, track, total_views, track_rank
    FROM ranked
    WHERE track_rank <= ?1
    ORDER BY artist ASC, track_rank ASC, track ASC";

const ENERGY_DIVERSITY_SQL: &str = "
    SELECT album, MAX(energy) - MIN(energy) AS energy_diff
    FROM spotify
    GROUP BY album
    ORDER BY energy_diff DESC, album ASC";

pub struct SqliteSpotifyStore {
    conn: Mutex<Connection>,
}

impl SqliteSpotifyStore {
    pub fn new<P: AsRef<Path>>(db_path: P) -> Result<Self> {
        let path = db_path.as_ref();
        info!("Opening spotify database at {:?}", path);
        let conn = Connection::open(path)
            .with_context(|| format!("Failed to open spotify database at {:?}", path))?;
        Self::from_connection(conn)
    }

    pub fn open_in_memory() -> Result<Self> {
        Self::from_connection(Connection::open_in_memory()?)
    }

    fn from_connection(conn: Connection) -> Result<Self> {
        open_versioned(&conn, &SPOTIFY_SCHEMA)
            .context("Failed to prepare spotify database schema")?;
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    fn conn(&self) -> Result<MutexGuard<'_, Connection>> {
        self.conn
            .lock()
            .map_err(|_| anyhow!("spotify database connection lock poisoned"))
    }

    fn insert_sql() -> String {
        let placeholders = (1..=SPOTIFY_TABLE_V1.columns.len())
            .map(|i| format!("?{}", i))
            .collect::<Vec<_>>()
            .join(", ");
        format!(
            "INSERT INTO {} ({}) VALUES ({})",
            SPOTIFY_TABLE_V1.name,
            SPOTIFY_TABLE_V1.column_list(),
            placeholders
        )
    }

    fn row_to_track(row: &rusqlite::Row) -> rusqlite::Result<Track> {
        let album_type: String = row.get("album_type")?;
        let most_played_on: String = row.get("most_played_on")?;
        Ok(Track {
            artist: row.get("artist")?,
            track: row.get("track")?,
            album: row.get("album")?,
            album_type: AlbumType::parse(&album_type)
                .ok_or_else(|| invalid_text(3, &album_type))?,
            features: AudioFeatures {
                danceability: row.get("danceability")?,
                energy: row.get("energy")?,
                loudness: row.get("loudness")?,
                speechiness: row.get("speechiness")?,
                acousticness: row.get("acousticness")?,
                instrumentalness: row.get("instrumentalness")?,
                liveness: row.get("liveness")?,
                valence: row.get("valence")?,
                tempo: row.get("tempo")?,
            },
            duration_min: row.get("duration_min")?,
            title: row.get("title")?,
            channel: row.get("channel")?,
            engagement: Engagement {
                views: row.get("views")?,
                likes: row.get("likes")?,
                comments: row.get("comments")?,
                stream: row.get("stream")?,
            },
            licensed: row.get("licensed")?,
            official_video: row.get("official_video")?,
            energy_liveness: row.get("energy_liveness")?,
            most_played_on: MostPlayedOn::parse(&most_played_on)
                .ok_or_else(|| invalid_text(23, &most_played_on))?,
        })
    }
}

fn invalid_text(column: usize, value: &str) -> rusqlite::Error {
    rusqlite::Error::FromSqlConversionFailure(
        column,
        Type::Text,
        format!("unexpected value {:?}", value).into(),
    )
}

impl TrackStore for SqliteSpotifyStore {
    fn replace_tracks(&self, tracks: &[Track]) -> Result<usize> {
        let mut conn = self.conn()?;
        let tx = conn.transaction()?;
        let removed = tx.execute("DELETE FROM spotify", [])?;
        if removed > 0 {
            debug!("Removed {} previously imported tracks", removed);
        }
        {
            let mut stmt = tx.prepare(&Self::insert_sql())?;
            for track in tracks {
                let features = &track.features;
                stmt.execute(params![
                    track.artist,
                    track.track,
                    track.album,
                    track.album_type.as_str(),
                    features.danceability,
                    features.energy,
                    features.loudness,
                    features.speechiness,
                    features.acousticness,
                    features.instrumentalness,
                    features.liveness,
                    features.valence,
                    features.tempo,
                    track.duration_min,
                    track.title,
                    track.channel,
                    track.engagement.views,
                    track.engagement.likes,
                    track.engagement.comments,
                    track.licensed,
                    track.official_video,
                    track.engagement.stream,
                    track.energy_liveness,
                    track.most_played_on.as_str(),
                ])
                .with_context(|| {
                    format!("Failed to insert track {:?} by {:?}", track.track, track.artist)
                })?;
            }
        }
        tx.commit()?;
        info!("Imported {} tracks into the spotify table", tracks.len());
        Ok(tracks.len())
    }

    fn count_tracks(&self) -> Result<usize> {
        let conn = self.conn()?;
        let count: i64 = conn.query_row("SELECT COUNT(*) FROM spotify", [], |r| r.get(0))?;
        Ok(count as usize)
    }

    fn all_tracks(&self) -> Result<Vec<Track>> {
        let conn = self.conn()?;
        let mut stmt = conn.prepare(&format!(
            "SELECT {} FROM spotify ORDER BY rowid",
            SPOTIFY_TABLE_V1.column_list()
        ))?;
        let tracks = stmt
            .query_map([], Self::row_to_track)?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(tracks)
    }

    fn top_tracks_per_artist(&self, top_n: u32) -> Result<Vec<TopTrackRow>> {
        let conn = self.conn()?;
        let mut stmt = conn.prepare(TOP_TRACKS_SQL)?;
        let rows = stmt
            .query_map(params![top_n], |row| {
                Ok(TopTrackRow {
                    artist: row.get(0)?,
                    track: row.get(1)?,
                    total_views: row.get(2)?,
                    rank: row.get(3)?,
                })
            })?
            .collect::<rusqlite::Result<Vec<_>>>()
            .context("Failed to run top tracks query")?;
        Ok(rows)
    }

    fn energy_diversity_per_album(&self) -> Result<Vec<EnergyDiversityRow>> {
        let conn = self.conn()?;
        let mut stmt = conn.prepare(ENERGY_DIVERSITY_SQL)?;
        let rows = stmt
            .query_map([], |row| {
                Ok(EnergyDiversityRow {
                    album: row.get(0)?,
                    energy_diff: row.get(1)?,
                })
            })?
            .collect::<rusqlite::Result<Vec<_>>>()
            .context("Failed to run energy diversity query")?;
        Ok(rows)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::test_support::track;
    use crate::analysis::BatchAnalyzer;
    use crate::dataset::parse_flag;
    use tempfile::TempDir;

    struct TestStore {
        store: SqliteSpotifyStore,
        _temp_dir: TempDir,
    }

    fn create_test_store() -> TestStore {
        let temp_dir = TempDir::new().unwrap();
        let store = SqliteSpotifyStore::new(temp_dir.path().join("spotify.db")).unwrap();
        TestStore {
            store,
            _temp_dir: temp_dir,
        }
    }

    fn sample_tracks() -> Vec<Track> {
        let mut single = track("B", "b1", "B Single", Some(500), 0.61);
        single.album_type = AlbumType::Single;
        single.most_played_on = MostPlayedOn::Youtube;
        single.licensed = false;
        single.engagement.likes = Some(12);
        vec![
            track("A", "t1", "X", Some(100), 0.2),
            track("A", "t1", "X", Some(50), 0.9),
            track("A", "t2", "X", Some(80), 0.5),
            track("A", "t3", "Y", Some(150), 0.3),
            track("A", "t4", "Y", None, 0.35),
            single,
        ]
    }

    #[test]
    fn test_replace_and_read_back() {
        let test = create_test_store();
        let tracks = sample_tracks();

        assert_eq!(test.store.replace_tracks(&tracks).unwrap(), tracks.len());
        assert_eq!(test.store.count_tracks().unwrap(), tracks.len());
        assert_eq!(test.store.all_tracks().unwrap(), tracks);
    }

    #[test]
    fn test_replace_discards_previous_import() {
        let test = create_test_store();
        test.store.replace_tracks(&sample_tracks()).unwrap();
        test.store
            .replace_tracks(&[track("C", "c1", "Z", Some(1), 0.1)])
            .unwrap();
        assert_eq!(test.store.count_tracks().unwrap(), 1);
    }

    #[test]
    fn test_reopen_existing_database() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("spotify.db");
        {
            let store = SqliteSpotifyStore::new(&path).unwrap();
            store.replace_tracks(&sample_tracks()).unwrap();
        }
        let store = SqliteSpotifyStore::new(&path).unwrap();
        assert_eq!(store.count_tracks().unwrap(), sample_tracks().len());
    }

    #[test]
    fn test_top_tracks_query() {
        let store = SqliteSpotifyStore::open_in_memory().unwrap();
        store.replace_tracks(&sample_tracks()).unwrap();

        let rows = store.top_tracks_per_artist(3).unwrap();
        let summary: Vec<(&str, &str, i64, u32)> = rows
            .iter()
            .map(|r| (r.artist.as_str(), r.track.as_str(), r.total_views, r.rank))
            .collect();
        assert_eq!(
            summary,
            vec![
                ("A", "t1", 150, 1),
                ("A", "t3", 150, 1),
                ("A", "t2", 80, 2),
                ("A", "t4", 0, 3),
                ("B", "b1", 500, 1),
            ]
        );
    }

    #[test]
    fn test_energy_diversity_query() {
        let store = SqliteSpotifyStore::open_in_memory().unwrap();
        store.replace_tracks(&sample_tracks()).unwrap();

        let rows = store.energy_diversity_per_album().unwrap();
        let albums: Vec<&str> = rows.iter().map(|r| r.album.as_str()).collect();
        assert_eq!(albums, vec!["X", "Y", "B Single"]);
        assert!((rows[0].energy_diff - 0.7).abs() < 1e-12);
        assert_eq!(rows[2].energy_diff, 0.0);
    }

    #[test]
    fn test_queries_match_in_memory_reports() {
        let store = SqliteSpotifyStore::open_in_memory().unwrap();
        let tracks = sample_tracks();
        store.replace_tracks(&tracks).unwrap();
        let analyzer = BatchAnalyzer::new(&tracks);

        for top_n in 1..=3 {
            assert_eq!(
                store.top_tracks_per_artist(top_n).unwrap(),
                analyzer.top_tracks_per_artist(top_n).unwrap()
            );
        }
        assert_eq!(
            store.energy_diversity_per_album().unwrap(),
            analyzer.energy_diversity_per_album()
        );
    }

    #[test]
    fn test_rejects_database_of_another_tool() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("other.db");
        {
            let conn = Connection::open(&path).unwrap();
            conn.execute("CREATE TABLE songs (name TEXT)", []).unwrap();
        }
        assert!(SqliteSpotifyStore::new(&path).is_err());
    }

    #[test]
    fn test_flag_columns_hold_integers() {
        let store = SqliteSpotifyStore::open_in_memory().unwrap();
        store.replace_tracks(&sample_tracks()).unwrap();
        let conn = store.conn().unwrap();
        let licensed: String = conn
            .query_row(
                "SELECT CAST(licensed AS TEXT) FROM spotify WHERE artist = 'B'",
                [],
                |r| r.get(0),
            )
            .unwrap();
        assert_eq!(parse_flag(&licensed), Some(false));
    }

    #[test]
    fn test_views_near_the_limit_agree_with_in_memory() {
        let store = SqliteSpotifyStore::open_in_memory().unwrap();

        let at_limit = vec![
            track("A", "t1", "X", Some(i64::MAX - 1), 0.5),
            track("A", "t1", "X", Some(1), 0.5),
        ];
        store.replace_tracks(&at_limit).unwrap();
        assert_eq!(
            store.top_tracks_per_artist(3).unwrap(),
            BatchAnalyzer::new(&at_limit).top_tracks_per_artist(3).unwrap()
        );

        let overflowing = vec![
            track("A", "t1", "X", Some(9_000_000_000_000_000_000), 0.5),
            track("A", "t1", "Y", Some(9_000_000_000_000_000_000), 0.5),
        ];
        store.replace_tracks(&overflowing).unwrap();
        assert!(store.top_tracks_per_artist(3).is_err());
        assert!(BatchAnalyzer::new(&overflowing)
            .top_tracks_per_artist(3)
            .is_err());
    }
}
