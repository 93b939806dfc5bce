//! # Store Module
//!
//! JSON-file persistence for the library, playlists and the playback queue.
//! Each store owns one file path handed to it at construction; nothing is
//! global.
//!
//! Every save is a full read-modify-overwrite of its file. There is no
//! locking and no atomic rename, so a crash mid-write or a second process
//! editing the same file can lose data.
//!
//! A missing file is treated as an empty store. A file that exists but does
//! not parse is an error.
//!
//! ## File formats
//!
//! Tracks are stored as objects with the keys `Title`, `Artist`,
//! `Additional Artists`, `Album` and `Duration` (`mm:ss`).
//!
//! - `library.json`: an array of tracks.
//! - `playlists.json`: an object keyed by playlist name, each value holding
//!   `Playlist Name`, `Total Duration` (`M min S sec`) and `Tracks`.
//! - `queue.json`: `tracks`, `current_index`, `is_repeat`, `is_shuffled`.

use crate::error::{LibraryError, Result};
use crate::library::SortedLibrary;
use crate::playlist::Playlist;
use crate::queue::QueueSnapshot;
use crate::track::{Track, TrackDuration};
use log::{debug, info, warn};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

/// On-disk form of a [`Track`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrackRecord {
    #[serde(rename = "Title")]
    pub title: String,
    #[serde(rename = "Artist")]
    pub artist: String,
    #[serde(rename = "Additional Artists", default)]
    pub additional_artists: Vec<String>,
    #[serde(rename = "Album")]
    pub album: String,
    #[serde(rename = "Duration")]
    pub duration: String,
}

impl From<&Track> for TrackRecord {
    fn from(track: &Track) -> Self {
        Self {
            title: track.title().to_string(),
            artist: track.primary_artist().to_string(),
            additional_artists: track.additional_artists().to_vec(),
            album: track.album().to_string(),
            duration: track.duration().to_string(),
        }
    }
}

impl TryFrom<TrackRecord> for Track {
    type Error = LibraryError;

    fn try_from(record: TrackRecord) -> Result<Self> {
        let duration: TrackDuration = record.duration.parse()?;
        Ok(Track::new(
            record.title,
            record.artist,
            record.album,
            duration,
            record.additional_artists,
        ))
    }
}

/// Convert records, skipping (and logging) any with a bad duration.
fn tracks_from_records(records: Vec<TrackRecord>, source: &Path) -> Vec<Track> {
    records
        .into_iter()
        .filter_map(|record| {
            let title = record.title.clone();
            match Track::try_from(record) {
                Ok(track) => Some(track),
                Err(e) => {
                    warn!("Skipping `{title}' in {}: {e}", source.display());
                    None
                }
            }
        })
        .collect()
}

fn read_json<T: DeserializeOwned>(path: &Path) -> Result<Option<T>> {
    let text = match fs::read_to_string(path) {
        Ok(text) => text,
        Err(e) if e.kind() == ErrorKind::NotFound => {
            debug!("{} does not exist yet, treating as empty", path.display());
            return Ok(None);
        }
        Err(e) => return Err(e.into()),
    };
    Ok(Some(serde_json::from_str(&text)?))
}

fn write_json<T: Serialize>(path: &Path, value: &T) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }
    let text = serde_json::to_string_pretty(value)?;
    fs::write(path, text)?;
    Ok(())
}

/// The sorted track catalog.
#[derive(Debug, Clone)]
pub struct LibraryStore {
    path: PathBuf,
}

impl LibraryStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn load(&self) -> Result<Vec<Track>> {
        let records: Vec<TrackRecord> = read_json(&self.path)?.unwrap_or_default();
        debug!("Loaded {} track record(s) from {}", records.len(), self.path.display());
        Ok(tracks_from_records(records, &self.path))
    }

    /// Overwrite the file with the library, dropping records that are
    /// identical to one already written.
    pub fn save(&self, library: &SortedLibrary) -> Result<()> {
        let mut records: Vec<TrackRecord> = Vec::with_capacity(library.len());
        for record in library.iter().map(TrackRecord::from) {
            if !records.contains(&record) {
                records.push(record);
            }
        }
        write_json(&self.path, &records)?;
        info!("Saved {} track(s) to {}", records.len(), self.path.display());
        Ok(())
    }
}

/// On-disk form of a [`Playlist`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlaylistRecord {
    #[serde(rename = "Playlist Name")]
    pub name: String,
    #[serde(rename = "Total Duration")]
    pub total_duration: String,
    #[serde(rename = "Tracks", default)]
    pub tracks: Vec<TrackRecord>,
}

impl From<&Playlist> for PlaylistRecord {
    fn from(playlist: &Playlist) -> Self {
        Self {
            name: playlist.name().to_string(),
            total_duration: playlist.total_duration().summary(),
            tracks: playlist.tracks().iter().map(TrackRecord::from).collect(),
        }
    }
}

type PlaylistFile = BTreeMap<String, PlaylistRecord>;

/// Playlists keyed by name, all in one file.
#[derive(Debug, Clone)]
pub struct PlaylistStore {
    path: PathBuf,
}

impl PlaylistStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn load_file(&self) -> Result<PlaylistFile> {
        Ok(read_json(&self.path)?.unwrap_or_default())
    }

    fn playlist_from_record(&self, record: PlaylistRecord) -> Playlist {
        let playlist = Playlist::from_tracks(
            record.name,
            tracks_from_records(record.tracks, &self.path),
        );
        match TrackDuration::parse_summary(&record.total_duration) {
            Ok(stored) if stored != playlist.total_duration() => warn!(
                "Stored total `{}' for playlist `{}' disagrees with its tracks, using {}",
                record.total_duration,
                playlist.name(),
                playlist.total_duration().summary()
            ),
            Err(e) => warn!("Playlist `{}': {e}", playlist.name()),
            Ok(_) => {}
        }
        playlist
    }

    pub fn contains(&self, name: &str) -> Result<bool> {
        Ok(self.load_file()?.contains_key(name))
    }

    /// Names of every stored playlist, sorted.
    pub fn names(&self) -> Result<Vec<String>> {
        Ok(self.load_file()?.into_keys().collect())
    }

    pub fn load(&self, name: &str) -> Result<Option<Playlist>> {
        let mut file = self.load_file()?;
        Ok(file.remove(name).map(|record| self.playlist_from_record(record)))
    }

    pub fn load_all(&self) -> Result<Vec<Playlist>> {
        let file = self.load_file()?;
        Ok(file
            .into_values()
            .map(|record| self.playlist_from_record(record))
            .collect())
    }

    /// Write `playlist`, replacing any stored playlist of the same name.
    pub fn save(&self, playlist: &Playlist) -> Result<()> {
        let mut file = self.load_file()?;
        file.insert(playlist.name().to_string(), PlaylistRecord::from(playlist));
        write_json(&self.path, &file)?;
        debug!("Saved playlist `{}' ({} tracks)", playlist.name(), playlist.len());
        Ok(())
    }

    pub fn delete(&self, name: &str) -> Result<()> {
        let mut file = self.load_file()?;
        if file.remove(name).is_none() {
            return Err(LibraryError::not_found("Playlist", name));
        }
        write_json(&self.path, &file)?;
        info!("Deleted playlist `{name}'");
        Ok(())
    }
}

/// On-disk form of a [`QueueSnapshot`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QueueRecord {
    pub tracks: Vec<TrackRecord>,
    pub current_index: usize,
    pub is_repeat: bool,
    pub is_shuffled: bool,
}

/// The saved playback queue.
#[derive(Debug, Clone)]
pub struct QueueStore {
    path: PathBuf,
}

impl QueueStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn load(&self) -> Result<Option<QueueSnapshot>> {
        let Some(record) = read_json::<QueueRecord>(&self.path)? else {
            return Ok(None);
        };
        Ok(Some(QueueSnapshot {
            tracks: tracks_from_records(record.tracks, &self.path),
            cursor: record.current_index,
            repeat: record.is_repeat,
            shuffled: record.is_shuffled,
        }))
    }

    pub fn save(&self, snapshot: &QueueSnapshot) -> Result<()> {
        let record = QueueRecord {
            tracks: snapshot.tracks.iter().map(TrackRecord::from).collect(),
            current_index: snapshot.cursor,
            is_repeat: snapshot.repeat,
            is_shuffled: snapshot.shuffled,
        };
        write_json(&self.path, &record)?;
        debug!("Saved queue of {} track(s)", record.tracks.len());
        Ok(())
    }
}
