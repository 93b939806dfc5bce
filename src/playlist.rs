//! Named, user-curated track lists with a running total duration.

use crate::error::{LibraryError, Result};
use crate::track::{Track, TrackDuration};
use log::trace;
use std::fmt;

/// A playlist keeps tracks in insertion order and never holds the same
/// track twice. `total_duration` is kept in step with every add and remove.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Playlist {
    name: String,
    tracks: Vec<Track>,
    total_duration: TrackDuration,
}

impl Playlist {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            tracks: Vec::new(),
            total_duration: TrackDuration::default(),
        }
    }

    /// Rebuild a playlist from stored tracks, re-deriving the total.
    ///
    /// Repeated tracks in the input are dropped.
    pub fn from_tracks(name: impl Into<String>, tracks: impl IntoIterator<Item = Track>) -> Self {
        let mut playlist = Self::new(name);
        for track in tracks {
            // Ignoring `Duplicate` here is what drops repeats.
            let _ = playlist.add_track(track);
        }
        playlist
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn tracks(&self) -> &[Track] {
        &self.tracks
    }

    pub fn len(&self) -> usize {
        self.tracks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tracks.is_empty()
    }

    pub fn contains(&self, track: &Track) -> bool {
        self.tracks.contains(track)
    }

    pub fn total_duration(&self) -> TrackDuration {
        self.total_duration
    }

    /// Append `track` unless an identical one is already present.
    pub fn add_track(&mut self, track: Track) -> Result<()> {
        if self.contains(&track) {
            return Err(LibraryError::duplicate("Track", track.title()));
        }
        let total = self.total_duration.as_secs() + track.duration().as_secs();
        self.total_duration = TrackDuration::from_secs(total);
        trace!("Playlist `{}' now {}", self.name, self.total_duration.padded());
        self.tracks.push(track);
        Ok(())
    }

    /// Remove the first track identical to `track`.
    pub fn remove_track(&mut self, track: &Track) -> Result<Track> {
        let index = self
            .tracks
            .iter()
            .position(|existing| existing == track)
            .ok_or_else(|| LibraryError::not_found("Track", track.title()))?;

        let removed = self.tracks.remove(index);
        let total = self
            .total_duration
            .as_secs()
            .saturating_sub(removed.duration().as_secs());
        self.total_duration = TrackDuration::from_secs(total);
        Ok(removed)
    }
}

impl fmt::Display for Playlist {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Playlist: {}", self.name)?;
        writeln!(f, "Total Duration: {}", self.total_duration.padded())?;
        write!(f, "Tracks:")?;
        for track in &self.tracks {
            write!(f, "\n{track}")?;
        }
        Ok(())
    }
}
