//! # Music Manager
//!
//! [`MusicManager`] ties the in-memory library and queue to their stores.
//! Each user-facing command (from the menu or the one-shot CLI) is one
//! method here.
//!
//! Library and playlist changes are written through immediately. The queue
//! is only written by [`MusicManager::save_queue`], so callers decide when a
//! queue session is committed.

use crate::config::RuntimeConfig;
use crate::error::{LibraryError, Result};
use crate::library::SortedLibrary;
use crate::playlist::Playlist;
use crate::queue::PlaybackQueue;
use crate::store::{LibraryStore, PlaylistStore, QueueStore};
use crate::track::{normalize_title, Track};
use log::{debug, info};

pub struct MusicManager {
    library: SortedLibrary,
    queue: PlaybackQueue,
    library_store: LibraryStore,
    playlist_store: PlaylistStore,
    queue_store: QueueStore,
}

impl MusicManager {
    /// Open the stores named by `config` and load the library and queue.
    pub fn open(config: &RuntimeConfig) -> Result<Self> {
        Self::from_stores(
            LibraryStore::new(&config.library_path),
            PlaylistStore::new(&config.playlists_path),
            QueueStore::new(&config.queue_path),
        )
    }

    pub fn from_stores(
        library_store: LibraryStore,
        playlist_store: PlaylistStore,
        queue_store: QueueStore,
    ) -> Result<Self> {
        let library = SortedLibrary::from_tracks(library_store.load()?);
        let queue = queue_store
            .load()?
            .map(PlaybackQueue::restore)
            .unwrap_or_default();
        info!(
            "Opened library with {} track(s), queue with {} track(s)",
            library.len(),
            queue.len()
        );

        Ok(Self {
            library,
            queue,
            library_store,
            playlist_store,
            queue_store,
        })
    }

    pub fn library(&self) -> &SortedLibrary {
        &self.library
    }

    pub fn queue(&self) -> &PlaybackQueue {
        &self.queue
    }

    // Library

    /// Insert `track` into the library and persist it. Returns its index.
    pub fn add_track(&mut self, track: Track) -> Result<usize> {
        let index = self.library.insert(track);
        self.library_store.save(&self.library)?;
        Ok(index)
    }

    pub fn search(&self, title: &str) -> Vec<&Track> {
        self.library.find_all_by_title(title)
    }

    /// First library track titled `title`.
    pub fn find_track(&self, title: &str) -> Result<Track> {
        self.library
            .first_by_title(title)
            .cloned()
            .ok_or_else(|| LibraryError::not_found("Track", title.trim()))
    }

    // Playlists

    pub fn create_playlist(&mut self, name: &str) -> Result<Playlist> {
        let name = name.trim();
        if self.playlist_store.contains(name)? {
            return Err(LibraryError::duplicate("Playlist", name));
        }
        let playlist = Playlist::new(name);
        self.playlist_store.save(&playlist)?;
        info!("Created playlist `{name}'");
        Ok(playlist)
    }

    pub fn delete_playlist(&mut self, name: &str) -> Result<()> {
        self.playlist_store.delete(name.trim())
    }

    pub fn playlist(&self, name: &str) -> Result<Playlist> {
        let name = name.trim();
        self.playlist_store
            .load(name)?
            .ok_or_else(|| LibraryError::not_found("Playlist", name))
    }

    pub fn playlists(&self) -> Result<Vec<Playlist>> {
        self.playlist_store.load_all()
    }

    /// Playlist names containing `query`, ignoring case.
    pub fn search_playlists(&self, query: &str) -> Result<Vec<String>> {
        let query = query.trim().to_lowercase();
        Ok(self
            .playlist_store
            .names()?
            .into_iter()
            .filter(|name| name.to_lowercase().contains(&query))
            .collect())
    }

    /// Add the first library match for `title` to playlist `name`.
    pub fn add_to_playlist(&mut self, name: &str, title: &str) -> Result<Track> {
        let mut playlist = self.playlist(name)?;
        let track = self.find_track(title)?;
        playlist.add_track(track.clone())?;
        self.playlist_store.save(&playlist)?;
        debug!("Added `{}' to playlist `{}'", track.title(), playlist.name());
        Ok(track)
    }

    /// Remove the first track titled `title` from playlist `name`.
    pub fn remove_from_playlist(&mut self, name: &str, title: &str) -> Result<Track> {
        let mut playlist = self.playlist(name)?;
        let target = normalize_title(title);
        let track = playlist
            .tracks()
            .iter()
            .find(|track| track.title_key() == target)
            .cloned()
            .ok_or_else(|| LibraryError::not_found("Track", title.trim()))?;
        let removed = playlist.remove_track(&track)?;
        self.playlist_store.save(&playlist)?;
        Ok(removed)
    }

    // Queue

    pub fn enqueue_track(&mut self, title: &str) -> Result<Track> {
        let track = self.find_track(title)?;
        self.queue.enqueue(track.clone());
        Ok(track)
    }

    /// Enqueue every track of playlist `name`. Returns how many were added.
    pub fn enqueue_playlist(&mut self, name: &str) -> Result<usize> {
        let playlist = self.playlist(name)?;
        self.queue.enqueue_playlist(&playlist);
        Ok(playlist.len())
    }

    pub fn toggle_shuffle(&mut self) -> bool {
        self.queue.toggle_shuffle()
    }

    pub fn toggle_repeat(&mut self) -> bool {
        self.queue.toggle_repeat()
    }

    pub fn next_track(&mut self) -> Option<Track> {
        self.queue.advance().cloned()
    }

    pub fn previous_track(&mut self) -> Option<Track> {
        self.queue.retreat().cloned()
    }

    pub fn remove_current(&mut self) -> Result<Track> {
        self.queue.dequeue_current()
    }

    pub fn clear_queue(&mut self) {
        self.queue.clear();
    }

    pub fn save_queue(&self) -> Result<()> {
        self.queue_store.save(&self.queue.snapshot())
    }
}
