//! # Playback Queue Module
//!
//! The queue is an ordered list of tracks with a cursor pointing at the
//! track that is currently playing, plus two toggles:
//!
//! - **Repeat**: stepping past either end wraps around instead of stopping.
//! - **Shuffle**: the tracks are held in a random permutation. The order
//!   from before shuffling is kept as a separate snapshot so that toggling
//!   shuffle off puts everything back.
//!
//! ## Cursor
//!
//! The cursor is `None` exactly when the queue is empty and otherwise
//! always inside `0..len`. It is positional: shuffling or unshuffling
//! keeps the index, not the song, so the "current" track usually changes.
//!
//! ## Pre-shuffle order
//!
//! - Enqueueing while unshuffled appends to both lists.
//! - Enqueueing while shuffled appends only to the live list, so those
//!   tracks vanish again when shuffle is switched off.
//! - Removing the current track overwrites the pre-shuffle order with the
//!   live order. After a removal, unshuffling no longer restores the
//!   original sequence.
//!
//! ## Persistence
//!
//! [`PlaybackQueue::snapshot`] captures tracks, cursor and both flags.
//! [`PlaybackQueue::restore`] rebuilds from one. A snapshot taken while
//! shuffled is shuffled *again* on restore rather than replaying the saved
//! permutation, so a shuffled queue comes back in a new random order.

use crate::error::{LibraryError, Result};
use crate::playlist::Playlist;
use crate::track::Track;
use log::{debug, trace};
use rand::seq::SliceRandom;
use rand::{thread_rng, Rng};
use std::fmt;

/// Default number of entries shown per queue page.
pub const DEFAULT_PAGE_SIZE: usize = 10;

#[derive(Debug, Default, Clone)]
pub struct PlaybackQueue {
    tracks: Vec<Track>,
    cursor: Option<usize>,
    repeat: bool,
    shuffled: bool,
    /// Owned copy of the order before shuffling; never shares storage with `tracks`.
    original_order: Vec<Track>,
}

/// Everything needed to bring a queue back after a restart.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct QueueSnapshot {
    pub tracks: Vec<Track>,
    pub cursor: usize,
    pub repeat: bool,
    pub shuffled: bool,
}

impl PlaybackQueue {
    pub fn new() -> Self {
        Self::default()
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

    pub fn cursor(&self) -> Option<usize> {
        self.cursor
    }

    pub fn is_repeat(&self) -> bool {
        self.repeat
    }

    pub fn is_shuffled(&self) -> bool {
        self.shuffled
    }

    /// The track under the cursor.
    pub fn current(&self) -> Option<&Track> {
        self.cursor.and_then(|index| self.tracks.get(index))
    }

    pub fn enqueue(&mut self, track: Track) {
        trace!("Enqueueing `{}'", track.title());
        if !self.shuffled {
            self.original_order.push(track.clone());
        }
        self.tracks.push(track);
        if self.cursor.is_none() {
            self.cursor = Some(0);
        }
    }

    /// Enqueue every track of `playlist` in its stored order.
    pub fn enqueue_playlist(&mut self, playlist: &Playlist) {
        debug!(
            "Enqueueing {} track(s) from playlist `{}'",
            playlist.len(),
            playlist.name()
        );
        for track in playlist.tracks() {
            self.enqueue(track.clone());
        }
    }

    /// Remove the track under the cursor and return it.
    ///
    /// The pre-shuffle order is reset to the live order, and the cursor is
    /// clamped to the new last index.
    pub fn dequeue_current(&mut self) -> Result<Track> {
        let index = self.cursor.ok_or(LibraryError::EmptyCollection("queue"))?;
        let removed = self.tracks.remove(index);
        self.original_order = self.tracks.clone();
        self.cursor = self.tracks.len().checked_sub(1).map(|last| index.min(last));
        debug!("Removed `{}' from the queue", removed.title());
        Ok(removed)
    }

    /// Drop every track and reset both toggles.
    pub fn clear(&mut self) {
        *self = Self::default();
    }

    /// Flip repeat and return the new setting.
    pub fn toggle_repeat(&mut self) -> bool {
        self.repeat = !self.repeat;
        self.repeat
    }

    /// Shuffle, or restore the pre-shuffle order. Returns the new setting.
    pub fn toggle_shuffle(&mut self) -> bool {
        self.toggle_shuffle_with(&mut thread_rng())
    }

    pub fn toggle_shuffle_with<R: Rng + ?Sized>(&mut self, rng: &mut R) -> bool {
        if self.shuffled {
            self.tracks = self.original_order.clone();
            self.shuffled = false;
            // Tracks enqueued while shuffled are gone now; keep the index if it still fits.
            self.cursor = match self.tracks.len() {
                0 => None,
                len => Some(self.cursor.unwrap_or(0).min(len - 1)),
            };
        } else {
            self.tracks.shuffle(rng);
            self.shuffled = true;
        }
        debug!("Shuffle {}", if self.shuffled { "on" } else { "off" });
        self.shuffled
    }

    /// Step to the next track.
    ///
    /// At the end, wraps to the first track when repeating. Otherwise the
    /// cursor stays on the last track and `None` is returned.
    pub fn advance(&mut self) -> Option<&Track> {
        let current = self.cursor?;
        let next = current + 1;
        if next < self.tracks.len() {
            self.cursor = Some(next);
        } else if self.repeat {
            self.cursor = Some(0);
        } else {
            return None;
        }
        self.current()
    }

    /// Step to the previous track, mirroring [`PlaybackQueue::advance`].
    pub fn retreat(&mut self) -> Option<&Track> {
        let current = self.cursor?;
        if current > 0 {
            self.cursor = Some(current - 1);
        } else if self.repeat {
            self.cursor = Some(self.tracks.len() - 1);
        } else {
            return None;
        }
        self.current()
    }

    pub fn snapshot(&self) -> QueueSnapshot {
        QueueSnapshot {
            tracks: self.tracks.clone(),
            cursor: self.cursor.unwrap_or(0),
            repeat: self.repeat,
            shuffled: self.shuffled,
        }
    }

    pub fn restore(snapshot: QueueSnapshot) -> Self {
        Self::restore_with(snapshot, &mut thread_rng())
    }

    /// Rebuild a queue from `snapshot`.
    ///
    /// The saved track order becomes the pre-shuffle order. A saved cursor
    /// past the end is clamped.
    pub fn restore_with<R: Rng + ?Sized>(snapshot: QueueSnapshot, rng: &mut R) -> Self {
        let QueueSnapshot {
            mut tracks,
            cursor,
            repeat,
            shuffled,
        } = snapshot;

        let original_order = tracks.clone();
        if shuffled {
            tracks.shuffle(rng);
        }
        let cursor = tracks.len().checked_sub(1).map(|last| cursor.min(last));

        Self {
            tracks,
            cursor,
            repeat,
            shuffled,
            original_order,
        }
    }

    /// One page of the queue for display. `page` is 1-based.
    pub fn page(&self, page: usize, per_page: usize) -> QueuePage<'_> {
        let page = page.max(1);
        let per_page = per_page.max(1);
        let start = (page - 1) * per_page;

        let entries = self
            .tracks
            .iter()
            .enumerate()
            .skip(start)
            .take(per_page)
            .map(|(index, track)| (index + 1, track))
            .collect();

        QueuePage {
            page,
            total_pages: self.tracks.len() / per_page + 1,
            repeat: self.repeat,
            shuffled: self.shuffled,
            current: self.current(),
            entries,
        }
    }
}

/// A rendered slice of the queue.
#[derive(Debug)]
pub struct QueuePage<'a> {
    pub page: usize,
    pub total_pages: usize,
    pub repeat: bool,
    pub shuffled: bool,
    pub current: Option<&'a Track>,
    /// `(1-based position, track)` pairs.
    pub entries: Vec<(usize, &'a Track)>,
}

impl fmt::Display for QueuePage<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Queue (Page {}):", self.page)?;
        writeln!(f, "Repeat: {}", if self.repeat { "On" } else { "Off" })?;
        writeln!(f, "Shuffled: {}", if self.shuffled { "Yes" } else { "No" })?;
        writeln!(
            f,
            "Currently Playing: {}",
            self.current.map_or("None", Track::title)
        )?;
        writeln!(f)?;
        for (position, track) in &self.entries {
            writeln!(
                f,
                "{position}. {} - {} ({})",
                track.title(),
                track.artist_display(),
                track.duration()
            )?;
        }
        write!(f, "\n<Page {} of {}>", self.page, self.total_pages)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn track(title: &str) -> Track {
        Track::parse(title, "Artist", "Album", "3:00", Vec::new()).unwrap()
    }

    fn queue_of(titles: &[&str]) -> PlaybackQueue {
        let mut queue = PlaybackQueue::new();
        for title in titles {
            queue.enqueue(track(title));
        }
        queue
    }

    fn titles(queue: &PlaybackQueue) -> Vec<&str> {
        queue.tracks().iter().map(Track::title).collect()
    }

    fn many() -> Vec<String> {
        (0..20).map(|i| format!("Track {i:02}")).collect()
    }

    #[test]
    fn test_empty_queue_has_no_cursor() {
        let mut queue = PlaybackQueue::new();
        assert_eq!(queue.cursor(), None);
        assert!(queue.current().is_none());
        assert!(queue.advance().is_none());
        assert!(queue.retreat().is_none());
        assert!(matches!(
            queue.dequeue_current(),
            Err(LibraryError::EmptyCollection(_))
        ));
    }

    #[test]
    fn test_first_enqueue_sets_cursor() {
        let queue = queue_of(&["A", "B"]);
        assert_eq!(queue.cursor(), Some(0));
        assert_eq!(queue.current().unwrap().title(), "A");
    }

    #[test]
    fn test_advance_stops_at_end_without_repeat() {
        let mut queue = queue_of(&["A", "B", "C"]);
        assert_eq!(queue.advance().unwrap().title(), "B");
        assert_eq!(queue.advance().unwrap().title(), "C");
        assert_eq!(queue.cursor(), Some(2));

        assert!(queue.advance().is_none());
        assert_eq!(queue.cursor(), Some(2));
        assert!(queue.advance().is_none());
        assert_eq!(queue.cursor(), Some(2));
    }

    #[test]
    fn test_advance_wraps_with_repeat() {
        let mut queue = queue_of(&["A", "B", "C"]);
        queue.advance();
        queue.advance();
        assert!(queue.toggle_repeat());

        assert_eq!(queue.advance().unwrap().title(), "A");
        assert_eq!(queue.cursor(), Some(0));
    }

    #[test]
    fn test_retreat_mirrors_advance() {
        let mut queue = queue_of(&["A", "B", "C"]);
        assert!(queue.retreat().is_none());
        assert_eq!(queue.cursor(), Some(0));

        queue.toggle_repeat();
        assert_eq!(queue.retreat().unwrap().title(), "C");
        assert_eq!(queue.cursor(), Some(2));
        assert_eq!(queue.retreat().unwrap().title(), "B");
    }

    #[test]
    fn test_cursor_stays_in_bounds_without_repeat() {
        let mut queue = queue_of(&["A", "B", "C", "D"]);
        let moves = [true, true, true, true, true, false, false, false, false, false, true];
        for forward in moves {
            let stepped = if forward {
                queue.advance().is_some()
            } else {
                queue.retreat().is_some()
            };
            let cursor = queue.cursor().unwrap();
            assert!(cursor < queue.len());
            if !stepped {
                assert!(cursor == 0 || cursor == queue.len() - 1);
            }
        }
    }

    #[test]
    fn test_single_track_repeat_wraps_to_itself() {
        let mut queue = queue_of(&["Solo"]);
        queue.toggle_repeat();
        assert_eq!(queue.advance().unwrap().title(), "Solo");
        assert_eq!(queue.retreat().unwrap().title(), "Solo");
    }

    #[test]
    fn test_shuffle_then_unshuffle_restores_order() {
        let names = many();
        let refs: Vec<&str> = names.iter().map(String::as_str).collect();
        let mut queue = queue_of(&refs);
        let before = queue.tracks().to_vec();

        let mut rng = StdRng::seed_from_u64(42);
        assert!(queue.toggle_shuffle_with(&mut rng));
        assert!(queue.is_shuffled());
        assert_ne!(queue.tracks(), before.as_slice());

        let mut sorted = queue.tracks().to_vec();
        sorted.sort_by(|a, b| a.title().cmp(b.title()));
        assert_eq!(sorted, before);

        assert!(!queue.toggle_shuffle_with(&mut rng));
        assert_eq!(queue.tracks(), before.as_slice());
    }

    #[test]
    fn test_shuffle_keeps_cursor_index() {
        let names = many();
        let refs: Vec<&str> = names.iter().map(String::as_str).collect();
        let mut queue = queue_of(&refs);
        queue.advance();
        queue.advance();

        queue.toggle_shuffle_with(&mut StdRng::seed_from_u64(1));
        assert_eq!(queue.cursor(), Some(2));
        queue.toggle_shuffle_with(&mut StdRng::seed_from_u64(1));
        assert_eq!(queue.cursor(), Some(2));
        assert_eq!(queue.current().unwrap().title(), "Track 02");
    }

    #[test]
    fn test_enqueue_while_shuffled_is_lost_on_unshuffle() {
        let mut queue = queue_of(&["A", "B"]);
        let mut rng = StdRng::seed_from_u64(3);
        queue.toggle_shuffle_with(&mut rng);
        queue.enqueue(track("C"));
        assert_eq!(queue.len(), 3);

        queue.toggle_shuffle_with(&mut rng);
        assert_eq!(titles(&queue), ["A", "B"]);
    }

    #[test]
    fn test_dequeue_resyncs_original_order() {
        let mut queue = queue_of(&["A", "B", "C", "D"]);
        let mut rng = StdRng::seed_from_u64(11);
        queue.toggle_shuffle_with(&mut rng);
        let removed = queue.dequeue_current().unwrap();
        let live: Vec<String> = titles(&queue).iter().map(|t| t.to_string()).collect();

        // Unshuffling now yields the shuffled-minus-one order, not A B C D.
        queue.toggle_shuffle_with(&mut rng);
        assert_eq!(titles(&queue), live);
        assert!(!titles(&queue).contains(&removed.title()));
    }

    #[test]
    fn test_dequeue_clamps_cursor() {
        let mut queue = queue_of(&["A", "B", "C"]);
        queue.advance();
        queue.advance();
        assert_eq!(queue.dequeue_current().unwrap().title(), "C");
        assert_eq!(queue.cursor(), Some(1));
        assert_eq!(queue.current().unwrap().title(), "B");

        queue.dequeue_current().unwrap();
        queue.dequeue_current().unwrap();
        assert!(queue.is_empty());
        assert_eq!(queue.cursor(), None);
    }

    #[test]
    fn test_enqueue_playlist_keeps_order() {
        let mut playlist = Playlist::new("Mix");
        for title in ["Z", "Y", "X"] {
            playlist.add_track(track(title)).unwrap();
        }
        let mut queue = queue_of(&["A"]);
        queue.enqueue_playlist(&playlist);
        assert_eq!(titles(&queue), ["A", "Z", "Y", "X"]);

        queue.enqueue_playlist(&Playlist::new("Empty"));
        assert_eq!(queue.len(), 4);
    }

    #[test]
    fn test_snapshot_restore_unshuffled_is_verbatim() {
        let mut queue = queue_of(&["A", "B", "C"]);
        queue.advance();
        queue.toggle_repeat();

        let snapshot = queue.snapshot();
        assert_eq!(snapshot.cursor, 1);
        assert!(snapshot.repeat);
        assert!(!snapshot.shuffled);

        let restored = PlaybackQueue::restore(snapshot);
        assert_eq!(titles(&restored), ["A", "B", "C"]);
        assert_eq!(restored.cursor(), Some(1));
        assert!(restored.is_repeat());
    }

    #[test]
    fn test_restore_shuffled_reshuffles_and_can_unshuffle() {
        let snapshot = QueueSnapshot {
            tracks: many().iter().map(|t| track(t)).collect(),
            cursor: 4,
            repeat: false,
            shuffled: true,
        };
        let saved = snapshot.tracks.clone();

        let mut rng = StdRng::seed_from_u64(5);
        let mut restored = PlaybackQueue::restore_with(snapshot, &mut rng);
        assert!(restored.is_shuffled());
        assert_eq!(restored.len(), saved.len());
        assert_ne!(restored.tracks(), saved.as_slice());

        restored.toggle_shuffle_with(&mut rng);
        assert_eq!(restored.tracks(), saved.as_slice());
    }

    #[test]
    fn test_restore_clamps_cursor() {
        let snapshot = QueueSnapshot {
            tracks: vec![track("A")],
            cursor: 9,
            repeat: false,
            shuffled: false,
        };
        assert_eq!(PlaybackQueue::restore(snapshot).cursor(), Some(0));
        assert_eq!(PlaybackQueue::restore(QueueSnapshot::default()).cursor(), None);
    }

    #[test]
    fn test_page_view() {
        let names = many();
        let refs: Vec<&str> = names.iter().map(String::as_str).collect();
        let queue = queue_of(&refs[..12]);

        let page = queue.page(2, DEFAULT_PAGE_SIZE);
        assert_eq!(page.total_pages, 2);
        assert_eq!(page.entries.len(), 2);
        assert_eq!(page.entries[0].0, 11);
        assert_eq!(page.current.unwrap().title(), "Track 00");

        let text = page.to_string();
        assert!(text.contains("Repeat: Off"));
        assert!(text.contains("11. Track 10 - Artist (3:00)"));
        assert!(text.ends_with("<Page 2 of 2>"));
    }

    #[test]
    fn test_clear_resets_everything() {
        let mut queue = queue_of(&["A"]);
        queue.toggle_repeat();
        queue.clear();
        assert!(queue.is_empty());
        assert!(!queue.is_repeat());
        assert_eq!(queue.cursor(), None);
    }
}
