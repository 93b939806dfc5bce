//! # Sorted Music Library
//!
//! The library keeps every track in one `Vec`, sorted by the chain in
//! [`crate::ordering::TRACK_ORDER`]: title, artist display, album, then
//! whole minutes of duration. All string keys compare byte-wise, so the
//! order is case-sensitive.
//!
//! Tracks only ever enter through [`SortedLibrary::insert`], which finds the
//! slot by binary search and shifts the tail. There is no edit or delete.
//!
//! ## Lookups
//!
//! Title lookups trim and lowercase both sides. While the normalized titles
//! follow the same order as the raw ones (capitalization is consistent),
//! they binary-search on the normalized title and matches form one run.
//! The first insert that breaks this, say `bad guy` after `Zombie`, marks
//! the library as mixed-case and lookups switch to a linear scan.
//!
//! - [`SortedLibrary::find_exact`] returns *some* matching index. With
//!   several tracks of the same title it is not necessarily the leftmost.
//! - [`SortedLibrary::find_all_by_title`] returns every match in library
//!   order.

use crate::ordering::compare_tracks;
use crate::track::{normalize_title, Track};
use log::{debug, trace};
use std::cmp::Ordering;
use std::ops::Range;

#[derive(Debug, Default, Clone)]
pub struct SortedLibrary {
    tracks: Vec<Track>,
    /// Set once the normalized titles stop being non-decreasing.
    mixed_case: bool,
}

impl SortedLibrary {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a library by inserting each track in turn.
    pub fn from_tracks(tracks: impl IntoIterator<Item = Track>) -> Self {
        let mut library = Self::new();
        for track in tracks {
            library.insert(track);
        }
        library
    }

    /// Insert `track` at its sorted position and return that index.
    ///
    /// A track equal on every ordering key lands after the existing ones.
    /// Duplicates are kept; the library store drops them on save.
    pub fn insert(&mut self, track: Track) -> usize {
        let index = self.insertion_index(&track);
        trace!("Inserting `{}' at index {index}", track.title());
        if !self.mixed_case && !self.key_fits_at(index, &track.title_key()) {
            debug!(
                "`{}' breaks case-insensitive title order, lookups fall back to a scan",
                track.title()
            );
            self.mixed_case = true;
        }
        self.tracks.insert(index, track);
        index
    }

    /// Whether `key` sits between the normalized titles around `index`.
    fn key_fits_at(&self, index: usize, key: &str) -> bool {
        let after_prev = index == 0 || self.tracks[index - 1].title_key().as_str() <= key;
        let before_next = self
            .tracks
            .get(index)
            .map_or(true, |next| key <= next.title_key().as_str());
        after_prev && before_next
    }

    /// First index whose track orders strictly after `track`.
    pub fn insertion_index(&self, track: &Track) -> usize {
        self.tracks
            .partition_point(|existing| compare_tracks(existing, track) != Ordering::Greater)
    }

    /// Index of any track whose title matches `title`, ignoring case and
    /// surrounding whitespace.
    pub fn find_exact(&self, title: &str) -> Option<usize> {
        let target = normalize_title(title);
        if self.mixed_case {
            self.tracks
                .iter()
                .position(|track| track.title_key() == target)
        } else {
            self.binary_find(&target)
        }
    }

    /// Every track whose title matches `title`, in library order.
    ///
    /// Empty when nothing matches, including on an empty library.
    pub fn find_all_by_title(&self, title: &str) -> Vec<&Track> {
        let target = normalize_title(title);
        let found: Vec<&Track> = if self.mixed_case {
            self.tracks
                .iter()
                .filter(|track| track.title_key() == target)
                .collect()
        } else {
            self.tracks[self.title_range(&target)].iter().collect()
        };
        debug!("Title lookup `{}' matched {} track(s)", title.trim(), found.len());
        found
    }

    fn binary_find(&self, target: &str) -> Option<usize> {
        self.tracks
            .binary_search_by(|track| track.title_key().as_str().cmp(target))
            .ok()
    }

    /// Index range of the run of tracks whose normalized title is `target`.
    fn title_range(&self, target: &str) -> Range<usize> {
        let Some(mid) = self.binary_find(target) else {
            return 0..0;
        };

        let matches = |index: usize| self.tracks[index].title_key() == target;

        let mut start = mid;
        while start > 0 && matches(start - 1) {
            start -= 1;
        }

        let mut end = mid + 1;
        while end < self.tracks.len() && matches(end) {
            end += 1;
        }

        start..end
    }

    /// First match for `title`, the track the menus act on.
    pub fn first_by_title(&self, title: &str) -> Option<&Track> {
        self.find_all_by_title(title).into_iter().next()
    }

    pub fn get(&self, index: usize) -> Option<&Track> {
        self.tracks.get(index)
    }

    pub fn tracks(&self) -> &[Track] {
        &self.tracks
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Track> {
        self.tracks.iter()
    }

    pub fn len(&self) -> usize {
        self.tracks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tracks.is_empty()
    }

    pub fn first(&self) -> Option<&Track> {
        self.tracks.first()
    }

    pub fn last(&self) -> Option<&Track> {
        self.tracks.last()
    }
}

impl<'a> IntoIterator for &'a SortedLibrary {
    type Item = &'a Track;
    type IntoIter = std::slice::Iter<'a, Track>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
