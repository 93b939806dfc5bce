//! Multi-key comparison.
//!
//! A comparator chain is an ordered list of key comparators. Two values are
//! compared by each key in turn until one of them tells them apart.

use crate::track::Track;
use std::cmp::Ordering;

/// Compare two values on a single key.
pub type KeyComparator<T> = fn(&T, &T) -> Ordering;

/// Apply `comparators` in order and return the first non-equal result.
pub fn compare_chain<T>(a: &T, b: &T, comparators: &[KeyComparator<T>]) -> Ordering {
    comparators
        .iter()
        .map(|compare| compare(a, b))
        .find(|ordering| ordering.is_ne())
        .unwrap_or(Ordering::Equal)
}

fn by_title(a: &Track, b: &Track) -> Ordering {
    a.title().cmp(b.title())
}

fn by_artist(a: &Track, b: &Track) -> Ordering {
    a.artist_display().cmp(&b.artist_display())
}

fn by_album(a: &Track, b: &Track) -> Ordering {
    a.album().cmp(b.album())
}

/// Only whole minutes take part in ordering; seconds never break a tie.
fn by_duration_minutes(a: &Track, b: &Track) -> Ordering {
    a.duration().minutes().cmp(&b.duration().minutes())
}

/// Library order: title, then artist display, then album, then minutes.
pub const TRACK_ORDER: [KeyComparator<Track>; 4] =
    [by_title, by_artist, by_album, by_duration_minutes];

pub fn compare_tracks(a: &Track, b: &Track) -> Ordering {
    compare_chain(a, b, &TRACK_ORDER)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn track(title: &str, artist: &str, album: &str, duration: &str) -> Track {
        Track::parse(title, artist, album, duration, Vec::new()).unwrap()
    }

    #[test]
    fn test_chain_stops_at_first_difference() {
        let a = track("Same", "A", "Z", "9:00");
        let b = track("Same", "B", "A", "1:00");
        assert_eq!(compare_tracks(&a, &b), Ordering::Less);
    }

    #[test]
    fn test_each_level_breaks_ties() {
        let base = track("T", "A", "X", "3:00");
        assert_eq!(compare_tracks(&base, &track("U", "A", "X", "3:00")), Ordering::Less);
        assert_eq!(compare_tracks(&base, &track("T", "0", "X", "3:00")), Ordering::Greater);
        assert_eq!(compare_tracks(&base, &track("T", "A", "Y", "3:00")), Ordering::Less);
        assert_eq!(compare_tracks(&base, &track("T", "A", "X", "4:00")), Ordering::Less);
    }

    #[test]
    fn test_seconds_are_ignored() {
        let a = track("T", "A", "X", "3:01");
        let b = track("T", "A", "X", "3:59");
        assert_eq!(compare_tracks(&a, &b), Ordering::Equal);
    }

    #[test]
    fn test_featured_artists_take_part_in_artist_key() {
        let solo = track("T", "A", "X", "3:00");
        let featured = Track::parse("T", "A", "X", "3:00", vec!["B".to_string()]).unwrap();
        assert_eq!(compare_tracks(&solo, &featured), Ordering::Less);
    }

    #[test]
    fn test_empty_chain_is_equal() {
        let comparators: [KeyComparator<u32>; 0] = [];
        assert_eq!(compare_chain(&1, &2, &comparators), Ordering::Equal);
    }
}
