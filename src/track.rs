//! # Track Module
//!
//! A [`Track`] is one song in the library: title, primary artist, any number
//! of featured artists, album and a [`TrackDuration`].
//!
//! Durations are entered and stored as `mm:ss`. Parsing is strict: both
//! parts must be integers and the seconds part must be below 60. Anything
//! else is rejected with [`LibraryError::InvalidFormat`] before a `Track`
//! can be built, so every `Track` in memory carries a valid duration.

use crate::error::{LibraryError, Result};
use std::fmt;
use std::str::FromStr;

/// Length of a track (or of a whole playlist) in minutes and seconds.
///
/// Invariant: `seconds < 60`.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TrackDuration {
    minutes: u32,
    seconds: u32,
}

impl TrackDuration {
    pub fn new(minutes: u32, seconds: u32) -> Result<Self> {
        if seconds >= 60 {
            return Err(LibraryError::InvalidFormat {
                input: format!("{minutes}:{seconds}"),
            });
        }
        Ok(Self { minutes, seconds })
    }

    /// Re-derive minutes and seconds from a total number of seconds.
    ///
    /// Totals past `u32::MAX` minutes saturate at `u32::MAX:59`.
    pub fn from_secs(total: u64) -> Self {
        match u32::try_from(total / 60) {
            Ok(minutes) => Self {
                minutes,
                seconds: (total % 60) as u32,
            },
            Err(_) => Self {
                minutes: u32::MAX,
                seconds: 59,
            },
        }
    }

    pub fn as_secs(&self) -> u64 {
        u64::from(self.minutes) * 60 + u64::from(self.seconds)
    }

    pub fn minutes(&self) -> u32 {
        self.minutes
    }

    pub fn seconds(&self) -> u32 {
        self.seconds
    }

    /// The `(minutes, seconds)` pair.
    pub fn numeric(&self) -> (u32, u32) {
        (self.minutes, self.seconds)
    }

    /// Zero-padded `MM:SS`, used for playlist totals.
    pub fn padded(&self) -> String {
        format!("{:02}:{:02}", self.minutes, self.seconds)
    }

    /// Long form `M min S sec`, as written to the playlist store.
    pub fn summary(&self) -> String {
        format!("{} min {} sec", self.minutes, self.seconds)
    }

    /// Inverse of [`TrackDuration::summary`].
    pub fn parse_summary(input: &str) -> Result<Self> {
        let invalid = || LibraryError::InvalidFormat {
            input: input.to_string(),
        };
        let (minutes, rest) = input.trim().split_once(" min ").ok_or_else(invalid)?;
        let seconds = rest.strip_suffix(" sec").ok_or_else(invalid)?;
        let minutes = minutes.trim().parse().map_err(|_| invalid())?;
        let seconds = seconds.trim().parse().map_err(|_| invalid())?;
        Self::new(minutes, seconds).map_err(|_| invalid())
    }
}

impl FromStr for TrackDuration {
    type Err = LibraryError;

    /// Parse `mm:ss`. Minutes may have any number of digits.
    fn from_str(input: &str) -> Result<Self> {
        let invalid = || LibraryError::InvalidFormat {
            input: input.to_string(),
        };

        let (minutes, seconds) = input.trim().split_once(':').ok_or_else(invalid)?;
        let minutes: u32 = minutes.trim().parse().map_err(|_| invalid())?;
        let seconds: u32 = seconds.trim().parse().map_err(|_| invalid())?;

        Self::new(minutes, seconds).map_err(|_| invalid())
    }
}

impl fmt::Display for TrackDuration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{:02}", self.minutes, self.seconds)
    }
}

/// One song in the library.
///
/// Equality is full-field: two tracks are the same only when title, every
/// artist, album and duration all match. Playlists rely on this for their
/// "already present" check.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Track {
    title: String,
    artist: String,
    /// Featured artists, in the order they were added.
    additional_artists: Vec<String>,
    album: String,
    duration: TrackDuration,
}

impl Track {
    pub fn new(
        title: impl Into<String>,
        artist: impl Into<String>,
        album: impl Into<String>,
        duration: TrackDuration,
        additional_artists: Vec<String>,
    ) -> Self {
        Self {
            title: title.into(),
            artist: artist.into(),
            additional_artists,
            album: album.into(),
            duration,
        }
    }

    /// Build a track from raw user input, validating the duration string.
    pub fn parse(
        title: &str,
        artist: &str,
        album: &str,
        duration: &str,
        additional_artists: Vec<String>,
    ) -> Result<Self> {
        let duration = duration.parse()?;
        Ok(Self::new(
            title.trim(),
            artist.trim(),
            album.trim(),
            duration,
            additional_artists,
        ))
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    /// Primary artist only.
    pub fn primary_artist(&self) -> &str {
        &self.artist
    }

    pub fn additional_artists(&self) -> &[String] {
        &self.additional_artists
    }

    /// Primary artist followed by featured artists, comma separated.
    pub fn artist_display(&self) -> String {
        if self.additional_artists.is_empty() {
            return self.artist.clone();
        }
        std::iter::once(self.artist.as_str())
            .chain(self.additional_artists.iter().map(String::as_str))
            .collect::<Vec<_>>()
            .join(", ")
    }

    pub fn album(&self) -> &str {
        &self.album
    }

    pub fn duration(&self) -> TrackDuration {
        self.duration
    }

    /// Duration as a `(minutes, seconds)` pair.
    pub fn numeric_duration(&self) -> (u32, u32) {
        self.duration.numeric()
    }

    /// Add a featured artist unless they are already credited.
    pub fn add_additional_artist(&mut self, artist: impl Into<String>) {
        let artist = artist.into();
        if !self.additional_artists.contains(&artist) {
            self.additional_artists.push(artist);
        }
    }

    /// Normalized form used by every title lookup.
    pub(crate) fn title_key(&self) -> String {
        normalize_title(&self.title)
    }
}

impl fmt::Display for Track {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "\tTitle: {}", self.title)?;
        writeln!(f, "\tArtist(s): {}", self.artist_display())?;
        writeln!(f, "\tAlbum: {}", self.album)?;
        write!(f, "\tDuration: {}", self.duration)
    }
}

/// Lookups ignore case and surrounding whitespace.
pub fn normalize_title(title: &str) -> String {
    title.trim().to_lowercase()
}

/// Split a comma-separated artist list as typed by the user.
///
/// `none` (any case) or an empty line means no featured artists.
pub fn parse_artist_list(input: &str) -> Vec<String> {
    let input = input.trim();
    if input.is_empty() || input.eq_ignore_ascii_case("none") {
        return Vec::new();
    }
    input
        .split(',')
        .map(str::trim)
        .filter(|name| !name.is_empty())
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn track(title: &str, duration: &str) -> Track {
        Track::parse(title, "Artist", "Album", duration, Vec::new()).unwrap()
    }

    #[test]
    fn test_duration_parses_minutes_and_seconds() {
        let duration: TrackDuration = "3:45".parse().unwrap();
        assert_eq!(duration.numeric(), (3, 45));
        assert_eq!(duration.as_secs(), 225);
        assert_eq!(duration.to_string(), "3:45");
        assert_eq!(duration.padded(), "03:45");

        let long: TrackDuration = " 123:05 ".parse().unwrap();
        assert_eq!(long.numeric(), (123, 5));
    }

    #[test]
    fn test_duration_rejects_bad_input() {
        for input in ["3:60", "345", "a:10", "3:xx", "-1:30", "3:-5", "", ":", "1:2:3"] {
            let result = input.parse::<TrackDuration>();
            assert!(
                matches!(result, Err(LibraryError::InvalidFormat { .. })),
                "`{input}` should be rejected"
            );
        }
    }

    #[test]
    fn test_duration_from_secs_rederives_fields() {
        let duration = TrackDuration::from_secs(3 * 60 + 59 + 2);
        assert_eq!(duration.numeric(), (4, 1));
        assert_eq!(TrackDuration::from_secs(0).numeric(), (0, 0));
    }

    #[test]
    fn test_duration_from_secs_saturates() {
        let longest: TrackDuration = "4294967295:00".parse().unwrap();
        let total = TrackDuration::from_secs(longest.as_secs() * 2);
        assert_eq!(total.numeric(), (u32::MAX, 59));
        assert!(total >= longest);

        let edge = TrackDuration::from_secs(u64::from(u32::MAX) * 60 + 59);
        assert_eq!(edge.numeric(), (u32::MAX, 59));
    }

    #[test]
    fn test_summary_round_trip() {
        let duration = TrackDuration::new(12, 7).unwrap();
        assert_eq!(duration.summary(), "12 min 7 sec");
        assert_eq!(TrackDuration::parse_summary("12 min 7 sec").unwrap(), duration);
        assert!(TrackDuration::parse_summary("12 minutes").is_err());
    }

    #[test]
    fn test_artist_display_joins_featured_artists() {
        let mut song = track("Alpha", "2:00");
        assert_eq!(song.artist_display(), "Artist");

        song.add_additional_artist("Guest");
        song.add_additional_artist("Other");
        song.add_additional_artist("Guest");
        assert_eq!(song.additional_artists(), ["Guest", "Other"]);
        assert_eq!(song.artist_display(), "Artist, Guest, Other");
    }

    #[test]
    fn test_equality_is_full_field() {
        let a = track("Alpha", "2:00");
        let b = track("Alpha", "2:01");
        assert_ne!(a, b);
        assert_eq!(a, track("Alpha", "2:00"));
    }

    #[test]
    fn test_parse_artist_list() {
        assert!(parse_artist_list("None").is_empty());
        assert!(parse_artist_list("   ").is_empty());
        assert_eq!(parse_artist_list("A, B ,,C"), vec!["A", "B", "C"]);
    }

    #[test]
    fn test_display_block() {
        let song = track("Alpha", "3:07");
        let text = song.to_string();
        assert!(text.contains("Title: Alpha"));
        assert!(text.contains("Artist(s): Artist"));
        assert!(text.contains("Duration: 3:07"));
    }
}
