//! Personal music library manager: a sorted track catalog, playlists and a
//! playback queue with shuffle and repeat.
//!
//! Core modules:
//! - [`track`] - Track value type and `mm:ss` durations
//! - [`ordering`] - Multi-key comparator chain used for library order
//! - [`library`] - Sorted library with binary-search insertion and lookup
//! - [`playlist`] - Named track lists with a running total duration
//! - [`queue`] - Playback queue with cursor, shuffle and repeat
//!
//! ### Supporting Modules
//!
//! - [`store`] - JSON file persistence for library, playlists and queue
//! - [`manager`] - One method per user command, wiring core types to stores
//! - [`menu`] - Interactive text menu
//! - [`config`] - Data directory and store path resolution
//! - [`cli`] - Command-line interface definitions with clap integration
//! - [`completion`] - Shell completion generation
//! - [`error`] - Error taxonomy
//!
//! ## Quick Start Example
//!
//! ```
//! use tunebook::library::SortedLibrary;
//! use tunebook::playlist::Playlist;
//! use tunebook::queue::PlaybackQueue;
//! use tunebook::track::Track;
//!
//! let mut library = SortedLibrary::new();
//! for title in ["Beta", "Alpha", "Gamma"] {
//!     library.insert(Track::parse(title, "Artist", "Album", "3:45", Vec::new())?);
//! }
//! assert_eq!(library.find_exact("alpha"), Some(0));
//!
//! let mut playlist = Playlist::new("Favourites");
//! playlist.add_track(library.tracks()[0].clone())?;
//! assert_eq!(playlist.total_duration().padded(), "03:45");
//!
//! let mut queue = PlaybackQueue::new();
//! queue.enqueue_playlist(&playlist);
//! queue.enqueue(library.tracks()[1].clone());
//! assert_eq!(queue.advance().map(|t| t.title()), Some("Beta"));
//! assert!(queue.advance().is_none());
//! # Ok::<(), tunebook::error::LibraryError>(())
//! ```
//!
//! ## Error Handling
//!
//! Core operations return [`error::Result`] with a [`error::LibraryError`]:
//! not found, invalid duration, duplicate, empty collection, or a store
//! I/O / parse failure. Lookups that can simply miss return `Option`.
//! The binary and menu layer wrap these in `anyhow` for context.
//!
//! ## Testing
//!
//! ```bash
//! cargo test
//! cargo bench
//! ```

pub mod cli;
pub mod completion;
pub mod config;
pub mod error;
pub mod library;
pub mod manager;
pub mod menu;
pub mod ordering;
pub mod playlist;
pub mod queue;
pub mod store;
pub mod track;
