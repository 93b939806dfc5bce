//! # Command-Line Interface Module
//!
//! This module defines the command-line interface for Tunebook using Clap derive
//! macros. Running `tunebook` with no subcommand opens the interactive menu;
//! the subcommands below run a single operation and exit.
//!
//! ## Commands
//!
//! - `menu`: Interactive menu (default)
//! - `list`: Print the whole library in sorted order
//! - `search`: Find tracks by title
//! - `add`: Add a track to the library
//! - `playlist`: Create, inspect and edit playlists
//! - `queue`: Inspect and drive the playback queue
//! - `completion`: Generate shell completions
//!
//! ## Examples
//!
//! ```bash
//! tunebook add --title "Blue in Green" --artist "Miles Davis" --album "Kind of Blue" --duration 5:37
//! tunebook playlist create "Late Night"
//! tunebook playlist add "Late Night" "blue in green"
//! tunebook queue add-playlist "Late Night"
//! tunebook queue next
//! ```

use crate::queue::DEFAULT_PAGE_SIZE;
use crate::track::TrackDuration;
use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// Shell types supported for completion generation
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, ValueEnum, Debug)]
#[allow(clippy::enum_variant_names)]
pub enum Shell {
    /// Bash shell
    Bash,
    /// Zsh shell
    Zsh,
    /// Fish shell
    Fish,
    /// PowerShell
    PowerShell,
    /// Elvish shell
    Elvish,
}

/// Main application arguments structure.
#[derive(Parser, Debug)]
#[command(name = "tunebook")]
#[command(about = "Tunebook: a personal music library, playlists and playback queue")]
#[command(version)]
pub struct Args {
    /// Directory holding library.json, playlists.json and queue.json
    ///
    /// Defaults to the platform data directory (e.g. ~/.local/share/tunebook).
    #[arg(long, global = true, env = "TUNEBOOK_DATA_DIR", value_hint = clap::ValueHint::DirPath)]
    pub data_dir: Option<PathBuf>,

    /// The subcommand to execute; the interactive menu when omitted
    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Open the interactive menu
    Menu,

    /// List every track in library order
    List,

    /// Find tracks by title (case-insensitive, surrounding spaces ignored)
    Search {
        /// Track title to look up
        title: String,
    },

    /// Add a track to the library
    Add {
        /// Track title
        #[arg(long)]
        title: String,

        /// Primary artist
        #[arg(long)]
        artist: String,

        /// Album name
        #[arg(long)]
        album: String,

        /// Duration as mm:ss, seconds below 60
        #[arg(long)]
        duration: TrackDuration,

        /// Featured artist; repeat for several
        #[arg(long = "with", value_name = "ARTIST")]
        additional_artists: Vec<String>,
    },

    /// Manage playlists
    Playlist {
        #[command(subcommand)]
        action: PlaylistAction,
    },

    /// Manage the playback queue
    Queue {
        #[command(subcommand)]
        action: QueueAction,
    },

    /// Generate shell completions
    ///
    /// Outputs completion script for the specified shell to stdout.
    Completion {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

#[derive(Subcommand, Debug)]
pub enum PlaylistAction {
    /// Create an empty playlist
    Create { name: String },
    /// Delete a playlist
    Delete { name: String },
    /// List all playlists with their total duration
    List,
    /// Show a playlist and its tracks
    Show { name: String },
    /// Add the first library track matching TITLE
    Add { name: String, title: String },
    /// Remove the track titled TITLE
    Remove { name: String, title: String },
    /// Find playlists whose name contains QUERY
    Search { query: String },
}

/// Every queue action that changes the queue saves it afterwards.
#[derive(Subcommand, Debug)]
pub enum QueueAction {
    /// Show one page of the queue
    Show {
        /// 1-based page number
        #[arg(long, default_value_t = 1)]
        page: usize,

        /// Tracks per page
        #[arg(long, default_value_t = DEFAULT_PAGE_SIZE)]
        page_size: usize,
    },
    /// Enqueue the first library track matching TITLE
    Add { title: String },
    /// Enqueue every track of a playlist
    AddPlaylist { name: String },
    /// Move to the next track
    Next,
    /// Move to the previous track
    Prev,
    /// Toggle shuffle
    Shuffle,
    /// Toggle repeat
    Repeat,
    /// Remove the current track
    Remove,
    /// Empty the queue
    Clear,
}
