//! # Tunebook - Personal Music Library
//!
//! Keeps a sorted catalog of tracks, named playlists and a playback queue
//! with shuffle and repeat, all stored as JSON files in one data directory.
//!
//! ## Usage
//!
//! ```bash
//! # Interactive menu
//! tunebook
//!
//! # One-shot commands
//! tunebook add --title "So What" --artist "Miles Davis" --album "Kind of Blue" --duration 9:22
//! tunebook search "so what"
//! tunebook queue add "so what"
//! tunebook queue show
//! ```

use anyhow::{Context, Result};
use clap::{CommandFactory, Parser};
use log::{debug, info};
use std::io;
use tunebook::cli::{self, Command, PlaylistAction, QueueAction};
use tunebook::completion;
use tunebook::config::RuntimeConfig;
use tunebook::manager::MusicManager;
use tunebook::menu::Menu;
use tunebook::track::{Track, TrackDuration};

/// Main entry point for the Tunebook application.
///
/// Initializes logging, parses command-line arguments, opens the stores and
/// routes the command.
///
/// # Logging
///
/// Initializes environment logger which can be controlled via `RUST_LOG`:
/// - `RUST_LOG=debug tunebook list` - Enable debug logging
/// - `RUST_LOG=tunebook::store=debug tunebook` - Module-specific logging
fn main() -> Result<()> {
    env_logger::init();

    let args = cli::Args::parse();

    // Completion needs no data directory.
    if let Some(Command::Completion { shell }) = &args.command {
        let mut cmd = cli::Args::command();
        completion::generate_completions(completion::shell_to_completion_shell(shell), &mut cmd);
        return Ok(());
    }

    let config = RuntimeConfig::resolve(args.data_dir)?;
    debug!("Using data directory {}", config.data_dir.display());
    let mut manager = MusicManager::open(&config)
        .with_context(|| format!("Failed to open music data in {}", config.data_dir.display()))?;

    match args.command.unwrap_or(Command::Menu) {
        Command::Menu => {
            let stdin = io::stdin();
            Menu::new(&mut manager, stdin.lock(), io::stdout()).run()?;
        }
        Command::List => {
            if manager.library().is_empty() {
                println!("The music library is empty.");
            }
            for track in manager.library() {
                println!("{track}\n");
            }
        }
        Command::Search { title } => {
            let results = manager.search(&title);
            if results.is_empty() {
                println!("No tracks found for '{title}'.");
            }
            for track in results {
                println!("{track}\n");
            }
        }
        Command::Add {
            title,
            artist,
            album,
            duration,
            additional_artists,
        } => add_track(&mut manager, title, artist, album, duration, additional_artists)?,
        Command::Playlist { action } => run_playlist(&mut manager, action)?,
        Command::Queue { action } => run_queue(&mut manager, action)?,
        Command::Completion { .. } => unreachable!("handled before opening the stores"),
    }

    Ok(())
}

fn add_track(
    manager: &mut MusicManager,
    title: String,
    artist: String,
    album: String,
    duration: TrackDuration,
    additional_artists: Vec<String>,
) -> Result<()> {
    let track = Track::new(
        title.trim(),
        artist.trim(),
        album.trim(),
        duration,
        additional_artists,
    );
    info!("Adding `{}' to the library", track.title());
    manager.add_track(track)?;
    println!("Track added successfully!");
    Ok(())
}

fn run_playlist(manager: &mut MusicManager, action: PlaylistAction) -> Result<()> {
    match action {
        PlaylistAction::Create { name } => {
            manager.create_playlist(&name)?;
            println!("Playlist '{name}' created successfully!");
        }
        PlaylistAction::Delete { name } => {
            manager.delete_playlist(&name)?;
            println!("Playlist '{name}' deleted successfully!");
        }
        PlaylistAction::List => {
            let playlists = manager.playlists()?;
            if playlists.is_empty() {
                println!("No playlists found.");
            }
            for playlist in playlists {
                println!(
                    "{} ({}, {} tracks)",
                    playlist.name(),
                    playlist.total_duration().summary(),
                    playlist.len()
                );
            }
        }
        PlaylistAction::Show { name } => {
            println!("{}", manager.playlist(&name)?);
        }
        PlaylistAction::Add { name, title } => {
            let track = manager.add_to_playlist(&name, &title)?;
            println!("Added '{}' to playlist '{name}'.", track.title());
        }
        PlaylistAction::Remove { name, title } => {
            let track = manager.remove_from_playlist(&name, &title)?;
            println!("Removed '{}' from playlist '{name}'.", track.title());
        }
        PlaylistAction::Search { query } => {
            let names = manager.search_playlists(&query)?;
            if names.is_empty() {
                println!("No playlists found matching '{query}'.");
            }
            for name in names {
                println!("{name}");
            }
        }
    }
    Ok(())
}

fn run_queue(manager: &mut MusicManager, action: QueueAction) -> Result<()> {
    match action {
        QueueAction::Show { page, page_size } => {
            println!("{}", manager.queue().page(page, page_size));
            return Ok(());
        }
        QueueAction::Add { title } => {
            let track = manager.enqueue_track(&title)?;
            println!("Added '{}' to the queue.", track.title());
        }
        QueueAction::AddPlaylist { name } => {
            let count = manager.enqueue_playlist(&name)?;
            println!("Added {count} track(s) from playlist '{name}' to the queue.");
        }
        QueueAction::Next => match manager.next_track() {
            Some(track) => println!("Now playing:\n{track}"),
            None => println!("End of queue."),
        },
        QueueAction::Prev => match manager.previous_track() {
            Some(track) => println!("Now playing:\n{track}"),
            None => println!("Start of queue."),
        },
        QueueAction::Shuffle => {
            let shuffled = manager.toggle_shuffle();
            println!("Shuffle {}.", if shuffled { "on" } else { "off" });
        }
        QueueAction::Repeat => {
            let repeat = manager.toggle_repeat();
            println!("Repeat {}.", if repeat { "on" } else { "off" });
        }
        QueueAction::Remove => {
            let track = manager.remove_current()?;
            println!("Removed '{}' from the queue.", track.title());
        }
        QueueAction::Clear => {
            manager.clear_queue();
            println!("Queue cleared.");
        }
    }
    manager.save_queue()?;
    Ok(())
}
