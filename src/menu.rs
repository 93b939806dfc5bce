//! # Interactive Menu
//!
//! Numbered text menus over any `BufRead`/`Write` pair, so the same code
//! drives a terminal session and the tests.
//!
//! Recoverable errors (unknown title, duplicate playlist, bad duration, empty
//! queue) are printed and the menu re-prompts. Store failures end the session
//! with an error. End of input ends the session cleanly.

use crate::error::LibraryError;
use crate::manager::MusicManager;
use crate::playlist::Playlist;
use crate::queue::DEFAULT_PAGE_SIZE;
use crate::track::{parse_artist_list, Track, TrackDuration};
use anyhow::Result;
use log::debug;
use std::io::{BufRead, Write};

const MAIN_MENU: &[&str] = &[
    "View Music Library",
    "Search Track",
    "Add Track",
    "Manage Playlists",
    "Manage Queue",
    "Exit",
];

const PLAYLIST_MENU: &[&str] = &[
    "Create Playlist",
    "View Playlists",
    "Delete Playlist",
    "Add Track to Playlist",
    "Remove Track from Playlist",
    "Back to Main Menu",
];

const QUEUE_MENU: &[&str] = &[
    "Add Track to Queue",
    "Add Playlist to Queue",
    "Shuffle Queue",
    "Toggle Repeat",
    "Next Track",
    "Previous Track",
    "View Queue",
    "Remove Current Track",
    "Save and Exit Queue",
];

/// Playlists listed per page in "View Playlists".
const PLAYLISTS_PER_PAGE: usize = 10;

/// Whether a menu loop should keep going after a command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Flow {
    Continue,
    Back,
    /// Input ran out.
    Quit,
}

pub struct Menu<'a, R, W> {
    manager: &'a mut MusicManager,
    input: R,
    output: W,
}

impl<'a, R: BufRead, W: Write> Menu<'a, R, W> {
    pub fn new(manager: &'a mut MusicManager, input: R, output: W) -> Self {
        Self {
            manager,
            input,
            output,
        }
    }

    /// Run the main menu until the user exits or input ends.
    pub fn run(&mut self) -> Result<()> {
        loop {
            self.show_menu(MAIN_MENU)?;
            let Some(choice) = self.read_choice()? else {
                return Ok(());
            };
            let flow = match choice {
                Some(1) => self.view_library()?,
                Some(2) => self.search_track()?,
                Some(3) => self.add_track()?,
                Some(4) => self.manage_playlists()?,
                Some(5) => self.manage_queue()?,
                Some(6) => {
                    writeln!(self.output, "Exiting program. Goodbye!")?;
                    Flow::Back
                }
                _ => self.invalid()?,
            };
            if flow != Flow::Continue {
                return Ok(());
            }
        }
    }

    fn show_menu(&mut self, entries: &[&str]) -> Result<()> {
        writeln!(self.output, "\n<----- Menu ----->")?;
        for (number, entry) in entries.iter().enumerate() {
            writeln!(self.output, "[{}] {entry}", number + 1)?;
        }
        Ok(())
    }

    /// Print `label` and read one trimmed line. `None` at end of input.
    fn prompt(&mut self, label: &str) -> Result<Option<String>> {
        write!(self.output, "{label}")?;
        self.output.flush()?;
        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            debug!("Input closed");
            return Ok(None);
        }
        Ok(Some(line.trim().to_string()))
    }

    /// Outer `None` at end of input, inner `None` for a non-number.
    fn read_choice(&mut self) -> Result<Option<Option<usize>>> {
        Ok(self
            .prompt("Select Operation: ")?
            .map(|line| line.parse().ok()))
    }

    fn invalid(&mut self) -> Result<Flow> {
        writeln!(self.output, "Invalid option. Please try again.")?;
        Ok(Flow::Continue)
    }

    /// Print recoverable errors, propagate the rest.
    fn report<T>(&mut self, result: crate::error::Result<T>) -> Result<Option<T>> {
        match result {
            Ok(value) => Ok(Some(value)),
            Err(e) if e.is_recoverable() => {
                writeln!(self.output, "{e}")?;
                Ok(None)
            }
            Err(e) => Err(e.into()),
        }
    }

    fn view_library(&mut self) -> Result<Flow> {
        writeln!(self.output, "\n<----- Music Library ----->")?;
        let library = self.manager.library();
        if library.is_empty() {
            writeln!(self.output, "The music library is empty.")?;
        }
        for track in library {
            writeln!(self.output, "{track}\n")?;
        }
        Ok(Flow::Continue)
    }

    fn search_track(&mut self) -> Result<Flow> {
        let Some(title) = self.prompt("Enter track title to search: ")? else {
            return Ok(Flow::Quit);
        };
        let results = self.manager.search(&title);
        if results.is_empty() {
            writeln!(self.output, "No tracks found for '{title}'.")?;
        } else {
            writeln!(self.output, "\nSearch Results:")?;
            for track in results {
                writeln!(self.output, "{track}\n")?;
            }
        }
        Ok(Flow::Continue)
    }

    /// Prompt for every field; the duration is asked again until it parses.
    fn receive_track_info(&mut self) -> Result<Option<Track>> {
        let Some(title) = self.prompt("Enter track title: ")? else {
            return Ok(None);
        };
        let Some(artist) = self.prompt("Enter artist: ")? else {
            return Ok(None);
        };
        let Some(album) = self.prompt("Enter album: ")? else {
            return Ok(None);
        };

        let duration = loop {
            let Some(input) = self.prompt("Enter duration (mm:ss): ")? else {
                return Ok(None);
            };
            match input.parse::<TrackDuration>() {
                Ok(duration) => break duration,
                Err(_) => writeln!(
                    self.output,
                    "Invalid duration format. Please use mm:ss with seconds less than 60."
                )?,
            }
        };

        let Some(extra) =
            self.prompt("Enter additional artists (comma-separated, or 'None'): ")?
        else {
            return Ok(None);
        };

        Ok(Some(Track::new(
            title,
            artist,
            album,
            duration,
            parse_artist_list(&extra),
        )))
    }

    fn add_track(&mut self) -> Result<Flow> {
        let Some(track) = self.receive_track_info()? else {
            return Ok(Flow::Quit);
        };
        let result = self.manager.add_track(track);
        if self.report(result)?.is_some() {
            writeln!(self.output, "Track added successfully!")?;
        }
        Ok(Flow::Continue)
    }

    fn manage_playlists(&mut self) -> Result<Flow> {
        loop {
            self.show_menu(PLAYLIST_MENU)?;
            let Some(choice) = self.read_choice()? else {
                return Ok(Flow::Quit);
            };
            let flow = match choice {
                Some(1) => self.create_playlist()?,
                Some(2) => self.view_playlists()?,
                Some(3) => self.delete_playlist()?,
                Some(4) => self.add_to_playlist()?,
                Some(5) => self.remove_from_playlist()?,
                Some(6) => return Ok(Flow::Continue),
                _ => self.invalid()?,
            };
            if flow == Flow::Quit {
                return Ok(Flow::Quit);
            }
        }
    }

    fn create_playlist(&mut self) -> Result<Flow> {
        let Some(name) = self.prompt("Enter playlist name: ")? else {
            return Ok(Flow::Quit);
        };
        let result = self.manager.create_playlist(&name);
        match result {
            Err(LibraryError::Duplicate { .. }) => {
                writeln!(self.output, "Playlist with this name already exists.")?;
            }
            other => {
                if self.report(other)?.is_some() {
                    writeln!(self.output, "Playlist '{name}' created successfully!")?;
                }
            }
        }
        Ok(Flow::Continue)
    }

    fn delete_playlist(&mut self) -> Result<Flow> {
        let Some(name) = self.prompt("Enter playlist name to delete: ")? else {
            return Ok(Flow::Quit);
        };
        let result = self.manager.delete_playlist(&name);
        if self.report(result)?.is_some() {
            writeln!(self.output, "Playlist '{name}' deleted successfully!")?;
        }
        Ok(Flow::Continue)
    }

    fn add_to_playlist(&mut self) -> Result<Flow> {
        let Some(name) = self.prompt("Enter playlist name: ")? else {
            return Ok(Flow::Quit);
        };
        // Check the playlist first so an unknown name is reported before asking for a title.
        let result = self.manager.playlist(&name);
        if self.report(result)?.is_none() {
            return Ok(Flow::Continue);
        }
        let Some(title) = self.prompt("Enter track title to add: ")? else {
            return Ok(Flow::Quit);
        };
        let result = self.manager.add_to_playlist(&name, &title);
        if self.report(result)?.is_some() {
            writeln!(self.output, "Track added to playlist!")?;
        }
        Ok(Flow::Continue)
    }

    fn remove_from_playlist(&mut self) -> Result<Flow> {
        let Some(name) = self.prompt("Enter playlist name: ")? else {
            return Ok(Flow::Quit);
        };
        let result = self.manager.playlist(&name);
        if self.report(result)?.is_none() {
            return Ok(Flow::Continue);
        }
        let Some(title) = self.prompt("Enter track title to remove: ")? else {
            return Ok(Flow::Quit);
        };
        let result = self.manager.remove_from_playlist(&name, &title);
        if self.report(result)?.is_some() {
            writeln!(self.output, "Track removed from playlist!")?;
        }
        Ok(Flow::Continue)
    }

    fn view_playlists(&mut self) -> Result<Flow> {
        let playlists = self.manager.playlists()?;
        if playlists.is_empty() {
            writeln!(self.output, "No playlists found.")?;
            return Ok(Flow::Continue);
        }

        let total_pages = playlists.len().div_ceil(PLAYLISTS_PER_PAGE);
        let mut page = 1;
        loop {
            self.show_playlist_page(&playlists, page, total_pages)?;
            let Some(choice) = self.prompt("Select an option: ")? else {
                return Ok(Flow::Quit);
            };
            match choice.as_str() {
                "0" => return Ok(Flow::Continue),
                "p" | "P" if page > 1 => page -= 1,
                "n" | "N" if page < total_pages => page += 1,
                "s" | "S" => self.search_playlists()?,
                other => match other.parse::<usize>() {
                    Ok(index) if (1..=playlists.len()).contains(&index) => {
                        self.show_playlist_details(&playlists[index - 1])?;
                    }
                    _ => {
                        self.invalid()?;
                    }
                },
            }
        }
    }

    fn show_playlist_page(
        &mut self,
        playlists: &[Playlist],
        page: usize,
        total_pages: usize,
    ) -> Result<()> {
        let start = (page - 1) * PLAYLISTS_PER_PAGE;
        writeln!(self.output, "\n<----- List of Playlists ----->")?;
        for (index, playlist) in playlists
            .iter()
            .enumerate()
            .skip(start)
            .take(PLAYLISTS_PER_PAGE)
        {
            writeln!(self.output, "[{}] {}", index + 1, playlist.name())?;
        }
        writeln!(self.output, "\n<Page {page} of {total_pages}>")?;
        writeln!(self.output, "[p] Previous Page")?;
        writeln!(self.output, "[n] Next Page")?;
        writeln!(self.output, "[s] Search Playlist")?;
        writeln!(self.output, "[0] Back")?;
        Ok(())
    }

    fn show_playlist_details(&mut self, playlist: &Playlist) -> Result<()> {
        writeln!(self.output, "\nPlaylist Name: {}", playlist.name())?;
        writeln!(
            self.output,
            "Total Duration: {}",
            playlist.total_duration().summary()
        )?;
        writeln!(self.output, "Tracks:")?;
        for track in playlist.tracks() {
            writeln!(
                self.output,
                "    {} – {} ({})",
                track.title(),
                track.artist_display(),
                track.duration()
            )?;
        }
        Ok(())
    }

    fn search_playlists(&mut self) -> Result<()> {
        let Some(query) = self.prompt("Enter playlist name to search: ")? else {
            return Ok(());
        };
        let matches = self.manager.search_playlists(&query)?;
        if matches.is_empty() {
            writeln!(self.output, "No playlists found matching '{query}'.")?;
            return Ok(());
        }
        writeln!(self.output, "\nSearch Results:")?;
        for (number, name) in matches.iter().enumerate() {
            writeln!(self.output, "[{}] {name}", number + 1)?;
        }
        Ok(())
    }

    fn manage_queue(&mut self) -> Result<Flow> {
        loop {
            self.show_menu(QUEUE_MENU)?;
            let Some(choice) = self.read_choice()? else {
                return Ok(Flow::Quit);
            };
            let flow = match choice {
                Some(1) => self.enqueue_track()?,
                Some(2) => self.enqueue_playlist()?,
                Some(3) => {
                    let shuffled = self.manager.toggle_shuffle();
                    let message = if shuffled { "Queue shuffled!" } else { "Queue unshuffled!" };
                    writeln!(self.output, "{message}")?;
                    Flow::Continue
                }
                Some(4) => {
                    let repeat = self.manager.toggle_repeat();
                    let state = if repeat { "enabled" } else { "disabled" };
                    writeln!(self.output, "Repeat {state}!")?;
                    Flow::Continue
                }
                Some(5) => {
                    match self.manager.next_track() {
                        Some(track) => writeln!(self.output, "Now playing:\n{track}")?,
                        None => writeln!(self.output, "End of queue.")?,
                    }
                    Flow::Continue
                }
                Some(6) => {
                    match self.manager.previous_track() {
                        Some(track) => writeln!(self.output, "Now playing:\n{track}")?,
                        None => writeln!(self.output, "Start of queue.")?,
                    }
                    Flow::Continue
                }
                Some(7) => {
                    let page = self.manager.queue().page(1, DEFAULT_PAGE_SIZE);
                    writeln!(self.output, "\n{page}")?;
                    Flow::Continue
                }
                Some(8) => {
                    let result = self.manager.remove_current();
                    if let Some(track) = self.report(result)? {
                        writeln!(self.output, "Removed '{}' from the queue.", track.title())?;
                    }
                    Flow::Continue
                }
                Some(9) => {
                    self.manager.save_queue()?;
                    writeln!(self.output, "Queue saved. Exiting queue management.")?;
                    return Ok(Flow::Continue);
                }
                _ => self.invalid()?,
            };
            if flow == Flow::Quit {
                return Ok(Flow::Quit);
            }
        }
    }

    fn enqueue_track(&mut self) -> Result<Flow> {
        let Some(title) = self.prompt("Enter track title to add: ")? else {
            return Ok(Flow::Quit);
        };
        let result = self.manager.enqueue_track(&title);
        if self.report(result)?.is_some() {
            writeln!(self.output, "Track added to queue!")?;
        }
        Ok(Flow::Continue)
    }

    fn enqueue_playlist(&mut self) -> Result<Flow> {
        let Some(name) = self.prompt("Enter playlist name to add: ")? else {
            return Ok(Flow::Quit);
        };
        let result = self.manager.enqueue_playlist(&name);
        if self.report(result)?.is_some() {
            writeln!(self.output, "Playlist '{name}' added to queue!")?;
        }
        Ok(Flow::Continue)
    }
}
