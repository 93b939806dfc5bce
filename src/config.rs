//! # Configuration Module
//!
//! This module resolves where Tunebook keeps its data and builds the store
//! file paths from that location.
//!
//! ## Data Storage
//!
//! By default everything lives in the platform-standard data directory:
//! - Linux: `~/.local/share/tunebook/`
//! - macOS: `~/Library/Application Support/tunebook/`
//! - Windows: `%APPDATA%\tunebook\`
//!
//! The location can be overridden with `--data-dir` or the
//! `TUNEBOOK_DATA_DIR` environment variable. Inside it:
//!
//! - `library.json` - the track catalog
//! - `playlists.json` - all playlists, keyed by name
//! - `queue.json` - the saved playback queue

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

pub const LIBRARY_FILE: &str = "library.json";
pub const PLAYLISTS_FILE: &str = "playlists.json";
pub const QUEUE_FILE: &str = "queue.json";

/// Returns the platform-appropriate data directory for Tunebook.
///
/// The `tunebook` subdirectory is created if it doesn't exist.
///
/// # Errors
///
/// This function will return an error if:
/// - The system data directory cannot be determined
/// - The tunebook subdirectory cannot be created due to permissions
///
/// # Examples
///
/// ```no_run
/// use tunebook::config::get_data_dir;
///
/// let data_dir = get_data_dir()?;
/// println!("Data location: {}", data_dir.display());
/// # Ok::<(), anyhow::Error>(())
/// ```
pub fn get_data_dir() -> Result<PathBuf> {
    let data_dir = dirs::data_dir().ok_or_else(|| {
        anyhow::anyhow!(
            "Could not determine system data directory. Use --data-dir or TUNEBOOK_DATA_DIR to choose one."
        )
    })?;

    let tunebook_dir = data_dir.join("tunebook");
    ensure_dir(&tunebook_dir)?;
    Ok(tunebook_dir)
}

fn ensure_dir(dir: &Path) -> Result<()> {
    fs::create_dir_all(dir).with_context(|| {
        format!(
            "Failed to create Tunebook data directory at {}. Please check file permissions.",
            dir.display()
        )
    })
}

/// Where each store keeps its file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RuntimeConfig {
    pub data_dir: PathBuf,
    pub library_path: PathBuf,
    pub playlists_path: PathBuf,
    pub queue_path: PathBuf,
}

impl RuntimeConfig {
    /// Configuration rooted at the default data directory.
    pub fn new() -> Result<Self> {
        Ok(Self::with_data_dir(get_data_dir()?))
    }

    /// Configuration rooted at `data_dir`, without touching the filesystem.
    pub fn with_data_dir(data_dir: impl Into<PathBuf>) -> Self {
        let data_dir = data_dir.into();
        Self {
            library_path: data_dir.join(LIBRARY_FILE),
            playlists_path: data_dir.join(PLAYLISTS_FILE),
            queue_path: data_dir.join(QUEUE_FILE),
            data_dir,
        }
    }

    /// Use `data_dir` when given (creating it), otherwise the default.
    pub fn resolve(data_dir: Option<PathBuf>) -> Result<Self> {
        match data_dir {
            Some(dir) => {
                ensure_dir(&dir)?;
                Ok(Self::with_data_dir(dir))
            }
            None => Self::new(),
        }
    }
}
