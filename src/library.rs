//! Video library: the fixed directory listing served by `/changeVideo`
//!
//! Scanned once at startup. The on-demand videos are the files directly in
//! the videos directory, sorted by file name so the `video-id` index space
//! is deterministic. The default (looping fallback) video is the first file
//! found in the `default/` subdirectory.

use std::fs;
use std::path::{Path, PathBuf};

use tracing::{debug, info};

use crate::error::{Error, Result};

/// Immutable listing of the videos directory.
#[derive(Debug, Clone)]
pub struct VideoLibrary {
    root: PathBuf,
    entries: Vec<PathBuf>,
    default_video: PathBuf,
}

impl VideoLibrary {
    /// Scan the videos directory.
    ///
    /// Expects `<root>/default/` to contain at least one file; the rest of
    /// the library is every regular file directly under `<root>`.
    pub fn scan(root: &Path) -> Result<Self> {
        let entries = list_files(root)?;
        info!("Video library: {} entries in {}", entries.len(), root.display());
        for (i, entry) in entries.iter().enumerate() {
            debug!("  [{}] {}", i, entry.display());
        }

        let default_dir = root.join("default");
        let default_video = list_files(&default_dir)?
            .into_iter()
            .next()
            .ok_or_else(|| {
                Error::Library(format!("No default video in {}", default_dir.display()))
            })?;
        info!("Default video: {}", default_video.display());

        Ok(Self {
            root: root.to_path_buf(),
            entries,
            default_video,
        })
    }

    /// The looping fallback video.
    pub fn default_video(&self) -> &Path {
        &self.default_video
    }

    /// Look up a library entry by `video-id` index.
    pub fn get(&self, index: usize) -> Option<&Path> {
        self.entries.get(index).map(PathBuf::as_path)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn root(&self) -> &Path {
        &self.root
    }
}

/// Regular files directly under `dir`, sorted by name.
fn list_files(dir: &Path) -> Result<Vec<PathBuf>> {
    let mut files: Vec<PathBuf> = fs::read_dir(dir)?
        .filter_map(|entry| entry.ok())
        .map(|entry| entry.path())
        .filter(|path| path.is_file())
        .collect();
    files.sort();
    Ok(files)
}
