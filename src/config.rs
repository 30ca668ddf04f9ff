//! vidloop configuration

use std::path::PathBuf;

/// Runtime configuration, resolved from CLI flags and environment.
#[derive(Debug, Clone)]
pub struct Config {
    /// Directory containing the on-demand videos; the default video lives
    /// in a `default/` subdirectory underneath it.
    pub videos_dir: PathBuf,
    /// HTTP API port
    pub port: u16,
}

impl Config {
    pub fn new(videos_dir: PathBuf, port: u16) -> Self {
        Self { videos_dir, port }
    }
}
