//! Shared playback state
//!
//! Thread-safe state shared between the HTTP handlers and the main thread
//! that owns the window and pipeline. The main thread is the only writer of
//! playback state; handlers read it and check the initialized flag before
//! dispatching commands. Std sync primitives are used because the main
//! thread runs outside the tokio runtime.

use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::RwLock;

/// Playback state of the pipeline
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlaybackState {
    Playing,
    Paused,
    Stopped,
}

impl PlaybackState {
    pub fn as_str(&self) -> &'static str {
        match self {
            PlaybackState::Playing => "playing",
            PlaybackState::Paused => "paused",
            PlaybackState::Stopped => "stopped",
        }
    }
}

/// State shared between the HTTP thread and the player main thread
pub struct SharedState {
    /// Set once the window and pipeline exist; control endpoints return
    /// 500 until then
    initialized: AtomicBool,

    /// Current playback state
    playback: RwLock<PlaybackState>,

    /// Path of the video currently loaded (None before first load)
    current_video: RwLock<Option<PathBuf>>,

    /// Whether the current video is the default (looping fallback) video
    playing_default: AtomicBool,
}

impl SharedState {
    pub fn new() -> Self {
        Self {
            initialized: AtomicBool::new(false),
            playback: RwLock::new(PlaybackState::Stopped),
            current_video: RwLock::new(None),
            playing_default: AtomicBool::new(true),
        }
    }

    pub fn is_initialized(&self) -> bool {
        self.initialized.load(Ordering::Acquire)
    }

    pub fn set_initialized(&self, initialized: bool) {
        self.initialized.store(initialized, Ordering::Release);
    }

    pub fn playback(&self) -> PlaybackState {
        *self.playback.read().expect("state lock poisoned")
    }

    pub fn set_playback(&self, state: PlaybackState) {
        *self.playback.write().expect("state lock poisoned") = state;
    }

    pub fn current_video(&self) -> Option<PathBuf> {
        self.current_video.read().expect("state lock poisoned").clone()
    }

    pub fn set_current_video(&self, path: PathBuf) {
        *self.current_video.write().expect("state lock poisoned") = Some(path);
    }

    pub fn is_playing_default(&self) -> bool {
        self.playing_default.load(Ordering::Acquire)
    }

    pub fn set_playing_default(&self, playing_default: bool) {
        self.playing_default.store(playing_default, Ordering::Release);
    }
}

impl Default for SharedState {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_starts_uninitialized_and_stopped() {
        let state = SharedState::new();
        assert!(!state.is_initialized());
        assert_eq!(state.playback(), PlaybackState::Stopped);
        assert!(state.current_video().is_none());
        assert!(state.is_playing_default());
    }

    #[test]
    fn test_playback_state() {
        let state = SharedState::new();
        state.set_playback(PlaybackState::Playing);
        assert_eq!(state.playback(), PlaybackState::Playing);
        state.set_playback(PlaybackState::Paused);
        assert_eq!(state.playback(), PlaybackState::Paused);
    }

    #[test]
    fn test_current_video() {
        let state = SharedState::new();
        state.set_current_video(PathBuf::from("/videos/a.mp4"));
        assert_eq!(state.current_video(), Some(PathBuf::from("/videos/a.mp4")));
    }

    #[test]
    fn test_default_flag() {
        let state = SharedState::new();
        state.set_playing_default(false);
        assert!(!state.is_playing_default());
        state.set_playing_default(true);
        assert!(state.is_playing_default());
    }
}
