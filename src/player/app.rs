//! Main-thread application: fullscreen window and command dispatch
//!
//! [`VideoApp`] implements the winit `ApplicationHandler`. It is the only
//! code that mutates the window or the pipeline. Everything reaches it as a
//! [`PlayerEvent`]: HTTP commands via the event loop proxy, end-of-stream
//! and pipeline errors via the GStreamer bus sync handler.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use raw_window_handle::{HasWindowHandle, RawWindowHandle};
use tracing::{error, info, warn};
use winit::application::ApplicationHandler;
use winit::event::WindowEvent;
use winit::event_loop::{ActiveEventLoop, EventLoopProxy};
use winit::window::{Fullscreen, Window, WindowId};

use crate::library::VideoLibrary;
use crate::player::command::PlayerEvent;
use crate::player::engine::PlayerEngine;
use crate::state::{PlaybackState, SharedState};

/// What to do when the current video reaches end of stream.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum EndAction {
    /// A non-default video finished: go back to the default video
    ReturnToDefault,
    /// The default video finished: restart it from the beginning
    LoopCurrent,
}

fn end_of_stream_action(playing_default: bool) -> EndAction {
    if playing_default {
        EndAction::LoopCurrent
    } else {
        EndAction::ReturnToDefault
    }
}

/// Window title for the video being played.
fn window_title(path: &Path, is_default: bool) -> String {
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string());
    let prefix = if is_default { "[DEFAULT] " } else { "" };
    format!("{prefix}Video Player - {name}")
}

/// The GUI/player application. Runs on the main thread for the lifetime of
/// the process.
pub struct VideoApp {
    library: VideoLibrary,
    state: Arc<SharedState>,
    proxy: EventLoopProxy<PlayerEvent>,
    window: Option<Window>,
    engine: Option<PlayerEngine>,
}

impl VideoApp {
    pub fn new(
        library: VideoLibrary,
        state: Arc<SharedState>,
        proxy: EventLoopProxy<PlayerEvent>,
    ) -> Self {
        Self {
            library,
            state,
            proxy,
            window: None,
            engine: None,
        }
    }

    /// Load `path` and start playing it, updating shared state and title.
    fn start_video(&mut self, path: PathBuf, is_default: bool) {
        let Some(engine) = &self.engine else {
            return;
        };
        if let Err(e) = engine.load(&path) {
            error!("Failed to play {}: {}", path.display(), e);
            return;
        }
        if let Some(window) = &self.window {
            window.set_title(&window_title(&path, is_default));
        }
        info!(
            "Playing {} (default: {})",
            path.display(),
            is_default
        );
        self.state.set_current_video(path);
        self.state.set_playing_default(is_default);
        self.state.set_playback(PlaybackState::Playing);
    }

    /// (Re)start the current video: a paused pipeline resumes in place,
    /// anything else reloads from the beginning.
    fn play_current(&mut self) {
        if self.state.playback() == PlaybackState::Paused {
            if let Some(engine) = &self.engine {
                if let Err(e) = engine.resume() {
                    error!("Failed to resume: {}", e);
                    return;
                }
                self.state.set_playback(PlaybackState::Playing);
            }
            return;
        }
        if let Some(path) = self.state.current_video() {
            let is_default = self.state.is_playing_default();
            self.start_video(path, is_default);
        }
    }

    fn toggle_pause(&mut self) {
        let Some(engine) = &self.engine else {
            return;
        };
        match self.state.playback() {
            PlaybackState::Playing => {
                if let Err(e) = engine.pause() {
                    error!("Failed to pause: {}", e);
                    return;
                }
                self.state.set_playback(PlaybackState::Paused);
            }
            PlaybackState::Paused | PlaybackState::Stopped => {
                if let Err(e) = engine.resume() {
                    error!("Failed to resume: {}", e);
                    return;
                }
                self.state.set_playback(PlaybackState::Playing);
            }
        }
    }

    fn stop(&mut self) {
        if let Some(engine) = &self.engine {
            if let Err(e) = engine.stop() {
                error!("Failed to stop: {}", e);
                return;
            }
            self.state.set_playback(PlaybackState::Stopped);
        }
    }

    fn handle_end_of_stream(&mut self) {
        match end_of_stream_action(self.state.is_playing_default()) {
            EndAction::ReturnToDefault => {
                info!("Non-default video finished, returning to default video");
                self.start_video(self.library.default_video().to_path_buf(), true);
            }
            EndAction::LoopCurrent => {
                info!("Default video finished, looping");
                let seek_error = self.engine.as_ref().and_then(|e| e.restart().err());
                if let Some(e) = seek_error {
                    // A seek can fail on some demuxers; reload instead.
                    warn!("Loop seek failed ({}), reloading default video", e);
                    self.start_video(self.library.default_video().to_path_buf(), true);
                }
            }
        }
    }

    fn handle_pipeline_error(&mut self, detail: String) {
        error!("Pipeline error: {}", detail);
        if self.state.is_playing_default() {
            // The fallback itself is broken; stop rather than spin.
            self.stop();
        } else {
            warn!("Falling back to default video");
            self.start_video(self.library.default_video().to_path_buf(), true);
        }
    }

    fn close(&mut self, event_loop: &ActiveEventLoop) {
        info!("Closing player");
        self.state.set_initialized(false);
        if let Some(engine) = self.engine.take() {
            if let Err(e) = engine.stop() {
                error!("Failed to stop pipeline on close: {}", e);
            }
        }
        self.window = None;
        self.state.set_playback(PlaybackState::Stopped);
        event_loop.exit();
    }
}

impl ApplicationHandler<PlayerEvent> for VideoApp {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }

        let default_video = self.library.default_video().to_path_buf();
        let attributes = Window::default_attributes()
            .with_title(window_title(&default_video, true))
            .with_fullscreen(Some(Fullscreen::Borderless(None)));

        let window = match event_loop.create_window(attributes) {
            Ok(window) => window,
            Err(e) => {
                error!("Failed to create window: {}", e);
                event_loop.exit();
                return;
            }
        };

        let handle = native_window_handle(&window);
        let engine = match PlayerEngine::new(self.proxy.clone(), handle) {
            Ok(engine) => engine,
            Err(e) => {
                error!("Failed to create playback engine: {}", e);
                event_loop.exit();
                return;
            }
        };

        self.window = Some(window);
        self.engine = Some(engine);
        self.state.set_initialized(true);
        info!("Player initialized");

        self.start_video(default_video, true);
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: WindowId,
        event: WindowEvent,
    ) {
        if let WindowEvent::CloseRequested = event {
            self.close(event_loop);
        }
    }

    fn user_event(&mut self, event_loop: &ActiveEventLoop, event: PlayerEvent) {
        match event {
            PlayerEvent::Play => self.play_current(),
            PlayerEvent::ChangeVideo(path) => {
                let is_default = path == self.library.default_video();
                self.start_video(path, is_default);
            }
            PlayerEvent::TogglePause => self.toggle_pause(),
            PlayerEvent::Stop => self.stop(),
            PlayerEvent::Close => self.close(event_loop),
            PlayerEvent::EndOfStream => self.handle_end_of_stream(),
            PlayerEvent::PipelineError(detail) => self.handle_pipeline_error(detail),
        }
    }
}

/// Extract a native handle the `VideoOverlay` interface can render into.
fn native_window_handle(window: &Window) -> Option<usize> {
    match window.window_handle() {
        Ok(handle) => overlay_handle(handle.as_raw()),
        Err(e) => {
            warn!("Could not obtain window handle: {}", e);
            None
        }
    }
}

/// Handles `VideoOverlay` accepts as an integer: X11 window ids, Win32
/// HWNDs, and AppKit NSView pointers. Wayland surfaces cannot be passed
/// this way, so they (and anything else) fall back to a sink-owned window.
fn overlay_handle(raw: RawWindowHandle) -> Option<usize> {
    match raw {
        RawWindowHandle::Xlib(h) => Some(h.window as usize),
        RawWindowHandle::Xcb(h) => Some(h.window.get() as usize),
        RawWindowHandle::Win32(h) => Some(h.hwnd.get() as usize),
        RawWindowHandle::AppKit(h) => Some(h.ns_view.as_ptr() as usize),
        other => {
            warn!("No video overlay support for {:?}", other);
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_non_default_video_returns_to_default() {
        assert_eq!(end_of_stream_action(false), EndAction::ReturnToDefault);
    }

    #[test]
    fn test_default_video_loops() {
        assert_eq!(end_of_stream_action(true), EndAction::LoopCurrent);
    }

    #[test]
    fn test_overlay_handle_by_platform() {
        use raw_window_handle::{
            AppKitWindowHandle, WaylandWindowHandle, XlibWindowHandle,
        };
        use std::ffi::c_void;
        use std::ptr::NonNull;

        let xlib = RawWindowHandle::Xlib(XlibWindowHandle::new(42));
        assert_eq!(overlay_handle(xlib), Some(42));

        let view = NonNull::new(0x1000 as *mut c_void).unwrap();
        let appkit = RawWindowHandle::AppKit(AppKitWindowHandle::new(view));
        assert_eq!(overlay_handle(appkit), Some(0x1000));

        // Wayland surfaces cannot be handed over as an integer
        let surface = NonNull::new(0x2000 as *mut c_void).unwrap();
        let wayland = RawWindowHandle::Wayland(WaylandWindowHandle::new(surface));
        assert_eq!(overlay_handle(wayland), None);
    }

    #[test]
    fn test_window_title() {
        assert_eq!(
            window_title(Path::new("/videos/default/idle.mp4"), true),
            "[DEFAULT] Video Player - idle.mp4"
        );
        assert_eq!(
            window_title(Path::new("/videos/promo.mp4"), false),
            "Video Player - promo.mp4"
        );
    }
}
