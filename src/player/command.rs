//! Cross-thread command relay
//!
//! HTTP handlers never touch the pipeline or window. They hold a
//! [`PlayerHandle`] and send [`PlayerEvent`]s through an [`EventSink`]; the
//! main thread's event loop is the only consumer. In production the sink is
//! a winit `EventLoopProxy`; tests substitute a plain channel.

use std::path::PathBuf;
use std::sync::{Arc, Mutex};

use winit::event_loop::EventLoopProxy;

use crate::error::{Error, Result};
use crate::state::SharedState;

/// Events delivered to the main thread's event loop.
///
/// Control variants come from the HTTP handlers; `EndOfStream` and
/// `PipelineError` are forwarded from the GStreamer bus.
#[derive(Debug, Clone, PartialEq)]
pub enum PlayerEvent {
    /// (Re)start playback of the current video
    Play,
    /// Switch to the given video and play it
    ChangeVideo(PathBuf),
    /// Toggle between paused and playing
    TogglePause,
    /// Stop playback, keep the window up
    Stop,
    /// Tear down pipeline and window, exit the event loop
    Close,
    /// The pipeline reached end of stream
    EndOfStream,
    /// The pipeline reported a fatal error
    PipelineError(String),
}

/// Delivery seam for [`PlayerEvent`]s.
///
/// Anything that can move an event onto the main thread qualifies. Keeping
/// this a trait lets the API tests drive the handlers with a channel instead
/// of a live event loop.
pub trait EventSink: Send + Sync {
    fn send(&self, event: PlayerEvent) -> Result<()>;
}

/// The production sink. The proxy is not `Sync` on every platform, so it
/// sits behind a mutex; sends are rare and cheap.
impl EventSink for Mutex<EventLoopProxy<PlayerEvent>> {
    fn send(&self, event: PlayerEvent) -> Result<()> {
        self.lock()
            .map_err(|_| Error::Internal("event loop proxy lock poisoned".to_string()))?
            .send_event(event)
            .map_err(|e| Error::CommandRejected(e.to_string()))
    }
}

/// Channel-backed sink, used by the API tests.
impl EventSink for std::sync::mpsc::Sender<PlayerEvent> {
    fn send(&self, event: PlayerEvent) -> Result<()> {
        std::sync::mpsc::Sender::send(self, event)
            .map_err(|e| Error::CommandRejected(e.to_string()))
    }
}

/// Handle given to the HTTP handlers: command sink plus shared state.
#[derive(Clone)]
pub struct PlayerHandle {
    sink: Arc<dyn EventSink>,
    state: Arc<SharedState>,
}

impl PlayerHandle {
    pub fn new(sink: Arc<dyn EventSink>, state: Arc<SharedState>) -> Self {
        Self { sink, state }
    }

    pub fn state(&self) -> &SharedState {
        &self.state
    }

    /// Send a control event, refusing while the player is uninitialized.
    fn send(&self, event: PlayerEvent) -> Result<()> {
        if !self.state.is_initialized() {
            return Err(Error::NotInitialized);
        }
        self.sink.send(event)
    }

    pub fn resume(&self) -> Result<()> {
        self.send(PlayerEvent::Play)
    }

    pub fn change_video(&self, path: PathBuf) -> Result<()> {
        self.send(PlayerEvent::ChangeVideo(path))
    }

    pub fn toggle_pause(&self) -> Result<()> {
        self.send(PlayerEvent::TogglePause)
    }

    pub fn stop(&self) -> Result<()> {
        self.send(PlayerEvent::Stop)
    }

    pub fn close(&self) -> Result<()> {
        self.send(PlayerEvent::Close)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::mpsc;

    fn handle() -> (PlayerHandle, mpsc::Receiver<PlayerEvent>, Arc<SharedState>) {
        let (tx, rx) = mpsc::channel();
        let state = Arc::new(SharedState::new());
        let handle = PlayerHandle::new(Arc::new(tx), Arc::clone(&state));
        (handle, rx, state)
    }

    #[test]
    fn test_rejects_before_initialization() {
        let (handle, rx, _state) = handle();
        assert!(matches!(handle.resume(), Err(Error::NotInitialized)));
        assert!(matches!(handle.toggle_pause(), Err(Error::NotInitialized)));
        assert!(rx.try_recv().is_err());
    }

    #[test]
    fn test_delivers_after_initialization() {
        let (handle, rx, state) = handle();
        state.set_initialized(true);

        handle.resume().unwrap();
        assert_eq!(rx.try_recv().unwrap(), PlayerEvent::Play);

        handle.change_video(PathBuf::from("/videos/a.mp4")).unwrap();
        assert_eq!(
            rx.try_recv().unwrap(),
            PlayerEvent::ChangeVideo(PathBuf::from("/videos/a.mp4"))
        );

        handle.stop().unwrap();
        assert_eq!(rx.try_recv().unwrap(), PlayerEvent::Stop);
    }

    #[test]
    fn test_closed_sink_is_command_rejected() {
        let (handle, rx, state) = handle();
        state.set_initialized(true);
        drop(rx);
        assert!(matches!(handle.stop(), Err(Error::CommandRejected(_))));
    }
}
