//! GStreamer playback engine
//!
//! Thin wrapper around a `playbin` pipeline. Decode and rendering belong to
//! GStreamer; this only loads URIs, drives pipeline state, and forwards bus
//! messages (end of stream, errors) to the main thread through the event
//! loop proxy. The bus sync handler runs on GStreamer's streaming threads,
//! so it must not touch player state itself.

use std::path::Path;
use std::sync::Mutex;

use gstreamer as gst;
use gstreamer::prelude::*;
use gstreamer_video as gst_video;
use gstreamer_video::prelude::*;
use tracing::{debug, warn};
use winit::event_loop::EventLoopProxy;

use crate::error::{Error, Result};
use crate::player::command::PlayerEvent;

/// Owns the `playbin` pipeline. Lives on the main thread.
pub struct PlayerEngine {
    playbin: gst::Element,
}

impl PlayerEngine {
    /// Build the pipeline and wire its bus to the event loop.
    ///
    /// `window_handle`, when present, is the native handle of our fullscreen
    /// window; the video sink renders into it via the `VideoOverlay`
    /// interface. Without one the sink opens its own window.
    pub fn new(proxy: EventLoopProxy<PlayerEvent>, window_handle: Option<usize>) -> Result<Self> {
        let playbin = gst::ElementFactory::make("playbin")
            .name("vidloop-playbin")
            .build()
            .map_err(|e| Error::Playback(format!("Failed to create playbin: {e}")))?;

        let bus = playbin
            .bus()
            .ok_or_else(|| Error::Playback("playbin has no bus".to_string()))?;

        if window_handle.is_none() {
            warn!("No usable native window handle; the video sink will open its own window");
        }

        // The handler must be Sync; the proxy is not on every platform.
        let proxy = Mutex::new(proxy);
        bus.set_sync_handler(move |_bus, msg| {
            use gst::MessageView;

            let forward = |event: PlayerEvent| {
                if let Ok(proxy) = proxy.lock() {
                    let _ = proxy.send_event(event);
                }
            };

            match msg.view() {
                MessageView::Eos(..) => {
                    forward(PlayerEvent::EndOfStream);
                }
                MessageView::Error(err) => {
                    let detail = format!(
                        "{} (debug: {})",
                        err.error(),
                        err.debug().unwrap_or_else(|| "none".into())
                    );
                    forward(PlayerEvent::PipelineError(detail));
                }
                MessageView::Element(..) => {
                    // The sink asks for a window handle on its streaming
                    // thread; it must be answered synchronously here.
                    if gst_video::is_video_overlay_prepare_window_handle_message(msg) {
                        if let Some(handle) = window_handle {
                            if let Some(overlay) = msg
                                .src()
                                .and_then(|s| s.dynamic_cast_ref::<gst_video::VideoOverlay>())
                            {
                                unsafe { overlay.set_window_handle(handle) };
                            }
                        }
                    }
                }
                _ => {}
            }

            gst::BusSyncReply::Drop
        });

        Ok(Self { playbin })
    }

    /// Load a video file and start playing it from the beginning.
    pub fn load(&self, path: &Path) -> Result<()> {
        let path = path.canonicalize()?;
        let uri = gst::glib::filename_to_uri(&path, None)?;
        debug!("Loading {}", uri);

        // A full stop before swapping the uri; playbin only reads the
        // property on the transition out of READY.
        self.playbin.set_state(gst::State::Ready)?;
        self.playbin.set_property("uri", uri.as_str());
        self.playbin.set_state(gst::State::Playing)?;
        Ok(())
    }

    /// Resume (or start) playback of whatever is loaded.
    pub fn resume(&self) -> Result<()> {
        self.playbin.set_state(gst::State::Playing)?;
        Ok(())
    }

    pub fn pause(&self) -> Result<()> {
        self.playbin.set_state(gst::State::Paused)?;
        Ok(())
    }

    /// Stop playback and release decode resources.
    pub fn stop(&self) -> Result<()> {
        self.playbin.set_state(gst::State::Null)?;
        Ok(())
    }

    /// Rewind to the start without tearing the pipeline down. Used to loop
    /// the default video after end of stream.
    pub fn restart(&self) -> Result<()> {
        self.playbin
            .seek_simple(
                gst::SeekFlags::FLUSH | gst::SeekFlags::KEY_UNIT,
                gst::ClockTime::ZERO,
            )
            .map_err(|e| Error::Playback(format!("Seek to start failed: {e}")))?;
        Ok(())
    }
}

impl Drop for PlayerEngine {
    fn drop(&mut self) {
        let _ = self.playbin.set_state(gst::State::Null);
    }
}
