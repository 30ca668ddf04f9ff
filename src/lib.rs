//! # vidloop
//!
//! HTTP-controlled fullscreen looping video player.
//!
//! **Purpose:** Play a looping default video fullscreen, switch to an
//! on-demand video when commanded over a local HTTP API, and return to the
//! default when it finishes.
//!
//! **Architecture:** Two threads. The main thread runs a winit event loop
//! that owns the window and a GStreamer `playbin` pipeline; an HTTP thread
//! runs an axum server that relays commands to it through the event loop
//! proxy. The GStreamer bus feeds end-of-stream and error messages into the
//! same event stream, so all player mutation stays on the main thread.

pub mod api;
pub mod config;
pub mod error;
pub mod library;
pub mod player;
pub mod state;

pub use error::{Error, Result};
pub use state::SharedState;
