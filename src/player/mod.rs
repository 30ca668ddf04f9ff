//! Player thread: window, pipeline, and the command relay into them

pub mod app;
pub mod command;
pub mod engine;

pub use app::VideoApp;
pub use command::{EventSink, PlayerEvent, PlayerHandle};
pub use engine::PlayerEngine;
