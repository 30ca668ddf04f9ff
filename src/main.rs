//! vidloop - Main entry point
//!
//! Bootstraps logging and GStreamer, scans the video library, starts the
//! HTTP control API on its own thread, then hands the main thread to the
//! winit event loop for the lifetime of the process. The event loop owns
//! the window and pipeline; the HTTP thread only sends it events.

use std::path::PathBuf;
use std::sync::{Arc, Mutex};
use std::thread;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use winit::event_loop::{ControlFlow, EventLoop};

use vidloop::api::{self, AppContext};
use vidloop::config::Config;
use vidloop::library::VideoLibrary;
use vidloop::player::{PlayerEvent, PlayerHandle, VideoApp};
use vidloop::state::SharedState;

/// Command-line arguments for vidloop
#[derive(Parser, Debug)]
#[command(name = "vidloop")]
#[command(about = "HTTP-controlled fullscreen looping video player")]
#[command(version)]
struct Args {
    /// Port for the HTTP control API
    #[arg(short, long, default_value = "5555", env = "VIDLOOP_PORT")]
    port: u16,

    /// Directory containing the videos; the default video is the first
    /// file in its `default/` subdirectory
    #[arg(short = 'd', long, default_value = "videos", env = "VIDLOOP_VIDEOS_DIR")]
    videos_dir: PathBuf,
}

fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "vidloop=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let args = Args::parse();
    let config = Config::new(args.videos_dir, args.port);

    info!("Starting vidloop on port {}", config.port);
    info!("Videos directory: {}", config.videos_dir.display());

    gstreamer::init().context("Failed to initialize GStreamer")?;

    let library =
        VideoLibrary::scan(&config.videos_dir).context("Failed to scan video library")?;
    let state = Arc::new(SharedState::new());

    // The event loop must be created on the main thread; its proxy is the
    // cross-thread relay the HTTP handlers use.
    let event_loop = EventLoop::<PlayerEvent>::with_user_event()
        .build()
        .context("Failed to create event loop")?;
    // Everything arrives as injected events; there is nothing to poll for.
    event_loop.set_control_flow(ControlFlow::Wait);
    let proxy = event_loop.create_proxy();

    let player = PlayerHandle::new(Arc::new(Mutex::new(proxy.clone())), Arc::clone(&state));
    let ctx = AppContext {
        player,
        library: Arc::new(library.clone()),
    };

    // HTTP server gets its own thread and runtime; the main thread belongs
    // to the GUI event loop.
    let port = config.port;
    thread::spawn(move || {
        let runtime = match tokio::runtime::Runtime::new() {
            Ok(runtime) => runtime,
            Err(e) => {
                error!("Failed to start tokio runtime: {}", e);
                return;
            }
        };
        if let Err(e) = runtime.block_on(api::serve(port, ctx)) {
            error!("HTTP server error: {}", e);
        }
    });

    let mut app = VideoApp::new(library, state, proxy);
    event_loop.run_app(&mut app).context("Event loop error")?;

    info!("Shutdown complete");
    Ok(())
}
