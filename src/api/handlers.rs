//! HTTP request handlers
//!
//! One handler per control endpoint. Each validates the request, checks the
//! player is initialized, and relays a command through the player handle;
//! none of them touch the pipeline directly.

use std::path::PathBuf;

use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use tracing::{debug, info};

use crate::api::AppContext;
use crate::error::{Error, Result};

// ============================================================================
// Request/Response Types
// ============================================================================

#[derive(Debug, Deserialize)]
pub struct ChangeVideoRequest {
    #[serde(rename = "video-id")]
    video_id: usize,
    /// Opaque client identifier, logged only
    #[serde(rename = "serial-number", default)]
    serial_number: Option<Value>,
}

#[derive(Debug, Default, Deserialize)]
pub struct PlayRequest {
    video_path: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct StatusMessage {
    status: String,
    message: String,
}

impl StatusMessage {
    fn success(message: impl Into<String>) -> Json<Self> {
        Json(Self {
            status: "success".to_string(),
            message: message.into(),
        })
    }
}

// ============================================================================
// Handlers
// ============================================================================

/// GET /test - liveness probe, always 200 regardless of player state
pub async fn test_probe() -> Json<Value> {
    Json(json!({ "status": "API is running" }))
}

/// GET /status - playback state snapshot
pub async fn status(State(ctx): State<AppContext>) -> Json<Value> {
    let state = ctx.player.state();
    Json(json!({
        "service": "vidloop",
        "version": env!("CARGO_PKG_VERSION"),
        "initialized": state.is_initialized(),
        "state": state.playback().as_str(),
        "current_video": state.current_video().map(|p| p.display().to_string()),
        "playing_default": state.is_playing_default(),
        "library_size": ctx.library.len(),
    }))
}

/// POST /resume - resume/start playback of the current video
pub async fn resume(State(ctx): State<AppContext>) -> Result<Json<StatusMessage>> {
    info!("Resume requested");
    ctx.player.resume()?;
    Ok(StatusMessage::success("Resuming"))
}

/// POST /changeVideo - switch to the library entry at `video-id`
pub async fn change_video(
    State(ctx): State<AppContext>,
    body: String,
) -> Result<Json<StatusMessage>> {
    let req: ChangeVideoRequest = serde_json::from_str(&body)
        .map_err(|e| Error::BadRequest(format!("Invalid JSON data: {e}")))?;
    if let Some(serial) = &req.serial_number {
        debug!("Received serial-number: {}", serial);
    }

    if !ctx.player.state().is_initialized() {
        return Err(Error::NotInitialized);
    }

    let path = ctx
        .library
        .get(req.video_id)
        .ok_or_else(|| Error::NotFound(format!("No video at index {}", req.video_id)))?
        .to_path_buf();

    info!("Change video requested: [{}] {}", req.video_id, path.display());
    ctx.player.change_video(path)?;
    Ok(StatusMessage::success("Change video request sent"))
}

/// POST /play - play a given path, or resume the current video
///
/// A missing or malformed body is treated as "resume current".
pub async fn play(State(ctx): State<AppContext>, body: String) -> Result<Json<StatusMessage>> {
    let req: PlayRequest = serde_json::from_str(&body).unwrap_or_default();

    if !ctx.player.state().is_initialized() {
        return Err(Error::NotInitialized);
    }

    match req.video_path {
        Some(video_path) => {
            let path = PathBuf::from(&video_path);
            if !path.exists() {
                return Err(Error::NotFound(format!("Video file not found: {video_path}")));
            }
            info!("Play requested: {}", video_path);
            ctx.player.change_video(path)?;
            Ok(StatusMessage::success(format!(
                "Play request sent for {video_path}"
            )))
        }
        None => {
            info!("Play requested for current video");
            ctx.player.resume()?;
            Ok(StatusMessage::success("Play request sent"))
        }
    }
}

/// POST /pause - toggle pause/play
pub async fn pause(State(ctx): State<AppContext>) -> Result<Json<StatusMessage>> {
    info!("Pause toggle requested");
    ctx.player.toggle_pause()?;
    Ok(StatusMessage::success("Pause request sent"))
}

/// POST /stop - stop playback
pub async fn stop(State(ctx): State<AppContext>) -> Result<Json<StatusMessage>> {
    info!("Stop requested");
    ctx.player.stop()?;
    Ok(StatusMessage::success("Stop request sent"))
}

/// POST /close - tear down window and player
pub async fn close(State(ctx): State<AppContext>) -> Result<Json<StatusMessage>> {
    info!("Close requested");
    ctx.player.close().map_err(|e| match e {
        // Delivery failure on close is a server fault, not a client one
        Error::CommandRejected(msg) => Error::Internal(msg),
        other => other,
    })?;
    Ok(StatusMessage::success("Close request sent"))
}
