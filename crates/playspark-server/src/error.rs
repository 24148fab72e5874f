use std::any::Any;

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

/// Friendly texts shown to the child. Error bodies never carry technical detail.
pub const MSG_NO_TRANSCRIPT: &str = "Please provide a transcript of what you said!";
pub const MSG_TRANSCRIPT_TOO_LONG: &str =
    "Wow, that's a big idea! Can you tell it to me in fewer words?";
pub const MSG_VOICE_FAILED: &str = "I had trouble understanding that. Can you try saying it again?";
pub const MSG_BUILD_FAILED: &str = "Something went wrong with building your game. Try again!";
pub const MSG_UNKNOWN_GAME_TYPE: &str =
    "I don't know how to build that kind of game yet. Let's pick another one!";
pub const MSG_BAD_STEP: &str = "Oops, that step got mixed up. Let's start building again!";
pub const MSG_RECENT_FAILED: &str = "Could not load recent games";
pub const MSG_GAME_NOT_FOUND: &str = "Game not found";
pub const MSG_GAME_LOAD_FAILED: &str = "Could not load game";

#[derive(Debug)]
pub enum AppError {
    BadRequest(String),
    NotFound(String),
    Internal(String),
}

impl AppError {
    pub fn bad_request(message: &str) -> Self {
        Self::BadRequest(message.to_string())
    }

    pub fn not_found(message: &str) -> Self {
        Self::NotFound(message.to_string())
    }

    pub fn internal(message: &str) -> Self {
        Self::Internal(message.to_string())
    }
}

impl std::fmt::Display for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::BadRequest(m) | Self::NotFound(m) | Self::Internal(m) => write!(f, "{m}"),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            Self::BadRequest(m) => (StatusCode::BAD_REQUEST, m),
            Self::NotFound(m) => (StatusCode::NOT_FOUND, m),
            Self::Internal(m) => (StatusCode::INTERNAL_SERVER_ERROR, m),
        };
        (status, Json(serde_json::json!({ "message": message }))).into_response()
    }
}

/// Response for a handler that panicked, installed via `CatchPanicLayer`.
pub fn panic_response(err: Box<dyn Any + Send + 'static>) -> Response {
    let detail = err
        .downcast_ref::<String>()
        .map(String::as_str)
        .or_else(|| err.downcast_ref::<&str>().copied())
        .unwrap_or("unknown panic");
    tracing::error!(detail, "request handler panicked");
    AppError::internal(MSG_VOICE_FAILED).into_response()
}
