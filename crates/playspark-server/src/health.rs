use axum::Json;
use axum::extract::State;
use serde::Serialize;

use playspark_core::game_type::GameType;

use crate::state::AppState;

/// Structured health check response.
#[derive(Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub version: &'static str,
    pub games: GameInfo,
}

#[derive(Serialize)]
pub struct GameInfo {
    pub stored: usize,
    /// Game modules the host can run.
    pub modules: Vec<GameType>,
}

/// Server status, stored game count, and the compiled-in game modules.
pub async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    let stored = state.store.read().await.len();

    Json(HealthResponse {
        status: "healthy",
        version: env!("CARGO_PKG_VERSION"),
        games: GameInfo {
            stored,
            modules: state.game_registry.available(),
        },
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn health_response_serializes() {
        let resp = HealthResponse {
            status: "healthy",
            version: "0.1.0",
            games: GameInfo {
                stored: 2,
                modules: vec![GameType::Jumping, GameType::Puzzle],
            },
        };
        let json = serde_json::to_string(&resp).unwrap();
        assert!(json.contains("\"healthy\""));
        assert!(json.contains("\"stored\":2"));
        assert!(json.contains("[\"jumping\",\"puzzle\"]"));
    }
}
