use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, Query, State};
use axum::response::{IntoResponse, Json, Response};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use playspark_core::construction::{
    ConstructionError, ConstructionOverview, GameData, StepData, StepOutcome, Wizard,
};
use playspark_core::game_type::GameType;
use playspark_core::generator::{GeneratedGame, generate};
use playspark_core::interpreter::{interpret, interpret_as, random_encouragement};
use playspark_core::time::timestamp_now;

use crate::error::{
    AppError, MSG_BAD_STEP, MSG_BUILD_FAILED, MSG_GAME_LOAD_FAILED, MSG_GAME_NOT_FOUND,
    MSG_NO_TRANSCRIPT, MSG_RECENT_FAILED, MSG_TRANSCRIPT_TOO_LONG, MSG_UNKNOWN_GAME_TYPE,
    MSG_VOICE_FAILED,
};
use crate::state::AppState;
use crate::storage::{GameConfig, GameIdea, NewGameIdea};

const IDEA_ENCOURAGEMENT: &str = "Great idea! Let's build your game together!";
const CELEBRATION: &str = "Amazing! You built your very own game!";

/// The parts of an interpretation the voice screen shows.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InterpretationSummary {
    pub game_type: GameType,
    pub title: String,
    pub character: String,
    pub theme: String,
    pub encouragement: &'static str,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VoiceResponse {
    pub success: bool,
    pub game_id: u64,
    pub interpretation: InterpretationSummary,
    pub construction: ConstructionOverview,
    pub game: GeneratedGame,
    pub encouragement: String,
}

/// Request body for one wizard step. `gameData` is echoed back by the client
/// on every call; the server keeps no session.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StepRequest {
    pub game_type: String,
    pub step: i64,
    #[serde(default)]
    pub choice: String,
    #[serde(default)]
    pub game_data: GameData,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NextStepResponse {
    pub success: bool,
    pub next_step: u32,
    pub step_data: StepData,
    pub game_data: GameData,
    pub progress: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CompletedResponse {
    pub success: bool,
    pub completed: bool,
    pub game_id: u64,
    pub game_data: GameData,
    pub game: GeneratedGame,
    pub celebration: &'static str,
}

#[derive(Debug, Deserialize)]
pub struct RecentQuery {
    pub limit: Option<String>,
}

/// Pull a usable transcript out of a raw voice body.
fn extract_transcript(body: &Value, max_chars: usize) -> Result<&str, AppError> {
    let transcript = body
        .get("transcript")
        .and_then(Value::as_str)
        .filter(|t| !t.is_empty())
        .ok_or_else(|| AppError::bad_request(MSG_NO_TRANSCRIPT))?;
    if transcript.chars().count() > max_chars {
        tracing::warn!(max_chars, "transcript too long");
        return Err(AppError::bad_request(MSG_TRANSCRIPT_TOO_LONG));
    }
    Ok(transcript)
}

/// `?limit=` resolved against the configured default and cap. Garbage falls
/// back to the default.
fn resolve_limit(raw: Option<&str>, default: usize, max: usize) -> usize {
    raw.and_then(|s| s.trim().parse::<usize>().ok())
        .unwrap_or(default)
        .min(max)
}

fn construction_error(err: ConstructionError) -> AppError {
    tracing::warn!(error = %err, "rejected construction step");
    match err {
        ConstructionError::UnknownGameType(_) => AppError::bad_request(MSG_UNKNOWN_GAME_TYPE),
        ConstructionError::StepOutOfRange { .. } | ConstructionError::AlreadyCompleted => {
            AppError::bad_request(MSG_BAD_STEP)
        },
    }
}

/// Fail with `message` if the host has no module for the generated program.
fn ensure_playable(state: &AppState, game: &GeneratedGame, message: &str) -> Result<(), AppError> {
    state
        .game_registry
        .instantiate(&game.game_code)
        .map(|_| ())
        .map_err(|e| {
            tracing::error!(error = %e, id = %game.id, "generated game cannot be hosted");
            AppError::internal(message)
        })
}

async fn persist(state: &AppState, idea: NewGameIdea, message: &str) -> Result<GameIdea, AppError> {
    state.store.write().await.create(idea).map_err(|e| {
        tracing::error!(error = %e, "failed to store game idea");
        AppError::internal(message)
    })
}

/// POST /api/voice/process: interpret a spoken idea and hand back a
/// playable game plus the wizard for customizing it.
pub async fn process_voice(
    State(state): State<AppState>,
    body: Result<Json<Value>, JsonRejection>,
) -> Result<Json<VoiceResponse>, AppError> {
    let Json(body) = body.map_err(|e| {
        tracing::warn!(error = %e, "unreadable voice body");
        AppError::bad_request(MSG_NO_TRANSCRIPT)
    })?;
    let transcript = extract_transcript(&body, state.config.limits.max_transcript_chars)?;

    let interpretation = interpret(transcript);
    let game = generate(&interpretation, None);
    ensure_playable(&state, &game, MSG_VOICE_FAILED)?;

    let stored = persist(
        &state,
        NewGameIdea {
            transcript: transcript.to_string(),
            game_type: interpretation.game_type,
            game_config: GameConfig {
                interpretation: interpretation.clone(),
                custom_data: None,
                game: game.clone(),
            },
            created_at: timestamp_now(),
        },
        MSG_VOICE_FAILED,
    )
    .await?;

    tracing::info!(
        game_id = stored.id,
        game_type = %interpretation.game_type,
        "voice idea processed"
    );

    Ok(Json(VoiceResponse {
        success: true,
        game_id: stored.id,
        construction: Wizard::for_type(interpretation.game_type).overview(),
        interpretation: InterpretationSummary {
            game_type: interpretation.game_type,
            title: interpretation.title,
            character: interpretation.character,
            theme: interpretation.theme,
            encouragement: IDEA_ENCOURAGEMENT,
        },
        game,
        encouragement: interpretation.encouragement,
    }))
}

/// POST /api/construction/step: record one wizard answer; on the last step,
/// build and store the customized game.
pub async fn construction_step(
    State(state): State<AppState>,
    body: Result<Json<StepRequest>, JsonRejection>,
) -> Result<Response, AppError> {
    let Json(req) = body.map_err(|e| {
        tracing::warn!(error = %e, "unreadable construction body");
        AppError::bad_request(MSG_BUILD_FAILED)
    })?;
    let wizard = Wizard::parse(&req.game_type).map_err(construction_error)?;

    let game_data = match wizard
        .advance(req.step, &req.choice, req.game_data)
        .map_err(construction_error)?
    {
        StepOutcome::Next {
            next_step,
            step_data,
            game_data,
            progress,
        } => {
            return Ok(Json(NextStepResponse {
                success: true,
                next_step,
                step_data,
                game_data,
                progress,
            })
            .into_response());
        },
        StepOutcome::Completed { game_data } => game_data,
    };

    let transcript = format!("Custom {} game", wizard.requested);
    let interpretation = interpret_as(wizard.builds, &transcript, &mut rand::rng());
    let game = generate(&interpretation, Some(&game_data));
    ensure_playable(&state, &game, MSG_BUILD_FAILED)?;

    let stored = persist(
        &state,
        NewGameIdea {
            transcript,
            game_type: wizard.builds,
            game_config: GameConfig {
                interpretation,
                custom_data: Some(game_data.clone()),
                game: game.clone(),
            },
            created_at: timestamp_now(),
        },
        MSG_BUILD_FAILED,
    )
    .await?;

    tracing::info!(
        game_id = stored.id,
        requested = %wizard.requested,
        builds = %wizard.builds,
        "custom game built"
    );

    Ok(Json(CompletedResponse {
        success: true,
        completed: true,
        game_id: stored.id,
        game_data,
        game,
        celebration: CELEBRATION,
    })
    .into_response())
}

/// GET /api/encouragement
pub async fn encouragement() -> Json<Value> {
    let message = random_encouragement(&mut rand::rng());
    Json(serde_json::json!({ "message": message }))
}

/// GET /api/games/recent, newest first.
pub async fn recent_games(
    State(state): State<AppState>,
    Query(query): Query<RecentQuery>,
) -> Result<Json<Vec<GameIdea>>, AppError> {
    let limits = &state.config.limits;
    let limit = resolve_limit(query.limit.as_deref(), limits.recent_default, limits.recent_max);
    let games = state.store.read().await.recent(limit).map_err(|e| {
        tracing::error!(error = %e, "failed to list recent games");
        AppError::internal(MSG_RECENT_FAILED)
    })?;
    Ok(Json(games))
}

/// GET /api/games/{id}
pub async fn get_game(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<GameIdea>, AppError> {
    let Ok(id) = id.parse::<u64>() else {
        return Err(AppError::not_found(MSG_GAME_NOT_FOUND));
    };
    let found = state.store.read().await.get(id).map_err(|e| {
        tracing::error!(error = %e, id, "failed to load game");
        AppError::internal(MSG_GAME_LOAD_FAILED)
    })?;
    found
        .map(Json)
        .ok_or_else(|| AppError::not_found(MSG_GAME_NOT_FOUND))
}
