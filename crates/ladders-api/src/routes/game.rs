//! Routes for the Session context.

use axum::extract::State;
use axum::routing::{get, post};
use axum::{Json, Router};
use ladders_core::command::Command;
use ladders_session::application::orchestrator::MoveAck;
use ladders_session::application::query_handlers::SessionView;
use ladders_session::domain::commands::{RequestMove, ResetGame};
use tracing::{info, instrument};
use uuid::Uuid;

use crate::error::ApiError;
use crate::state::AppState;

/// GET /game
#[instrument(skip(state))]
async fn get_game(State(state): State<AppState>) -> Result<Json<SessionView>, ApiError> {
    Ok(Json(state.orchestrator.snapshot().await?))
}

/// POST /game/move
///
/// A request made while a move is in flight, during the opponent's turn or
/// after the game has ended answers 200 with `accepted: false`.
#[instrument(skip(state))]
async fn request_move(State(state): State<AppState>) -> Result<Json<MoveAck>, ApiError> {
    let command = RequestMove {
        correlation_id: Uuid::new_v4(),
    };

    info!(
        command = command.command_type(),
        correlation_id = %command.correlation_id,
        "handling command"
    );

    let ack = state.orchestrator.request_move(&command).await?;
    Ok(Json(ack))
}

/// POST /game/reset
#[instrument(skip(state))]
async fn reset_game(State(state): State<AppState>) -> Result<Json<SessionView>, ApiError> {
    let command = ResetGame {
        correlation_id: Uuid::new_v4(),
    };

    info!(
        command = command.command_type(),
        correlation_id = %command.correlation_id,
        "handling command"
    );

    let view = state.orchestrator.reset(&command).await?;
    Ok(Json(view))
}

/// Returns the router for the session context.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(get_game))
        .route("/move", post(request_move))
        .route("/reset", post(reset_game))
}
