//! Routes for the Board context.

use axum::extract::State;
use axum::{Json, Router, routing::get};
use ladders_board::{BoardView, board_view};
use tracing::instrument;

use crate::state::AppState;

/// GET /board
#[instrument(skip(state))]
async fn get_board(State(state): State<AppState>) -> Json<BoardView> {
    Json(board_view(&state.topology))
}

/// Returns the router for the board context.
pub fn router() -> Router<AppState> {
    Router::new().route("/board", get(get_board))
}
