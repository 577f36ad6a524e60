//! Routes for the Narration context.

use axum::extract::State;
use axum::{Json, Router, routing::get};
use ladders_narrative::domain::transcript::TranscriptEntry;
use serde::Serialize;

use crate::state::AppState;

/// Response body for GET /commentary.
#[derive(Debug, Serialize)]
pub struct CommentaryResponse {
    /// Transcript lines in arrival order.
    pub entries: Vec<TranscriptEntry>,
}

/// GET /commentary
async fn get_commentary(State(state): State<AppState>) -> Json<CommentaryResponse> {
    Json(CommentaryResponse {
        entries: state.transcript.entries(),
    })
}

/// Returns the router for the narration context.
pub fn router() -> Router<AppState> {
    Router::new().route("/commentary", get(get_commentary))
}
