//! Snakes & Ladders — HTTP surface.
//!
//! Exposes the board, the live game and the commentary transcript as JSON
//! under `/api/v1`.

pub mod config;
pub mod error;
pub mod routes;
pub mod state;

use axum::Router;

use crate::state::AppState;

/// Builds the application router. Middleware is layered on by the caller.
pub fn app(state: AppState) -> Router {
    let api = Router::new()
        .merge(routes::health::router())
        .merge(routes::board::router())
        .merge(routes::commentary::router())
        .nest("/game", routes::game::router());

    Router::new().nest("/api/v1", api).with_state(state)
}
