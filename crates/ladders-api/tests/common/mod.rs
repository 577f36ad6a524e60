//! Shared test helpers for API integration tests.
#![allow(dead_code)]

use std::sync::Arc;

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use http_body_util::BodyExt;
use ladders_board::BoardTopology;
use ladders_core::clock::Clock;
use ladders_narrative::application::narrator::Narrator;
use ladders_narrative::application::trigger::commentary_channel;
use ladders_narrative::application::worker::NarrationWorker;
use ladders_narrative::domain::transcript::Transcript;
use ladders_session::application::orchestrator::{Pacing, spawn_orchestrator};
use ladders_session::domain::players::Roster;
use ladders_test_support::{FixedClock, RecordingNarrator, SequenceRng};
use tower::ServiceExt;

use ladders_api::state::AppState;

/// Build the full app router on the standard board with scripted dice and a
/// narrator that echoes each move description.
pub fn build_test_app(rolls: Vec<u32>) -> Router {
    build_test_app_with(
        rolls,
        BoardTopology::standard().unwrap(),
        Arc::new(RecordingNarrator::new("")),
    )
}

/// Build the full app router with a custom board and narrator. Uses the same
/// wiring as `main.rs` with default pacing; run under paused time.
pub fn build_test_app_with(
    rolls: Vec<u32>,
    topology: BoardTopology,
    narrator: Arc<dyn Narrator>,
) -> Router {
    let clock: Arc<dyn Clock> = Arc::new(FixedClock::standard());
    let topology = Arc::new(topology);
    let transcript = Transcript::new();
    let (commentary, inbox) = commentary_channel();
    tokio::spawn(NarrationWorker::new(inbox, narrator, transcript.clone(), Arc::clone(&clock)).run());

    let (orchestrator, _worker) = spawn_orchestrator(
        Roster::default(),
        Arc::clone(&topology),
        Box::new(SequenceRng::new(rolls)),
        clock,
        Pacing::default(),
        commentary,
    );

    ladders_api::app(AppState::new(orchestrator, topology, transcript))
}

/// Lets every scheduled transition run to completion.
pub async fn settle() {
    tokio::time::sleep(std::time::Duration::from_secs(30)).await;
}

/// Send a POST request without a body and return the response.
pub async fn post_json(app: Router, uri: &str) -> (StatusCode, serde_json::Value) {
    let request = Request::builder()
        .method("POST")
        .uri(uri)
        .body(Body::empty())
        .unwrap();

    send(app, request).await
}

/// Send a GET request and return the response.
pub async fn get_json(app: Router, uri: &str) -> (StatusCode, serde_json::Value) {
    let request = Request::builder()
        .method("GET")
        .uri(uri)
        .body(Body::empty())
        .unwrap();

    send(app, request).await
}

async fn send(app: Router, request: Request<Body>) -> (StatusCode, serde_json::Value) {
    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let body_bytes = response.into_body().collect().await.unwrap().to_bytes();
    let json: serde_json::Value = serde_json::from_slice(&body_bytes).unwrap();

    (status, json)
}
