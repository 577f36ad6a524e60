//! Snakes & Ladders API server entry point.

use std::error::Error;
use std::net::SocketAddr;
use std::sync::Arc;

use ladders_api::config::{AppConfig, load_topology};
use ladders_api::state::AppState;
use ladders_core::clock::{Clock, SystemClock};
use ladders_core::rng::SystemRng;
use ladders_narrative::application::completion::CompletionNarrator;
use ladders_narrative::application::trigger::commentary_channel;
use ladders_narrative::application::worker::NarrationWorker;
use ladders_narrative::domain::transcript::Transcript;
use ladders_session::application::orchestrator::spawn_orchestrator;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    // Initialize tracing subscriber.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .json()
        .init();

    tracing::info!("Starting Snakes & Ladders API server");

    // Read configuration from environment. A bad board refuses to start.
    let config = AppConfig::from_env()?;
    let topology = Arc::new(load_topology(config.board_file.as_deref())?);
    let roster = config.roster()?;
    let clock: Arc<dyn Clock> = Arc::new(SystemClock);

    // Narration runs on its own task and never blocks a turn.
    let transcript = Transcript::new();
    let (commentary, inbox) = commentary_channel();
    let narrator = Arc::new(CompletionNarrator::new(config.narrator.clone())?);
    tokio::spawn(
        NarrationWorker::new(inbox, narrator, transcript.clone(), Arc::clone(&clock)).run(),
    );

    let rng = config.dice_seed.map_or_else(SystemRng::from_os, SystemRng::seeded);
    let (orchestrator, _worker) = spawn_orchestrator(
        roster,
        Arc::clone(&topology),
        Box::new(rng),
        clock,
        config.pacing,
        commentary,
    );

    // TODO: Replace CorsLayer::permissive() with the renderer's origin once it is hosted separately.
    let app = ladders_api::app(AppState::new(orchestrator, topology, transcript))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    // Start server.
    let addr: SocketAddr = format!("{}:{}", config.host, config.port)
        .parse()
        .map_err(|e| format!("invalid HOST:PORT combination: {e}"))?;
    tracing::info!("Listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;

    axum::serve(listener, app).await?;

    Ok(())
}
