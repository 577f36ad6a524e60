//! Turn orchestrator.
//!
//! A single worker task owns the [`GameSession`] exclusively. Callers talk to
//! it through an [`OrchestratorHandle`]; scheduled transitions (narration
//! pacing and the automated opponent's turn) come back to the worker as
//! messages on the same inbox, tagged with the generation they were
//! scheduled in. A reset bumps the generation and aborts the pending timer,
//! so a late timer can never touch a fresh session.

use std::sync::Arc;
use std::time::Duration;

use ladders_board::{BoardTopology, DieRoll, MoveOutcome};
use ladders_core::aggregate::AggregateRoot;
use ladders_core::clock::Clock;
use ladders_core::error::DomainError;
use ladders_core::event::DomainEvent;
use ladders_core::player::PlayerKind;
use ladders_core::rng::DeterministicRng;
use ladders_narrative::application::trigger::CommentaryTrigger;
use ladders_narrative::domain::events::CommentaryEvent;
use serde::Serialize;
use tokio::sync::{broadcast, mpsc, oneshot};
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};
use uuid::Uuid;

use super::query_handlers::{SessionView, session_view};
use crate::domain::aggregates::GameSession;
use crate::domain::commands::{RequestMove, ResetGame};
use crate::domain::events::SessionEvent;
use crate::domain::phase::TurnPhase;
use crate::domain::players::Roster;

const COMMAND_BUFFER: usize = 64;
const EVENT_BUFFER: usize = 256;

/// Advisory delays between the steps of a turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pacing {
    /// Wait after an overshoot before the turn passes.
    pub overshoot: Duration,
    /// Wait between resolving a move and narrating it.
    pub narration: Duration,
    /// Wait before the automated opponent rolls.
    pub opponent: Duration,
}

impl Default for Pacing {
    fn default() -> Self {
        Self {
            overshoot: Duration::from_millis(1000),
            narration: Duration::from_millis(600),
            opponent: Duration::from_millis(1500),
        }
    }
}

impl Pacing {
    /// No waiting at all.
    #[must_use]
    pub fn immediate() -> Self {
        Self {
            overshoot: Duration::ZERO,
            narration: Duration::ZERO,
            opponent: Duration::ZERO,
        }
    }
}

/// Reply to a move request.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MoveAck {
    /// `false` when the request was ignored because a move was in flight,
    /// the game was over, or it was not the human's turn.
    pub accepted: bool,
    /// The session after the request.
    pub session: SessionView,
}

/// A transition the worker has scheduled for itself.
#[derive(Debug, Clone, Copy)]
enum ScheduledStep {
    /// Narrate a resolved move, then pass the turn.
    Narrate {
        outcome: MoveOutcome,
        player_index: usize,
        correlation_id: Uuid,
    },
    /// The automated opponent rolls.
    AutomatedMove,
}

#[derive(Debug)]
enum WorkerCommand {
    RequestMove {
        correlation_id: Uuid,
        reply: oneshot::Sender<Result<MoveAck, DomainError>>,
    },
    Reset {
        correlation_id: Uuid,
        reply: oneshot::Sender<SessionView>,
    },
    Snapshot {
        reply: oneshot::Sender<SessionView>,
    },
    Scheduled {
        generation: u64,
        step: ScheduledStep,
    },
}

/// Cloneable front door to the orchestrator worker.
#[derive(Debug, Clone)]
pub struct OrchestratorHandle {
    command_tx: mpsc::Sender<WorkerCommand>,
    event_tx: broadcast::Sender<SessionEvent>,
}

fn worker_gone<T>(_: T) -> DomainError {
    DomainError::Infrastructure("turn orchestrator is not running".to_owned())
}

impl OrchestratorHandle {
    /// Asks for the human's move.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::Infrastructure` if the worker has stopped or the
    /// random source misbehaved.
    pub async fn request_move(&self, command: &RequestMove) -> Result<MoveAck, DomainError> {
        let (reply, rx) = oneshot::channel();
        self.command_tx
            .send(WorkerCommand::RequestMove {
                correlation_id: command.correlation_id,
                reply,
            })
            .await
            .map_err(worker_gone)?;
        rx.await.map_err(worker_gone)?
    }

    /// Replaces the session with a fresh one, cancelling anything scheduled.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::Infrastructure` if the worker has stopped.
    pub async fn reset(&self, command: &ResetGame) -> Result<SessionView, DomainError> {
        let (reply, rx) = oneshot::channel();
        self.command_tx
            .send(WorkerCommand::Reset {
                correlation_id: command.correlation_id,
                reply,
            })
            .await
            .map_err(worker_gone)?;
        rx.await.map_err(worker_gone)
    }

    /// Returns a read-only view of the current session.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::Infrastructure` if the worker has stopped.
    pub async fn snapshot(&self) -> Result<SessionView, DomainError> {
        let (reply, rx) = oneshot::channel();
        self.command_tx
            .send(WorkerCommand::Snapshot { reply })
            .await
            .map_err(worker_gone)?;
        rx.await.map_err(worker_gone)
    }

    /// Subscribes to session events.
    #[must_use]
    pub fn subscribe(&self) -> broadcast::Receiver<SessionEvent> {
        self.event_tx.subscribe()
    }
}

/// Background task that owns the game session and drives its turns.
pub struct TurnOrchestrator {
    session: GameSession,
    roster: Roster,
    topology: Arc<BoardTopology>,
    rng: Box<dyn DeterministicRng>,
    clock: Arc<dyn Clock>,
    pacing: Pacing,
    commentary: CommentaryTrigger,
    generation: u64,
    pending: Option<JoinHandle<()>>,
    scheduler_tx: mpsc::WeakSender<WorkerCommand>,
    command_rx: mpsc::Receiver<WorkerCommand>,
    event_tx: broadcast::Sender<SessionEvent>,
}

/// Starts a session and spawns its orchestrator on the current runtime.
///
/// The worker stops once every [`OrchestratorHandle`] has been dropped.
#[must_use]
pub fn spawn_orchestrator(
    roster: Roster,
    topology: Arc<BoardTopology>,
    rng: Box<dyn DeterministicRng>,
    clock: Arc<dyn Clock>,
    pacing: Pacing,
    commentary: CommentaryTrigger,
) -> (OrchestratorHandle, JoinHandle<()>) {
    let (command_tx, command_rx) = mpsc::channel(COMMAND_BUFFER);
    let (event_tx, _) = broadcast::channel(EVENT_BUFFER);

    let session = GameSession::start(Uuid::new_v4(), &roster, Uuid::new_v4(), clock.as_ref());
    let mut worker = TurnOrchestrator {
        session,
        roster,
        topology,
        rng,
        clock,
        pacing,
        commentary,
        generation: 0,
        pending: None,
        scheduler_tx: command_tx.downgrade(),
        command_rx,
        event_tx: event_tx.clone(),
    };
    worker.announce_session();

    let handle = OrchestratorHandle {
        command_tx,
        event_tx,
    };
    (handle, tokio::spawn(worker.run()))
}

impl TurnOrchestrator {
    /// Main worker loop.
    pub async fn run(mut self) {
        while let Some(command) = self.command_rx.recv().await {
            self.handle_command(command);
        }
        self.cancel_pending();
        debug!("turn orchestrator stopped");
    }

    fn handle_command(&mut self, command: WorkerCommand) {
        match command {
            WorkerCommand::RequestMove {
                correlation_id,
                reply,
            } => {
                let result = self.human_move(correlation_id);
                let _ = reply.send(result);
            }
            WorkerCommand::Reset {
                correlation_id,
                reply,
            } => {
                self.reset(correlation_id);
                let _ = reply.send(session_view(&self.session));
            }
            WorkerCommand::Snapshot { reply } => {
                let _ = reply.send(session_view(&self.session));
            }
            WorkerCommand::Scheduled { generation, step } => {
                if generation != self.generation {
                    debug!(
                        generation,
                        current = self.generation,
                        "ignoring transition scheduled before reset"
                    );
                    return;
                }
                self.pending = None;
                self.run_step(step);
            }
        }
    }

    fn human_move(&mut self, correlation_id: Uuid) -> Result<MoveAck, DomainError> {
        let accepted = self.play(PlayerKind::Human, correlation_id)?;
        Ok(MoveAck {
            accepted,
            session: session_view(&self.session),
        })
    }

    /// Runs one move for `mover`. Returns `false` if the move was not allowed.
    fn play(&mut self, mover: PlayerKind, correlation_id: Uuid) -> Result<bool, DomainError> {
        if !self.session.begin_move(mover) {
            debug!(
                session_id = %self.session.id,
                ?mover,
                phase = ?self.session.phase(),
                "move request ignored"
            );
            return Ok(false);
        }

        let roll = match DieRoll::roll(self.rng.as_mut()) {
            Ok(roll) => roll,
            Err(err) => {
                warn!(error = %err, "die roll failed; move abandoned");
                self.session.abandon_move();
                return Err(err);
            }
        };

        let player_index = self.session.active_index();
        let outcome = match self.session.resolve_move(
            roll,
            &self.topology,
            correlation_id,
            self.clock.as_ref(),
        ) {
            Ok(outcome) => outcome,
            Err(err) => {
                self.session.abandon_move();
                return Err(err);
            }
        };
        info!(
            session_id = %self.session.id,
            player = self.session.active_player().name(),
            roll = roll.value(),
            from = outcome.from_square.value(),
            to = outcome.to_square.value(),
            overshot = outcome.overshot,
            "move resolved"
        );
        self.publish();

        if outcome.is_win() {
            info!(
                session_id = %self.session.id,
                winner = self.session.active_player().name(),
                "game won"
            );
            self.notify_commentary(&outcome, player_index);
            return Ok(true);
        }

        let delay = if outcome.overshot {
            self.pacing.overshoot
        } else {
            self.pacing.narration
        };
        self.schedule(
            delay,
            ScheduledStep::Narrate {
                outcome,
                player_index,
                correlation_id,
            },
        );
        Ok(true)
    }

    fn run_step(&mut self, step: ScheduledStep) {
        match step {
            ScheduledStep::Narrate {
                outcome,
                player_index,
                correlation_id,
            } => {
                self.notify_commentary(&outcome, player_index);
                match self.session.pass_turn(correlation_id, self.clock.as_ref()) {
                    Ok(phase) => {
                        self.publish();
                        if phase == TurnPhase::AutomatedTurnPending {
                            self.schedule(self.pacing.opponent, ScheduledStep::AutomatedMove);
                        }
                    }
                    Err(err) => warn!(error = %err, "turn could not pass"),
                }
            }
            ScheduledStep::AutomatedMove => {
                if let Err(err) = self.play(PlayerKind::Automated, Uuid::new_v4()) {
                    warn!(error = %err, "automated move failed; retrying");
                    self.schedule(self.pacing.opponent, ScheduledStep::AutomatedMove);
                }
            }
        }
    }

    fn notify_commentary(&self, outcome: &MoveOutcome, player_index: usize) {
        let player = &self.session.players()[player_index];
        self.commentary.notify(CommentaryEvent {
            session_id: self.session.id,
            player_name: player.name().to_owned(),
            player_kind: player.kind,
            outcome: *outcome,
            is_win: outcome.is_win(),
        });
    }

    fn schedule(&mut self, delay: Duration, step: ScheduledStep) {
        let generation = self.generation;
        let scheduler_tx = self.scheduler_tx.clone();
        debug!(generation, ?delay, ?step, "transition scheduled");
        self.cancel_pending();
        self.pending = Some(tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            if let Some(tx) = scheduler_tx.upgrade() {
                let _ = tx.send(WorkerCommand::Scheduled { generation, step }).await;
            }
        }));
    }

    fn cancel_pending(&mut self) {
        if let Some(pending) = self.pending.take() {
            pending.abort();
        }
    }

    fn reset(&mut self, correlation_id: Uuid) {
        self.generation += 1;
        self.cancel_pending();
        self.session = GameSession::start(
            Uuid::new_v4(),
            &self.roster,
            correlation_id,
            self.clock.as_ref(),
        );
        info!(
            session_id = %self.session.id,
            generation = self.generation,
            "session reset"
        );
        self.announce_session();
    }

    fn announce_session(&mut self) {
        self.commentary.session_started(self.session.id);
        self.publish();
    }

    fn publish(&mut self) {
        let aggregate_id = self.session.aggregate_id();
        for event in self.session.take_uncommitted_events() {
            let meta = event.metadata();
            match event.to_payload() {
                Ok(payload) => debug!(
                    %aggregate_id,
                    event_type = event.event_type(),
                    sequence = meta.sequence_number,
                    causation_id = %meta.causation_id,
                    %payload,
                    "session event"
                ),
                Err(err) => warn!(
                    error = %err,
                    event_type = event.event_type(),
                    "event payload not serializable"
                ),
            }
            // No subscribers is fine.
            let _ = self.event_tx.send(event);
        }
    }
}
