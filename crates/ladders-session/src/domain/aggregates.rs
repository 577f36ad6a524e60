//! Aggregate roots for the Session context.

use ladders_board::{BoardTopology, DieRoll, MoveOutcome};
use ladders_core::aggregate::AggregateRoot;
use ladders_core::clock::Clock;
use ladders_core::error::DomainError;
use ladders_core::event::EventMetadata;
use ladders_core::player::PlayerKind;
use uuid::Uuid;

use super::events::{
    GameWon, MoveResolved, SessionEvent, SessionEventKind, SessionStarted, TurnPassed,
};
use super::phase::TurnPhase;
use super::players::{Player, Roster};

/// Seat of the human player; the human always moves first.
pub const HUMAN_SEAT: usize = 0;

/// Seat of the automated opponent.
pub const OPPONENT_SEAT: usize = 1;

/// The aggregate root for one game.
///
/// `busy` is the single in-flight guard: it is set when a move begins and
/// cleared only when the turn has been passed or the game is won.
#[derive(Debug)]
pub struct GameSession {
    /// Aggregate identifier.
    pub id: Uuid,
    /// Current version (event count).
    pub(crate) version: i64,
    /// Seated players, human first.
    pub(crate) players: [Player; 2],
    /// Seat whose turn it is.
    pub(crate) active: usize,
    /// Current turn phase.
    pub(crate) phase: TurnPhase,
    /// A move is in flight.
    pub(crate) busy: bool,
    /// Event id of the in-flight move once resolved; the turn has not passed yet.
    pub(crate) resolved_move: Option<Uuid>,
    /// Seat of the winner once the game is over.
    pub(crate) winner: Option<usize>,
    /// Most recent die face.
    pub(crate) last_roll: Option<DieRoll>,
    /// Events not yet handed to observers.
    uncommitted_events: Vec<SessionEvent>,
}

impl GameSession {
    /// Seats the roster on square 1 and produces a `SessionStarted` event.
    #[must_use]
    pub fn start(id: Uuid, roster: &Roster, correlation_id: Uuid, clock: &dyn Clock) -> Self {
        let players = [
            Player::seat(&roster.human, PlayerKind::Human),
            Player::seat(&roster.opponent, PlayerKind::Automated),
        ];
        let player_ids = players.iter().map(|p| p.id).collect();
        let mut session = Self {
            id,
            version: 0,
            players,
            active: HUMAN_SEAT,
            phase: TurnPhase::AwaitingHumanMove,
            busy: false,
            resolved_move: None,
            winner: None,
            last_roll: None,
            uncommitted_events: Vec::new(),
        };
        session.record(
            SessionEventKind::SessionStarted(SessionStarted {
                session_id: id,
                player_ids,
            }),
            correlation_id,
            correlation_id,
            clock,
        );
        session
    }

    /// Returns the next sequence number for a new event.
    fn next_sequence_number(&self) -> i64 {
        self.version + 1
    }

    /// Applies and queues a new event, returning its id.
    fn record(
        &mut self,
        kind: SessionEventKind,
        correlation_id: Uuid,
        causation_id: Uuid,
        clock: &dyn Clock,
    ) -> Uuid {
        let event_id = Uuid::new_v4();
        let event = SessionEvent {
            metadata: EventMetadata {
                event_id,
                event_type: kind.event_type().to_owned(),
                aggregate_id: self.aggregate_id(),
                sequence_number: self.next_sequence_number(),
                correlation_id,
                causation_id,
                occurred_at: clock.now(),
            },
            kind,
        };
        self.apply(&event);
        self.uncommitted_events.push(event);
        event_id
    }

    /// The phase in which `kind` is allowed to start a move.
    fn waiting_phase(kind: PlayerKind) -> TurnPhase {
        match kind {
            PlayerKind::Human => TurnPhase::AwaitingHumanMove,
            PlayerKind::Automated => TurnPhase::AutomatedTurnPending,
        }
    }

    /// Claims the in-flight slot for `mover` and enters `ResolvingMove`.
    ///
    /// Returns `false`, changing nothing, if a move is already in flight, the
    /// game is over, or it is not `mover`'s turn.
    pub fn begin_move(&mut self, mover: PlayerKind) -> bool {
        if self.busy
            || self.phase != Self::waiting_phase(mover)
            || self.active_player().kind != mover
        {
            return false;
        }
        self.phase = TurnPhase::ResolvingMove;
        self.busy = true;
        true
    }

    /// Releases a claimed move that could not be resolved, restoring the
    /// phase it was claimed from.
    pub fn abandon_move(&mut self) {
        if self.phase == TurnPhase::ResolvingMove && self.resolved_move.is_none() {
            self.phase = Self::waiting_phase(self.active_player().kind);
            self.busy = false;
        }
    }

    /// Applies `roll` to the active player, producing `MoveResolved` and, on
    /// a win, `GameWon`.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::Validation` if no move has been claimed or the
    /// claimed move was already resolved.
    pub fn resolve_move(
        &mut self,
        roll: DieRoll,
        topology: &BoardTopology,
        correlation_id: Uuid,
        clock: &dyn Clock,
    ) -> Result<MoveOutcome, DomainError> {
        if self.phase != TurnPhase::ResolvingMove {
            return Err(DomainError::Validation(
                "session must be in ResolvingMove phase".to_owned(),
            ));
        }
        if self.resolved_move.is_some() {
            return Err(DomainError::Validation(
                "move already resolved; the turn must pass first".to_owned(),
            ));
        }

        let player = self.active_player();
        let player_id = player.id;
        let outcome = topology.resolve_move(player.position, roll);

        let move_event = self.record(
            SessionEventKind::MoveResolved(MoveResolved {
                session_id: self.id,
                player_index: self.active,
                player_id,
                outcome,
            }),
            correlation_id,
            correlation_id,
            clock,
        );

        if outcome.is_win() {
            self.record(
                SessionEventKind::GameWon(GameWon {
                    session_id: self.id,
                    winner_index: self.active,
                    winner_id: player_id,
                }),
                correlation_id,
                move_event,
                clock,
            );
        }

        Ok(outcome)
    }

    /// Hands the turn to the other seat, producing `TurnPassed`.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::Validation` unless a resolved, non-winning move
    /// is waiting for the turn to pass.
    pub fn pass_turn(
        &mut self,
        correlation_id: Uuid,
        clock: &dyn Clock,
    ) -> Result<TurnPhase, DomainError> {
        let Some(move_event) = self
            .resolved_move
            .filter(|_| self.phase == TurnPhase::ResolvingMove)
        else {
            return Err(DomainError::Validation(
                "no resolved move is waiting for the turn to pass".to_owned(),
            ));
        };

        let next = (self.active + 1) % self.players.len();
        let phase = Self::waiting_phase(self.players[next].kind);
        self.record(
            SessionEventKind::TurnPassed(TurnPassed {
                session_id: self.id,
                next_player_index: next,
                phase,
            }),
            correlation_id,
            move_event,
            clock,
        );
        Ok(phase)
    }

    /// Current phase.
    #[must_use]
    pub fn phase(&self) -> TurnPhase {
        self.phase
    }

    /// Whether a move is in flight.
    #[must_use]
    pub fn is_busy(&self) -> bool {
        self.busy
    }

    /// Whether the game has been won.
    #[must_use]
    pub fn is_over(&self) -> bool {
        self.phase == TurnPhase::GameOver
    }

    /// Seat whose turn it is.
    #[must_use]
    pub fn active_index(&self) -> usize {
        self.active
    }

    /// Player whose turn it is.
    #[must_use]
    pub fn active_player(&self) -> &Player {
        &self.players[self.active]
    }

    /// Both players, human first.
    #[must_use]
    pub fn players(&self) -> &[Player; 2] {
        &self.players
    }

    /// Seat of the winner.
    #[must_use]
    pub fn winner(&self) -> Option<usize> {
        self.winner
    }

    /// Most recent die face.
    #[must_use]
    pub fn last_roll(&self) -> Option<DieRoll> {
        self.last_roll
    }
}

impl AggregateRoot for GameSession {
    type Event = SessionEvent;

    fn aggregate_id(&self) -> Uuid {
        self.id
    }

    fn version(&self) -> i64 {
        self.version
    }

    fn apply(&mut self, event: &Self::Event) {
        match &event.kind {
            SessionEventKind::SessionStarted(_) => {
                self.phase = TurnPhase::AwaitingHumanMove;
                self.active = HUMAN_SEAT;
            }
            SessionEventKind::MoveResolved(payload) => {
                self.players[payload.player_index].position = payload.outcome.to_square;
                self.last_roll = Some(payload.outcome.rolled);
                self.resolved_move = Some(event.metadata.event_id);
            }
            SessionEventKind::GameWon(payload) => {
                self.phase = TurnPhase::GameOver;
                self.winner = Some(payload.winner_index);
                self.busy = false;
                self.resolved_move = None;
            }
            SessionEventKind::TurnPassed(payload) => {
                self.active = payload.next_player_index;
                self.phase = payload.phase;
                self.busy = false;
                self.resolved_move = None;
            }
        }
        self.version += 1;
    }

    fn uncommitted_events(&self) -> &[Self::Event] {
        &self.uncommitted_events
    }

    fn take_uncommitted_events(&mut self) -> Vec<Self::Event> {
        std::mem::take(&mut self.uncommitted_events)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ladders_board::{Ladder, Square};
    use ladders_core::event::DomainEvent;
    use ladders_test_support::FixedClock;

    fn roll(n: u8) -> DieRoll {
        DieRoll::new(n).unwrap()
    }

    fn started() -> GameSession {
        let mut session = GameSession::start(
            Uuid::new_v4(),
            &Roster::default(),
            Uuid::new_v4(),
            &FixedClock::standard(),
        );
        session.take_uncommitted_events();
        session
    }

    fn standard() -> BoardTopology {
        BoardTopology::standard().unwrap()
    }

    // --- start tests ---

    #[test]
    fn test_start_seats_both_players_on_square_one() {
        let clock = FixedClock::standard();
        let correlation_id = Uuid::new_v4();
        let session_id = Uuid::new_v4();

        let session = GameSession::start(session_id, &Roster::default(), correlation_id, &clock);

        assert_eq!(session.phase(), TurnPhase::AwaitingHumanMove);
        assert_eq!(session.active_index(), HUMAN_SEAT);
        assert!(!session.is_busy());
        assert!(session.players().iter().all(|p| p.position() == Square::START));
        assert_eq!(session.players()[HUMAN_SEAT].kind, PlayerKind::Human);
        assert_eq!(session.players()[OPPONENT_SEAT].kind, PlayerKind::Automated);

        let events = session.uncommitted_events();
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].event_type(), "session.session_started");
        let meta = events[0].metadata();
        assert_eq!(meta.aggregate_id, session_id);
        assert_eq!(meta.sequence_number, 1);
        assert_eq!(meta.correlation_id, correlation_id);
        assert_eq!(meta.causation_id, correlation_id);
        assert_eq!(meta.occurred_at, clock.0);
    }

    // --- begin_move tests ---

    #[test]
    fn test_begin_move_claims_in_flight_slot() {
        let mut session = started();

        assert!(session.begin_move(PlayerKind::Human));

        assert_eq!(session.phase(), TurnPhase::ResolvingMove);
        assert!(session.is_busy());
    }

    #[test]
    fn test_second_begin_move_is_ignored() {
        let mut session = started();
        assert!(session.begin_move(PlayerKind::Human));

        assert!(!session.begin_move(PlayerKind::Human));
        assert!(!session.begin_move(PlayerKind::Automated));
        assert_eq!(session.phase(), TurnPhase::ResolvingMove);
    }

    #[test]
    fn test_automated_cannot_move_on_human_turn() {
        let mut session = started();

        assert!(!session.begin_move(PlayerKind::Automated));
        assert_eq!(session.phase(), TurnPhase::AwaitingHumanMove);
        assert!(!session.is_busy());
    }

    #[test]
    fn test_abandon_move_restores_waiting_phase() {
        let mut session = started();
        session.begin_move(PlayerKind::Human);

        session.abandon_move();

        assert_eq!(session.phase(), TurnPhase::AwaitingHumanMove);
        assert!(!session.is_busy());
    }

    // --- resolve_move tests ---

    #[test]
    fn test_resolve_move_commits_position_and_emits_event() {
        let mut session = started();
        session.begin_move(PlayerKind::Human);

        let outcome = session
            .resolve_move(roll(1), &standard(), Uuid::new_v4(), &FixedClock::standard())
            .unwrap();

        assert_eq!(outcome.to_square, Square::new(23).unwrap());
        assert!(outcome.crossed_ladder);
        assert_eq!(session.players()[HUMAN_SEAT].position(), Square::new(23).unwrap());
        assert_eq!(session.last_roll(), Some(roll(1)));
        assert!(session.is_busy());
        assert_eq!(session.phase(), TurnPhase::ResolvingMove);

        let events = session.uncommitted_events();
        assert_eq!(events.len(), 1);
        match &events[0].kind {
            SessionEventKind::MoveResolved(payload) => {
                assert_eq!(payload.player_index, HUMAN_SEAT);
                assert_eq!(payload.outcome, outcome);
            }
            other => panic!("expected MoveResolved, got {other:?}"),
        }
    }

    #[test]
    fn test_resolve_move_without_claim_returns_error() {
        let mut session = started();

        let result =
            session.resolve_move(roll(3), &standard(), Uuid::new_v4(), &FixedClock::standard());

        match result.unwrap_err() {
            DomainError::Validation(msg) => {
                assert_eq!(msg, "session must be in ResolvingMove phase");
            }
            other => panic!("expected Validation, got {other:?}"),
        }
        assert!(session.players().iter().all(|p| p.position() == Square::START));
    }

    #[test]
    fn test_resolve_move_twice_returns_error() {
        let mut session = started();
        let clock = FixedClock::standard();
        session.begin_move(PlayerKind::Human);
        session
            .resolve_move(roll(3), &standard(), Uuid::new_v4(), &clock)
            .unwrap();

        let result = session.resolve_move(roll(3), &standard(), Uuid::new_v4(), &clock);

        assert!(result.is_err());
        assert_eq!(session.players()[HUMAN_SEAT].position(), Square::new(4).unwrap());
    }

    #[test]
    fn test_winning_move_ends_game() {
        let topology = BoardTopology::new(
            vec![],
            vec![Ladder {
                base: Square::new(2).unwrap(),
                top: Square::FINISH,
            }],
        )
        .unwrap();
        let mut session = started();
        session.begin_move(PlayerKind::Human);

        let outcome = session
            .resolve_move(roll(1), &topology, Uuid::new_v4(), &FixedClock::standard())
            .unwrap();

        assert!(outcome.is_win());
        assert!(session.is_over());
        assert_eq!(session.winner(), Some(HUMAN_SEAT));
        assert!(!session.is_busy());

        let types: Vec<&str> = session
            .uncommitted_events()
            .iter()
            .map(DomainEvent::event_type)
            .collect();
        assert_eq!(types, vec!["session.move_resolved", "session.game_won"]);

        assert!(!session.begin_move(PlayerKind::Human));
        assert!(!session.begin_move(PlayerKind::Automated));
        assert!(
            session
                .pass_turn(Uuid::new_v4(), &FixedClock::standard())
                .is_err()
        );
    }

    // --- pass_turn tests ---

    #[test]
    fn test_pass_turn_hands_play_to_opponent() {
        let mut session = started();
        let clock = FixedClock::standard();
        session.begin_move(PlayerKind::Human);
        session
            .resolve_move(roll(3), &standard(), Uuid::new_v4(), &clock)
            .unwrap();

        let phase = session.pass_turn(Uuid::new_v4(), &clock).unwrap();

        assert_eq!(phase, TurnPhase::AutomatedTurnPending);
        assert_eq!(session.active_index(), OPPONENT_SEAT);
        assert!(!session.is_busy());
        assert!(!session.begin_move(PlayerKind::Human));
        assert!(session.begin_move(PlayerKind::Automated));
    }

    #[test]
    fn test_full_round_returns_to_human() {
        let mut session = started();
        let clock = FixedClock::standard();
        let topology = standard();

        session.begin_move(PlayerKind::Human);
        session
            .resolve_move(roll(3), &topology, Uuid::new_v4(), &clock)
            .unwrap();
        session.pass_turn(Uuid::new_v4(), &clock).unwrap();
        session.begin_move(PlayerKind::Automated);
        session
            .resolve_move(roll(5), &topology, Uuid::new_v4(), &clock)
            .unwrap();
        let phase = session.pass_turn(Uuid::new_v4(), &clock).unwrap();

        assert_eq!(phase, TurnPhase::AwaitingHumanMove);
        assert_eq!(session.active_index(), HUMAN_SEAT);
        assert_eq!(session.players()[OPPONENT_SEAT].position(), Square::new(6).unwrap());
        assert_eq!(session.version(), 5);
    }

    #[test]
    fn test_pass_turn_before_resolution_returns_error() {
        let mut session = started();
        session.begin_move(PlayerKind::Human);

        let result = session.pass_turn(Uuid::new_v4(), &FixedClock::standard());

        match result.unwrap_err() {
            DomainError::Validation(msg) => {
                assert_eq!(msg, "no resolved move is waiting for the turn to pass");
            }
            other => panic!("expected Validation, got {other:?}"),
        }
    }

    #[test]
    fn test_sequence_numbers_increase() {
        let mut session = GameSession::start(
            Uuid::new_v4(),
            &Roster::default(),
            Uuid::new_v4(),
            &FixedClock::standard(),
        );
        session.begin_move(PlayerKind::Human);
        session
            .resolve_move(roll(4), &standard(), Uuid::new_v4(), &FixedClock::standard())
            .unwrap();

        let numbers: Vec<i64> = session
            .take_uncommitted_events()
            .iter()
            .map(|e| e.metadata().sequence_number)
            .collect();

        assert_eq!(numbers, vec![1, 2]);
        assert!(session.uncommitted_events().is_empty());
    }

    #[test]
    fn test_turn_passed_is_caused_by_resolved_move() {
        // Arrange
        let mut session = started();
        let clock = FixedClock::standard();
        let move_correlation = Uuid::new_v4();
        let pass_correlation = Uuid::new_v4();
        session.begin_move(PlayerKind::Human);
        session
            .resolve_move(roll(3), &standard(), move_correlation, &clock)
            .unwrap();

        // Act
        session.pass_turn(pass_correlation, &clock).unwrap();

        // Assert
        let events = session.take_uncommitted_events();
        let resolved = events[0].metadata();
        let passed = events[1].metadata();
        assert_eq!(resolved.aggregate_id, session.aggregate_id());
        assert_eq!(resolved.causation_id, move_correlation);
        assert_eq!(passed.correlation_id, pass_correlation);
        assert_eq!(passed.causation_id, resolved.event_id);
    }

    #[test]
    fn test_game_won_is_caused_by_winning_move() {
        let topology = BoardTopology::new(
            vec![],
            vec![Ladder {
                base: Square::new(2).unwrap(),
                top: Square::FINISH,
            }],
        )
        .unwrap();
        let mut session = started();
        session.begin_move(PlayerKind::Human);

        session
            .resolve_move(roll(1), &topology, Uuid::new_v4(), &FixedClock::standard())
            .unwrap();

        let events = session.take_uncommitted_events();
        assert_eq!(events[1].event_type(), "session.game_won");
        assert_eq!(events[1].metadata().causation_id, events[0].metadata().event_id);
        assert_eq!(
            events[1].metadata().correlation_id,
            events[0].metadata().correlation_id
        );
    }

    #[test]
    fn test_event_payload_is_tagged_by_kind() {
        let mut session = GameSession::start(
            Uuid::new_v4(),
            &Roster::default(),
            Uuid::new_v4(),
            &FixedClock::standard(),
        );

        let events = session.take_uncommitted_events();
        let payload = events[0].to_payload().unwrap();

        assert_eq!(payload["SessionStarted"]["session_id"], session.id.to_string());
        assert_eq!(
            payload["SessionStarted"]["player_ids"].as_array().map(Vec::len),
            Some(2)
        );
    }
}
