//! Query handlers for the Session context.
//!
//! Read-only view DTOs built from the live session.

use ladders_board::{DieRoll, GridCell, Square, layout_tokens};
use ladders_core::aggregate::AggregateRoot;
use ladders_core::player::PlayerKind;
use serde::Serialize;
use uuid::Uuid;

use crate::domain::aggregates::GameSession;
use crate::domain::phase::TurnPhase;

/// Read-only view of one seated player, including where to draw the token.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlayerView {
    /// Player identifier.
    pub id: Uuid,
    /// Display name.
    pub name: String,
    /// Token color.
    pub color: String,
    /// Avatar image reference.
    pub avatar: Option<String>,
    /// Who controls the seat.
    pub kind: PlayerKind,
    /// Current square.
    pub position: Square,
    /// Grid cell of `position`.
    pub cell: GridCell,
    /// Horizontal token offset within the cell.
    pub offset: f64,
}

/// Read-only view of the session aggregate.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SessionView {
    /// The session identifier.
    pub session_id: Uuid,
    /// Current turn phase.
    pub phase: TurnPhase,
    /// Seat whose turn it is.
    pub active_player_index: usize,
    /// A move is in flight.
    pub busy: bool,
    /// Most recent die face.
    pub last_roll: Option<DieRoll>,
    /// Seat of the winner, once the game is over.
    pub winner_index: Option<usize>,
    /// Current version (event count).
    pub version: i64,
    /// Players in seat order.
    pub players: Vec<PlayerView>,
}

/// Builds the view of `session`.
#[must_use]
pub fn session_view(session: &GameSession) -> SessionView {
    let positions: Vec<Square> = session.players().iter().map(|p| p.position()).collect();
    let players = session
        .players()
        .iter()
        .zip(layout_tokens(&positions))
        .map(|(player, placement)| PlayerView {
            id: player.id,
            name: player.profile.name.clone(),
            color: player.profile.color.clone(),
            avatar: player.profile.avatar.clone(),
            kind: player.kind,
            position: placement.square,
            cell: placement.cell,
            offset: placement.offset,
        })
        .collect();

    SessionView {
        session_id: session.id,
        phase: session.phase(),
        active_player_index: session.active_index(),
        busy: session.is_busy(),
        last_roll: session.last_roll(),
        winner_index: session.winner(),
        version: session.version(),
        players,
    }
}

#[cfg(test)]
mod tests {
    use ladders_board::{BoardTopology, TOKEN_SPACING, to_grid};
    use ladders_test_support::FixedClock;

    use super::*;
    use crate::domain::players::Roster;

    fn new_session() -> GameSession {
        GameSession::start(
            Uuid::new_v4(),
            &Roster::default(),
            Uuid::new_v4(),
            &FixedClock::standard(),
        )
    }

    #[test]
    fn test_view_of_new_session() {
        // Arrange
        let session = new_session();

        // Act
        let view = session_view(&session);

        // Assert
        assert_eq!(view.session_id, session.id);
        assert_eq!(view.phase, TurnPhase::AwaitingHumanMove);
        assert_eq!(view.active_player_index, 0);
        assert!(!view.busy);
        assert_eq!(view.last_roll, None);
        assert_eq!(view.winner_index, None);
        assert_eq!(view.version, 1);
        assert_eq!(view.players.len(), 2);
        assert_eq!(view.players[0].name, "You");
        assert_eq!(view.players[1].kind, PlayerKind::Automated);
    }

    #[test]
    fn test_tokens_on_shared_square_are_offset() {
        let view = session_view(&new_session());

        assert_eq!(view.players[0].cell, view.players[1].cell);
        assert!((view.players[0].offset + TOKEN_SPACING / 2.0).abs() < 1e-9);
        assert!((view.players[1].offset - TOKEN_SPACING / 2.0).abs() < 1e-9);
    }

    #[test]
    fn test_view_reflects_resolved_move() {
        // Arrange
        let mut session = new_session();
        let topology = BoardTopology::standard().unwrap();
        session.begin_move(PlayerKind::Human);
        session
            .resolve_move(
                DieRoll::new(1).unwrap(),
                &topology,
                Uuid::new_v4(),
                &FixedClock::standard(),
            )
            .unwrap();

        // Act
        let view = session_view(&session);

        // Assert
        let ladder_top = Square::new(23).unwrap();
        assert!(view.busy);
        assert_eq!(view.last_roll, DieRoll::new(1));
        assert_eq!(view.players[0].position, ladder_top);
        assert_eq!(view.players[0].cell, to_grid(ladder_top));
        assert!(view.players[0].offset.abs() < f64::EPSILON);
    }

    #[test]
    fn test_view_serializes_phase_in_snake_case() {
        let view = session_view(&new_session());

        let json = serde_json::to_value(&view).unwrap();

        assert_eq!(json["phase"], "awaiting_human_move");
        assert_eq!(json["players"][0]["position"], 1);
        assert_eq!(json["players"][1]["kind"], "automated");
    }
}
