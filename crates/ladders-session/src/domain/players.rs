//! Players and the roster they are created from.

use ladders_board::Square;
use ladders_core::error::DomainError;
use ladders_core::player::PlayerKind;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Display attributes for one seat.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerProfile {
    /// Name shown on the board and in commentary.
    pub name: String,
    /// Token color, as a CSS color string.
    pub color: String,
    /// Optional avatar image reference.
    pub avatar: Option<String>,
}

/// The two seats of a game: the human always moves first.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Roster {
    /// Seat 0.
    pub human: PlayerProfile,
    /// Seat 1.
    pub opponent: PlayerProfile,
}

impl Default for Roster {
    fn default() -> Self {
        Self {
            human: PlayerProfile {
                name: "You".to_owned(),
                color: "#2563eb".to_owned(),
                avatar: None,
            },
            opponent: PlayerProfile {
                name: "Serpentina".to_owned(),
                color: "#dc2626".to_owned(),
                avatar: Some("/avatars/serpentina.png".to_owned()),
            },
        }
    }
}

impl Roster {
    /// Builds a roster with the given display names and default styling.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidConfiguration` if a name is blank or both
    /// names are the same.
    pub fn with_names(human: &str, opponent: &str) -> Result<Self, DomainError> {
        let human = human.trim();
        let opponent = opponent.trim();
        if human.is_empty() || opponent.is_empty() {
            return Err(DomainError::InvalidConfiguration(
                "player names must not be blank".to_owned(),
            ));
        }
        if human == opponent {
            return Err(DomainError::InvalidConfiguration(
                "players must have different names".to_owned(),
            ));
        }
        let mut roster = Self::default();
        human.clone_into(&mut roster.human.name);
        opponent.clone_into(&mut roster.opponent.name);
        Ok(roster)
    }
}

/// A seated player. Owned by the session; only the session moves it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Player {
    /// Identity for the lifetime of the session.
    pub id: Uuid,
    /// Display attributes.
    pub profile: PlayerProfile,
    /// Who controls the seat.
    pub kind: PlayerKind,
    pub(crate) position: Square,
}

impl Player {
    pub(crate) fn seat(profile: &PlayerProfile, kind: PlayerKind) -> Self {
        Self {
            id: Uuid::new_v4(),
            profile: profile.clone(),
            kind,
            position: Square::START,
        }
    }

    /// Current square.
    #[must_use]
    pub fn position(&self) -> Square {
        self.position
    }

    /// Display name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.profile.name
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_with_names_keeps_default_styling() {
        let roster = Roster::with_names(" Ada ", "Serpentina").unwrap();

        assert_eq!(roster.human.name, "Ada");
        assert_eq!(roster.human.color, Roster::default().human.color);
        assert_eq!(roster.opponent.name, "Serpentina");
    }

    #[test]
    fn test_with_names_rejects_blank_name() {
        let result = Roster::with_names("", "Serpentina");

        match result.unwrap_err() {
            DomainError::InvalidConfiguration(msg) => {
                assert_eq!(msg, "player names must not be blank");
            }
            other => panic!("expected InvalidConfiguration, got {other:?}"),
        }
    }

    #[test]
    fn test_with_names_rejects_duplicate_names() {
        assert!(Roster::with_names("Ada", "Ada").is_err());
    }

    #[test]
    fn test_new_player_starts_on_first_square() {
        let player = Player::seat(&Roster::default().human, PlayerKind::Human);

        assert_eq!(player.position(), Square::START);
        assert_eq!(player.name(), "You");
    }
}
