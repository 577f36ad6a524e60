//! Commentary prompts.
//!
//! The narrator speaks as the automated opponent. It gloats about its own
//! moves, taunts the human about theirs and has a separate line for the end
//! of the game.

use ladders_board::Square;
use ladders_core::player::PlayerKind;
use serde::Serialize;

use super::events::CommentaryEvent;

const PERSONA: &str = "You are the automated opponent in a game of Snakes & Ladders \
against a human player. You are a sore winner and a worse loser. Reply with one or two \
short sentences and nothing else.";

/// Attitude the narrator is asked to take.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CommentaryTone {
    /// The automated opponent moved.
    Gloating,
    /// The human moved.
    Taunting,
    /// Someone won.
    Victory,
}

impl CommentaryTone {
    /// Chooses the tone for an event.
    #[must_use]
    pub fn for_event(event: &CommentaryEvent) -> Self {
        if event.is_win {
            Self::Victory
        } else if event.player_kind.is_automated() {
            Self::Gloating
        } else {
            Self::Taunting
        }
    }

    fn directive(self, mover: PlayerKind) -> &'static str {
        match (self, mover) {
            (Self::Gloating, _) => "You just made this move. Gloat about it.",
            (Self::Taunting, _) => "The human just made this move. Taunt and mock them about it.",
            (Self::Victory, PlayerKind::Automated) => {
                "You just won the game. Celebrate and rub it in."
            }
            (Self::Victory, PlayerKind::Human) => {
                "The human just won the game. Concede with bad grace and blame the dice."
            }
        }
    }
}

/// A ready-to-send request for one line of commentary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CommentaryPrompt {
    /// The tone the directive asks for.
    pub tone: CommentaryTone,
    /// Persona plus tone directive.
    pub system: String,
    /// Plain-text description of the move.
    pub user: String,
}

impl CommentaryPrompt {
    /// Builds the prompt for an event.
    #[must_use]
    pub fn from_event(event: &CommentaryEvent) -> Self {
        let tone = CommentaryTone::for_event(event);
        Self {
            tone,
            system: format!("{PERSONA} {}", tone.directive(event.player_kind)),
            user: describe(event),
        }
    }
}

/// Describes a move in one plain sentence.
#[must_use]
pub fn describe(event: &CommentaryEvent) -> String {
    let name = &event.player_name;
    let outcome = &event.outcome;
    let rolled = outcome.rolled;
    let from = outcome.from_square;
    let to = outcome.to_square;

    let Some(target) = outcome.target() else {
        let needed = Square::FINISH.value() - from.value();
        return format!(
            "{name} rolled a {rolled} on square {from} but needed exactly {needed}, \
             so {name} stays on {from}."
        );
    };

    let movement = if outcome.crossed_ladder {
        format!("{name} rolled a {rolled}, landed on a ladder at {target} and climbed from {from} to {to}")
    } else if outcome.crossed_snake {
        format!("{name} rolled a {rolled}, landed on a snake at {target} and slid down from {target} to {to}")
    } else {
        format!("{name} rolled a {rolled} and moved from {from} to {to}")
    };

    if event.is_win {
        format!("{movement}, reaching square {} and winning the game.", Square::FINISH)
    } else {
        format!("{movement}.")
    }
}
