//! Snake and ladder table.
//!
//! A topology is validated once when it is built and is immutable after
//! that. Resolution is a single lookup: landing squares never trigger a
//! second transition, which the validation rules guarantee.

use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

use super::square::{CELL_COUNT, Square};

/// A backward link from `head` down to `tail`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Snake {
    /// Landing here triggers the snake.
    pub head: Square,
    /// Where the player ends up.
    pub tail: Square,
}

/// A forward link from `base` up to `top`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ladder {
    /// Landing here triggers the ladder.
    pub base: Square,
    /// Where the player ends up.
    pub top: Square,
}

/// Reasons a snake/ladder table is rejected.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TopologyError {
    /// An endpoint is not a square on the board.
    #[error("square {0} is outside 1..={CELL_COUNT}")]
    OutOfRange(u16),

    /// A snake whose tail is not below its head.
    #[error("snake {head}->{tail} does not descend")]
    SnakeNotDescending {
        /// Head square.
        head: Square,
        /// Tail square.
        tail: Square,
    },

    /// A ladder whose top is not above its base.
    #[error("ladder {base}->{top} does not climb")]
    LadderNotClimbing {
        /// Base square.
        base: Square,
        /// Top square.
        top: Square,
    },

    /// Two links start on the same square.
    #[error("square {0} starts more than one snake or ladder")]
    DuplicateStart(Square),

    /// Two links land on the same square.
    #[error("square {0} is the landing square of more than one snake or ladder")]
    SharedLanding(Square),

    /// A landing square is also the start of another link.
    #[error("square {0} is both a landing square and the start of a snake or ladder")]
    ChainedTransition(Square),

    /// A link starts on the finishing square.
    #[error("square {CELL_COUNT} cannot start a snake or ladder")]
    StartsOnFinish,

    /// The topology document could not be parsed.
    #[error("invalid topology document: {0}")]
    Parse(String),
}

/// The validated snake and ladder table for a session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BoardTopology {
    snakes: Vec<Snake>,
    ladders: Vec<Ladder>,
    transitions: BTreeMap<Square, Square>,
}

const STANDARD_LADDERS: [(u8, u8); 8] = [
    (2, 23),
    (8, 34),
    (20, 77),
    (32, 68),
    (41, 79),
    (74, 88),
    (82, 100),
    (85, 95),
];

const STANDARD_SNAKES: [(u8, u8); 9] = [
    (29, 9),
    (38, 15),
    (47, 5),
    (53, 33),
    (62, 37),
    (86, 54),
    (92, 70),
    (97, 25),
    (99, 7),
];

/// On-disk shape of a topology file.
#[derive(Debug, Deserialize)]
struct TopologyDocument {
    #[serde(default)]
    snakes: Vec<RawSnake>,
    #[serde(default)]
    ladders: Vec<RawLadder>,
}

#[derive(Debug, Deserialize)]
struct RawSnake {
    head: u16,
    tail: u16,
}

#[derive(Debug, Deserialize)]
struct RawLadder {
    base: u16,
    top: u16,
}

fn checked_square(value: u16) -> Result<Square, TopologyError> {
    u8::try_from(value)
        .ok()
        .and_then(Square::new)
        .ok_or(TopologyError::OutOfRange(value))
}

impl BoardTopology {
    /// Builds and validates a topology.
    ///
    /// # Errors
    ///
    /// Returns the first [`TopologyError`] found, checking direction, then
    /// the finishing square, then start uniqueness, landing uniqueness and
    /// finally chained transitions.
    pub fn new(snakes: Vec<Snake>, ladders: Vec<Ladder>) -> Result<Self, TopologyError> {
        let links = snakes
            .iter()
            .map(|s| {
                if s.tail < s.head {
                    Ok((s.head, s.tail))
                } else {
                    Err(TopologyError::SnakeNotDescending {
                        head: s.head,
                        tail: s.tail,
                    })
                }
            })
            .chain(ladders.iter().map(|l| {
                if l.top > l.base {
                    Ok((l.base, l.top))
                } else {
                    Err(TopologyError::LadderNotClimbing {
                        base: l.base,
                        top: l.top,
                    })
                }
            }))
            .collect::<Result<Vec<_>, _>>()?;

        let mut transitions = BTreeMap::new();
        let mut landings = BTreeSet::new();
        for &(start, landing) in &links {
            if start == Square::FINISH {
                return Err(TopologyError::StartsOnFinish);
            }
            if transitions.insert(start, landing).is_some() {
                return Err(TopologyError::DuplicateStart(start));
            }
            if !landings.insert(landing) {
                return Err(TopologyError::SharedLanding(landing));
            }
        }
        if let Some(&chained) = landings.iter().find(|sq| transitions.contains_key(sq)) {
            return Err(TopologyError::ChainedTransition(chained));
        }

        debug!(
            snakes = snakes.len(),
            ladders = ladders.len(),
            "board topology validated"
        );

        Ok(Self {
            snakes,
            ladders,
            transitions,
        })
    }

    /// The conventional table of 9 snakes and 8 ladders.
    ///
    /// # Errors
    ///
    /// Never fails for the built-in table; the `Result` exists because the
    /// table goes through the same validation as any replacement.
    pub fn standard() -> Result<Self, TopologyError> {
        let snakes = STANDARD_SNAKES
            .iter()
            .map(|&(head, tail)| {
                Ok(Snake {
                    head: checked_square(head.into())?,
                    tail: checked_square(tail.into())?,
                })
            })
            .collect::<Result<Vec<_>, TopologyError>>()?;
        let ladders = STANDARD_LADDERS
            .iter()
            .map(|&(base, top)| {
                Ok(Ladder {
                    base: checked_square(base.into())?,
                    top: checked_square(top.into())?,
                })
            })
            .collect::<Result<Vec<_>, TopologyError>>()?;
        Self::new(snakes, ladders)
    }

    /// Parses and validates a YAML document of the form
    ///
    /// ```yaml
    /// snakes:
    ///   - { head: 99, tail: 7 }
    /// ladders:
    ///   - { base: 2, top: 23 }
    /// ```
    ///
    /// # Errors
    ///
    /// Returns `TopologyError::Parse` for malformed YAML and any validation
    /// error from [`BoardTopology::new`].
    pub fn from_yaml_str(document: &str) -> Result<Self, TopologyError> {
        let doc: TopologyDocument =
            serde_yaml::from_str(document).map_err(|e| TopologyError::Parse(e.to_string()))?;

        let snakes = doc
            .snakes
            .into_iter()
            .map(|raw| {
                Ok(Snake {
                    head: checked_square(raw.head)?,
                    tail: checked_square(raw.tail)?,
                })
            })
            .collect::<Result<Vec<_>, TopologyError>>()?;
        let ladders = doc
            .ladders
            .into_iter()
            .map(|raw| {
                Ok(Ladder {
                    base: checked_square(raw.base)?,
                    top: checked_square(raw.top)?,
                })
            })
            .collect::<Result<Vec<_>, TopologyError>>()?;

        Self::new(snakes, ladders)
    }

    /// Returns where a player who lands on `square` ends up.
    #[must_use]
    pub fn resolve(&self, square: Square) -> Square {
        self.transitions.get(&square).copied().unwrap_or(square)
    }

    /// The snakes, in table order.
    #[must_use]
    pub fn snakes(&self) -> &[Snake] {
        &self.snakes
    }

    /// The ladders, in table order.
    #[must_use]
    pub fn ladders(&self) -> &[Ladder] {
        &self.ladders
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sq(n: u8) -> Square {
        Square::new(n).unwrap()
    }

    fn snake(head: u8, tail: u8) -> Snake {
        Snake {
            head: sq(head),
            tail: sq(tail),
        }
    }

    fn ladder(base: u8, top: u8) -> Ladder {
        Ladder {
            base: sq(base),
            top: sq(top),
        }
    }

    #[test]
    fn test_standard_table_is_valid() {
        let topology = BoardTopology::standard().unwrap();

        assert_eq!(topology.snakes().len(), 9);
        assert_eq!(topology.ladders().len(), 8);
    }

    #[test]
    fn test_resolve_follows_ladder_and_snake() {
        let topology = BoardTopology::standard().unwrap();

        assert_eq!(topology.resolve(sq(2)), sq(23));
        assert_eq!(topology.resolve(sq(99)), sq(7));
        assert_eq!(topology.resolve(sq(50)), sq(50));
    }

    #[test]
    fn test_resolve_is_not_iterated() {
        let topology = BoardTopology::standard().unwrap();

        for s in Square::all() {
            let once = topology.resolve(s);
            assert_eq!(topology.resolve(once), once, "square {s} chains");
        }
    }

    #[test]
    fn test_snake_must_descend() {
        let result = BoardTopology::new(vec![snake(10, 10)], vec![]);

        assert_eq!(
            result.unwrap_err(),
            TopologyError::SnakeNotDescending {
                head: sq(10),
                tail: sq(10),
            }
        );
    }

    #[test]
    fn test_ladder_must_climb() {
        let result = BoardTopology::new(vec![], vec![ladder(40, 12)]);

        assert_eq!(
            result.unwrap_err(),
            TopologyError::LadderNotClimbing {
                base: sq(40),
                top: sq(12),
            }
        );
    }

    #[test]
    fn test_square_cannot_start_snake_and_ladder() {
        let result = BoardTopology::new(vec![snake(30, 4)], vec![ladder(30, 60)]);

        assert_eq!(result.unwrap_err(), TopologyError::DuplicateStart(sq(30)));
    }

    #[test]
    fn test_landing_square_cannot_start_another_link() {
        let result = BoardTopology::new(vec![snake(60, 30)], vec![ladder(30, 70)]);

        assert_eq!(result.unwrap_err(), TopologyError::ChainedTransition(sq(30)));
    }

    #[test]
    fn test_two_links_cannot_share_landing() {
        let result = BoardTopology::new(vec![snake(60, 30), snake(50, 30)], vec![]);

        assert_eq!(result.unwrap_err(), TopologyError::SharedLanding(sq(30)));
    }

    #[test]
    fn test_finish_cannot_start_a_snake() {
        let result = BoardTopology::new(vec![snake(100, 1)], vec![]);

        assert_eq!(result.unwrap_err(), TopologyError::StartsOnFinish);
    }

    #[test]
    fn test_ladder_may_reach_finish() {
        let topology = BoardTopology::new(vec![], vec![ladder(2, 100)]).unwrap();

        assert_eq!(topology.resolve(sq(2)), Square::FINISH);
    }

    #[test]
    fn test_from_yaml_str_parses_table() {
        let yaml = "snakes:\n  - { head: 99, tail: 7 }\nladders:\n  - { base: 2, top: 23 }\n";

        let topology = BoardTopology::from_yaml_str(yaml).unwrap();

        assert_eq!(topology.snakes(), &[snake(99, 7)]);
        assert_eq!(topology.ladders(), &[ladder(2, 23)]);
    }

    #[test]
    fn test_from_yaml_str_rejects_out_of_range_square() {
        let yaml = "snakes:\n  - { head: 140, tail: 7 }\n";

        let result = BoardTopology::from_yaml_str(yaml);

        assert_eq!(result.unwrap_err(), TopologyError::OutOfRange(140));
    }

    #[test]
    fn test_from_yaml_str_rejects_malformed_document() {
        let result = BoardTopology::from_yaml_str("snakes: [ { head: 9 } ]");

        assert!(matches!(result, Err(TopologyError::Parse(_))));
    }

    #[test]
    fn test_from_yaml_str_validates_table() {
        let yaml = "snakes:\n  - { head: 60, tail: 30 }\nladders:\n  - { base: 30, top: 70 }\n";

        let result = BoardTopology::from_yaml_str(yaml);

        assert_eq!(result.unwrap_err(), TopologyError::ChainedTransition(sq(30)));
    }
}
