// Snake-draft turn math.

use std::fmt;

use serde::{Deserialize, Serialize};

/// One of the two drafting parties.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Side {
    Human,
    Ai,
}

impl Side {
    /// The other party.
    pub fn opponent(&self) -> Side {
        match self {
            Side::Human => Side::Ai,
            Side::Ai => Side::Human,
        }
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Side::Human => write!(f, "Human"),
            Side::Ai => write!(f, "AI"),
        }
    }
}

/// Whether the human picks at `pick_index` (0-based) under snake ordering.
///
/// Picks pair up into rounds of two, one pick per side, and the side that
/// leads alternates every round. With the human picking first the order for
/// indices 0..=9 is H,A,A,H,H,A,A,H,H,A; with the AI first it is the exact
/// complement.
pub fn is_human_turn(pick_index: usize, human_picks_first: bool) -> bool {
    let round = pick_index / 2;
    let leads_round = round % 2 == 0;
    let first_slot = pick_index % 2 == 0;
    // The first-picking side takes the lead slot of even rounds and the
    // trailing slot of odd rounds.
    human_picks_first == (leads_round == first_slot)
}

/// Which side picks at `pick_index`, given who picks first.
pub fn side_to_pick(pick_index: usize, first: Side) -> Side {
    if is_human_turn(pick_index, first == Side::Human) {
        Side::Human
    } else {
        Side::Ai
    }
}
