// Rock-paper-scissors resolution for first pick.

use std::fmt;
use std::str::FromStr;

use rand::rngs::ThreadRng;
use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, info};

use crate::draft::turn::Side;

// ---------------------------------------------------------------------------
// Weapons and the beats relation
// ---------------------------------------------------------------------------

/// A rock-paper-scissors throw.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Weapon {
    Rock,
    Paper,
    Scissors,
}

/// The three throws, for enumeration and random selection.
pub const ALL_WEAPONS: [Weapon; 3] = [Weapon::Rock, Weapon::Paper, Weapon::Scissors];

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid choice: {0:?} (expected rock, paper, or scissors)")]
pub struct InvalidWeaponError(pub String);

impl Weapon {
    /// Whether this throw beats `other` under the standard relation:
    /// rock beats scissors, scissors beats paper, paper beats rock.
    pub fn beats(&self, other: Weapon) -> bool {
        matches!(
            (self, other),
            (Weapon::Rock, Weapon::Scissors)
                | (Weapon::Scissors, Weapon::Paper)
                | (Weapon::Paper, Weapon::Rock)
        )
    }
}

impl FromStr for Weapon {
    type Err = InvalidWeaponError;

    /// Parse a throw, case-insensitively. Anything outside the three-symbol
    /// set is rejected so the host can re-prompt without consuming a round.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "rock" => Ok(Weapon::Rock),
            "paper" => Ok(Weapon::Paper),
            "scissors" => Ok(Weapon::Scissors),
            _ => Err(InvalidWeaponError(s.to_string())),
        }
    }
}

impl fmt::Display for Weapon {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Weapon::Rock => write!(f, "rock"),
            Weapon::Paper => write!(f, "paper"),
            Weapon::Scissors => write!(f, "scissors"),
        }
    }
}

// ---------------------------------------------------------------------------
// Single round
// ---------------------------------------------------------------------------

/// Outcome of one rock-paper-scissors round.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RoundOutcome {
    HumanWins,
    AiWins,
    /// Same throw on both sides; the round does not count and is replayed.
    Tie,
}

/// Apply the beats relation to one round.
pub fn play_round(human: Weapon, ai: Weapon) -> RoundOutcome {
    if human == ai {
        RoundOutcome::Tie
    } else if human.beats(ai) {
        RoundOutcome::HumanWins
    } else {
        RoundOutcome::AiWins
    }
}

// ---------------------------------------------------------------------------
// Move sources and the resolver loop
// ---------------------------------------------------------------------------

/// Supplies one throw per round. The host's prompt loop (or a scripted
/// sequence in tests) sits behind this; parse failures are handled before
/// the throw reaches the resolver, so a round is only ever played with two
/// valid weapons.
pub trait MoveSource {
    fn next_move(&mut self) -> Weapon;
}

impl<F: FnMut() -> Weapon> MoveSource for F {
    fn next_move(&mut self) -> Weapon {
        self()
    }
}

/// Uniform random throws, the AI side of the protocol.
#[derive(Debug, Clone)]
pub struct RandomMoveSource<R: Rng = ThreadRng> {
    rng: R,
}

impl RandomMoveSource<ThreadRng> {
    pub fn new() -> Self {
        RandomMoveSource {
            rng: rand::thread_rng(),
        }
    }
}

impl Default for RandomMoveSource<ThreadRng> {
    fn default() -> Self {
        RandomMoveSource::new()
    }
}

impl<R: Rng> RandomMoveSource<R> {
    /// Random throws over a caller-supplied generator, for deterministic
    /// tests.
    pub fn with_rng(rng: R) -> Self {
        RandomMoveSource { rng }
    }
}

impl<R: Rng> MoveSource for RandomMoveSource<R> {
    fn next_move(&mut self) -> Weapon {
        // ALL_WEAPONS is non-empty, so choose cannot return None.
        *ALL_WEAPONS.choose(&mut self.rng).unwrap_or(&Weapon::Rock)
    }
}

/// Play rounds until the tie is broken and return the side that drafts
/// first. Ties replay indefinitely; with any non-degenerate source the loop
/// terminates almost surely.
pub fn resolve(human: &mut impl MoveSource, ai: &mut impl MoveSource) -> Side {
    loop {
        let human_move = human.next_move();
        let ai_move = ai.next_move();
        let outcome = play_round(human_move, ai_move);
        debug!(%human_move, %ai_move, ?outcome, "first-pick round");
        match outcome {
            RoundOutcome::HumanWins => {
                info!("human wins first pick ({human_move} beats {ai_move})");
                return Side::Human;
            }
            RoundOutcome::AiWins => {
                info!("AI wins first pick ({ai_move} beats {human_move})");
                return Side::Ai;
            }
            RoundOutcome::Tie => continue,
        }
    }
}
