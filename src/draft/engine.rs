// Draft orchestration: validated setup, turn dispatch, pick recording.

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{info, warn};

use crate::player::{Player, PlayerId, PlayerPool};
use crate::strategy::{greedy_actual_choice, AiStrategy};

use super::pick::DraftPick;
use super::roster::Roster;
use super::turn::{side_to_pick, Side};

// ---------------------------------------------------------------------------
// Error types
// ---------------------------------------------------------------------------

/// Fatal draft errors. Everything recoverable (an illegal human pick, an
/// invalid AI selection) is handled without surfacing here.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DraftError {
    /// Both sides must receive the same number of picks under the snake
    /// rule, so the total has to be an even number of at least 2.
    #[error("total_picks must be even and at least 2, got {0}")]
    InvalidTotalPicks(usize),

    #[error("pool holds {available} undrafted players but the draft needs {needed}")]
    PoolTooSmall { available: usize, needed: usize },

    #[error("the draft is already complete")]
    AlreadyComplete,

    #[error("it is the {0}'s turn to pick")]
    OutOfTurn(Side),

    /// A scheduled pick found no players left. The construction-time pool
    /// check makes this unreachable in a well-formed draft.
    #[error("scheduled pick found an empty pool")]
    EmptyPool,
}

/// Why a human pick was refused. Rejection never mutates draft state, so
/// the host re-prompts and retries with the same pick still pending.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PickRejection {
    #[error("it is not the human's turn")]
    NotYourTurn,

    #[error("no player with id {0} exists")]
    UnknownPlayer(PlayerId),

    #[error("player {0} is already drafted")]
    AlreadyDrafted(PlayerId),

    #[error("the draft is already complete")]
    DraftComplete,
}

// ---------------------------------------------------------------------------
// Human pick provider
// ---------------------------------------------------------------------------

/// Supplies the human side's choice of player ID given the players still
/// available. A CLI host backs this with a blocking prompt; a reactive host
/// with stored pending-selection state. The provider is re-invoked until it
/// supplies a legal ID; rejections consume no pick.
pub trait PickProvider {
    fn choose(&mut self, undrafted: &[&Player]) -> PlayerId;
}

impl<F: FnMut(&[&Player]) -> PlayerId> PickProvider for F {
    fn choose(&mut self, undrafted: &[&Player]) -> PlayerId {
        self(undrafted)
    }
}

// ---------------------------------------------------------------------------
// DraftState
// ---------------------------------------------------------------------------

/// The complete state of one draft.
///
/// Owns the player pool for the draft's duration and advances one pick at a
/// time. The state is serializable so a request/response host can store it
/// per session between `advance_*` calls; such a host must serialize access
/// to a given instance, as the core assumes at most one in-flight pick.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DraftState {
    pool: PlayerPool,
    total_picks: usize,
    human_picks_first: bool,
    /// Index of the next pick to be made (0-based).
    pick_index: usize,
    human_roster: Roster,
    ai_roster: Roster,
    /// All completed picks in order.
    picks: Vec<DraftPick>,
    /// How many AI picks were forcibly replaced with the greedy choice.
    forced_substitutions: u32,
}

impl DraftState {
    /// Start a draft.
    ///
    /// Fails with [`DraftError::InvalidTotalPicks`] unless `total_picks` is
    /// even and at least 2, and with [`DraftError::PoolTooSmall`] when the
    /// pool cannot cover every scheduled pick. Both checks run before any
    /// pick, so a legitimately scheduled pick never sees an empty pool.
    pub fn new(
        pool: PlayerPool,
        total_picks: usize,
        human_picks_first: bool,
    ) -> Result<Self, DraftError> {
        if total_picks < 2 || total_picks % 2 != 0 {
            return Err(DraftError::InvalidTotalPicks(total_picks));
        }
        let available = pool.undrafted_count();
        if available < total_picks {
            return Err(DraftError::PoolTooSmall {
                available,
                needed: total_picks,
            });
        }
        info!(
            total_picks,
            human_picks_first, "draft started with {} available players", available
        );
        Ok(DraftState {
            pool,
            total_picks,
            human_picks_first,
            pick_index: 0,
            human_roster: Roster::new(),
            ai_roster: Roster::new(),
            picks: Vec::new(),
            forced_substitutions: 0,
        })
    }

    /// The side that drafts first.
    pub fn first_picker(&self) -> Side {
        if self.human_picks_first {
            Side::Human
        } else {
            Side::Ai
        }
    }

    /// Whether all scheduled picks have been made.
    pub fn is_complete(&self) -> bool {
        self.pick_index >= self.total_picks
    }

    /// The side due to pick next, or `None` once the draft is complete.
    pub fn side_to_pick(&self) -> Option<Side> {
        if self.is_complete() {
            None
        } else {
            Some(side_to_pick(self.pick_index, self.first_picker()))
        }
    }

    /// Index of the next pick (0-based).
    pub fn pick_index(&self) -> usize {
        self.pick_index
    }

    /// Total number of picks in this draft.
    pub fn total_picks(&self) -> usize {
        self.total_picks
    }

    /// The shared player pool.
    pub fn pool(&self) -> &PlayerPool {
        &self.pool
    }

    /// The human side's roster.
    pub fn human_roster(&self) -> &Roster {
        &self.human_roster
    }

    /// The AI side's roster.
    pub fn ai_roster(&self) -> &Roster {
        &self.ai_roster
    }

    /// All completed picks in draft order.
    pub fn picks(&self) -> &[DraftPick] {
        &self.picks
    }

    /// How many times an invalid AI selection was replaced with the greedy
    /// choice. Diagnostic counterpart of [`DraftPick::forced_fallback`].
    pub fn forced_substitutions(&self) -> u32 {
        self.forced_substitutions
    }

    /// Consume the state, yielding the two rosters in (human, AI) order.
    pub fn into_rosters(self) -> (Roster, Roster) {
        (self.human_roster, self.ai_roster)
    }

    /// Apply the human side's pick.
    ///
    /// Rejects without mutating state when it is not the human's turn, the
    /// ID is unknown, or the player is already taken; the host re-prompts
    /// and retries. A retry after rejection sees the identical state.
    pub fn advance_human(&mut self, id: PlayerId) -> Result<DraftPick, PickRejection> {
        if self.is_complete() {
            return Err(PickRejection::DraftComplete);
        }
        if self.side_to_pick() != Some(Side::Human) {
            return Err(PickRejection::NotYourTurn);
        }
        let player = match self.pool.get(id) {
            Ok(p) => p,
            Err(_) => return Err(PickRejection::UnknownPlayer(id)),
        };
        if player.drafted {
            return Err(PickRejection::AlreadyDrafted(id));
        }
        Ok(self.record_pick(Side::Human, id, false))
    }

    /// Apply the AI side's pick using the supplied strategy.
    ///
    /// If the strategy produces an ID that is unknown or already drafted
    /// (a buggy strategy, not a draft-ending event), the engine substitutes
    /// the greedy-by-actual-score choice, flags the pick as a forced
    /// fallback, and continues.
    pub fn advance_ai(&mut self, strategy: &mut dyn AiStrategy) -> Result<DraftPick, DraftError> {
        if self.is_complete() {
            return Err(DraftError::AlreadyComplete);
        }
        if self.side_to_pick() != Some(Side::Ai) {
            return Err(DraftError::OutOfTurn(Side::Human));
        }

        let (choice, fallback_choice) = {
            let undrafted = self.pool.undrafted();
            if undrafted.is_empty() {
                return Err(DraftError::EmptyPool);
            }
            // The fallback is always computable here since undrafted is
            // non-empty.
            let fallback = greedy_actual_choice(&undrafted).map_err(|_| DraftError::EmptyPool)?;
            (strategy.pick(&undrafted), fallback)
        };

        let (id, forced) = match choice {
            Ok(id) if self.pool.get(id).map(|p| !p.drafted).unwrap_or(false) => (id, false),
            Ok(bad_id) => {
                warn!(
                    strategy = strategy.name(),
                    bad_id, "AI strategy returned an invalid pick, substituting greedy choice"
                );
                (fallback_choice, true)
            }
            Err(e) => {
                warn!(
                    strategy = strategy.name(),
                    error = %e,
                    "AI strategy failed, substituting greedy choice"
                );
                (fallback_choice, true)
            }
        };

        if forced {
            self.forced_substitutions += 1;
        }
        Ok(self.record_pick(Side::Ai, id, forced))
    }

    /// Record a validated pick: mark the player drafted, append to the
    /// side's roster, and log it. Callers have already established that the
    /// ID is present and undrafted.
    fn record_pick(&mut self, side: Side, id: PlayerId, forced: bool) -> DraftPick {
        let player_name = self
            .pool
            .get(id)
            .map(|p| p.name.clone())
            .unwrap_or_default();
        // Cannot fail: the ID was just validated as present and undrafted.
        let _ = self.pool.mark_drafted(id);
        let roster = match side {
            Side::Human => &mut self.human_roster,
            Side::Ai => &mut self.ai_roster,
        };
        let added = roster.add(id);
        debug_assert!(added, "player {} already on the {} roster", id, side);

        let pick = DraftPick {
            pick_number: (self.pick_index + 1) as u32,
            side,
            player_id: id,
            player_name,
            forced_fallback: forced,
        };
        info!(
            pick = pick.pick_number,
            of = self.total_picks,
            side = %side,
            player = %pick.player_name,
            forced,
            "pick recorded"
        );
        self.pick_index += 1;
        self.picks.push(pick.clone());
        pick
    }
}

// ---------------------------------------------------------------------------
// Blocking driver
// ---------------------------------------------------------------------------

/// Run a complete draft as a blocking loop, the CLI-host form of the engine.
///
/// Human turns re-invoke `provider` until it supplies a legal ID; AI turns
/// go through the same self-healing path as [`DraftState::advance_ai`].
/// Returns the completed state, from which the host reads both rosters and
/// the pick history.
pub fn run_draft(
    pool: PlayerPool,
    total_picks: usize,
    human_picks_first: bool,
    provider: &mut impl PickProvider,
    strategy: &mut dyn AiStrategy,
) -> Result<DraftState, DraftError> {
    let mut state = DraftState::new(pool, total_picks, human_picks_first)?;

    while let Some(side) = state.side_to_pick() {
        match side {
            Side::Human => loop {
                let choice = {
                    let undrafted = state.pool.undrafted();
                    provider.choose(&undrafted)
                };
                match state.advance_human(choice) {
                    Ok(_) => break,
                    Err(rejection) => {
                        warn!(%rejection, "human pick rejected, asking again");
                    }
                }
            },
            Side::Ai => {
                state.advance_ai(strategy)?;
            }
        }
    }
    info!(
        human = state.human_roster.len(),
        ai = state.ai_roster.len(),
        "draft complete"
    );
    Ok(state)
}
