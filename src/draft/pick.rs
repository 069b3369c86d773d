// Individual pick records.

use serde::{Deserialize, Serialize};

use crate::player::PlayerId;

use super::turn::Side;

/// A single completed draft pick.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DraftPick {
    /// Sequential pick number (1-indexed, as announced to the host).
    pub pick_number: u32,
    /// The side that made the pick.
    pub side: Side,
    /// ID of the drafted player.
    pub player_id: PlayerId,
    /// Display name of the drafted player.
    pub player_name: String,
    /// Set when the engine discarded an invalid AI selection and substituted
    /// the greedy-by-actual-score choice instead. Hosts and tests use this
    /// to observe the self-healing path.
    #[serde(default)]
    pub forced_fallback: bool,
}
