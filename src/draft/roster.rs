// Per-side roster tracking.

use serde::{Deserialize, Serialize};

use crate::player::PlayerId;

/// One side's roster: the ordered list of player IDs it has drafted.
///
/// Append-only for the duration of a draft. A roster never holds the same
/// ID twice; the engine additionally guarantees no ID appears on both
/// sides' rosters.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Roster {
    ids: Vec<PlayerId>,
}

impl Roster {
    /// An empty roster.
    pub fn new() -> Self {
        Roster::default()
    }

    /// Append a player, in draft order.
    ///
    /// Returns `false` (leaving the roster unchanged) if the ID is already
    /// on this roster.
    pub fn add(&mut self, id: PlayerId) -> bool {
        if self.ids.contains(&id) {
            return false;
        }
        self.ids.push(id);
        true
    }

    /// Whether the roster holds the given player.
    pub fn contains(&self, id: PlayerId) -> bool {
        self.ids.contains(&id)
    }

    /// Drafted player IDs in pick order.
    pub fn ids(&self) -> &[PlayerId] {
        &self.ids
    }

    /// Number of players drafted so far.
    pub fn len(&self) -> usize {
        self.ids.len()
    }

    /// Whether no players have been drafted yet.
    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }
}
