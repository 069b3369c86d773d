// Player records and the shared draft pool.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Stable integer identifier for a player, unique within a pool.
pub type PlayerId = u32;

// ---------------------------------------------------------------------------
// Error type
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PoolError {
    #[error("no player with id {0} in the pool")]
    NotFound(PlayerId),

    #[error("player {0} is already drafted")]
    AlreadyDrafted(PlayerId),

    #[error("duplicate player id {0} while building the pool")]
    DuplicateId(PlayerId),
}

// ---------------------------------------------------------------------------
// Player
// ---------------------------------------------------------------------------

/// A draftable player as supplied by the data collaborator.
///
/// `actual_score` is the ground-truth fantasy score; `predicted_score` is a
/// model estimate and is `None` when no model ran for this session.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    /// Unique, session-stable identifier.
    pub id: PlayerId,
    /// Display name.
    pub name: String,
    /// Team abbreviation (e.g. "LAL").
    pub team: String,
    /// Ground-truth fantasy score.
    pub actual_score: f64,
    /// Model-predicted fantasy score, if a model ran.
    #[serde(default)]
    pub predicted_score: Option<f64>,
    /// Whether the player has been taken in the current draft.
    #[serde(default)]
    pub drafted: bool,
}

impl Player {
    /// Build an undrafted player with no prediction attached.
    pub fn new(id: PlayerId, name: &str, team: &str, actual_score: f64) -> Self {
        Player {
            id,
            name: name.to_string(),
            team: team.to_string(),
            actual_score,
            predicted_score: None,
            drafted: false,
        }
    }

    /// Same, with a predicted score attached.
    pub fn with_prediction(
        id: PlayerId,
        name: &str,
        team: &str,
        actual_score: f64,
        predicted_score: f64,
    ) -> Self {
        Player {
            predicted_score: Some(predicted_score),
            ..Player::new(id, name, team, actual_score)
        }
    }
}

// ---------------------------------------------------------------------------
// PlayerPool
// ---------------------------------------------------------------------------

/// The shared pool of draftable players.
///
/// The set of IDs is fixed at construction; only each player's `drafted`
/// flag mutates afterwards, and only through [`PlayerPool::mark_drafted`].
/// There is exactly one pool per draft, owned by the engine — sides never
/// hold their own copy.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlayerPool {
    players: BTreeMap<PlayerId, Player>,
}

impl PlayerPool {
    /// Build a pool from a player table.
    ///
    /// Fails with [`PoolError::DuplicateId`] if two rows share an ID.
    pub fn new(players: Vec<Player>) -> Result<Self, PoolError> {
        let mut map = BTreeMap::new();
        for player in players {
            let id = player.id;
            if map.insert(id, player).is_some() {
                return Err(PoolError::DuplicateId(id));
            }
        }
        Ok(PlayerPool { players: map })
    }

    /// Look up a player by ID.
    pub fn get(&self, id: PlayerId) -> Result<&Player, PoolError> {
        self.players.get(&id).ok_or(PoolError::NotFound(id))
    }

    /// Whether the pool contains the given ID (drafted or not).
    pub fn contains(&self, id: PlayerId) -> bool {
        self.players.contains_key(&id)
    }

    /// All players not yet drafted, in ascending ID order.
    ///
    /// Callers sort by whichever score field they rank on.
    pub fn undrafted(&self) -> Vec<&Player> {
        self.players.values().filter(|p| !p.drafted).collect()
    }

    /// Number of players in the pool, drafted or not.
    pub fn len(&self) -> usize {
        self.players.len()
    }

    /// Whether the pool is empty.
    pub fn is_empty(&self) -> bool {
        self.players.is_empty()
    }

    /// Number of players still available.
    pub fn undrafted_count(&self) -> usize {
        self.players.values().filter(|p| !p.drafted).count()
    }

    /// Flip a player's `drafted` flag, exactly once.
    ///
    /// Fails with [`PoolError::NotFound`] for an unknown ID and
    /// [`PoolError::AlreadyDrafted`] for a repeat; the pool is unchanged
    /// after either failure.
    pub fn mark_drafted(&mut self, id: PlayerId) -> Result<(), PoolError> {
        let player = self.players.get_mut(&id).ok_or(PoolError::NotFound(id))?;
        if player.drafted {
            return Err(PoolError::AlreadyDrafted(id));
        }
        player.drafted = true;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_pool() -> PlayerPool {
        PlayerPool::new(vec![
            Player::new(1, "Ava Guard", "BOS", 41.0),
            Player::new(2, "Ben Center", "LAL", 38.5),
            Player::new(3, "Cam Forward", "NYK", 44.2),
        ])
        .unwrap()
    }

    #[test]
    fn new_rejects_duplicate_ids() {
        let result = PlayerPool::new(vec![
            Player::new(7, "First", "BOS", 10.0),
            Player::new(7, "Second", "LAL", 20.0),
        ]);
        assert_eq!(result.unwrap_err(), PoolError::DuplicateId(7));
    }

    #[test]
    fn get_known_and_unknown() {
        let pool = sample_pool();
        assert_eq!(pool.get(2).unwrap().name, "Ben Center");
        assert_eq!(pool.get(99).unwrap_err(), PoolError::NotFound(99));
    }

    #[test]
    fn undrafted_shrinks_as_players_are_taken() {
        let mut pool = sample_pool();
        assert_eq!(pool.undrafted().len(), 3);
        pool.mark_drafted(2).unwrap();
        let remaining: Vec<PlayerId> = pool.undrafted().iter().map(|p| p.id).collect();
        assert_eq!(remaining, vec![1, 3]);
        assert_eq!(pool.undrafted_count(), 2);
        assert_eq!(pool.len(), 3);
    }

    #[test]
    fn mark_drafted_twice_fails() {
        let mut pool = sample_pool();
        pool.mark_drafted(1).unwrap();
        assert_eq!(pool.mark_drafted(1).unwrap_err(), PoolError::AlreadyDrafted(1));
        // The failure must not disturb the pool.
        assert_eq!(pool.undrafted_count(), 2);
        assert!(pool.get(1).unwrap().drafted);
    }

    #[test]
    fn mark_drafted_unknown_id_fails_without_change() {
        let mut pool = sample_pool();
        assert_eq!(pool.mark_drafted(42).unwrap_err(), PoolError::NotFound(42));
        assert_eq!(pool.undrafted_count(), 3);
    }

    #[test]
    fn with_prediction_attaches_score() {
        let p = Player::with_prediction(5, "Dee Wing", "MIA", 30.0, 33.3);
        assert_eq!(p.predicted_score, Some(33.3));
        assert!(!p.drafted);
    }
}
