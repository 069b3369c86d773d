// AI pick strategies over the undrafted player pool.

use std::cmp::Ordering;
use std::str::FromStr;

use rand::rngs::ThreadRng;
use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::warn;

use crate::player::{Player, PlayerId};

/// Number of candidates the hard AI samples from, matching the product's
/// "top five sleepers" behavior.
pub const DEFAULT_TOP_K: usize = 5;

// ---------------------------------------------------------------------------
// Error type
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StrategyError {
    /// A strategy was invoked on an empty undrafted slice. The engine never
    /// schedules a pick against an exhausted pool, so seeing this means the
    /// caller broke that contract.
    #[error("cannot pick from an empty player pool")]
    EmptyPool,
}

// ---------------------------------------------------------------------------
// Strategy interface
// ---------------------------------------------------------------------------

/// A policy that selects one player from the undrafted pool.
///
/// All strategies share one degradation rule: when no undrafted player
/// carries a predicted score (the model collaborator never ran), they fall
/// back to the greedy-by-actual-score rule and say so at warn level.
/// Zero-valued predictions are ordinary data and never trigger the fallback.
pub trait AiStrategy {
    /// Short name for logs and diagnostics.
    fn name(&self) -> &'static str;

    /// Select one player ID from `undrafted`.
    fn pick(&mut self, undrafted: &[&Player]) -> Result<PlayerId, StrategyError>;
}

/// The greedy-by-actual-score rule shared by [`GreedyActual`] and every
/// fallback path: maximum `actual_score`, ties broken by lowest ID.
pub(crate) fn greedy_actual_choice(undrafted: &[&Player]) -> Result<PlayerId, StrategyError> {
    undrafted
        .iter()
        .max_by(|a, b| {
            a.actual_score
                .partial_cmp(&b.actual_score)
                .unwrap_or(Ordering::Equal)
                // On equal scores prefer the lower ID, so reverse the ID order.
                .then_with(|| b.id.cmp(&a.id))
        })
        .map(|p| p.id)
        .ok_or(StrategyError::EmptyPool)
}

/// Rank the players that carry a predicted score, best first, ties broken
/// by lowest ID. Empty when predictions are structurally absent.
fn ranked_by_prediction<'a>(undrafted: &[&'a Player]) -> Vec<&'a Player> {
    let mut ranked: Vec<&Player> = undrafted
        .iter()
        .copied()
        .filter(|p| p.predicted_score.is_some())
        .collect();
    ranked.sort_by(|a, b| {
        b.predicted_score
            .partial_cmp(&a.predicted_score)
            .unwrap_or(Ordering::Equal)
            .then_with(|| a.id.cmp(&b.id))
    });
    ranked
}

// ---------------------------------------------------------------------------
// Easy: greedy on actual score
// ---------------------------------------------------------------------------

/// Always takes the best player by ground-truth score.
#[derive(Debug, Clone, Copy, Default)]
pub struct GreedyActual;

impl AiStrategy for GreedyActual {
    fn name(&self) -> &'static str {
        "greedy-actual"
    }

    fn pick(&mut self, undrafted: &[&Player]) -> Result<PlayerId, StrategyError> {
        greedy_actual_choice(undrafted)
    }
}

// ---------------------------------------------------------------------------
// Medium: greedy on predicted score
// ---------------------------------------------------------------------------

/// Takes the best player by model-predicted score.
#[derive(Debug, Clone, Copy, Default)]
pub struct GreedyPredicted;

impl AiStrategy for GreedyPredicted {
    fn name(&self) -> &'static str {
        "greedy-predicted"
    }

    fn pick(&mut self, undrafted: &[&Player]) -> Result<PlayerId, StrategyError> {
        if undrafted.is_empty() {
            return Err(StrategyError::EmptyPool);
        }
        let ranked = ranked_by_prediction(undrafted);
        match ranked.first() {
            Some(best) => Ok(best.id),
            None => {
                warn!(
                    strategy = self.name(),
                    "no predicted scores available, falling back to greedy-actual"
                );
                greedy_actual_choice(undrafted)
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Hard: uniform pick among the top-k predicted
// ---------------------------------------------------------------------------

/// Ranks by predicted score and picks uniformly among the top
/// `min(k, pool size)` candidates, so the hard AI occasionally reaches for
/// a sleeper instead of the consensus best player.
#[derive(Debug, Clone)]
pub struct TopKRandom<R: Rng = ThreadRng> {
    k: usize,
    rng: R,
}

impl TopKRandom<ThreadRng> {
    /// A top-k sampler seeded from the thread-local generator.
    pub fn new(k: usize) -> Self {
        TopKRandom {
            k,
            rng: rand::thread_rng(),
        }
    }
}

impl Default for TopKRandom<ThreadRng> {
    fn default() -> Self {
        TopKRandom::new(DEFAULT_TOP_K)
    }
}

impl<R: Rng> TopKRandom<R> {
    /// A top-k sampler over a caller-supplied generator, for deterministic
    /// tests.
    pub fn with_rng(k: usize, rng: R) -> Self {
        TopKRandom { k, rng }
    }
}

impl<R: Rng> AiStrategy for TopKRandom<R> {
    fn name(&self) -> &'static str {
        "top-k-random"
    }

    fn pick(&mut self, undrafted: &[&Player]) -> Result<PlayerId, StrategyError> {
        if undrafted.is_empty() {
            return Err(StrategyError::EmptyPool);
        }
        let ranked = ranked_by_prediction(undrafted);
        if ranked.is_empty() {
            warn!(
                strategy = self.name(),
                "no predicted scores available, falling back to greedy-actual"
            );
            return greedy_actual_choice(undrafted);
        }
        let window = ranked.len().min(self.k.max(1));
        let candidates = &ranked[..window];
        // Non-empty by construction, but keep the error path rather than
        // an unwrap.
        candidates
            .choose(&mut self.rng)
            .map(|p| p.id)
            .ok_or(StrategyError::EmptyPool)
    }
}

// ---------------------------------------------------------------------------
// Difficulty mapping
// ---------------------------------------------------------------------------

/// Game difficulty, selecting which strategy drives the AI side.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
}

impl Difficulty {
    /// Build the strategy this difficulty plays with. `top_k` only affects
    /// [`Difficulty::Hard`].
    pub fn strategy(&self, top_k: usize) -> Box<dyn AiStrategy> {
        match self {
            Difficulty::Easy => Box::new(GreedyActual),
            Difficulty::Medium => Box::new(GreedyPredicted),
            Difficulty::Hard => Box::new(TopKRandom::new(top_k)),
        }
    }
}

impl FromStr for Difficulty {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "easy" => Ok(Difficulty::Easy),
            "medium" => Ok(Difficulty::Medium),
            "hard" => Ok(Difficulty::Hard),
            other => Err(format!("unknown difficulty: {other}")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::player::Player;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use std::collections::HashSet;

    fn players_with_predictions() -> Vec<Player> {
        vec![
            Player::with_prediction(1, "One", "BOS", 10.0, 12.0),
            Player::with_prediction(2, "Two", "LAL", 30.0, 8.0),
            Player::with_prediction(3, "Three", "NYK", 20.0, 25.0),
            Player::with_prediction(4, "Four", "MIA", 25.0, 18.0),
            Player::with_prediction(5, "Five", "DEN", 15.0, 22.0),
            Player::with_prediction(6, "Six", "PHX", 12.0, 21.0),
            Player::with_prediction(7, "Seven", "DAL", 8.0, 5.0),
            Player::with_prediction(8, "Eight", "CHI", 5.0, 3.0),
        ]
    }

    fn players_without_predictions() -> Vec<Player> {
        vec![
            Player::new(1, "One", "BOS", 10.0),
            Player::new(2, "Two", "LAL", 30.0),
            Player::new(3, "Three", "NYK", 20.0),
        ]
    }

    fn refs(players: &[Player]) -> Vec<&Player> {
        players.iter().collect()
    }

    #[test]
    fn greedy_actual_takes_maximum() {
        let players = players_without_predictions();
        let mut strategy = GreedyActual;
        assert_eq!(strategy.pick(&refs(&players)).unwrap(), 2);
    }

    #[test]
    fn greedy_actual_breaks_ties_by_lowest_id() {
        let players = vec![
            Player::new(9, "Late", "BOS", 50.0),
            Player::new(4, "Early", "LAL", 50.0),
            Player::new(7, "Mid", "NYK", 10.0),
        ];
        let mut strategy = GreedyActual;
        assert_eq!(strategy.pick(&refs(&players)).unwrap(), 4);
    }

    #[test]
    fn greedy_actual_empty_pool_errors() {
        let mut strategy = GreedyActual;
        assert_eq!(strategy.pick(&[]).unwrap_err(), StrategyError::EmptyPool);
    }

    #[test]
    fn greedy_predicted_ranks_on_predictions() {
        let players = players_with_predictions();
        let mut strategy = GreedyPredicted;
        // Highest predicted is player 3 (25.0), not the actual-score leader 2.
        assert_eq!(strategy.pick(&refs(&players)).unwrap(), 3);
    }

    #[test]
    fn greedy_predicted_falls_back_without_predictions() {
        let players = players_without_predictions();
        let mut strategy = GreedyPredicted;
        // Degrades to the greedy-actual rule: player 2 at 30.0.
        assert_eq!(strategy.pick(&refs(&players)).unwrap(), 2);
    }

    #[test]
    fn greedy_predicted_zero_predictions_are_not_missing() {
        let players = vec![
            Player::with_prediction(1, "Zero", "BOS", 40.0, 0.0),
            Player::with_prediction(2, "Tiny", "LAL", 1.0, 0.5),
        ];
        let mut strategy = GreedyPredicted;
        // 0.5 beats 0.0; no fallback to actual scores.
        assert_eq!(strategy.pick(&refs(&players)).unwrap(), 2);
    }

    #[test]
    fn top_k_random_stays_inside_the_window() {
        let players = players_with_predictions();
        let player_refs = refs(&players);
        // Top five by predicted score: 3 (25), 5 (22), 6 (21), 4 (18), 1 (12).
        let window: HashSet<PlayerId> = [3, 5, 6, 4, 1].into_iter().collect();

        let mut strategy = TopKRandom::with_rng(5, StdRng::seed_from_u64(42));
        let mut seen = HashSet::new();
        for _ in 0..1000 {
            let id = strategy.pick(&player_refs).unwrap();
            assert!(window.contains(&id), "pick {} outside the top-5 window", id);
            seen.insert(id);
        }
        // Uniform sampling over five candidates must not collapse onto one.
        assert!(seen.len() > 1, "sampler degenerated to a single choice");
    }

    #[test]
    fn top_k_random_window_clamps_to_pool_size() {
        let players = vec![
            Player::with_prediction(1, "One", "BOS", 10.0, 12.0),
            Player::with_prediction(2, "Two", "LAL", 30.0, 8.0),
        ];
        let player_refs = refs(&players);
        let mut strategy = TopKRandom::with_rng(5, StdRng::seed_from_u64(7));
        for _ in 0..50 {
            let id = strategy.pick(&player_refs).unwrap();
            assert!(id == 1 || id == 2);
        }
    }

    #[test]
    fn top_k_random_falls_back_without_predictions() {
        let players = players_without_predictions();
        let mut strategy = TopKRandom::with_rng(5, StdRng::seed_from_u64(3));
        assert_eq!(strategy.pick(&refs(&players)).unwrap(), 2);
    }

    #[test]
    fn top_k_random_empty_pool_errors() {
        let mut strategy = TopKRandom::with_rng(5, StdRng::seed_from_u64(3));
        assert_eq!(strategy.pick(&[]).unwrap_err(), StrategyError::EmptyPool);
    }

    #[test]
    fn difficulty_parse_and_map() {
        assert_eq!("easy".parse::<Difficulty>().unwrap(), Difficulty::Easy);
        assert_eq!("MEDIUM".parse::<Difficulty>().unwrap(), Difficulty::Medium);
        assert_eq!("Hard".parse::<Difficulty>().unwrap(), Difficulty::Hard);
        assert!("brutal".parse::<Difficulty>().is_err());

        assert_eq!(Difficulty::Easy.strategy(5).name(), "greedy-actual");
        assert_eq!(Difficulty::Medium.strategy(5).name(), "greedy-predicted");
        assert_eq!(Difficulty::Hard.strategy(5).name(), "top-k-random");
    }
}
