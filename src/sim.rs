// Match simulation: summed roster scores and the winner declaration.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::draft::roster::Roster;
use crate::draft::turn::Side;
use crate::player::{Player, PlayerPool, PoolError};

/// Which score column drives the match.
///
/// Hosts keep this consistent with whichever field drove the draft; the
/// simulator itself has no opinion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScoreField {
    /// Ground-truth fantasy scores.
    Actual,
    /// Model-predicted scores; players the model never scored fall back to
    /// their actual score, as the prediction column is backfilled that way
    /// when no model runs.
    Predicted,
}

impl ScoreField {
    /// Read this field from a player.
    pub fn score_of(&self, player: &Player) -> f64 {
        match self {
            ScoreField::Actual => player.actual_score,
            ScoreField::Predicted => player.predicted_score.unwrap_or(player.actual_score),
        }
    }
}

impl fmt::Display for ScoreField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ScoreField::Actual => write!(f, "actual"),
            ScoreField::Predicted => write!(f, "predicted"),
        }
    }
}

/// Who won the match.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Winner {
    Human,
    Ai,
    Draw,
}

impl From<Side> for Winner {
    fn from(side: Side) -> Self {
        match side {
            Side::Human => Winner::Human,
            Side::Ai => Winner::Ai,
        }
    }
}

/// The outcome of a simulated match. Created once, never mutated.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MatchResult {
    pub human_score: f64,
    pub ai_score: f64,
    /// The score column the totals were summed over.
    pub score_field: ScoreField,
    pub winner: Winner,
}

/// Sum each roster over `field` and compare strictly.
///
/// Mutates nothing; fails with [`PoolError::NotFound`] if a roster carries
/// an ID the pool does not know.
pub fn simulate(
    human: &Roster,
    ai: &Roster,
    pool: &PlayerPool,
    field: ScoreField,
) -> Result<MatchResult, PoolError> {
    let human_score = roster_total(human, pool, field)?;
    let ai_score = roster_total(ai, pool, field)?;

    let winner = if human_score > ai_score {
        Winner::Human
    } else if human_score < ai_score {
        Winner::Ai
    } else {
        Winner::Draw
    };

    Ok(MatchResult {
        human_score,
        ai_score,
        score_field: field,
        winner,
    })
}

fn roster_total(roster: &Roster, pool: &PlayerPool, field: ScoreField) -> Result<f64, PoolError> {
    let mut total = 0.0;
    for &id in roster.ids() {
        total += field.score_of(pool.get(id)?);
    }
    Ok(total)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pool_and_rosters(
        human_scores: &[f64],
        ai_scores: &[f64],
    ) -> (PlayerPool, Roster, Roster) {
        let mut players = Vec::new();
        let mut human = Roster::new();
        let mut ai = Roster::new();
        let mut next_id = 1;
        for &score in human_scores {
            players.push(Player::new(next_id, &format!("H{next_id}"), "BOS", score));
            human.add(next_id);
            next_id += 1;
        }
        for &score in ai_scores {
            players.push(Player::new(next_id, &format!("A{next_id}"), "LAL", score));
            ai.add(next_id);
            next_id += 1;
        }
        (PlayerPool::new(players).unwrap(), human, ai)
    }

    #[test]
    fn human_wins_on_higher_total() {
        let (pool, human, ai) = pool_and_rosters(&[10.0, 20.0], &[15.0, 10.0]);
        let result = simulate(&human, &ai, &pool, ScoreField::Actual).unwrap();
        assert_eq!(result.human_score, 30.0);
        assert_eq!(result.ai_score, 25.0);
        assert_eq!(result.winner, Winner::Human);
        assert_eq!(result.score_field, ScoreField::Actual);
    }

    #[test]
    fn ai_wins_on_higher_total() {
        let (pool, human, ai) = pool_and_rosters(&[5.0, 5.0], &[20.0, 2.0]);
        let result = simulate(&human, &ai, &pool, ScoreField::Actual).unwrap();
        assert_eq!(result.winner, Winner::Ai);
    }

    #[test]
    fn equal_totals_are_a_draw() {
        let (pool, human, ai) = pool_and_rosters(&[10.0, 15.0], &[12.0, 13.0]);
        let result = simulate(&human, &ai, &pool, ScoreField::Actual).unwrap();
        assert_eq!(result.human_score, 25.0);
        assert_eq!(result.ai_score, 25.0);
        assert_eq!(result.winner, Winner::Draw);
    }

    #[test]
    fn predicted_field_backfills_with_actual() {
        let players = vec![
            Player::with_prediction(1, "Modeled", "BOS", 10.0, 18.0),
            Player::new(2, "Unmodeled", "LAL", 7.0),
        ];
        let pool = PlayerPool::new(players).unwrap();
        let mut human = Roster::new();
        human.add(1);
        human.add(2);
        let ai = Roster::new();
        let result = simulate(&human, &ai, &pool, ScoreField::Predicted).unwrap();
        // 18.0 predicted + 7.0 backfilled actual.
        assert_eq!(result.human_score, 25.0);
        assert_eq!(result.winner, Winner::Human);
    }

    #[test]
    fn unknown_roster_id_is_an_error() {
        let (pool, mut human, ai) = pool_and_rosters(&[10.0], &[10.0]);
        human.add(777);
        assert_eq!(
            simulate(&human, &ai, &pool, ScoreField::Actual).unwrap_err(),
            PoolError::NotFound(777)
        );
    }

    #[test]
    fn simulate_does_not_mutate() {
        let (pool, human, ai) = pool_and_rosters(&[10.0, 20.0], &[15.0, 10.0]);
        let before = pool.undrafted_count();
        let _ = simulate(&human, &ai, &pool, ScoreField::Actual).unwrap();
        assert_eq!(pool.undrafted_count(), before);
        assert_eq!(human.len(), 2);
        assert_eq!(ai.len(), 2);
    }
}
