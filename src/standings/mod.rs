//! Standings simulation.
//!
//! Applies a hypothetical match to a points table and ranks the result.
//! Every operation borrows its input table; simulated tables are fresh copies.

use tracing::trace;

use crate::models::{StandingsError, StandingsTable};

/// Figures from one hypothetical match, from `team`'s point of view.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatchOutcome<'a> {
    pub team: &'a str,
    pub opponent: &'a str,
    pub team_won: bool,
    pub runs_for: u32,
    pub balls_faced: u32,
    pub runs_against: u32,
    pub balls_bowled: u32,
}

impl<'a> MatchOutcome<'a> {
    /// `team` beats `opponent`.
    pub fn win(team: &'a str, opponent: &'a str) -> Self {
        Self {
            team,
            opponent,
            team_won: true,
            runs_for: 0,
            balls_faced: 0,
            runs_against: 0,
            balls_bowled: 0,
        }
    }

    /// `team` loses to `opponent`.
    pub fn loss(team: &'a str, opponent: &'a str) -> Self {
        Self {
            team_won: false,
            ..Self::win(team, opponent)
        }
    }

    /// Builder method for `team`'s innings.
    pub fn batting(mut self, runs: u32, balls: u32) -> Self {
        self.runs_for = runs;
        self.balls_faced = balls;
        self
    }

    /// Builder method for the opponent's innings.
    pub fn bowling(mut self, runs: u32, balls: u32) -> Self {
        self.runs_against = runs;
        self.balls_bowled = balls;
        self
    }
}

fn require_team(table: &StandingsTable, name: &str) -> Result<(), StandingsError> {
    if table.contains(name) {
        Ok(())
    } else {
        Err(StandingsError::NotFound(name.to_string()))
    }
}

/// Return a copy of `table` with `outcome` applied to both teams.
///
/// The opponent's figures are the mirror image of the team's.
pub fn simulate_match(
    table: &StandingsTable,
    outcome: &MatchOutcome<'_>,
) -> Result<StandingsTable, StandingsError> {
    require_team(table, outcome.team)?;
    require_team(table, outcome.opponent)?;
    if outcome.team == outcome.opponent {
        return Err(StandingsError::SameTeam(outcome.team.to_string()));
    }

    let mut simulated = table.clone();

    if let Some(team) = simulated.get_mut(outcome.team) {
        team.record_match(
            outcome.team_won,
            outcome.runs_for,
            outcome.balls_faced,
            outcome.runs_against,
            outcome.balls_bowled,
        )?;
    }
    if let Some(opponent) = simulated.get_mut(outcome.opponent) {
        opponent.record_match(
            !outcome.team_won,
            outcome.runs_against,
            outcome.balls_bowled,
            outcome.runs_for,
            outcome.balls_faced,
        )?;
    }

    trace!(
        "Simulated {} vs {} ({}/{} balls against {}/{} balls)",
        outcome.team,
        outcome.opponent,
        outcome.runs_for,
        outcome.balls_faced,
        outcome.runs_against,
        outcome.balls_bowled
    );

    Ok(simulated)
}

/// 1-based league position of `team`.
pub fn get_position(table: &StandingsTable, team: &str) -> Result<usize, StandingsError> {
    table
        .ranked()
        .iter()
        .position(|e| e.name == team)
        .map(|index| index + 1)
        .ok_or_else(|| StandingsError::NotFound(team.to_string()))
}
