//! Range search engine.
//!
//! Inverts the ranking function: for a hypothetical match, finds the span of
//! opponent scores (batting first) or chase lengths (bowling first) that leave
//! a team on a chosen league position.
//!
//! Candidates are scanned one run or one ball at a time. The team's NRR falls
//! and the opponent's rises as the scan advances, so the team's position only
//! moves down the table and the qualifying candidates form one contiguous run.
//! The scan stops as soon as that run ends.

use tracing::debug;

use crate::calculate::{OversDisplay, BALLS_PER_OVER};
use crate::models::{
    BattingRange, ChaseRange, RangeResult, ScenarioInput, StandingsError, StandingsTable, Toss,
};
use crate::standings::{get_position, simulate_match, MatchOutcome};

/// Fewest balls a chase is assumed to take.
pub const MIN_CHASE_BALLS: u32 = BALLS_PER_OVER;

/// Largest overs quota accepted; bounds the chase scan.
pub const MAX_OVERS: u32 = 50;

/// Largest first-innings total accepted; bounds the restrict scan.
pub const MAX_RUNS: u32 = 1000;

fn innings_balls(overs: u32) -> Result<u32, StandingsError> {
    overs
        .checked_mul(BALLS_PER_OVER)
        .ok_or_else(|| StandingsError::OutOfRange(format!("{} overs", overs)))
}

/// First and last qualifying candidates, with the team's NRR at each.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Boundary {
    pub first: u32,
    pub first_nrr: f64,
    pub last: u32,
    pub last_nrr: f64,
    /// Candidates simulated before the scan stopped
    pub evaluated: usize,
}

/// Scan `candidates` in order, collecting the first contiguous run whose
/// simulated table puts `team` on `desired_position`.
pub fn scan_contiguous<'a, I, F>(
    table: &StandingsTable,
    team: &str,
    desired_position: usize,
    candidates: I,
    outcome_for: F,
) -> Result<Option<Boundary>, StandingsError>
where
    I: IntoIterator<Item = u32>,
    F: Fn(u32) -> MatchOutcome<'a>,
{
    let mut boundary: Option<Boundary> = None;
    let mut evaluated = 0;

    for candidate in candidates {
        evaluated += 1;
        let simulated = simulate_match(table, &outcome_for(candidate))?;
        let position = get_position(&simulated, team)?;
        let nrr = simulated
            .get(team)
            .map(|e| e.net_run_rate)
            .ok_or_else(|| StandingsError::NotFound(team.to_string()))?;

        if position == desired_position {
            match boundary.as_mut() {
                Some(b) => {
                    b.last = candidate;
                    b.last_nrr = nrr;
                }
                None => {
                    boundary = Some(Boundary {
                        first: candidate,
                        first_nrr: nrr,
                        last: candidate,
                        last_nrr: nrr,
                        evaluated: 0,
                    });
                }
            }
        } else if boundary.is_some() {
            break;
        }
    }

    Ok(boundary.map(|b| Boundary { evaluated, ..b }))
}

/// Batting first: the team scored `scenario.runs` in the full quota and wins,
/// so the opponent is held to between 0 and `runs - 1`.
pub fn find_restrict_range(
    scenario: &ScenarioInput,
    table: &StandingsTable,
) -> Result<BattingRange, StandingsError> {
    let quota = innings_balls(scenario.overs)?;
    let runs = scenario.runs;
    let team = scenario.team.as_str();
    let opponent = scenario.opponent.as_str();

    let boundary = scan_contiguous(table, team, scenario.desired_position, 0..runs, |opp_runs| {
        MatchOutcome::win(team, opponent)
            .batting(runs, quota)
            .bowling(opp_runs, quota)
    })?;

    let range = match boundary {
        Some(b) => {
            debug!(
                "Restrict range for {} at position {}: {}..={} ({} simulations)",
                team, scenario.desired_position, b.first, b.last, b.evaluated
            );
            BattingRange {
                min_restrict_runs: b.first,
                max_restrict_runs: b.last,
                overs: scenario.overs,
                revised_nrr_min: b.last_nrr,
                revised_nrr_max: b.first_nrr,
                reachable: true,
            }
        }
        None => {
            debug!(
                "Position {} unreachable for {} defending {}",
                scenario.desired_position, team, runs
            );
            BattingRange::unreachable(scenario.overs)
        }
    };

    Ok(range)
}

/// Bowling first: the opponent made `scenario.runs` in the full quota and the
/// team chases `runs + 1`, taking anywhere from one over to the whole quota.
pub fn find_chase_range(
    scenario: &ScenarioInput,
    table: &StandingsTable,
) -> Result<ChaseRange, StandingsError> {
    let quota = innings_balls(scenario.overs)?;
    let target = scenario
        .runs
        .checked_add(1)
        .ok_or_else(|| StandingsError::OutOfRange(format!("{} runs", scenario.runs)))?;
    let conceded = scenario.runs;
    let team = scenario.team.as_str();
    let opponent = scenario.opponent.as_str();

    let boundary = scan_contiguous(
        table,
        team,
        scenario.desired_position,
        MIN_CHASE_BALLS..=quota,
        |balls| {
            MatchOutcome::win(team, opponent)
                .batting(target, balls)
                .bowling(conceded, quota)
        },
    )?;

    let range = match boundary {
        Some(b) => {
            debug!(
                "Chase range for {} at position {}: {}..={} balls ({} simulations)",
                team, scenario.desired_position, b.first, b.last, b.evaluated
            );
            ChaseRange {
                runs_to_chase: target,
                min_overs: OversDisplay::from_balls(b.first),
                max_overs: OversDisplay::from_balls(b.last),
                revised_nrr_min: b.last_nrr,
                revised_nrr_max: b.first_nrr,
                reachable: true,
            }
        }
        None => {
            debug!(
                "Position {} unreachable for {} chasing {}",
                scenario.desired_position, team, target
            );
            ChaseRange::unreachable(target)
        }
    };

    Ok(range)
}

/// Compute the qualifying range for a scenario.
///
/// `overs` must be within `1..=MAX_OVERS` and `runs` at most `MAX_RUNS`.
pub fn compute_range(
    scenario: &ScenarioInput,
    table: &StandingsTable,
) -> Result<RangeResult, StandingsError> {
    if !table.contains(&scenario.team) {
        return Err(StandingsError::NotFound(scenario.team.clone()));
    }
    if !table.contains(&scenario.opponent) {
        return Err(StandingsError::NotFound(scenario.opponent.clone()));
    }
    if !(1..=MAX_OVERS).contains(&scenario.overs) {
        return Err(StandingsError::OutOfRange(format!(
            "overs must be between 1 and {}, got {}",
            MAX_OVERS, scenario.overs
        )));
    }
    if scenario.runs > MAX_RUNS {
        return Err(StandingsError::OutOfRange(format!(
            "runs must be at most {}, got {}",
            MAX_RUNS, scenario.runs
        )));
    }

    match scenario.toss {
        Toss::Bat => find_restrict_range(scenario, table).map(RangeResult::Batting),
        Toss::Bowl => find_chase_range(scenario, table).map(RangeResult::Chase),
    }
}
