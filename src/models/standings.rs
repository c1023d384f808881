//! League standings model.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::warn;

use crate::calculate::calculate_nrr;

/// Points awarded for a win. A loss is worth nothing.
pub const POINTS_PER_WIN: u32 = 2;

/// Errors raised while building or mutating standings.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum StandingsError {
    #[error("Team not found in standings: {0}")]
    NotFound(String),

    #[error("Team cannot play itself: {0}")]
    SameTeam(String),

    #[error("Duplicate team in standings: {0}")]
    DuplicateTeam(String),

    #[error("Cumulative figures overflow for {0}")]
    Overflow(String),

    #[error("Scenario out of range: {0}")]
    OutOfRange(String),
}

/// One team's row in the points table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StandingsEntry {
    /// Unique team name
    #[serde(alias = "team")]
    pub name: String,

    #[serde(default, alias = "matches")]
    pub matches_played: u32,

    #[serde(default)]
    pub wins: u32,

    #[serde(default)]
    pub losses: u32,

    #[serde(default)]
    pub points: u32,

    /// Cumulative runs scored
    #[serde(default)]
    pub runs_for: u32,

    /// Cumulative legal deliveries faced
    #[serde(default)]
    pub balls_faced: u32,

    /// Cumulative runs conceded
    #[serde(default)]
    pub runs_against: u32,

    /// Cumulative legal deliveries bowled
    #[serde(default)]
    pub balls_bowled: u32,

    /// Derived from the cumulative figures; any loaded value is replaced.
    #[serde(default, alias = "nrr")]
    pub net_run_rate: f64,
}

impl StandingsEntry {
    /// Create an entry for a team with no matches recorded.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            matches_played: 0,
            wins: 0,
            losses: 0,
            points: 0,
            runs_for: 0,
            balls_faced: 0,
            runs_against: 0,
            balls_bowled: 0,
            net_run_rate: 0.0,
        }
    }

    /// Builder method to set the win/loss record. Points follow from wins.
    pub fn with_record(mut self, wins: u32, losses: u32) -> Self {
        self.wins = wins;
        self.losses = losses;
        self.matches_played = wins.saturating_add(losses);
        self.points = wins.saturating_mul(POINTS_PER_WIN);
        self
    }

    /// Builder method to set the cumulative batting and bowling figures.
    pub fn with_figures(
        mut self,
        runs_for: u32,
        balls_faced: u32,
        runs_against: u32,
        balls_bowled: u32,
    ) -> Self {
        self.runs_for = runs_for;
        self.balls_faced = balls_faced;
        self.runs_against = runs_against;
        self.balls_bowled = balls_bowled;
        self.refresh_nrr();
        self
    }

    /// Recompute the net run rate from the cumulative figures.
    pub fn refresh_nrr(&mut self) {
        self.net_run_rate = calculate_nrr(
            self.runs_for,
            self.balls_faced,
            self.runs_against,
            self.balls_bowled,
        );
    }

    /// Fold one match into this entry.
    ///
    /// Fails without modifying the entry if any cumulative figure would overflow.
    pub fn record_match(
        &mut self,
        won: bool,
        runs_for: u32,
        balls_faced: u32,
        runs_against: u32,
        balls_bowled: u32,
    ) -> Result<(), StandingsError> {
        let overflow = || StandingsError::Overflow(self.name.clone());
        let add = |total: u32, extra: u32| total.checked_add(extra).ok_or_else(overflow);

        let matches_played = add(self.matches_played, 1)?;
        let (wins, losses, points) = if won {
            (add(self.wins, 1)?, self.losses, add(self.points, POINTS_PER_WIN)?)
        } else {
            (self.wins, add(self.losses, 1)?, self.points)
        };
        let totals = (
            add(self.runs_for, runs_for)?,
            add(self.balls_faced, balls_faced)?,
            add(self.runs_against, runs_against)?,
            add(self.balls_bowled, balls_bowled)?,
        );

        self.matches_played = matches_played;
        self.wins = wins;
        self.losses = losses;
        self.points = points;
        (self.runs_for, self.balls_faced, self.runs_against, self.balls_bowled) = totals;
        self.refresh_nrr();
        Ok(())
    }

    /// Whether the record satisfies `matches = wins + losses` and `points = 2 * wins`.
    pub fn is_consistent(&self) -> bool {
        self.wins.checked_add(self.losses) == Some(self.matches_played)
            && self.wins.checked_mul(POINTS_PER_WIN) == Some(self.points)
    }
}

/// A points table snapshot. Names are unique; row order is the load order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Vec<StandingsEntry>", into = "Vec<StandingsEntry>")]
pub struct StandingsTable {
    entries: Vec<StandingsEntry>,
}

impl StandingsTable {
    /// Build a table, recomputing every net run rate.
    pub fn from_entries(mut entries: Vec<StandingsEntry>) -> Result<Self, StandingsError> {
        let mut seen = HashSet::new();
        for entry in &mut entries {
            if !seen.insert(entry.name.clone()) {
                return Err(StandingsError::DuplicateTeam(entry.name.clone()));
            }
            if !entry.is_consistent() {
                warn!(
                    "Inconsistent record for {}: {} matches, {} wins, {} losses, {} points",
                    entry.name, entry.matches_played, entry.wins, entry.losses, entry.points
                );
            }
            entry.refresh_nrr();
        }

        Ok(Self { entries })
    }

    pub fn entries(&self) -> &[StandingsEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    pub fn get(&self, name: &str) -> Option<&StandingsEntry> {
        self.entries.iter().find(|e| e.name == name)
    }

    pub(crate) fn get_mut(&mut self, name: &str) -> Option<&mut StandingsEntry> {
        self.entries.iter_mut().find(|e| e.name == name)
    }

    /// Team names in load order.
    pub fn team_names(&self) -> Vec<String> {
        self.entries.iter().map(|e| e.name.clone()).collect()
    }

    /// Entries sorted by points, then net run rate, both descending.
    ///
    /// The sort is stable, so rows tied on both keep their load order.
    pub fn ranked(&self) -> Vec<&StandingsEntry> {
        let mut sorted: Vec<&StandingsEntry> = self.entries.iter().collect();
        sorted.sort_by(|a, b| {
            b.points
                .cmp(&a.points)
                .then_with(|| b.net_run_rate.total_cmp(&a.net_run_rate))
        });
        sorted
    }
}

impl TryFrom<Vec<StandingsEntry>> for StandingsTable {
    type Error = StandingsError;

    fn try_from(entries: Vec<StandingsEntry>) -> Result<Self, Self::Error> {
        Self::from_entries(entries)
    }
}

impl From<StandingsTable> for Vec<StandingsEntry> {
    fn from(table: StandingsTable) -> Self {
        table.entries
    }
}
