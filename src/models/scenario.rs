//! Scenario inputs and range results.

use serde::{Deserialize, Serialize};

use crate::calculate::OversDisplay;

/// Which innings the team plays first in the hypothetical match.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Toss {
    /// Team bats first and defends `runs`.
    Bat,
    /// Team bowls first and chases `runs + 1`.
    Bowl,
}

impl std::fmt::Display for Toss {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Toss::Bat => write!(f, "bat"),
            Toss::Bowl => write!(f, "bowl"),
        }
    }
}

impl std::str::FromStr for Toss {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "bat" => Ok(Toss::Bat),
            "bowl" => Ok(Toss::Bowl),
            other => Err(format!("toss must be \"bat\" or \"bowl\", got {:?}", other)),
        }
    }
}

/// A hypothetical match to plan for.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScenarioInput {
    pub team: String,
    pub opponent: String,
    /// Overs quota per innings
    pub overs: u32,
    /// Runs scored batting first, or runs conceded before the chase
    pub runs: u32,
    pub toss: Toss,
    /// Target 1-based league position
    pub desired_position: usize,
}

/// Opponent scores the team can concede while defending and still finish on the target position.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BattingRange {
    pub min_restrict_runs: u32,
    pub max_restrict_runs: u32,
    pub overs: u32,
    /// Team NRR when the opponent scores `max_restrict_runs`
    #[serde(rename = "revisedNRRMin")]
    pub revised_nrr_min: f64,
    /// Team NRR when the opponent scores `min_restrict_runs`
    #[serde(rename = "revisedNRRMax")]
    pub revised_nrr_max: f64,
    /// Whether any opponent score qualified; the zeroed fields alone are ambiguous.
    #[serde(skip)]
    pub reachable: bool,
}

impl BattingRange {
    /// The result when no opponent score reaches the target position.
    pub fn unreachable(overs: u32) -> Self {
        Self {
            min_restrict_runs: 0,
            max_restrict_runs: 0,
            overs,
            revised_nrr_min: 0.0,
            revised_nrr_max: 0.0,
            reachable: false,
        }
    }

    pub fn is_reachable(&self) -> bool {
        self.reachable
    }
}

/// Chase durations that reach the target and still finish on the target position.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChaseRange {
    pub runs_to_chase: u32,
    /// Fastest qualifying chase
    pub min_overs: OversDisplay,
    /// Slowest qualifying chase
    pub max_overs: OversDisplay,
    /// Team NRR when chasing in `max_overs`
    #[serde(rename = "revisedNRRMin")]
    pub revised_nrr_min: f64,
    /// Team NRR when chasing in `min_overs`
    #[serde(rename = "revisedNRRMax")]
    pub revised_nrr_max: f64,
    #[serde(skip)]
    pub reachable: bool,
}

impl ChaseRange {
    /// The result when no chase duration reaches the target position.
    pub fn unreachable(runs_to_chase: u32) -> Self {
        Self {
            runs_to_chase,
            min_overs: OversDisplay::default(),
            max_overs: OversDisplay::default(),
            revised_nrr_min: 0.0,
            revised_nrr_max: 0.0,
            reachable: false,
        }
    }

    pub fn is_reachable(&self) -> bool {
        self.reachable
    }
}

/// Outcome of a range search.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RangeResult {
    Batting(BattingRange),
    Chase(ChaseRange),
}

impl RangeResult {
    pub fn is_reachable(&self) -> bool {
        match self {
            RangeResult::Batting(range) => range.is_reachable(),
            RangeResult::Chase(range) => range.is_reachable(),
        }
    }

    /// `(min, max)` team NRR across the range.
    pub fn nrr_bounds(&self) -> (f64, f64) {
        match self {
            RangeResult::Batting(range) => (range.revised_nrr_min, range.revised_nrr_max),
            RangeResult::Chase(range) => (range.revised_nrr_min, range.revised_nrr_max),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_toss_serialization() {
        assert_eq!(serde_json::to_string(&Toss::Bat).unwrap(), "\"bat\"");
        let toss: Toss = serde_json::from_str("\"bowl\"").unwrap();
        assert_eq!(toss, Toss::Bowl);
        assert!(serde_json::from_str::<Toss>("\"field\"").is_err());
    }

    #[test]
    fn test_toss_from_str() {
        assert_eq!("BAT".parse::<Toss>(), Ok(Toss::Bat));
        assert_eq!(" bowl ".parse::<Toss>(), Ok(Toss::Bowl));
        assert!("chase".parse::<Toss>().is_err());
    }

    #[test]
    fn test_scenario_camel_case() {
        let json = r#"{"team":"A","opponent":"B","overs":20,"runs":150,"toss":"bat","desiredPosition":2}"#;
        let scenario: ScenarioInput = serde_json::from_str(json).unwrap();
        assert_eq!(scenario.desired_position, 2);
        assert_eq!(scenario.toss, Toss::Bat);
    }

    #[test]
    fn test_batting_range_field_names() {
        let range = RangeResult::Batting(BattingRange {
            min_restrict_runs: 10,
            max_restrict_runs: 90,
            overs: 20,
            revised_nrr_min: 0.25,
            revised_nrr_max: 1.5,
            reachable: true,
        });
        let value = serde_json::to_value(&range).unwrap();

        assert_eq!(value["minRestrictRuns"], 10);
        assert_eq!(value["maxRestrictRuns"], 90);
        assert_eq!(value["revisedNRRMin"], 0.25);
        assert_eq!(value["revisedNRRMax"], 1.5);
        assert_eq!(range.nrr_bounds(), (0.25, 1.5));
    }

    #[test]
    fn test_chase_range_field_names() {
        let range = ChaseRange {
            runs_to_chase: 151,
            min_overs: OversDisplay::new(12, 3),
            max_overs: OversDisplay::new(18, 0),
            revised_nrr_min: 0.1,
            revised_nrr_max: 0.9,
            reachable: true,
        };
        let value = serde_json::to_value(&range).unwrap();

        assert_eq!(value["runsToChase"], 151);
        assert_eq!(value["minOvers"]["overs"], 12);
        assert_eq!(value["minOvers"]["balls"], 3);
        assert!(value.get("reachable").is_none());
    }

    #[test]
    fn test_unreachable_ranges() {
        assert!(!BattingRange::unreachable(20).is_reachable());
        assert!(!RangeResult::Chase(ChaseRange::unreachable(151)).is_reachable());

        let range = BattingRange {
            reachable: true,
            ..BattingRange::unreachable(20)
        };
        assert!(range.is_reachable());
        assert_ne!(range, BattingRange::unreachable(20));
    }
}
