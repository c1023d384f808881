use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::Json;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::info;

use crate::api::state::AppState;
use crate::api::ApiError;
use crate::models::{RangeResult, ScenarioInput, StandingsEntry, Toss};
use crate::search::{compute_range, MAX_OVERS, MAX_RUNS};

/// Raw calculate payload. Every field is optional so that missing
/// fields can be reported together.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CalculateRequest {
    pub team: Option<String>,
    pub opponent: Option<String>,
    pub overs: Option<Value>,
    pub runs: Option<Value>,
    pub toss: Option<String>,
    pub desired_position: Option<Value>,
}

/// A non-negative whole number, given either as a JSON number or a numeric string.
fn whole_number(value: &Value) -> Option<u64> {
    match value {
        Value::Number(n) => n.as_u64(),
        Value::String(s) if !s.is_empty() && s.bytes().all(|b| b.is_ascii_digit()) => {
            s.parse().ok()
        }
        _ => None,
    }
}

fn required_text(field: Option<String>, label: &str, errors: &mut Vec<String>) -> Option<String> {
    match field.map(|s| s.trim().to_string()) {
        None => {
            errors.push(format!("{} is required", label));
            None
        }
        Some(s) if s.is_empty() => {
            errors.push(format!("{} cannot be empty", label));
            None
        }
        Some(s) => Some(s),
    }
}

fn required_number(
    field: Option<&Value>,
    label: &str,
    range: std::ops::RangeInclusive<u64>,
    errors: &mut Vec<String>,
) -> Option<u64> {
    let Some(value) = field else {
        errors.push(format!("{} is required", label));
        return None;
    };

    match whole_number(value) {
        Some(n) if range.contains(&n) => Some(n),
        Some(_) => {
            errors.push(format!(
                "{} must be between {} and {}",
                label,
                range.start(),
                range.end()
            ));
            None
        }
        None => {
            errors.push(format!("{} must be a whole number", label));
            None
        }
    }
}

impl CalculateRequest {
    /// Check presence and shape of every field and build a scenario.
    pub fn validate(self) -> Result<ScenarioInput, Vec<String>> {
        let mut errors = Vec::new();

        let team = required_text(self.team, "Team", &mut errors);
        let opponent = required_text(self.opponent, "Opponent", &mut errors);
        let overs = required_number(self.overs.as_ref(), "Overs", 1..=u64::from(MAX_OVERS), &mut errors);
        let runs = required_number(self.runs.as_ref(), "Runs", 0..=u64::from(MAX_RUNS), &mut errors);
        let desired_position = required_number(
            self.desired_position.as_ref(),
            "Desired position",
            1..=u32::MAX as u64,
            &mut errors,
        );

        let toss = match self.toss.as_deref() {
            None => {
                errors.push("Toss is required".to_string());
                None
            }
            Some(raw) => match raw.parse::<Toss>() {
                Ok(toss) => Some(toss),
                Err(_) => {
                    errors.push("Toss must be either \"bat\" or \"bowl\"".to_string());
                    None
                }
            },
        };

        if let (Some(team), Some(opponent)) = (&team, &opponent) {
            if team == opponent {
                errors.push("Team and opponent must be different".to_string());
            }
        }

        match (team, opponent, overs, runs, toss, desired_position) {
            (Some(team), Some(opponent), Some(overs), Some(runs), Some(toss), Some(position))
                if errors.is_empty() =>
            {
                Ok(ScenarioInput {
                    team,
                    opponent,
                    overs: overs as u32,
                    runs: runs as u32,
                    toss,
                    desired_position: position as usize,
                })
            }
            _ => Err(errors),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct NrrRange {
    pub min: f64,
    pub max: f64,
}

/// The scenario echoed back; restrict bounds are present only when batting first.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PerformanceRange {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min_restrict_runs: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_restrict_runs: Option<u32>,
    pub runs: u32,
    pub overs: u32,
}

impl PerformanceRange {
    fn new(scenario: &ScenarioInput, result: &RangeResult) -> Self {
        let (min_restrict_runs, max_restrict_runs) = match result {
            RangeResult::Batting(range) => {
                (Some(range.min_restrict_runs), Some(range.max_restrict_runs))
            }
            RangeResult::Chase(_) => (None, None),
        };

        Self {
            min_restrict_runs,
            max_restrict_runs,
            runs: scenario.runs,
            overs: scenario.overs,
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CalculateResponse {
    pub team: String,
    pub opponent: String,
    pub overs: u32,
    pub calculation_result: RangeResult,
    pub nrr_range: NrrRange,
    pub performance_range: PerformanceRange,
    /// The unmodified snapshot the calculation ran against
    pub points_table: Vec<StandingsEntry>,
}

pub async fn calculate(
    State(state): State<AppState>,
    payload: Result<Json<CalculateRequest>, JsonRejection>,
) -> Result<Json<CalculateResponse>, ApiError> {
    let Json(request) = payload.map_err(|e| ApiError::BadRequest(e.body_text()))?;
    let scenario = request.validate().map_err(ApiError::Validation)?;

    info!(
        "Calculating {} vs {} ({} runs, {} overs, {}) for position {}",
        scenario.team,
        scenario.opponent,
        scenario.runs,
        scenario.overs,
        scenario.toss,
        scenario.desired_position
    );

    let result = compute_range(&scenario, &state.table)?;
    let (min, max) = result.nrr_bounds();
    let performance_range = PerformanceRange::new(&scenario, &result);

    Ok(Json(CalculateResponse {
        team: scenario.team,
        opponent: scenario.opponent,
        overs: scenario.overs,
        calculation_result: result,
        nrr_range: NrrRange { min, max },
        performance_range,
        points_table: state.table.entries().to_vec(),
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn request(value: Value) -> CalculateRequest {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn test_validate_ok() {
        let scenario = request(json!({
            "team": "Mumbai",
            "opponent": "Delhi",
            "overs": "20",
            "runs": 150,
            "toss": "bat",
            "desiredPosition": 2
        }))
        .validate()
        .unwrap();

        assert_eq!(scenario.overs, 20);
        assert_eq!(scenario.runs, 150);
        assert_eq!(scenario.toss, Toss::Bat);
        assert_eq!(scenario.desired_position, 2);
    }

    #[test]
    fn test_validate_reports_every_missing_field() {
        let errors = CalculateRequest::default().validate().unwrap_err();
        assert_eq!(
            errors,
            vec![
                "Team is required",
                "Opponent is required",
                "Overs is required",
                "Runs is required",
                "Desired position is required",
                "Toss is required",
            ]
        );
    }

    #[test]
    fn test_validate_rejects_bad_values() {
        let errors = request(json!({
            "team": "Mumbai",
            "opponent": "Mumbai",
            "overs": "twenty",
            "runs": -5,
            "toss": "field",
            "desiredPosition": 0
        }))
        .validate()
        .unwrap_err();

        assert!(errors.contains(&"Overs must be a whole number".to_string()));
        assert!(errors.contains(&"Runs must be a whole number".to_string()));
        assert!(errors.contains(&"Toss must be either \"bat\" or \"bowl\"".to_string()));
        assert!(errors.contains(&"Desired position must be between 1 and 4294967295".to_string()));
        assert!(errors.contains(&"Team and opponent must be different".to_string()));
    }

    #[test]
    fn test_validate_bounds_scan_size() {
        let errors = request(json!({
            "team": "Mumbai",
            "opponent": "Delhi",
            "overs": 5000,
            "runs": 150,
            "toss": "bowl",
            "desiredPosition": 1
        }))
        .validate()
        .unwrap_err();

        assert_eq!(errors, vec!["Overs must be between 1 and 50"]);
    }

    #[test]
    fn test_performance_range_follows_toss() {
        let scenario = request(json!({
            "team": "Mumbai",
            "opponent": "Delhi",
            "overs": 20,
            "runs": 150,
            "toss": "bowl",
            "desiredPosition": 1
        }))
        .validate()
        .unwrap();

        let chase = PerformanceRange::new(
            &scenario,
            &RangeResult::Chase(crate::models::ChaseRange::unreachable(151)),
        );
        let value = serde_json::to_value(&chase).unwrap();
        assert_eq!(value, json!({ "runs": 150, "overs": 20 }));

        let mut batting = crate::models::BattingRange::unreachable(20);
        batting.min_restrict_runs = 40;
        batting.max_restrict_runs = 90;
        let value =
            serde_json::to_value(PerformanceRange::new(&scenario, &RangeResult::Batting(batting)))
                .unwrap();
        assert_eq!(value["minRestrictRuns"], 40);
        assert_eq!(value["maxRestrictRuns"], 90);
    }

    #[test]
    fn test_whole_number() {
        assert_eq!(whole_number(&json!(20)), Some(20));
        assert_eq!(whole_number(&json!("20")), Some(20));
        assert_eq!(whole_number(&json!("")), None);
        assert_eq!(whole_number(&json!(20.5)), None);
        assert_eq!(whole_number(&json!("-3")), None);
        assert_eq!(whole_number(&json!(null)), None);
    }
}
