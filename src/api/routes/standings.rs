use axum::extract::State;
use axum::Json;
use serde::Serialize;

use crate::api::state::AppState;
use crate::models::StandingsEntry;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PointsTableRow {
    pub position: usize,
    #[serde(flatten)]
    pub entry: StandingsEntry,
}

pub async fn banner() -> &'static str {
    "Points Table Planner API Running"
}

/// Current standings in rank order.
pub async fn points_table(State(state): State<AppState>) -> Json<Vec<PointsTableRow>> {
    let rows = state
        .table
        .ranked()
        .into_iter()
        .enumerate()
        .map(|(index, entry)| PointsTableRow {
            position: index + 1,
            entry: entry.clone(),
        })
        .collect();

    Json(rows)
}

/// Team names in load order.
pub async fn teams(State(state): State<AppState>) -> Json<Vec<String>> {
    Json(state.table.team_names())
}
