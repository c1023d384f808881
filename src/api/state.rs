use std::sync::Arc;

use crate::models::StandingsTable;

/// Shared, read-only request state. Calculations clone the table they mutate.
#[derive(Clone)]
pub struct AppState {
    pub table: Arc<StandingsTable>,
}

impl AppState {
    pub fn new(table: StandingsTable) -> Self {
        Self {
            table: Arc::new(table),
        }
    }
}
