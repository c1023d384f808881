//! Points table loading.
//!
//! The standings snapshot is read once at startup from either:
//! - a JSON array (`.json`)
//! - JSON Lines, one team per line (`.jsonl`)

mod jsonl;

pub use jsonl::*;

use std::fs;
use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::info;

use crate::models::{StandingsEntry, StandingsError, StandingsTable};

/// Errors that can occur while loading standings.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("JSON parse error on line {line}: {source}")]
    JsonLine {
        line: usize,
        #[source]
        source: serde_json::Error,
    },

    #[error("Path not found: {0}")]
    PathNotFound(PathBuf),

    #[error("Invalid standings: {0}")]
    Standings(#[from] StandingsError),
}

/// Load a points table from disk.
pub fn load_points_table(path: &Path) -> Result<StandingsTable, StorageError> {
    if !path.exists() {
        return Err(StorageError::PathNotFound(path.to_path_buf()));
    }

    let is_jsonl = path
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("jsonl"));

    let entries: Vec<StandingsEntry> = if is_jsonl {
        JsonlReader::new(path.to_path_buf()).read_all()?
    } else {
        let contents = fs::read_to_string(path)?;
        serde_json::from_str(&contents)?
    };

    let table = StandingsTable::from_entries(entries)?;
    info!("Loaded {} teams from {:?}", table.len(), path);
    Ok(table)
}
