//! # NRR Planner
//!
//! Works out what a cricket team needs from its next match to finish on a
//! chosen league position, taking net run rate into account.
//!
//! ## Architecture
//!
//! - **calculate**: Overs/balls conversions and net run rate
//! - **models**: Standings table, scenario inputs and range results
//! - **standings**: Match simulation and ranking
//! - **search**: Range search over hypothetical match outcomes
//! - **storage**: Points table loading (JSON, JSONL)
//! - **api**: REST API endpoints
//! - **config**: Configuration loading and validation

pub mod api;
pub mod calculate;
pub mod config;
pub mod models;
pub mod search;
pub mod standings;
pub mod storage;

pub use models::*;
