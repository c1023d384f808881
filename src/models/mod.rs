//! Core data models for the standings planner.

mod scenario;
mod standings;

pub use scenario::*;
pub use standings::*;
