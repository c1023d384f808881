pub mod calculate;
pub mod standings;
