//! Rate calculations.
//!
//! Pure numeric helpers used by the standings simulator:
//! - Ball and over conversions (fractional and display notation)
//! - Net run rate

mod overs;

pub use overs::*;

/// Round a net run rate to three decimal places, halves away from zero.
pub fn round_nrr(value: f64) -> f64 {
    (value * 1000.0).round() / 1000.0
}

/// Calculate net run rate from cumulative figures.
///
/// A team that has not yet batted or bowled has no rate; that is reported as `0.0`.
pub fn calculate_nrr(runs_for: u32, balls_faced: u32, runs_against: u32, balls_bowled: u32) -> f64 {
    let overs_faced = balls_to_overs(balls_faced);
    let overs_bowled = balls_to_overs(balls_bowled);
    if overs_faced == 0.0 || overs_bowled == 0.0 {
        return 0.0;
    }

    round_nrr(runs_for as f64 / overs_faced - runs_against as f64 / overs_bowled)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_nrr_zero_guard() {
        assert_eq!(calculate_nrr(100, 0, 50, 30), 0.0);
        assert_eq!(calculate_nrr(100, 30, 50, 0), 0.0);
        assert_eq!(calculate_nrr(0, 0, 0, 0), 0.0);
    }

    #[test]
    fn test_nrr_positive() {
        // 5.0 per over scored, 4.0 per over conceded
        assert!((calculate_nrr(100, 120, 80, 120) - 1.0).abs() < 0.001);
    }

    #[test]
    fn test_nrr_negative() {
        assert!((calculate_nrr(80, 120, 100, 120) + 1.0).abs() < 0.001);
    }

    #[test]
    fn test_nrr_partial_overs() {
        // 7 balls faced is 1 + 1/6 overs, not 1.1
        let nrr = calculate_nrr(14, 7, 6, 6);
        assert_eq!(nrr, 6.0);
    }

    #[test]
    fn test_nrr_rounds_to_three_places() {
        // 150/20 - 149/20 = 0.05; 151/18 - 150/20 = 0.888...
        assert_eq!(calculate_nrr(150, 120, 149, 120), 0.05);
        assert_eq!(calculate_nrr(151, 108, 150, 120), 0.889);
    }

    #[test]
    fn test_round_nrr_half_away_from_zero() {
        assert_eq!(round_nrr(0.0125), 0.013);
        assert_eq!(round_nrr(-0.0125), -0.013);
        assert_eq!(round_nrr(1.0), 1.0);
    }
}
