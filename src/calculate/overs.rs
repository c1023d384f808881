//! Overs and balls conversions.
//!
//! Two notations exist and they must not be mixed:
//! - fractional overs (`f64`), where 7 balls is `1 + 1/6` overs; used for rates
//! - display overs (`OversDisplay`), where 7 balls prints as `1.1`; never used in arithmetic

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Deliveries in one over.
pub const BALLS_PER_OVER: u32 = 6;

/// Convert a ball count into fractional overs.
pub fn balls_to_overs(balls: u32) -> f64 {
    let whole = balls / BALLS_PER_OVER;
    let remainder = balls % BALLS_PER_OVER;
    whole as f64 + remainder as f64 / BALLS_PER_OVER as f64
}

/// Convert fractional overs back into the nearest whole ball count.
pub fn overs_to_balls(overs: f64) -> u32 {
    if !overs.is_finite() || overs <= 0.0 {
        return 0;
    }
    (overs * BALLS_PER_OVER as f64).round() as u32
}

/// Error parsing an `O.B` overs string.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum OversParseError {
    #[error("invalid overs notation: {0:?}")]
    Malformed(String),

    #[error("ball digit {0} is outside 0..=5")]
    BallOutOfRange(u32),
}

/// Overs in `overs.balls` display form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
pub struct OversDisplay {
    pub overs: u32,
    pub balls: u8,
}

impl OversDisplay {
    pub fn new(overs: u32, balls: u8) -> Self {
        Self { overs, balls }
    }

    pub fn from_balls(balls: u32) -> Self {
        Self {
            overs: balls / BALLS_PER_OVER,
            balls: (balls % BALLS_PER_OVER) as u8,
        }
    }

    pub fn to_balls(self) -> u32 {
        self.overs * BALLS_PER_OVER + self.balls as u32
    }

    /// Fractional overs equivalent, for when a rate is needed.
    pub fn to_fractional(self) -> f64 {
        balls_to_overs(self.to_balls())
    }
}

impl fmt::Display for OversDisplay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.overs, self.balls)
    }
}

impl FromStr for OversDisplay {
    type Err = OversParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let malformed = || OversParseError::Malformed(s.to_string());

        let (overs_str, balls_str) = match s.split_once('.') {
            Some((o, b)) => (o, b),
            None => (s, "0"),
        };

        let overs: u32 = overs_str.parse().map_err(|_| malformed())?;
        if balls_str.len() != 1 {
            return Err(malformed());
        }
        let balls: u32 = balls_str.parse().map_err(|_| malformed())?;
        if balls >= BALLS_PER_OVER {
            return Err(OversParseError::BallOutOfRange(balls));
        }

        Ok(Self::new(overs, balls as u8))
    }
}
