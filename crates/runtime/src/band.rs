//! Coarse classification of desirability scores.

use serde::Serialize;
use strum::{Display, EnumIter, IntoStaticStr};

/// Desirability band of a crisp score.
///
/// Bands follow the peaks of the output terms: below 30 is undesirable,
/// from 30 desirable, from 60 essential.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[derive(Serialize, Display, EnumIter, IntoStaticStr)]
#[strum(serialize_all = "UPPERCASE")]
#[serde(rename_all = "lowercase")]
pub enum Band {
    Undesirable,
    Desirable,
    Essential,
}

impl Band {
    pub const DESIRABLE_THRESHOLD: f64 = 30.0;
    pub const ESSENTIAL_THRESHOLD: f64 = 60.0;

    pub fn from_score(score: f64) -> Self {
        if score >= Self::ESSENTIAL_THRESHOLD {
            Band::Essential
        } else if score >= Self::DESIRABLE_THRESHOLD {
            Band::Desirable
        } else {
            Band::Undesirable
        }
    }

    /// Lower bound of the band (inclusive).
    pub const fn floor(self) -> f64 {
        match self {
            Band::Undesirable => 0.0,
            Band::Desirable => Self::DESIRABLE_THRESHOLD,
            Band::Essential => Self::ESSENTIAL_THRESHOLD,
        }
    }
}
