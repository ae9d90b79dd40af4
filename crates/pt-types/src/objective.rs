//! Objective directions and the two-value result reported by the scorer.

use optimizer::Direction;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Whether an objective is maximized or minimized.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ObjectiveDirection {
    Maximize,
    Minimize,
}

impl From<ObjectiveDirection> for Direction {
    fn from(direction: ObjectiveDirection) -> Self {
        match direction {
            ObjectiveDirection::Maximize => Direction::Maximize,
            ObjectiveDirection::Minimize => Direction::Minimize,
        }
    }
}

impl fmt::Display for ObjectiveDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Maximize => write!(f, "maximize"),
            Self::Minimize => write!(f, "minimize"),
        }
    }
}

/// One `score,sigma` line from the external scorer.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EvaluationOutput {
    /// Maximized.
    pub score: f64,
    /// Uncertainty on `score`; minimized.
    pub sigma: f64,
}

impl EvaluationOutput {
    pub fn new(score: f64, sigma: f64) -> Self {
        Self { score, sigma }
    }

    /// Directions matching the order of [`EvaluationOutput::values`].
    pub fn directions() -> [ObjectiveDirection; 2] {
        [ObjectiveDirection::Maximize, ObjectiveDirection::Minimize]
    }

    pub fn values(&self) -> Vec<f64> {
        vec![self.score, self.sigma]
    }
}
