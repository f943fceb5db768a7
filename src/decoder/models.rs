//! Two state Markov models
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// First order Markov model with two hidden states and two emission symbols.
/// States and symbols are indexed 0 (false) and 1 (true).
/// All values are probabilities (not logarithms).
#[derive(Debug, Copy, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct MarkovModel {
    /// Initial state distribution
    pub init: [f64; 2],
    /// Transition probabilities: transition[from][to]
    pub transition: [[f64; 2]; 2],
    /// Emission probabilities: emission[state][symbol]
    pub emission: [[f64; 2]; 2],
}

/// Flying (1) / standing (0) model.
/// Logs most likely start on the ground and flight mode is very sticky.
pub const FLYING_MODEL: MarkovModel = MarkovModel {
    init: [0.80, 0.20],
    transition: [
        [0.9995, 0.0005], // from standing
        [0.0005, 0.9995], // from flying
    ],
    emission: [
        [0.8, 0.2], // while standing
        [0.2, 0.8], // while flying
    ],
};

/// Circling (1) / straight flight (0) model.
pub const CIRCLING_MODEL: MarkovModel = MarkovModel {
    init: [0.80, 0.20],
    transition: [
        [0.982, 0.018], // from straight flight
        [0.030, 0.970], // from circling
    ],
    emission: [
        [0.942, 0.058], // while straight
        [0.093, 0.907], // while circling
    ],
};

impl MarkovModel {
    /// Builds a new [MarkovModel]
    pub const fn new(init: [f64; 2], transition: [[f64; 2]; 2], emission: [[f64; 2]; 2]) -> Self {
        Self {
            init,
            transition,
            emission,
        }
    }

    /// Returns true if every distribution of this model sums to unity.
    pub fn is_normalized(&self) -> bool {
        let unity = |p: &[f64; 2]| (p[0] + p[1] - 1.0).abs() < 1e-9;
        unity(&self.init)
            && self.transition.iter().all(unity)
            && self.emission.iter().all(unity)
    }
}
