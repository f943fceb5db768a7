//! Two state Viterbi decoder, used to filter noisy boolean observations
mod models;

use log::warn;

pub use models::{MarkovModel, CIRCLING_MODEL, FLYING_MODEL};

/// [ViterbiDecoder] returns the most likely hidden state sequence
/// of a [MarkovModel], for a given emission sequence.
/// Probabilities are stored in log space, so long sequences do not underflow.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct ViterbiDecoder {
    init_log: [f64; 2],
    transition_log: [[f64; 2]; 2],
    emission_log: [[f64; 2]; 2],
}

impl From<MarkovModel> for ViterbiDecoder {
    fn from(model: MarkovModel) -> Self {
        Self::new(&model)
    }
}

impl ViterbiDecoder {
    /// Creates a new [ViterbiDecoder] from this [MarkovModel].
    /// Models whose distributions do not sum to unity are accepted, but reported.
    pub fn new(model: &MarkovModel) -> Self {
        if !model.is_normalized() {
            warn!("viterbi: {:?} is not normalized", model);
        }
        let to_log = |p: [f64; 2]| [p[0].ln(), p[1].ln()];
        Self {
            init_log: to_log(model.init),
            transition_log: [to_log(model.transition[0]), to_log(model.transition[1])],
            emission_log: [to_log(model.emission[0]), to_log(model.emission[1])],
        }
    }

    /// Decodes the emission sequence.
    ///
    /// ## Input
    /// - emissions: observed symbols, `true` standing for symbol 1
    ///
    /// ## Output
    /// - most likely hidden states, `true` standing for state 1.
    /// An empty sequence decodes to an empty sequence.
    /// Equal log-probabilities resolve to state 1, on every run.
    pub fn decode(&self, emissions: &[bool]) -> Vec<bool> {
        let n = emissions.len();
        if n == 0 {
            return Vec::new();
        }

        // best predecessor of each state, at each step
        let mut backtrack = vec![[0usize; 2]; n];

        let symbol = emissions[0] as usize;
        let mut state_log = [
            self.init_log[0] + self.emission_log[0][symbol],
            self.init_log[1] + self.emission_log[1][symbol],
        ];

        for (i, emission) in emissions.iter().enumerate().skip(1) {
            let symbol = *emission as usize;
            let mut next_log = [0.0_f64; 2];

            for target in 0..2 {
                let from_0 = state_log[0] + self.transition_log[0][target];
                let from_1 = state_log[1] + self.transition_log[1][target];
                let emission_log = self.emission_log[target][symbol];

                if from_0 > from_1 {
                    backtrack[i][target] = 0;
                    next_log[target] = from_0 + emission_log;
                } else {
                    backtrack[i][target] = 1;
                    next_log[target] = from_1 + emission_log;
                }
            }

            state_log = next_log;
        }

        let mut state = if state_log[0] > state_log[1] { 0 } else { 1 };

        let mut states = Vec::with_capacity(n);
        states.push(state == 1);

        for i in (1..n).rev() {
            state = backtrack[i][state];
            states.push(state == 1);
        }

        states.reverse();
        states
    }
}
