use serde::{Serialize, Deserialize};

/// The trace of a run.
///
/// `objective_values[0]` is `f(x₀)` and `objective_values[k + 1]`
/// is the value after iteration `k`.
/// `fw_gaps[k]` and `step_sizes[k]` are measured in iteration `k`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct History {
    pub objective_values: Vec<f64>,
    pub fw_gaps: Vec<f64>,
    pub step_sizes: Vec<f64>,
}

impl History {
    pub(crate) fn with_capacity(n_iter: usize) -> Self {
        Self {
            objective_values: Vec::with_capacity(n_iter + 1),
            fw_gaps: Vec::with_capacity(n_iter),
            step_sizes: Vec::with_capacity(n_iter),
        }
    }

    pub(crate) fn start(&mut self, objective_value: f64) {
        self.objective_values.clear();
        self.fw_gaps.clear();
        self.step_sizes.clear();
        self.objective_values.push(objective_value);
    }

    pub(crate) fn push(&mut self, objective_value: f64, gap: f64, step: f64) {
        self.objective_values.push(objective_value);
        self.fw_gaps.push(gap);
        self.step_sizes.push(step);
    }

    /// Number of completed iterations.
    pub fn iterations(&self) -> usize {
        self.fw_gaps.len()
    }

    /// The smallest objective value seen so far.
    pub fn best_objective(&self) -> Option<f64> {
        self.objective_values.iter()
            .copied()
            .reduce(f64::min)
    }

    /// The smallest Frank-Wolfe gap seen so far.
    pub fn best_gap(&self) -> Option<f64> {
        self.fw_gaps.iter()
            .copied()
            .reduce(f64::min)
    }

    /// The latest objective value.
    pub fn last_objective(&self) -> Option<f64> {
        self.objective_values.last().copied()
    }
}
