//! Provides `Optimizer` trait.

use std::ops::ControlFlow;

use crate::error::Result;

/// The trait [`Optimizer`] defines the iterative framework
/// shared by the Frank-Wolfe variants:
///
/// 1. [`Optimizer::preprocess`] validates the setting and
///    evaluates the initial point,
/// 2. [`Optimizer::step`] performs iteration `k = 0, 1, ...`
///    until it returns `ControlFlow::Break`,
/// 3. [`Optimizer::postprocess`] returns the final iterate.
///
/// # Provided Methods
/// - [`Optimizer::run`]
/// - [`Optimizer::info`]
pub trait Optimizer {
    /// Returns the name of the algorithm.
    fn name(&self) -> &str;

    /// Returns the settings of the algorithm as `(key, value)` pairs.
    fn info(&self) -> Option<Vec<(&str, String)>> {
        None
    }

    /// A main function that runs the algorithm.
    fn run(&mut self) -> Result<Vec<f64>> {
        self.preprocess()?;

        let _ = (0..).try_for_each(|iteration| self.step(iteration));

        Ok(self.postprocess())
    }

    /// Pre-processing for `self`.
    /// As you can see in [`Optimizer::run`],
    /// this method is called before the first iteration.
    fn preprocess(&mut self) -> Result<()>;

    /// Iteration `k` of the algorithm.
    /// `Break` carries the number of completed iterations.
    fn step(&mut self, iteration: usize) -> ControlFlow<usize>;

    /// Post-processing. Returns the final iterate.
    fn postprocess(&mut self) -> Vec<f64>;

    /// The current iterate `x_k`.
    fn current_iterate(&self) -> &[f64];

    /// The objective value at the current iterate.
    fn current_objective(&self) -> f64;

    /// The Frank-Wolfe gap measured in the last iteration.
    fn current_gap(&self) -> f64 {
        f64::NAN
    }

    /// The step size used in the last iteration.
    fn current_step_size(&self) -> f64 {
        f64::NAN
    }
}
