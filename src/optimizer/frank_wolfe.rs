//! The Frank-Wolfe algorithm and its heavy-ball momentum variants.
use std::ops::ControlFlow;

use crate::{
    Sample,
    checkers,
    helpers,
    constants::{DEFAULT_ITERATIONS, DEFAULT_TOLERANCE, ZERO_TOLERANCE},
    constraint::{Constraint, ConstraintType},
    error::{FwError, Result},
    objective::{LogisticLoss, ObjectiveFunction},
};
use super::{History, Optimizer, StepSize, Variant};

/// The Frank-Wolfe algorithm with heavy-ball momentum.
///
/// In each iteration `k = 0, 1, ...`,
/// ```txt
///     gₖ   = δₖ ∇f(xₖ) + (1 - δₖ) gₖ₋₁
///     vₖ   = argmin_{v ∈ C} ⟨gₖ, v⟩
///     xₖ₊₁ = (1 - ηₖ) xₖ + ηₖ vₖ
/// ```
/// where `δₖ` is given by [`Variant`] and `ηₖ` by [`StepSize`].
///
/// # Example
/// ```no_run
/// use hbfw::prelude::*;
///
/// let sample = Sample::from_svmlight("mushrooms")
///     .unwrap()
///     .normalize_binary_target()
///     .unwrap();
/// let objective = LogisticLoss::new(&sample).unwrap();
/// let constraint = L1Ball::new(10.0);
///
/// let mut optimizer = FrankWolfe::init(objective, constraint)
///     .variant(Variant::Weighted)
///     .step_size(StepSize::Smooth)
///     .max_iter(500);
/// let x = optimizer.run().unwrap();
/// println!("final loss: {:?}", optimizer.history().last_objective());
/// ```
pub struct FrankWolfe<F, C> {
    objective: F,
    constraint: C,
    variant: Variant,
    step_size: StepSize,
    max_iter: usize,
    tolerance: f64,

    x_init: Option<Vec<f64>>,
    x: Vec<f64>,
    momentum: Vec<f64>,
    history: History,
}

impl<F, C> FrankWolfe<F, C> {
    /// Creates a vanilla Frank-Wolfe instance
    /// with the parameter-free step size.
    pub fn init(objective: F, constraint: C) -> Self {
        Self {
            objective,
            constraint,
            variant: Variant::Vanilla,
            step_size: StepSize::ParameterFree,
            max_iter: DEFAULT_ITERATIONS,
            tolerance: DEFAULT_TOLERANCE,

            x_init: None,
            x: Vec::new(),
            momentum: Vec::new(),
            history: History::default(),
        }
    }

    /// Set the variant (momentum schedule).
    pub fn variant(mut self, variant: Variant) -> Self {
        self.variant = variant;
        self
    }

    /// Set the step size rule.
    pub fn step_size(mut self, step_size: StepSize) -> Self {
        self.step_size = step_size;
        self
    }

    /// Set the number of iterations.
    pub fn max_iter(mut self, max_iter: usize) -> Self {
        self.max_iter = max_iter;
        self
    }

    /// Stop once the Frank-Wolfe gap drops to `tolerance`.
    /// `0` (default) runs all iterations.
    pub fn tolerance(mut self, tolerance: f64) -> Self {
        self.tolerance = tolerance;
        self
    }

    /// Set the initial point. It must lie in the constraint set.
    /// By default, the origin is used if feasible,
    /// and the LMO output for `∇f(0)` otherwise.
    pub fn initial_point(mut self, x: Vec<f64>) -> Self {
        self.x_init = Some(x);
        self
    }

    /// The trace of the current (or last) run.
    pub fn history(&self) -> &History {
        &self.history
    }

    /// Consumes `self` and returns the trace.
    pub fn into_history(self) -> History {
        self.history
    }
}

impl<F, C> FrankWolfe<F, C>
    where F: ObjectiveFunction,
          C: Constraint,
{
    fn initial_iterate(&self) -> Vec<f64> {
        if let Some(x) = &self.x_init {
            return x.clone();
        }
        let zero = vec![0f64; self.objective.dim()];
        if self.constraint.contains(&zero[..]) {
            zero
        } else {
            let grad = self.objective.gradient(&zero[..]);
            self.constraint.linear_minimizer(&grad[..])
        }
    }

    /// Computes `ηₖ` for the segment `[xₖ, vₖ]`.
    fn next_step_size(&self, iteration: usize, grad: &[f64], v: &[f64])
        -> f64
    {
        let smoothness = match self.step_size {
            StepSize::ParameterFree => {
                return self.variant.parameter_free_step(iteration);
            },
            StepSize::Smooth => self.objective.smoothness(),
            StepSize::DirectionallySmooth => {
                self.objective.directional_smoothness(&self.x[..], v)
                    .unwrap_or_else(|| self.objective.smoothness())
            },
        };

        let dir = helpers::difference(&self.x[..], v);
        let sq_norm = helpers::squared_l2_norm(&dir[..]);
        // `xₖ = vₖ`. Any step size gives the same point.
        if sq_norm <= ZERO_TOLERANCE { return 0f64; }

        let numer = helpers::inner_product(grad, &dir[..]);
        if smoothness <= 0f64 {
            // The objective is linear along the segment.
            return if numer > 0f64 { 1f64 } else { 0f64 };
        }
        (numer / (smoothness * sq_norm)).clamp(0f64, 1f64)
    }
}

impl<F, C> Optimizer for FrankWolfe<F, C>
    where F: ObjectiveFunction,
          C: Constraint,
{
    fn name(&self) -> &str {
        match self.variant {
            Variant::Vanilla => "Frank-Wolfe",
            Variant::Weighted => "Weighted heavy-ball Frank-Wolfe",
            Variant::Uniform => "Uniform heavy-ball Frank-Wolfe",
        }
    }

    fn info(&self) -> Option<Vec<(&str, String)>> {
        let tolerance = if self.tolerance > 0f64 {
            format!("{}", self.tolerance)
        } else {
            "-".to_string()
        };
        let info = Vec::from([
            ("Objective", self.objective.name().to_string()),
            ("Constraint", self.constraint.name().to_string()),
            ("Radius", format!("{}", self.constraint.radius())),
            ("Step size", self.step_size.to_string()),
            ("Max. iter.", format!("{}", self.max_iter)),
            ("Tolerance", tolerance),
        ]);
        Some(info)
    }

    fn preprocess(&mut self) -> Result<()> {
        if self.max_iter == 0 {
            return Err(FwError::InvalidParameter(
                "the number of iterations must be positive".into()
            ));
        }
        if !(self.tolerance >= 0f64) {
            return Err(FwError::InvalidParameter(format!(
                "the tolerance must be non-negative. got {}.", self.tolerance
            )));
        }

        let dim = self.objective.dim();
        let x = self.initial_iterate();
        checkers::dimension(dim, x.len())?;
        if !self.constraint.contains(&x[..]) {
            return Err(FwError::Infeasible {
                norm: self.constraint.norm(&x[..]),
                radius: self.constraint.radius(),
            });
        }

        self.history = History::with_capacity(self.max_iter);
        self.history.start(self.objective.objective_value(&x[..]));
        self.x = x;
        self.momentum = vec![0f64; dim];
        Ok(())
    }

    fn step(&mut self, iteration: usize) -> ControlFlow<usize> {
        if iteration >= self.max_iter {
            return ControlFlow::Break(iteration);
        }

        // Step 1: gradient calculation
        let grad = self.objective.gradient(&self.x[..]);

        // Step 2: heavy-ball momentum
        let delta = self.variant.momentum_weight(iteration);
        helpers::blend_into(delta, &grad[..], &mut self.momentum[..]);

        // Step 3: linear minimization oracle
        let v = self.constraint.linear_minimizer(&self.momentum[..]);

        // The Frank-Wolfe gap at `xₖ` uses the true gradient.
        let gap = if self.variant == Variant::Vanilla {
            let dir = helpers::difference(&self.x[..], &v[..]);
            helpers::inner_product(&grad[..], &dir[..])
        } else {
            let s = self.constraint.linear_minimizer(&grad[..]);
            let dir = helpers::difference(&self.x[..], &s[..]);
            helpers::inner_product(&grad[..], &dir[..])
        };

        // Step 4: step size
        let stepsize = self.next_step_size(iteration, &grad[..], &v[..]);
        checkers::stepsize(stepsize);

        // Step 5: update
        self.x = helpers::interior_point(stepsize, &self.x[..], &v[..]);
        let value = self.objective.objective_value(&self.x[..]);
        self.history.push(value, gap, stepsize);

        let completed = iteration + 1;
        if self.tolerance > 0f64 && gap <= self.tolerance {
            return ControlFlow::Break(completed);
        }
        if completed >= self.max_iter {
            return ControlFlow::Break(completed);
        }
        ControlFlow::Continue(())
    }

    fn postprocess(&mut self) -> Vec<f64> {
        self.x.clone()
    }

    fn current_iterate(&self) -> &[f64] {
        &self.x[..]
    }

    fn current_objective(&self) -> f64 {
        self.history.last_objective().unwrap_or(f64::NAN)
    }

    fn current_gap(&self) -> f64 {
        self.history.fw_gaps.last().copied().unwrap_or(f64::NAN)
    }

    fn current_step_size(&self) -> f64 {
        self.history.step_sizes.last().copied().unwrap_or(f64::NAN)
    }
}

fn run_on_logistic_loss(
    variant: Variant,
    x_init: &[f64],
    n_iter: usize,
    sample: &Sample,
    constraint: ConstraintType,
    radius: f64,
    step_size: StepSize,
) -> Result<Vec<f64>>
{
    let objective = LogisticLoss::new(sample)?;
    let constraint = constraint.build(radius, objective.dim())?;
    let mut optimizer = FrankWolfe::init(objective, constraint)
        .variant(variant)
        .step_size(step_size)
        .max_iter(n_iter)
        .initial_point(x_init.to_vec());
    optimizer.run()?;
    Ok(optimizer.into_history().objective_values)
}

/// Runs vanilla Frank-Wolfe on the logistic loss over `sample`
/// and returns `f(x₀), f(x₁), ..., f(x_{n_iter})`.
pub fn fw(
    x_init: &[f64],
    n_iter: usize,
    sample: &Sample,
    constraint: ConstraintType,
    radius: f64,
    step_size: StepSize,
) -> Result<Vec<f64>>
{
    run_on_logistic_loss(
        Variant::Vanilla, x_init, n_iter, sample, constraint, radius, step_size,
    )
}

/// Same as [`fw`] with the weighted momentum `δₖ = 2 / (k + 2)`.
pub fn wfw(
    x_init: &[f64],
    n_iter: usize,
    sample: &Sample,
    constraint: ConstraintType,
    radius: f64,
    step_size: StepSize,
) -> Result<Vec<f64>>
{
    run_on_logistic_loss(
        Variant::Weighted, x_init, n_iter, sample, constraint, radius, step_size,
    )
}

/// Same as [`fw`] with the uniform momentum `δₖ = 1 / (k + 1)`.
pub fn ufw(
    x_init: &[f64],
    n_iter: usize,
    sample: &Sample,
    constraint: ConstraintType,
    radius: f64,
    step_size: StepSize,
) -> Result<Vec<f64>>
{
    run_on_logistic_loss(
        Variant::Uniform, x_init, n_iter, sample, constraint, radius, step_size,
    )
}
