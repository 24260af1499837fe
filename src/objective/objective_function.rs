/// This trait defines the smooth objectives `f: ℝᵈ → ℝ`.
pub trait ObjectiveFunction {
    /// The name of the objective function.
    fn name(&self) -> &str;

    /// The dimension `d` of the domain.
    fn dim(&self) -> usize;

    /// Returns the smoothness constant `L` w.r.t. the l2-norm.
    /// We say that a function `f` is L-smooth if
    /// ```txt
    /// f(y) ≤ f(x) + ∇f(x)∙(y - x) + (L/2) ‖y - x‖_2^2
    /// ```
    fn smoothness(&self) -> f64;

    /// Objective value at `point`.
    fn objective_value(&self, point: &[f64]) -> f64;

    /// Gradient vector at `point`.
    fn gradient(&self, point: &[f64]) -> Vec<f64>;

    /// Returns a local smoothness constant along the segment `[x, v]`,
    /// or `None` if the objective does not provide one
    /// (or the segment is degenerate).
    fn directional_smoothness(&self, _x: &[f64], _v: &[f64]) -> Option<f64> {
        None
    }
}
