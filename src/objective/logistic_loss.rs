use rayon::prelude::*;

use crate::{
    Sample,
    checkers,
    helpers,
    constants::ZERO_TOLERANCE,
    error::Result,
};
use super::ObjectiveFunction;

/// The empirical logistic loss over a binary classification sample.
/// ```txt
/// f(x) = (1/n) Σᵢ log(1 + exp(-yᵢ aᵢᵀx))
/// ```
/// The labels must take values in `{-1, +1}`.
pub struct LogisticLoss<'a> {
    sample: &'a Sample,
    smoothness: f64,
}

impl<'a> LogisticLoss<'a> {
    /// Creates the logistic loss over `sample`.
    /// The smoothness constant `‖A‖²_F / (4n)` is computed here.
    pub fn new(sample: &'a Sample) -> Result<Self> {
        checkers::sample(sample)?;
        checkers::binary_labels(sample)?;

        let n_sample = sample.shape().0 as f64;
        let smoothness = sample.squared_frobenius_norm() / (4f64 * n_sample);
        Ok(Self { sample, smoothness, })
    }

    /// Returns the margins `yᵢ aᵢᵀx`.
    pub fn margins(&self, point: &[f64]) -> Vec<f64> {
        let mut scores = self.sample.matvec(point);
        scores.par_iter_mut()
            .zip(self.sample.target())
            .for_each(|(s, y)| { *s *= y; });
        scores
    }
}

impl ObjectiveFunction for LogisticLoss<'_> {
    fn name(&self) -> &str {
        "Logistic loss"
    }

    fn dim(&self) -> usize {
        self.sample.shape().1
    }

    fn smoothness(&self) -> f64 {
        self.smoothness
    }

    fn objective_value(&self, point: &[f64]) -> f64 {
        let n_sample = self.sample.shape().0 as f64;
        self.margins(point)
            .into_par_iter()
            .map(|yax| helpers::softplus(-yax))
            .sum::<f64>()
            / n_sample
    }

    /// ```txt
    /// ∇f(x) = -(1/n) Aᵀ (y ⊙ σ(-y ⊙ Ax))
    /// ```
    fn gradient(&self, point: &[f64]) -> Vec<f64> {
        let n_sample = self.sample.shape().0 as f64;
        let coef = self.margins(point)
            .into_par_iter()
            .zip(self.sample.target())
            .map(|(yax, y)| - y * helpers::sigmoid(-yax) / n_sample)
            .collect::<Vec<_>>();
        self.sample.transposed_matvec(&coef[..])
    }

    /// ```txt
    /// L(x, v) = ‖A(v - x)‖² / (4n ‖v - x‖²)
    /// ```
    fn directional_smoothness(&self, x: &[f64], v: &[f64]) -> Option<f64> {
        let dir = helpers::difference(v, x);
        let denom = helpers::squared_l2_norm(&dir[..]);
        if denom <= ZERO_TOLERANCE { return None; }

        let n_sample = self.sample.shape().0 as f64;
        let image = self.sample.matvec(&dir[..]);
        let numer = helpers::squared_l2_norm(&image[..]);
        Some(numer / (4f64 * n_sample * denom))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn toy_sample() -> Sample {
        let rows = vec![
            vec![ 1.0,  0.5, -0.2],
            vec![-0.3,  1.0,  0.0],
            vec![ 0.0, -1.5,  2.0],
            vec![ 2.0,  0.0,  1.0],
        ];
        Sample::from_rows(rows, vec![1.0, -1.0, 1.0, -1.0]).unwrap()
    }

    #[test]
    fn value_at_origin_is_log2() {
        let sample = toy_sample();
        let f = LogisticLoss::new(&sample).unwrap();
        let val = f.objective_value(&[0.0, 0.0, 0.0]);
        assert!((val - 2f64.ln()).abs() < 1e-12);
    }

    #[test]
    fn gradient_matches_finite_differences() {
        let sample = toy_sample();
        let f = LogisticLoss::new(&sample).unwrap();
        let x = vec![0.3, -0.7, 0.2];
        let grad = f.gradient(&x);

        let h = 1e-6;
        for j in 0..x.len() {
            let mut xp = x.clone();
            let mut xm = x.clone();
            xp[j] += h;
            xm[j] -= h;
            let fd = (f.objective_value(&xp) - f.objective_value(&xm)) / (2.0 * h);
            assert!(
                (fd - grad[j]).abs() < 1e-6,
                "coordinate {j}: finite difference {fd}, gradient {}", grad[j],
            );
        }
    }

    #[test]
    fn directional_smoothness_is_bounded_by_global_one() {
        let sample = toy_sample();
        let f = LogisticLoss::new(&sample).unwrap();
        let x = vec![0.1, 0.2, 0.3];
        let v = vec![-1.0, 0.0, 2.0];
        let local = f.directional_smoothness(&x, &v).unwrap();
        assert!(local > 0.0);
        assert!(local <= f.smoothness() + 1e-12);

        assert!(f.directional_smoothness(&x, &x).is_none());
    }

    #[test]
    fn rejects_non_binary_labels() {
        let rows = vec![vec![1.0], vec![2.0]];
        let sample = Sample::from_rows(rows, vec![1.0, 2.0]).unwrap();
        assert!(LogisticLoss::new(&sample).is_err());
    }
}
