use crate::{
    helpers,
    constants::ZERO_TOLERANCE,
};
use super::Constraint;

const TIE_TOLERANCE: f64 = 1e-12;

/// The ball of the n-support norm (a.k.a. k-support norm)
/// `{x : ‖x‖_(n)^sp ≤ R}`.
///
/// The n-support norm is the tightest convex relaxation of
/// "n-sparse with bounded l2-norm";
/// for `n = 1` it is the l1-norm and for `n = d` the l2-norm.
/// Its dual norm is the l2-norm of the `n` largest entries in magnitude.
#[derive(Debug, Clone, Copy)]
pub struct NSupportBall {
    radius: f64,
    n: usize,
}

impl NSupportBall {
    /// A support size of `0` is raised to `1`,
    /// which makes the ball an l1 ball.
    pub fn new(radius: f64, n: usize) -> Self {
        Self { radius, n: n.max(1), }
    }

    /// The support size `n`.
    pub fn support(&self) -> usize {
        self.n
    }
}

impl Constraint for NSupportBall {
    fn name(&self) -> &str { "n-support norm ball" }

    fn radius(&self) -> f64 { self.radius }

    /// Keeps the `n` entries of `g` with the largest magnitude
    /// (earlier coordinates win ties), and returns `-R g̃ / ‖g̃‖₂`.
    fn linear_minimizer(&self, grad: &[f64]) -> Vec<f64> {
        let dim = grad.len();
        let mut ix = (0..dim).collect::<Vec<_>>();
        ix.sort_by(|&i, &j| grad[j].abs().total_cmp(&grad[i].abs()));

        let mut truncated = vec![0f64; dim];
        ix.into_iter()
            .take(self.n)
            .for_each(|i| { truncated[i] = grad[i]; });

        let norm = helpers::l2_norm(&truncated[..]);
        if norm * norm <= ZERO_TOLERANCE {
            return vec![0f64; dim];
        }
        truncated.iter_mut()
            .for_each(|t| { *t = - *t * self.radius / norm; });
        truncated
    }

    fn norm(&self, point: &[f64]) -> f64 {
        k_support_norm(point, self.n)
    }
}

/// Computes the k-support norm by the closed form of
/// Argyriou, Foygel, and Srebro (2012).
///
/// Let `z₁ ≥ z₂ ≥ ... ≥ z_d` be the sorted magnitudes and `z₀ = +∞`.
/// For the unique `r ∈ {0, ..., k-1}` with
/// ```txt
/// z_{k-r-1} > (1/(r+1)) Σ_{i ≥ k-r} zᵢ ≥ z_{k-r},
/// ```
/// the norm is
/// ```txt
/// sqrt( Σ_{i < k-r} zᵢ² + (1/(r+1)) (Σ_{i ≥ k-r} zᵢ)² ).
/// ```
pub fn k_support_norm(point: &[f64], k: usize) -> f64 {
    let dim = point.len();
    if dim == 0 { return 0f64; }
    let k = k.clamp(1, dim);

    let mut z = point.iter()
        .map(|p| p.abs())
        .collect::<Vec<_>>();
    z.sort_by(|a, b| b.total_cmp(a));

    // tail[i] = z[i] + z[i+1] + ... (0-indexed)
    let mut tail = vec![0f64; dim + 1];
    for i in (0..dim).rev() {
        tail[i] = tail[i + 1] + z[i];
    }
    let scale = tail[0].max(f64::MIN_POSITIVE);
    let tol = TIE_TOLERANCE * scale;

    for r in 0..k {
        // 0-indexed position of `z_{k-r}`.
        let pos = k - r - 1;
        let avg = tail[pos] / (r + 1) as f64;
        let upper = if pos == 0 { f64::INFINITY } else { z[pos - 1] };
        if upper + tol > avg && avg + tol >= z[pos] {
            let head = z[..pos].iter()
                .map(|zi| zi * zi)
                .sum::<f64>();
            return (head + tail[pos] * tail[pos] / (r + 1) as f64).sqrt();
        }
    }

    // Unreachable in exact arithmetic.
    let head = z[..k].iter().map(|zi| zi * zi).sum::<f64>();
    head.sqrt().max(tail[0] / (k as f64).sqrt())
}
