use crate::helpers;
use super::Constraint;

/// The l1-norm ball `{x : ‖x‖₁ ≤ R}`.
#[derive(Debug, Clone, Copy)]
pub struct L1Ball {
    radius: f64,
}

impl L1Ball {
    pub fn new(radius: f64) -> Self {
        Self { radius, }
    }
}

impl Constraint for L1Ball {
    fn name(&self) -> &str { "l1-norm ball" }

    fn radius(&self) -> f64 { self.radius }

    /// Returns the signed vertex `-R sign(gᵢ) eᵢ`
    /// where `i` is the first coordinate maximizing `|gᵢ|`.
    fn linear_minimizer(&self, grad: &[f64]) -> Vec<f64> {
        let mut v = vec![0f64; grad.len()];
        if let Some(i) = helpers::argmax_by(grad, f64::abs) {
            // `signum` of `0.0` is `1.0`, which still gives a vertex.
            v[i] = - grad[i].signum() * self.radius;
        }
        v
    }

    fn norm(&self, point: &[f64]) -> f64 {
        helpers::l1_norm(point)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn picks_largest_magnitude_coordinate() {
        let ball = L1Ball::new(3.0);
        let v = ball.linear_minimizer(&[0.5, -2.0, 1.0]);
        assert_eq!(v, vec![0.0, 3.0, 0.0]);

        let v = ball.linear_minimizer(&[0.5, 2.0, -2.0]);
        assert_eq!(v, vec![0.0, -3.0, 0.0]);
    }

    #[test]
    fn vertex_is_feasible_and_minimizes() {
        let ball = L1Ball::new(2.0);
        let g = [0.3, -0.1, 0.7, -0.69];
        let v = ball.linear_minimizer(&g);
        assert!(ball.contains(&v));
        let value = helpers::inner_product(&g, &v);
        // min over the ball is -R ‖g‖_∞.
        assert!((value + 2.0 * 0.7).abs() < 1e-12);
    }
}
