use crate::{
    helpers,
    constants::ZERO_TOLERANCE,
};
use super::Constraint;

/// The l2-norm ball `{x : ‖x‖₂ ≤ R}`.
#[derive(Debug, Clone, Copy)]
pub struct L2Ball {
    radius: f64,
}

impl L2Ball {
    pub fn new(radius: f64) -> Self {
        Self { radius, }
    }
}

impl Constraint for L2Ball {
    fn name(&self) -> &str { "l2-norm ball" }

    fn radius(&self) -> f64 { self.radius }

    /// Returns `-R g / ‖g‖₂`, or the origin if `g = 0`.
    fn linear_minimizer(&self, grad: &[f64]) -> Vec<f64> {
        let norm = helpers::l2_norm(grad);
        if norm * norm <= ZERO_TOLERANCE {
            return vec![0f64; grad.len()];
        }
        grad.iter()
            .map(|g| - g * self.radius / norm)
            .collect()
    }

    fn norm(&self, point: &[f64]) -> f64 {
        helpers::l2_norm(point)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn points_against_gradient() {
        let ball = L2Ball::new(5.0);
        let v = ball.linear_minimizer(&[3.0, -4.0]);
        assert!((v[0] + 3.0).abs() < 1e-12);
        assert!((v[1] - 4.0).abs() < 1e-12);
        assert!(ball.contains(&v));
    }

    #[test]
    fn zero_gradient_gives_origin() {
        let ball = L2Ball::new(1.0);
        assert_eq!(ball.linear_minimizer(&[0.0, 0.0]), vec![0.0, 0.0]);
    }
}
