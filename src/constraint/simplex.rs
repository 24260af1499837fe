use crate::{
    helpers,
    constants::FEASIBILITY_TOLERANCE,
};
use super::Constraint;

/// The scaled probability simplex `{x ≥ 0 : Σ xᵢ = R}`.
#[derive(Debug, Clone, Copy)]
pub struct Simplex {
    radius: f64,
}

impl Simplex {
    pub fn new(radius: f64) -> Self {
        Self { radius, }
    }
}

impl Constraint for Simplex {
    fn name(&self) -> &str { "Simplex" }

    fn radius(&self) -> f64 { self.radius }

    /// Returns `R eᵢ` for the first coordinate minimizing `gᵢ`.
    fn linear_minimizer(&self, grad: &[f64]) -> Vec<f64> {
        let mut v = vec![0f64; grad.len()];
        if let Some(i) = helpers::argmax_by(grad, |g| -g) {
            v[i] = self.radius;
        }
        v
    }

    fn norm(&self, point: &[f64]) -> f64 {
        helpers::l1_norm(point)
    }

    fn contains(&self, point: &[f64]) -> bool {
        let tol = FEASIBILITY_TOLERANCE * (1f64 + self.radius);
        let sum = point.iter().sum::<f64>();
        point.iter().all(|&p| p >= -tol) && (sum - self.radius).abs() <= tol
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn picks_smallest_coordinate() {
        let simplex = Simplex::new(2.0);
        let v = simplex.linear_minimizer(&[0.5, -2.0, -2.0, 1.0]);
        assert_eq!(v, vec![0.0, 2.0, 0.0, 0.0]);
        assert!(simplex.contains(&v));
    }

    #[test]
    fn contains_requires_the_full_mass() {
        let simplex = Simplex::new(1.0);
        assert!(simplex.contains(&[0.25, 0.75]));
        assert!(!simplex.contains(&[0.25, 0.25]));
        assert!(!simplex.contains(&[-0.5, 1.5]));
    }
}
