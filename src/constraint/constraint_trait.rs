use std::fmt;
use std::str::FromStr;

use serde::{Serialize, Deserialize};

use crate::{
    checkers,
    constants::{DEFAULT_N_SUPPORT, FEASIBILITY_TOLERANCE},
    error::{FwError, Result},
};
use super::{L1Ball, L2Ball, NSupportBall, Simplex};

/// A compact convex set `C ⊂ ℝᵈ` accessed through
/// its linear minimization oracle.
pub trait Constraint {
    /// The name of the constraint set.
    fn name(&self) -> &str;

    /// The radius `R` of the set.
    fn radius(&self) -> f64;

    /// Linear minimization oracle.
    /// Returns `v ∈ C` minimizing `⟨grad, v⟩`.
    fn linear_minimizer(&self, grad: &[f64]) -> Vec<f64>;

    /// The gauge of the set scaled by `R`, i.e., `C = {x : norm(x) ≤ R}`.
    fn norm(&self, point: &[f64]) -> f64;

    /// Returns `true` if `point ∈ C` up to a small tolerance.
    fn contains(&self, point: &[f64]) -> bool {
        let radius = self.radius();
        self.norm(point) <= radius + FEASIBILITY_TOLERANCE * (1f64 + radius)
    }
}

impl<C: Constraint + ?Sized> Constraint for Box<C> {
    fn name(&self) -> &str { (**self).name() }
    fn radius(&self) -> f64 { (**self).radius() }
    fn linear_minimizer(&self, grad: &[f64]) -> Vec<f64> {
        (**self).linear_minimizer(grad)
    }
    fn norm(&self, point: &[f64]) -> f64 { (**self).norm(point) }
    fn contains(&self, point: &[f64]) -> bool { (**self).contains(point) }
}

/// Names of the constraint sets selectable from the command line
/// or an experiment config.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ConstraintType {
    /// `‖x‖₁ ≤ R`.
    #[serde(rename = "l1")]
    L1,
    /// `‖x‖₂ ≤ R`.
    #[serde(rename = "l2")]
    L2,
    /// n-support norm ball with `n = 2`.
    #[serde(rename = "n_supp")]
    NSupport,
    /// `{x ≥ 0, Σ x = R}`.
    #[serde(rename = "simplex")]
    Simplex,
}

impl ConstraintType {
    /// Builds the constraint set of radius `radius` in dimension `dim`.
    pub fn build(self, radius: f64, dim: usize)
        -> Result<Box<dyn Constraint + Send + Sync>>
    {
        checkers::radius(radius)?;
        let constraint: Box<dyn Constraint + Send + Sync> = match self {
            Self::L1 => Box::new(L1Ball::new(radius)),
            Self::L2 => Box::new(L2Ball::new(radius)),
            Self::NSupport => {
                let n = DEFAULT_N_SUPPORT.min(dim).max(1);
                Box::new(NSupportBall::new(radius, n))
            },
            Self::Simplex => Box::new(Simplex::new(radius)),
        };
        Ok(constraint)
    }
}

impl FromStr for ConstraintType {
    type Err = FwError;
    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "l1" => Ok(Self::L1),
            "l2" => Ok(Self::L2),
            "n_supp" | "nsupp" | "n-supp" => Ok(Self::NSupport),
            "simplex" => Ok(Self::Simplex),
            _ => Err(FwError::UnsupportedConstraint(s.to_string())),
        }
    }
}

impl fmt::Display for ConstraintType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::L1 => "l1",
            Self::L2 => "l2",
            Self::NSupport => "n_supp",
            Self::Simplex => "simplex",
        };
        write!(f, "{name}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_is_case_insensitive() {
        assert_eq!("L1".parse::<ConstraintType>().unwrap(), ConstraintType::L1);
        assert_eq!("N_SUPP".parse::<ConstraintType>().unwrap(), ConstraintType::NSupport);
        assert!(matches!(
            "linf".parse::<ConstraintType>(),
            Err(FwError::UnsupportedConstraint(_)),
        ));
    }

    #[test]
    fn display_round_trips() {
        for ty in [
            ConstraintType::L1,
            ConstraintType::L2,
            ConstraintType::NSupport,
            ConstraintType::Simplex,
        ] {
            assert_eq!(ty.to_string().parse::<ConstraintType>().unwrap(), ty);
        }
    }

    #[test]
    fn build_rejects_bad_radius() {
        assert!(ConstraintType::L2.build(-1.0, 3).is_err());
        let c = ConstraintType::NSupport.build(2.0, 1).unwrap();
        assert_eq!(c.radius(), 2.0);
    }
}
