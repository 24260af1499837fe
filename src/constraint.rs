//! Constraint sets and their linear minimization oracles.

pub mod constraint_trait;
pub mod l1_ball;
pub mod l2_ball;
pub mod n_support_ball;
pub mod simplex;

pub use constraint_trait::{Constraint, ConstraintType};
pub use l1_ball::L1Ball;
pub use l2_ball::L2Ball;
pub use n_support_ball::NSupportBall;
pub use simplex::Simplex;
