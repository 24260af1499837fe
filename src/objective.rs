//! Objective functions minimized by the Frank-Wolfe variants.

pub mod objective_function;
pub mod logistic_loss;

pub use objective_function::ObjectiveFunction;
pub use logistic_loss::LogisticLoss;
