//! Evaluation pass for Tint
//!
//! Folds expressions to literals, substitutes variables and eliminates
//! conditionals, producing the minimized tree the generator consumes.

mod eval;

pub use eval::Evaluator;
