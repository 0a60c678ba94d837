//! Traversal and gradient engine.
//!
//! - [`graph`]: deterministic topological ordering of everything reachable from a root.
//! - [`backward`]: the reverse pass that applies the chain rule along that order.
//! - [`local_grad`]: the frozen per-operand derivatives nodes carry, and the chain-rule step.
//! - [`grad_check`]: finite-difference verification of analytic gradients.

pub mod backward;
pub mod grad_check;
pub mod graph;
pub mod local_grad;

pub use backward::{backward, reset_gradients, BackwardOptions};
pub use graph::topological_sort;
pub use local_grad::LocalGrad;
