//! Minimal reverse-mode automatic differentiation.
//!
//! Build expressions from [`Node`]s with the operator traits or the `*_op`
//! functions in [`ops`], then call [`Node::backward`] on a single-element
//! result. Every node reachable from that root ends up holding the derivative
//! of the root with respect to itself.
//!
//! ```
//! use backprop_core::Node;
//!
//! let x = Node::scalar(3.0_f64);
//! let y = Node::scalar(4.0_f64);
//! let z = (&x + &y) * &x;
//! z.backward().unwrap();
//! assert_eq!(x.gradient().item().unwrap(), 10.0);
//! assert_eq!(y.gradient().item().unwrap(), 3.0);
//! ```

pub mod autograd;
pub mod error;
pub mod node;
pub mod ops;
pub mod value;

pub use autograd::grad_check::{check_grad, GradCheckError};
pub use autograd::{backward, reset_gradients, topological_sort, BackwardOptions, LocalGrad};
pub use error::BackpropError;
pub use node::{Node, NodeId, OpKind};
pub use ops::{apply_elementwise, make_node, ElementwiseFunction};
pub use value::{Element, Value};

// Re-export traits required by public functions/structs
pub use num_traits;
