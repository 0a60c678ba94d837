// Activation functions, implemented through `ElementwiseFunction`.
pub mod relu;
pub mod sigmoid;
pub mod tanh;

pub use relu::{relu_op, Relu};
pub use sigmoid::{sigmoid_op, Sigmoid};
pub use tanh::{tanh_op, Tanh};
