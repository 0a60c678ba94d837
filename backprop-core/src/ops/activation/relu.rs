use crate::error::BackpropError;
use crate::node::Node;
use crate::ops::{apply_elementwise, ElementwiseFunction};
use crate::value::Element;

/// Rectified Linear Unit: `ReLU(x) = max(0, x)`.
/// The derivative at 0 is taken as 0.
#[derive(Debug, Clone, Copy, Default)]
pub struct Relu;

impl<T: Element> ElementwiseFunction<T> for Relu {
    fn name(&self) -> &'static str {
        "relu"
    }

    fn forward(&self, x: T) -> T {
        if x > T::zero() {
            x
        } else {
            T::zero()
        }
    }

    fn derivative(&self, x: T, _y: T) -> T {
        if x > T::zero() {
            T::one()
        } else {
            T::zero()
        }
    }
}

/// Applies the Rectified Linear Unit (ReLU) activation function element-wise.
pub fn relu_op<T: Element>(a: &Node<T>) -> Result<Node<T>, BackpropError> {
    apply_elementwise(&Relu, a)
}

#[cfg(test)]
#[path = "relu_test.rs"]
mod tests;
