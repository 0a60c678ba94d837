use crate::error::BackpropError;
use crate::node::Node;
use crate::ops::{apply_elementwise, ElementwiseFunction};
use crate::value::Element;

/// Absolute value. The derivative is `sign(x)` with `sign(0) = 0`.
#[derive(Debug, Clone, Copy, Default)]
pub struct Abs;

impl<T: Element> ElementwiseFunction<T> for Abs {
    fn name(&self) -> &'static str {
        "abs"
    }

    fn forward(&self, x: T) -> T {
        x.abs()
    }

    fn derivative(&self, x: T, _y: T) -> T {
        // `Float::signum` maps 0 to 1, the subgradient convention here is 0.
        if x > T::zero() {
            T::one()
        } else if x < T::zero() {
            -T::one()
        } else {
            T::zero()
        }
    }
}

/// Elementwise `|a|`.
pub fn abs_op<T: Element>(a: &Node<T>) -> Result<Node<T>, BackpropError> {
    apply_elementwise(&Abs, a)
}

#[cfg(test)]
#[path = "abs_test.rs"]
mod tests;
