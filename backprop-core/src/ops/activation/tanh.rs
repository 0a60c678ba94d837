use crate::error::BackpropError;
use crate::node::Node;
use crate::ops::{apply_elementwise, ElementwiseFunction};
use crate::value::Element;

/// Hyperbolic tangent; derivative `1 − tanh²(x)`.
#[derive(Debug, Clone, Copy, Default)]
pub struct Tanh;

impl<T: Element> ElementwiseFunction<T> for Tanh {
    fn name(&self) -> &'static str {
        "tanh"
    }

    fn forward(&self, x: T) -> T {
        x.tanh()
    }

    fn derivative(&self, _x: T, y: T) -> T {
        T::one() - y * y
    }
}

/// Element-wise `tanh(a)`, bounded in `(-1, 1)`.
pub fn tanh_op<T: Element>(a: &Node<T>) -> Result<Node<T>, BackpropError> {
    apply_elementwise(&Tanh, a)
}

#[cfg(test)]
#[path = "tanh_test.rs"]
mod tests;
