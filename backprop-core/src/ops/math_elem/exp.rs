use crate::error::BackpropError;
use crate::node::Node;
use crate::ops::{apply_elementwise, ElementwiseFunction};
use crate::value::Element;

/// Exponential. The derivative is the output itself.
#[derive(Debug, Clone, Copy, Default)]
pub struct Exp;

impl<T: Element> ElementwiseFunction<T> for Exp {
    fn name(&self) -> &'static str {
        "exp"
    }

    fn forward(&self, x: T) -> T {
        x.exp()
    }

    fn derivative(&self, _x: T, y: T) -> T {
        y
    }
}

/// Elementwise `e^a`.
pub fn exp_op<T: Element>(a: &Node<T>) -> Result<Node<T>, BackpropError> {
    apply_elementwise(&Exp, a)
}

#[cfg(test)]
#[path = "exp_test.rs"]
mod tests;
