use crate::error::BackpropError;
use crate::node::Node;
use crate::ops::{apply_elementwise, ElementwiseFunction};
use crate::value::Element;

/// Logistic sigmoid `σ(x) = 1 / (1 + e^(-x))`.
///
/// The derivative is computed from the output: `σ(x)(1 − σ(x))`.
#[derive(Debug, Clone, Copy, Default)]
pub struct Sigmoid;

impl<T: Element> ElementwiseFunction<T> for Sigmoid {
    fn name(&self) -> &'static str {
        "sigmoid"
    }

    fn forward(&self, x: T) -> T {
        // Split on the sign so `exp` never overflows.
        if x >= T::zero() {
            T::one() / (T::one() + (-x).exp())
        } else {
            let e = x.exp();
            e / (T::one() + e)
        }
    }

    fn derivative(&self, _x: T, y: T) -> T {
        y * (T::one() - y)
    }
}

/// Applies the sigmoid activation function element-wise.
pub fn sigmoid_op<T: Element>(a: &Node<T>) -> Result<Node<T>, BackpropError> {
    apply_elementwise(&Sigmoid, a)
}

#[cfg(test)]
#[path = "sigmoid_test.rs"]
mod tests;
