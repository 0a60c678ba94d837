use crate::error::BackpropError;
use crate::node::Node;
use crate::ops::{apply_elementwise, ElementwiseFunction};
use crate::value::Element;

/// Natural logarithm, defined for `x > 0`. Derivative `1/x`.
#[derive(Debug, Clone, Copy, Default)]
pub struct Ln;

impl<T: Element> ElementwiseFunction<T> for Ln {
    fn name(&self) -> &'static str {
        "ln"
    }

    fn check_domain(&self, x: T) -> Result<(), String> {
        if x > T::zero() {
            Ok(())
        } else {
            Err(format!("logarithm of non-positive value {}", x))
        }
    }

    fn forward(&self, x: T) -> T {
        x.ln()
    }

    fn derivative(&self, x: T, _y: T) -> T {
        T::one() / x
    }
}

/// Elementwise natural logarithm.
///
/// # Errors
/// `DomainError` if any element is zero or negative.
pub fn ln_op<T: Element>(a: &Node<T>) -> Result<Node<T>, BackpropError> {
    apply_elementwise(&Ln, a)
}

#[cfg(test)]
#[path = "ln_test.rs"]
mod tests;
