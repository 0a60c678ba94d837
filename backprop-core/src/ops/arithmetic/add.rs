// backprop-core/src/ops/arithmetic/add.rs

use crate::error::BackpropError;
use crate::node::{Node, OpKind};
use crate::ops::binary_elementwise;
use crate::value::Element;

/// Elementwise addition `a + b`.
///
/// Local derivatives: `1` for both operands.
///
/// # Errors
/// `ShapeMismatch` unless the shapes are equal or one side is rank 0.
pub fn add_op<T: Element>(a: &Node<T>, b: &Node<T>) -> Result<Node<T>, BackpropError> {
    binary_elementwise(
        OpKind::Add,
        "add",
        a,
        b,
        |_, _| Ok(()),
        |x, y| x + y,
        |_, _, _| (T::one(), T::one()),
    )
}

#[cfg(test)]
#[path = "add_test.rs"]
mod tests;
