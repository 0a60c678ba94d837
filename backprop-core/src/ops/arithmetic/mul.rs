use crate::error::BackpropError;
use crate::node::{Node, OpKind};
use crate::ops::binary_elementwise;
use crate::value::Element;

/// Elementwise multiplication `a * b`.
///
/// Local derivatives: `b` for the left operand, `a` for the right. When both
/// operands are the same node (`x * x`) the two contributions are summed by the
/// backward pass, giving `2x`.
pub fn mul_op<T: Element>(a: &Node<T>, b: &Node<T>) -> Result<Node<T>, BackpropError> {
    binary_elementwise(
        OpKind::Mul,
        "mul",
        a,
        b,
        |_, _| Ok(()),
        |x, y| x * y,
        |x, y, _| (y, x),
    )
}

#[cfg(test)]
#[path = "mul_test.rs"]
mod tests;
