use crate::error::BackpropError;
use crate::node::{Node, OpKind};
use crate::ops::binary_elementwise;
use crate::value::Element;

/// Elementwise subtraction `a - b`. Local derivatives: `1` and `-1`.
pub fn sub_op<T: Element>(a: &Node<T>, b: &Node<T>) -> Result<Node<T>, BackpropError> {
    binary_elementwise(
        OpKind::Sub,
        "sub",
        a,
        b,
        |_, _| Ok(()),
        |x, y| x - y,
        |_, _, _| (T::one(), -T::one()),
    )
}

#[cfg(test)]
#[path = "sub_test.rs"]
mod tests;
