use crate::error::BackpropError;
use crate::node::{Node, OpKind};
use crate::ops::unary_elementwise;
use crate::value::Element;

/// Elementwise negation `-a`. Local derivative: `-1`.
pub fn neg_op<T: Element>(a: &Node<T>) -> Result<Node<T>, BackpropError> {
    unary_elementwise(
        OpKind::Neg,
        "neg",
        a,
        |_| Ok(()),
        |x| -x,
        |_, _| -T::one(),
    )
}

#[cfg(test)]
#[path = "neg_test.rs"]
mod tests;
