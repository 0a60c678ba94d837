use crate::autograd::LocalGrad;
use crate::error::BackpropError;
use crate::node::{Node, OpKind};
use crate::ops::make_node;
use crate::value::Element;

/// Swaps the axes of a matrix node. Rank 0 and rank 1 nodes pass through unchanged
/// (as a new node). The gradient flows back transposed.
pub fn transpose_op<T: Element>(a: &Node<T>) -> Result<Node<T>, BackpropError> {
    make_node(
        OpKind::Transpose,
        a.value().transpose(),
        Some((a, LocalGrad::Transpose)),
        None,
    )
}

#[cfg(test)]
#[path = "transpose_test.rs"]
mod tests;
