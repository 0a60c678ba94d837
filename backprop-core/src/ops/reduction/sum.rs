use crate::autograd::LocalGrad;
use crate::error::BackpropError;
use crate::node::{Node, OpKind};
use crate::ops::make_node;
use crate::value::{Element, Value};

/// Sums all elements of `a` into a rank-0 node.
///
/// Turns a tensor-valued expression into a scalar loss that `backward()` can
/// start from. The local derivative is a tensor of ones shaped like `a`.
pub fn sum_op<T: Element>(a: &Node<T>) -> Result<Node<T>, BackpropError> {
    let value = Value::scalar(a.value().sum());
    let local = LocalGrad::Elementwise(Value::ones_like(a.value()));
    make_node(OpKind::Sum, value, Some((a, local)), None)
}

#[cfg(test)]
#[path = "sum_test.rs"]
mod tests;
