// backprop-core/src/ops/linalg/matmul.rs

use crate::autograd::LocalGrad;
use crate::error::BackpropError;
use crate::node::{Node, OpKind};
use crate::ops::make_node;
use crate::value::Element;

/// Matrix product `a @ b` of two rank-2 nodes, `[m, n] @ [n, k] -> [m, k]`.
///
/// For `C = A @ B` the chain rule gives `dL/dA = dL/dC @ Bᵀ` and
/// `dL/dB = Aᵀ @ dL/dC`, so the node stores `Bᵀ` and `Aᵀ` as its local
/// derivatives.
///
/// # Errors
/// * `DimensionMismatch` if either operand is not rank 2.
/// * `ShapeMismatch` if the inner dimensions differ.
pub fn matmul_op<T: Element>(a: &Node<T>, b: &Node<T>) -> Result<Node<T>, BackpropError> {
    let value = a.value().matmul(b.value())?;
    let local_a = LocalGrad::MatMulLhs(b.value().transpose());
    let local_b = LocalGrad::MatMulRhs(a.value().transpose());
    make_node(OpKind::MatMul, value, Some((a, local_a)), Some((b, local_b)))
}

#[cfg(test)]
#[path = "matmul_test.rs"]
mod tests;
