//! # Node Operations Module (`ops`)
//!
//! Every differentiable operation lives here, grouped by kind. Each operation
//! has an `xxx_op` function that evaluates the forward value, computes the local
//! derivatives at the operand values and hands both to [`make_node`].
//!
//! ## Extension contract
//!
//! A new operation must (a) compute its forward value from the operands'
//! current values, (b) build the result through [`make_node`] with the operand
//! as `left` (and `right` for binary operations) and the analytic derivative as
//! the local gradient, and (c) touch nothing else in the graph. Elementwise
//! functions only need to implement [`ElementwiseFunction`] and go through
//! [`apply_elementwise`].
//!
//! ## Key Submodules:
//!
//! - [`arithmetic`]: `+ - * /`, power and negation.
//! - [`math_elem`]: elementwise math functions (abs, ln, exp).
//! - [`activation`]: elementwise nonlinearities (sigmoid, tanh, relu).
//! - [`linalg`]: matrix product and transpose.
//! - [`reduction`]: sum.

use crate::autograd::LocalGrad;
use crate::error::BackpropError;
use crate::node::{Edge, Node, OpKind};
use crate::value::utils::elementwise_shape;
use crate::value::{Element, Value};
use log::trace;

pub mod activation;
pub mod arithmetic;
pub mod linalg;
pub mod math_elem;
pub mod reduction;

pub use activation::{relu_op, sigmoid_op, tanh_op, Relu, Sigmoid, Tanh};
pub use arithmetic::{add_op, div_op, mul_op, neg_op, pow_op, sub_op};
pub use linalg::{matmul_op, transpose_op};
pub use math_elem::{abs_op, exp_op, ln_op, Abs, Exp, Ln};
pub use reduction::sum_op;

/// Builds a new node from a forward value and its operands.
///
/// This is the only way non-leaf nodes come into existence. Each operand comes
/// with the derivative of `value` with respect to it; the derivative is checked
/// against the operand's shape (`ShapeMismatch` on violation). Operand
/// gradients are not touched and nothing is registered anywhere: the graph is
/// just the chain of operand references held by the returned node.
pub fn make_node<T: Element>(
    op: OpKind,
    value: Value<T>,
    left: Option<(&Node<T>, LocalGrad<T>)>,
    right: Option<(&Node<T>, LocalGrad<T>)>,
) -> Result<Node<T>, BackpropError> {
    if left.is_none() && right.is_some() {
        return Err(BackpropError::InternalError(format!(
            "operation {} has a right operand but no left operand",
            op
        )));
    }

    let left = left
        .map(|(node, local_grad)| edge(node, local_grad, value.shape()))
        .transpose()?;
    let right = right
        .map(|(node, local_grad)| edge(node, local_grad, value.shape()))
        .transpose()?;

    trace!("make_node: {} -> shape {:?}", op, value.shape());
    Ok(Node::from_parts(op, value, left, right))
}

fn edge<T: Element>(
    operand: &Node<T>,
    local_grad: LocalGrad<T>,
    node_shape: &[usize],
) -> Result<Edge<T>, BackpropError> {
    local_grad.check_against(node_shape, operand.shape())?;
    Ok(Edge {
        node: operand.clone(),
        local_grad,
    })
}

/// A differentiable function applied to every element of a node.
///
/// Implementors describe the math; [`apply_elementwise`] takes care of building
/// the node according to the extension contract.
pub trait ElementwiseFunction<T: Element> {
    /// Name shown for the resulting node, e.g. `"sigmoid"`.
    fn name(&self) -> &'static str;

    /// Rejects inputs for which the function is undefined, with a reason.
    fn check_domain(&self, _x: T) -> Result<(), String> {
        Ok(())
    }

    /// f(x).
    fn forward(&self, x: T) -> T;

    /// f'(x), given both the input `x` and the already computed output `y = f(x)`.
    fn derivative(&self, x: T, y: T) -> T;
}

/// Applies an [`ElementwiseFunction`] to `input`, producing a unary node whose
/// local derivative is `f'(x)` shaped like `input`.
pub fn apply_elementwise<T, F>(function: &F, input: &Node<T>) -> Result<Node<T>, BackpropError>
where
    T: Element,
    F: ElementwiseFunction<T> + ?Sized,
{
    unary_elementwise(
        OpKind::Elementwise(function.name()),
        function.name(),
        input,
        |x| function.check_domain(x),
        |x| function.forward(x),
        |x, y| function.derivative(x, y),
    )
}

/// Shared forward/derivative loop for unary elementwise operations.
pub(crate) fn unary_elementwise<T, C, F, D>(
    op: OpKind,
    name: &str,
    input: &Node<T>,
    check: C,
    forward: F,
    derivative: D,
) -> Result<Node<T>, BackpropError>
where
    T: Element,
    C: Fn(T) -> Result<(), String>,
    F: Fn(T) -> T,
    D: Fn(T, T) -> T,
{
    let x = input.value();
    for &xi in x.data() {
        check(xi).map_err(|reason| BackpropError::domain(name, reason))?;
    }
    let y = x.map(forward);
    let partials = x.zip_with(&y, name, derivative)?;
    make_node(op, y, Some((input, LocalGrad::Elementwise(partials))), None)
}

/// Shared forward/derivative loop for binary elementwise operations.
///
/// `partials(x, y, out)` returns `(d out/dx, d out/dy)`. Shapes must be equal
/// or one side rank 0; the partials are laid out like the result.
pub(crate) fn binary_elementwise<T, C, F, P>(
    op: OpKind,
    name: &str,
    a: &Node<T>,
    b: &Node<T>,
    check: C,
    forward: F,
    partials: P,
) -> Result<Node<T>, BackpropError>
where
    T: Element,
    C: Fn(T, T) -> Result<(), String>,
    F: Fn(T, T) -> T,
    P: Fn(T, T, T) -> (T, T),
{
    let shape = elementwise_shape(a.shape(), b.shape(), name)?;
    let numel: usize = shape.iter().product();
    let (av, bv) = (a.value(), b.value());

    let mut out = Vec::with_capacity(numel);
    let mut d_left = Vec::with_capacity(numel);
    let mut d_right = Vec::with_capacity(numel);
    for i in 0..numel {
        let (x, y) = (av.broadcast_at(i), bv.broadcast_at(i));
        check(x, y).map_err(|reason| BackpropError::domain(name, reason))?;
        let z = forward(x, y);
        let (dx, dy) = partials(x, y, z);
        out.push(z);
        d_left.push(dx);
        d_right.push(dy);
    }

    let value = Value::new(out, shape.clone())?;
    let local_left = LocalGrad::Elementwise(Value::new(d_left, shape.clone())?);
    let local_right = LocalGrad::Elementwise(Value::new(d_right, shape)?);
    make_node(op, value, Some((a, local_left)), Some((b, local_right)))
}

#[cfg(test)]
#[path = "make_node_test.rs"]
mod tests;
