use crate::error::BackpropError;
use crate::node::Node;
use crate::ops::{self, ElementwiseFunction};
use crate::value::Element;

// Fallible method forms of the operations. The operator traits in `traits.rs`
// cover `+ - * /` and negation.
impl<T: Element> Node<T> {
    /// `self ^ exponent`, elementwise.
    pub fn pow(&self, exponent: &Node<T>) -> Result<Node<T>, BackpropError> {
        ops::pow_op(self, exponent)
    }

    /// `self ^ exponent` with a constant exponent.
    ///
    /// The constant becomes a fresh leaf, so it also receives a gradient.
    pub fn powf(&self, exponent: T) -> Result<Node<T>, BackpropError> {
        ops::pow_op(self, &Node::scalar(exponent))
    }

    pub fn abs(&self) -> Result<Node<T>, BackpropError> {
        ops::abs_op(self)
    }

    pub fn ln(&self) -> Result<Node<T>, BackpropError> {
        ops::ln_op(self)
    }

    pub fn exp(&self) -> Result<Node<T>, BackpropError> {
        ops::exp_op(self)
    }

    pub fn sigmoid(&self) -> Result<Node<T>, BackpropError> {
        ops::sigmoid_op(self)
    }

    pub fn tanh(&self) -> Result<Node<T>, BackpropError> {
        ops::tanh_op(self)
    }

    pub fn relu(&self) -> Result<Node<T>, BackpropError> {
        ops::relu_op(self)
    }

    /// Matrix product `self @ other`.
    pub fn matmul(&self, other: &Node<T>) -> Result<Node<T>, BackpropError> {
        ops::matmul_op(self, other)
    }

    /// Transpose of a matrix node.
    pub fn t(&self) -> Result<Node<T>, BackpropError> {
        ops::transpose_op(self)
    }

    /// Sum of all elements, as a rank-0 node.
    pub fn sum(&self) -> Result<Node<T>, BackpropError> {
        ops::sum_op(self)
    }

    /// Applies a user-defined elementwise function.
    pub fn apply<F>(&self, function: &F) -> Result<Node<T>, BackpropError>
    where
        F: ElementwiseFunction<T> + ?Sized,
    {
        ops::apply_elementwise(function, self)
    }
}
