use crate::error::BackpropError;
use crate::value::{Element, Value};

/// Derivative of a node's value with respect to one of its operands,
/// computed and frozen when the node is built.
///
/// Never a full Jacobian: every variant is stored so that applying it to the
/// node's gradient yields a contribution shaped like the operand.
#[derive(Debug, Clone, PartialEq)]
pub enum LocalGrad<T> {
    /// Elementwise partials, multiplied elementwise with the upstream gradient.
    ///
    /// Shaped like the operand. When a rank-0 operand was broadcast against a
    /// tensor the partials are shaped like the node, and the product is summed
    /// back down to a scalar.
    Elementwise(Value<T>),
    /// Left operand of a matrix product; holds the transposed right operand.
    /// Contribution: `upstream @ factor`.
    MatMulLhs(Value<T>),
    /// Right operand of a matrix product; holds the transposed left operand.
    /// Contribution: `factor @ upstream`.
    MatMulRhs(Value<T>),
    /// Contribution: the upstream gradient transposed.
    Transpose,
}

impl<T: Element> LocalGrad<T> {
    /// The chain-rule step: turns the gradient flowing into a node into the
    /// contribution for the operand of shape `operand_shape`.
    pub fn apply(&self, upstream: &Value<T>, operand_shape: &[usize]) -> Result<Value<T>, BackpropError> {
        let contribution = match self {
            LocalGrad::Elementwise(partials) => {
                upstream.zip_with(partials, "chain_rule", |g, d| g * d)?
            }
            LocalGrad::MatMulLhs(factor) => upstream.matmul(factor)?,
            LocalGrad::MatMulRhs(factor) => factor.matmul(upstream)?,
            LocalGrad::Transpose => upstream.transpose(),
        };
        reduce_to_operand(contribution, operand_shape)
    }

    /// Verifies that this derivative is usable for an operand of `operand_shape`
    /// feeding a node of `node_shape`, by running the chain-rule step on a zero gradient.
    pub(crate) fn check_against(&self, node_shape: &[usize], operand_shape: &[usize]) -> Result<(), BackpropError> {
        self.apply(&Value::zeros(node_shape), operand_shape)
            .map(|_| ())
            .map_err(|err| match err {
                BackpropError::ShapeMismatch { expected, actual, .. } => BackpropError::ShapeMismatch {
                    expected,
                    actual,
                    operation: "make_node".to_string(),
                },
                other => other,
            })
    }
}

fn reduce_to_operand<T: Element>(contribution: Value<T>, operand_shape: &[usize]) -> Result<Value<T>, BackpropError> {
    if contribution.shape() == operand_shape {
        Ok(contribution)
    } else if operand_shape.is_empty() {
        Ok(Value::scalar(contribution.sum()))
    } else {
        Err(BackpropError::shape_mismatch(operand_shape, contribution.shape(), "chain_rule"))
    }
}

#[cfg(test)]
#[path = "local_grad_test.rs"]
mod tests;
