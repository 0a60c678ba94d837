use crate::node::NodeId;
use thiserror::Error;

/// Custom error type for the backprop engine.
#[derive(Error, Debug, PartialEq, Clone)] // PartialEq for easier testing
pub enum BackpropError {
    #[error("Shape mismatch: expected {expected:?}, got {actual:?} during operation {operation}")]
    ShapeMismatch {
        expected: Vec<usize>,
        actual: Vec<usize>,
        operation: String,
    },

    #[error("Dimension mismatch: expected rank {expected}, got {actual}")]
    DimensionMismatch { expected: usize, actual: usize },

    #[error("Domain error in {operation}: {reason}")]
    DomainError {
        operation: String,
        reason: String,
    },

    #[error("Backward called on non-scalar root of shape {shape:?} without an explicit seed gradient.")]
    ScalarRootRequired { shape: Vec<usize> },

    #[error("Node {node} still holds gradient from a previous backward pass; reset gradients or enable accumulation.")]
    StaleGradientState { node: NodeId },

    #[error("Gradient of node {node} is borrowed elsewhere; no gradients were written.")]
    GradientBorrowed { node: NodeId },

    #[error("Value creation error: data length {data_len} does not match shape {shape:?}")]
    TensorCreationError { data_len: usize, shape: Vec<usize> },

    #[error("Expected a single-element value, got shape {shape:?}")]
    NotScalar { shape: Vec<usize> },

    #[error("Internal error: {0}")]
    InternalError(String),
}

impl BackpropError {
    pub(crate) fn domain(operation: &str, reason: impl Into<String>) -> Self {
        BackpropError::DomainError {
            operation: operation.to_string(),
            reason: reason.into(),
        }
    }

    pub(crate) fn shape_mismatch(expected: &[usize], actual: &[usize], operation: &str) -> Self {
        BackpropError::ShapeMismatch {
            expected: expected.to_vec(),
            actual: actual.to_vec(),
            operation: operation.to_string(),
        }
    }
}
