use crate::autograd::backward::BackwardOptions;
use crate::error::BackpropError;
use crate::node::Node;
use crate::value::utils::{cast, to_f64};
use crate::value::{Element, Value};
use log::debug;
use thiserror::Error;

/// Error type specifically for gradient checking failures.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum GradCheckError {
    #[error("Gradient check failed for input {input_index}, element {element_index}: analytical grad {analytical_grad:?} != numerical grad {numerical_grad:?}. Difference: {difference:?}")]
    GradientMismatch {
        input_index: usize,
        element_index: usize,
        analytical_grad: f64, // f64 regardless of the element type, for reporting
        numerical_grad: f64,
        difference: f64,
    },
    #[error("Forward function execution failed during gradient check: {0}")]
    ForwardPassError(BackpropError),
    #[error("Backward pass execution failed during gradient check: {0}")]
    BackwardPassError(BackpropError),
    #[error("Numerical gradient is NaN or infinite for input {input_index}, element {element_index}. Loss+: {loss_plus:?}, Loss-: {loss_minus:?}")]
    NumericalGradNaNOrInfinite {
        input_index: usize,
        element_index: usize,
        loss_plus: f64,
        loss_minus: f64,
    },
    #[error("Analytical gradient is NaN or infinite for input {input_index}, element {element_index}. Value: {value:?}")]
    AnalyticalGradNaNOrInfinite {
        input_index: usize,
        element_index: usize,
        value: f64,
    },
    #[error("Value error during intermediate calculation: {0}")]
    TensorError(BackpropError),
}

impl From<BackpropError> for GradCheckError {
    fn from(err: BackpropError) -> Self {
        GradCheckError::TensorError(err)
    }
}

/// Checks analytical gradients against numerical gradients using central finite differences.
///
/// `func` builds the graph from fresh leaf nodes holding `inputs`. The scalar
/// loss that is differentiated is `sum(output * output_grad)`; with
/// `output_grad = None` the output must hold a single element and the loss is
/// the output itself.
///
/// An element passes when the absolute difference is within `tolerance`, or
/// when the difference relative to the analytical gradient is.
pub fn check_grad<T, F>(
    func: F,
    inputs: &[Value<T>],
    output_grad: Option<&Value<T>>,
    epsilon: T,
    tolerance: T,
) -> Result<(), GradCheckError>
where
    T: Element,
    F: Fn(&[Node<T>]) -> Result<Node<T>, BackpropError>,
{
    let two = cast::<T>(2.0);

    // --- 1. Analytical gradients ---
    let leaves: Vec<Node<T>> = inputs.iter().cloned().map(Node::new).collect();
    let output = func(&leaves).map_err(GradCheckError::ForwardPassError)?;
    let options = match output_grad {
        Some(seed) => BackwardOptions::new().with_seed(seed.clone()),
        None => BackwardOptions::new(),
    };
    output
        .backward_with(options)
        .map_err(GradCheckError::BackwardPassError)?;

    let weights = match output_grad {
        Some(seed) => seed.clone(),
        None => Value::ones_like(output.value()),
    };

    // --- 2. Numerical gradients, one element at a time ---
    for (input_index, (leaf, original)) in leaves.iter().zip(inputs).enumerate() {
        let analytical = leaf.gradient();
        debug!(
            "check_grad: input {} of shape {:?}, {} elements",
            input_index,
            original.shape(),
            original.numel()
        );

        for element_index in 0..original.numel() {
            let loss_plus = perturbed_loss(&func, inputs, input_index, element_index, epsilon, &weights)?;
            let loss_minus = perturbed_loss(&func, inputs, input_index, element_index, -epsilon, &weights)?;
            let numerical_grad = (loss_plus - loss_minus) / (two * epsilon);
            let analytical_grad = analytical.data()[element_index];

            if !numerical_grad.is_finite() {
                return Err(GradCheckError::NumericalGradNaNOrInfinite {
                    input_index,
                    element_index,
                    loss_plus: to_f64(loss_plus)?,
                    loss_minus: to_f64(loss_minus)?,
                });
            }
            if !analytical_grad.is_finite() {
                return Err(GradCheckError::AnalyticalGradNaNOrInfinite {
                    input_index,
                    element_index,
                    value: to_f64(analytical_grad)?,
                });
            }

            let difference = (analytical_grad - numerical_grad).abs();
            if difference > tolerance && difference / (analytical_grad.abs() + epsilon) > tolerance {
                return Err(GradCheckError::GradientMismatch {
                    input_index,
                    element_index,
                    analytical_grad: to_f64(analytical_grad)?,
                    numerical_grad: to_f64(numerical_grad)?,
                    difference: to_f64(difference)?,
                });
            }
        }
    }
    Ok(())
}

/// Re-evaluates `func` with one input element shifted by `delta` and returns the weighted loss.
fn perturbed_loss<T, F>(
    func: &F,
    inputs: &[Value<T>],
    input_index: usize,
    element_index: usize,
    delta: T,
    weights: &Value<T>,
) -> Result<T, GradCheckError>
where
    T: Element,
    F: Fn(&[Node<T>]) -> Result<Node<T>, BackpropError>,
{
    let leaves: Vec<Node<T>> = inputs
        .iter()
        .enumerate()
        .map(|(i, value)| {
            let mut value = value.clone();
            if i == input_index {
                value.data[element_index] = value.data[element_index] + delta;
            }
            Node::new(value)
        })
        .collect();
    let output = func(&leaves).map_err(GradCheckError::ForwardPassError)?;
    let weighted = output.value().zip_with(weights, "check_grad loss", |y, w| y * w)?;
    Ok(weighted.sum())
}

#[cfg(test)]
#[path = "grad_check_test.rs"]
mod tests;
