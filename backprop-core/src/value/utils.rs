use crate::error::BackpropError;
use crate::value::Element;
use num_traits::NumCast;

/// Calculates the strides for a given shape.
/// Strides represent the number of elements to skip in the flattened data array
/// to move one step along each dimension.
///
/// Example:
/// shape = [2, 3] -> strides = [3, 1]
/// shape = [2, 2, 2] -> strides = [4, 2, 1]
pub fn calculate_strides(shape: &[usize]) -> Vec<usize> {
    if shape.is_empty() {
        return vec![];
    }
    let rank = shape.len();
    let mut strides = vec![1; rank];
    for i in (0..rank - 1).rev() {
        strides[i] = strides[i + 1] * shape[i + 1];
    }
    strides
}

/// Determines the output shape of an elementwise operation.
///
/// Equal shapes combine as-is. A rank-0 operand broadcasts against any shape.
/// Every other combination is a `ShapeMismatch`.
pub fn elementwise_shape(
    shape_a: &[usize],
    shape_b: &[usize],
    operation: &str,
) -> Result<Vec<usize>, BackpropError> {
    if shape_a == shape_b || shape_b.is_empty() {
        Ok(shape_a.to_vec())
    } else if shape_a.is_empty() {
        Ok(shape_b.to_vec())
    } else {
        Err(BackpropError::shape_mismatch(shape_a, shape_b, operation))
    }
}

/// Converts an `f64` constant into the element type.
pub(crate) fn cast<T: Element>(x: f64) -> T {
    <T as NumCast>::from(x).unwrap_or_else(T::nan)
}

/// Converts an element into `f64`, used where the `rand` distributions work in `f64`.
pub(crate) fn to_f64<T: Element>(x: T) -> Result<f64, BackpropError> {
    x.to_f64()
        .ok_or_else(|| BackpropError::InternalError(format!("cannot represent {:?} as f64", x)))
}
