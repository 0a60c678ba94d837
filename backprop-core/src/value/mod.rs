// src/value/mod.rs

use crate::error::BackpropError;
use approx::{AbsDiffEq, RelativeEq};
use num_traits::Float;
use std::fmt::{self, Debug, Display};
use std::iter::Sum;

pub mod create;
pub mod utils;

use utils::{calculate_strides, elementwise_shape};

/// Numeric element type carried by values and nodes.
///
/// Blanket-implemented for every float type that also supports the `approx`
/// comparison traits, which in practice means `f32` and `f64`.
pub trait Element:
    Float + Debug + Display + Default + Sum + AbsDiffEq<Epsilon = Self> + RelativeEq + 'static
{
}

impl<T> Element for T where
    T: Float + Debug + Display + Default + Sum + AbsDiffEq<Epsilon = T> + RelativeEq + 'static
{
}

/// The numeric payload of a node: a dense, row-major array with a shape.
///
/// A value of shape `[]` is a scalar (rank 0). Values are plain data; they do not
/// take part in the computation graph by themselves, `Node` wraps them for that.
#[derive(Clone, PartialEq, Debug)]
pub struct Value<T> {
    pub(crate) data: Vec<T>,
    pub(crate) shape: Vec<usize>,
}

impl<T: Element> Value<T> {
    /// Creates a value from flattened row-major data and a shape.
    ///
    /// # Errors
    /// Returns `BackpropError::TensorCreationError` if `data.len()` does not match
    /// the number of elements described by `shape`.
    pub fn new(data: Vec<T>, shape: Vec<usize>) -> Result<Self, BackpropError> {
        let numel: usize = shape.iter().product();
        if data.len() != numel {
            return Err(BackpropError::TensorCreationError {
                data_len: data.len(),
                shape,
            });
        }
        Ok(Value { data, shape })
    }

    /// Creates a rank-0 value holding `value`.
    pub fn scalar(value: T) -> Self {
        Value {
            data: vec![value],
            shape: vec![],
        }
    }

    pub fn shape(&self) -> &[usize] {
        &self.shape
    }

    pub fn data(&self) -> &[T] {
        &self.data
    }

    pub fn rank(&self) -> usize {
        self.shape.len()
    }

    pub fn numel(&self) -> usize {
        self.data.len()
    }

    /// True for rank-0 values. Only these broadcast against other shapes.
    pub fn is_scalar(&self) -> bool {
        self.shape.is_empty()
    }

    /// Returns the single element of a one-element value (any rank).
    pub fn item(&self) -> Result<T, BackpropError> {
        if self.data.len() == 1 {
            Ok(self.data[0])
        } else {
            Err(BackpropError::NotScalar {
                shape: self.shape.clone(),
            })
        }
    }

    /// Returns the element at `coords`, or `None` if the coordinates are out of bounds.
    pub fn get(&self, coords: &[usize]) -> Option<T> {
        if coords.len() != self.shape.len() {
            return None;
        }
        if coords.iter().zip(&self.shape).any(|(&c, &d)| c >= d) {
            return None;
        }
        let strides = calculate_strides(&self.shape);
        let offset: usize = coords.iter().zip(&strides).map(|(c, s)| c * s).sum();
        self.data.get(offset).copied()
    }

    /// Applies `f` to every element.
    pub fn map<F>(&self, f: F) -> Value<T>
    where
        F: Fn(T) -> T,
    {
        Value {
            data: self.data.iter().map(|&x| f(x)).collect(),
            shape: self.shape.clone(),
        }
    }

    /// Combines two values element by element.
    ///
    /// Shapes must be equal, or one side must be rank 0 and is then broadcast
    /// against the other.
    pub fn zip_with<F>(&self, other: &Value<T>, operation: &str, f: F) -> Result<Value<T>, BackpropError>
    where
        F: Fn(T, T) -> T,
    {
        let shape = elementwise_shape(&self.shape, &other.shape, operation)?;
        let numel: usize = shape.iter().product();
        let data = (0..numel)
            .map(|i| f(self.broadcast_at(i), other.broadcast_at(i)))
            .collect();
        Ok(Value { data, shape })
    }

    /// Element `index` of the broadcast result; rank-0 values repeat their single element.
    pub(crate) fn broadcast_at(&self, index: usize) -> T {
        if self.is_scalar() {
            self.data[0]
        } else {
            self.data[index]
        }
    }

    /// Sum of all elements.
    pub fn sum(&self) -> T {
        self.data.iter().copied().sum()
    }

    /// True if any element satisfies `pred`.
    pub fn any<F>(&self, pred: F) -> bool
    where
        F: Fn(T) -> bool,
    {
        self.data.iter().any(|&x| pred(x))
    }

    /// Swaps the two axes of a matrix. Values of rank 0 or 1 are returned unchanged.
    pub fn transpose(&self) -> Value<T> {
        if self.rank() != 2 {
            return self.clone();
        }
        let (rows, cols) = (self.shape[0], self.shape[1]);
        let mut data = Vec::with_capacity(self.data.len());
        for j in 0..cols {
            for i in 0..rows {
                data.push(self.data[i * cols + j]);
            }
        }
        Value {
            data,
            shape: vec![cols, rows],
        }
    }

    /// Matrix product of two rank-2 values: `[m, n] @ [n, k] -> [m, k]`.
    pub fn matmul(&self, other: &Value<T>) -> Result<Value<T>, BackpropError> {
        if self.rank() != 2 {
            return Err(BackpropError::DimensionMismatch {
                expected: 2,
                actual: self.rank(),
            });
        }
        if other.rank() != 2 {
            return Err(BackpropError::DimensionMismatch {
                expected: 2,
                actual: other.rank(),
            });
        }
        let (m, n) = (self.shape[0], self.shape[1]);
        let (n2, k) = (other.shape[0], other.shape[1]);
        if n != n2 {
            return Err(BackpropError::shape_mismatch(&[n, k], &other.shape, "matmul"));
        }

        let mut data = vec![T::zero(); m * k];
        for i in 0..m {
            for p in 0..n {
                let a = self.data[i * n + p];
                for j in 0..k {
                    data[i * k + j] = data[i * k + j] + a * other.data[p * k + j];
                }
            }
        }
        Ok(Value {
            data,
            shape: vec![m, k],
        })
    }
}

impl<T: Element> From<T> for Value<T> {
    fn from(value: T) -> Self {
        Value::scalar(value)
    }
}

impl<T: Element> Display for Value<T> {
    /// Nested-bracket rendering, e.g. `[[1, 2], [3, 4]]`; scalars print bare.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_scalar() {
            return write!(f, "{}", self.data[0]);
        }
        let strides = calculate_strides(&self.shape);
        fmt_axis(f, &self.data, &self.shape, &strides, 0, 0)
    }
}

fn fmt_axis<T: Display>(
    f: &mut fmt::Formatter<'_>,
    data: &[T],
    shape: &[usize],
    strides: &[usize],
    axis: usize,
    offset: usize,
) -> fmt::Result {
    write!(f, "[")?;
    for i in 0..shape[axis] {
        if i > 0 {
            write!(f, ", ")?;
        }
        let next = offset + i * strides[axis];
        if axis + 1 == shape.len() {
            write!(f, "{}", data[next])?;
        } else {
            fmt_axis(f, data, shape, strides, axis + 1, next)?;
        }
    }
    write!(f, "]")
}

impl<T: Element> AbsDiffEq for Value<T> {
    type Epsilon = T;

    fn default_epsilon() -> T {
        <T as AbsDiffEq>::default_epsilon()
    }

    fn abs_diff_eq(&self, other: &Self, epsilon: T) -> bool {
        self.shape == other.shape
            && self
                .data
                .iter()
                .zip(&other.data)
                .all(|(a, b)| a.abs_diff_eq(b, epsilon))
    }
}

impl<T: Element> RelativeEq for Value<T> {
    fn default_max_relative() -> T {
        <T as RelativeEq>::default_max_relative()
    }

    fn relative_eq(&self, other: &Self, epsilon: T, max_relative: T) -> bool {
        self.shape == other.shape
            && self
                .data
                .iter()
                .zip(&other.data)
                .all(|(a, b)| a.relative_eq(b, epsilon, max_relative))
    }
}

#[cfg(test)]
#[path = "value_test.rs"]
mod tests;
