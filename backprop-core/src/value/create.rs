// src/value/create.rs

use crate::error::BackpropError;
use crate::value::utils::{cast, to_f64};
use crate::value::{Element, Value};
use rand::Rng;
use rand_distr::{Distribution, StandardNormal};

impl<T: Element> Value<T> {
    /// Creates a new value filled with zeros with the specified shape.
    pub fn zeros(shape: &[usize]) -> Self {
        Self::full(shape, T::zero())
    }

    /// Creates a new value filled with ones with the specified shape.
    pub fn ones(shape: &[usize]) -> Self {
        Self::full(shape, T::one())
    }

    /// Creates a new value filled with a specific element with the specified shape.
    pub fn full(shape: &[usize], value: T) -> Self {
        let numel = shape.iter().product();
        Value {
            data: vec![value; numel],
            shape: shape.to_vec(),
        }
    }

    /// Zeros with the shape of `other`.
    pub fn zeros_like(other: &Value<T>) -> Self {
        Self::zeros(&other.shape)
    }

    /// Ones with the shape of `other`.
    pub fn ones_like(other: &Value<T>) -> Self {
        Self::ones(&other.shape)
    }

    /// Uniform samples in `[low, high)` using the thread-local generator.
    pub fn rand(shape: &[usize], low: T, high: T) -> Result<Self, BackpropError> {
        let mut rng = rand::thread_rng();
        Self::rand_with(shape, low, high, &mut rng)
    }

    /// Uniform samples in `[low, high)` drawn from `rng`.
    ///
    /// # Errors
    /// `DomainError` if the interval is empty.
    pub fn rand_with<R: Rng>(
        shape: &[usize],
        low: T,
        high: T,
        rng: &mut R,
    ) -> Result<Self, BackpropError> {
        if !(low < high) {
            return Err(BackpropError::domain(
                "rand",
                format!("empty sampling interval [{}, {})", low, high),
            ));
        }
        let (low, high) = (to_f64(low)?, to_f64(high)?);
        let numel = shape.iter().product();
        let data = (0..numel).map(|_| cast(rng.gen_range(low..high))).collect();
        Value::new(data, shape.to_vec())
    }

    /// Standard-normal samples using the thread-local generator.
    pub fn randn(shape: &[usize]) -> Result<Self, BackpropError> {
        let mut rng = rand::thread_rng();
        Self::randn_with(shape, &mut rng)
    }

    /// Standard-normal samples drawn from `rng`.
    pub fn randn_with<R: Rng>(shape: &[usize], rng: &mut R) -> Result<Self, BackpropError> {
        let numel = shape.iter().product();
        let data = (0..numel)
            .map(|_| {
                let x: f64 = StandardNormal.sample(rng);
                cast(x)
            })
            .collect();
        Value::new(data, shape.to_vec())
    }
}
