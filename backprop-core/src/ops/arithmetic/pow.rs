// backprop-core/src/ops/arithmetic/pow.rs

use crate::error::BackpropError;
use crate::node::{Node, OpKind};
use crate::ops::binary_elementwise;
use crate::value::Element;

/// Elementwise power `base ^ exponent`, both operands being nodes.
///
/// Local derivatives:
/// * base: `y * x^(y - 1)`, taken as `0` when `y == 0` (the function is constant).
/// * exponent: `x^y * ln(x)`, taken as `0` when `x == 0`. For a negative base
///   (only reachable with an integer exponent) the logarithm is undefined and
///   the derivative is NaN.
///
/// # Errors
/// `DomainError` for a negative base with a non-integer exponent, or a zero
/// base with a negative exponent.
pub fn pow_op<T: Element>(base: &Node<T>, exponent: &Node<T>) -> Result<Node<T>, BackpropError> {
    binary_elementwise(
        OpKind::Pow,
        "pow",
        base,
        exponent,
        |x, y| {
            if x < T::zero() && y.fract() != T::zero() {
                Err(format!("negative base {} with non-integer exponent {}", x, y))
            } else if x == T::zero() && y < T::zero() {
                Err(format!("zero base with negative exponent {}", y))
            } else {
                Ok(())
            }
        },
        |x, y| x.powf(y),
        |x, y, z| {
            let d_base = if y == T::zero() {
                T::zero()
            } else {
                y * x.powf(y - T::one())
            };
            let d_exponent = if x == T::zero() { T::zero() } else { z * x.ln() };
            (d_base, d_exponent)
        },
    )
}

#[cfg(test)]
#[path = "pow_test.rs"]
mod tests;
