use crate::error::BackpropError;
use crate::node::{Node, OpKind};
use crate::ops::binary_elementwise;
use crate::value::Element;

/// Elementwise division `a / b`.
///
/// Local derivatives: `1/b` and `-a/b²`.
///
/// # Errors
/// `DomainError` if any element of the divisor is zero; `ShapeMismatch` as for `add_op`.
pub fn div_op<T: Element>(a: &Node<T>, b: &Node<T>) -> Result<Node<T>, BackpropError> {
    binary_elementwise(
        OpKind::Div,
        "div",
        a,
        b,
        |_, y| {
            if y == T::zero() {
                Err("division by zero".to_string())
            } else {
                Ok(())
            }
        },
        |x, y| x / y,
        |x, y, _| (T::one() / y, -x / (y * y)),
    )
}

#[cfg(test)]
#[path = "div_test.rs"]
mod tests;
