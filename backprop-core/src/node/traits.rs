// src/node/traits.rs

use crate::error::BackpropError;
use crate::node::Node;
use crate::ops::{add_op, div_op, mul_op, neg_op, sub_op};
use crate::value::Element;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::ops::{Add, Div, Mul, Neg, Sub};
use std::rc::Rc;

impl<T: Element> Clone for Node<T> {
    /// Shallow clone: the result is the same graph node, not a copy.
    fn clone(&self) -> Self {
        Node {
            data: Rc::clone(&self.data),
        }
    }
}

impl<T: Element> fmt::Debug for Node<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Node")
            .field("id", &self.id())
            .field("op", &self.op())
            .field("shape", &self.shape())
            .field("value", self.value())
            .field("grad", &*self.data.grad.borrow())
            .finish()
    }
}

impl<T: Element> fmt::Display for Node<T> {
    /// `Node(value=…, grad=…, op=…)`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Node(value={}, grad={}, op={})",
            self.value(),
            self.data.grad.borrow(),
            self.op()
        )
    }
}

/// Nodes compare by identity, never by value.
impl<T: Element> PartialEq for Node<T> {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.data, &other.data)
    }
}

impl<T: Element> Eq for Node<T> {}

impl<T: Element> Hash for Node<T> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id().hash(state);
    }
}

fn expect_op<T: Element>(result: Result<Node<T>, BackpropError>, symbol: &str) -> Node<T> {
    match result {
        Ok(node) => node,
        Err(err) => panic!("operator `{}` failed: {}", symbol, err),
    }
}

// Operators panic on shape and domain errors, like slice indexing.
// Use `add_op`, `div_op` and friends for the fallible forms.
macro_rules! impl_binary_operator {
    ($trait:ident, $method:ident, $op_fn:ident, $symbol:literal) => {
        impl<'a, 'b, T: Element> $trait<&'b Node<T>> for &'a Node<T> {
            type Output = Node<T>;

            fn $method(self, other: &'b Node<T>) -> Node<T> {
                expect_op($op_fn(self, other), $symbol)
            }
        }

        impl<T: Element> $trait<Node<T>> for Node<T> {
            type Output = Node<T>;

            fn $method(self, other: Node<T>) -> Node<T> {
                expect_op($op_fn(&self, &other), $symbol)
            }
        }

        impl<'b, T: Element> $trait<&'b Node<T>> for Node<T> {
            type Output = Node<T>;

            fn $method(self, other: &'b Node<T>) -> Node<T> {
                expect_op($op_fn(&self, other), $symbol)
            }
        }

        impl<'a, T: Element> $trait<Node<T>> for &'a Node<T> {
            type Output = Node<T>;

            fn $method(self, other: Node<T>) -> Node<T> {
                expect_op($op_fn(self, &other), $symbol)
            }
        }

        // A plain number on the right becomes a fresh leaf.
        impl<'a, T: Element> $trait<T> for &'a Node<T> {
            type Output = Node<T>;

            fn $method(self, other: T) -> Node<T> {
                expect_op($op_fn(self, &Node::scalar(other)), $symbol)
            }
        }

        impl<T: Element> $trait<T> for Node<T> {
            type Output = Node<T>;

            fn $method(self, other: T) -> Node<T> {
                expect_op($op_fn(&self, &Node::scalar(other)), $symbol)
            }
        }
    };
}

impl_binary_operator!(Add, add, add_op, "+");
impl_binary_operator!(Sub, sub, sub_op, "-");
impl_binary_operator!(Mul, mul, mul_op, "*");
impl_binary_operator!(Div, div, div_op, "/");

// A plain number on the left (`2.0 * &x`), only expressible per concrete type.
macro_rules! impl_scalar_lhs {
    ($($elem:ty),*) => {
        $(
            impl<'a> Add<&'a Node<$elem>> for $elem {
                type Output = Node<$elem>;
                fn add(self, other: &'a Node<$elem>) -> Node<$elem> {
                    expect_op(add_op(&Node::scalar(self), other), "+")
                }
            }

            impl<'a> Sub<&'a Node<$elem>> for $elem {
                type Output = Node<$elem>;
                fn sub(self, other: &'a Node<$elem>) -> Node<$elem> {
                    expect_op(sub_op(&Node::scalar(self), other), "-")
                }
            }

            impl<'a> Mul<&'a Node<$elem>> for $elem {
                type Output = Node<$elem>;
                fn mul(self, other: &'a Node<$elem>) -> Node<$elem> {
                    expect_op(mul_op(&Node::scalar(self), other), "*")
                }
            }

            impl<'a> Div<&'a Node<$elem>> for $elem {
                type Output = Node<$elem>;
                fn div(self, other: &'a Node<$elem>) -> Node<$elem> {
                    expect_op(div_op(&Node::scalar(self), other), "/")
                }
            }

            impl Add<Node<$elem>> for $elem {
                type Output = Node<$elem>;
                fn add(self, other: Node<$elem>) -> Node<$elem> {
                    self + &other
                }
            }

            impl Sub<Node<$elem>> for $elem {
                type Output = Node<$elem>;
                fn sub(self, other: Node<$elem>) -> Node<$elem> {
                    self - &other
                }
            }

            impl Mul<Node<$elem>> for $elem {
                type Output = Node<$elem>;
                fn mul(self, other: Node<$elem>) -> Node<$elem> {
                    self * &other
                }
            }

            impl Div<Node<$elem>> for $elem {
                type Output = Node<$elem>;
                fn div(self, other: Node<$elem>) -> Node<$elem> {
                    self / &other
                }
            }
        )*
    };
}

impl_scalar_lhs!(f32, f64);

impl<'a, T: Element> Neg for &'a Node<T> {
    type Output = Node<T>;

    fn neg(self) -> Node<T> {
        expect_op(neg_op(self), "neg")
    }
}

impl<T: Element> Neg for Node<T> {
    type Output = Node<T>;

    fn neg(self) -> Node<T> {
        expect_op(neg_op(&self), "neg")
    }
}
