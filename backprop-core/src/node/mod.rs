// src/node/mod.rs

use crate::autograd::LocalGrad;
use crate::error::BackpropError;
use crate::value::{Element, Value};
use std::cell::{Cell, RefCell, RefMut};
use std::fmt;
use std::rc::Rc;

mod autograd_methods;
mod op_methods;
mod traits;

/// A value in the computational graph.
///
/// `Node` is a handle around `Rc<NodeData>`:
/// 1.  **Shared Ownership:** cloning a node is cheap and yields the *same* graph
///     node, so one leaf can feed any number of operations (diamond graphs).
/// 2.  **Interior Mutability:** only the gradient accumulator (and its
///     bookkeeping flag) can change after construction; value, operands and
///     local derivatives are frozen.
///
/// Nodes are single-threaded by construction (`Rc`/`RefCell`).
pub struct Node<T: Element> {
    pub(crate) data: Rc<NodeData<T>>,
}

/// Internal storage of a node.
pub(crate) struct NodeData<T: Element> {
    pub(crate) value: Value<T>,
    pub(crate) grad: RefCell<Value<T>>,
    /// Set once a backward pass has written `grad`; cleared by reset.
    pub(crate) accumulated: Cell<bool>,
    pub(crate) left: Option<Edge<T>>,
    pub(crate) right: Option<Edge<T>>,
    pub(crate) op: OpKind,
}

/// An operand reference together with the local derivative with respect to it.
pub(crate) struct Edge<T: Element> {
    pub(crate) node: Node<T>,
    pub(crate) local_grad: LocalGrad<T>,
}

/// Stable identity of a node: the address of its shared allocation.
///
/// Two `Node` handles have the same id exactly when they are clones of each other.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(usize);

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:#x}", self.0)
    }
}

/// Which operation produced a node. Informational only: the backward pass is
/// driven entirely by the stored local derivatives.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OpKind {
    Leaf,
    Add,
    Sub,
    Mul,
    Div,
    Pow,
    Neg,
    MatMul,
    Transpose,
    Sum,
    /// A function applied through [`ElementwiseFunction`](crate::ops::ElementwiseFunction).
    Elementwise(&'static str),
}

impl fmt::Display for OpKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let symbol = match self {
            OpKind::Leaf => "leaf",
            OpKind::Add => "+",
            OpKind::Sub => "-",
            OpKind::Mul => "*",
            OpKind::Div => "/",
            OpKind::Pow => "^",
            OpKind::Neg => "neg",
            OpKind::MatMul => "@",
            OpKind::Transpose => "T",
            OpKind::Sum => "sum",
            OpKind::Elementwise(name) => *name,
        };
        f.write_str(symbol)
    }
}

impl<T: Element> Node<T> {
    /// Creates a leaf node (an input) holding `value`.
    pub fn new(value: Value<T>) -> Self {
        Self::from_parts(OpKind::Leaf, value, None, None)
    }

    /// Creates a rank-0 leaf node.
    pub fn scalar(value: T) -> Self {
        Self::new(Value::scalar(value))
    }

    /// Creates a leaf node from flattened row-major data and a shape.
    pub fn from_vec(data: Vec<T>, shape: Vec<usize>) -> Result<Self, BackpropError> {
        Ok(Self::new(Value::new(data, shape)?))
    }

    /// Assembles a node without validating the local derivatives.
    /// Callers outside `ops::make_node` only build leaves.
    pub(crate) fn from_parts(
        op: OpKind,
        value: Value<T>,
        left: Option<Edge<T>>,
        right: Option<Edge<T>>,
    ) -> Self {
        let grad = RefCell::new(Value::zeros_like(&value));
        Node {
            data: Rc::new(NodeData {
                value,
                grad,
                accumulated: Cell::new(false),
                left,
                right,
                op,
            }),
        }
    }

    /// The forward-computed value.
    pub fn value(&self) -> &Value<T> {
        &self.data.value
    }

    /// A copy of the accumulated gradient (zeros until a backward pass reaches this node).
    pub fn gradient(&self) -> Value<T> {
        self.data.grad.borrow().clone()
    }

    pub fn shape(&self) -> &[usize] {
        self.data.value.shape()
    }

    pub fn id(&self) -> NodeId {
        NodeId(Rc::as_ptr(&self.data) as *const () as usize)
    }

    pub fn op(&self) -> OpKind {
        self.data.op
    }

    pub fn is_leaf(&self) -> bool {
        self.data.left.is_none() && self.data.right.is_none()
    }

    pub fn left(&self) -> Option<&Node<T>> {
        self.data.left.as_ref().map(|edge| &edge.node)
    }

    pub fn right(&self) -> Option<&Node<T>> {
        self.data.right.as_ref().map(|edge| &edge.node)
    }

    pub fn local_grad_left(&self) -> Option<&LocalGrad<T>> {
        self.data.left.as_ref().map(|edge| &edge.local_grad)
    }

    pub fn local_grad_right(&self) -> Option<&LocalGrad<T>> {
        self.data.right.as_ref().map(|edge| &edge.local_grad)
    }

    /// Operand edges in traversal order: `left` before `right`.
    pub(crate) fn edges(&self) -> impl Iterator<Item = &Edge<T>> {
        self.data.left.iter().chain(self.data.right.iter())
    }

    /// True if a backward pass has written this node's gradient since the last reset.
    pub fn has_accumulated_gradient(&self) -> bool {
        self.data.accumulated.get()
    }

    /// Fails if the gradient cannot be written with a value of `shape` right now.
    /// Lets a caller check a whole set of nodes before writing any of them.
    pub(crate) fn check_gradient_write(&self, shape: &[usize]) -> Result<(), BackpropError> {
        let grad = self.grad_mut()?;
        if grad.shape() != shape {
            return Err(BackpropError::shape_mismatch(grad.shape(), shape, "accumulate_gradient"));
        }
        Ok(())
    }

    /// Adds `delta` into the stored gradient and marks the node as written.
    pub(crate) fn accumulate_gradient(&self, delta: &Value<T>) -> Result<(), BackpropError> {
        let mut grad = self.grad_mut()?;
        if grad.shape() != delta.shape() {
            return Err(BackpropError::shape_mismatch(
                grad.shape(),
                delta.shape(),
                "accumulate_gradient",
            ));
        }
        for (g, &d) in grad.data.iter_mut().zip(delta.data()) {
            *g = *g + d;
        }
        self.data.accumulated.set(true);
        Ok(())
    }

    /// Zeroes this node's gradient only.
    pub(crate) fn clear_gradient(&self) -> Result<(), BackpropError> {
        let mut grad = self.grad_mut()?;
        *grad = Value::zeros_like(&self.data.value);
        self.data.accumulated.set(false);
        Ok(())
    }

    fn grad_mut(&self) -> Result<RefMut<'_, Value<T>>, BackpropError> {
        self.data
            .grad
            .try_borrow_mut()
            .map_err(|_| BackpropError::GradientBorrowed { node: self.id() })
    }
}

// Operand chains are released with a worklist; the default drop glue would
// recurse once per node and overflow the stack on long graphs.
impl<T: Element> Drop for NodeData<T> {
    fn drop(&mut self) {
        let mut pending: Vec<Node<T>> = take_operands(self).collect();
        while let Some(node) = pending.pop() {
            if let Ok(mut data) = Rc::try_unwrap(node.data) {
                pending.extend(take_operands(&mut data));
            }
        }
    }
}

fn take_operands<T: Element>(data: &mut NodeData<T>) -> impl Iterator<Item = Node<T>> {
    data.left
        .take()
        .into_iter()
        .chain(data.right.take())
        .map(|edge| edge.node)
}

#[cfg(test)]
#[path = "node_test.rs"]
mod tests;
