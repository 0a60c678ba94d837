use crate::autograd::backward::{backward, reset_gradients, BackwardOptions};
use crate::autograd::graph::topological_sort;
use crate::error::BackpropError;
use crate::node::Node;
use crate::value::Element;

impl<T: Element> Node<T> {
    /// Runs a backward pass from this node with the default options.
    ///
    /// The node must hold a single element (a loss). Afterwards every node
    /// reachable from here holds `d self / d node` in its gradient.
    pub fn backward(&self) -> Result<(), BackpropError> {
        backward(self, BackwardOptions::default())
    }

    /// Runs a backward pass with an explicit seed and/or accumulation mode.
    pub fn backward_with(&self, options: BackwardOptions<T>) -> Result<(), BackpropError> {
        backward(self, options)
    }

    /// Zeroes the gradients of this node and everything reachable from it.
    pub fn reset_gradients(&self) -> Result<(), BackpropError> {
        reset_gradients(self)
    }

    /// Every node reachable from this one, operands before their users, this node last.
    pub fn topological_order(&self) -> Vec<Node<T>> {
        topological_sort(self)
    }
}
