use crate::autograd::graph::topological_sort;
use crate::error::BackpropError;
use crate::node::{Node, NodeId};
use crate::value::{Element, Value};
use log::{debug, warn};
use std::collections::hash_map::Entry;
use std::collections::HashMap;

/// Options for a backward pass.
///
/// The default runs the usual "loss" convention: the root must hold a single
/// element, its seed is one, and the pass refuses to run over gradients left
/// behind by an earlier pass.
#[derive(Debug, Clone)]
pub struct BackwardOptions<T> {
    seed: Option<Value<T>>,
    accumulate: bool,
}

impl<T: Element> Default for BackwardOptions<T> {
    fn default() -> Self {
        BackwardOptions {
            seed: None,
            accumulate: false,
        }
    }
}

impl<T: Element> BackwardOptions<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seeds the root with `seed` instead of ones. Required for roots with more than one element.
    pub fn with_seed(mut self, seed: Value<T>) -> Self {
        self.seed = Some(seed);
        self
    }

    /// When `true`, the pass adds its gradients on top of gradients from earlier
    /// passes instead of failing with `StaleGradientState`.
    pub fn accumulate(mut self, accumulate: bool) -> Self {
        self.accumulate = accumulate;
        self
    }

    pub fn seed(&self) -> Option<&Value<T>> {
        self.seed.as_ref()
    }

    pub fn accumulates(&self) -> bool {
        self.accumulate
    }
}

/// Performs the backward pass starting from `root`.
///
/// Every node reachable from `root` ends up with `dRoot/dNode` added to its
/// gradient.
///
/// The pass propagates its own gradients through a per-pass map keyed by node
/// identity, walking the topological order in reverse so that a node is
/// processed only after all of its dependents have contributed. Gradients are
/// written into the nodes once the walk has completed.
///
/// # Errors
/// * `ScalarRootRequired` if no seed is given and the root has more than one element.
/// * `ShapeMismatch` if the seed's shape differs from the root's.
/// * `StaleGradientState` if a reachable node still carries gradient from an
///   earlier pass and `accumulate` is not set.
/// * `GradientBorrowed` if a reachable node's gradient is borrowed while the
///   pass runs.
///
/// Nothing is written when an error is returned.
pub fn backward<T: Element>(root: &Node<T>, options: BackwardOptions<T>) -> Result<(), BackpropError> {
    let BackwardOptions { seed, accumulate } = options;

    let seed = match seed {
        Some(seed) => {
            if seed.shape() != root.shape() {
                return Err(BackpropError::shape_mismatch(root.shape(), seed.shape(), "backward seed"));
            }
            seed
        }
        None => {
            if root.value().numel() != 1 {
                return Err(BackpropError::ScalarRootRequired {
                    shape: root.shape().to_vec(),
                });
            }
            Value::ones_like(root.value())
        }
    };

    let order = topological_sort(root);

    if let Some(stale) = order.iter().find(|node| node.has_accumulated_gradient()) {
        if !accumulate {
            return Err(BackpropError::StaleGradientState { node: stale.id() });
        }
        warn!(
            "backward: accumulating onto gradients left by a previous pass (first at node {})",
            stale.id()
        );
    }

    debug!(
        "backward: {} nodes reachable from root {} ({}), seed shape {:?}",
        order.len(),
        root.id(),
        root.op(),
        seed.shape()
    );

    let mut grad_map: HashMap<NodeId, Value<T>> = HashMap::new();
    grad_map.insert(root.id(), seed);
    let mut finished: Vec<(&Node<T>, Value<T>)> = Vec::with_capacity(order.len());

    for node in order.iter().rev() {
        // Every node in the order is reachable from the root, so it has received gradient.
        let Some(node_grad) = grad_map.remove(&node.id()) else {
            continue;
        };

        for edge in node.edges() {
            let contribution = edge.local_grad.apply(&node_grad, edge.node.shape())?;
            match grad_map.entry(edge.node.id()) {
                Entry::Occupied(mut slot) => {
                    let summed = slot.get().zip_with(&contribution, "accumulate", |a, b| a + b)?;
                    slot.insert(summed);
                }
                Entry::Vacant(slot) => {
                    slot.insert(contribution);
                }
            }
        }
        finished.push((node, node_grad));
    }

    // All-or-nothing: every target is checked before the first write.
    for (node, grad) in &finished {
        node.check_gradient_write(grad.shape())?;
    }
    for (node, grad) in finished {
        node.accumulate_gradient(&grad)?;
    }
    debug!("backward: pass from root {} complete", root.id());
    Ok(())
}

/// Zeroes the gradient of `root` and of every node reachable from it, and
/// clears their stale-gradient marks.
///
/// # Errors
/// `GradientBorrowed` if any of those gradients is borrowed; no node is cleared then.
pub fn reset_gradients<T: Element>(root: &Node<T>) -> Result<(), BackpropError> {
    let order = topological_sort(root);
    for node in &order {
        node.check_gradient_write(node.shape())?;
    }
    for node in &order {
        node.clear_gradient()?;
    }
    debug!("reset_gradients: cleared {} nodes below {}", order.len(), root.id());
    Ok(())
}

#[cfg(test)]
#[path = "backward_test.rs"]
mod tests;
