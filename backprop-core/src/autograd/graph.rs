use crate::node::Node;
use crate::value::Element;
use log::trace;
use std::collections::HashSet;

enum Visit<T: Element> {
    Enter(Node<T>),
    Exit(Node<T>),
}

/// Builds a topological sort of the computation graph below `root`.
///
/// Depth-first from the root, `left` before `right`, emitting each node after its
/// operands (postorder), so the root comes last. Nodes are deduplicated by
/// identity: a node shared by several parents appears once and its operands are
/// not explored again. An explicit stack replaces recursion; the order is the
/// same as the recursive postorder.
///
/// Pure read: no gradient is touched. Calling it twice on an unchanged graph
/// yields the same sequence.
pub fn topological_sort<T: Element>(root: &Node<T>) -> Vec<Node<T>> {
    let mut visited = HashSet::new();
    let mut order = Vec::new();
    let mut stack = vec![Visit::Enter(root.clone())];

    while let Some(step) = stack.pop() {
        match step {
            Visit::Enter(node) => {
                if !visited.insert(node.id()) {
                    trace!("[topological_sort] node {} already visited", node.id());
                    continue;
                }
                trace!("[topological_sort] visiting node {} ({})", node.id(), node.op());
                let left = node.left().cloned();
                let right = node.right().cloned();
                stack.push(Visit::Exit(node));
                // Pushed in reverse so that `left` is explored first.
                if let Some(right) = right {
                    stack.push(Visit::Enter(right));
                }
                if let Some(left) = left {
                    stack.push(Visit::Enter(left));
                }
            }
            Visit::Exit(node) => order.push(node),
        }
    }
    order
}

#[cfg(test)]
#[path = "graph_test.rs"]
mod tests;
