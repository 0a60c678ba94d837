use approx::relative_eq;
use backprop_core::{Node, Value};

// Shared helpers for the integration tests.
// Added allow(dead_code) because usage across different test crates isn't detected easily.

/// Rank-0 leaf with an `f64` value.
#[allow(dead_code)]
pub fn leaf(value: f64) -> Node<f64> {
    Node::scalar(value)
}

/// Leaf from row-major data, panicking on a bad shape.
#[allow(dead_code)]
pub fn tensor(data: Vec<f64>, shape: Vec<usize>) -> Node<f64> {
    Node::from_vec(data, shape).expect("Test node creation failed")
}

/// Gradient of a single-element node.
#[allow(dead_code)]
pub fn grad_of(node: &Node<f64>) -> f64 {
    node.gradient().item().expect("gradient is not a single element")
}

/// Asserts every gradient against its expected value, with an absolute tolerance.
#[allow(dead_code)]
pub fn assert_grads(nodes: &[&Node<f64>], expected: &[f64], tolerance: f64) {
    assert_eq!(nodes.len(), expected.len(), "one expected gradient per node");
    for (i, (node, want)) in nodes.iter().zip(expected).enumerate() {
        let got = grad_of(node);
        assert!(
            (got - want).abs() < tolerance,
            "gradient {}: expected {}, got {}",
            i,
            want,
            got
        );
    }
}

/// Asserts an elementwise-close gradient for a tensor node.
#[allow(dead_code)]
pub fn assert_grad_close(node: &Node<f64>, expected: &[f64], shape: &[usize]) {
    let want = Value::new(expected.to_vec(), shape.to_vec()).expect("bad expected value");
    let got = node.gradient();
    assert!(
        relative_eq!(got, want, epsilon = 1e-9),
        "expected gradient {}, got {}",
        want,
        got
    );
}

/// Logistic function evaluated directly, for expected values.
#[allow(dead_code)]
pub fn sigmoid(x: f64) -> f64 {
    1.0 / (1.0 + (-x).exp())
}
