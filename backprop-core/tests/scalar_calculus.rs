// Scalar expressions with hand-computed derivatives.

mod common;

use common::{assert_grads, grad_of, leaf, sigmoid};

const TOL: f64 = 1e-6;

#[test]
fn test_basic_rules() {
    let (x, y) = (leaf(3.0), leaf(4.0));
    (&x * &y).backward().unwrap();
    assert_grads(&[&x, &y], &[4.0, 3.0], TOL);

    let x = leaf(5.0);
    x.powf(2.0).unwrap().backward().unwrap();
    assert_grads(&[&x], &[10.0], TOL);

    let (x, y) = (leaf(2.0), leaf(3.0));
    (&x * &y).powf(2.0).unwrap().backward().unwrap();
    assert_grads(&[&x, &y], &[36.0, 24.0], TOL);

    let x = leaf(4.0);
    (x.powf(2.0).unwrap() + &x).backward().unwrap();
    assert_grads(&[&x], &[9.0], TOL);

    let x = leaf(3.0);
    (x.powf(2.0).unwrap() - 2.0 * &x).backward().unwrap();
    assert_grads(&[&x], &[4.0], TOL);

    let (x, y) = (leaf(6.0), leaf(2.0));
    (&x / &y).backward().unwrap();
    assert_grads(&[&x, &y], &[0.5, -1.5], TOL);
}

#[test]
fn test_composite_expressions() {
    let x = leaf(2.0);
    (&x + 1.0).powf(2.0).unwrap().backward().unwrap();
    assert_grads(&[&x], &[6.0], TOL);

    let x = leaf(-2.0);
    x.powf(2.0).unwrap().backward().unwrap();
    assert_grads(&[&x], &[-4.0], TOL);

    let x = leaf(4.0);
    x.powf(0.5).unwrap().backward().unwrap();
    assert_grads(&[&x], &[0.25], TOL);

    // x²y + xy²
    let (x, y) = (leaf(2.0), leaf(3.0));
    let f = x.powf(2.0).unwrap() * &y + &x * y.powf(2.0).unwrap();
    f.backward().unwrap();
    assert_grads(&[&x, &y], &[21.0, 16.0], TOL);

    // ((x+1)*2-1)²
    let x = leaf(2.0);
    (((&x + 1.0) * 2.0) - 1.0).powf(2.0).unwrap().backward().unwrap();
    assert_grads(&[&x], &[20.0], TOL);
}

#[test]
fn test_shared_subexpressions() {
    // (x²)²
    let x = leaf(2.0);
    let y = &x * &x;
    let z = &y * &y;
    z.backward().unwrap();
    assert_grads(&[&x], &[32.0], TOL);

    // (x + 1)(2x)
    let x = leaf(2.0);
    let c = (&x + 1.0) * (&x * 2.0);
    c.backward().unwrap();
    assert_grads(&[&x], &[10.0], TOL);

    // xy + yx
    let (x, y) = (leaf(2.0), leaf(3.0));
    (&x * &y + &y * &x).backward().unwrap();
    assert_grads(&[&x, &y], &[6.0, 4.0], TOL);

    // x² + x³ + x⁴
    let x = leaf(2.0);
    let f = x.powf(2.0).unwrap() + x.powf(3.0).unwrap() + x.powf(4.0).unwrap();
    f.backward().unwrap();
    assert_grads(&[&x], &[48.0], TOL);

    // (x² + 1)(2x²) with x² shared
    let x = leaf(2.0);
    let shared = &x * &x;
    let f = (&shared + 1.0) * (&shared * 2.0);
    f.backward().unwrap();
    assert_grads(&[&x], &[72.0], TOL);

    // x + x² + x³ + x⁴ + x⁵
    let x = leaf(2.0);
    let mut f = x.clone();
    for k in 2..=5 {
        f = f + x.powf(k as f64).unwrap();
    }
    f.backward().unwrap();
    assert_grads(&[&x], &[129.0], TOL);
}

#[test]
fn test_wide_sum() {
    let vars: Vec<_> = (1..=5).map(|i| leaf(i as f64)).collect();
    let mut total = vars[0].clone();
    for v in &vars[1..] {
        total = total + v;
    }
    total.backward().unwrap();
    let refs: Vec<_> = vars.iter().collect();
    assert_grads(&refs, &[1.0; 5], TOL);
}

#[test]
fn test_edge_values() {
    let x = leaf(5.0);
    (&x * 0.0).backward().unwrap();
    assert_grads(&[&x], &[0.0], TOL);

    let x = leaf(3.0);
    (0.0 / &x).backward().unwrap();
    assert_grads(&[&x], &[0.0], TOL);

    let x = leaf(7.0);
    x.powf(0.0).unwrap().backward().unwrap();
    assert_grads(&[&x], &[0.0], TOL);

    // 0^x and 1^x do not depend on x
    let x = leaf(2.0);
    leaf(0.0).pow(&x).unwrap().backward().unwrap();
    assert_grads(&[&x], &[0.0], TOL);
    let x = leaf(3.0);
    leaf(1.0).pow(&x).unwrap().backward().unwrap();
    assert_grads(&[&x], &[0.0], TOL);

    let x = leaf(4.0);
    (&x * 1.0).backward().unwrap();
    assert_grads(&[&x], &[1.0], TOL);
    let x = leaf(6.0);
    (&x / 1.0).backward().unwrap();
    assert_grads(&[&x], &[1.0], TOL);

    let x = leaf(-3.0);
    x.powf(3.0).unwrap().backward().unwrap();
    assert_grads(&[&x], &[27.0], TOL);

    let x = leaf(1e-10);
    x.powf(2.0).unwrap().backward().unwrap();
    assert!((grad_of(&x) - 2e-10).abs() < 1e-20);
}

#[test]
fn test_sigmoid_expressions() {
    let d = |x: f64| sigmoid(x) * (1.0 - sigmoid(x));

    for value in [0.0, 2.0, -2.0] {
        let x = leaf(value);
        x.sigmoid().unwrap().backward().unwrap();
        assert_grads(&[&x], &[d(value)], TOL);
    }

    let x = leaf(1.0);
    x.powf(2.0).unwrap().sigmoid().unwrap().backward().unwrap();
    assert_grads(&[&x], &[d(1.0) * 2.0], TOL);

    let x = leaf(1.0);
    (x.sigmoid().unwrap() + (2.0 * &x).sigmoid().unwrap())
        .backward()
        .unwrap();
    assert_grads(&[&x], &[d(1.0) + 2.0 * d(2.0)], TOL);

    let x = leaf(2.0);
    (&x * x.sigmoid().unwrap()).backward().unwrap();
    assert_grads(&[&x], &[sigmoid(2.0) + 2.0 * d(2.0)], TOL);
}

#[test]
fn test_abs_expressions() {
    for (value, expected) in [(3.0, 1.0), (-3.0, -1.0), (0.0, 0.0)] {
        let x = leaf(value);
        x.abs().unwrap().backward().unwrap();
        assert_grads(&[&x], &[expected], TOL);
    }

    // |x² - 4| on both sides of the kink
    for (value, expected) in [(3.0, 6.0), (1.0, -2.0)] {
        let x = leaf(value);
        (x.powf(2.0).unwrap() - 4.0).abs().unwrap().backward().unwrap();
        assert_grads(&[&x], &[expected], TOL);
    }

    let x = leaf(-5.0);
    x.abs().unwrap().abs().unwrap().backward().unwrap();
    assert_grads(&[&x], &[-1.0], TOL);

    // x|x| has derivative 2|x|
    for value in [2.0, -2.0] {
        let x = leaf(value);
        (&x * x.abs().unwrap()).backward().unwrap();
        assert_grads(&[&x], &[4.0], TOL);
    }
}

#[test]
fn test_negation_expressions() {
    for value in [5.0, -3.0] {
        let x = leaf(value);
        (-&x).backward().unwrap();
        assert_grads(&[&x], &[-1.0], TOL);
    }

    let x = leaf(3.0);
    (-x.powf(2.0).unwrap()).backward().unwrap();
    assert_grads(&[&x], &[-6.0], TOL);

    let x = leaf(4.0);
    (-(-&x)).backward().unwrap();
    assert_grads(&[&x], &[1.0], TOL);

    let x = leaf(3.0);
    (-&x + x.powf(2.0).unwrap()).backward().unwrap();
    assert_grads(&[&x], &[5.0], TOL);
}

#[test]
fn test_plain_number_on_the_left() {
    let x = leaf(3.0);
    (5.0 + &x).backward().unwrap();
    assert_grads(&[&x], &[1.0], TOL);

    let x = leaf(3.0);
    (10.0 - &x).backward().unwrap();
    assert_grads(&[&x], &[-1.0], TOL);

    let x = leaf(4.0);
    (5.0 * &x).backward().unwrap();
    assert_grads(&[&x], &[5.0], TOL);

    let x = leaf(2.0);
    (12.0 / &x).backward().unwrap();
    assert_grads(&[&x], &[-3.0], TOL);

    let x = leaf(3.0);
    leaf(2.0).pow(&x).unwrap().backward().unwrap();
    assert_grads(&[&x], &[8.0 * 2.0_f64.ln()], TOL);

    let x = leaf(2.0);
    (&x * 3.0 + 5.0 * &x).backward().unwrap();
    assert_grads(&[&x], &[8.0], TOL);
}

#[test]
fn test_reset_and_accumulate_lifecycle() {
    use backprop_core::{BackpropError, BackwardOptions};

    let x = leaf(3.0);
    let y = &x * &x;
    y.backward().unwrap();
    assert_grads(&[&x], &[6.0], TOL);

    y.reset_gradients().unwrap();
    assert_grads(&[&x, &y], &[0.0, 0.0], TOL);

    // Two passes without reset: rejected by default, summed on request.
    let x = leaf(2.0);
    let y = &x * &x;
    y.backward().unwrap();
    assert!(matches!(
        y.backward(),
        Err(BackpropError::StaleGradientState { .. })
    ));
    y.backward_with(BackwardOptions::new().accumulate(true)).unwrap();
    assert_grads(&[&x], &[8.0], TOL);

    // Reset reaches every node of the graph.
    let (x, w) = (leaf(2.0), leaf(3.0));
    let hidden = &x * &w;
    let out = &hidden + &x;
    out.backward().unwrap();
    out.reset_gradients().unwrap();
    for node in [&x, &w, &hidden, &out] {
        assert!(!node.has_accumulated_gradient());
        assert_eq!(grad_of(node), 0.0);
    }

    let x = leaf(4.0);
    let y = x.powf(3.0).unwrap();
    y.backward().unwrap();
    y.reset_gradients().unwrap();
    y.backward().unwrap();
    assert_grads(&[&x], &[48.0], TOL);
}

#[test]
fn test_reference_graphs() {
    // z = x*x + x at x = 3
    let x = leaf(3.0);
    let y = &x * &x;
    let z = &y + &x;
    z.backward().unwrap();
    assert_grads(&[&x, &y, &z], &[7.0, 1.0, 1.0], TOL);

    // f = x*x at x = 5
    let x = leaf(5.0);
    (&x * &x).backward().unwrap();
    assert_grads(&[&x], &[10.0], TOL);

    // f = (x + y) * x at x = 2, y = 3
    let (x, y) = (leaf(2.0), leaf(3.0));
    let f = (&x + &y) * &x;
    assert_eq!(f.value().item().unwrap(), 10.0);
    f.backward().unwrap();
    assert_grads(&[&x, &y], &[7.0, 2.0], TOL);

    // sigmoid(w*x + b)
    let (x, w, b) = (leaf(0.5), leaf(-1.5), leaf(0.25));
    let out = (&w * &x + &b).sigmoid().unwrap();
    out.backward().unwrap();
    let z = -1.5 * 0.5 + 0.25;
    let d = sigmoid(z) * (1.0 - sigmoid(z));
    assert_grads(&[&x, &w, &b], &[d * -1.5, d * 0.5, d], TOL);
}

#[test]
fn test_topological_order_is_stable() {
    let (x, y) = (leaf(1.0), leaf(2.0));
    let f = (&x * &y + &x).sigmoid().unwrap();
    let first = f.topological_order();
    let second = f.topological_order();
    assert_eq!(first, second);
    assert_eq!(first.last(), Some(&f));
    assert_eq!(first.first(), Some(&x));
}
