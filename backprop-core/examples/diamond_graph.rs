//! A variable feeding two paths that reconverge.
//! f(x) = (x + 1) * (2x), so df/dx = 4x + 2.

use backprop_core::{BackpropError, Node};

fn main() -> Result<(), BackpropError> {
    let x = Node::scalar(2.0_f64);
    let a = &x + 1.0;
    let b = &x * 2.0;
    let f = &a * &b;

    println!("--- Forward ---");
    println!("a = {}", a);
    println!("b = {}", b);
    println!("f = {}", f);

    f.backward()?;

    println!("--- Backward ---");
    for node in f.topological_order() {
        println!("{} [{}] grad = {}", node.id(), node.op(), node.gradient());
    }
    println!("df/dx = {} (expected {})", x.gradient().item()?, 4.0 * 2.0 + 2.0);

    // A second pass needs a reset first.
    f.reset_gradients()?;
    f.backward()?;
    println!("after reset and rerun: df/dx = {}", x.gradient().item()?);
    Ok(())
}
