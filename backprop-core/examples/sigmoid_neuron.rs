//! A single sigmoid neuron, `y = σ(x @ w + b)`, fitted to two samples with
//! plain gradient descent driven by `backward()`.

use backprop_core::{BackpropError, Node, Value};
use rand::rngs::StdRng;
use rand::SeedableRng;

fn main() -> Result<(), BackpropError> {
    let mut rng = StdRng::seed_from_u64(42);
    let inputs = Value::new(vec![0.0, 1.0, 1.0, 0.0], vec![2, 2])?;
    let targets = Value::new(vec![1.0, 0.0], vec![2, 1])?;
    let mut weights = Value::<f64>::randn_with(&[2, 1], &mut rng)?;
    let mut bias = 0.0_f64;
    let learning_rate = 1.0;

    for step in 0..50 {
        // Fresh leaves every step: parameters are plain values between passes.
        let x = Node::new(inputs.clone());
        let w = Node::new(weights.clone());
        let b = Node::scalar(bias);
        let t = Node::new(targets.clone());

        let y = (x.matmul(&w)? + &b).sigmoid()?;
        let diff = &y - &t;
        let loss = (&diff * &diff).sum()?;
        loss.backward()?;

        if step % 10 == 0 {
            println!("step {:>2}: loss = {:.6}", step, loss.value().item()?);
        }

        let grad_w = w.gradient();
        weights = weights.zip_with(&grad_w, "sgd", |p, g| p - learning_rate * g)?;
        bias -= learning_rate * b.gradient().item()?;
    }

    println!("weights = {}", weights);
    println!("bias = {:.4}", bias);
    Ok(())
}
