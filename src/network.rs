//! Forward and backward propagation for the two-layer sigmoid/softmax network
//!
//! The network computes
//!
//! ```text
//! h     = sigmoid(data · W1 + b1)      (M x H)
//! y_hat = softmax(h · W2 + b2)         (M x Dy)
//! ```
//!
//! over a whole batch at once, with the cross-entropy cost summed (not
//! averaged) over every example and class.

use ndarray::{Array1, Array2, Axis};

use crate::error::{NetworkError, Result};
use crate::params::{decode, encode_gradients, Dimensions, Parameters};
use crate::utils::{sigmoid, sigmoid_grad, softmax};

// Activations kept from the forward pass for backprop.
struct Activations {
    hidden: Array2<f64>,
    probs: Array2<f64>,
}

fn forward_pass(data: &Array2<f64>, p: &Parameters) -> Activations {
    let hidden = sigmoid(&(data.dot(&p.w1) + &p.b1));
    let probs = softmax(&(hidden.dot(&p.w2) + &p.b2));
    Activations { hidden, probs }
}

// Data is M x Dx, labels are M x Dy.
fn check_batch(data: &Array2<f64>, labels: &Array2<f64>, dims: Dimensions) -> Result<()> {
    if data.ncols() != dims.input() {
        return Err(NetworkError::shape("data columns", dims.input(), data.ncols()));
    }
    if labels.ncols() != dims.output() {
        return Err(NetworkError::shape("label columns", dims.output(), labels.ncols()));
    }
    if labels.nrows() != data.nrows() {
        return Err(NetworkError::shape("label rows", data.nrows(), labels.nrows()));
    }
    Ok(())
}

/// Probability assigned to the true class of each example.
///
/// The true class of row `i` is the argmax of `labels[i]`. Evaluation only;
/// nothing here is differentiated.
///
/// # Errors
///
/// Shape error if the parameter vector, data or labels disagree with `dims`.
pub fn predict(
    data: &Array2<f64>,
    labels: &Array2<f64>,
    params: &Array1<f64>,
    dims: Dimensions,
) -> Result<Array1<f64>> {
    let p = decode(params, dims)?;
    check_batch(data, labels, dims)?;

    let Activations { probs, .. } = forward_pass(data, &p);

    Ok(labels
        .rows()
        .into_iter()
        .zip(probs.rows())
        .map(|(label, prob)| prob[argmax(label.iter().copied())])
        .collect())
}

/// Cross-entropy cost and its gradient with respect to every parameter.
///
/// Returns `(cost, grad)` where `grad` has the flat parameter layout, so
/// `grad[k]` is the partial derivative of the cost with respect to
/// `params[k]`.
///
/// # Errors
///
/// Shape error if the parameter vector, data or labels disagree with `dims`.
pub fn forward_backward(
    data: &Array2<f64>,
    labels: &Array2<f64>,
    params: &Array1<f64>,
    dims: Dimensions,
) -> Result<(f64, Array1<f64>)> {
    let p = decode(params, dims)?;
    check_batch(data, labels, dims)?;

    let Activations { hidden, probs } = forward_pass(data, &p);

    // Zero labels contribute nothing, even where a probability underflows to 0.
    let cost = -labels
        .iter()
        .zip(probs.iter())
        .filter(|(&label, _)| label != 0.0)
        .map(|(&label, &prob)| label * prob.ln())
        .sum::<f64>();

    // Softmax + cross-entropy: the error at the logits is y_hat - labels.
    let dy = &probs - labels;
    let grad_w2 = hidden.t().dot(&dy);
    let grad_b2 = dy.sum_axis(Axis(0)).insert_axis(Axis(0));

    let delta = dy.dot(&p.w2.t()) * sigmoid_grad(&hidden);
    let grad_w1 = data.t().dot(&delta);
    let grad_b1 = delta.sum_axis(Axis(0)).insert_axis(Axis(0));

    let grad = encode_gradients(&grad_w1, &grad_b1, &grad_w2, &grad_b2);
    Ok((cost, grad))
}

// First index of the largest value.
fn argmax(values: impl Iterator<Item = f64>) -> usize {
    let mut best = 0;
    let mut best_value = f64::NEG_INFINITY;
    for (i, value) in values.enumerate() {
        if value > best_value {
            best = i;
            best_value = value;
        }
    }
    best
}
