//! Activation functions for the two-layer network
//!
//! This module provides the nonlinearities used by the forward pass:
//! - Sigmoid on arrays of any shape, and its derivative in terms of its output
//! - Softmax applied row-wise to a matrix of logits

use ndarray::{Array, Array2, ArrayBase, Data, Dimension, Ix2};

/// Logistic function on a single value: 1 / (1 + exp(-x)).
pub fn logistic(x: f64) -> f64 {
    1.0 / (1.0 + (-x).exp())
}

/// Elementwise sigmoid on an array of any shape.
pub fn sigmoid<S, D>(z: &ArrayBase<S, D>) -> Array<f64, D>
where
    S: Data<Elem = f64>,
    D: Dimension,
{
    z.mapv(logistic)
}

/// Sigmoid derivative assuming `h = sigmoid(z)`.
///
/// Returns `h * (1 - h)` elementwise. The argument is the activation, not the
/// pre-activation.
pub fn sigmoid_grad<S, D>(h: &ArrayBase<S, D>) -> Array<f64, D>
where
    S: Data<Elem = f64>,
    D: Dimension,
{
    h.mapv(|value| value * (1.0 - value))
}

/// Softmax applied row-wise.
///
/// Each row of logits becomes a probability distribution. The row maximum is
/// subtracted before exponentiating so large logits cannot overflow.
pub fn softmax<S>(z: &ArrayBase<S, Ix2>) -> Array2<f64>
where
    S: Data<Elem = f64>,
{
    let mut outputs = z.to_owned();
    if outputs.ncols() == 0 {
        return outputs;
    }

    for mut row in outputs.rows_mut() {
        let max_value = row.fold(f64::NEG_INFINITY, |acc, &value| acc.max(value));
        row.mapv_inplace(|value| (value - max_value).exp());
        let sum = row.sum();
        row /= sum;
    }

    outputs
}
