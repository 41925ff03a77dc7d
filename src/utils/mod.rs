//! Shared utilities for the network and the sanity checks
//!
//! This module provides the activation functions used by the forward pass and
//! the seeded random generators used to build synthetic problems.

pub mod activations;
pub mod rng;

pub use activations::{logistic, sigmoid, sigmoid_grad, softmax};
pub use rng::{one_hot_labels, random_normal_matrix, random_normal_vector, seeded_rng};
