//! Two-layer neural network with numerical gradient checking
//!
//! This library implements a sigmoid/softmax network with one hidden layer,
//! parameterised by a single flat vector, together with a generic
//! finite-difference gradient checker used to verify its backpropagation.
//!
//! # Modules
//!
//! - `params`: Dimension triple and the flat parameter vector codec
//! - `network`: Forward pass, cross-entropy cost and backpropagation
//! - `gradcheck`: Central-difference gradient checker for any scalar function
//! - `sanity`: Synthetic and fixed sanity checks wiring the two together
//! - `config`: Sanity check configuration loaded from JSON
//! - `utils`: Activation functions and seeded random generators
//! - `error`: Crate error type

pub mod config;
pub mod error;
pub mod gradcheck;
pub mod network;
pub mod params;
pub mod sanity;
pub mod utils;

pub use error::{NetworkError, Result};
pub use gradcheck::{gradcheck, GradientCheck, GradientReport};
pub use network::{forward_backward, predict};
pub use params::{decode, encode_gradients, Dimensions, Parameters};
