//! Sanity checks wiring the network into the gradient checker
//!
//! Two checks are provided:
//! - a random one: synthetic standard-normal data, random one-hot labels and
//!   random parameters, checked with `forward_backward` as the function
//! - a fixed one: a 2-2-2 network with identity weights and zero biases on a
//!   single example, whose prediction can be worked out by hand

use ndarray::{array, Array1, Array2};
use rand::Rng;
use tracing::debug;

use crate::config::SanityConfig;
use crate::error::Result;
use crate::gradcheck::{GradientCheck, GradientReport};
use crate::network::{forward_backward, predict};
use crate::params::Dimensions;
use crate::utils::{one_hot_labels, random_normal_matrix, random_normal_vector, seeded_rng};

/// A batch plus a parameter vector sized for it.
#[derive(Debug, Clone)]
pub struct SyntheticProblem {
    pub data: Array2<f64>,
    pub labels: Array2<f64>,
    pub params: Array1<f64>,
    pub dims: Dimensions,
}

impl SyntheticProblem {
    /// Draw `num_examples` standard-normal rows, one random class per row,
    /// and standard-normal parameters of length `dims.parameter_count()`.
    pub fn generate<R: Rng + ?Sized>(rng: &mut R, num_examples: usize, dims: Dimensions) -> Self {
        let data = random_normal_matrix(rng, num_examples, dims.input());
        let labels = one_hot_labels(rng, num_examples, dims.output());
        let params = random_normal_vector(rng, dims.parameter_count());
        debug!(
            num_examples,
            input = dims.input(),
            hidden = dims.hidden(),
            output = dims.output(),
            "generated synthetic problem"
        );
        Self {
            data,
            labels,
            params,
            dims,
        }
    }

    /// Cost and gradient at `params`, with this problem's data and labels.
    pub fn cost_and_gradient(&self, params: &Array1<f64>) -> Result<(f64, Array1<f64>)> {
        forward_backward(&self.data, &self.labels, params, self.dims)
    }

    /// Gradient-check `forward_backward` at this problem's parameters.
    pub fn check(&self, check: &GradientCheck) -> Result<GradientReport> {
        let mut params = self.params.clone();
        check.check(|p: &Array1<f64>| self.cost_and_gradient(p), &mut params)
    }

    /// Probability of the true class for each example.
    pub fn predict(&self) -> Result<Array1<f64>> {
        predict(&self.data, &self.labels, &self.params, self.dims)
    }
}

/// Run the random sanity check described by `config`.
pub fn sanity_check(config: &SanityConfig) -> Result<GradientReport> {
    config.validate()?;
    let mut rng = seeded_rng(config.seed);
    let problem = SyntheticProblem::generate(&mut rng, config.num_examples, config.dims()?);
    problem.check(&config.gradient_check()?)
}

/// Result of the fixed 2-2-2 check.
#[derive(Debug, Clone)]
pub struct FixtureOutcome {
    /// Predicted probability of class 0 for the single example
    pub probability: f64,
    pub report: GradientReport,
}

/// The hand-checkable 2-2-2 problem: data `[[1, 0]]`, label class 0,
/// identity weights and zero biases.
pub fn fixture_problem() -> Result<SyntheticProblem> {
    Ok(SyntheticProblem {
        data: array![[1.0, 0.0]],
        labels: array![[1.0, 0.0]],
        params: array![1.0, 0.0, 0.0, 1.0, 0.0, 0.0, 1.0, 0.0, 0.0, 1.0, 0.0, 0.0],
        dims: Dimensions::new(2, 2, 2)?,
    })
}

/// Predict on the fixed problem and gradient-check it.
pub fn fixture_check(check: &GradientCheck) -> Result<FixtureOutcome> {
    let problem = fixture_problem()?;
    let probability = problem.predict()?[0];
    let report = problem.check(check)?;
    Ok(FixtureOutcome {
        probability,
        report,
    })
}
