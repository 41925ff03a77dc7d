//! Numerical gradient checking with central differences
//!
//! `GradientCheck::check` takes any function `f(x) -> (value, gradient)` and
//! compares the gradient it reports against
//!
//! ```text
//! (f(x + eps·e_k) - f(x - eps·e_k)) / (2·eps)
//! ```
//!
//! for every coordinate `k`. The input vector is perturbed in place one
//! coordinate at a time and restored before the next one.

use ndarray::Array1;
use tracing::{debug, info, warn};

use crate::error::{NetworkError, Result};

/// Default finite-difference step.
pub const DEFAULT_EPSILON: f64 = 1e-4;

/// Default relative error tolerance.
pub const DEFAULT_TOLERANCE: f64 = 1e-5;

/// Relative error between a numerical and an analytic derivative.
///
/// `|numeric - analytic| / max(1, |numeric|, |analytic|)`, so values near zero
/// are compared absolutely.
pub fn relative_error(numeric: f64, analytic: f64) -> f64 {
    let denominator = 1.0f64.max(numeric.abs()).max(analytic.abs());
    (numeric - analytic).abs() / denominator
}

/// Step size and tolerance for a gradient check.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GradientCheck {
    /// Perturbation applied to each coordinate in turn
    pub epsilon: f64,
    /// Largest accepted relative error
    pub tolerance: f64,
}

impl Default for GradientCheck {
    fn default() -> Self {
        Self {
            epsilon: DEFAULT_EPSILON,
            tolerance: DEFAULT_TOLERANCE,
        }
    }
}

/// A coordinate whose numerical and analytic derivatives disagree.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CoordinateMismatch {
    pub index: usize,
    pub analytic: f64,
    pub numeric: f64,
    pub relative_error: f64,
}

impl From<CoordinateMismatch> for NetworkError {
    fn from(m: CoordinateMismatch) -> Self {
        NetworkError::GradientMismatch {
            index: m.index,
            analytic: m.analytic,
            numeric: m.numeric,
            relative_error: m.relative_error,
        }
    }
}

/// Outcome of a gradient check.
#[derive(Debug, Clone, PartialEq)]
pub struct GradientReport {
    /// `f(x)` at the unperturbed point
    pub value: f64,
    /// Number of coordinates compared
    pub checked: usize,
    /// Largest relative error seen over all coordinates
    pub max_relative_error: f64,
    failures: Vec<CoordinateMismatch>,
}

impl GradientReport {
    /// True when every coordinate was within tolerance.
    pub fn passed(&self) -> bool {
        self.failures.is_empty()
    }

    /// Every failing coordinate, in index order.
    pub fn failures(&self) -> &[CoordinateMismatch] {
        &self.failures
    }

    pub fn first_failure(&self) -> Option<&CoordinateMismatch> {
        self.failures.first()
    }

    /// Turn a failed report into a `GradientMismatch` error for the first
    /// failing coordinate.
    pub fn into_result(self) -> Result<Self> {
        match self.failures.first() {
            Some(&mismatch) => Err(mismatch.into()),
            None => Ok(self),
        }
    }
}

impl GradientCheck {
    /// Create a check, rejecting non-positive or non-finite settings.
    pub fn new(epsilon: f64, tolerance: f64) -> Result<Self> {
        if !(epsilon.is_finite() && epsilon > 0.0) {
            return Err(NetworkError::Config(format!(
                "epsilon must be positive and finite, got {}",
                epsilon
            )));
        }
        if !(tolerance.is_finite() && tolerance > 0.0) {
            return Err(NetworkError::Config(format!(
                "tolerance must be positive and finite, got {}",
                tolerance
            )));
        }
        Ok(Self { epsilon, tolerance })
    }

    /// Compare the gradient reported by `f` against central differences.
    ///
    /// `f` is called once at `x` for the analytic gradient, then twice per
    /// coordinate. On return `x` holds exactly its original values, whether
    /// the check passed, failed, or `f` returned an error.
    ///
    /// # Errors
    ///
    /// Propagates any error from `f`, and returns a shape error if the
    /// analytic gradient length differs from `x.len()`. A gradient mismatch
    /// is not an error here: it is recorded in the report (see
    /// [`GradientReport::into_result`]).
    pub fn check<F>(&self, mut f: F, x: &mut Array1<f64>) -> Result<GradientReport>
    where
        F: FnMut(&Array1<f64>) -> Result<(f64, Array1<f64>)>,
    {
        let (value, analytic) = f(x)?;
        if analytic.len() != x.len() {
            return Err(NetworkError::shape("analytic gradient", x.len(), analytic.len()));
        }

        let mut failures = Vec::new();
        let mut max_relative_error = 0.0f64;

        for (k, &analytic_k) in analytic.iter().enumerate() {
            let original = x[k];
            let f_plus = value_at(&mut f, x, k, original + self.epsilon)?;
            let f_minus = value_at(&mut f, x, k, original - self.epsilon)?;
            let numeric = (f_plus - f_minus) / (2.0 * self.epsilon);

            let rel = relative_error(numeric, analytic_k);
            max_relative_error = max_relative_error.max(rel);

            // NaN never passes.
            if !(rel <= self.tolerance) {
                debug!(index = k, analytic = analytic_k, numeric, relative_error = rel, "gradient mismatch");
                failures.push(CoordinateMismatch {
                    index: k,
                    analytic: analytic_k,
                    numeric,
                    relative_error: rel,
                });
            }
        }

        let report = GradientReport {
            value,
            checked: x.len(),
            max_relative_error,
            failures,
        };

        match report.first_failure() {
            Some(first) => warn!(
                failures = report.failures.len(),
                checked = report.checked,
                index = first.index,
                analytic = first.analytic,
                numeric = first.numeric,
                "gradient check failed"
            ),
            None => info!(
                checked = report.checked,
                max_relative_error = report.max_relative_error,
                "gradient check passed"
            ),
        }

        Ok(report)
    }
}

/// Check `f` at `x` with the default step and tolerance.
pub fn gradcheck<F>(f: F, x: &mut Array1<f64>) -> Result<GradientReport>
where
    F: FnMut(&Array1<f64>) -> Result<(f64, Array1<f64>)>,
{
    GradientCheck::default().check(f, x)
}

// Evaluate f with x[k] = value, restoring x[k] before returning.
fn value_at<F>(f: &mut F, x: &mut Array1<f64>, k: usize, value: f64) -> Result<f64>
where
    F: FnMut(&Array1<f64>) -> Result<(f64, Array1<f64>)>,
{
    let original = x[k];
    x[k] = value;
    let result = f(x);
    x[k] = original;
    result.map(|(v, _)| v)
}
