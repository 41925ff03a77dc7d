//! Flat parameter vector codec
//!
//! The network keeps all of its weights in one flat vector so the gradient
//! checker can treat it as a plain point in parameter space. The layout is
//! fixed:
//!
//! ```text
//! [ W1 (Dx x H, row-major) | b1 (H) | W2 (H x Dy, row-major) | b2 (Dy) ]
//! ```
//!
//! `decode` slices that vector into the four tensors and `encode_gradients`
//! flattens tensors of the same shapes back in the same order.

use ndarray::{s, Array1, Array2};

use crate::error::{NetworkError, Result};

/// Sizes of the input, hidden and output layers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Dimensions {
    input: usize,
    hidden: usize,
    output: usize,
    parameter_count: usize,
}

impl Dimensions {
    /// Create a dimension triple.
    ///
    /// Every size must be positive, and the parameter count must fit in an
    /// array (at most `isize::MAX` elements).
    pub fn new(input: usize, hidden: usize, output: usize) -> Result<Self> {
        if input == 0 || hidden == 0 || output == 0 {
            return Err(NetworkError::InvalidDimensions(format!(
                "all sizes must be positive, got [{}, {}, {}]",
                input, hidden, output
            )));
        }

        // Dx·H + H + H·Dy + Dy
        let parameter_count = input
            .checked_mul(hidden)
            .and_then(|n| n.checked_add(hidden))
            .and_then(|n| hidden.checked_mul(output).and_then(|m| n.checked_add(m)))
            .and_then(|n| n.checked_add(output))
            .filter(|&n| n <= isize::MAX as usize)
            .ok_or_else(|| {
                NetworkError::InvalidDimensions(format!(
                    "parameter count overflows for [{}, {}, {}]",
                    input, hidden, output
                ))
            })?;

        Ok(Self {
            input,
            hidden,
            output,
            parameter_count,
        })
    }

    /// Input size (Dx).
    pub fn input(&self) -> usize {
        self.input
    }

    /// Hidden size (H).
    pub fn hidden(&self) -> usize {
        self.hidden
    }

    /// Output size (Dy).
    pub fn output(&self) -> usize {
        self.output
    }

    /// Required length of the flat parameter vector: Dx·H + H + H·Dy + Dy.
    pub fn parameter_count(&self) -> usize {
        self.parameter_count
    }
}

impl TryFrom<[usize; 3]> for Dimensions {
    type Error = NetworkError;

    fn try_from(sizes: [usize; 3]) -> Result<Self> {
        Dimensions::new(sizes[0], sizes[1], sizes[2])
    }
}

/// The four tensors of the network.
///
/// Biases are kept as single-row matrices so they broadcast over the rows of
/// a batch. The same struct carries gradients, which share the layout.
#[derive(Debug, Clone, PartialEq)]
pub struct Parameters {
    /// Input-to-hidden weights (Dx x H)
    pub w1: Array2<f64>,
    /// Hidden bias (1 x H)
    pub b1: Array2<f64>,
    /// Hidden-to-output weights (H x Dy)
    pub w2: Array2<f64>,
    /// Output bias (1 x Dy)
    pub b2: Array2<f64>,
}

impl Parameters {
    /// Flatten back into the parameter layout.
    pub fn encode(&self) -> Array1<f64> {
        encode_gradients(&self.w1, &self.b1, &self.w2, &self.b2)
    }
}

/// Split a flat parameter vector into (W1, b1, W2, b2).
///
/// Fails with a shape error unless `params.len()` equals
/// `dims.parameter_count()`.
pub fn decode(params: &Array1<f64>, dims: Dimensions) -> Result<Parameters> {
    let expected = dims.parameter_count();
    if params.len() != expected {
        return Err(NetworkError::shape("parameter vector", expected, params.len()));
    }

    let (dx, h, dy) = (dims.input, dims.hidden, dims.output);
    let mut ofs = 0;

    let w1 = take_block(params, &mut ofs, dx, h)?;
    let b1 = take_block(params, &mut ofs, 1, h)?;
    let w2 = take_block(params, &mut ofs, h, dy)?;
    let b2 = take_block(params, &mut ofs, 1, dy)?;
    debug_assert_eq!(ofs, expected);

    Ok(Parameters { w1, b1, w2, b2 })
}

/// Concatenate four tensors, each flattened row-major, in parameter order.
pub fn encode_gradients(
    grad_w1: &Array2<f64>,
    grad_b1: &Array2<f64>,
    grad_w2: &Array2<f64>,
    grad_b2: &Array2<f64>,
) -> Array1<f64> {
    grad_w1
        .iter()
        .chain(grad_b1.iter())
        .chain(grad_w2.iter())
        .chain(grad_b2.iter())
        .copied()
        .collect()
}

// Copy the next rows*cols entries starting at `ofs` into a matrix and advance.
fn take_block(params: &Array1<f64>, ofs: &mut usize, rows: usize, cols: usize) -> Result<Array2<f64>> {
    let len = rows * cols;
    let values: Vec<f64> = params.slice(s![*ofs..*ofs + len]).iter().copied().collect();
    let copied = values.len();
    *ofs += len;
    Array2::from_shape_vec((rows, cols), values)
        .map_err(|_| NetworkError::shape("parameter block", len, copied))
}
