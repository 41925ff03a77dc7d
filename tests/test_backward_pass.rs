// Tests for backpropagation: exact gradients on the 2-2-2 fixture and
// structural properties of the gradient on random batches.

use approx::assert_relative_eq;
use ndarray::{array, Array1};
use two_layer_gradcheck::sanity::{fixture_problem, SyntheticProblem};
use two_layer_gradcheck::utils::seeded_rng;
use two_layer_gradcheck::{decode, forward_backward, Dimensions};

// ============================================================================
// Hand-computed fixture gradients
// ============================================================================

#[test]
fn test_fixture_gradient_values() {
    let problem = fixture_problem().unwrap();
    let (_, grad) = problem.cost_and_gradient(&problem.params).unwrap();

    // dy = y_hat - labels, delta = dy * h(1 - h) with h = [sigmoid(1), 0.5].
    let expected = array![
        -0.08699900817826134, // gradW1
        0.11062274647313472,
        0.0,
        0.0,
        -0.08699900817826134, // gradb1
        0.11062274647313472,
        -0.323486831203189, // gradW2
        0.323486831203189,
        -0.22124549294626944,
        0.22124549294626944,
        -0.4424909858925389, // gradb2
        0.4424909858925389,
    ];

    assert_eq!(grad.len(), expected.len());
    for (g, e) in grad.iter().zip(expected.iter()) {
        assert_relative_eq!(*g, *e, epsilon = 1e-12);
    }
}

#[test]
fn test_unused_input_gets_zero_weight_gradient() {
    // The second input feature is always zero, so its W1 row has no gradient.
    let problem = fixture_problem().unwrap();
    let (_, grad) = problem.cost_and_gradient(&problem.params).unwrap();
    let g = decode(&grad, problem.dims).unwrap();
    assert_eq!(g.w1.row(1).to_vec(), vec![0.0, 0.0]);
}

// ============================================================================
// Structural properties
// ============================================================================

#[test]
fn test_output_bias_gradient_sums_to_zero() {
    // Each row of y_hat - labels sums to zero, so gradb2 does as well.
    let mut rng = seeded_rng(Some(11));
    let problem = SyntheticProblem::generate(&mut rng, 20, Dimensions::new(10, 5, 10).unwrap());
    let (_, grad) = problem.cost_and_gradient(&problem.params).unwrap();
    let g = decode(&grad, problem.dims).unwrap();
    assert_relative_eq!(g.b2.sum(), 0.0, epsilon = 1e-10);
}

#[test]
fn test_gradient_additive_over_examples() {
    let mut rng = seeded_rng(Some(12));
    let dims = Dimensions::new(3, 4, 2).unwrap();
    let problem = SyntheticProblem::generate(&mut rng, 6, dims);

    let (total_cost, total_grad) = problem.cost_and_gradient(&problem.params).unwrap();

    let mut cost_sum = 0.0;
    let mut grad_sum = Array1::zeros(dims.parameter_count());
    for i in 0..6 {
        let data = problem.data.slice(ndarray::s![i..i + 1, ..]).to_owned();
        let labels = problem.labels.slice(ndarray::s![i..i + 1, ..]).to_owned();
        let (cost, grad) = forward_backward(&data, &labels, &problem.params, dims).unwrap();
        cost_sum += cost;
        grad_sum += &grad;
    }

    assert_relative_eq!(total_cost, cost_sum, epsilon = 1e-10);
    for (a, b) in total_grad.iter().zip(grad_sum.iter()) {
        assert_relative_eq!(*a, *b, epsilon = 1e-10);
    }
}

#[test]
fn test_one_sided_difference_close_for_first_coordinate() {
    let problem = fixture_problem().unwrap();
    let (cost, grad) = problem.cost_and_gradient(&problem.params).unwrap();

    let mut shifted = problem.params.clone();
    shifted[0] += 1e-7;
    let (cost_shifted, _) = problem.cost_and_gradient(&shifted).unwrap();

    assert_relative_eq!((cost_shifted - cost) / 1e-7, grad[0], epsilon = 1e-5);
}
