// =========================================================================
// FALSIFY-SG: Sigmoid activation contract
//
// The ranking gradients divide by 1 - σ(x); every property below guards a
// value that reaches those denominators.
// =========================================================================

use super::*;

/// FALSIFY-SG-001: Sigmoid output is in [0, 1] (f32 saturates at extremes)
#[test]
fn falsify_sg_001_output_bounded() {
    let xs = [-1e6, -100.0, -10.0, -1.0, 0.0, 1.0, 10.0, 100.0, 1e6];
    for (i, &val) in sigmoid_slice(&xs).iter().enumerate() {
        assert!(
            (0.0..=1.0).contains(&val),
            "FALSIFIED SG-001: sigmoid[{i}]={val}, expected in [0,1]"
        );
    }
}

/// FALSIFY-SG-002: Sigmoid(0) = 0.5
#[test]
fn falsify_sg_002_zero_maps_to_half() {
    let val = sigmoid(0.0);
    assert!(
        (val - 0.5).abs() < 1e-7,
        "FALSIFIED SG-002: sigmoid(0)={val}, expected 0.5"
    );
}

/// FALSIFY-SG-003: Sigmoid is monotonically increasing
#[test]
fn falsify_sg_003_monotone_increasing() {
    let values: Vec<f32> = (-50..=50).map(|i| i as f32 * 0.1).collect();
    let mut prev = 0.0_f32;

    for (i, &x) in values.iter().enumerate() {
        let y = sigmoid(x);
        if i > 0 {
            assert!(
                y >= prev - 1e-7,
                "FALSIFIED SG-003: sigmoid({x})={y} < sigmoid({})={prev}",
                values[i - 1]
            );
        }
        prev = y;
    }
}

/// FALSIFY-SG-004: σ(x) + σ(-x) = 1
#[test]
fn falsify_sg_004_symmetry() {
    for i in -40..=40 {
        let x = i as f32 * 0.5;
        let total = sigmoid(x) + sigmoid(-x);
        assert!(
            (total - 1.0).abs() < 1e-6,
            "FALSIFIED SG-004: sigmoid({x}) + sigmoid(-{x}) = {total}"
        );
    }
}

/// FALSIFY-SG-005: Derivative matches exp(-x) / (1 + exp(-x))^2 where that is finite
#[test]
fn falsify_sg_005_derivative_matches_closed_form() {
    for i in -20..=20 {
        let x = i as f32 * 0.5;
        let ex = (-x).exp();
        let expected = ex / (1.0 + ex).powi(2);
        let got = sigmoid_derivative(x);
        assert!(
            (got - expected).abs() < 1e-6,
            "FALSIFIED SG-005: dσ({x})={got}, expected {expected}"
        );
    }
}

/// FALSIFY-SG-006: Derivative stays finite and non-negative for huge |x|
#[test]
fn falsify_sg_006_derivative_finite_at_extremes() {
    let xs = [-1e30, -1e4, -100.0, 100.0, 1e4, 1e30];
    for (i, &d) in sigmoid_derivative_slice(&xs).iter().enumerate() {
        assert!(
            d.is_finite() && d >= 0.0,
            "FALSIFIED SG-006: dσ({})={d}",
            xs[i]
        );
    }
    assert!((sigmoid_derivative(0.0) - 0.25).abs() < 1e-7);
}

/// FALSIFY-SG-007: 1 - σ(x) keeps precision where the subtraction would hit zero
#[test]
fn falsify_sg_007_one_minus_sigmoid_precise() {
    let x = 30.0_f32;
    let tail = one_minus_sigmoid(x);
    assert!(tail > 0.0, "FALSIFIED SG-007: 1 - σ(30) collapsed to 0");
    assert!((tail - (-x).exp()).abs() / (-x).exp() < 1e-3);
}
