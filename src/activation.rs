//! Logistic activation and its derivative.
//!
//! Both functions are evaluated through the branch-stable form
//! `σ(x) = 1 / (1 + e^{-x})` for `x >= 0` and `e^{x} / (1 + e^{x})` for
//! `x < 0`, so no intermediate `exp` overflows for large `|x|`.

/// Scalar sigmoid: σ(x) = 1 / (1 + exp(-x))
///
/// # Examples
///
/// ```
/// use aprender_climf::activation::sigmoid;
///
/// assert!((sigmoid(0.0) - 0.5).abs() < 1e-7);
/// assert!(sigmoid(1000.0) <= 1.0);
/// assert!(sigmoid(-1000.0) >= 0.0);
/// ```
#[inline]
#[must_use]
pub fn sigmoid(x: f32) -> f32 {
    if x >= 0.0 {
        1.0 / (1.0 + (-x).exp())
    } else {
        let e = x.exp();
        e / (1.0 + e)
    }
}

/// Derivative of the sigmoid: exp(-x) / (1 + exp(-x))^2
///
/// Computed as `σ(x) · σ(-x)`, which is the same quantity without the
/// squared overflow of the direct formula.
#[inline]
#[must_use]
pub fn sigmoid_derivative(x: f32) -> f32 {
    sigmoid(x) * sigmoid(-x)
}

/// `1 - σ(x)`, evaluated as `σ(-x)` to avoid cancellation near 1.
#[inline]
#[must_use]
pub fn one_minus_sigmoid(x: f32) -> f32 {
    sigmoid(-x)
}

/// Elementwise sigmoid over a slice.
#[must_use]
pub fn sigmoid_slice(xs: &[f32]) -> Vec<f32> {
    xs.iter().map(|&x| sigmoid(x)).collect()
}

/// Elementwise sigmoid derivative over a slice.
#[must_use]
pub fn sigmoid_derivative_slice(xs: &[f32]) -> Vec<f32> {
    xs.iter().map(|&x| sigmoid_derivative(x)).collect()
}

#[cfg(test)]
#[path = "activation_tests_contract.rs"]
mod tests_contract;
