//! Integer-based stencil weights for combining single-spacing quotients.

use crate::error::{DiffError, Result};

/// Binomial coefficient `C(n, k)` as a float.
///
/// Exact while the intermediate products stay below 2^53; large orders
/// lose precision instead of overflowing.
pub fn binomial(n: usize, k: usize) -> f64 {
    if k > n {
        return 0.0;
    }
    let k = k.min(n - k);
    let mut acc = 1.0;
    for i in 0..k {
        acc = acc * (n - i) as f64 / (i + 1) as f64;
    }
    acc
}

/// Weights `w_k = (-1)^(k+1) C(n, k)` for the one-sided quotients at
/// spacings `s, 2s, ..., n*s`.
///
/// They sum to one and cancel the first `n - 1` error terms, so the
/// combination is accurate to order `n`.
pub fn one_sided_weights(order: usize) -> Vec<f64> {
    (1..=order)
        .map(|k| {
            let sign = if k % 2 == 1 { 1.0 } else { -1.0 };
            sign * binomial(order, k)
        })
        .collect()
}

/// Weights for the centered quotients at spacings `s, ..., m*s` giving
/// accuracy of the even order `2m`: `2 (-1)^(k+1) C(2m, m-k) / C(2m, m)`.
pub fn centered_weights(order: usize) -> Result<Vec<f64>> {
    if order == 0 || order % 2 != 0 {
        return Err(DiffError::InvalidOrder {
            order,
            reason: "centered differencing needs an even order".to_string(),
        });
    }
    let m = order / 2;
    let norm = binomial(order, m);
    Ok((1..=m)
        .map(|k| {
            let sign = if k % 2 == 1 { 2.0 } else { -2.0 };
            sign * binomial(order, m - k) / norm
        })
        .collect())
}
