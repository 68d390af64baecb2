use crate::error::{Error, Result};
use crate::matrix::ensure_square;
use log::debug;
use ndarray::{Array1, Array2};

/// Compute `A = D^{-1/2} W D^{-1/2}`.
///
/// Entry-wise, `A[i][j] = W[i][j] / sqrt(D[i][i] * D[j][j])`. Only the
/// diagonal of `D` is read.
///
/// A degree that is zero, negative, or non-finite is rejected with
/// [`Error::ZeroDegree`] before any division happens, so the result never
/// contains NaN or infinity. This is the case for a single point, and for
/// any point far enough from the rest that its kernel values underflow.
pub fn normalized_similarity(w: &Array2<f64>, d: &Array2<f64>) -> Result<Array2<f64>> {
    let n = ensure_square(w)?;
    if d.dim() != (n, n) {
        return Err(Error::shape(format!("{n}x{n}"), d.dim()));
    }

    let mut inv_sqrt = Array1::zeros(n);
    for i in 0..n {
        let deg = d[[i, i]];
        if !(deg.is_finite() && deg > 0.0) {
            return Err(Error::ZeroDegree { index: i });
        }
        inv_sqrt[i] = 1.0 / deg.sqrt();
    }

    let a = Array2::from_shape_fn((n, n), |(i, j)| {
        w[[i, j]] * (inv_sqrt[i] * inv_sqrt[j])
    });
    debug!("norm: normalized {n}x{n} similarity");
    Ok(a)
}
