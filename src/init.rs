//! Random starting point for the factorizer.
//!
//! Entries of `H₀` are drawn uniformly from `[0, 2·sqrt(m / k))`, where `m`
//! is the mean entry of `A`. The scale matches the magnitude of `A`: if
//! every entry of `H` were `c`, then `(H Hᵀ)[i][j] = k c²`, and the mean
//! of `c²` over the interval is `4m / 3k`.
//!
//! The generator is always passed in so runs can be replayed exactly.

use crate::error::{Error, Result};
use crate::matrix::{ensure_square, mean_entry};
use log::debug;
use ndarray::Array2;
use rand::Rng;

/// Upper bound `2·sqrt(m / k)` of the initial draw.
pub fn init_upper_bound(a: &Array2<f64>, k: usize) -> Result<f64> {
    if k == 0 {
        return Err(Error::InvalidClusterCount {
            requested: k,
            n_items: a.nrows(),
        });
    }
    let m = mean_entry(a).ok_or(Error::EmptyInput)?;
    if !(m.is_finite() && m >= 0.0) {
        return Err(Error::NonFinite {
            stage: "init",
            row: 0,
            col: 0,
        });
    }
    Ok(2.0 * (m / k as f64).sqrt())
}

/// Draw an `n × k` initial association matrix for `a` from `rng`.
pub fn initial_association<R: Rng + ?Sized>(
    a: &Array2<f64>,
    k: usize,
    rng: &mut R,
) -> Result<Array2<f64>> {
    let n = ensure_square(a)?;
    let upper = init_upper_bound(a, k)?;
    debug!("init: drawing {n}x{k} from [0, {upper:.4})");
    Ok(Array2::from_shape_simple_fn((n, k), || {
        rng.random::<f64>() * upper
    }))
}
