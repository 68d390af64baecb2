use crate::error::{Error, Result};
use crate::matrix::{ensure_finite, squared_distance};
use log::debug;
use ndarray::{Array2, ArrayView2};

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// Build the Gaussian similarity matrix `W` for `n × d` points.
///
/// `W[i][j] = exp(-||p_i - p_j||² / 2)` for `i != j` and `W[i][i] = 0`.
/// Each entry is computed from the same operands in the same order as its
/// mirror, so `W` is exactly symmetric.
///
/// # Errors
///
/// - [`Error::EmptyInput`] if there are no points or no coordinates.
/// - [`Error::NonFinite`] if a coordinate is NaN or infinite.
pub fn similarity_matrix(points: &Array2<f64>) -> Result<Array2<f64>> {
    let (n, d) = points.dim();
    if n == 0 || d == 0 {
        return Err(Error::EmptyInput);
    }
    ensure_finite(points, "sym")?;

    let view = points.view();
    let mut buf = vec![0.0; n * n];

    #[cfg(feature = "parallel")]
    buf.par_chunks_mut(n)
        .enumerate()
        .for_each(|(i, row)| fill_row(&view, i, row));

    #[cfg(not(feature = "parallel"))]
    buf.chunks_mut(n)
        .enumerate()
        .for_each(|(i, row)| fill_row(&view, i, row));

    let w = Array2::from_shape_vec((n, n), buf).map_err(|e| Error::shape(e.to_string(), (n, n)))?;

    debug!("sym: built {n}x{n} similarity from {n} points of dimension {d}");
    Ok(w)
}

fn fill_row(points: &ArrayView2<'_, f64>, i: usize, row: &mut [f64]) {
    let pi = points.row(i);
    for (j, out) in row.iter_mut().enumerate() {
        *out = if i == j {
            0.0
        } else {
            (-squared_distance(&pi, &points.row(j)) / 2.0).exp()
        };
    }
}
