//! Dense matrix helpers shared by the pipeline stages.
//!
//! Every matrix in the crate is an `ndarray::Array2<f64>`: a flat row-major
//! buffer with an explicit `(rows, cols)` shape. Ragged inputs are rejected
//! at the boundary by [`points_from_rows`].

use crate::error::{Error, Result};
use ndarray::{Array2, ArrayView1, Zip};

/// Relative tolerance used when checking that a matrix is symmetric.
pub(crate) const SYMMETRY_TOL: f64 = 1e-12;

/// Convert row vectors into an `n × d` matrix.
///
/// Fails with [`Error::EmptyInput`] when there are no points or the points
/// have no coordinates, and with [`Error::DimensionMismatch`] when a row
/// differs in length from the first one.
pub fn points_from_rows(rows: &[Vec<f64>]) -> Result<Array2<f64>> {
    let n = rows.len();
    if n == 0 {
        return Err(Error::EmptyInput);
    }
    let d = rows[0].len();
    if d == 0 {
        return Err(Error::EmptyInput);
    }

    let mut flat: Vec<f64> = Vec::with_capacity(n * d);
    for (row, point) in rows.iter().enumerate() {
        if point.len() != d {
            return Err(Error::DimensionMismatch {
                row,
                expected: d,
                found: point.len(),
            });
        }
        flat.extend_from_slice(point);
    }
    Array2::from_shape_vec((n, d), flat).map_err(|e| Error::shape(e.to_string(), (n, d)))
}

/// Squared Euclidean distance between two rows.
pub fn squared_distance(a: &ArrayView1<'_, f64>, b: &ArrayView1<'_, f64>) -> f64 {
    a.iter().zip(b.iter()).map(|(x, y)| (x - y).powi(2)).sum()
}

/// Sum of squared entry-wise differences, `Σᵢⱼ (a[i][j] − b[i][j])²`.
///
/// Callers guarantee equal shapes.
pub fn frobenius_delta(a: &Array2<f64>, b: &Array2<f64>) -> f64 {
    debug_assert_eq!(a.dim(), b.dim());
    Zip::from(a)
        .and(b)
        .fold(0.0, |acc, &x, &y| acc + (x - y).powi(2))
}

/// Mean of all entries, `None` for an empty matrix.
pub fn mean_entry(m: &Array2<f64>) -> Option<f64> {
    m.mean()
}

/// Index of the largest entry in each row. Ties go to the lowest column.
pub fn row_argmax(m: &Array2<f64>) -> Vec<usize> {
    m.rows()
        .into_iter()
        .map(|row| {
            let mut best = 0;
            let mut best_val = f64::NEG_INFINITY;
            for (j, &v) in row.iter().enumerate() {
                if v > best_val {
                    best_val = v;
                    best = j;
                }
            }
            best
        })
        .collect()
}

pub(crate) fn ensure_square(m: &Array2<f64>) -> Result<usize> {
    let (rows, cols) = m.dim();
    if rows != cols {
        return Err(Error::shape(format!("{rows}x{rows}"), (rows, cols)));
    }
    if rows == 0 {
        return Err(Error::EmptyInput);
    }
    Ok(rows)
}

pub(crate) fn ensure_symmetric(m: &Array2<f64>) -> Result<()> {
    let n = m.nrows();
    for i in 0..n {
        for j in (i + 1)..n {
            let (a, b) = (m[[i, j]], m[[j, i]]);
            let scale = a.abs().max(b.abs()).max(1.0);
            if (a - b).abs() > SYMMETRY_TOL * scale {
                return Err(Error::NotSymmetric { row: i, col: j });
            }
        }
    }
    Ok(())
}

/// First non-finite entry, reported against `stage`.
pub(crate) fn ensure_finite(m: &Array2<f64>, stage: &'static str) -> Result<()> {
    match m.indexed_iter().find(|(_, v)| !v.is_finite()) {
        Some(((row, col), _)) => Err(Error::NonFinite { stage, row, col }),
        None => Ok(()),
    }
}

pub(crate) fn ensure_non_negative(m: &Array2<f64>, name: &'static str) -> Result<()> {
    if m.iter().any(|&v| v < 0.0) {
        return Err(Error::InvalidParameter {
            name,
            message: "entries must be non-negative",
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    #[test]
    fn test_points_from_rows_ragged() {
        let rows = vec![vec![0.0, 1.0], vec![2.0]];
        let err = points_from_rows(&rows).unwrap_err();
        assert_eq!(
            err,
            Error::DimensionMismatch {
                row: 1,
                expected: 2,
                found: 1
            }
        );
    }

    #[test]
    fn test_points_from_rows_empty() {
        assert_eq!(points_from_rows(&[]).unwrap_err(), Error::EmptyInput);
        assert_eq!(
            points_from_rows(&[vec![], vec![]]).unwrap_err(),
            Error::EmptyInput
        );
    }

    #[test]
    fn test_points_from_rows_layout() {
        let m = points_from_rows(&[vec![1.0, 2.0], vec![3.0, 4.0]]).unwrap();
        assert_eq!(m, array![[1.0, 2.0], [3.0, 4.0]]);
    }

    #[test]
    fn test_frobenius_delta() {
        let a = array![[1.0, 2.0], [3.0, 4.0]];
        let b = array![[1.0, 0.0], [3.0, 5.0]];
        assert_eq!(frobenius_delta(&a, &b), 5.0);
        assert_eq!(frobenius_delta(&a, &a), 0.0);
    }

    #[test]
    fn test_row_argmax_ties_lowest() {
        let m = array![[0.5, 0.5, 0.1], [0.0, 0.2, 0.9], [1.0, 1.0, 1.0]];
        assert_eq!(row_argmax(&m), vec![0, 2, 0]);
    }

    #[test]
    fn test_ensure_symmetric() {
        assert!(ensure_symmetric(&array![[0.0, 1.0], [1.0, 0.0]]).is_ok());
        assert_eq!(
            ensure_symmetric(&array![[0.0, 1.0], [0.5, 0.0]]).unwrap_err(),
            Error::NotSymmetric { row: 0, col: 1 }
        );
    }

    #[test]
    fn test_ensure_finite_reports_position() {
        let m = array![[0.0, 1.0], [f64::NAN, 0.0]];
        assert_eq!(
            ensure_finite(&m, "test").unwrap_err(),
            Error::NonFinite {
                stage: "test",
                row: 1,
                col: 0
            }
        );
    }
}
