use crate::error::Result;
use crate::matrix::{ensure_square, ensure_symmetric};
use log::debug;
use ndarray::{Array2, Axis};

/// Build the diagonal degree matrix `D` of a similarity matrix `W`.
///
/// `D[i][i]` is the sum of row `i` of `W`; every off-diagonal entry is
/// exactly zero.
///
/// # Errors
///
/// [`Error::ShapeMismatch`](crate::Error::ShapeMismatch) if `W` is not
/// square and [`Error::NotSymmetric`](crate::Error::NotSymmetric) if it is
/// not symmetric.
pub fn degree_matrix(w: &Array2<f64>) -> Result<Array2<f64>> {
    let n = ensure_square(w)?;
    ensure_symmetric(w)?;

    let degrees = w.sum_axis(Axis(1));
    let d = Array2::from_diag(&degrees);

    debug!("ddg: {n} degrees, total affinity {:.4}", degrees.sum());
    Ok(d)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::affinity::similarity_matrix;
    use crate::error::{Error, ErrorKind};
    use approx::assert_relative_eq;
    use ndarray::array;

    #[test]
    fn test_degree_is_diagonal_row_sum() {
        let points = array![[0.0, 0.0], [1.0, 0.0], [0.0, 2.0], [5.0, 5.0]];
        let w = similarity_matrix(&points).unwrap();
        let d = degree_matrix(&w).unwrap();

        for i in 0..4 {
            let row_sum: f64 = w.row(i).sum();
            assert_relative_eq!(d[[i, i]], row_sum, epsilon = 1e-12);
            for j in 0..4 {
                if i != j {
                    assert_eq!(d[[i, j]], 0.0);
                }
            }
        }
    }

    #[test]
    fn test_non_square_rejected() {
        let w = Array2::<f64>::zeros((2, 3));
        let err = degree_matrix(&w).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidDimensions);
    }

    #[test]
    fn test_asymmetric_rejected() {
        let w = array![[0.0, 0.2], [0.3, 0.0]];
        assert_eq!(
            degree_matrix(&w).unwrap_err(),
            Error::NotSymmetric { row: 0, col: 1 }
        );
    }
}
