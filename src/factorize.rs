//! Symmetric non-negative matrix factorization by damped multiplicative updates.
//!
//! Given a symmetric non-negative `A` (n×n) and a non-negative starting
//! point `H₀` (n×k), find `H ≥ 0` minimizing
//!
//! ```text
//! ||A - H Hᵀ||²_F
//! ```
//!
//! # The Update
//!
//! Each iteration replaces every entry of `H` simultaneously:
//!
//! ```text
//! H'[i][j] = H[i][j] · ((1 - β) + β · (A H)[i][j] / (H Hᵀ H)[i][j])
//! ```
//!
//! with damping `β = 0.5`. `A` and `H` are non-negative, so the ratio is
//! non-negative and the multiplier is at least `1 - β`: an entry can shrink
//! towards zero but never changes sign. `H Hᵀ H` is evaluated as `H (Hᵀ H)`,
//! which keeps one iteration at `O(n²k + nk²)`.
//!
//! All new entries are computed from one snapshot of `H` into a second
//! buffer, and the buffers are swapped afterwards.
//!
//! # Zero Denominators
//!
//! `(H Hᵀ H)[i][j]` is zero exactly when every column used by row `i` is
//! orthogonal to column `j`, which forces `H[i][j] = 0`. Such an entry keeps
//! its previous value. Any other NaN or infinity is reported as
//! [`Error::NonFinite`] instead of being carried into the next iteration.
//!
//! # Termination
//!
//! The loop stops after the first iteration whose squared Frobenius delta
//! `Σ (H' - H)²` is strictly below `tol`, or after `max_iter` iterations,
//! whichever comes first. The last computed iterate is returned.
//!
//! # References
//!
//! - Kuang, Ding, Park (2012). "Symmetric Nonnegative Matrix Factorization
//!   for Graph Clustering"
//! - Ding, He, Simon (2005). "On the Equivalence of Nonnegative Matrix
//!   Factorization and Spectral Clustering"

use crate::error::{Error, Result};
use crate::matrix::{
    ensure_finite, ensure_non_negative, ensure_square, ensure_symmetric, frobenius_delta,
};
use log::{debug, info, trace};
use ndarray::linalg::general_mat_mul;
use ndarray::{Array2, Zip};

/// Default iteration cap.
pub const DEFAULT_MAX_ITER: usize = 300;
/// Default convergence threshold on the squared Frobenius delta.
pub const DEFAULT_TOL: f64 = 1e-4;
/// Default damping constant of the multiplicative update.
pub const DEFAULT_BETA: f64 = 0.5;

/// Multiplicative-update SymNMF solver.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SymNmf {
    /// Maximum iterations.
    max_iter: usize,
    /// Convergence threshold on `Σ (H' - H)²`.
    tol: f64,
    /// Damping constant.
    beta: f64,
}

impl Default for SymNmf {
    fn default() -> Self {
        Self::new()
    }
}

/// Outcome of [`SymNmf::factorize`].
#[derive(Debug, Clone, PartialEq)]
pub struct Factorization {
    /// Final association matrix (n×k).
    pub h: Array2<f64>,
    /// Number of updates applied.
    pub iterations: usize,
    /// Whether the loop stopped on the tolerance rather than the cap.
    pub converged: bool,
    /// Squared Frobenius delta of the last update, `None` if no update ran.
    pub delta: Option<f64>,
}

impl Factorization {
    /// Hard cluster assignment per row of `H`.
    pub fn assignments(&self) -> Vec<usize> {
        crate::matrix::row_argmax(&self.h)
    }
}

/// Scratch buffers reused across iterations.
struct Workspace {
    next: Array2<f64>,
    ah: Array2<f64>,
    hth: Array2<f64>,
    hhth: Array2<f64>,
}

impl Workspace {
    fn new(n: usize, k: usize) -> Self {
        Self {
            next: Array2::zeros((n, k)),
            ah: Array2::zeros((n, k)),
            hth: Array2::zeros((k, k)),
            hhth: Array2::zeros((n, k)),
        }
    }
}

impl SymNmf {
    /// Create a solver with the default cap, tolerance and damping.
    pub fn new() -> Self {
        Self {
            max_iter: DEFAULT_MAX_ITER,
            tol: DEFAULT_TOL,
            beta: DEFAULT_BETA,
        }
    }

    /// Set maximum iterations. Zero returns the starting point unchanged.
    pub fn with_max_iter(mut self, max_iter: usize) -> Self {
        self.max_iter = max_iter;
        self
    }

    /// Set convergence tolerance.
    pub fn with_tol(mut self, tol: f64) -> Self {
        self.tol = tol;
        self
    }

    /// Set the damping constant, in `(0, 1]`.
    pub fn with_beta(mut self, beta: f64) -> Self {
        self.beta = beta;
        self
    }

    /// Maximum iterations.
    pub fn max_iter(&self) -> usize {
        self.max_iter
    }

    /// Convergence tolerance.
    pub fn tol(&self) -> f64 {
        self.tol
    }

    /// Refine `h` towards `a ≈ h hᵀ`.
    ///
    /// # Errors
    ///
    /// - [`Error::ShapeMismatch`] if `a` is not square or `h` has a
    ///   different number of rows.
    /// - [`Error::InvalidClusterCount`] unless `1 <= k < n`.
    /// - [`Error::NotSymmetric`] if `a` is not symmetric.
    /// - [`Error::InvalidParameter`] for negative inputs or bad settings.
    /// - [`Error::NonFinite`] for NaN or infinity in the inputs or iterates.
    pub fn factorize(&self, a: &Array2<f64>, h: Array2<f64>) -> Result<Factorization> {
        self.validate(a, &h)?;
        let (n, k) = h.dim();
        debug!(
            "symnmf: n={n} k={k} max_iter={} tol={:e} beta={}",
            self.max_iter, self.tol, self.beta
        );

        let mut h = h;
        let mut ws = Workspace::new(n, k);
        let mut iterations = 0;
        let mut delta = None;
        let mut converged = false;

        while iterations < self.max_iter {
            self.step(a, &h, &mut ws);
            iterations += 1;
            ensure_finite(&ws.next, "symnmf")?;

            let d = frobenius_delta(&ws.next, &h);
            std::mem::swap(&mut h, &mut ws.next);
            delta = Some(d);
            trace!("symnmf: iteration {iterations} delta={d:e}");

            if d < self.tol {
                converged = true;
                break;
            }
        }

        info!("symnmf: stopped after {iterations} iterations (converged={converged})");
        Ok(Factorization {
            h,
            iterations,
            converged,
            delta,
        })
    }

    /// One simultaneous update: reads `h`, writes `ws.next`.
    fn step(&self, a: &Array2<f64>, h: &Array2<f64>, ws: &mut Workspace) {
        general_mat_mul(1.0, a, h, 0.0, &mut ws.ah);
        general_mat_mul(1.0, &h.t(), h, 0.0, &mut ws.hth);
        general_mat_mul(1.0, h, &ws.hth, 0.0, &mut ws.hhth);

        let beta = self.beta;
        let update = |out: &mut f64, &cur: &f64, &num: &f64, &den: &f64| {
            *out = if den == 0.0 {
                cur
            } else {
                cur * ((1.0 - beta) + beta * num / den)
            };
        };

        let zip = Zip::from(&mut ws.next).and(h).and(&ws.ah).and(&ws.hhth);

        #[cfg(feature = "parallel")]
        zip.par_for_each(update);

        #[cfg(not(feature = "parallel"))]
        zip.for_each(update);
    }

    fn validate(&self, a: &Array2<f64>, h: &Array2<f64>) -> Result<()> {
        if !(self.tol.is_finite() && self.tol >= 0.0) {
            return Err(Error::InvalidParameter {
                name: "tol",
                message: "must be finite and non-negative",
            });
        }
        if !(self.beta > 0.0 && self.beta <= 1.0) {
            return Err(Error::InvalidParameter {
                name: "beta",
                message: "must be in (0, 1]",
            });
        }

        let n = ensure_square(a)?;
        let (rows, k) = h.dim();
        if rows != n {
            return Err(Error::shape(format!("{n}xk"), (rows, k)));
        }
        if k == 0 || k >= n {
            return Err(Error::InvalidClusterCount {
                requested: k,
                n_items: n,
            });
        }

        ensure_finite(a, "symnmf")?;
        ensure_finite(h, "symnmf")?;
        ensure_symmetric(a)?;
        ensure_non_negative(a, "a")?;
        ensure_non_negative(h, "initial_h")?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::affinity::{degree_matrix, normalized_similarity, similarity_matrix};
    use crate::error::ErrorKind;
    use approx::assert_relative_eq;
    use ndarray::array;
    use proptest::prelude::*;

    fn normalized(points: &Array2<f64>) -> Array2<f64> {
        let w = similarity_matrix(points).unwrap();
        let d = degree_matrix(&w).unwrap();
        normalized_similarity(&w, &d).unwrap()
    }

    #[test]
    fn test_single_update_matches_rule() {
        // AH = [1, 1]ᵀ, HᵀH = 2, HHᵀH = [2, 2]ᵀ  →  1 · (0.5 + 0.5 · 1/2) = 0.75
        let a = array![[0.0, 1.0], [1.0, 0.0]];
        let h = array![[1.0], [1.0]];
        let out = SymNmf::new().with_max_iter(1).factorize(&a, h).unwrap();

        assert_eq!(out.iterations, 1);
        assert!(!out.converged);
        assert_relative_eq!(out.h[[0, 0]], 0.75);
        assert_relative_eq!(out.h[[1, 0]], 0.75);
        assert_relative_eq!(out.delta.unwrap(), 0.125);
    }

    #[test]
    fn test_fixed_point_converges_in_one_iteration() {
        let a = array![[0.0, 1.0], [1.0, 0.0]];
        let s = std::f64::consts::FRAC_1_SQRT_2;
        let h = array![[s], [s]];
        let out = SymNmf::new().factorize(&a, h.clone()).unwrap();

        assert_eq!(out.iterations, 1);
        assert!(out.converged);
        assert_relative_eq!(out.h[[0, 0]], s, epsilon = 1e-12);
    }

    #[test]
    fn test_zero_iterations_returns_input() {
        let a = normalized(&array![[0.0, 0.0], [0.0, 0.1], [3.0, 3.0]]);
        let h = array![[0.2, 0.4], [0.1, 0.3], [0.5, 0.0]];
        let out = SymNmf::new()
            .with_max_iter(0)
            .factorize(&a, h.clone())
            .unwrap();

        assert_eq!(out.h, h);
        assert_eq!(out.iterations, 0);
        assert_eq!(out.delta, None);
        assert!(!out.converged);
    }

    #[test]
    fn test_zero_row_holds() {
        let a = normalized(&array![[0.0, 0.0], [0.0, 0.5], [0.5, 0.0], [0.5, 0.5]]);
        let h = array![[0.0, 0.0], [0.3, 0.1], [0.2, 0.4], [0.1, 0.1]];
        let out = SymNmf::new().with_max_iter(25).factorize(&a, h).unwrap();

        assert_eq!(out.h[[0, 0]], 0.0);
        assert_eq!(out.h[[0, 1]], 0.0);
        assert!(out.h.iter().all(|v| v.is_finite() && *v >= 0.0));
    }

    #[test]
    fn test_k_equals_n_minus_one_is_finite() {
        let points = array![[0.0, 0.0], [1.0, 0.0], [0.0, 1.0], [1.0, 1.0], [0.5, 0.5]];
        let a = normalized(&points);
        let h = Array2::from_shape_fn((5, 4), |(i, j)| 0.1 + 0.05 * ((i * 4 + j) % 7) as f64);
        let out = SymNmf::new().factorize(&a, h).unwrap();

        assert_eq!(out.h.dim(), (5, 4));
        assert!(out.h.iter().all(|v| v.is_finite() && *v >= 0.0));
        assert!(out.iterations <= DEFAULT_MAX_ITER);
    }

    #[test]
    fn test_cap_bounds_iterations() {
        let a = normalized(&array![[0.0], [0.3], [2.0], [2.4], [5.0]]);
        let h = Array2::from_elem((5, 2), 0.4);
        let out = SymNmf::new()
            .with_max_iter(3)
            .with_tol(0.0)
            .factorize(&a, h)
            .unwrap();
        assert_eq!(out.iterations, 3);
        assert!(!out.converged);
    }

    #[test]
    fn test_shape_errors() {
        let a = Array2::<f64>::eye(3);
        let err = SymNmf::new()
            .factorize(&a, Array2::from_elem((2, 1), 0.5))
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidDimensions);

        let err = SymNmf::new()
            .factorize(&Array2::zeros((3, 2)), Array2::from_elem((3, 1), 0.5))
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidDimensions);

        let err = SymNmf::new()
            .factorize(&a, Array2::from_elem((3, 3), 0.5))
            .unwrap_err();
        assert_eq!(
            err,
            Error::InvalidClusterCount {
                requested: 3,
                n_items: 3
            }
        );
    }

    #[test]
    fn test_input_value_errors() {
        let a = array![[0.0, 1.0, 0.5], [1.0, 0.0, 0.2], [0.5, 0.2, 0.0]];

        let neg = array![[0.1], [-0.1], [0.3]];
        let err = SymNmf::new().factorize(&a, neg).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::MalformedInput);

        let nan = array![[0.1], [f64::NAN], [0.3]];
        let err = SymNmf::new().factorize(&a, nan).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::NumericDegenerate);

        let h = Array2::from_elem((3, 1), 0.3);
        assert!(SymNmf::new().with_tol(-1.0).factorize(&a, h.clone()).is_err());
        assert!(SymNmf::new().with_beta(0.0).factorize(&a, h).is_err());
    }

    proptest! {
        #[test]
        fn iterates_stay_non_negative(
            coords in proptest::collection::vec(-1.5f64..1.5, 6..30),
            init in proptest::collection::vec(0.0f64..1.0, 30),
            steps in 1usize..15,
        ) {
            let n = coords.len() / 2;
            let points = Array2::from_shape_vec((n, 2), coords[..n * 2].to_vec()).unwrap();
            let a = normalized(&points);
            let k = 2;
            let mut h = Array2::from_shape_vec((n, k), init[..n * k].to_vec()).unwrap();

            let solver = SymNmf::new().with_max_iter(1).with_tol(0.0);
            for _ in 0..steps {
                h = solver.factorize(&a, h).unwrap().h;
                prop_assert!(h.iter().all(|v| v.is_finite() && *v >= 0.0));
            }
        }

        #[test]
        fn terminates_within_cap(
            coords in proptest::collection::vec(-3.0f64..3.0, 8..24),
            max_iter in 0usize..50,
        ) {
            let n = coords.len() / 2;
            let points = Array2::from_shape_vec((n, 2), coords[..n * 2].to_vec()).unwrap();
            let a = normalized(&points);
            let h = Array2::from_shape_fn((n, 2), |(i, j)| 0.2 + 0.1 * ((i + 2 * j) % 3) as f64);

            let out = SymNmf::new().with_max_iter(max_iter).factorize(&a, h).unwrap();
            prop_assert!(out.iterations <= max_iter);
            prop_assert_eq!(out.iterations == 0, out.delta.is_none());
        }
    }
}
