//! # symnmf
//!
//! Symmetric non-negative matrix factorization (SymNMF) for clustering points
//! through a similarity graph.
//!
//! The pipeline is strictly layered; each stage consumes the previous one's
//! output:
//!
//! | Stage | Entry point | Output |
//! |-------|-------------|--------|
//! | Similarity | [`sym`] | `W[i][j] = exp(-‖pᵢ − pⱼ‖² / 2)`, zero diagonal |
//! | Degree | [`ddg`] | `D = diag(Σⱼ W[i][j])` |
//! | Normalization | [`norm`] | `A = D^{-1/2} W D^{-1/2}` |
//! | Factorization | [`symnmf`] | `H ≥ 0` with `A ≈ H Hᵀ` |
//!
//! Cluster `i`'s label is the argmax of row `i` of `H`. The
//! [`SymNmfClustering`] runner wires the stages together with a seeded
//! initial `H`.
//!
//! Matrices are dense `ndarray::Array2<f64>` values; `n`, `d` and `k` are
//! carried by their shapes.
//!
//! ```rust
//! use ndarray::array;
//! use rand::rngs::StdRng;
//! use rand::SeedableRng;
//!
//! let points = array![[0.0, 0.0], [0.1, 0.1], [5.0, 5.0], [5.1, 5.1]];
//! let a = symnmf::norm(&points).unwrap();
//! let h0 = symnmf::init::initial_association(&a, 2, &mut StdRng::seed_from_u64(0)).unwrap();
//! let h = symnmf::symnmf(&a, h0).unwrap();
//! assert_eq!(h.dim(), (4, 2));
//! ```
//!
//! Enable the `parallel` feature to compute similarity rows and the
//! factorizer update on the rayon pool.

pub mod affinity;
pub mod cluster;
/// Error types used across `symnmf`.
pub mod error;
pub mod factorize;
mod goal;
pub mod init;
pub mod io;
pub mod matrix;

use ndarray::Array2;

pub use crate::cluster::{Clustering, Fit, SoftClustering, SymNmfClustering};
pub use crate::factorize::{Factorization, SymNmf, DEFAULT_BETA, DEFAULT_MAX_ITER, DEFAULT_TOL};
pub use error::{Error, ErrorKind, Result};
pub use goal::Goal;
pub use matrix::{points_from_rows, row_argmax};

/// Similarity matrix `W` of `n × d` points.
pub fn sym(points: &Array2<f64>) -> Result<Array2<f64>> {
    affinity::similarity_matrix(points)
}

/// Degree matrix `D` of `n × d` points.
pub fn ddg(points: &Array2<f64>) -> Result<Array2<f64>> {
    let w = affinity::similarity_matrix(points)?;
    affinity::degree_matrix(&w)
}

/// Normalized similarity matrix `A` of `n × d` points.
pub fn norm(points: &Array2<f64>) -> Result<Array2<f64>> {
    let w = affinity::similarity_matrix(points)?;
    let d = affinity::degree_matrix(&w)?;
    affinity::normalized_similarity(&w, &d)
}

/// Factorize `a` from `initial_h` with the default settings and return `H`.
pub fn symnmf(a: &Array2<f64>, initial_h: Array2<f64>) -> Result<Array2<f64>> {
    SymNmf::default().factorize(a, initial_h).map(|f| f.h)
}
