//! Similarity graph construction and normalization.
//!
//! The three stages feeding the factorizer, each consuming the previous
//! one's output:
//!
//! ```text
//! points (n×d) ──similarity_matrix──▶ W (n×n)
//!                                      │
//!                        degree_matrix ▼
//!                                     D (n×n, diagonal)
//!                                      │
//!             normalized_similarity    ▼
//!                                     A = D^{-1/2} W D^{-1/2}
//! ```
//!
//! ## Similarity
//!
//! A Gaussian (RBF) kernel with unit bandwidth:
//!
//! ```text
//! W[i][j] = exp(-||p_i - p_j||² / 2),   W[i][i] = 0
//! ```
//!
//! The zero diagonal removes self-loops, so a point's degree measures only
//! its affinity to *other* points.
//!
//! ## Normalization
//!
//! A is the symmetric normalized adjacency, the same operator spectral
//! clustering uses in `L_sym = I - D^{-1/2} W D^{-1/2}`. It is only defined
//! when every degree is positive; an isolated point is reported as
//! [`Error::ZeroDegree`](crate::Error::ZeroDegree).
//!
//! ```rust
//! use ndarray::array;
//! use symnmf::affinity::{degree_matrix, normalized_similarity, similarity_matrix};
//!
//! let points = array![[0.0, 0.0], [0.0, 1.0], [1.0, 0.0]];
//! let w = similarity_matrix(&points).unwrap();
//! let d = degree_matrix(&w).unwrap();
//! let a = normalized_similarity(&w, &d).unwrap();
//! assert_eq!(a[[0, 1]], a[[1, 0]]);
//! ```

mod degree;
mod normalize;
mod similarity;

pub use degree::degree_matrix;
pub use normalize::normalized_similarity;
pub use similarity::similarity_matrix;
