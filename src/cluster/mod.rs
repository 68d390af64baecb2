//! Clustering on top of the factorization.
//!
//! SymNMF factorizes the normalized similarity `A ≈ H Hᵀ` with `H ≥ 0`.
//! Row `i` of `H` is point `i`'s affinity to each of the `k` groups, so it
//! is read two ways:
//!
//! - **Hard**: the column with the largest entry (lowest index on ties).
//! - **Soft**: the row scaled to sum to one.
//!
//! Compared with spectral clustering on the same `A`, there is no
//! eigendecomposition and no k-means post-processing: non-negativity
//! alone makes the factor interpretable.
//!
//! ```rust
//! use symnmf::cluster::{Clustering, SymNmfClustering};
//!
//! let data = vec![
//!     vec![0.0, 0.0],
//!     vec![0.1, 0.1],
//!     vec![10.0, 10.0],
//!     vec![10.1, 10.1],
//! ];
//!
//! let labels = SymNmfClustering::new(2)
//!     .with_tol(1e-10)
//!     .with_max_iter(2000)
//!     .with_seed(42)
//!     .fit_predict(&data)
//!     .unwrap();
//! assert_eq!(labels[0], labels[1]);
//! assert_ne!(labels[0], labels[2]);
//! ```

mod symnmf;
mod traits;

pub use symnmf::{Fit, SymNmfClustering};
pub use traits::{Clustering, SoftClustering};
