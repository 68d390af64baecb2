//! End-to-end SymNMF clustering.
//!
//! ```text
//! points ─▶ W ─▶ D ─▶ A ─▶ m = mean(A) ─▶ H₀ ~ U[0, 2·sqrt(m/k)) ─▶ H ─▶ argmax
//! ```

use super::traits::{Clustering, SoftClustering};
use crate::affinity::{degree_matrix, normalized_similarity, similarity_matrix};
use crate::error::{Error, Result};
use crate::factorize::{SymNmf, DEFAULT_MAX_ITER, DEFAULT_TOL};
use crate::init::initial_association;
use crate::matrix::{points_from_rows, row_argmax};
use log::debug;
use ndarray::Array2;
use rand::prelude::*;

/// SymNMF clustering of points into `k` groups.
#[derive(Debug, Clone)]
pub struct SymNmfClustering {
    /// Number of clusters.
    k: usize,
    /// Maximum factorizer iterations.
    max_iter: usize,
    /// Convergence tolerance.
    tol: f64,
    /// Random seed for the initial association matrix.
    seed: Option<u64>,
}

/// Result of [`SymNmfClustering::fit`].
#[derive(Debug, Clone)]
pub struct Fit {
    /// Normalized similarity matrix that was factorized.
    pub a: Array2<f64>,
    /// Final association matrix.
    pub h: Array2<f64>,
    /// Row-argmax of `h`.
    pub labels: Vec<usize>,
    /// Factorizer iterations.
    pub iterations: usize,
    /// Whether the factorizer met its tolerance.
    pub converged: bool,
}

impl SymNmfClustering {
    /// Create a new clusterer for `k` groups.
    pub fn new(k: usize) -> Self {
        Self {
            k,
            max_iter: DEFAULT_MAX_ITER,
            tol: DEFAULT_TOL,
            seed: None,
        }
    }

    /// Set maximum iterations.
    pub fn with_max_iter(mut self, max_iter: usize) -> Self {
        self.max_iter = max_iter;
        self
    }

    /// Set convergence tolerance.
    pub fn with_tol(mut self, tol: f64) -> Self {
        self.tol = tol;
        self
    }

    /// Set random seed for reproducibility.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Run the full pipeline on an `n × d` point matrix.
    pub fn fit(&self, points: &Array2<f64>) -> Result<Fit> {
        let mut rng: Box<dyn RngCore> = match self.seed {
            Some(s) => Box::new(StdRng::seed_from_u64(s)),
            None => Box::new(rand::rng()),
        };
        self.fit_with_rng(points, &mut rng)
    }

    /// Run the full pipeline, drawing `H₀` from the given generator.
    pub fn fit_with_rng<R: Rng + ?Sized>(&self, points: &Array2<f64>, rng: &mut R) -> Result<Fit> {
        let n = points.nrows();
        if n == 0 {
            return Err(Error::EmptyInput);
        }
        if self.k == 0 || self.k >= n {
            return Err(Error::InvalidClusterCount {
                requested: self.k,
                n_items: n,
            });
        }

        let w = similarity_matrix(points)?;
        let d = degree_matrix(&w)?;
        let a = normalized_similarity(&w, &d)?;

        let h0 = initial_association(&a, self.k, rng)?;
        let out = SymNmf::new()
            .with_max_iter(self.max_iter)
            .with_tol(self.tol)
            .factorize(&a, h0)?;

        let labels = row_argmax(&out.h);
        debug!("cluster: {n} points into {} groups", self.k);
        Ok(Fit {
            a,
            h: out.h,
            labels,
            iterations: out.iterations,
            converged: out.converged,
        })
    }
}

impl Clustering for SymNmfClustering {
    fn fit_predict(&self, data: &[Vec<f64>]) -> Result<Vec<usize>> {
        let points = points_from_rows(data)?;
        Ok(self.fit(&points)?.labels)
    }

    fn n_clusters(&self) -> usize {
        self.k
    }
}

impl SoftClustering for SymNmfClustering {
    fn fit_predict_proba(&self, data: &[Vec<f64>]) -> Result<Vec<Vec<f64>>> {
        let points = points_from_rows(data)?;
        let fit = self.fit(&points)?;
        let k = self.k as f64;

        Ok(fit
            .h
            .rows()
            .into_iter()
            .map(|row| {
                let total: f64 = row.sum();
                if total > 0.0 {
                    row.iter().map(|v| v / total).collect()
                } else {
                    vec![1.0 / k; row.len()]
                }
            })
            .collect())
    }
}
