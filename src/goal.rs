//! The four computations exposed to callers, selectable by name.

use crate::cluster::SymNmfClustering;
use crate::error::{Error, Result};
use ndarray::Array2;
use std::fmt;
use std::str::FromStr;

/// Which matrix to produce from a point set.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Goal {
    /// Final association matrix `H`.
    SymNmf,
    /// Similarity matrix `W`.
    Sym,
    /// Degree matrix `D`.
    Ddg,
    /// Normalized similarity `A`.
    Norm,
}

impl Goal {
    /// Produce the matrix for this goal.
    ///
    /// `k` and `seed` are only read by [`Goal::SymNmf`].
    pub fn run(self, points: &Array2<f64>, k: usize, seed: Option<u64>) -> Result<Array2<f64>> {
        match self {
            Goal::Sym => crate::sym(points),
            Goal::Ddg => crate::ddg(points),
            Goal::Norm => crate::norm(points),
            Goal::SymNmf => {
                let mut clusterer = SymNmfClustering::new(k);
                if let Some(s) = seed {
                    clusterer = clusterer.with_seed(s);
                }
                Ok(clusterer.fit(points)?.h)
            }
        }
    }
}

impl FromStr for Goal {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "symnmf" => Ok(Goal::SymNmf),
            "sym" => Ok(Goal::Sym),
            "ddg" => Ok(Goal::Ddg),
            "norm" => Ok(Goal::Norm),
            _ => Err(Error::InvalidParameter {
                name: "goal",
                message: "expected one of symnmf, sym, ddg, norm",
            }),
        }
    }
}

impl fmt::Display for Goal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Goal::SymNmf => "symnmf",
            Goal::Sym => "sym",
            Goal::Ddg => "ddg",
            Goal::Norm => "norm",
        };
        f.write_str(name)
    }
}
