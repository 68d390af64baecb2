//! Plain-text matrix representation.
//!
//! Input is one point per line, coordinates separated by commas:
//!
//! ```text
//! 0.1,2.5,-1.0
//! 3.0,0.0,4.2
//! ```
//!
//! Output matrices are rendered the same way with four decimals per entry.

use crate::error::{Error, Result};
use crate::matrix::points_from_rows;
use ndarray::Array2;
use std::fmt::Write as _;
use std::path::Path;

/// Parse comma-separated points, one per non-blank line.
///
/// # Errors
///
/// - [`Error::Parse`] for a field that is not a number.
/// - [`Error::DimensionMismatch`] for rows of different lengths.
/// - [`Error::EmptyInput`] if there are no points.
pub fn parse_points(text: &str) -> Result<Array2<f64>> {
    let mut rows: Vec<Vec<f64>> = Vec::new();
    for (idx, line) in text.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        let row = line
            .split(',')
            .map(|field| {
                let field = field.trim();
                field.parse::<f64>().map_err(|_| Error::Parse {
                    line: idx + 1,
                    value: field.to_string(),
                })
            })
            .collect::<Result<Vec<f64>>>()?;
        rows.push(row);
    }
    points_from_rows(&rows)
}

/// Read and parse a points file.
pub fn read_points(path: impl AsRef<Path>) -> Result<Array2<f64>> {
    let text = std::fs::read_to_string(path)?;
    parse_points(&text)
}

/// Render a matrix as comma-separated rows with four decimals.
pub fn format_matrix(m: &Array2<f64>) -> String {
    let mut out = String::new();
    for row in m.rows() {
        for (j, v) in row.iter().enumerate() {
            if j > 0 {
                out.push(',');
            }
            // Writing to a String cannot fail.
            let _ = write!(out, "{v:.4}");
        }
        out.push('\n');
    }
    out
}
