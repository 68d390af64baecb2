use core::fmt;

/// Result alias for `symnmf`.
pub type Result<T> = std::result::Result<T, Error>;

/// Coarse error taxonomy shared by every stage.
///
/// Callers that only need to surface a single generic failure can ignore
/// this; tests use it to check which class of failure a stage reported.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Input data that can never be factorized (empty, ragged, bad `k`, bad parameters).
    MalformedInput,
    /// A numeric condition that would produce NaN or infinity.
    NumericDegenerate,
    /// Matrix shapes that do not line up between stages.
    InvalidDimensions,
    /// Reading input failed.
    Io,
}

/// Errors returned by the similarity, normalization and factorization stages.
#[derive(Debug, Clone, PartialEq)]
pub enum Error {
    /// Input was empty.
    EmptyInput,

    /// A point does not share the dimensionality of the first point.
    DimensionMismatch {
        /// Offending row.
        row: usize,
        /// Dimension of the first point.
        expected: usize,
        /// Dimension found at `row`.
        found: usize,
    },

    /// Invalid number of clusters requested.
    InvalidClusterCount {
        /// Requested count.
        requested: usize,
        /// Number of points.
        n_items: usize,
    },

    /// Invalid parameter or input value.
    InvalidParameter {
        /// Parameter name.
        name: &'static str,
        /// Error message.
        message: &'static str,
    },

    /// A numeric field of the text input could not be parsed.
    Parse {
        /// 1-based line number.
        line: usize,
        /// The field as it appeared in the input.
        value: String,
    },

    /// Matrix shape mismatch.
    ShapeMismatch {
        /// Expected shape description.
        expected: String,
        /// Actual shape description.
        actual: String,
    },

    /// Matrix that must be symmetric is not.
    NotSymmetric {
        /// Row of the first asymmetric pair.
        row: usize,
        /// Column of the first asymmetric pair.
        col: usize,
    },

    /// A point has zero total similarity, so `D^{-1/2}` is undefined.
    ZeroDegree {
        /// Index of the isolated point.
        index: usize,
    },

    /// A NaN or infinite entry appeared in a matrix.
    NonFinite {
        /// Stage that produced or received the value.
        stage: &'static str,
        /// Row of the entry.
        row: usize,
        /// Column of the entry.
        col: usize,
    },

    /// I/O failure while reading points.
    Io(String),
}

impl Error {
    /// Map this error onto the coarse taxonomy.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::EmptyInput
            | Error::DimensionMismatch { .. }
            | Error::InvalidClusterCount { .. }
            | Error::InvalidParameter { .. }
            | Error::Parse { .. } => ErrorKind::MalformedInput,
            Error::ShapeMismatch { .. } | Error::NotSymmetric { .. } => {
                ErrorKind::InvalidDimensions
            }
            Error::ZeroDegree { .. } | Error::NonFinite { .. } => ErrorKind::NumericDegenerate,
            Error::Io(_) => ErrorKind::Io,
        }
    }

    pub(crate) fn shape(expected: impl Into<String>, actual: (usize, usize)) -> Self {
        Error::ShapeMismatch {
            expected: expected.into(),
            actual: format!("{}x{}", actual.0, actual.1),
        }
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::EmptyInput => write!(f, "empty input provided"),
            Error::DimensionMismatch {
                row,
                expected,
                found,
            } => {
                write!(
                    f,
                    "dimension mismatch at row {row}: expected {expected}, found {found}"
                )
            }
            Error::InvalidClusterCount { requested, n_items } => {
                write!(f, "cannot create {requested} clusters from {n_items} items")
            }
            Error::InvalidParameter { name, message } => {
                write!(f, "invalid parameter '{name}': {message}")
            }
            Error::Parse { line, value } => {
                write!(f, "line {line}: cannot parse '{value}' as a number")
            }
            Error::ShapeMismatch { expected, actual } => {
                write!(f, "shape mismatch: expected {expected}, actual {actual}")
            }
            Error::NotSymmetric { row, col } => {
                write!(f, "matrix is not symmetric at ({row}, {col})")
            }
            Error::ZeroDegree { index } => {
                write!(f, "point {index} has zero degree; normalization is undefined")
            }
            Error::NonFinite { stage, row, col } => {
                write!(f, "{stage}: non-finite value at ({row}, {col})")
            }
            Error::Io(msg) => write!(f, "i/o error: {msg}"),
        }
    }
}

impl std::error::Error for Error {}

impl From<std::io::Error> for Error {
    fn from(e: std::io::Error) -> Self {
        Error::Io(e.to_string())
    }
}
