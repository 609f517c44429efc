use thiserror::Error;

/// Errors returned by the fuzzy clustering pipeline.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum Error {
    /// Input slice is empty.
    #[error("empty input: no data to cluster")]
    EmptyInput,

    /// Invalid parameter value.
    #[error("invalid parameter {name}: {message}")]
    InvalidParameter {
        /// Parameter name.
        name: &'static str,
        /// Human-readable explanation.
        message: &'static str,
    },

    /// Points in a dataset have inconsistent dimensionality.
    #[error("dimension mismatch: expected {expected}, found {found}")]
    DimensionMismatch {
        /// Expected dimensionality.
        expected: usize,
        /// Found dimensionality.
        found: usize,
    },

    /// A border point ended up with no core neighbour inside its cluster.
    ///
    /// Unreachable for a consistent distance matrix; seeing it means the
    /// neighbourhood query and the core classification disagree.
    #[error("border point {point} has no core neighbour in cluster {cluster}")]
    InvariantViolation {
        /// Index of the offending point.
        point: usize,
        /// Cluster being closed when the violation was found.
        cluster: usize,
    },
}

/// Result type used by this crate.
pub type Result<T> = std::result::Result<T, Error>;
