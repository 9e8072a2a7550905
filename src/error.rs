use thiserror::Error;

/// Enum with all errors in this crate.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum KnnIndexError {
    /// A lookup asked for a point that was never inserted.
    #[error("Point not found in tree")]
    PointNotFound,

    /// `dequeue_min`, `worst` or `best` on a queue holding no entries.
    #[error("Bounded priority queue is empty")]
    EmptyQueue,

    /// Input coordinates do not have the dimension of the tree.
    #[error("Expected {expected}-dimensional coordinates, got {actual}")]
    DimensionMismatch { expected: usize, actual: usize },

    /// An interleaved coordinate buffer whose length is not a multiple of the dimension.
    #[error("Interleaved buffer of length {len} is not a multiple of dimension {dimension}")]
    InterleavedLength { len: usize, dimension: usize },

    /// Bulk input with a different number of points and values.
    #[error("Got {points} points but {values} values")]
    LengthMismatch { points: usize, values: usize },
}

pub type Result<T> = std::result::Result<T, KnnIndexError>;
