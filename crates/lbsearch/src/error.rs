use thiserror::Error;

/// Rejection reported by [`SortedRun::new`](crate::SortedRun::new).
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum OrderError {
    /// `sequence[index] > sequence[index + 1]`.
    #[error("sequence is not non-decreasing at index {index}: {previous} > {next}")]
    Descending {
        index: usize,
        previous: i64,
        next: i64,
    },
}

impl OrderError {
    /// Index of the first element of the offending pair.
    #[must_use]
    pub const fn index(&self) -> usize {
        match self {
            Self::Descending { index, .. } => *index,
        }
    }
}
