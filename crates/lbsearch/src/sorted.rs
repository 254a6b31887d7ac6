//! Order-checked view over an `i64` slice.

use crate::error::OrderError;
use crate::lower_bound;

/// Whether every adjacent pair of `sequence` satisfies `a <= b`.
#[must_use]
pub fn is_non_decreasing(sequence: &[i64]) -> bool {
    first_descent(sequence).is_none()
}

fn first_descent(sequence: &[i64]) -> Option<OrderError> {
    sequence
        .windows(2)
        .position(|pair| pair[0] > pair[1])
        .map(|index| OrderError::Descending {
            index,
            previous: sequence[index],
            next: sequence[index + 1],
        })
}

/// A borrowed slice that was verified non-decreasing at construction.
///
/// Construction is a single O(n) pass; every search afterwards is the plain
/// [`lower_bound`] with no further checks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct SortedRun<'a> {
    values: &'a [i64],
}

impl<'a> SortedRun<'a> {
    /// Check `values` and wrap it.
    pub fn new(values: &'a [i64]) -> Result<Self, OrderError> {
        match first_descent(values) {
            Some(error) => Err(error),
            None => Ok(Self { values }),
        }
    }

    /// Leftmost insertion index of `value`, see [`lower_bound`].
    #[must_use]
    #[inline]
    pub fn lower_bound(&self, value: i64) -> usize {
        lower_bound(self.values, value)
    }

    #[must_use]
    pub const fn len(&self) -> usize {
        self.values.len()
    }

    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    #[must_use]
    pub const fn as_slice(&self) -> &'a [i64] {
        self.values
    }
}

impl<'a> TryFrom<&'a [i64]> for SortedRun<'a> {
    type Error = OrderError;

    fn try_from(values: &'a [i64]) -> Result<Self, Self::Error> {
        Self::new(values)
    }
}

impl AsRef<[i64]> for SortedRun<'_> {
    fn as_ref(&self) -> &[i64] {
        self.values
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sorted_run_accepts_duplicates_and_empty() {
        let run = SortedRun::new(&[1, 1, 2, 2, 2, 9]).expect("non-decreasing input");
        assert_eq!(run.len(), 6);
        assert_eq!(run.lower_bound(2), 2);
        assert_eq!(run.lower_bound(10), 6);

        let empty = SortedRun::new(&[]).expect("empty input is sorted");
        assert!(empty.is_empty());
        assert_eq!(empty.lower_bound(i64::MIN), 0);
    }

    #[test]
    fn test_sorted_run_reports_first_descent() {
        let err = SortedRun::new(&[1, 3, 2, 5, 4]).expect_err("3 > 2 must be rejected");
        assert_eq!(
            err,
            OrderError::Descending {
                index: 1,
                previous: 3,
                next: 2
            }
        );
        assert_eq!(err.index(), 1);
        assert_eq!(
            err.to_string(),
            "sequence is not non-decreasing at index 1: 3 > 2"
        );
    }

    #[test]
    fn test_try_from_slice() {
        let values = vec![-4_i64, 0, 8];
        let run = SortedRun::try_from(values.as_slice()).expect("sorted");
        assert_eq!(run.as_slice(), values.as_slice());
        assert_eq!(run.as_ref(), &[-4, 0, 8]);
        assert!(SortedRun::try_from(&[2_i64, 1][..]).is_err());
    }

    #[test]
    fn test_is_non_decreasing() {
        assert!(is_non_decreasing(&[]));
        assert!(is_non_decreasing(&[7]));
        assert!(is_non_decreasing(&[i64::MIN, 0, 0, i64::MAX]));
        assert!(!is_non_decreasing(&[0, -1]));
    }
}
