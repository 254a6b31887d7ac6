//! Linear reference for the lower-bound result.
//!
//! Deliberately naive: the property suite and the performance gate pin
//! [`lower_bound`](crate::lower_bound) against this definition.

/// Number of elements strictly less than `value`.
///
/// Order-insensitive. For a non-decreasing `sequence` this is exactly the
/// leftmost insertion index of `value`.
#[must_use]
pub fn count_less_than(sequence: &[i64], value: i64) -> usize {
    sequence.iter().filter(|&&element| element < value).count()
}
