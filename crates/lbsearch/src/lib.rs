//! Leftmost binary search ("lower bound") over sorted `i64` slices.
//!
//! [`lower_bound`] returns the number of elements strictly less than the
//! query, which is also the leftmost index at which the query could be
//! inserted without breaking order. The result lies in `[0, len]`; it equals
//! `len` when every element is smaller than the query and is therefore not
//! always a readable index.
//!
//! The input must be non-decreasing. Unsorted input is a caller bug: the
//! search still terminates without panicking and returns some index in
//! `[0, len]`, but which one is unspecified. Use [`SortedRun`] when the order
//! has to be checked once up front.

pub mod error;
pub mod oracle;
pub mod sorted;

pub use error::OrderError;
pub use oracle::count_less_than;
pub use sorted::{SortedRun, is_non_decreasing};

/// Leftmost insertion index of `value` in the non-decreasing `sequence`.
///
/// Returns the smallest `i` in `[0, sequence.len()]` such that every element
/// before `i` is `< value` and, when `i < len`, `sequence[i] >= value`.
/// Duplicates of `value` resolve to their first occurrence.
///
/// The window shrinks by `len / 2` per step regardless of the comparison
/// outcome, so the loop runs `ceil(log2(len))` times with a single
/// comparison each and no early exit on equality. Probes are taken as
/// `base + len / 2` of the current window, never as `(low + high) / 2`, so no
/// index sum can overflow even for slices close to `usize::MAX` elements.
/// Elements and `value` are compared as full-width `i64`.
///
/// ```
/// assert_eq!(lbsearch::lower_bound(&[1, 2, 2, 2, 3, 4], 2), 1);
/// assert_eq!(lbsearch::lower_bound(&[5, 6, 7], 11), 3);
/// assert_eq!(lbsearch::lower_bound(&[], 100), 0);
/// ```
#[must_use]
#[inline]
pub fn lower_bound(sequence: &[i64], value: i64) -> usize {
    let mut base = 0_usize;
    let mut window = sequence;

    // Invariant: the answer lies in `[base, base + window.len()]`.
    while window.len() > 1 {
        let half = window.len() / 2;
        let keep = window.len() - half;
        if window[half] < value {
            base += half;
            window = &window[half..];
        } else {
            window = &window[..keep];
        }
    }

    match window.first() {
        Some(&probe) => base + usize::from(probe < value),
        None => base,
    }
}
