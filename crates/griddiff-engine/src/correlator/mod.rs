//! Sequence correlation.
//!
//! A [`Correlator`] decides which element of sequence A corresponds to which element of
//! sequence B under a cost model made of two evaluators:
//!
//! - a *gap* evaluator, the cost of leaving an element without a counterpart
//! - a *diff* evaluator, the cost of pairing two specific elements (0 when identical)
//!
//! Two strategies exist:
//!
//! - [`Correlator::considering_gaps`] keeps the element order of both sequences and finds the
//!   cheapest alignment by dynamic programming (edit-distance style).
//! - [`Correlator::with_shuffling`] ignores element order and greedily consumes the globally
//!   cheapest remaining candidate. This is a heuristic, not an optimal assignment.
//!
//! Either way the result lists every index of A exactly once (paired or A-only) and every
//! index of B exactly once (paired or B-only).

mod sequential;
mod shuffling;

use log::debug;
use std::time::Instant;

use crate::error::{EngineError, Result};
use crate::paired::Paired;

/// Cost unit used by every evaluator.
pub type Cost = u32;

/// Diff cost meaning "never pair these two".
pub const INFINITE_COST: Cost = Cost::MAX;

/// Diagonals (sequential) or candidate sets (shuffling) smaller than this run on the calling
/// thread.
pub(crate) const PARALLEL_MIN_LEN: usize = 256;

/// Which correlation algorithm a [`Correlator`] runs.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Strategy {
    /// Order-preserving dynamic programming.
    Sequential,
    /// Order-agnostic greedy matching.
    Shuffling,
}

/// A sequence aligner parameterized by its gap and diff evaluators.
#[derive(Clone, Debug)]
pub struct Correlator<G, D> {
    strategy: Strategy,
    gap: G,
    diff: D,
}

impl<G, D> Correlator<G, D> {
    /// Order-preserving correlator that accounts for surplus/missing elements.
    pub fn considering_gaps(gap: G, diff: D) -> Self {
        Correlator {
            strategy: Strategy::Sequential,
            gap,
            diff,
        }
    }

    /// Order-agnostic correlator pairing the cheapest candidates first.
    pub fn with_shuffling(gap: G, diff: D) -> Self {
        Correlator {
            strategy: Strategy::Shuffling,
            gap,
            diff,
        }
    }

    pub fn strategy(&self) -> Strategy {
        self.strategy
    }

    /// Correlate `list_a` with `list_b`.
    ///
    /// Fails with [`EngineError::InvalidArgument`] if both arguments are the same slice.
    pub fn correlate<T>(&self, list_a: &[T], list_b: &[T]) -> Result<Vec<Paired<usize>>>
    where
        T: Sync,
        G: Fn(&T) -> Cost + Sync,
        D: Fn(&T, &T) -> Cost + Sync,
    {
        ensure_distinct(list_a, list_b)?;

        let started = Instant::now();
        let pairs = match self.strategy {
            Strategy::Sequential => {
                sequential::correlate(list_a, list_b, &self.gap, &self.diff)
            }
            Strategy::Shuffling => shuffling::correlate(list_a, list_b, &self.gap, &self.diff),
        };
        debug!(
            "{:?} correlation of {}x{} elements took {:?}",
            self.strategy,
            list_a.len(),
            list_b.len(),
            started.elapsed()
        );
        Ok(pairs)
    }
}

fn ensure_distinct<T>(list_a: &[T], list_b: &[T]) -> Result<()> {
    // Empty slices and zero-sized elements share dangling addresses, so identity says nothing.
    if !list_a.is_empty() && std::mem::size_of::<T>() != 0 && std::ptr::eq(list_a, list_b) {
        return Err(EngineError::InvalidArgument(
            "list_a and list_b are the same sequence".to_string(),
        ));
    }
    Ok(())
}

pub(crate) use sequential::correlate as correlate_sequential;

#[cfg(test)]
mod tests {
    use super::*;

    fn unit_gap(_: &i64) -> Cost {
        1
    }

    fn abs_diff(x: &i64, y: &i64) -> Cost {
        x.abs_diff(*y) as Cost
    }

    #[test]
    fn test_same_slice_is_rejected() {
        let list = vec![1i64, 2, 3];
        for correlator in [
            Correlator::considering_gaps(unit_gap, abs_diff),
            Correlator::with_shuffling(unit_gap, abs_diff),
        ] {
            let err = correlator.correlate(&list, &list).unwrap_err();
            assert!(matches!(err, EngineError::InvalidArgument(_)));
        }
    }

    #[test]
    fn test_equal_but_distinct_slices_are_accepted() {
        let a = vec![1i64, 2, 3];
        let b = a.clone();
        let pairs = Correlator::considering_gaps(unit_gap, abs_diff)
            .correlate(&a, &b)
            .unwrap();
        assert_eq!(pairs, vec![Paired::of(0, 0), Paired::of(1, 1), Paired::of(2, 2)]);
    }

    #[test]
    fn test_empty_inputs() {
        let empty: Vec<i64> = Vec::new();
        let other: Vec<i64> = Vec::new();
        for correlator in [
            Correlator::considering_gaps(unit_gap, abs_diff),
            Correlator::with_shuffling(unit_gap, abs_diff),
        ] {
            assert!(correlator.correlate(&empty, &other).unwrap().is_empty());
            assert!(correlator.correlate(&empty, &empty).unwrap().is_empty());
            assert_eq!(
                correlator.correlate(&empty, &[5i64]).unwrap(),
                vec![Paired::only_b(0)]
            );
        }
    }

    #[test]
    fn test_strategy_tag() {
        let c = Correlator::with_shuffling(unit_gap, abs_diff);
        assert_eq!(c.strategy(), Strategy::Shuffling);
    }
}
