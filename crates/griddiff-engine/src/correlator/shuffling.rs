//! Order-agnostic greedy matching.
//!
//! Every possible outcome is a candidate: A-index `i` left unmatched, B-index `j` left unmatched,
//! or the pair `(i, j)`. Candidates are sorted cheapest first and taken greedily; taking one
//! retires every other candidate that mentions either of its indices.
//
// TODO: replace the greedy pass with a min-cost-flow formulation (gaps as a dummy dimension)
// once callers stop depending on the greedy tie-break order.

use rayon::prelude::*;
use std::cmp::Ordering;

use super::{Cost, PARALLEL_MIN_LEN};
use crate::paired::Paired;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
struct Candidate {
    idx_a: Option<usize>,
    idx_b: Option<usize>,
    cost: Cost,
}

impl Candidate {
    fn gap_a(i: usize, cost: Cost) -> Self {
        Candidate {
            idx_a: Some(i),
            idx_b: None,
            cost,
        }
    }

    fn gap_b(j: usize, cost: Cost) -> Self {
        Candidate {
            idx_a: None,
            idx_b: Some(j),
            cost,
        }
    }

    fn pair(i: usize, j: usize, cost: Cost) -> Self {
        Candidate {
            idx_a: Some(i),
            idx_b: Some(j),
            cost,
        }
    }
}

impl Ord for Candidate {
    /// Cheaper first. On equal cost:
    ///
    /// 1. a pairing beats a gap
    /// 2. between pairings: smaller `|i - j|`, then smaller `i + j`, then smaller `i`
    /// 3. between gaps: an A-side gap beats a B-side gap, then the smaller index
    fn cmp(&self, other: &Self) -> Ordering {
        self.cost.cmp(&other.cost).then_with(|| {
            match ((self.idx_a, self.idx_b), (other.idx_a, other.idx_b)) {
                ((Some(ia), Some(ib)), (Some(oa), Some(ob))) => ia
                    .abs_diff(ib)
                    .cmp(&oa.abs_diff(ob))
                    .then_with(|| (ia + ib).cmp(&(oa + ob)))
                    .then_with(|| ia.cmp(&oa)),
                ((Some(_), Some(_)), _) => Ordering::Less,
                (_, (Some(_), Some(_))) => Ordering::Greater,
                _ => {
                    let side_rank = |c: &Candidate| u8::from(c.idx_a.is_none());
                    let index = |c: &Candidate| c.idx_a.or(c.idx_b);
                    side_rank(self)
                        .cmp(&side_rank(other))
                        .then_with(|| index(self).cmp(&index(other)))
                }
            }
        })
    }
}

impl PartialOrd for Candidate {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

pub(crate) fn correlate<T, G, D>(list_a: &[T], list_b: &[T], gap: &G, diff: &D) -> Vec<Paired<usize>>
where
    T: Sync,
    G: Fn(&T) -> Cost + Sync,
    D: Fn(&T, &T) -> Cost + Sync,
{
    let n = list_a.len();
    let m = list_b.len();

    let mut candidates = collect_candidates(list_a, list_b, gap, diff);
    if candidates.len() < PARALLEL_MIN_LEN {
        candidates.sort_unstable();
    } else {
        candidates.par_sort_unstable();
    }

    let mut taken_a = vec![false; n];
    let mut taken_b = vec![false; m];
    let mut remaining = n + m;
    let mut pairs = Vec::with_capacity(n.max(m));

    for c in candidates {
        if remaining == 0 {
            break;
        }
        if c.idx_a.is_some_and(|i| taken_a[i]) || c.idx_b.is_some_and(|j| taken_b[j]) {
            continue;
        }
        if let Some(i) = c.idx_a {
            taken_a[i] = true;
            remaining -= 1;
        }
        if let Some(j) = c.idx_b {
            taken_b[j] = true;
            remaining -= 1;
        }
        pairs.push(Paired::of_nullable(c.idx_a, c.idx_b));
    }

    pairs
}

fn collect_candidates<T, G, D>(list_a: &[T], list_b: &[T], gap: &G, diff: &D) -> Vec<Candidate>
where
    T: Sync,
    G: Fn(&T) -> Cost + Sync,
    D: Fn(&T, &T) -> Cost + Sync,
{
    let n = list_a.len();
    let m = list_b.len();
    let mut candidates = Vec::with_capacity(n + m + n * m);

    if n * m < PARALLEL_MIN_LEN {
        candidates.extend(list_a.iter().enumerate().map(|(i, a)| Candidate::gap_a(i, gap(a))));
        candidates.extend(list_b.iter().enumerate().map(|(j, b)| Candidate::gap_b(j, gap(b))));
        for (i, a) in list_a.iter().enumerate() {
            candidates.extend(
                list_b
                    .iter()
                    .enumerate()
                    .map(|(j, b)| Candidate::pair(i, j, diff(a, b))),
            );
        }
    } else {
        candidates.par_extend(
            list_a
                .par_iter()
                .enumerate()
                .map(|(i, a)| Candidate::gap_a(i, gap(a))),
        );
        candidates.par_extend(
            list_b
                .par_iter()
                .enumerate()
                .map(|(j, b)| Candidate::gap_b(j, gap(b))),
        );
        candidates.par_extend(list_a.par_iter().enumerate().flat_map(|(i, a)| {
            list_b
                .par_iter()
                .enumerate()
                .map(move |(j, b)| Candidate::pair(i, j, diff(a, b)))
        }));
    }

    candidates
}
