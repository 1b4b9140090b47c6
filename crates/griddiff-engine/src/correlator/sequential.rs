//! Order-preserving alignment by dynamic programming.
//!
//! The search plane is an `(n + 1) x (m + 1)` grid. Row 0 and column 0 accumulate the gap
//! costs of a prefix of B and A respectively; interior cell `(i, j)` holds the cheapest cost of
//! having consumed the first `i` elements of A and the first `j` of B. Cell `(i, j)` only reads
//! `(i - 1, j - 1)`, `(i, j - 1)` and `(i - 1, j)`, all on the previous anti-diagonal, so each
//! diagonal is filled in parallel once the previous one is complete.

use rayon::prelude::*;

use super::{Cost, PARALLEL_MIN_LEN};
use crate::paired::Paired;

/// Best transition into a grid cell.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum ComeFrom {
    /// From the upper-left: A[i - 1] pairs with B[j - 1].
    UpperLeft,
    /// From above: A[i - 1] has no counterpart.
    Upper,
    /// From the left: B[j - 1] has no counterpart.
    Left,
}

struct Plane {
    width: usize,
    accumulated: Vec<u64>,
    directions: Vec<ComeFrom>,
}

impl Plane {
    fn idx(&self, i: usize, j: usize) -> usize {
        i * self.width + j
    }

    fn acc(&self, i: usize, j: usize) -> u64 {
        self.accumulated[self.idx(i, j)]
    }

    fn set(&mut self, i: usize, j: usize, cost: u64, dir: ComeFrom) {
        let k = self.idx(i, j);
        self.accumulated[k] = cost;
        self.directions[k] = dir;
    }

    fn direction(&self, i: usize, j: usize) -> ComeFrom {
        self.directions[self.idx(i, j)]
    }
}

pub(crate) fn correlate<T, G, D>(list_a: &[T], list_b: &[T], gap: &G, diff: &D) -> Vec<Paired<usize>>
where
    T: Sync,
    G: Fn(&T) -> Cost + Sync,
    D: Fn(&T, &T) -> Cost + Sync,
{
    let gaps_a: Vec<Cost> = gap_costs(list_a, gap);
    let gaps_b: Vec<Cost> = gap_costs(list_b, gap);
    let plane = fill_plane(list_a, list_b, &gaps_a, &gaps_b, diff);
    harvest_best_route(&plane, list_a.len(), list_b.len())
}

fn gap_costs<T, G>(list: &[T], gap: &G) -> Vec<Cost>
where
    T: Sync,
    G: Fn(&T) -> Cost + Sync,
{
    if list.len() < PARALLEL_MIN_LEN {
        list.iter().map(gap).collect()
    } else {
        list.par_iter().map(gap).collect()
    }
}

fn fill_plane<T, D>(list_a: &[T], list_b: &[T], gaps_a: &[Cost], gaps_b: &[Cost], diff: &D) -> Plane
where
    T: Sync,
    D: Fn(&T, &T) -> Cost + Sync,
{
    let n = list_a.len();
    let m = list_b.len();
    let mut plane = Plane {
        width: m + 1,
        accumulated: vec![0; (n + 1) * (m + 1)],
        directions: vec![ComeFrom::UpperLeft; (n + 1) * (m + 1)],
    };

    for i in 1..=n {
        let cost = plane.acc(i - 1, 0) + u64::from(gaps_a[i - 1]);
        plane.set(i, 0, cost, ComeFrom::Upper);
    }
    for j in 1..=m {
        let cost = plane.acc(0, j - 1) + u64::from(gaps_b[j - 1]);
        plane.set(0, j, cost, ComeFrom::Left);
    }

    for d in 2..=n + m {
        let lo = d.saturating_sub(m).max(1);
        let hi = (d - 1).min(n);
        if lo > hi {
            continue;
        }

        let shared = &plane;
        // Ties keep the earlier candidate: upper-left, then left, then upper.
        let best = |i: usize| -> (u64, ComeFrom) {
            let j = d - i;
            let mut min_cost = shared.acc(i - 1, j - 1) + u64::from(diff(&list_a[i - 1], &list_b[j - 1]));
            let mut min_dir = ComeFrom::UpperLeft;
            let left = shared.acc(i, j - 1) + u64::from(gaps_b[j - 1]);
            if left < min_cost {
                min_cost = left;
                min_dir = ComeFrom::Left;
            }
            let upper = shared.acc(i - 1, j) + u64::from(gaps_a[i - 1]);
            if upper < min_cost {
                min_cost = upper;
                min_dir = ComeFrom::Upper;
            }
            (min_cost, min_dir)
        };

        // The whole diagonal is computed before any of it is written back.
        let diagonal: Vec<(u64, ComeFrom)> = if hi - lo + 1 < PARALLEL_MIN_LEN {
            (lo..=hi).map(best).collect()
        } else {
            (lo..=hi).into_par_iter().map(best).collect()
        };

        for (offset, (cost, dir)) in diagonal.into_iter().enumerate() {
            let i = lo + offset;
            plane.set(i, d - i, cost, dir);
        }
    }

    plane
}

fn harvest_best_route(plane: &Plane, n: usize, m: usize) -> Vec<Paired<usize>> {
    let mut route = Vec::with_capacity(n + m);
    let (mut i, mut j) = (n, m);
    while i > 0 || j > 0 {
        match plane.direction(i, j) {
            ComeFrom::UpperLeft => {
                i -= 1;
                j -= 1;
                route.push(Paired::of(i, j));
            }
            ComeFrom::Upper => {
                i -= 1;
                route.push(Paired::only_a(i));
            }
            ComeFrom::Left => {
                j -= 1;
                route.push(Paired::only_b(j));
            }
        }
    }
    route.reverse();
    route
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::correlator::INFINITE_COST;
    use pretty_assertions::assert_eq;

    fn unit_gap(_: &char) -> Cost {
        1
    }

    fn exact(x: &char, y: &char) -> Cost {
        if x == y { 0 } else { INFINITE_COST }
    }

    fn chars(s: &str) -> Vec<char> {
        s.chars().collect()
    }

    #[test]
    fn test_identity_alignment() {
        let a = chars("xxx");
        let b = chars("xxx");
        let route = correlate(&a, &b, &unit_gap, &exact);
        assert_eq!(route, vec![Paired::of(0, 0), Paired::of(1, 1), Paired::of(2, 2)]);
    }

    #[test]
    fn test_disjoint_sequences_never_pair() {
        let a = chars("abcd");
        let b = chars("xyz");
        let route = correlate(&a, &b, &unit_gap, &exact);
        assert_eq!(route.iter().filter(|p| p.is_only_a()).count(), 4);
        assert_eq!(route.iter().filter(|p| p.is_only_b()).count(), 3);
        assert!(route.iter().all(|p| !p.is_paired()));
    }

    #[test]
    fn test_insertion_in_the_middle() {
        let a = chars("abd");
        let b = chars("abcd");
        let route = correlate(&a, &b, &unit_gap, &exact);
        assert_eq!(
            route,
            vec![
                Paired::of(0, 0),
                Paired::of(1, 1),
                Paired::only_b(2),
                Paired::of(2, 3),
            ]
        );
    }

    #[test]
    fn test_tie_prefers_left_over_upper() {
        // Every pairing is forbidden, so each cell picks between left and upper at equal cost.
        // Left wins ties, so the walk back from (1, 1) steps left first and B's gap comes last.
        let a = chars("a");
        let b = chars("b");
        let route = correlate(&a, &b, &unit_gap, &exact);
        assert_eq!(route, vec![Paired::only_a(0), Paired::only_b(0)]);
    }

    #[test]
    fn test_tie_prefers_diagonal() {
        // Pairing a with b costs 2, same as leaving both unmatched; the diagonal wins.
        let a = chars("a");
        let b = chars("b");
        let route = correlate(&a, &b, &unit_gap, &|_: &char, _: &char| -> Cost { 2 });
        assert_eq!(route, vec![Paired::of(0, 0)]);
    }

    #[test]
    fn test_wide_diagonals_match_narrow_ones() {
        // Long enough to take the parallel path on the middle diagonals.
        let a: Vec<char> = (0..600).map(|k| char::from(b'a' + (k % 7) as u8)).collect();
        let b: Vec<char> = (0..550).map(|k| char::from(b'a' + (k % 5) as u8)).collect();
        let route = correlate(&a, &b, &unit_gap, &exact);

        let paired = route.iter().filter(|p| p.is_paired()).count();
        let only_a = route.iter().filter(|p| p.is_only_a()).count();
        let only_b = route.iter().filter(|p| p.is_only_b()).count();
        assert_eq!(paired + only_a, a.len());
        assert_eq!(paired + only_b, b.len());
        for p in route.iter().filter(|p| p.is_paired()) {
            assert_eq!(a[*p.a().unwrap()], b[*p.b().unwrap()]);
        }
    }
}
