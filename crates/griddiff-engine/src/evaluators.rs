//! Ready-made cost evaluators for use with [`Correlator`](crate::Correlator).

use crate::correlator::{Cost, INFINITE_COST, correlate_sequential};

/// Clamp a length to the cost range.
pub fn saturating_cost(len: usize) -> Cost {
    Cost::try_from(len).unwrap_or(INFINITE_COST)
}

/// Gap cost of 1 for any element.
pub fn unit_gap_cost<T: ?Sized>(_: &T) -> Cost {
    1
}

/// Diff cost of 0 for equal elements and [`INFINITE_COST`] otherwise.
pub fn equality_diff_cost<T: PartialEq + ?Sized>(x: &T, y: &T) -> Cost {
    if x == y { 0 } else { INFINITE_COST }
}

/// Gap cost of a string: its length in code points.
pub fn string_gap_cost<S: AsRef<str> + ?Sized>(s: &S) -> Cost {
    saturating_cost(s.as_ref().chars().count())
}

/// Diff cost between two strings: the number of code points left unmatched after aligning them
/// in order with unit gap cost and exact-match pairing.
pub fn string_diff_cost<S: AsRef<str> + ?Sized>(s1: &S, s2: &S) -> Cost {
    let chars1: Vec<char> = s1.as_ref().chars().collect();
    let chars2: Vec<char> = s2.as_ref().chars().collect();
    let route = correlate_sequential(
        &chars1,
        &chars2,
        &unit_gap_cost::<char>,
        &equality_diff_cost::<char>,
    );
    saturating_cost(route.iter().filter(|p| !p.is_paired()).count())
}
