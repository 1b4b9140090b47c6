//! Row and column correspondence between two sheets.
//!
//! Each axis is paired by one of three strategies:
//!
//! - [`AxisStrategy::Identity`]: index `n` maps to index `n` over the union of both sheets'
//!   populated ranges.
//! - [`AxisStrategy::ByPosition`]: every row (column) becomes a line of its non-blank cells
//!   ordered by column (row) index, and the lines are aligned in order. Used when only this
//!   axis may have gaps, so positions along the other axis are stable.
//! - [`AxisStrategy::ByValue`]: as above, but lines are ordered and keyed by cell value. Used
//!   when both axes may have gaps, since positions along the other axis can shift too.

use log::debug;
use rayon::prelude::*;
use std::cmp::Ordering;
use std::collections::HashMap;

use griddiff_engine::evaluators::saturating_cost;
use griddiff_engine::{Cell, Correlator, Cost, Paired};

use crate::error::Result;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Axis {
    Row,
    Column,
}

impl Axis {
    /// The cell's index along this axis.
    pub fn index(self, cell: &Cell) -> usize {
        match self {
            Axis::Row => cell.row,
            Axis::Column => cell.col,
        }
    }

    /// The cell's index along the other axis.
    pub fn cross_index(self, cell: &Cell) -> usize {
        match self {
            Axis::Row => cell.col,
            Axis::Column => cell.row,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AxisStrategy {
    Identity,
    ByPosition,
    ByValue,
}

impl AxisStrategy {
    /// The (row, column) strategies for a pair of gap flags.
    pub fn select(consider_row_gaps: bool, consider_column_gaps: bool) -> (Self, Self) {
        match (consider_row_gaps, consider_column_gaps) {
            (true, true) => (AxisStrategy::ByValue, AxisStrategy::ByValue),
            (true, false) => (AxisStrategy::ByPosition, AxisStrategy::Identity),
            (false, true) => (AxisStrategy::Identity, AxisStrategy::ByPosition),
            (false, false) => (AxisStrategy::Identity, AxisStrategy::Identity),
        }
    }

    /// Pair the indices of `axis` between two sheets' cells. Returned indices are absolute
    /// sheet coordinates.
    pub fn pairing(self, axis: Axis, cells_a: &[Cell], cells_b: &[Cell]) -> Result<Vec<Paired<usize>>> {
        match self {
            AxisStrategy::Identity => Ok(identity_pairing(axis, cells_a, cells_b)),
            AxisStrategy::ByPosition => {
                correlate_lines(axis, cells_a, cells_b, |cell| axis.cross_index(cell))
            }
            AxisStrategy::ByValue => {
                correlate_lines(axis, cells_a, cells_b, |cell| cell.value.as_str())
            }
        }
    }
}

/// A row (or column) of non-blank cells reduced to `(key, value)` entries sorted by key.
type Line<'c, K> = Vec<(K, &'c str)>;

/// Min and max index along `axis`; `(0, 0)` for an empty sheet.
fn range(cells: &[Cell], axis: Axis) -> (usize, usize) {
    let min = cells.iter().map(|c| axis.index(c)).min().unwrap_or(0);
    let max = cells.iter().map(|c| axis.index(c)).max().unwrap_or(0);
    (min, max)
}

fn union_range(cells_a: &[Cell], cells_b: &[Cell], axis: Axis) -> (usize, usize) {
    let (min_a, max_a) = range(cells_a, axis);
    let (min_b, max_b) = range(cells_b, axis);
    (min_a.min(min_b), max_a.max(max_b))
}

fn identity_pairing(axis: Axis, cells_a: &[Cell], cells_b: &[Cell]) -> Vec<Paired<usize>> {
    let (start, end) = union_range(cells_a, cells_b, axis);
    (start..=end).map(|n| Paired::of(n, n)).collect()
}

fn correlate_lines<'c, K, F>(
    axis: Axis,
    cells_a: &'c [Cell],
    cells_b: &'c [Cell],
    key: F,
) -> Result<Vec<Paired<usize>>>
where
    K: Ord + Send + Sync,
    F: Fn(&'c Cell) -> K,
{
    let start = union_range(cells_a, cells_b, axis).0;
    let lines_a = build_lines(cells_a, axis, start, &key);
    let lines_b = build_lines(cells_b, axis, start, &key);
    debug!(
        "{:?} axis: correlating {} vs {} lines from index {}",
        axis,
        lines_a.len(),
        lines_b.len(),
        start
    );

    let correlator = Correlator::considering_gaps(line_gap_cost::<K>, line_diff_cost::<K>);
    let pairs = correlator.correlate(&lines_a, &lines_b)?;
    Ok(pairs.into_iter().map(|p| p.map(|i| i + start)).collect())
}

/// One line per index from `start` through this sheet's own maximum index.
fn build_lines<'c, K, F>(cells: &'c [Cell], axis: Axis, start: usize, key: &F) -> Vec<Line<'c, K>>
where
    K: Ord + Send,
    F: Fn(&'c Cell) -> K,
{
    let end = range(cells, axis).1;
    let mut grouped: HashMap<usize, Line<'c, K>> = HashMap::new();
    for cell in cells.iter().filter(|c| !c.is_blank()) {
        grouped
            .entry(axis.index(cell))
            .or_default()
            .push((key(cell), cell.value.as_str()));
    }

    let mut lines: Vec<Line<'c, K>> = (start..=end)
        .map(|i| grouped.remove(&i).unwrap_or_default())
        .collect();
    lines
        .par_iter_mut()
        .for_each(|line| line.sort_by(|x, y| x.0.cmp(&y.0)));
    lines
}

fn line_gap_cost<K>(line: &Line<'_, K>) -> Cost {
    saturating_cost(line.len())
}

/// Walk both key-sorted lines in step. Equal keys with different values cost 2, a key present
/// on one side only costs 1, and whatever remains once either line runs out costs 1 per entry.
fn line_diff_cost<K: Ord>(line_a: &Line<'_, K>, line_b: &Line<'_, K>) -> Cost {
    let mut iter_a = line_a.iter();
    let mut iter_b = line_b.iter();
    let mut current_a = None;
    let mut current_b = None;
    let mut order = Ordering::Equal;
    let mut diff = 0usize;

    while iter_a.len() > 0 && iter_b.len() > 0 {
        if order != Ordering::Greater {
            current_a = iter_a.next();
        }
        if order != Ordering::Less {
            current_b = iter_b.next();
        }
        if let (Some((key_a, value_a)), Some((key_b, value_b))) = (current_a, current_b) {
            order = key_a.cmp(key_b);
            match order {
                Ordering::Equal if value_a != value_b => diff += 2,
                Ordering::Equal => {}
                _ => diff += 1,
            }
        }
    }

    saturating_cost(diff + iter_a.len() + iter_b.len())
}
