use log::debug;
use rayon::prelude::*;
use std::collections::HashMap;
use std::time::Instant;

use griddiff_engine::{Cell, CellRef, Paired};

use crate::cancel::CancelFlag;
use crate::compare::strategy::{Axis, AxisStrategy};
use crate::config::DiffConfig;
use crate::error::Result;
use crate::result::SheetDiff;

/// Compares two sheets given as sets of cells.
#[derive(Clone, Copy, Debug)]
pub struct SheetComparator {
    consider_row_gaps: bool,
    consider_column_gaps: bool,
    row_strategy: AxisStrategy,
    column_strategy: AxisStrategy,
}

impl SheetComparator {
    pub fn new(config: &DiffConfig) -> Self {
        let (row_strategy, column_strategy) =
            AxisStrategy::select(config.consider_row_gaps, config.consider_column_gaps);
        SheetComparator {
            consider_row_gaps: config.consider_row_gaps,
            consider_column_gaps: config.consider_column_gaps,
            row_strategy,
            column_strategy,
        }
    }

    pub fn compare(&self, cells_a: &[Cell], cells_b: &[Cell]) -> Result<SheetDiff> {
        self.compare_with_cancel(cells_a, cells_b, &CancelFlag::new())
    }

    /// Like [`SheetComparator::compare`], polling `cancel` before row alignment, column
    /// alignment and the cell cross-join.
    pub fn compare_with_cancel(
        &self,
        cells_a: &[Cell],
        cells_b: &[Cell],
        cancel: &CancelFlag,
    ) -> Result<SheetDiff> {
        let started = Instant::now();

        cancel.check()?;
        let row_pairs = self.row_strategy.pairing(Axis::Row, cells_a, cells_b)?;

        cancel.check()?;
        let column_pairs = self.column_strategy.pairing(Axis::Column, cells_a, cells_b)?;

        cancel.check()?;
        let diff_cells = compare_cells(cells_a, cells_b, &row_pairs, &column_pairs);

        debug!(
            "compared {} vs {} cells: {} row pairs, {} column pairs, {} mismatches in {:?}",
            cells_a.len(),
            cells_b.len(),
            row_pairs.len(),
            column_pairs.len(),
            diff_cells.len(),
            started.elapsed()
        );

        SheetDiff::new(
            self.consider_row_gaps,
            self.consider_column_gaps,
            redundant(&row_pairs),
            redundant(&column_pairs),
            diff_cells,
        )
    }
}

/// Indices each side holds with no counterpart on the other.
fn redundant(pairs: &[Paired<usize>]) -> Paired<Vec<usize>> {
    let only_a = pairs.iter().filter(|p| p.is_only_a()).filter_map(|p| p.a_opt().copied());
    let only_b = pairs.iter().filter(|p| p.is_only_b()).filter_map(|p| p.b_opt().copied());
    Paired::of(only_a.collect(), only_b.collect())
}

/// Cross-join paired rows with paired columns and collect every address whose values differ.
/// A position with no cell reads as blank and is reported through a placeholder.
fn compare_cells(
    cells_a: &[Cell],
    cells_b: &[Cell],
    row_pairs: &[Paired<usize>],
    column_pairs: &[Paired<usize>],
) -> Vec<Paired<Cell>> {
    let map_a = by_address(cells_a);
    let map_b = by_address(cells_b);
    let rows: Vec<(usize, usize)> = paired_only(row_pairs);
    let columns: Vec<(usize, usize)> = paired_only(column_pairs);

    rows.par_iter()
        .flat_map_iter(|&(row_a, row_b)| {
            let (map_a, map_b) = (&map_a, &map_b);
            columns.iter().filter_map(move |&(col_a, col_b)| {
                let cell_a = map_a.get(&CellRef::new(row_a, col_a)).copied();
                let cell_b = map_b.get(&CellRef::new(row_b, col_b)).copied();
                let value_a = cell_a.map_or("", |c| c.value.as_str());
                let value_b = cell_b.map_or("", |c| c.value.as_str());
                if value_a == value_b {
                    return None;
                }
                Some(Paired::of(
                    cell_a.cloned().unwrap_or_else(|| Cell::placeholder(row_a, col_a)),
                    cell_b.cloned().unwrap_or_else(|| Cell::placeholder(row_b, col_b)),
                ))
            })
        })
        .collect()
}

fn by_address(cells: &[Cell]) -> HashMap<CellRef, &Cell> {
    cells.iter().map(|c| (c.cell_ref(), c)).collect()
}

fn paired_only(pairs: &[Paired<usize>]) -> Vec<(usize, usize)> {
    pairs
        .iter()
        .filter_map(|p| Some((*p.a_opt()?, *p.b_opt()?)))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use griddiff_engine::Side;
    use pretty_assertions::assert_eq;

    fn config(rows: bool, columns: bool) -> DiffConfig {
        DiffConfig {
            consider_row_gaps: rows,
            consider_column_gaps: columns,
        }
    }

    #[test]
    fn test_single_cell_difference() {
        let a = vec![Cell::new(0, 0, "1"), Cell::new(0, 1, "2")];
        let b = vec![Cell::new(0, 0, "1"), Cell::new(0, 1, "3")];
        let diff = SheetComparator::new(&config(false, false)).compare(&a, &b).unwrap();

        for side in Side::ALL {
            assert!(diff.piece(side).redundant_rows().is_empty());
            assert!(diff.piece(side).redundant_columns().is_empty());
        }
        assert_eq!(diff.piece(Side::A).diff_cells(), &[Cell::new(0, 1, "2")]);
        assert_eq!(diff.piece(Side::B).diff_cells(), &[Cell::new(0, 1, "3")]);
    }

    #[test]
    fn test_missing_cell_becomes_placeholder() {
        let a = vec![Cell::new(0, 0, "x"), Cell::new(1, 1, "y")];
        let b = vec![Cell::new(0, 0, "x")];
        let diff = SheetComparator::new(&config(false, false)).compare(&a, &b).unwrap();
        let pairs: Vec<_> = diff.diff_cell_pairs().collect();
        assert_eq!(pairs, vec![Paired::of(&Cell::new(1, 1, "y"), &Cell::placeholder(1, 1))]);
    }

    #[test]
    fn test_removed_row_is_redundant_not_different() {
        let a = vec![
            Cell::new(0, 0, "id"),
            Cell::new(1, 0, "1"),
            Cell::new(2, 0, "2"),
            Cell::new(3, 0, "3"),
        ];
        let b = vec![Cell::new(0, 0, "id"), Cell::new(1, 0, "1"), Cell::new(2, 0, "3")];
        let diff = SheetComparator::new(&config(true, false)).compare(&a, &b).unwrap();

        assert_eq!(diff.piece(Side::A).redundant_rows(), &[2]);
        assert!(diff.piece(Side::B).redundant_rows().is_empty());
        assert_eq!(diff.diff_cell_count(), 0);
    }

    #[test]
    fn test_mismatches_are_in_row_then_column_order() {
        let a: Vec<Cell> = (0..30)
            .flat_map(|r| (0..3).map(move |c| Cell::new(r, c, format!("{r}:{c}"))))
            .collect();
        let b: Vec<Cell> = a.iter().map(|c| Cell::new(c.row, c.col, "changed")).collect();
        let diff = SheetComparator::new(&config(false, false)).compare(&a, &b).unwrap();
        let refs: Vec<_> = diff.piece(Side::A).diff_cells().iter().map(Cell::cell_ref).collect();
        let mut sorted = refs.clone();
        sorted.sort();
        assert_eq!(refs.len(), 90);
        assert_eq!(refs, sorted);
    }

    #[test]
    fn test_cancelled_before_start() {
        let cancel = CancelFlag::new();
        cancel.cancel();
        let result = SheetComparator::new(&DiffConfig::default()).compare_with_cancel(
            &[Cell::new(0, 0, "x")],
            &[Cell::new(0, 0, "y")],
            &cancel,
        );
        assert!(matches!(result, Err(crate::error::DiffError::Cancelled)));
    }
}
