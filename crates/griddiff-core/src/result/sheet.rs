use serde::Serialize;

use griddiff_engine::{Cell, Paired, Side};

use crate::error::{DiffError, Result};

/// One side's share of a sheet comparison.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct Piece {
    redundant_rows: Vec<usize>,
    redundant_columns: Vec<usize>,
    diff_cells: Vec<Cell>,
}

impl Piece {
    /// Rows on this side with no counterpart on the other.
    pub fn redundant_rows(&self) -> &[usize] {
        &self.redundant_rows
    }

    /// Columns on this side with no counterpart on the other.
    pub fn redundant_columns(&self) -> &[usize] {
        &self.redundant_columns
    }

    /// This side's half of each mismatch. Position `i` pairs with position `i` of the other
    /// side's list.
    pub fn diff_cells(&self) -> &[Cell] {
        &self.diff_cells
    }
}

/// The outcome of comparing one pair of sheets.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct SheetDiff {
    row_gaps_considered: bool,
    column_gaps_considered: bool,
    #[serde(rename = "a")]
    piece_a: Piece,
    #[serde(rename = "b")]
    piece_b: Piece,
}

impl SheetDiff {
    /// Assemble a result. Redundant rows (columns) must be empty unless row (column) gaps were
    /// considered, and every mismatch must carry a cell for both sides.
    pub fn new(
        row_gaps_considered: bool,
        column_gaps_considered: bool,
        redundant_rows: Paired<Vec<usize>>,
        redundant_columns: Paired<Vec<usize>>,
        diff_cells: Vec<Paired<Cell>>,
    ) -> Result<Self> {
        let (rows_a, rows_b) = both_sides(redundant_rows, "redundant rows")?;
        let (columns_a, columns_b) = both_sides(redundant_columns, "redundant columns")?;

        if !row_gaps_considered && !(rows_a.is_empty() && rows_b.is_empty()) {
            return Err(DiffError::InvalidArgument(
                "redundant rows given while row gaps are not considered".to_string(),
            ));
        }
        if !column_gaps_considered && !(columns_a.is_empty() && columns_b.is_empty()) {
            return Err(DiffError::InvalidArgument(
                "redundant columns given while column gaps are not considered".to_string(),
            ));
        }

        let mut cells_a = Vec::with_capacity(diff_cells.len());
        let mut cells_b = Vec::with_capacity(diff_cells.len());
        for pair in diff_cells {
            match pair.into_options() {
                (Some(a), Some(b)) => {
                    cells_a.push(a);
                    cells_b.push(b);
                }
                _ => {
                    return Err(DiffError::InvalidArgument(
                        "diff cells must be present on both sides".to_string(),
                    ));
                }
            }
        }

        Ok(SheetDiff {
            row_gaps_considered,
            column_gaps_considered,
            piece_a: Piece {
                redundant_rows: rows_a,
                redundant_columns: columns_a,
                diff_cells: cells_a,
            },
            piece_b: Piece {
                redundant_rows: rows_b,
                redundant_columns: columns_b,
                diff_cells: cells_b,
            },
        })
    }

    pub fn row_gaps_considered(&self) -> bool {
        self.row_gaps_considered
    }

    pub fn column_gaps_considered(&self) -> bool {
        self.column_gaps_considered
    }

    pub fn piece(&self, side: Side) -> &Piece {
        match side {
            Side::A => &self.piece_a,
            Side::B => &self.piece_b,
        }
    }

    pub fn has_differences(&self) -> bool {
        Side::ALL.iter().any(|&side| {
            let piece = self.piece(side);
            !piece.redundant_rows.is_empty()
                || !piece.redundant_columns.is_empty()
                || !piece.diff_cells.is_empty()
        })
    }

    /// The mismatches re-zipped into `(a, b)` pairs.
    pub fn diff_cell_pairs(&self) -> impl Iterator<Item = Paired<&Cell>> + '_ {
        self.piece_a
            .diff_cells
            .iter()
            .zip(&self.piece_b.diff_cells)
            .map(|(a, b)| Paired::of(a, b))
    }

    pub fn diff_cell_count(&self) -> usize {
        self.piece_a.diff_cells.len()
    }
}

fn both_sides<T>(pair: Paired<T>, what: &str) -> Result<(T, T)> {
    match pair.into_options() {
        (Some(a), Some(b)) => Ok((a, b)),
        _ => Err(DiffError::InvalidArgument(format!(
            "{what} must be given for both sides"
        ))),
    }
}
