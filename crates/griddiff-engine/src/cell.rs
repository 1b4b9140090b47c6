//! Cell records as delivered by a sheet loader.

use serde::Serialize;
use std::fmt;

use crate::cell_ref::CellRef;
use crate::error::Result;

/// An immutable cell: position plus its content as a string. A blank cell has an empty value.
#[derive(Clone, Debug, Hash, Eq, PartialEq, Serialize)]
pub struct Cell {
    pub row: usize,
    pub col: usize,
    pub value: String,
}

impl Cell {
    pub fn new(row: usize, col: usize, value: impl Into<String>) -> Self {
        Cell {
            row,
            col,
            value: value.into(),
        }
    }

    /// Create a cell from an A1-style address such as `"B3"`.
    pub fn at_address(address: &str, value: impl Into<String>) -> Result<Self> {
        let r = CellRef::parse(address)?;
        Ok(Cell::new(r.row, r.col, value))
    }

    /// An empty-valued cell standing in for a position with no explicit content.
    pub fn placeholder(row: usize, col: usize) -> Self {
        Cell::new(row, col, String::new())
    }

    pub fn cell_ref(&self) -> CellRef {
        CellRef::new(self.row, self.col)
    }

    pub fn address(&self) -> String {
        self.cell_ref().to_string()
    }

    pub fn is_blank(&self) -> bool {
        self.value.is_empty()
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} [{}]", self.cell_ref(), self.value)
    }
}
