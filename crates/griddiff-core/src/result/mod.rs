//! Comparison results.
//!
//! - [`SheetDiff`] / [`Piece`] - one sheet pair: redundant rows and columns per side, and the
//!   index-aligned halves of every mismatched cell
//! - [`BookDiff`] - every sheet-name pair of two books with a [`SheetDiff`] for each paired one

mod book;
mod report;
mod sheet;

pub use book::BookDiff;
pub use sheet::{Piece, SheetDiff};
