//! Sheet and book comparison.

mod book;
mod sheet;
mod strategy;

pub use book::{BookComparator, BookSource, CompareMode, pair_sheet_names};
pub use sheet::SheetComparator;
pub use strategy::{Axis, AxisStrategy};
