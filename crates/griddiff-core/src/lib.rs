//! griddiff_core - Sheet and book comparison built on `griddiff_engine`.
//!
//! - [`compare`] - Axis strategies, the sheet comparator, and book-level comparison
//! - [`result`] - Immutable sheet and book results with text rendering
//! - [`storage`] - CSV-backed books
//! - [`DiffConfig`], [`CancelFlag`] - Comparison settings and cooperative cancellation

pub mod cancel;
pub mod compare;
pub mod config;
pub mod error;
pub mod result;
pub mod storage;

pub use cancel::CancelFlag;
pub use compare::{
    Axis, AxisStrategy, BookComparator, BookSource, CompareMode, SheetComparator,
    pair_sheet_names,
};
pub use config::DiffConfig;
pub use error::{DiffError, Result};
pub use result::{BookDiff, Piece, SheetDiff};
pub use storage::CsvBook;
