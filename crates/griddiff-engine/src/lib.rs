//! griddiff_engine - Sequence correlation for spreadsheet comparison.
//!
//! - [`Paired`], [`Side`] - Side-tagged optional pairs used for every correspondence
//! - [`Correlator`] - Order-preserving and order-agnostic sequence aligners
//! - [`evaluators`] - Gap/diff cost functions, including the canonical string pair
//! - [`Cell`], [`CellRef`] - Cell records and A1 addressing

mod cell;
mod cell_ref;
mod correlator;
pub mod error;
pub mod evaluators;
mod paired;

pub use cell::Cell;
pub use cell_ref::CellRef;
pub use correlator::{Correlator, Cost, INFINITE_COST, Strategy};
pub use error::{EngineError, Result};
pub use paired::{Paired, Side};
