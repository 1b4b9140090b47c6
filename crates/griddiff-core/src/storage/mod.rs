//! Cell loaders for the books the command line compares.

mod csv;

pub use csv::{CsvBook, parse_csv_str};
