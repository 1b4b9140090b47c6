use serde::Serialize;
use std::collections::HashMap;
use std::path::{Path, PathBuf};

use griddiff_engine::Paired;

use crate::error::{DiffError, Result};
use crate::result::SheetDiff;

/// The outcome of comparing two books: every sheet-name pair in report order, and a result for
/// each pair whose names are present on both sides.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BookDiff {
    book_paths: Paired<PathBuf>,
    sheet_names: Vec<Paired<String>>,
    results: HashMap<Paired<String>, SheetDiff>,
}

impl BookDiff {
    pub fn new(
        book_paths: Paired<PathBuf>,
        sheet_names: Vec<Paired<String>>,
        results: HashMap<Paired<String>, SheetDiff>,
    ) -> Result<Self> {
        if !book_paths.is_paired() {
            return Err(DiffError::InvalidArgument(
                "both book paths are required".to_string(),
            ));
        }
        for key in results.keys() {
            if !key.is_paired() {
                return Err(DiffError::InvalidArgument(format!(
                    "result recorded for unpaired sheet names {key}"
                )));
            }
            if !sheet_names.contains(key) {
                return Err(DiffError::InvalidArgument(format!(
                    "result recorded for unknown sheet names {key}"
                )));
            }
        }
        Ok(BookDiff {
            book_paths,
            sheet_names,
            results,
        })
    }

    pub fn book_paths(&self) -> Paired<&Path> {
        self.book_paths.as_ref().map(PathBuf::as_path)
    }

    /// Sheet-name pairs in report order, including names found in one book only.
    pub fn sheet_names(&self) -> &[Paired<String>] {
        &self.sheet_names
    }

    pub fn result(&self, names: &Paired<String>) -> Option<&SheetDiff> {
        self.results.get(names)
    }

    /// `(names, result)` in report order. Unpaired names carry no result.
    pub fn entries(&self) -> impl Iterator<Item = (&Paired<String>, Option<&SheetDiff>)> + '_ {
        self.sheet_names.iter().map(|names| (names, self.results.get(names)))
    }

    /// True when any sheet is unpaired or any paired sheet differs.
    pub fn has_differences(&self) -> bool {
        self.sheet_names.iter().any(|names| !names.is_paired())
            || self.results.values().any(SheetDiff::has_differences)
    }
}

#[derive(Serialize)]
struct BookDiffView<'a> {
    book_a: Option<&'a Path>,
    book_b: Option<&'a Path>,
    sheets: Vec<SheetEntryView<'a>>,
}

#[derive(Serialize)]
struct SheetEntryView<'a> {
    sheet_a: Option<&'a str>,
    sheet_b: Option<&'a str>,
    result: Option<&'a SheetDiff>,
}

impl Serialize for BookDiff {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let paths = self.book_paths();
        BookDiffView {
            book_a: paths.a_opt().copied(),
            book_b: paths.b_opt().copied(),
            sheets: self
                .entries()
                .map(|(names, result)| SheetEntryView {
                    sheet_a: names.a_opt().map(String::as_str),
                    sheet_b: names.b_opt().map(String::as_str),
                    result,
                })
                .collect(),
        }
        .serialize(serializer)
    }
}
