use dashmap::DashMap;
use log::{debug, info};
use rayon::prelude::*;
use std::path::{Path, PathBuf};
use std::time::Instant;

use griddiff_engine::evaluators::{string_diff_cost, string_gap_cost};
use griddiff_engine::{Cell, Correlator, Paired};

use crate::cancel::CancelFlag;
use crate::compare::SheetComparator;
use crate::config::DiffConfig;
use crate::error::{DiffError, Result};
use crate::result::{BookDiff, SheetDiff};

/// A book the comparator can read sheets from.
pub trait BookSource: Sync {
    fn path(&self) -> &Path;

    /// Sheet names in book order.
    fn sheet_names(&self) -> Result<Vec<String>>;

    /// The non-blank cells of one sheet.
    fn load_sheet(&self, name: &str) -> Result<Vec<Cell>>;
}

/// What to compare between two books.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum CompareMode {
    /// Every sheet, pairing sheets by name similarity.
    Books,
    /// One named sheet from each book.
    Sheets { sheet_a: String, sheet_b: String },
}

impl CompareMode {
    /// Reject comparing a target with itself.
    pub fn validate(&self, path_a: &Path, path_b: &Path) -> Result<()> {
        match self {
            CompareMode::Books if path_a == path_b => Err(DiffError::InvalidArgument(format!(
                "cannot compare {} with itself",
                path_a.display()
            ))),
            CompareMode::Sheets { sheet_a, sheet_b } if path_a == path_b && sheet_a == sheet_b => {
                Err(DiffError::InvalidArgument(format!(
                    "cannot compare sheet {sheet_a} of {} with itself",
                    path_a.display()
                )))
            }
            _ => Ok(()),
        }
    }
}

/// Pair two books' sheet names by similarity, regardless of sheet order.
pub fn pair_sheet_names(names_a: &[String], names_b: &[String]) -> Result<Vec<Paired<String>>> {
    let correlator = Correlator::with_shuffling(string_gap_cost::<String>, string_diff_cost::<String>);
    let pairs = correlator.correlate(names_a, names_b)?;
    Ok(pairs
        .into_iter()
        .map(|p| {
            Paired::of_nullable(
                p.a_opt().map(|&i| names_a[i].clone()),
                p.b_opt().map(|&j| names_b[j].clone()),
            )
        })
        .collect())
}

/// Compares books sheet by sheet.
#[derive(Clone, Copy, Debug)]
pub struct BookComparator {
    sheets: SheetComparator,
}

impl BookComparator {
    pub fn new(config: &DiffConfig) -> Self {
        BookComparator {
            sheets: SheetComparator::new(config),
        }
    }

    /// Compare `book_a` with `book_b`. Paired sheets are compared in parallel; `cancel` is
    /// polled before each sheet pair and between the stages of each.
    pub fn compare(
        &self,
        book_a: &dyn BookSource,
        book_b: &dyn BookSource,
        mode: &CompareMode,
        cancel: &CancelFlag,
    ) -> Result<BookDiff> {
        mode.validate(book_a.path(), book_b.path())?;
        let started = Instant::now();

        let sheet_names = match mode {
            CompareMode::Books => {
                pair_sheet_names(&book_a.sheet_names()?, &book_b.sheet_names()?)?
            }
            CompareMode::Sheets { sheet_a, sheet_b } => {
                vec![Paired::of(sheet_a.clone(), sheet_b.clone())]
            }
        };
        debug!("sheet pairs: {:?}", sheet_names);

        let sink: DashMap<Paired<String>, SheetDiff> = DashMap::new();
        sheet_names
            .par_iter()
            .filter(|names| names.is_paired())
            .try_for_each(|names| -> Result<()> {
                cancel.check()?;
                let (Some(name_a), Some(name_b)) = (names.a_opt(), names.b_opt()) else {
                    return Ok(());
                };
                info!("comparing sheet {name_a} with {name_b}");
                let cells_a = book_a.load_sheet(name_a)?;
                let cells_b = book_b.load_sheet(name_b)?;
                let diff = self.sheets.compare_with_cancel(&cells_a, &cells_b, cancel)?;
                sink.insert(names.clone(), diff);
                Ok(())
            })?;

        info!(
            "compared {} sheet pair(s) of {} and {} in {:?}",
            sink.len(),
            book_a.path().display(),
            book_b.path().display(),
            started.elapsed()
        );

        let book_paths: Paired<PathBuf> =
            Paired::of(book_a.path().to_path_buf(), book_b.path().to_path_buf());
        BookDiff::new(book_paths, sheet_names, sink.into_iter().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::collections::HashMap;

    struct MemoryBook {
        path: PathBuf,
        sheets: Vec<(String, Vec<Cell>)>,
    }

    impl MemoryBook {
        fn new(path: &str, sheets: &[(&str, &[(usize, usize, &str)])]) -> Self {
            MemoryBook {
                path: PathBuf::from(path),
                sheets: sheets
                    .iter()
                    .map(|(name, cells)| {
                        let cells = cells.iter().map(|&(r, c, v)| Cell::new(r, c, v)).collect();
                        (name.to_string(), cells)
                    })
                    .collect(),
            }
        }
    }

    impl BookSource for MemoryBook {
        fn path(&self) -> &Path {
            &self.path
        }

        fn sheet_names(&self) -> Result<Vec<String>> {
            Ok(self.sheets.iter().map(|(name, _)| name.clone()).collect())
        }

        fn load_sheet(&self, name: &str) -> Result<Vec<Cell>> {
            self.sheets
                .iter()
                .find(|(n, _)| n == name)
                .map(|(_, cells)| cells.clone())
                .ok_or_else(|| DiffError::SheetNotFound(name.to_string()))
        }
    }

    fn names(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_pair_sheet_names_ignores_order() {
        let pairs = pair_sheet_names(&names(&["Summary", "Data"]), &names(&["Data", "Summary"]))
            .unwrap();
        assert_eq!(
            pairs,
            vec![
                Paired::of("Summary".to_string(), "Summary".to_string()),
                Paired::of("Data".to_string(), "Data".to_string()),
            ]
        );
    }

    #[test]
    fn test_pair_sheet_names_keeps_unmatched() {
        let pairs = pair_sheet_names(&names(&["Data"]), &names(&[])).unwrap();
        assert_eq!(pairs, vec![Paired::only_a("Data".to_string())]);
    }

    #[test]
    fn test_validate_rejects_self_comparison() {
        let path = Path::new("book.csv");
        assert!(CompareMode::Books.validate(path, path).is_err());
        assert!(CompareMode::Books.validate(path, Path::new("other.csv")).is_ok());

        let same = CompareMode::Sheets {
            sheet_a: "S".into(),
            sheet_b: "S".into(),
        };
        let different = CompareMode::Sheets {
            sheet_a: "S".into(),
            sheet_b: "T".into(),
        };
        assert!(matches!(same.validate(path, path), Err(DiffError::InvalidArgument(_))));
        assert!(different.validate(path, path).is_ok());
    }

    #[test]
    fn test_compare_books() {
        let a = MemoryBook::new("a", &[("Data", &[(0, 0, "x")]), ("Notes", &[(0, 0, "n")])]);
        let b = MemoryBook::new("b", &[("Data", &[(0, 0, "y")])]);
        let diff = BookComparator::new(&DiffConfig::default())
            .compare(&a, &b, &CompareMode::Books, &CancelFlag::new())
            .unwrap();

        let data = Paired::of("Data".to_string(), "Data".to_string());
        assert_eq!(diff.sheet_names().len(), 2);
        assert_eq!(diff.result(&data).map(SheetDiff::diff_cell_count), Some(1));
        assert!(diff.sheet_names().contains(&Paired::only_a("Notes".to_string())));
        assert!(diff.has_differences());
    }

    #[test]
    fn test_compare_single_sheet_pair() {
        let a = MemoryBook::new("a", &[("Old", &[(0, 0, "x")])]);
        let b = MemoryBook::new("b", &[("New", &[(0, 0, "x")])]);
        let mode = CompareMode::Sheets {
            sheet_a: "Old".into(),
            sheet_b: "New".into(),
        };
        let diff = BookComparator::new(&DiffConfig::default())
            .compare(&a, &b, &mode, &CancelFlag::new())
            .unwrap();
        let entries: HashMap<_, _> = diff.entries().map(|(n, r)| (n.clone(), r.is_some())).collect();
        assert_eq!(
            entries,
            HashMap::from([(Paired::of("Old".to_string(), "New".to_string()), true)])
        );
        assert!(!diff.has_differences());
    }

    #[test]
    fn test_unknown_sheet_fails() {
        let a = MemoryBook::new("a", &[("Old", &[])]);
        let b = MemoryBook::new("b", &[("New", &[])]);
        let mode = CompareMode::Sheets {
            sheet_a: "Old".into(),
            sheet_b: "Missing".into(),
        };
        let err = BookComparator::new(&DiffConfig::default()).compare(&a, &b, &mode, &CancelFlag::new());
        assert!(matches!(err, Err(DiffError::SheetNotFound(name)) if name == "Missing"));
    }

    #[test]
    fn test_cancelled_comparison() {
        let a = MemoryBook::new("a", &[("S", &[(0, 0, "x")])]);
        let b = MemoryBook::new("b", &[("S", &[(0, 0, "y")])]);
        let cancel = CancelFlag::new();
        cancel.cancel();
        let err = BookComparator::new(&DiffConfig::default()).compare(&a, &b, &CompareMode::Books, &cancel);
        assert!(matches!(err, Err(DiffError::Cancelled)));
    }
}
