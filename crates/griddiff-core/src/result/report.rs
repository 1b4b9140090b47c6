//! Plain-text rendering of comparison results.

use std::fmt;

use griddiff_engine::{CellRef, Side};

use crate::result::{BookDiff, SheetDiff};

const NONE: &str = "(none)";
const RULE_WIDTH: usize = 80;

fn count_or_none(n: usize, unit: &str) -> String {
    if n == 0 {
        NONE.to_string()
    } else {
        format!("{n} {unit}")
    }
}

impl SheetDiff {
    /// Counts of redundant rows and columns (for the axes where gaps were considered) and of
    /// mismatched cells.
    pub fn summary(&self) -> String {
        Summary(self).to_string()
    }

    /// Every redundant row (1-based), redundant column (by letter), and mismatched cell pair.
    pub fn detail(&self) -> String {
        Detail(self).to_string()
    }
}

struct Summary<'a>(&'a SheetDiff);

impl fmt::Display for Summary<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let diff = self.0;
        let (a, b) = (diff.piece(Side::A), diff.piece(Side::B));

        if diff.row_gaps_considered() {
            writeln!(
                f,
                "\tRedundant rows: sheet A - {}, sheet B - {}",
                count_or_none(a.redundant_rows().len(), "row(s)"),
                count_or_none(b.redundant_rows().len(), "row(s)"),
            )?;
        }
        if diff.column_gaps_considered() {
            writeln!(
                f,
                "\tRedundant columns: sheet A - {}, sheet B - {}",
                count_or_none(a.redundant_columns().len(), "column(s)"),
                count_or_none(b.redundant_columns().len(), "column(s)"),
            )?;
        }
        writeln!(
            f,
            "\tDiff cells: {}",
            count_or_none(diff.diff_cell_count(), "cell(s) on each sheet"),
        )
    }
}

struct Detail<'a>(&'a SheetDiff);

impl fmt::Display for Detail<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let diff = self.0;

        if diff.row_gaps_considered() {
            for side in Side::ALL {
                let rows = diff.piece(side).redundant_rows();
                writeln!(f, "\n\tRedundant rows on sheet {side}:")?;
                if rows.is_empty() {
                    writeln!(f, "\t\t{NONE}")?;
                }
                for row in rows {
                    writeln!(f, "\t\tRow {}", row + 1)?;
                }
            }
        }
        if diff.column_gaps_considered() {
            for side in Side::ALL {
                let columns = diff.piece(side).redundant_columns();
                writeln!(f, "\n\tRedundant columns on sheet {side}:")?;
                if columns.is_empty() {
                    writeln!(f, "\t\t{NONE}")?;
                }
                for &col in columns {
                    writeln!(f, "\t\tColumn {}", CellRef::col_to_letters(col))?;
                }
            }
        }

        f.write_str("\n\tDiff cells:")?;
        if diff.diff_cell_count() == 0 {
            writeln!(f, "\n\t\t{NONE}")?;
        }
        for pair in diff.diff_cell_pairs() {
            for side in Side::ALL {
                if let Some(cell) = pair.get_opt(side) {
                    if side == Side::A {
                        writeln!(f)?;
                    }
                    writeln!(f, "\t\tCell {side}: {cell}")?;
                }
            }
        }
        Ok(())
    }
}

impl BookDiff {
    /// The report without the per-sheet detail section.
    pub fn summary_report(&self) -> String {
        Report {
            diff: self,
            detail: false,
        }
        .to_string()
    }
}

fn heading(f: &mut fmt::Formatter<'_>, title: &str) -> fmt::Result {
    let fill = RULE_WIDTH.saturating_sub(title.len() + 3);
    writeln!(f, "== {title}{}", "=".repeat(fill))
}

struct Report<'a> {
    diff: &'a BookDiff,
    detail: bool,
}

impl Report<'_> {
    /// One block per sheet pair, separated by blank lines.
    fn sheets(&self, f: &mut fmt::Formatter<'_>, detail: bool) -> fmt::Result {
        for (i, (names, result)) in self.diff.entries().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            writeln!(f, "Sheet A: {}", names.a_opt().map_or(NONE, String::as_str))?;
            writeln!(f, "Sheet B: {}", names.b_opt().map_or(NONE, String::as_str))?;
            match result {
                Some(result) if detail => write!(f, "{}", Detail(result))?,
                Some(result) => write!(f, "{}", Summary(result))?,
                None => {}
            }
        }
        Ok(())
    }
}

impl fmt::Display for Report<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let paths = self.diff.book_paths();
        for side in Side::ALL {
            match paths.get_opt(side) {
                Some(path) => writeln!(f, "Book {side}: {}", path.display())?,
                None => writeln!(f, "Book {side}: {NONE}")?,
            }
        }
        writeln!(f)?;

        heading(f, "Summary ")?;
        self.sheets(f, false)?;

        if self.detail {
            writeln!(f)?;
            heading(f, "Detail ")?;
            self.sheets(f, true)?;
        }
        Ok(())
    }
}

impl fmt::Display for BookDiff {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let report = Report {
            diff: self,
            detail: true,
        };
        fmt::Display::fmt(&report, f)
    }
}
