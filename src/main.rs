//! griddiff - Structural diff of spreadsheet books

mod config;
mod logging;

use anyhow::{Context, Result};
use clap::Parser;
use std::path::PathBuf;
use std::process::ExitCode;

use griddiff_core::{BookComparator, BookDiff, BookSource, CancelFlag, CompareMode, CsvBook};

use crate::config::{OutputFormat, Overrides, Settings};

/// Compare two books (CSV files or directories of CSV files) and report redundant rows and
/// columns and mismatched cells.
///
/// Exit status is 0 when the books match, 1 when differences were found, 2 on error.
#[derive(Parser, Debug)]
#[command(name = "griddiff", version)]
struct Args {
    /// First book: a .csv file or a directory of .csv sheets.
    book_a: PathBuf,

    /// Second book.
    book_b: PathBuf,

    /// Compare only this sheet of the first book (requires --sheet-b).
    #[arg(long, requires = "sheet_b")]
    sheet_a: Option<String>,

    /// Compare only this sheet of the second book (requires --sheet-a).
    #[arg(long, requires = "sheet_a")]
    sheet_b: Option<String>,

    /// Detect inserted and removed rows.
    #[arg(long, overrides_with = "no_row_gaps")]
    row_gaps: bool,

    /// Pair rows strictly by position.
    #[arg(long, overrides_with = "row_gaps")]
    no_row_gaps: bool,

    /// Detect inserted and removed columns.
    #[arg(long, overrides_with = "no_column_gaps")]
    column_gaps: bool,

    /// Pair columns strictly by position.
    #[arg(long, overrides_with = "column_gaps")]
    no_column_gaps: bool,

    /// Include the per-sheet detail section in text output.
    #[arg(long)]
    detail: bool,

    /// Output format.
    #[arg(long, value_enum)]
    format: Option<OutputFormat>,

    /// Write the report to a file instead of stdout.
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Read settings from this file instead of the user config directory.
    #[arg(long, conflicts_with = "no_config")]
    config: Option<PathBuf>,

    /// Ignore any settings file.
    #[arg(long)]
    no_config: bool,
}

impl Args {
    fn overrides(&self) -> Overrides {
        Overrides {
            consider_row_gaps: flag_pair(self.row_gaps, self.no_row_gaps),
            consider_column_gaps: flag_pair(self.column_gaps, self.no_column_gaps),
            detail: self.detail.then_some(true),
            format: self.format,
        }
    }

    /// Two single-file books are compared sheet to sheet, since their only sheets are named
    /// after the files and would rarely pair by name.
    fn mode(&self, book_a: &CsvBook, book_b: &CsvBook) -> Result<CompareMode> {
        if let (Some(sheet_a), Some(sheet_b)) = (&self.sheet_a, &self.sheet_b) {
            return Ok(CompareMode::Sheets {
                sheet_a: sheet_a.clone(),
                sheet_b: sheet_b.clone(),
            });
        }
        if book_a.is_single_file() && book_b.is_single_file() {
            let (mut names_a, mut names_b) = (book_a.sheet_names()?, book_b.sheet_names()?);
            if let (Some(sheet_a), Some(sheet_b)) = (names_a.pop(), names_b.pop()) {
                return Ok(CompareMode::Sheets { sheet_a, sheet_b });
            }
        }
        Ok(CompareMode::Books)
    }
}

fn flag_pair(on: bool, off: bool) -> Option<bool> {
    match (on, off) {
        (true, _) => Some(true),
        (_, true) => Some(false),
        _ => None,
    }
}

fn main() -> ExitCode {
    let args = Args::parse();
    logging::init();

    match run(&args) {
        Ok(false) => ExitCode::SUCCESS,
        Ok(true) => ExitCode::from(1),
        Err(e) => {
            eprintln!("Error: {:#}", e);
            ExitCode::from(2)
        }
    }
}

/// Returns whether any difference was found.
fn run(args: &Args) -> Result<bool> {
    let (file, warnings) = if args.no_config {
        Default::default()
    } else {
        config::load_config(args.config.as_deref())
    };
    for warning in warnings {
        eprintln!("Warning: {}", warning);
    }
    let settings = Settings::resolve(&file, &args.overrides());

    let book_a = CsvBook::open(&args.book_a)
        .with_context(|| format!("cannot open {}", args.book_a.display()))?;
    let book_b = CsvBook::open(&args.book_b)
        .with_context(|| format!("cannot open {}", args.book_b.display()))?;

    let diff = BookComparator::new(&settings.diff).compare(
        &book_a,
        &book_b,
        &args.mode(&book_a, &book_b)?,
        &CancelFlag::new(),
    )?;

    let report = render(&diff, &settings)?;
    match &args.output {
        Some(path) => std::fs::write(path, report)
            .with_context(|| format!("cannot write {}", path.display()))?,
        None => print!("{}", report),
    }

    Ok(diff.has_differences())
}

fn render(diff: &BookDiff, settings: &Settings) -> Result<String> {
    Ok(match settings.format {
        OutputFormat::Json => {
            let mut json = serde_json::to_string_pretty(diff)?;
            json.push('\n');
            json
        }
        OutputFormat::Text if settings.detail => diff.to_string(),
        OutputFormat::Text => diff.summary_report(),
    })
}
