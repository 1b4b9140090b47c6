//! CSV books: a single `.csv` file, or a directory of them.

use std::fs;
use std::path::{Path, PathBuf};

use griddiff_engine::Cell;

use crate::compare::BookSource;
use crate::error::{DiffError, Result};

/// A book backed by CSV files. Each file is one sheet, named after its file stem.
#[derive(Clone, Debug)]
pub struct CsvBook {
    path: PathBuf,
    single_file: bool,
    sheets: Vec<(String, PathBuf)>,
}

impl CsvBook {
    /// Open a `.csv` file as a one-sheet book, or a directory as a book whose sheets are its
    /// `.csv` files in name order.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        let metadata = fs::metadata(&path).map_err(|source| DiffError::Read {
            path: path.clone(),
            source,
        })?;

        let sheets = if metadata.is_dir() {
            let entries = fs::read_dir(&path).map_err(|source| DiffError::Read {
                path: path.clone(),
                source,
            })?;
            let mut files = Vec::new();
            for entry in entries {
                let file = entry?.path();
                if file.is_file() && is_csv(&file) {
                    files.push(file);
                }
            }
            files.sort();
            let mut sheets: Vec<(String, PathBuf)> = Vec::with_capacity(files.len());
            for file in files {
                let name = sheet_name(&file);
                if sheets.iter().any(|(seen, _)| *seen == name) {
                    return Err(DiffError::DuplicateSheet { path, name });
                }
                sheets.push((name, file));
            }
            sheets
        } else {
            vec![(sheet_name(&path), path.clone())]
        };

        Ok(CsvBook {
            single_file: !metadata.is_dir(),
            path,
            sheets,
        })
    }

    /// True when the book was opened from a single `.csv` file.
    pub fn is_single_file(&self) -> bool {
        self.single_file
    }
}

impl BookSource for CsvBook {
    fn path(&self) -> &Path {
        &self.path
    }

    fn sheet_names(&self) -> Result<Vec<String>> {
        Ok(self.sheets.iter().map(|(name, _)| name.clone()).collect())
    }

    fn load_sheet(&self, name: &str) -> Result<Vec<Cell>> {
        let (_, file) = self
            .sheets
            .iter()
            .find(|(sheet, _)| sheet == name)
            .ok_or_else(|| DiffError::SheetNotFound(name.to_string()))?;
        let content = fs::read_to_string(file).map_err(|source| DiffError::Read {
            path: file.clone(),
            source,
        })?;
        Ok(parse_csv_str(&content))
    }
}

fn is_csv(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("csv"))
}

fn sheet_name(path: &Path) -> String {
    path.file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .unwrap_or_default()
}

/// Parse CSV text into its non-blank cells.
pub fn parse_csv_str(content: &str) -> Vec<Cell> {
    let content = content.strip_prefix('\u{feff}').unwrap_or(content);
    let mut cells = Vec::new();

    for (row, line) in content.lines().enumerate() {
        for (col, field) in parse_csv_line(line).into_iter().enumerate() {
            if field.is_empty() {
                continue;
            }
            cells.push(Cell::new(row, col, field));
        }
    }

    cells
}

/// Parse a single CSV line, handling quoted fields
pub(crate) fn parse_csv_line(line: &str) -> Vec<String> {
    let mut fields = Vec::new();
    let mut current = String::new();
    let mut in_quotes = false;
    let mut field_was_quoted = false;
    let mut chars = line.chars().peekable();

    let finish = |current: String, quoted: bool| {
        if quoted {
            current
        } else {
            current.trim().to_string()
        }
    };

    while let Some(c) = chars.next() {
        if in_quotes {
            if c == '"' {
                if chars.peek() == Some(&'"') {
                    current.push('"');
                    chars.next();
                } else {
                    in_quotes = false;
                }
            } else {
                current.push(c);
            }
            continue;
        }
        match c {
            '"' => {
                in_quotes = true;
                field_was_quoted = true;
            }
            ',' => {
                fields.push(finish(std::mem::take(&mut current), field_was_quoted));
                field_was_quoted = false;
            }
            _ => current.push(c),
        }
    }
    fields.push(finish(current, field_was_quoted));
    fields
}
