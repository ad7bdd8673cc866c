//! Calamine-backed workbook access (xlsx, xlsm, xlsb, xls, ods).
//!
//! Import is one-way and read-only: each sheet becomes a dense grid of
//! stringified cell values for the scanner. No styles, no formulas, no
//! cached-value recovery; only what a search predicate can see.

use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};

use calamine::{open_workbook_auto, Data, Reader, Sheets};
use xlsxgrep_engine::source::{OpenError, WorkbookData, WorkbookSource};

/// Opens workbook files with `calamine::open_workbook_auto`, which
/// detects the format from the file content.
#[derive(Debug, Clone, Copy, Default)]
pub struct XlsxSource;

impl XlsxSource {
    pub fn new() -> Self {
        Self
    }
}

impl WorkbookSource for XlsxSource {
    fn open(&self, path: &Path) -> Result<Box<dyn WorkbookData>, OpenError> {
        let sheets = open_workbook_auto(path)
            .map_err(|e| OpenError::new(path, format!("failed to open workbook: {}", e)))?;
        Ok(Box::new(XlsxBook {
            path: path.to_path_buf(),
            sheets,
        }))
    }
}

struct XlsxBook {
    path: PathBuf,
    sheets: Sheets<BufReader<File>>,
}

impl WorkbookData for XlsxBook {
    fn sheet_names(&self) -> Vec<String> {
        self.sheets.sheet_names().to_vec()
    }

    fn sheet_rows(&mut self, name: &str) -> Result<Vec<Vec<String>>, OpenError> {
        let range = self.sheets.worksheet_range(name).map_err(|e| {
            OpenError::new(&self.path, format!("failed to read sheet '{}': {}", name, e))
        })?;

        // Data may not begin at A1; pad with empty leading rows/columns so
        // (row, col) indices stay true sheet coordinates.
        let (start_row, start_col) = range
            .start()
            .map(|(r, c)| (r as usize, c as usize))
            .unwrap_or((0, 0));

        let mut rows: Vec<Vec<String>> = vec![Vec::new(); start_row];
        for row in range.rows() {
            let mut cells = vec![String::new(); start_col];
            cells.extend(row.iter().map(cell_to_string));
            rows.push(cells);
        }
        Ok(rows)
    }
}

/// Stringify one cell the way the search predicate should see it.
/// Blank cells become "", never a sentinel.
fn cell_to_string(cell: &Data) -> String {
    match cell {
        Data::Empty => String::new(),
        Data::String(s) => s.clone(),
        Data::Float(n) => {
            // Integers without decimals
            if n.fract() == 0.0 && n.abs() < 1e15 {
                format!("{}", *n as i64)
            } else {
                format!("{}", n)
            }
        }
        Data::Int(n) => format!("{}", n),
        Data::Bool(b) => if *b { "TRUE" } else { "FALSE" }.to_string(),
        Data::Error(e) => format!("#{:?}", e),
        // Serial number; search text, not a rendered date
        Data::DateTime(dt) => format!("{}", dt.as_f64()),
        Data::DateTimeIso(s) => s.clone(),
        Data::DurationIso(s) => s.clone(),
    }
}
