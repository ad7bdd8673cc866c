//! The workbook-access seam.
//!
//! The engine never parses workbook files itself. It sees a workbook as
//! a list of sheet names and, per sheet, a dense grid of stringified cell
//! values. `xlsxgrep-io` provides the calamine-backed implementation;
//! tests substitute in-memory fakes.

use std::fmt;
use std::path::{Path, PathBuf};

/// Why a workbook could not be opened or read.
///
/// Carries the path plus a display-string cause from the underlying
/// reader. One of these never aborts a session; the session records it
/// and moves on to the next document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OpenError {
    pub path: PathBuf,
    pub message: String,
}

impl OpenError {
    pub fn new(path: impl Into<PathBuf>, message: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            message: message.into(),
        }
    }
}

impl fmt::Display for OpenError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unable to read {}: {}", self.path.display(), self.message)
    }
}

impl std::error::Error for OpenError {}

/// Opens workbooks by path.
pub trait WorkbookSource {
    fn open(&self, path: &Path) -> Result<Box<dyn WorkbookData>, OpenError>;
}

/// One opened workbook.
pub trait WorkbookData {
    /// Sheet names in the workbook's native order.
    fn sheet_names(&self) -> Vec<String>;

    /// One sheet as rows of stringified cell values.
    ///
    /// Rows may be jagged. Blank cells are empty strings, never absent
    /// within a row's extent, and (row, col) indices are true sheet
    /// coordinates even when the sheet's data does not start at A1.
    fn sheet_rows(&mut self, name: &str) -> Result<Vec<Vec<String>>, OpenError>;
}
