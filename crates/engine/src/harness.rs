//! In-memory workbook source for tests.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use crate::source::{OpenError, WorkbookData, WorkbookSource};

/// Build an owned grid from string-slice rows.
pub fn grid(rows: &[&[&str]]) -> Vec<Vec<String>> {
    rows.iter()
        .map(|r| r.iter().map(|c| c.to_string()).collect())
        .collect()
}

/// A `WorkbookSource` backed by in-memory grids, with designated broken
/// paths that fail to open.
pub struct FakeSource {
    books: HashMap<PathBuf, Vec<(String, Vec<Vec<String>>)>>,
    broken: Vec<PathBuf>,
}

impl FakeSource {
    pub fn new() -> Self {
        Self {
            books: HashMap::new(),
            broken: Vec::new(),
        }
    }

    pub fn with_book(mut self, path: &str, sheets: &[(&str, &[&[&str]])]) -> Self {
        let sheets = sheets
            .iter()
            .map(|(name, rows)| (name.to_string(), grid(rows)))
            .collect();
        self.books.insert(PathBuf::from(path), sheets);
        self
    }

    pub fn with_broken(mut self, path: &str) -> Self {
        self.broken.push(PathBuf::from(path));
        self
    }
}

impl Default for FakeSource {
    fn default() -> Self {
        Self::new()
    }
}

struct FakeBook {
    sheets: Vec<(String, Vec<Vec<String>>)>,
}

impl WorkbookData for FakeBook {
    fn sheet_names(&self) -> Vec<String> {
        self.sheets.iter().map(|(n, _)| n.clone()).collect()
    }

    fn sheet_rows(&mut self, name: &str) -> Result<Vec<Vec<String>>, OpenError> {
        self.sheets
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, rows)| rows.clone())
            .ok_or_else(|| OpenError::new(name, "no such sheet"))
    }
}

impl WorkbookSource for FakeSource {
    fn open(&self, path: &Path) -> Result<Box<dyn WorkbookData>, OpenError> {
        if self.broken.iter().any(|p| p == path) {
            return Err(OpenError::new(path, "corrupt file"));
        }
        let sheets = self
            .books
            .get(path)
            .cloned()
            .ok_or_else(|| OpenError::new(path, "file not found"))?;
        Ok(Box::new(FakeBook { sheets }))
    }
}
