//! The hierarchical result aggregate: documents -> sheets -> cell matches.
//!
//! Append-only within one search generation. The session clears it at the
//! start of a run and inserts one `DocumentMatches` per document that had
//! at least one hit; sheets and documents with zero matches are never
//! materialized. Consumers read it through the enumeration methods, which
//! are pure projections and never trigger scanning.

use std::path::{Path, PathBuf};

use serde::Serialize;

/// One cell that satisfied the search predicate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MatchRecord {
    /// Path of the containing workbook.
    pub path: PathBuf,
    /// File name of the containing workbook (for display).
    pub display_name: String,
    /// Sheet the cell belongs to.
    pub sheet: String,
    /// 1-based row number, as displayed in a spreadsheet UI.
    pub row: usize,
    /// Column letters ("A", "B", ..., "AA", ...).
    pub col: String,
    /// The matched cell's stringified value.
    pub cell_text: String,
    /// The full row, comma-joined, for context.
    pub row_text: String,
}

/// All matches within one sheet. Never empty.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SheetMatches {
    pub name: String,
    pub records: Vec<MatchRecord>,
}

impl SheetMatches {
    pub fn match_count(&self) -> usize {
        self.records.len()
    }
}

/// All matches within one document, sheets in workbook order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DocumentMatches {
    pub path: PathBuf,
    pub display_name: String,
    pub sheets: Vec<SheetMatches>,
}

impl DocumentMatches {
    pub fn match_count(&self) -> usize {
        self.sheets.iter().map(SheetMatches::match_count).sum()
    }
}

/// The search result tree, documents in scan order.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ResultAggregate {
    documents: Vec<DocumentMatches>,
    /// Bumped on clear and on every document insert. Lets a polling
    /// consumer detect change without diffing the tree.
    #[serde(skip)]
    revision: u64,
}

impl ResultAggregate {
    pub fn new() -> Self {
        Self::default()
    }

    /// Drop all results from the previous generation.
    pub fn clear(&mut self) {
        self.documents.clear();
        self.revision += 1;
    }

    /// Append one document's matches. The caller guarantees non-emptiness
    /// and at most one insert per path per generation.
    pub fn insert(&mut self, document: DocumentMatches) {
        debug_assert!(document.match_count() > 0);
        self.documents.push(document);
        self.revision += 1;
    }

    pub fn revision(&self) -> u64 {
        self.revision
    }

    pub fn is_empty(&self) -> bool {
        self.documents.is_empty()
    }

    /// Total matches across all documents currently in the aggregate.
    pub fn total_matches(&self) -> usize {
        self.documents.iter().map(DocumentMatches::match_count).sum()
    }

    /// Enumerate documents in scan order: (path, display name, match count).
    pub fn documents(&self) -> impl Iterator<Item = (&Path, &str, usize)> {
        self.documents
            .iter()
            .map(|d| (d.path.as_path(), d.display_name.as_str(), d.match_count()))
    }

    /// Enumerate one document's sheets in workbook order: (name, match count).
    /// Unknown paths yield an empty iterator.
    pub fn sheets<'a>(&'a self, path: &Path) -> impl Iterator<Item = (&'a str, usize)> {
        self.document(path)
            .map(|d| d.sheets.as_slice())
            .unwrap_or(&[])
            .iter()
            .map(|s| (s.name.as_str(), s.match_count()))
    }

    /// Enumerate one sheet's match records in cell-scan order.
    /// Unknown paths or sheet names yield an empty iterator.
    pub fn cells<'a>(&'a self, path: &Path, sheet: &str) -> impl Iterator<Item = &'a MatchRecord> {
        self.document(path)
            .and_then(|d| d.sheets.iter().find(|s| s.name == sheet))
            .map(|s| s.records.as_slice())
            .unwrap_or(&[])
            .iter()
    }

    fn document(&self, path: &Path) -> Option<&DocumentMatches> {
        self.documents.iter().find(|d| d.path == path)
    }
}
