//! Cell and document scanners.
//!
//! `scan_sheet` is the filter at the bottom: every cell of a sheet grid
//! through the match predicate, hits out. `scan_document` owns the
//! per-document fault boundary: a workbook that cannot be read yields an
//! `OpenError` for the session to record, never a panic or an abort.

use std::path::Path;

use crate::address::col_to_letters;
use crate::query::Query;
use crate::results::{DocumentMatches, MatchRecord, SheetMatches};
use crate::source::{OpenError, WorkbookData, WorkbookSource};

/// One matching cell, in 0-based sheet coordinates.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CellHit {
    pub row: usize,
    pub col: usize,
    pub cell_text: String,
    pub row_text: String,
}

/// Scan one sheet grid, top-to-bottom then left-to-right, and collect
/// every cell the query matches.
///
/// The context `row_text` (comma-joined row) is built at most once per
/// row, on the first hit in that row, and shared by that row's hits.
pub fn scan_sheet(rows: &[Vec<String>], query: &Query) -> Vec<CellHit> {
    let mut hits = Vec::new();

    for (row_idx, row) in rows.iter().enumerate() {
        let mut row_text: Option<String> = None;

        for (col_idx, cell_text) in row.iter().enumerate() {
            if !query.matches(cell_text) {
                continue;
            }

            let text = row_text.get_or_insert_with(|| row.join(",")).clone();
            hits.push(CellHit {
                row: row_idx,
                col: col_idx,
                cell_text: cell_text.clone(),
                row_text: text,
            });
        }
    }

    hits
}

/// Scan every sheet of one document.
///
/// `Ok(None)` means the document was read fine but nothing matched;
/// sheets with zero hits are dropped, and a document whose sheets all
/// dropped is not materialized at all. Read failures (open or per-sheet)
/// fail the whole document.
pub fn scan_document(
    source: &dyn WorkbookSource,
    path: &Path,
    query: &Query,
) -> Result<Option<DocumentMatches>, OpenError> {
    let mut workbook = source.open(path)?;
    let display_name = display_name_of(path);

    let mut sheets = Vec::new();
    for sheet_name in workbook.sheet_names() {
        let rows = workbook.sheet_rows(&sheet_name)?;
        let hits = scan_sheet(&rows, query);
        if hits.is_empty() {
            continue;
        }

        let records = hits
            .into_iter()
            .map(|hit| MatchRecord {
                path: path.to_path_buf(),
                display_name: display_name.clone(),
                sheet: sheet_name.clone(),
                row: hit.row + 1,
                col: col_to_letters(hit.col),
                cell_text: hit.cell_text,
                row_text: hit.row_text,
            })
            .collect();
        sheets.push(SheetMatches {
            name: sheet_name,
            records,
        });
    }

    if sheets.is_empty() {
        return Ok(None);
    }

    Ok(Some(DocumentMatches {
        path: path.to_path_buf(),
        display_name,
        sheets,
    }))
}

fn display_name_of(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}
