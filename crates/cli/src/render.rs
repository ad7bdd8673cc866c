//! Result rendering: the document -> sheet -> cell tree as indented text
//! or as JSON.
//!
//! Pure functions over the aggregate's read API. No scanning, no I/O.

use xlsxgrep_engine::ResultAggregate;

/// Render the result tree as indented text, one cell per line:
///
/// ```text
/// Book1.xlsx (/ws/Book1.xlsx): 2 matches
///   Sheet1: 2 matches
///     A1: apple | row: apple,Banana,
///     B2: apple pie | row: ,apple pie,
/// ```
pub fn render_text(results: &ResultAggregate) -> String {
    let mut out = String::new();
    for (path, display_name, count) in results.documents() {
        out.push_str(&format!(
            "{} ({}): {}\n",
            display_name,
            path.display(),
            plural(count)
        ));
        for (sheet, sheet_count) in results.sheets(path) {
            out.push_str(&format!("  {}: {}\n", sheet, plural(sheet_count)));
            for record in results.cells(path, sheet) {
                out.push_str(&format!(
                    "    {}{}: {} | row: {}\n",
                    record.col, record.row, record.cell_text, record.row_text
                ));
            }
        }
    }
    out
}

/// Render the result tree as pretty-printed JSON. The shape is the
/// aggregate itself: `{"documents": [{path, display_name, sheets: [...]}]}`.
pub fn render_json(results: &ResultAggregate) -> String {
    // Serialization of a plain data tree cannot fail
    serde_json::to_string_pretty(results).unwrap_or_else(|_| "{}".to_string())
}

fn plural(count: usize) -> String {
    if count == 1 {
        "1 match".to_string()
    } else {
        format!("{} matches", count)
    }
}
