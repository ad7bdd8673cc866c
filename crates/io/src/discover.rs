//! Document-set resolution: which workbooks does a search cover?
//!
//! Two modes, mirroring the host UI's "only open files" toggle:
//! explicit paths (the host's active documents) are filtered in their
//! given order; otherwise the workspace root is walked recursively in
//! sorted order, so two runs over an unchanged tree see the same
//! documents in the same order.

use std::path::{Path, PathBuf};

use walkdir::WalkDir;

/// File extensions recognized as workbooks. Matches what the calamine
/// auto-detection in `xlsx.rs` can actually open.
pub const WORKBOOK_EXTENSIONS: &[&str] = &["xlsx", "xlsm", "xlsb", "xls", "ods"];

/// Which documents to scan.
#[derive(Debug, Clone, Default)]
pub struct DocumentSetSpec {
    /// Explicit documents (the "active files" set). When non-empty,
    /// `root` is ignored.
    pub paths: Vec<PathBuf>,
    /// Workspace root to walk when no explicit paths are given.
    /// Defaults to the current directory.
    pub root: Option<PathBuf>,
    /// Case-sensitive substring filter on the file name.
    pub name_pattern: Option<String>,
}

/// True when the path's extension is a recognized workbook extension
/// (ASCII case-insensitive, as file systems hand them out both ways).
pub fn is_workbook_path(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|e| {
            WORKBOOK_EXTENSIONS
                .iter()
                .any(|known| e.eq_ignore_ascii_case(known))
        })
        .unwrap_or(false)
}

/// Resolve the ordered document set for one search.
///
/// An empty result is a reportable condition for the caller, not an
/// error; unreadable directory entries are skipped.
pub fn resolve_documents(spec: &DocumentSetSpec) -> Vec<PathBuf> {
    if !spec.paths.is_empty() {
        return spec
            .paths
            .iter()
            .filter(|p| is_workbook_path(p) && name_matches(p, &spec.name_pattern))
            .cloned()
            .collect();
    }

    let root = spec.root.clone().unwrap_or_else(|| PathBuf::from("."));
    WalkDir::new(root)
        .sort_by_file_name()
        .into_iter()
        .filter_map(|entry| entry.ok())
        .filter(|entry| entry.file_type().is_file())
        .map(|entry| entry.into_path())
        .filter(|p| is_workbook_path(p) && name_matches(p, &spec.name_pattern))
        .collect()
}

fn name_matches(path: &Path, pattern: &Option<String>) -> bool {
    let Some(pattern) = pattern else {
        return true;
    };
    path.file_name()
        .and_then(|n| n.to_str())
        .map(|n| n.contains(pattern.as_str()))
        .unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn touch(path: &Path) {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(path, b"").unwrap();
    }

    #[test]
    fn test_is_workbook_path() {
        assert!(is_workbook_path(Path::new("a/b/Book1.xlsx")));
        assert!(is_workbook_path(Path::new("Book1.XLSX")));
        assert!(is_workbook_path(Path::new("old.xls")));
        assert!(is_workbook_path(Path::new("calc.ods")));
        assert!(!is_workbook_path(Path::new("notes.txt")));
        assert!(!is_workbook_path(Path::new("xlsx")));
    }

    #[test]
    fn test_walk_collects_workbooks_sorted() {
        let dir = tempfile::tempdir().unwrap();
        touch(&dir.path().join("b.xlsx"));
        touch(&dir.path().join("a.xlsx"));
        touch(&dir.path().join("notes.txt"));
        touch(&dir.path().join("sub/c.xlsm"));

        let spec = DocumentSetSpec {
            root: Some(dir.path().to_path_buf()),
            ..Default::default()
        };
        let found = resolve_documents(&spec);
        let names: Vec<_> = found
            .iter()
            .map(|p| p.file_name().unwrap().to_str().unwrap())
            .collect();
        assert_eq!(names, vec!["a.xlsx", "b.xlsx", "c.xlsm"]);
    }

    #[test]
    fn test_name_pattern_is_case_sensitive_substring() {
        let dir = tempfile::tempdir().unwrap();
        touch(&dir.path().join("Budget2024.xlsx"));
        touch(&dir.path().join("budget-old.xlsx"));
        touch(&dir.path().join("Report.xlsx"));

        let spec = DocumentSetSpec {
            root: Some(dir.path().to_path_buf()),
            name_pattern: Some("Budget".to_string()),
            ..Default::default()
        };
        let found = resolve_documents(&spec);
        assert_eq!(found.len(), 1);
        assert!(found[0].ends_with("Budget2024.xlsx"));
    }

    #[test]
    fn test_explicit_paths_keep_order_and_filter() {
        let spec = DocumentSetSpec {
            paths: vec![
                PathBuf::from("/z/second.xlsx"),
                PathBuf::from("/a/first.xlsx"),
                PathBuf::from("/a/readme.md"),
            ],
            ..Default::default()
        };
        let found = resolve_documents(&spec);
        assert_eq!(
            found,
            vec![PathBuf::from("/z/second.xlsx"), PathBuf::from("/a/first.xlsx")]
        );
    }

    #[test]
    fn test_empty_result_is_ok() {
        let dir = tempfile::tempdir().unwrap();
        let spec = DocumentSetSpec {
            root: Some(dir.path().to_path_buf()),
            ..Default::default()
        };
        assert!(resolve_documents(&spec).is_empty());
    }
}
