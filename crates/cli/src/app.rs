//! The xgrep command: argument surface and the run pipeline.
//!
//! Lives in the library rather than the binary so integration tests can
//! drive a full run with captured output and assert on exit codes.

use std::io::Write;
use std::path::PathBuf;

use clap::{Parser, ValueEnum};

use crate::exit_codes::{EXIT_MATCH, EXIT_NO_MATCH, EXIT_USAGE};
use crate::render::{render_json, render_text};
use xlsxgrep_engine::{CancelToken, Query, QueryOptions, SearchSession};
use xlsxgrep_io::{resolve_documents, DocumentSetSpec, XlsxSource};

#[derive(Parser)]
#[command(name = "xgrep")]
#[command(about = "Search spreadsheet workbooks for cell values")]
#[command(version)]
#[command(after_help = "\
Examples:
  xgrep apple                          # every workbook under the current directory
  xgrep apple reports/q3.xlsx          # just the given files
  xgrep -w -s 'Total' --root ./books   # whole-cell, case-sensitive
  xgrep -e '^4[0-9]{3}$' --name Budget # regex, file names containing 'Budget'
  xgrep apple --format json | jq .

Exit codes: 0 matches found, 1 no matches, 2 usage error.")]
pub struct Cli {
    /// Text to search for (or a regex with --regex)
    pub pattern: String,

    /// Workbook files to search; omit to walk --root recursively
    pub paths: Vec<PathBuf>,

    /// Directory to walk when no files are given
    #[arg(long, default_value = ".")]
    pub root: PathBuf,

    /// Only search files whose name contains this substring (case-sensitive)
    #[arg(long)]
    pub name: Option<String>,

    /// Interpret the pattern as a regular expression
    #[arg(long, short = 'e')]
    pub regex: bool,

    /// Match case-sensitively
    #[arg(long, short = 's')]
    pub case_sensitive: bool,

    /// Match only cells whose entire content equals the pattern
    #[arg(long, short = 'w')]
    pub whole_cell: bool,

    /// Output format
    #[arg(long, value_enum, default_value_t = Format::Text)]
    pub format: Format,

    /// Print only the total match count
    #[arg(long, short = 'c')]
    pub count: bool,

    /// Suppress stderr notes (read failures are still reported)
    #[arg(long, short = 'q')]
    pub quiet: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Format {
    Text,
    Json,
}

#[derive(Debug)]
pub struct CliError {
    pub code: u8,
    pub message: String,
    pub hint: Option<String>,
}

impl CliError {
    fn usage(message: impl Into<String>) -> Self {
        Self {
            code: EXIT_USAGE,
            message: message.into(),
            hint: None,
        }
    }

    fn with_hint(mut self, hint: impl Into<String>) -> Self {
        self.hint = Some(hint.into());
        self
    }
}

/// Run one search and write results to `stdout`, notes to `stderr`.
/// Returns the process exit code; `Err` is a usage-level failure the
/// binary shell reports itself.
pub fn run(cli: &Cli, stdout: &mut dyn Write, stderr: &mut dyn Write) -> Result<u8, CliError> {
    // InvalidQuery is terminal before any scanning starts
    let options = QueryOptions {
        target: cli.pattern.clone(),
        whole_cell: cli.whole_cell,
        case_sensitive: cli.case_sensitive,
        regex: cli.regex,
    };
    let query = Query::compile(&options).map_err(|e| {
        let err = CliError::usage(e.to_string());
        if cli.regex {
            err.with_hint("the pattern uses Rust regex syntax; see https://docs.rs/regex")
        } else {
            err
        }
    })?;

    // EmptyDocumentSet is a warning and a zero-match run, not an error
    let spec = DocumentSetSpec {
        paths: cli.paths.clone(),
        root: Some(cli.root.clone()),
        name_pattern: cli.name.clone(),
    };
    let documents = resolve_documents(&spec);
    if documents.is_empty() {
        if !cli.quiet {
            writeln!(
                stderr,
                "warning: no workbook files found (root: {}{})",
                cli.root.display(),
                cli.name
                    .as_deref()
                    .map(|n| format!(", name filter: '{}'", n))
                    .unwrap_or_default()
            )
            .ok();
        }
        return Ok(EXIT_NO_MATCH);
    }

    if !cli.quiet {
        writeln!(
            stderr,
            "note: searching {} document{} for '{}'",
            documents.len(),
            if documents.len() == 1 { "" } else { "s" },
            cli.pattern
        )
        .ok();
    }

    let mut session = SearchSession::new(XlsxSource::new());
    let outcome = session.run(&documents, &query, &CancelToken::new());

    // Per-document read failures are diagnostics, never fatal and never quiet
    for failure in &outcome.failures {
        writeln!(
            stderr,
            "warning: unable to read {}: {}",
            failure.path.display(),
            failure.message
        )
        .ok();
    }

    if cli.count {
        writeln!(stdout, "{}", outcome.match_count).ok();
    } else {
        match cli.format {
            Format::Text => write!(stdout, "{}", render_text(session.results())).ok(),
            Format::Json => writeln!(stdout, "{}", render_json(session.results())).ok(),
        };
    }

    if !cli.quiet {
        writeln!(
            stderr,
            "note: {} match{} in {} of {} document{}",
            outcome.match_count,
            if outcome.match_count == 1 { "" } else { "es" },
            outcome.documents_with_matches,
            outcome.scanned,
            if outcome.scanned == 1 { "" } else { "s" },
        )
        .ok();
    }

    Ok(if outcome.match_count > 0 {
        EXIT_MATCH
    } else {
        EXIT_NO_MATCH
    })
}
