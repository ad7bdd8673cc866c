//! CLI Exit Code Registry
//!
//! Single source of truth for xgrep exit codes. Exit codes are part of
//! the shell contract; scripts rely on them.
//!
//! | Code | Meaning                                             |
//! |------|-----------------------------------------------------|
//! | 0    | At least one match found                            |
//! | 1    | Search completed, no matches (incl. empty doc set)  |
//! | 2    | Usage error: bad arguments, invalid query           |
//!
//! Like grep(1), "no matches" is distinguishable from "could not run".

/// At least one cell matched.
pub const EXIT_MATCH: u8 = 0;

/// The search ran to completion (or was cancelled) with zero matches.
/// Also used when the resolved document set is empty; that is reported
/// as a stderr warning, not a usage error.
pub const EXIT_NO_MATCH: u8 = 1;

/// Usage error: bad arguments, empty search text, invalid regex.
pub const EXIT_USAGE: u8 = 2;
