pub mod address;
pub mod query;
pub mod results;
pub mod scan;
pub mod session;
pub mod source;

#[cfg(test)]
pub mod harness;

pub use query::{Query, QueryError, QueryOptions};
pub use results::{DocumentMatches, MatchRecord, ResultAggregate, SheetMatches};
pub use session::{CancelToken, ScanFailure, SearchEvent, SearchOutcome, SearchSession};
pub use source::{OpenError, WorkbookData, WorkbookSource};
