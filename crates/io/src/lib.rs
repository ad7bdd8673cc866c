// Workbook access and document discovery

pub mod discover;
pub mod xlsx;

pub use discover::{resolve_documents, DocumentSetSpec};
pub use xlsx::XlsxSource;
