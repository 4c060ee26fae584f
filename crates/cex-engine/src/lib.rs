//! Content export core.
//!
//! Turns a repository subtree plus an [`cex_model::ExportRequest`] into a
//! reconciled table: item selection, template-inheritance resolution,
//! date-range filtering, language/version fan-out, typed field serialization
//! and two-phase column reconciliation. The engine is read-only over the
//! repository and never touches disk; rendering and IO live in `cex-output`
//! and the CLI.

pub mod columns;
pub mod dates;
pub mod error;
pub mod export;
pub mod fields;
pub mod search;
pub mod select;
pub mod templates;
pub mod versions;

pub use columns::{ABSENT_CELL, ColumnRegistry, RowDraft};
pub use error::{ExportError, Result};
pub use export::{DEFAULT_EXPORT_NAME, ExportTable, run_export};
pub use search::{SearchRequest, run_search};
pub use templates::TemplateFilter;
