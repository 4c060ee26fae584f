//! Export rendering and artifact handling.
//!
//! Turns a reconciled [`cex_engine::ExportTable`] into the tab-delimited
//! byte stream exports download as, wrapped in an [`ExportArtifact`] carrying
//! the file name and content type.

mod artifact;
mod render;

pub use artifact::{ARTIFACT_CONTENT_TYPE, ExportArtifact, write_artifact};
pub use render::render_table;
