//! Downloadable-artifact envelope.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use cex_engine::ExportTable;

use crate::render::render_table;

/// Content type carried by export downloads.
pub const ARTIFACT_CONTENT_TYPE: &str = "application/vnd.ms-excel";

const ARTIFACT_EXTENSION: &str = "xls";

/// A rendered export ready to hand to a download or write to disk.
#[derive(Debug, Clone)]
pub struct ExportArtifact {
    /// Full file name including the extension.
    pub file_name: String,
    pub content_type: String,
    pub bytes: Vec<u8>,
}

impl ExportArtifact {
    /// Wrap rendered bytes under the given base name (extension added here).
    pub fn new(base_name: &str, bytes: Vec<u8>) -> Self {
        Self {
            file_name: format!("{base_name}.{ARTIFACT_EXTENSION}"),
            content_type: ARTIFACT_CONTENT_TYPE.to_string(),
            bytes,
        }
    }

    /// Render a reconciled table into its artifact form.
    pub fn from_table(table: &ExportTable) -> Self {
        Self::new(&table.file_name, render_table(table))
    }
}

/// Write the artifact into `output_dir`, creating the directory if needed.
pub fn write_artifact(output_dir: &Path, artifact: &ExportArtifact) -> Result<PathBuf> {
    fs::create_dir_all(output_dir)
        .with_context(|| format!("failed to create output dir {}", output_dir.display()))?;
    let path = output_dir.join(&artifact.file_name);
    fs::write(&path, &artifact.bytes)
        .with_context(|| format!("failed to write artifact to {}", path.display()))?;
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn artifact_carries_xls_name_and_excel_content_type() {
        let artifact = ExportArtifact::new("ContentExport", Vec::new());
        assert_eq!(artifact.file_name, "ContentExport.xls");
        assert_eq!(artifact.content_type, "application/vnd.ms-excel");
    }
}
