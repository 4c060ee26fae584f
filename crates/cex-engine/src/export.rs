//! Export orchestration.
//!
//! One forward pass over the selected items builds draft rows and the column
//! registry; a second pass materializes every row against the final header.
//! Single-threaded and fully in memory.

use tracing::{debug, info};

use cex_model::{ContentItem, ExportRequest};
use cex_repo::ContentRepository;

use crate::columns::{ABSENT_CELL, ColumnRegistry, RowDraft};
use crate::error::Result;
use crate::fields::{
    FieldOptions, field_display_name, quoted_referrer_list, serialize_field, strip_line_endings,
};
use crate::select::select_items;
use crate::versions::expand_versions;

/// Artifact base name used when the request names none.
pub const DEFAULT_EXPORT_NAME: &str = "ContentExport";

const DATE_CELL_FORMAT: &str = "%Y-%m-%d";

/// The reconciled export table: a header and rows of equal width.
#[derive(Debug)]
pub struct ExportTable {
    pub header: Vec<String>,
    pub rows: Vec<Vec<String>>,
    /// Items selected before language fan-out, for the run summary.
    pub items_scanned: usize,
    /// Resolved artifact base name (without extension).
    pub file_name: String,
}

impl ExportTable {
    pub fn column_count(&self) -> usize {
        self.header.len()
    }
}

/// Run one export end to end: select, filter, fan out, serialize, reconcile.
pub fn run_export(repo: &dyn ContentRepository, request: &ExportRequest) -> Result<ExportTable> {
    let selected = select_items(repo, request)?;
    let items_scanned = selected.len();
    info!(items = items_scanned, "starting export pass");

    let options = FieldOptions {
        include_linked_ids: request.include_linked_ids,
        include_raw_html: request.include_raw_html,
    };

    // Explicit field list, with id tokens resolved to display names. In
    // all-fields mode the list grows as rows are visited instead.
    let mut field_names: Vec<String> = Vec::new();
    if !request.all_fields {
        for token in &request.fields {
            let token = token.trim();
            if token.is_empty() {
                continue;
            }
            let name = field_display_name(repo, token);
            if !field_names.contains(&name) {
                field_names.push(name);
            }
        }
    }

    let mut registry = ColumnRegistry::new();
    let mut drafts: Vec<RowDraft> = Vec::new();

    for item in &selected {
        for version in expand_versions(repo, item, &request.language) {
            if version.content_path.is_empty() {
                debug!(id = %version.id.as_str(), "skipping item with empty content path");
                continue;
            }
            if request.all_fields {
                for (name, _) in &version.fields {
                    if !name.starts_with("__") && !field_names.contains(name) {
                        field_names.push(name.clone());
                    }
                }
            }

            let mut row = RowDraft::new();
            push_static_cells(&mut row, repo, request, &version);
            for name in &field_names {
                serialize_field(&mut row, &mut registry, name, version.field(name), options);
            }
            drafts.push(row);
        }
    }

    let header = registry.header(
        &static_labels(request),
        request.include_linked_ids,
        request.include_raw_html,
    );
    let rows: Vec<Vec<String>> = drafts
        .iter()
        .map(|draft| {
            registry.materialize(draft, request.include_linked_ids, request.include_raw_html)
        })
        .collect();

    let file_name = request
        .file_name
        .as_deref()
        .map(str::trim)
        .filter(|name| !name.is_empty())
        .unwrap_or(DEFAULT_EXPORT_NAME)
        .to_string();

    info!(
        rows = rows.len(),
        columns = header.len(),
        file_name,
        "export table reconciled"
    );
    Ok(ExportTable {
        header,
        rows,
        items_scanned,
        file_name,
    })
}

/// Static column labels in fixed order, gated by the request toggles.
fn static_labels(request: &ExportRequest) -> Vec<&'static str> {
    let mut labels = vec!["Item Path"];
    if request.include_name {
        labels.push("Name");
    }
    if request.include_ids {
        labels.push("Item ID");
    }
    if request.include_template {
        labels.push("Template");
    }
    if request.language.adds_language_column() {
        labels.push("Language");
    }
    if request.emits_created_column() {
        labels.push("Created");
    }
    if request.include_created_by {
        labels.push("Created By");
    }
    if request.emits_modified_column() {
        labels.push("Modified");
    }
    if request.include_modified_by {
        labels.push("Modified By");
    }
    if request.include_never_publish {
        labels.push("Never Publish");
    }
    if request.include_workflow_name {
        labels.push("Workflow");
    }
    if request.include_workflow_state {
        labels.push("Workflow State");
    }
    if request.include_referrers {
        labels.push("Referrers");
    }
    labels
}

/// Emit the static prefix cells for one row, mirroring [`static_labels`].
fn push_static_cells(
    row: &mut RowDraft,
    repo: &dyn ContentRepository,
    request: &ExportRequest,
    item: &ContentItem,
) {
    row.push_value(item.content_path.clone());
    if request.include_name {
        row.push_value(strip_line_endings(&item.name));
    }
    if request.include_ids {
        row.push_value(item.id.as_str().to_string());
    }
    if request.include_template {
        row.push_value(item.template_name.clone());
    }
    if request.language.adds_language_column() {
        row.push_value(item.language.as_str().to_string());
    }
    if request.emits_created_column() {
        row.push_value(date_cell(item.created));
    }
    if request.include_created_by {
        row.push_value(item.created_by.clone());
    }
    if request.emits_modified_column() {
        row.push_value(date_cell(item.updated));
    }
    if request.include_modified_by {
        row.push_value(item.updated_by.clone());
    }
    if request.include_never_publish {
        row.push_value(item.never_publish.to_string());
    }
    // Workflow columns always get exactly one cell each; an item without a
    // workflow contributes empty cells so rows cannot misalign.
    if request.include_workflow_name {
        row.push_value(
            item.workflow
                .as_ref()
                .map(|w| w.name.clone())
                .unwrap_or_default(),
        );
    }
    if request.include_workflow_state {
        row.push_value(
            item.workflow
                .as_ref()
                .map(|w| w.state.clone())
                .unwrap_or_default(),
        );
    }
    if request.include_referrers {
        let referrers = repo.referrers(item);
        row.push_value(quoted_referrer_list(
            referrers.iter().map(|r| r.content_path.as_str()),
        ));
    }
}

fn date_cell(timestamp: Option<chrono::DateTime<chrono::Utc>>) -> String {
    timestamp
        .map(|instant| instant.format(DATE_CELL_FORMAT).to_string())
        .unwrap_or_else(|| ABSENT_CELL.to_string())
}
