//! Field-value search across languages.
//!
//! Scans a subtree for items whose field values contain a search text and
//! reports which fields matched. Reference-like fields match on the display
//! name of their target (the target's "Title" text falling back to its item
//! name). System fields (names prefixed `__`) are never scanned. Every
//! language version with saved content is checked; the Language column
//! appears only when some match came from a language other than the item's
//! current one.

use tracing::info;

use cex_model::FieldValue;
use cex_repo::ContentRepository;

use crate::error::{ExportError, Result};
use crate::export::ExportTable;

/// Artifact base-name prefix for search results.
pub const SEARCH_NAME_PREFIX: &str = "ContentSearch";

/// Inputs to one search run.
#[derive(Debug, Clone, Default)]
pub struct SearchRequest {
    /// Subtree root; falls back to the repository default root.
    pub start_path: Option<String>,
    /// Case-insensitive text to look for.
    pub text: String,
    /// Restrict the scan to these field names (case-insensitive); empty
    /// means every field.
    pub fields: Vec<String>,
}

/// Run one search pass and produce the reconciled result table.
pub fn run_search(repo: &dyn ContentRepository, request: &SearchRequest) -> Result<ExportTable> {
    let text = request.text.trim();
    if text.is_empty() {
        return Err(ExportError::Configuration(
            "search text must not be empty".to_string(),
        ));
    }
    let needle = text.to_lowercase();

    let root_path = request
        .start_path
        .as_deref()
        .map(str::trim)
        .filter(|path| !path.is_empty())
        .map(str::to_string)
        .or_else(|| repo.default_root())
        .ok_or_else(|| {
            ExportError::Configuration(
                "no start path configured and the repository has no default root".to_string(),
            )
        })?;
    let root = repo
        .item_by_path(&root_path)
        .ok_or_else(|| ExportError::Configuration(format!("start item not found: {root_path}")))?;

    let mut candidates = repo.descendants(&root);
    candidates.insert(0, root);
    let items_scanned = candidates.len();

    struct Hit {
        path: String,
        fields: String,
        language: String,
        foreign_language: bool,
    }

    let mut hits: Vec<Hit> = Vec::new();
    for item in &candidates {
        for language in repo.languages() {
            let Some(version) = repo.item_in_language(&item.id, &language) else {
                continue;
            };
            if !version.has_versions() || version.content_path.is_empty() {
                continue;
            }
            let matched: Vec<&str> = version
                .fields
                .iter()
                .filter(|(name, _)| !name.starts_with("__"))
                .filter(|(name, _)| field_selected(&request.fields, name))
                .filter(|(_, value)| value_matches(repo, value, &needle))
                .map(|(name, _)| name.as_str())
                .collect();
            if matched.is_empty() {
                continue;
            }
            hits.push(Hit {
                path: version.content_path.clone(),
                fields: matched.join("; "),
                language: version.language.as_str().to_string(),
                foreign_language: version.language != item.language,
            });
        }
    }

    let language_column = hits.iter().any(|hit| hit.foreign_language);
    let mut header = vec!["Item Path".to_string(), "Field".to_string()];
    if language_column {
        header.push("Language".to_string());
    }
    let rows: Vec<Vec<String>> = hits
        .into_iter()
        .map(|hit| {
            let mut row = vec![hit.path, hit.fields];
            if language_column {
                row.push(hit.language);
            }
            row
        })
        .collect();

    info!(items = items_scanned, hits = rows.len(), text, "search pass complete");
    Ok(ExportTable {
        header,
        rows,
        items_scanned,
        file_name: format!("{SEARCH_NAME_PREFIX} - {text}"),
    })
}

fn field_selected(restriction: &[String], name: &str) -> bool {
    restriction.is_empty()
        || restriction
            .iter()
            .any(|wanted| wanted.eq_ignore_ascii_case(name))
}

fn value_matches(repo: &dyn ContentRepository, value: &FieldValue, needle: &str) -> bool {
    match value {
        FieldValue::PlainText { value } | FieldValue::Html { value } => {
            value.to_lowercase().contains(needle)
        }
        FieldValue::Link { url, .. } => url.to_lowercase().contains(needle),
        FieldValue::Checkbox { .. } => false,
        FieldValue::Image { target_path, .. }
        | FieldValue::Reference { target_path, .. }
        | FieldValue::Lookup { target_path, .. } => target_path
            .as_deref()
            .is_some_and(|path| target_display_name(repo, path).to_lowercase().contains(needle)),
        FieldValue::MultiReference { target_paths, .. } => target_paths
            .iter()
            .any(|path| target_display_name(repo, path).to_lowercase().contains(needle)),
    }
}

/// Display name of a reference target: its "Title" text if present, else the
/// item name, else the raw path when the target cannot be resolved.
fn target_display_name(repo: &dyn ContentRepository, path: &str) -> String {
    let Some(target) = repo.item_by_path(path) else {
        return path.to_string();
    };
    match target.field("Title") {
        Some(FieldValue::PlainText { value }) | Some(FieldValue::Html { value })
            if !value.is_empty() =>
        {
            value.clone()
        }
        _ => target.name,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn restriction_is_case_insensitive() {
        let restriction = vec!["title".to_string()];
        assert!(field_selected(&restriction, "Title"));
        assert!(!field_selected(&restriction, "Body"));
        assert!(field_selected(&[], "Anything"));
    }
}
