//! Candidate item selection.
//!
//! A non-empty query string replaces the primary path traversal; otherwise
//! the primary start path (or the repository default root) selects itself
//! plus all descendants. Additional start paths union in the same way in
//! both modes, without deduplication, so overlapping subtrees yield
//! duplicate rows. The candidate list then passes through the date-range,
//! template and layout filters.

use tracing::{debug, info};

use cex_model::{ContentItem, ExportRequest};
use cex_repo::ContentRepository;

use crate::dates::filter_by_date_ranges;
use crate::error::{ExportError, Result};
use crate::templates::{TemplateFilter, token_matches};

pub fn select_items(
    repo: &dyn ContentRepository,
    request: &ExportRequest,
) -> Result<Vec<ContentItem>> {
    let mut candidates = Vec::new();

    let query = request.query.as_deref().map(str::trim).unwrap_or_default();
    if !query.is_empty() {
        candidates.extend(repo.run_query(query)?);
        debug!(count = candidates.len(), query, "selected items by query");
    } else {
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
        let root = repo.item_by_path(&root_path).ok_or_else(|| {
            ExportError::Configuration(format!("start item not found: {root_path}"))
        })?;
        candidates.extend(repo.descendants(&root));
        candidates.insert(0, root);
        debug!(count = candidates.len(), root = %root_path, "selected items by traversal");
    }

    for path in &request.additional_start_paths {
        let path = path.trim();
        if path.is_empty() {
            continue;
        }
        // Unresolvable additional paths are skipped, not fatal.
        let Some(item) = repo.item_by_path(path) else {
            debug!(path, "skipping unresolvable additional start path");
            continue;
        };
        let descendants = repo.descendants(&item);
        candidates.push(item);
        candidates.extend(descendants);
    }

    let candidates = filter_by_date_ranges(candidates, &request.date_filter);

    let filter = TemplateFilter::new(&request.templates, &repo.templates(), request.expand_inheritance);
    let mut selected = if filter.is_empty() {
        candidates
    } else {
        // Per-token grouping; an item matching several tokens repeats.
        let mut selected = Vec::new();
        for token in filter.tokens() {
            selected.extend(
                candidates
                    .iter()
                    .filter(|item| token_matches(token, item))
                    .cloned(),
            );
        }
        selected
    };

    if request.require_layout {
        selected.retain(|item| item.has_layout);
    }

    info!(count = selected.len(), "candidate item set ready");
    Ok(selected)
}
