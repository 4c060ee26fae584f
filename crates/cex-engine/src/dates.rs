//! Created/modified date-range filtering.
//!
//! Two subsets are computed against the full candidate list (items whose
//! creation timestamp falls inside the created bounds, and likewise for
//! modification) and combined by union or intersection. Items whose
//! timestamp is unknown (the repository reported a sentinel min/max value)
//! never match a configured bound. When no bound at all is configured the
//! candidate list passes through untouched, in its original order; when any
//! bound is configured the combined result is ordered by content path
//! descending, which keeps reruns byte-deterministic. Duplicate candidates
//! from overlapping start paths share an (id, language) key, so they pass or
//! fail together and every copy is retained.

use std::collections::HashSet;

use chrono::{DateTime, Utc};
use tracing::debug;

use cex_model::{ContentItem, DateBounds, DateCombine, DateFilter};

type ItemKey = (String, String);

fn key(item: &ContentItem) -> ItemKey {
    (item.id.normalized(), item.language.as_str().to_string())
}

fn passes(bounds: &DateBounds, timestamp: Option<DateTime<Utc>>) -> bool {
    if !bounds.is_configured() {
        return true;
    }
    timestamp.is_some_and(|instant| bounds.contains(instant))
}

/// Apply the configured date filter to the candidate list.
pub fn filter_by_date_ranges(items: Vec<ContentItem>, filter: &DateFilter) -> Vec<ContentItem> {
    if !filter.is_configured() {
        return items;
    }

    let created: HashSet<ItemKey> = items
        .iter()
        .filter(|item| passes(&filter.created, item.created))
        .map(|item| key(item))
        .collect();
    let modified: HashSet<ItemKey> = items
        .iter()
        .filter(|item| passes(&filter.modified, item.updated))
        .map(|item| key(item))
        .collect();

    let mut combined: Vec<ContentItem> = items
        .into_iter()
        .filter(|item| {
            let item_key = key(item);
            match filter.combine {
                DateCombine::Or => created.contains(&item_key) || modified.contains(&item_key),
                DateCombine::And => created.contains(&item_key) && modified.contains(&item_key),
            }
        })
        .collect();

    combined.sort_by(|a, b| b.content_path.cmp(&a.content_path));
    debug!(
        created = created.len(),
        modified = modified.len(),
        combined = combined.len(),
        mode = ?filter.combine,
        "applied date-range filter"
    );
    combined
}
