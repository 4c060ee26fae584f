//! Language/version fan-out of a selected base item.

use cex_model::{ContentItem, LanguageScope};
use cex_repo::ContentRepository;

/// Expand one base item into its row sources.
///
/// - `All`: every repository language in which the item has at least one
///   saved version.
/// - `Single`: the one named language, same saved-version requirement.
/// - `Default`: the base item itself, no fan-out.
pub fn expand_versions(
    repo: &dyn ContentRepository,
    item: &ContentItem,
    scope: &LanguageScope,
) -> Vec<ContentItem> {
    match scope {
        LanguageScope::Default => vec![item.clone()],
        LanguageScope::All => repo
            .languages()
            .iter()
            .filter_map(|language| repo.item_in_language(&item.id, language))
            .filter(ContentItem::has_versions)
            .collect(),
        LanguageScope::Single(selected) => repo
            .languages()
            .iter()
            .filter(|language| language.as_str() == selected.as_str())
            .filter_map(|language| repo.item_in_language(&item.id, language))
            .filter(ContentItem::has_versions)
            .collect(),
    }
}
