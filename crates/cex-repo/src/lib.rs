//! Read-only access to the content repository.
//!
//! The export engine consumes the repository exclusively through the
//! [`ContentRepository`] trait; it never mutates content and holds items only
//! for the duration of one export. [`memory::InMemoryRepository`] is the
//! snapshot-backed implementation used by the CLI and the test suites.

pub mod error;
pub mod memory;

pub use error::{RepoError, Result};
pub use memory::{InMemoryRepository, RepositorySnapshot};

use cex_model::{ContentItem, ItemId, Language, TemplateNode};

/// Read-only repository port.
///
/// Lookups return `None` (or an empty list) for unknown targets; only a
/// malformed query is an error.
pub trait ContentRepository {
    /// Fetch an item by full repository path, in its current language.
    fn item_by_path(&self, path: &str) -> Option<ContentItem>;

    /// Fetch an item by id, in its current language.
    fn item_by_id(&self, id: &ItemId) -> Option<ContentItem>;

    /// Fetch the named language version of an item.
    fn item_in_language(&self, id: &ItemId, language: &Language) -> Option<ContentItem>;

    /// All descendants of an item (excluding the item itself), in repository
    /// order.
    fn descendants(&self, item: &ContentItem) -> Vec<ContentItem>;

    /// Execute a fast-query string.
    fn run_query(&self, query: &str) -> Result<Vec<ContentItem>>;

    /// Items holding a link or reference to the given item.
    fn referrers(&self, item: &ContentItem) -> Vec<ContentItem>;

    /// Every language installed in the repository.
    fn languages(&self) -> Vec<Language>;

    /// The full template definition list, in one scan.
    fn templates(&self) -> Vec<TemplateNode>;

    /// Default export root when a request names no start path.
    fn default_root(&self) -> Option<String>;
}
