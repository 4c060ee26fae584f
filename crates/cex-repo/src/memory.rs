//! Snapshot-backed in-memory repository.
//!
//! A [`RepositorySnapshot`] is the JSON-serializable picture of a content
//! tree: every language version of every item, the template definitions, the
//! referrer edges, and the installed languages. [`InMemoryRepository`] indexes
//! one snapshot and serves the [`ContentRepository`] port from it.
//!
//! The snapshot lists one entry per item *per language*; the first entry for
//! a given id is that item's current-language version and defines repository
//! order for descendant listings.

use std::collections::BTreeMap;
use std::collections::HashMap;
use std::fs;
use std::path::Path;

use anyhow::Context;
use serde::{Deserialize, Serialize};
use tracing::debug;

use cex_model::{ContentItem, ItemId, Language, TemplateNode};

use crate::{ContentRepository, RepoError, Result};

/// Serializable picture of a content repository.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RepositorySnapshot {
    /// Default export root path (e.g. `/sitecore/content`).
    #[serde(default)]
    pub default_root: Option<String>,
    /// Installed language display names.
    #[serde(default)]
    pub languages: Vec<String>,
    /// Full template definition list.
    #[serde(default)]
    pub templates: Vec<TemplateNode>,
    /// Every language version of every item; first entry per id is the
    /// current-language version.
    #[serde(default)]
    pub items: Vec<ContentItem>,
    /// Referrer edges: target item id -> ids of items linking to it.
    #[serde(default)]
    pub referrers: BTreeMap<String, Vec<String>>,
}

/// In-memory [`ContentRepository`] built from a snapshot.
#[derive(Debug)]
pub struct InMemoryRepository {
    snapshot: RepositorySnapshot,
    /// Indexes into `snapshot.items` for the first (current-language) entry
    /// per normalized id, in snapshot order.
    base_order: Vec<usize>,
    by_id: HashMap<String, usize>,
    by_id_language: HashMap<(String, String), usize>,
    by_path: HashMap<String, usize>,
}

impl InMemoryRepository {
    pub fn new(snapshot: RepositorySnapshot) -> Self {
        let mut base_order = Vec::new();
        let mut by_id = HashMap::new();
        let mut by_id_language = HashMap::new();
        let mut by_path = HashMap::new();

        for (index, item) in snapshot.items.iter().enumerate() {
            let key = item.id.normalized();
            by_id_language
                .entry((key.clone(), item.language.as_str().to_string()))
                .or_insert(index);
            if !by_id.contains_key(&key) {
                by_id.insert(key, index);
                by_path.entry(item.path.clone()).or_insert(index);
                base_order.push(index);
            }
        }
        debug!(
            items = snapshot.items.len(),
            base_items = base_order.len(),
            templates = snapshot.templates.len(),
            "indexed repository snapshot"
        );

        Self {
            snapshot,
            base_order,
            by_id,
            by_id_language,
            by_path,
        }
    }

    /// Load a snapshot from a JSON file.
    pub fn from_json_file(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path)
            .with_context(|| format!("failed to read snapshot from {}", path.display()))?;
        let snapshot: RepositorySnapshot = serde_json::from_str(&contents)
            .with_context(|| format!("failed to parse snapshot from {}", path.display()))?;
        Ok(Self::new(snapshot))
    }

    fn base_items(&self) -> impl Iterator<Item = &ContentItem> {
        self.base_order.iter().map(|&index| &self.snapshot.items[index])
    }

    fn item_at(&self, index: usize) -> ContentItem {
        self.snapshot.items[index].clone()
    }

    fn children_of(&self, path: &str) -> Vec<ContentItem> {
        let prefix = format!("{}/", path.trim_end_matches('/'));
        self.base_items()
            .filter(|item| {
                item.path.starts_with(&prefix) && !item.path[prefix.len()..].contains('/')
            })
            .cloned()
            .collect()
    }
}

impl ContentRepository for InMemoryRepository {
    fn item_by_path(&self, path: &str) -> Option<ContentItem> {
        self.by_path.get(path).map(|&index| self.item_at(index))
    }

    fn item_by_id(&self, id: &ItemId) -> Option<ContentItem> {
        self.by_id
            .get(&id.normalized())
            .map(|&index| self.item_at(index))
    }

    fn item_in_language(&self, id: &ItemId, language: &Language) -> Option<ContentItem> {
        self.by_id_language
            .get(&(id.normalized(), language.as_str().to_string()))
            .map(|&index| self.item_at(index))
    }

    fn descendants(&self, item: &ContentItem) -> Vec<ContentItem> {
        let prefix = format!("{}/", item.path.trim_end_matches('/'));
        self.base_items()
            .filter(|candidate| candidate.path.starts_with(&prefix))
            .cloned()
            .collect()
    }

    fn run_query(&self, query: &str) -> Result<Vec<ContentItem>> {
        let query = query.trim();
        if query.is_empty() {
            return Err(RepoError::query(query, "empty query"));
        }

        // Template predicate form: //*[@@templatename='X']
        if let Some(rest) = query.strip_prefix("//*[@@templatename='") {
            let name = rest
                .strip_suffix("']")
                .ok_or_else(|| RepoError::query(query, "unterminated template predicate"))?;
            return Ok(self
                .base_items()
                .filter(|item| item.template_name.eq_ignore_ascii_case(name))
                .cloned()
                .collect());
        }

        if !query.starts_with('/') {
            return Err(RepoError::query(query, "query must start with '/'"));
        }
        if query.contains('[') {
            return Err(RepoError::query(query, "unsupported predicate"));
        }

        if let Some(path) = query.strip_suffix("//*") {
            let Some(root) = self.item_by_path(path.trim_end_matches('/')) else {
                return Ok(Vec::new());
            };
            return Ok(self.descendants(&root));
        }
        if let Some(path) = query.strip_suffix("/*") {
            return Ok(self.children_of(path));
        }
        Ok(self.item_by_path(query).into_iter().collect())
    }

    fn referrers(&self, item: &ContentItem) -> Vec<ContentItem> {
        let key = self
            .snapshot
            .referrers
            .iter()
            .find(|(target, _)| item.id.matches_token(target));
        let Some((_, sources)) = key else {
            return Vec::new();
        };
        sources
            .iter()
            .filter_map(|source| {
                ItemId::new(source.clone())
                    .ok()
                    .and_then(|id| self.item_by_id(&id))
            })
            .collect()
    }

    fn languages(&self) -> Vec<Language> {
        self.snapshot
            .languages
            .iter()
            .filter_map(|name| Language::new(name.clone()).ok())
            .collect()
    }

    fn templates(&self) -> Vec<TemplateNode> {
        self.snapshot.templates.clone()
    }

    fn default_root(&self) -> Option<String> {
        self.snapshot.default_root.clone()
    }
}
