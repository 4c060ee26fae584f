#![deny(unsafe_code)]

use chrono::{DateTime, Utc};

use crate::{ItemId, Language, TemplateId};

/// A typed field value. The variant is fixed per field *definition*: a given
/// field name always carries the same variant across every item and version.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum FieldValue {
    PlainText {
        value: String,
    },
    Html {
        value: String,
    },
    Checkbox {
        checked: bool,
    },
    Image {
        target_path: Option<String>,
        target_id: Option<ItemId>,
        raw: String,
    },
    Link {
        url: String,
        raw: String,
    },
    Reference {
        target_path: Option<String>,
        target_id: Option<ItemId>,
    },
    /// Ordered reference list; `target_ids` is parallel to `target_paths`.
    MultiReference {
        target_paths: Vec<String>,
        target_ids: Vec<ItemId>,
    },
    Lookup {
        target_path: Option<String>,
        target_id: Option<ItemId>,
    },
}

/// Workflow assignment of one item version.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct WorkflowInfo {
    pub name: String,
    pub state: String,
}

/// One language version of a content item, as read from the repository.
///
/// Fields are an *ordered* list in repository-reported order; that order
/// drives column discovery when exporting with "all fields". Timestamps are
/// `None` when the repository reported a sentinel min/max value.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct ContentItem {
    pub id: ItemId,
    pub name: String,
    /// Full repository path (e.g. `/sitecore/content/Home`).
    pub path: String,
    /// Display path used in export cells; items with an empty content path
    /// are skipped by the exporter.
    pub content_path: String,
    pub template_id: TemplateId,
    pub template_name: String,
    pub language: Language,
    pub fields: Vec<(String, FieldValue)>,
    pub created: Option<DateTime<Utc>>,
    pub created_by: String,
    pub updated: Option<DateTime<Utc>>,
    pub updated_by: String,
    pub never_publish: bool,
    pub workflow: Option<WorkflowInfo>,
    pub has_layout: bool,
    /// Number of saved versions in this language; zero means the item has
    /// never been saved in this language.
    pub version_count: u32,
}

impl ContentItem {
    /// Case-sensitive field lookup by name.
    pub fn field(&self, name: &str) -> Option<&FieldValue> {
        self.fields
            .iter()
            .find(|(field_name, _)| field_name == name)
            .map(|(_, value)| value)
    }

    pub fn has_versions(&self) -> bool {
        self.version_count > 0
    }
}
