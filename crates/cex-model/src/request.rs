#![deny(unsafe_code)]

use chrono::{DateTime, NaiveDate, NaiveTime, TimeZone, Utc};
use serde::{Deserialize, Serialize};

/// Which language versions of each selected item become rows.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(tag = "mode", content = "language", rename_all = "snake_case")]
pub enum LanguageScope {
    /// No fan-out: the base item in its current language is the sole row source.
    #[default]
    Default,
    /// Fan out to the one named display language.
    Single(String),
    /// Fan out to every language known to the repository.
    All,
}

impl LanguageScope {
    /// The Language column is emitted whenever any fan-out is requested.
    pub fn adds_language_column(&self) -> bool {
        !matches!(self, LanguageScope::Default)
    }
}

/// How the created-filtered and modified-filtered subsets combine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DateCombine {
    /// Union of the two subsets.
    #[default]
    Or,
    /// Intersection of the two subsets.
    And,
}

/// Inclusive day-granularity bounds on one timestamp dimension.
///
/// The end bound extends through 23:59:59 of the given day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct DateBounds {
    pub start: Option<NaiveDate>,
    pub end: Option<NaiveDate>,
}

impl DateBounds {
    pub fn is_configured(&self) -> bool {
        self.start.is_some() || self.end.is_some()
    }

    /// Whether `instant` falls inside the bounds. Unset ends are open.
    pub fn contains(&self, instant: DateTime<Utc>) -> bool {
        if let Some(start) = self.start {
            let floor = Utc.from_utc_datetime(&start.and_time(NaiveTime::MIN));
            if instant < floor {
                return false;
            }
        }
        if let Some(end) = self.end {
            let end_of_day = NaiveTime::from_hms_opt(23, 59, 59).unwrap_or(NaiveTime::MIN);
            let ceil = Utc.from_utc_datetime(&end.and_time(end_of_day));
            if instant > ceil {
                return false;
            }
        }
        true
    }
}

/// Created/modified range predicates and their combination mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct DateFilter {
    #[serde(default)]
    pub created: DateBounds,
    #[serde(default)]
    pub modified: DateBounds,
    #[serde(default)]
    pub combine: DateCombine,
}

impl DateFilter {
    pub fn is_configured(&self) -> bool {
        self.created.is_configured() || self.modified.is_configured()
    }
}

/// The sole structured input to one export run. Serde round-trippable so the
/// CLI can persist and reload named presets.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ExportRequest {
    /// Primary start path; selects the item itself plus all descendants.
    /// Falls back to the repository default root when unset.
    pub start_path: Option<String>,
    /// Additional start paths unioned into the selection, each again as
    /// item-plus-descendants. Overlapping subtrees are *not* deduplicated.
    pub additional_start_paths: Vec<String>,
    /// Fast-query string; when non-empty it replaces the primary path
    /// traversal (additional start paths still union in).
    pub query: Option<String>,
    /// Template filter tokens (name or id); empty means all templates.
    pub templates: Vec<String>,
    /// Also accept items whose template directly inherits from a matched
    /// template (single expansion pass, not transitive).
    pub expand_inheritance: bool,
    /// Explicit field list; ignored when `all_fields` is set.
    pub fields: Vec<String>,
    /// Discover fields while scanning instead of using `fields`.
    pub all_fields: bool,

    pub include_name: bool,
    pub include_ids: bool,
    pub include_template: bool,
    pub include_linked_ids: bool,
    pub include_raw_html: bool,
    pub include_date_created: bool,
    pub include_created_by: bool,
    pub include_date_modified: bool,
    pub include_modified_by: bool,
    pub include_never_publish: bool,
    pub include_workflow_name: bool,
    pub include_workflow_state: bool,
    pub include_referrers: bool,
    /// Only export items carrying a presentation layout.
    pub require_layout: bool,

    pub language: LanguageScope,
    pub date_filter: DateFilter,

    /// Base name of the downloadable artifact (without extension).
    pub file_name: Option<String>,
}

impl ExportRequest {
    /// The Created column is forced on when created bounds are configured,
    /// even if the toggle is off.
    pub fn emits_created_column(&self) -> bool {
        self.include_date_created || self.date_filter.created.is_configured()
    }

    /// Same forcing rule for the Modified column.
    pub fn emits_modified_column(&self) -> bool {
        self.include_date_modified || self.date_filter.modified.is_configured()
    }
}
