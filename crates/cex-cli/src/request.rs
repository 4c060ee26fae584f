//! Export-request assembly from presets and flag overrides.
//!
//! A preset is a saved `ExportRequest` in JSON form. Flags layer on top:
//! set flags override or extend the preset, unset flags leave it untouched.
//! Toggles can only be switched on from the command line; switching one off
//! means editing the preset.

use std::path::Path;

use anyhow::{Context, Result};
use chrono::NaiveDate;

use cex_model::{DateCombine, ExportRequest, LanguageScope};

/// Flag-level overrides collected from the command line.
#[derive(Debug, Clone, Default)]
pub struct RequestOverrides {
    pub start_path: Option<String>,
    pub additional_start_paths: Vec<String>,
    pub query: Option<String>,
    pub templates: Vec<String>,
    pub expand_inheritance: bool,
    pub fields: Vec<String>,
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
    pub require_layout: bool,

    pub language: Option<String>,
    pub all_languages: bool,

    pub created_from: Option<NaiveDate>,
    pub created_to: Option<NaiveDate>,
    pub modified_from: Option<NaiveDate>,
    pub modified_to: Option<NaiveDate>,
    pub date_mode: Option<DateCombine>,

    pub file_name: Option<String>,
}

/// Load a saved request preset from a JSON file.
pub fn load_preset(path: &Path) -> Result<ExportRequest> {
    let contents = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read request preset from {}", path.display()))?;
    serde_json::from_str(&contents)
        .with_context(|| format!("failed to parse request preset from {}", path.display()))
}

/// Layer flag overrides over a preset (or the default request).
pub fn build_request(preset: Option<ExportRequest>, overrides: &RequestOverrides) -> ExportRequest {
    let mut request = preset.unwrap_or_default();

    if overrides.start_path.is_some() {
        request.start_path = overrides.start_path.clone();
    }
    if !overrides.additional_start_paths.is_empty() {
        request.additional_start_paths = overrides.additional_start_paths.clone();
    }
    if overrides.query.is_some() {
        request.query = overrides.query.clone();
    }
    if !overrides.templates.is_empty() {
        request.templates = overrides.templates.clone();
    }
    if !overrides.fields.is_empty() {
        request.fields = overrides.fields.clone();
    }

    request.expand_inheritance |= overrides.expand_inheritance;
    request.all_fields |= overrides.all_fields;
    request.include_name |= overrides.include_name;
    request.include_ids |= overrides.include_ids;
    request.include_template |= overrides.include_template;
    request.include_linked_ids |= overrides.include_linked_ids;
    request.include_raw_html |= overrides.include_raw_html;
    request.include_date_created |= overrides.include_date_created;
    request.include_created_by |= overrides.include_created_by;
    request.include_date_modified |= overrides.include_date_modified;
    request.include_modified_by |= overrides.include_modified_by;
    request.include_never_publish |= overrides.include_never_publish;
    request.include_workflow_name |= overrides.include_workflow_name;
    request.include_workflow_state |= overrides.include_workflow_state;
    request.include_referrers |= overrides.include_referrers;
    request.require_layout |= overrides.require_layout;

    if overrides.all_languages {
        request.language = LanguageScope::All;
    } else if let Some(language) = &overrides.language {
        request.language = LanguageScope::Single(language.clone());
    }

    if overrides.created_from.is_some() {
        request.date_filter.created.start = overrides.created_from;
    }
    if overrides.created_to.is_some() {
        request.date_filter.created.end = overrides.created_to;
    }
    if overrides.modified_from.is_some() {
        request.date_filter.modified.start = overrides.modified_from;
    }
    if overrides.modified_to.is_some() {
        request.date_filter.modified.end = overrides.modified_to;
    }
    if let Some(mode) = overrides.date_mode {
        request.date_filter.combine = mode;
    }

    if overrides.file_name.is_some() {
        request.file_name = overrides.file_name.clone();
    }

    request
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flags_override_preset_scalars_and_extend_toggles() {
        let preset = ExportRequest {
            start_path: Some("/sitecore/content".to_string()),
            include_name: true,
            templates: vec!["Article".to_string()],
            ..Default::default()
        };
        let overrides = RequestOverrides {
            start_path: Some("/sitecore/content/Home".to_string()),
            include_ids: true,
            date_mode: Some(DateCombine::And),
            ..Default::default()
        };
        let request = build_request(Some(preset), &overrides);
        assert_eq!(request.start_path.as_deref(), Some("/sitecore/content/Home"));
        assert!(request.include_name);
        assert!(request.include_ids);
        assert_eq!(request.templates, vec!["Article".to_string()]);
        assert_eq!(request.date_filter.combine, DateCombine::And);
    }

    #[test]
    fn all_languages_outranks_a_single_language_flag() {
        let overrides = RequestOverrides {
            language: Some("Danish".to_string()),
            all_languages: true,
            ..Default::default()
        };
        let request = build_request(None, &overrides);
        assert_eq!(request.language, LanguageScope::All);
    }

    #[test]
    fn unset_flags_leave_the_preset_untouched() {
        let preset = ExportRequest {
            query: Some("//*[@@templatename='Page']".to_string()),
            file_name: Some("Audit".to_string()),
            ..Default::default()
        };
        let request = build_request(Some(preset), &RequestOverrides::default());
        assert_eq!(request.query.as_deref(), Some("//*[@@templatename='Page']"));
        assert_eq!(request.file_name.as_deref(), Some("Audit"));
    }
}
