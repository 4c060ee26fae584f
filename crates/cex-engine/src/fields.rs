//! Per-field-type cell serialization.
//!
//! One exhaustive match over [`FieldValue`] replaces the original runtime
//! type probing: each kind contributes a primary cell, optionally an ID
//! and/or Raw-HTML sub-cell, and tells the [`ColumnRegistry`] which
//! sub-columns it carries. An absent field contributes the absent-value
//! placeholder plus two pending slots whose fate is decided during
//! reconciliation. A missing reference target is an empty cell, never an
//! error.

use cex_model::{FieldValue, ItemId};
use cex_repo::ContentRepository;

use crate::columns::{ABSENT_CELL, ColumnRegistry, RowDraft, SubColumn};

/// Toggles the serializer needs from the request.
#[derive(Debug, Clone, Copy)]
pub struct FieldOptions {
    pub include_linked_ids: bool,
    pub include_raw_html: bool,
}

/// Serialize one field occurrence into the draft row and update the registry.
pub fn serialize_field(
    row: &mut RowDraft,
    registry: &mut ColumnRegistry,
    field_name: &str,
    value: Option<&FieldValue>,
    options: FieldOptions,
) {
    let Some(value) = value else {
        registry.register_absent(field_name);
        row.push_value(ABSENT_CELL);
        row.push_pending(field_name, SubColumn::Id);
        row.push_pending(field_name, SubColumn::Raw);
        row.field_done();
        return;
    };

    match value {
        FieldValue::Image {
            target_path,
            target_id,
            raw,
        } => {
            row.push_value(target_path.clone().unwrap_or_default());
            if options.include_linked_ids {
                row.push_value(id_cell(target_id.as_ref()));
            }
            if options.include_raw_html {
                row.push_value(raw.clone());
            }
            registry.confirm(field_name, true, true);
        }
        FieldValue::Link { url, raw } => {
            row.push_value(url.clone());
            if options.include_raw_html {
                row.push_value(raw.clone());
            }
            registry.confirm(field_name, false, true);
        }
        FieldValue::Reference {
            target_path,
            target_id,
        } => {
            row.push_value(target_path.clone().unwrap_or_default());
            if options.include_linked_ids {
                row.push_value(id_cell(target_id.as_ref()));
            }
            registry.confirm(field_name, true, false);
        }
        FieldValue::Lookup {
            target_path,
            target_id,
        } => {
            row.push_value(target_path.clone().unwrap_or_default());
            if options.include_linked_ids {
                row.push_value(id_cell(target_id.as_ref()));
            }
            registry.confirm(field_name, true, false);
        }
        FieldValue::MultiReference {
            target_paths,
            target_ids,
        } => {
            row.push_value(quoted_list(target_paths.iter().map(String::as_str)));
            if options.include_linked_ids {
                row.push_value(quoted_list(target_ids.iter().map(ItemId::as_str)));
            }
            registry.confirm(field_name, true, false);
        }
        FieldValue::Checkbox { checked } => {
            row.push_value(checked.to_string());
            registry.confirm(field_name, false, false);
        }
        FieldValue::PlainText { value } | FieldValue::Html { value } => {
            row.push_value(strip_line_endings(value));
            registry.confirm(field_name, false, false);
        }
    }
    row.field_done();
}

fn id_cell(id: Option<&ItemId>) -> String {
    id.map(|id| id.as_str().to_string()).unwrap_or_default()
}

/// Quoted multi-value cell: every entry is semicolon-terminated, entries are
/// newline-separated, and the whole list is wrapped in double quotes. An
/// empty list renders as an empty quoted cell, not as the absent placeholder.
pub fn quoted_list<'a>(entries: impl Iterator<Item = &'a str>) -> String {
    let mut data = String::new();
    for (index, entry) in entries.enumerate() {
        if index > 0 {
            data.push('\n');
        }
        data.push_str(entry);
        data.push(';');
    }
    format!("\"{data}\"")
}

/// Referrer-list cell: semicolon-plus-newline separated, no trailing
/// terminator, wrapped in double quotes.
pub fn quoted_referrer_list<'a>(paths: impl Iterator<Item = &'a str>) -> String {
    let mut data = String::new();
    for (index, path) in paths.enumerate() {
        if index > 0 {
            data.push_str(";\n");
        }
        data.push_str(path);
    }
    format!("\"{data}\"")
}

/// Strip every line-ending variant and literal line-break markup from a text
/// value, and widen tabs so the value cannot break column alignment.
pub fn strip_line_endings(value: &str) -> String {
    value
        .replace("\r\n", "")
        .replace(['\n', '\r', '\u{2028}', '\u{2029}'], "")
        .replace("<br/>", "")
        .replace("<br />", "")
        .replace('\t', "   ")
}

/// Resolve a requested field token to its display name: tokens that are item
/// ids resolve through the repository to the field definition's name, all
/// other tokens pass through unchanged.
pub fn field_display_name(repo: &dyn ContentRepository, token: &str) -> String {
    let looks_like_id = {
        let stripped: String = token
            .chars()
            .filter(|c| !matches!(c, '{' | '}' | '-'))
            .collect();
        !stripped.is_empty() && stripped.chars().all(|c| c.is_ascii_hexdigit())
    };
    if looks_like_id
        && let Ok(id) = ItemId::new(token)
        && let Some(item) = repo.item_by_id(&id)
    {
        return item.name;
    }
    token.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::columns::Cell;

    fn options() -> FieldOptions {
        FieldOptions {
            include_linked_ids: true,
            include_raw_html: true,
        }
    }

    fn cell_texts(row: &RowDraft) -> Vec<String> {
        row.cells()
            .iter()
            .map(|cell| match cell {
                Cell::Value(value) => value.clone(),
                Cell::Pending { field, .. } => format!("<pending {field}>"),
            })
            .collect()
    }

    #[test]
    fn absent_field_contributes_placeholder_and_pending_slots() {
        let mut row = RowDraft::new();
        let mut registry = ColumnRegistry::new();
        serialize_field(&mut row, &mut registry, "Image", None, options());
        assert_eq!(row.cells().len(), 3);
        assert!(matches!(&row.cells()[0], Cell::Value(v) if v == "n/a"));
        assert!(matches!(&row.cells()[1], Cell::Pending { slot: SubColumn::Id, .. }));
        assert!(matches!(&row.cells()[2], Cell::Pending { slot: SubColumn::Raw, .. }));
        assert!(!registry.specs()[0].resolved);
    }

    #[test]
    fn image_field_emits_path_id_and_raw() {
        let mut row = RowDraft::new();
        let mut registry = ColumnRegistry::new();
        let value = FieldValue::Image {
            target_path: Some("/media/banner".to_string()),
            target_id: Some(ItemId::new("{IMG}").expect("id")),
            raw: "<image mediaid=\"{IMG}\" />".to_string(),
        };
        serialize_field(&mut row, &mut registry, "Image", Some(&value), options());
        assert_eq!(
            cell_texts(&row),
            vec!["/media/banner", "{IMG}", "<image mediaid=\"{IMG}\" />"]
        );
        assert!(registry.specs()[0].id_column);
        assert!(registry.specs()[0].raw_column);
    }

    #[test]
    fn unresolved_image_target_degrades_to_empty_cells() {
        let mut row = RowDraft::new();
        let mut registry = ColumnRegistry::new();
        let value = FieldValue::Image {
            target_path: None,
            target_id: None,
            raw: String::new(),
        };
        serialize_field(&mut row, &mut registry, "Image", Some(&value), options());
        assert_eq!(cell_texts(&row), vec!["", "", ""]);
        // Sub-columns are still declared relevant for the column set.
        assert!(registry.specs()[0].id_column);
    }

    #[test]
    fn lookup_field_emits_target_id_cell() {
        let mut row = RowDraft::new();
        let mut registry = ColumnRegistry::new();
        let value = FieldValue::Lookup {
            target_path: Some("/Tags/News".to_string()),
            target_id: Some(ItemId::new("{TGT}").expect("id")),
        };
        serialize_field(&mut row, &mut registry, "Related", Some(&value), options());
        assert_eq!(cell_texts(&row), vec!["/Tags/News", "{TGT}"]);
        assert!(registry.specs()[0].id_column);
        assert!(!registry.specs()[0].raw_column);
    }

    #[test]
    fn empty_multireference_renders_quoted_empty_not_absent() {
        let mut row = RowDraft::new();
        let mut registry = ColumnRegistry::new();
        let value = FieldValue::MultiReference {
            target_paths: Vec::new(),
            target_ids: Vec::new(),
        };
        serialize_field(&mut row, &mut registry, "Tags", Some(&value), options());
        assert_eq!(cell_texts(&row), vec!["\"\"", "\"\""]);
    }

    #[test]
    fn multireference_lists_are_parallel_and_newline_separated() {
        let mut row = RowDraft::new();
        let mut registry = ColumnRegistry::new();
        let value = FieldValue::MultiReference {
            target_paths: vec!["/Tags/News".to_string(), "/Tags/Sport".to_string()],
            target_ids: vec![
                ItemId::new("{T1}").expect("id"),
                ItemId::new("{T2}").expect("id"),
            ],
        };
        serialize_field(&mut row, &mut registry, "Tags", Some(&value), options());
        assert_eq!(
            cell_texts(&row),
            vec!["\"/Tags/News;\n/Tags/Sport;\"", "\"{T1};\n{T2};\""]
        );
    }

    #[test]
    fn link_field_has_raw_but_no_id_column() {
        let mut row = RowDraft::new();
        let mut registry = ColumnRegistry::new();
        let value = FieldValue::Link {
            url: "https://example.org".to_string(),
            raw: "<link url=\"https://example.org\" />".to_string(),
        };
        serialize_field(&mut row, &mut registry, "More", Some(&value), options());
        let spec = &registry.specs()[0];
        assert!(!spec.id_column);
        assert!(spec.raw_column);
    }

    #[test]
    fn text_cells_are_stripped_of_line_endings() {
        let mut row = RowDraft::new();
        let mut registry = ColumnRegistry::new();
        let value = FieldValue::PlainText {
            value: "line one\r\nline two<br />tab\there\u{2028}end".to_string(),
        };
        serialize_field(&mut row, &mut registry, "Body", Some(&value), options());
        assert_eq!(cell_texts(&row), vec!["line oneline twotab   hereend"]);
    }

    #[test]
    fn strip_line_endings_handles_every_variant() {
        assert_eq!(strip_line_endings("a\rb\nc\r\nd\u{2029}e"), "abcde");
        assert_eq!(strip_line_endings("a<br/>b<br />c"), "abc");
    }
}
