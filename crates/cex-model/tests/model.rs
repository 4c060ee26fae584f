use chrono::{TimeZone, Utc};

use cex_model::{
    ContentItem, ExportRequest, FieldValue, ItemId, Language, TemplateId, TemplateNode,
    WorkflowInfo,
};

fn sample_item() -> ContentItem {
    ContentItem {
        id: ItemId::new("{11111111-0000-0000-0000-000000000001}").expect("id"),
        name: "Article".to_string(),
        path: "/sitecore/content/Home/Article".to_string(),
        content_path: "/Home/Article".to_string(),
        template_id: TemplateId::new("{AAAA0000-0000-0000-0000-000000000001}").expect("id"),
        template_name: "Article".to_string(),
        language: Language::new("English").expect("language"),
        fields: vec![
            (
                "Title".to_string(),
                FieldValue::PlainText {
                    value: "Hello".to_string(),
                },
            ),
            (
                "Body".to_string(),
                FieldValue::Html {
                    value: "<p>Hello</p>".to_string(),
                },
            ),
        ],
        created: Some(Utc.with_ymd_and_hms(2020, 1, 15, 9, 30, 0).unwrap()),
        created_by: "sitecore\\author".to_string(),
        updated: Some(Utc.with_ymd_and_hms(2021, 6, 1, 12, 0, 0).unwrap()),
        updated_by: "sitecore\\editor".to_string(),
        never_publish: false,
        workflow: Some(WorkflowInfo {
            name: "Sample Workflow".to_string(),
            state: "Approved".to_string(),
        }),
        has_layout: true,
        version_count: 3,
    }
}

#[test]
fn content_item_serde_round_trip() {
    let item = sample_item();
    let json = serde_json::to_string_pretty(&item).expect("serialize item");
    let round: ContentItem = serde_json::from_str(&json).expect("deserialize item");
    assert_eq!(round.id, item.id);
    assert_eq!(round.fields.len(), 2);
    assert_eq!(round.fields[0].0, "Title");
    assert_eq!(round.version_count, 3);
    assert!(round.has_versions());
}

#[test]
fn template_node_token_matching() {
    let node = TemplateNode {
        id: TemplateId::new("{AAAA0000-0000-0000-0000-000000000001}").expect("id"),
        name: "Article".to_string(),
        base_templates: vec![TemplateId::new("{BBBB0000-0000-0000-0000-000000000001}").expect("id")],
    };
    assert!(node.matches_token("article"));
    assert!(node.matches_token("aaaa0000-0000-0000-0000-000000000001"));
    assert!(!node.matches_token("News"));
    assert!(
        node.derives_from(&TemplateId::new("bbbb0000000000000000000000000001").expect("id"))
    );
}

#[test]
fn default_request_emits_no_optional_columns() {
    let request = ExportRequest::default();
    assert!(!request.include_name);
    assert!(!request.emits_created_column());
    assert!(!request.emits_modified_column());
    assert!(!request.language.adds_language_column());
}

#[test]
fn request_deserializes_from_partial_json() {
    // Presets written by older versions may omit newer toggles entirely.
    let round: ExportRequest = serde_json::from_str(
        r#"{"start_path": "/sitecore/content", "include_name": true}"#,
    )
    .expect("deserialize partial request");
    assert!(round.include_name);
    assert!(!round.include_ids);
    assert!(round.query.is_none());
}
