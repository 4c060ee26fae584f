use proptest::prelude::*;

use cex_engine::run_export;
use cex_model::{ContentItem, ExportRequest, FieldValue, ItemId, Language, TemplateId};
use cex_repo::{InMemoryRepository, RepositorySnapshot};

const FIELD_POOL: [&str; 6] = ["Title", "Body", "Flag", "Hero", "Tags", "Owner"];

/// Field values keyed by name so that a name always carries the same variant.
fn field_value(name: &str, seed: u8) -> FieldValue {
    match name {
        "Title" => FieldValue::PlainText {
            value: format!("title-{seed}"),
        },
        "Body" => FieldValue::Html {
            value: format!("<p>body {seed}\nline</p>"),
        },
        "Flag" => FieldValue::Checkbox {
            checked: seed % 2 == 0,
        },
        "Hero" => FieldValue::Image {
            target_path: (seed % 2 == 0).then(|| format!("/media/hero-{seed}")),
            target_id: (seed % 2 == 0)
                .then(|| ItemId::new(format!("{{HERO-{seed}}}")).ok())
                .flatten(),
            raw: format!("<image mediaid=\"{{HERO-{seed}}}\" />"),
        },
        "Tags" => FieldValue::MultiReference {
            target_paths: (0..seed % 3).map(|i| format!("/tags/t{i}")).collect(),
            target_ids: (0..seed % 3)
                .filter_map(|i| ItemId::new(format!("{{T{i}}}")).ok())
                .collect(),
        },
        _ => FieldValue::Reference {
            target_path: (seed % 3 != 0).then(|| format!("/refs/r{seed}")),
            target_id: (seed % 3 != 0)
                .then(|| ItemId::new(format!("{{R{seed}}}")).ok())
                .flatten(),
        },
    }
}

fn build_item(index: usize, mask: u8, seed: u8) -> ContentItem {
    let path = if index == 0 {
        "/sitecore/content".to_string()
    } else {
        format!("/sitecore/content/item-{index}")
    };
    let fields = FIELD_POOL
        .iter()
        .enumerate()
        .filter(|(bit, _)| mask & (1 << bit) != 0)
        .map(|(_, name)| ((*name).to_string(), field_value(name, seed)))
        .collect();
    ContentItem {
        id: ItemId::new(format!("{{ITEM-{index}}}")).expect("id"),
        name: format!("item-{index}"),
        path: path.clone(),
        content_path: path,
        template_id: TemplateId::new("{PAGE-TPL}").expect("template id"),
        template_name: "Page".to_string(),
        language: Language::new("English").expect("language"),
        fields,
        created: None,
        created_by: String::new(),
        updated: None,
        updated_by: String::new(),
        never_publish: false,
        workflow: None,
        has_layout: true,
        version_count: 1,
    }
}

fn build_repository(shapes: &[(u8, u8)]) -> InMemoryRepository {
    let items = shapes
        .iter()
        .enumerate()
        .map(|(index, &(mask, seed))| build_item(index, mask, seed))
        .collect();
    InMemoryRepository::new(RepositorySnapshot {
        default_root: Some("/sitecore/content".to_string()),
        languages: vec!["English".to_string()],
        templates: Vec::new(),
        items,
        referrers: Default::default(),
    })
}

proptest! {
    #[test]
    fn every_row_matches_the_header_width(
        shapes in prop::collection::vec((any::<u8>(), any::<u8>()), 1..8),
        all_fields in any::<bool>(),
        include_linked_ids in any::<bool>(),
        include_raw_html in any::<bool>(),
        include_name in any::<bool>(),
        include_referrers in any::<bool>(),
    ) {
        let repo = build_repository(&shapes);
        let request = ExportRequest {
            all_fields,
            fields: if all_fields {
                Vec::new()
            } else {
                FIELD_POOL.iter().map(|name| (*name).to_string()).collect()
            },
            include_linked_ids,
            include_raw_html,
            include_name,
            include_referrers,
            ..Default::default()
        };
        let table = run_export(&repo, &request).expect("export");
        prop_assert_eq!(table.rows.len(), shapes.len());
        for row in &table.rows {
            prop_assert_eq!(row.len(), table.header.len());
        }
    }

    #[test]
    fn reruns_are_byte_identical(
        shapes in prop::collection::vec((any::<u8>(), any::<u8>()), 1..6),
        include_linked_ids in any::<bool>(),
    ) {
        let repo = build_repository(&shapes);
        let request = ExportRequest {
            all_fields: true,
            include_linked_ids,
            include_raw_html: true,
            ..Default::default()
        };
        let first = run_export(&repo, &request).expect("first run");
        let second = run_export(&repo, &request).expect("second run");
        prop_assert_eq!(first.header, second.header);
        prop_assert_eq!(first.rows, second.rows);
    }
}
