use cex_model::{ContentItem, FieldValue, ItemId, Language, TemplateId};
use cex_repo::{ContentRepository, InMemoryRepository, RepoError, RepositorySnapshot};

fn item(id: &str, path: &str, language: &str, template: &str) -> ContentItem {
    ContentItem {
        id: ItemId::new(id).expect("id"),
        name: path.rsplit('/').next().unwrap_or_default().to_string(),
        path: path.to_string(),
        content_path: path.trim_start_matches("/sitecore").to_string(),
        template_id: TemplateId::new(format!("{{{template}-TPL}}")).expect("template id"),
        template_name: template.to_string(),
        language: Language::new(language).expect("language"),
        fields: vec![(
            "Title".to_string(),
            FieldValue::PlainText {
                value: format!("{template} title"),
            },
        )],
        created: None,
        created_by: String::new(),
        updated: None,
        updated_by: String::new(),
        never_publish: false,
        workflow: None,
        has_layout: false,
        version_count: 1,
    }
}

fn sample_repository() -> InMemoryRepository {
    let snapshot = RepositorySnapshot {
        default_root: Some("/sitecore/content".to_string()),
        languages: vec!["English".to_string(), "Danish".to_string()],
        templates: Vec::new(),
        items: vec![
            item("{A}", "/sitecore/content", "English", "Root"),
            item("{B}", "/sitecore/content/Home", "English", "Page"),
            item("{B}", "/sitecore/content/Home", "Danish", "Page"),
            item("{C}", "/sitecore/content/Home/News", "English", "Page"),
            item("{D}", "/sitecore/content/Home/News/First", "English", "Article"),
        ],
        referrers: [("{D}".to_string(), vec!["{B}".to_string()])]
            .into_iter()
            .collect(),
    };
    InMemoryRepository::new(snapshot)
}

#[test]
fn lookup_by_path_and_id_returns_current_language() {
    let repo = sample_repository();
    let by_path = repo.item_by_path("/sitecore/content/Home").expect("item");
    assert_eq!(by_path.language.as_str(), "English");
    let by_id = repo
        .item_by_id(&ItemId::new("{b}").expect("id"))
        .expect("item");
    assert_eq!(by_id.path, "/sitecore/content/Home");
}

#[test]
fn language_versions_resolve_separately() {
    let repo = sample_repository();
    let danish = repo
        .item_in_language(
            &ItemId::new("{B}").expect("id"),
            &Language::new("Danish").expect("language"),
        )
        .expect("danish version");
    assert_eq!(danish.language.as_str(), "Danish");
    assert!(
        repo.item_in_language(
            &ItemId::new("{B}").expect("id"),
            &Language::new("German").expect("language"),
        )
        .is_none()
    );
}

#[test]
fn descendants_exclude_self_and_span_all_depths() {
    let repo = sample_repository();
    let root = repo.item_by_path("/sitecore/content").expect("root");
    let paths: Vec<String> = repo
        .descendants(&root)
        .into_iter()
        .map(|item| item.path)
        .collect();
    assert_eq!(
        paths,
        vec![
            "/sitecore/content/Home",
            "/sitecore/content/Home/News",
            "/sitecore/content/Home/News/First",
        ]
    );
}

#[test]
fn query_descendants_and_children() {
    let repo = sample_repository();
    let all = repo
        .run_query("/sitecore/content/Home//*")
        .expect("descendant query");
    assert_eq!(all.len(), 2);
    let children = repo
        .run_query("/sitecore/content/Home/*")
        .expect("child query");
    assert_eq!(children.len(), 1);
    assert_eq!(children[0].path, "/sitecore/content/Home/News");
}

#[test]
fn query_by_template_name() {
    let repo = sample_repository();
    let articles = repo
        .run_query("//*[@@templatename='article']")
        .expect("template query");
    assert_eq!(articles.len(), 1);
    assert_eq!(articles[0].path, "/sitecore/content/Home/News/First");
}

#[test]
fn malformed_query_is_an_error_not_empty() {
    let repo = sample_repository();
    assert!(matches!(
        repo.run_query("not a query"),
        Err(RepoError::Query { .. })
    ));
    assert!(matches!(repo.run_query("   "), Err(RepoError::Query { .. })));
    assert!(matches!(
        repo.run_query("/sitecore/content[@broken]"),
        Err(RepoError::Query { .. })
    ));
}

#[test]
fn unknown_query_root_yields_empty_result() {
    let repo = sample_repository();
    let result = repo.run_query("/sitecore/missing//*").expect("query");
    assert!(result.is_empty());
}

#[test]
fn referrers_resolve_to_items() {
    let repo = sample_repository();
    let target = repo
        .item_by_path("/sitecore/content/Home/News/First")
        .expect("target");
    let referrers = repo.referrers(&target);
    assert_eq!(referrers.len(), 1);
    assert_eq!(referrers[0].path, "/sitecore/content/Home");
}
