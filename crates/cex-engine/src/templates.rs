//! Template filter construction and inheritance expansion.
//!
//! Tokens name templates by display name (case-insensitive) or by id
//! (brace/hyphen-insensitive). Inheritance expansion is a *single* pass over
//! the full template list that adds direct inheritors of each matched
//! template; it never follows base-template edges recursively, which also
//! makes it immune to cycles in malformed template graphs.

use tracing::debug;

use cex_model::{ContentItem, TemplateNode};

/// The resolved set of template tokens an item must match.
#[derive(Debug, Clone)]
pub struct TemplateFilter {
    tokens: Vec<String>,
}

impl TemplateFilter {
    /// Build a filter from the request's raw token list.
    ///
    /// With `expand_inheritance`, every template whose base list contains a
    /// matched template id is added (by id token). Already-present tokens are
    /// not duplicated, so expanding an already-closed set is a no-op.
    pub fn new(raw_tokens: &[String], templates: &[TemplateNode], expand_inheritance: bool) -> Self {
        let mut tokens: Vec<String> = raw_tokens
            .iter()
            .map(|token| token.trim().to_lowercase())
            .filter(|token| !token.is_empty())
            .collect();

        if expand_inheritance {
            let inheritors = direct_inheritors(&tokens, templates);
            for inheritor in inheritors {
                if !tokens.iter().any(|token| same_token(token, &inheritor)) {
                    tokens.push(inheritor);
                }
            }
        }

        debug!(tokens = tokens.len(), "resolved template filter");
        Self { tokens }
    }

    /// An empty filter passes every item.
    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    pub fn tokens(&self) -> &[String] {
        &self.tokens
    }

    /// Matches by case-folded template name or brace-insensitive template id.
    pub fn matches(&self, item: &ContentItem) -> bool {
        if self.tokens.is_empty() {
            return true;
        }
        self.tokens.iter().any(|token| token_matches(token, item))
    }
}

/// Whether a single resolved token matches an item's template, by
/// case-folded name or brace-insensitive id.
pub fn token_matches(token: &str, item: &ContentItem) -> bool {
    item.template_name.eq_ignore_ascii_case(token) || item.template_id.matches_token(token)
}

/// One expansion pass: ids of templates that directly derive from any
/// template matched by `tokens`.
fn direct_inheritors(tokens: &[String], templates: &[TemplateNode]) -> Vec<String> {
    let mut inheritors = Vec::new();
    for token in tokens {
        let Some(matched) = templates.iter().find(|node| node.matches_token(token)) else {
            continue;
        };
        for node in templates {
            if node.derives_from(&matched.id) {
                inheritors.push(node.id.as_str().to_lowercase());
            }
        }
    }
    inheritors
}

fn same_token(a: &str, b: &str) -> bool {
    let strip = |s: &str| {
        s.chars()
            .filter(|c| !matches!(c, '{' | '}' | '-'))
            .flat_map(char::to_lowercase)
            .collect::<String>()
    };
    strip(a) == strip(b)
}
