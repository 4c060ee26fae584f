#![deny(unsafe_code)]

use crate::TemplateId;

/// A template definition: a name plus the ordered list of base templates it
/// derives from. The base-template edges form a directed graph that may
/// contain cycles in malformed data; consumers must not follow the edges
/// recursively.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct TemplateNode {
    pub id: TemplateId,
    pub name: String,
    #[serde(default)]
    pub base_templates: Vec<TemplateId>,
}

impl TemplateNode {
    /// Matches a user-supplied token against this template by case-folded
    /// name or brace-insensitive id.
    pub fn matches_token(&self, token: &str) -> bool {
        self.name.eq_ignore_ascii_case(token.trim()) || self.id.matches_token(token)
    }

    pub fn derives_from(&self, id: &TemplateId) -> bool {
        self.base_templates.iter().any(|base| base.same_template(id))
    }
}
