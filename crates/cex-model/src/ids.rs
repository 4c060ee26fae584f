#![deny(unsafe_code)]

use std::fmt;

use crate::ModelError;

/// Strips braces and hyphens and case-folds, so `{0DE95AE4-41AB-4D01-9EB0-67441B7C2450}`
/// compares equal to `0de95ae441ab4d019eb067441b7c2450`.
pub(crate) fn normalize_id(value: &str) -> String {
    value
        .chars()
        .filter(|c| !matches!(c, '{' | '}' | '-'))
        .flat_map(char::to_lowercase)
        .collect()
}

#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize)]
pub struct ItemId(String);

impl ItemId {
    pub fn new(value: impl Into<String>) -> Result<Self, ModelError> {
        let value = value.into();
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return Err(ModelError::InvalidItemId(value));
        }
        Ok(Self(trimmed.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Brace-, hyphen- and case-insensitive comparison against an arbitrary token.
    pub fn matches_token(&self, token: &str) -> bool {
        normalize_id(&self.0) == normalize_id(token)
    }

    /// Canonical lookup key: braces and hyphens stripped, case-folded.
    pub fn normalized(&self) -> String {
        normalize_id(&self.0)
    }
}

impl fmt::Display for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize)]
pub struct TemplateId(String);

impl TemplateId {
    pub fn new(value: impl Into<String>) -> Result<Self, ModelError> {
        let value = value.into();
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return Err(ModelError::InvalidTemplateId(value));
        }
        Ok(Self(trimmed.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn matches_token(&self, token: &str) -> bool {
        normalize_id(&self.0) == normalize_id(token)
    }

    /// Equality ignoring braces, hyphens and case.
    pub fn same_template(&self, other: &TemplateId) -> bool {
        normalize_id(&self.0) == normalize_id(&other.0)
    }
}

impl fmt::Display for TemplateId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A repository language, identified by its display name (e.g. "English").
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize)]
pub struct Language(String);

impl Language {
    pub fn new(value: impl Into<String>) -> Result<Self, ModelError> {
        let value = value.into();
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return Err(ModelError::InvalidLanguage(value));
        }
        Ok(Self(trimmed.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
