use thiserror::Error;

#[derive(Debug, Error)]
pub enum ModelError {
    #[error("invalid item id: {0:?}")]
    InvalidItemId(String),
    #[error("invalid template id: {0:?}")]
    InvalidTemplateId(String),
    #[error("invalid language name: {0:?}")]
    InvalidLanguage(String),
}

pub type Result<T> = std::result::Result<T, ModelError>;
