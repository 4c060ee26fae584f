use thiserror::Error;

#[derive(Debug, Error)]
pub enum RepoError {
    #[error("malformed query {query:?}: {reason}")]
    Query { query: String, reason: String },
}

impl RepoError {
    pub fn query(query: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::Query {
            query: query.into(),
            reason: reason.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, RepoError>;
