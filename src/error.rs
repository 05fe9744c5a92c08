use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid yaml config: {0}")]
    Yaml(#[from] serde_yaml::Error),
    #[error("invalid json config: {0}")]
    Json(#[from] serde_json::Error),
}

/// Failure of a caller-supplied search.
///
/// `Aborted` is produced by searches that observed their cancellation token
/// and is never surfaced to callers.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SearchError {
    #[error("search aborted")]
    Aborted,
    #[error("search failed: {0}")]
    Failed(String),
    #[error("search worker disconnected")]
    Disconnected,
}

impl SearchError {
    pub fn failed(message: impl Into<String>) -> Self {
        Self::Failed(message.into())
    }

    pub fn is_abort(&self) -> bool {
        matches!(self, Self::Aborted)
    }
}
