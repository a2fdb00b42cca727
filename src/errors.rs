use sea_orm::error::DbErr;

use crate::config::AppConfigError;

/// Errors raised while running one of the customer tools.
///
/// Reporting does not branch on the variant; every failure is rendered
/// through `Display` on the error stream.
#[derive(Debug, thiserror::Error)]
pub enum ToolError {
    #[error("Database error: {0}")]
    Database(#[from] DbErr),

    #[error(transparent)]
    Config(#[from] AppConfigError),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Package metadata error: {0}")]
    Metadata(String),
}

impl ToolError {
    pub fn metadata(msg: impl Into<String>) -> Self {
        ToolError::Metadata(msg.into())
    }
}
