/// Errors from the document store layer.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// A database error from sqlx.
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// A record could not be converted to or from its typed model.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// The caller passed a body that cannot be stored.
    #[error("Invalid document: {0}")]
    InvalidDocument(String),
}
