use buildmatch_core::error::CoreError;

/// Persistence-layer error.
///
/// Deserialization failures during loading never surface to callers --
/// the load pipeline degrades through its fallback sources instead. Write
/// failures do surface, as [`CoreError::Internal`].
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("Storage I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialize(#[from] serde_json::Error),
}

impl From<StoreError> for CoreError {
    fn from(err: StoreError) -> Self {
        Self::Internal(err.to_string())
    }
}
