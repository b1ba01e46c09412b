use thiserror::Error;

#[derive(Debug, Error)]
pub enum ResourceError {
    // Construction Errors
    #[error("Invalid mime type: {0}")]
    InvalidMimeType(String),

    #[error("Either name or uri must be provided")]
    MissingIdentity,

    #[error("A name is required for anonymous producer functions")]
    NameRequired,

    #[error("Invalid uri template: {0}")]
    InvalidTemplate(String),

    // Creation Errors
    #[error("Error creating resource from template: {0}")]
    Creation(String),

    // Lookup Errors
    #[error("Resource not found: {0}")]
    NotFound(String),
}

// Result type alias for convenience
pub type ResourceResult<T> = Result<T, ResourceError>;

// For compatibility with producer functions that return anyhow::Error
impl From<anyhow::Error> for ResourceError {
    fn from(err: anyhow::Error) -> Self {
        // Alternate formatting keeps the full cause chain in the message.
        ResourceError::Creation(format!("{err:#}"))
    }
}
