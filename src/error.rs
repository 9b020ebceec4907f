use thiserror::Error;

/// Errors raised by the drawing surface
#[derive(Debug, Error)]
pub enum SurfaceError {
    #[error("Invalid canvas dimensions {width}x{height}")]
    InvalidDimensions { width: u32, height: u32 },

    #[error("Failed to encode image: {0}")]
    Encode(#[from] image::ImageError),
}

/// A submission rejected locally, before any network or storage call
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Missing title")]
    MissingTitle,

    #[error("Missing image data")]
    MissingImage,

    #[error("Artist name is required")]
    MissingArtistName,
}

/// Errors returned by the persistence gateway
#[derive(Debug, Error)]
pub enum SubmitError {
    #[error("Invalid submission: {0}")]
    Validation(#[from] ValidationError),

    #[error("Upload failed: {0}")]
    Upload(#[source] StoreError),
}

impl SubmitError {
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_))
    }
}

/// Errors from the gallery, profile and blob stores
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Record not found: {0}")]
    NotFound(String),

    #[error("Object already exists: {0}")]
    AlreadyExists(String),

    #[error("Unsupported URL: {0}")]
    UnsupportedUrl(String),

    #[error("Storage I/O failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to (de)serialize records: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Result type for store operations
pub type StoreResult<T> = Result<T, StoreError>;

/// Failures inside the critique client. Never surfaced past [`crate::critique::Critic`].
#[derive(Debug, Error)]
pub enum CritiqueError {
    #[error("Critique backend failed: {0}")]
    Backend(String),

    #[error("Malformed critique response: {0}")]
    Malformed(#[from] serde_json::Error),

    #[error("Critique service returned no text")]
    EmptyResponse,
}

/// Errors loading configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Read(#[from] std::io::Error),

    #[error("Invalid config file: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Errors loading or saving the application session
#[derive(Debug, Error)]
pub enum SessionError {
    #[error("Failed to access session file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid session data: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Errors starting the desktop application
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Failed to open the gallery: {0}")]
    Store(#[from] StoreError),

    #[error("Failed to restore the session: {0}")]
    Session(#[from] SessionError),

    #[error("Failed to create the drawing surface: {0}")]
    Surface(#[from] SurfaceError),
}
