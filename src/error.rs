use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Result type for asset container operations
pub type Result<T> = std::result::Result<T, AssetError>;

/// Unified error type for all container operations
#[derive(Debug, Error)]
pub enum AssetError {
    // Lookup errors
    #[error("File not found: {0}")]
    NotFound(String),

    #[error("Failed to read {path}: {source}")]
    IoFailure {
        path: String,
        #[source]
        source: io::Error,
    },

    #[error("Path {path} escapes container base {base:?}")]
    PathEscape { path: String, base: PathBuf },

    // Archive errors
    #[error("Invalid archive header: {0}")]
    InvalidHeader(String),

    #[error("Truncated archive: {0}")]
    TruncatedArchive(String),

    #[error("Invalid archive format: {0}")]
    InvalidFormat(String),

    // Assembly errors
    #[error("Container base is not a directory: {0:?}")]
    InvalidBase(PathBuf),

    #[error("Cannot locate assets directory: {0}")]
    AssetsDirNotFound(String),

    #[error("File is not valid UTF-8: {0}")]
    InvalidUtf8(String),

    // I/O errors
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    // Serialization errors
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    #[error("TOML error: {0}")]
    TomlError(String),
}

impl AssetError {
    /// True for results that should make a layered lookup move on to the next layer
    /// without being reported as a failure.
    pub fn is_not_found(&self) -> bool {
        matches!(self, AssetError::NotFound(_) | AssetError::PathEscape { .. })
    }
}

impl From<toml::de::Error> for AssetError {
    fn from(err: toml::de::Error) -> Self {
        AssetError::TomlError(err.to_string())
    }
}

impl From<toml::ser::Error> for AssetError {
    fn from(err: toml::ser::Error) -> Self {
        AssetError::TomlError(err.to_string())
    }
}
