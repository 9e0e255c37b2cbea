//! Error types for skulabel
//!
//! All modules use `LabelResult<T>` as their return type.

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for skulabel operations
pub type LabelResult<T> = Result<T, LabelError>;

/// All errors that can occur in skulabel
#[derive(Error, Debug)]
pub enum LabelError {
    // Request errors
    #[error("SKU not found: {0}")]
    LookupMiss(String),

    #[error("Please enter a valid SKU")]
    InvalidSku,

    // Rendering errors
    #[error("Barcode rendering failed for {sku}: {reason}")]
    Rendering { sku: String, reason: String },

    #[error("Barcode image missing after write: {0}")]
    ImageMissing(PathBuf),

    #[error("Image error: {0}")]
    Image(#[from] image::ImageError),

    // Startup resources
    #[error("Required {what} not found: {path}")]
    ResourceMissing { what: &'static str, path: PathBuf },

    #[error("Failed to read reference table {path}: {reason}")]
    TableRead { path: PathBuf, reason: String },

    #[error("Failed to load font {path}: {reason}")]
    FontInvalid { path: PathBuf, reason: String },

    // Configuration errors
    #[error("Invalid configuration at {path}: {reason}")]
    ConfigInvalid { path: PathBuf, reason: String },

    #[error("Failed to create config directory {path}: {source}")]
    ConfigDirCreate {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    // IO errors
    #[error("IO error: {context}")]
    Io {
        context: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Command failed: {command}")]
    CommandFailed {
        command: String,
        #[source]
        source: std::io::Error,
    },

    // Serialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("TOML serialize error: {0}")]
    TomlSerialize(#[from] toml::ser::Error),

    // General errors
    #[error("{0}")]
    User(String),
}

impl LabelError {
    /// Create an IO error with context
    pub fn io(context: impl Into<String>, source: std::io::Error) -> Self {
        Self::Io {
            context: context.into(),
            source,
        }
    }

    /// Create a rendering error for a SKU
    pub fn rendering(sku: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::Rendering {
            sku: sku.into(),
            reason: reason.into(),
        }
    }

    /// Create a command failed error
    pub fn command_failed(command: impl Into<String>, source: std::io::Error) -> Self {
        Self::CommandFailed {
            command: command.into(),
            source,
        }
    }

    /// Whether the error must stop the process rather than the current request
    pub fn is_fatal(&self) -> bool {
        matches!(
            self,
            Self::ResourceMissing { .. }
                | Self::TableRead { .. }
                | Self::FontInvalid { .. }
                | Self::ConfigInvalid { .. }
                | Self::ConfigDirCreate { .. }
        )
    }

    /// Get actionable hint for the error
    pub fn hint(&self) -> Option<&'static str> {
        match self {
            Self::LookupMiss(_) => Some("Check the SKU against the reference table and try again"),
            Self::ResourceMissing { what: "reference table", .. } => {
                Some("Set table.path in the config or pass --table <FILE>")
            }
            Self::ResourceMissing { what: "font", .. } => {
                Some("Set barcode.font to an existing .ttf file or remove it to hide the caption")
            }
            Self::ResourceMissing { what: "cache directory", .. } => {
                Some("Set cache.dir to a writable directory or pass --cache-dir <DIR>")
            }
            Self::ConfigInvalid { .. } => Some("Run: skulabel config init --force"),
            _ => None,
        }
    }
}
