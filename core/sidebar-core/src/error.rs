//! Error types for sidebar-core operations.
//!
//! The core resolution flow itself never fails - every outcome is a tagged
//! variant handled by the engine. These errors cover the edges where the
//! caller supplies bad input or the environment is unusable.

#[derive(Debug, thiserror::Error)]
pub enum SidebarError {
    #[error("Home directory not found")]
    HomeDirNotFound,

    #[error("Invalid folder reference: {reference}: {reason}")]
    InvalidFolder { reference: String, reason: String },

    #[error("I/O error: {context}: {source}")]
    Io {
        context: String,
        #[source]
        source: std::io::Error,
    },
}

/// Convenience type alias for Results using SidebarError.
pub type Result<T> = std::result::Result<T, SidebarError>;
