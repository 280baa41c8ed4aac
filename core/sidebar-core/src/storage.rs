//! Storage path configuration for Cursor's workspace storage.
//!
//! Cursor keeps one directory per previously-opened workspace under its
//! `workspaceStorage` root. Each entry holds a `workspace.json` descriptor
//! naming the folder it belongs to and, usually, a `state.vscdb` key-value
//! database. All of it is Cursor's data - this crate only ever reads it.
//!
//! ## Design Principles
//!
//! - **Single source of truth**: All path decisions centralized here
//! - **Testable**: `StorageConfig::with_root()` enables test injection

use std::path::{Path, PathBuf};

use crate::error::{Result, SidebarError};

/// Descriptor file inside each storage entry: `{"folder": "<uri>"}`.
pub const DESCRIPTOR_FILE: &str = "workspace.json";

/// Per-workspace key-value database inside each storage entry.
pub const STATE_DB_FILE: &str = "state.vscdb";

/// Location of Cursor's per-workspace storage.
///
/// Production code uses [`StorageConfig::locate()`], which points at
/// `~/Library/Application Support/Cursor/User/workspaceStorage`. Tests use
/// [`StorageConfig::with_root()`] for isolation.
#[derive(Debug, Clone)]
pub struct StorageConfig {
    root: PathBuf,
}

impl StorageConfig {
    /// Resolves the default storage root under the user's home directory.
    ///
    /// The layout is macOS-specific; Cursor is the only host this tool
    /// targets.
    pub fn locate() -> Result<Self> {
        let home = dirs::home_dir().ok_or(SidebarError::HomeDirNotFound)?;
        Ok(Self {
            root: home
                .join("Library")
                .join("Application Support")
                .join("Cursor")
                .join("User")
                .join("workspaceStorage"),
        })
    }

    /// Creates a StorageConfig with a custom root directory.
    /// Used for testing with temp directories and for CLI overrides.
    pub fn with_root(root: PathBuf) -> Self {
        Self { root }
    }

    /// Returns the workspaceStorage root directory.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Path to a single storage entry's directory.
    pub fn entry_dir(&self, id: &str) -> PathBuf {
        self.root.join(id)
    }
}

/// Path to the `workspace.json` descriptor inside a storage entry.
pub fn descriptor_file(entry_dir: &Path) -> PathBuf {
    entry_dir.join(DESCRIPTOR_FILE)
}

/// Path to the `state.vscdb` database inside a storage entry.
pub fn state_db_file(entry_dir: &Path) -> PathBuf {
    entry_dir.join(STATE_DB_FILE)
}
