//! # sidebar-core
//!
//! Core library for cursor-sidebar: resolves the Cursor editor's
//! per-workspace state database and decides whether its unified sidebar
//! needs closing.
//!
//! ## Design Principles
//!
//! - **Synchronous**: No async runtime dependency. The whole flow is one
//!   linear chain of filesystem reads plus a single bounded process call.
//! - **Read-only toward Cursor**: `workspaceStorage` and `state.vscdb` are
//!   Cursor's data. We never write to them.
//! - **Graceful degradation**: Every failure along the chain becomes a
//!   logged no-op, never a user-visible error.
//! - **Host surfaces are traits**: The state query ([`StateQuery`]) and the
//!   close dispatch ([`SidebarHost`]) are injected, so the flow is testable
//!   without a running editor or a `sqlite3` binary.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use sidebar_core::{close_if_visible, OpenFolder, OpenUrlHost, Sqlite3Query, StorageConfig};
//!
//! let storage = StorageConfig::locate()?;
//! let folders = vec![OpenFolder::from_fs_path("/Users/me/Code/my-project")];
//! let outcome = close_if_visible(&storage, &folders, &Sqlite3Query::default(), &OpenUrlHost);
//! ```

// Public modules
pub mod checker;
pub mod engine;
pub mod error;
pub mod host;
pub mod locator;
pub mod storage;
pub mod workspace;

// Re-export commonly used items at crate root
pub use checker::{sidebar_hidden, QueryError, SidebarFlag, Sqlite3Query, StateQuery, STATE_KEY};
pub use engine::{close_if_visible, CloseOutcome};
pub use error::{Result, SidebarError};
pub use host::{OpenUrlHost, SidebarHost, CLOSE_SIDEBAR_COMMAND};
pub use locator::{locate_state_db, LocateOutcome};
pub use storage::StorageConfig;
pub use workspace::{FolderCandidates, OpenFolder};
