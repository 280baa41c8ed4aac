//! Command orchestration.
//!
//! Walks the whole chain for one invocation: locate the workspace's state
//! database, read the sidebar flag, dispatch the close command when - and
//! only when - the stored flag is exactly `"false"` (sidebar visible). A
//! hidden sidebar and an unknowable state are treated identically: do
//! nothing. The function is total; every path logs one line and returns a
//! named outcome.

use tracing::{info, warn};

use crate::checker::{sidebar_hidden, SidebarFlag, StateQuery};
use crate::host::SidebarHost;
use crate::locator::{locate_state_db, LocateOutcome};
use crate::storage::StorageConfig;
use crate::workspace::{FolderCandidates, OpenFolder};

/// Terminal state of one invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CloseOutcome {
    /// Sidebar was visible; close command dispatched.
    Closed,
    /// Stored flag said the sidebar is already hidden.
    AlreadyHidden,
    /// Query failed or returned something other than the two literals.
    StateUnknown,
    /// Workspace matched but has no state database.
    NoDatabase,
    /// No storage entry references any open folder.
    NoMatch,
    /// Invoker reported no open folders.
    NoFolders,
    /// workspaceStorage root could not be enumerated.
    StorageUnreadable,
    /// Sidebar was visible but the host dispatch failed.
    CloseFailed,
}

/// Runs one locate-check-close pass. Candidate sets are rebuilt fresh on
/// every call; nothing persists between invocations.
pub fn close_if_visible(
    storage: &StorageConfig,
    folders: &[OpenFolder],
    query: &dyn StateQuery,
    host: &dyn SidebarHost,
) -> CloseOutcome {
    let candidates = FolderCandidates::from_folders(folders);

    let db_path = match locate_state_db(storage, &candidates) {
        LocateOutcome::Found(path) => {
            info!(db = %path.display(), "Using state DB");
            path
        }
        LocateOutcome::MatchedWithoutDb(dir) => {
            info!(dir = %dir.display(), "Matched workspace without state DB");
            return CloseOutcome::NoDatabase;
        }
        LocateOutcome::NoMatch => {
            info!("No matching workspaceStorage entry for the open folders");
            return CloseOutcome::NoMatch;
        }
        LocateOutcome::NoFolders => {
            info!("No open folders; skipping");
            return CloseOutcome::NoFolders;
        }
        LocateOutcome::RootUnreadable(reason) => {
            warn!(root = %storage.root().display(), error = %reason, "Failed to read workspaceStorage");
            return CloseOutcome::StorageUnreadable;
        }
    };

    match sidebar_hidden(query, &db_path) {
        Some(SidebarFlag::Visible) => match host.close_sidebar() {
            Ok(()) => {
                info!("Sidebar was visible; close command dispatched");
                CloseOutcome::Closed
            }
            Err(err) => {
                warn!(error = %err, "Close command dispatch failed");
                CloseOutcome::CloseFailed
            }
        },
        Some(SidebarFlag::Hidden) => {
            info!("Sidebar already hidden; no-op");
            CloseOutcome::AlreadyHidden
        }
        None => {
            info!("Sidebar state unknown; no-op");
            CloseOutcome::StateUnknown
        }
    }
}
