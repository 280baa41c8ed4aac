//! `close` subcommand: one locate-check-close pass.

use std::path::PathBuf;

use sidebar_core::{
    close_if_visible, OpenFolder, OpenUrlHost, SidebarError, SidebarHost, Sqlite3Query,
    StorageConfig,
};

/// Stand-in host for `--dry-run`: reports success without dispatching.
struct DryRunHost;

impl SidebarHost for DryRunHost {
    fn close_sidebar(&self) -> Result<(), String> {
        tracing::info!("Dry run: close command not dispatched");
        Ok(())
    }
}

pub fn run(
    folders: &[String],
    storage_root: Option<PathBuf>,
    dry_run: bool,
) -> sidebar_core::Result<()> {
    let storage = resolve_storage(storage_root)?;
    let folders = resolve_folders(folders)?;
    let query = Sqlite3Query::default();

    let outcome = if dry_run {
        close_if_visible(&storage, &folders, &query, &DryRunHost)
    } else {
        close_if_visible(&storage, &folders, &query, &OpenUrlHost)
    };
    tracing::debug!(?outcome, "close finished");

    Ok(())
}

pub(crate) fn resolve_storage(storage_root: Option<PathBuf>) -> sidebar_core::Result<StorageConfig> {
    match storage_root {
        Some(root) => Ok(StorageConfig::with_root(root)),
        None => StorageConfig::locate(),
    }
}

/// Turns CLI folder arguments into folder identities. Anything with a
/// scheme separator is treated as a URI, everything else as a path. With no
/// arguments the current directory stands in for the host's open folder.
pub(crate) fn resolve_folders(raw: &[String]) -> sidebar_core::Result<Vec<OpenFolder>> {
    if raw.is_empty() {
        let cwd = std::env::current_dir().map_err(|source| SidebarError::Io {
            context: "Resolving current directory".to_string(),
            source,
        })?;
        return Ok(vec![OpenFolder::from_fs_path(cwd)]);
    }

    raw.iter()
        .map(|value| {
            if value.contains("://") {
                OpenFolder::from_uri(value)
            } else {
                Ok(OpenFolder::from_fs_path(value))
            }
        })
        .collect()
}
