//! Workspace state locator.
//!
//! Scans the `workspaceStorage` root for the entry whose descriptor
//! references one of the open folders, and reports where (or whether) that
//! workspace's state database lives. Every failure mode is a tagged outcome
//! rather than an error; the engine decides what to log and do.

use std::path::{Path, PathBuf};

use fs_err as fs;
use serde::Deserialize;

use crate::storage::{descriptor_file, state_db_file, StorageConfig};
use crate::workspace::FolderCandidates;

/// Shape of a `workspace.json` descriptor. Single-folder workspaces carry a
/// `folder` field; multi-root and untitled workspaces carry other fields
/// and never match.
#[derive(Debug, Deserialize)]
struct WorkspaceDescriptor {
    folder: Option<String>,
}

/// Terminal outcome of a locate pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LocateOutcome {
    /// Matched entry with an existing state database.
    Found(PathBuf),
    /// Matched entry, but no `state.vscdb` inside it. Nothing to check.
    MatchedWithoutDb(PathBuf),
    /// No entry's descriptor referenced any open folder.
    NoMatch,
    /// The invoker reported no open folders; nothing to match against.
    NoFolders,
    /// The storage root itself could not be enumerated.
    RootUnreadable(String),
}

/// Finds the state database for the first storage entry whose descriptor
/// matches one of the open folders.
///
/// "First" is directory enumeration order. If Cursor ever leaves two
/// entries pointing at the same folder (e.g. after a rename), whichever
/// `read_dir` yields first wins; a match without a database still ends the
/// search.
pub fn locate_state_db(
    storage: &StorageConfig,
    candidates: &FolderCandidates,
) -> LocateOutcome {
    if candidates.is_empty() {
        return LocateOutcome::NoFolders;
    }

    let entries = match fs::read_dir(storage.root()) {
        Ok(entries) => entries,
        Err(err) => return LocateOutcome::RootUnreadable(err.to_string()),
    };

    for entry in entries.flatten() {
        let dir = entry.path();
        if !dir.is_dir() {
            continue;
        }

        let Some(reference) = read_folder_reference(&dir) else {
            continue;
        };
        if !candidates.matches_reference(&reference) {
            continue;
        }

        let db = state_db_file(&dir);
        if db.is_file() {
            return LocateOutcome::Found(db);
        }
        return LocateOutcome::MatchedWithoutDb(dir);
    }

    LocateOutcome::NoMatch
}

/// Reads an entry's folder reference. Unreadable files, invalid JSON, and a
/// missing or wrong-typed `folder` field all yield `None` - most entries
/// belong to unrelated workspaces and are skipped without comment.
fn read_folder_reference(dir: &Path) -> Option<String> {
    let raw = fs::read_to_string(descriptor_file(dir)).ok()?;
    let descriptor: WorkspaceDescriptor = serde_json::from_str(&raw).ok()?;
    descriptor.folder
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::workspace::OpenFolder;
    use tempfile::TempDir;

    fn storage_with_entries(entries: &[(&str, Option<&str>, bool)]) -> (TempDir, StorageConfig) {
        let temp = TempDir::new().unwrap();
        for (id, descriptor, with_db) in entries {
            let dir = temp.path().join(id);
            std::fs::create_dir(&dir).unwrap();
            if let Some(contents) = descriptor {
                std::fs::write(dir.join("workspace.json"), contents).unwrap();
            }
            if *with_db {
                std::fs::write(dir.join("state.vscdb"), b"").unwrap();
            }
        }
        let config = StorageConfig::with_root(temp.path().to_path_buf());
        (temp, config)
    }

    fn candidates_for(path: &str) -> FolderCandidates {
        FolderCandidates::from_folders(&[OpenFolder::from_fs_path(path)])
    }

    #[test]
    fn test_no_folders_short_circuits() {
        let (_temp, storage) = storage_with_entries(&[]);
        let candidates = FolderCandidates::from_folders(&[]);
        assert_eq!(
            locate_state_db(&storage, &candidates),
            LocateOutcome::NoFolders
        );
    }

    #[test]
    fn test_unreadable_root_is_tagged() {
        let storage = StorageConfig::with_root(PathBuf::from("/nonexistent/workspaceStorage"));
        let outcome = locate_state_db(&storage, &candidates_for("/home/u/proj"));
        assert!(matches!(outcome, LocateOutcome::RootUnreadable(_)));
    }

    #[test]
    fn test_matching_entry_with_db_is_found() {
        let (temp, storage) = storage_with_entries(&[
            ("aaa", Some(r#"{"folder":"file:///home/u/other"}"#), true),
            ("bbb", Some(r#"{"folder":"file:///home/u/proj"}"#), true),
            ("ccc", Some(r#"{"folder":"file:///home/u/else"}"#), true),
        ]);
        assert_eq!(
            locate_state_db(&storage, &candidates_for("/home/u/proj")),
            LocateOutcome::Found(temp.path().join("bbb").join("state.vscdb"))
        );
    }

    #[test]
    fn test_match_without_db_stops_enumeration() {
        let (temp, storage) = storage_with_entries(&[(
            "abc",
            Some(r#"{"folder":"file:///home/u/proj"}"#),
            false,
        )]);
        assert_eq!(
            locate_state_db(&storage, &candidates_for("/home/u/proj")),
            LocateOutcome::MatchedWithoutDb(temp.path().join("abc"))
        );
    }

    #[test]
    fn test_no_descriptor_matches() {
        let (_temp, storage) = storage_with_entries(&[
            ("aaa", Some(r#"{"folder":"file:///home/u/other"}"#), true),
            ("bbb", None, true),
        ]);
        assert_eq!(
            locate_state_db(&storage, &candidates_for("/home/u/proj")),
            LocateOutcome::NoMatch
        );
    }

    #[test]
    fn test_malformed_descriptors_are_skipped() {
        let (temp, storage) = storage_with_entries(&[
            ("aaa", Some("not json at all"), true),
            ("bbb", Some(r#"{"folder": 42}"#), true),
            ("ccc", Some(r#"{"workspace":"multi-root.code-workspace"}"#), true),
            ("ddd", Some(r#"{"folder":"file:///home/u/proj"}"#), true),
        ]);
        assert_eq!(
            locate_state_db(&storage, &candidates_for("/home/u/proj")),
            LocateOutcome::Found(temp.path().join("ddd").join("state.vscdb"))
        );
    }

    #[test]
    fn test_trailing_slash_in_descriptor_matches() {
        let (temp, storage) = storage_with_entries(&[(
            "abc",
            Some(r#"{"folder":"file:///home/u/proj/"}"#),
            true,
        )]);
        assert_eq!(
            locate_state_db(&storage, &candidates_for("/home/u/proj")),
            LocateOutcome::Found(temp.path().join("abc").join("state.vscdb"))
        );
    }

    #[test]
    fn test_encoded_descriptor_matches_via_fs_path() {
        let (temp, storage) = storage_with_entries(&[(
            "abc",
            Some(r#"{"folder":"file:///home/u/my%20proj"}"#),
            true,
        )]);
        assert_eq!(
            locate_state_db(&storage, &candidates_for("/home/u/my proj")),
            LocateOutcome::Found(temp.path().join("abc").join("state.vscdb"))
        );
    }

    #[test]
    fn test_loose_files_in_root_are_ignored() {
        let temp = TempDir::new().unwrap();
        std::fs::write(temp.path().join("stray.json"), "{}").unwrap();
        let storage = StorageConfig::with_root(temp.path().to_path_buf());
        assert_eq!(
            locate_state_db(&storage, &candidates_for("/home/u/proj")),
            LocateOutcome::NoMatch
        );
    }
}
