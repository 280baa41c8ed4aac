//! `status` subcommand: read-only validation harness.
//!
//! Prints how the open folders resolve against Cursor's workspaceStorage
//! and what the state database says, without dispatching anything.

use std::path::PathBuf;

use sidebar_core::{
    locate_state_db, FolderCandidates, LocateOutcome, Sqlite3Query, StateQuery, STATE_KEY,
};

pub fn run(folders: &[String], storage_root: Option<PathBuf>) -> sidebar_core::Result<()> {
    let storage = crate::close::resolve_storage(storage_root)?;
    let folders = crate::close::resolve_folders(folders)?;

    println!("── Workspace ─────────────────────────────────────────────");
    println!("Storage root: {}", storage.root().display());
    for folder in &folders {
        println!("  folder: {}", folder.uri());
        if let Some(path) = folder.fs_path() {
            println!("          {}", path.display());
        }
    }
    println!();

    println!("── Resolution ────────────────────────────────────────────");
    let candidates = FolderCandidates::from_folders(&folders);
    match locate_state_db(&storage, &candidates) {
        LocateOutcome::Found(db) => {
            println!("State DB: {}", db.display());
            let query = Sqlite3Query::default();
            match query.fetch(&db) {
                Ok(raw) => {
                    let value = raw.trim();
                    let meaning = match value {
                        "true" => "sidebar hidden",
                        "false" => "sidebar visible",
                        _ => "unexpected value",
                    };
                    println!("  {} = {:?} ({})", STATE_KEY, value, meaning);
                }
                Err(err) => println!("  query failed: {}", err),
            }
        }
        LocateOutcome::MatchedWithoutDb(dir) => {
            println!("Matched {} but it has no state.vscdb", dir.display());
        }
        LocateOutcome::NoMatch => {
            println!("No workspaceStorage entry matches the open folders");
        }
        LocateOutcome::NoFolders => {
            println!("No open folders given");
        }
        LocateOutcome::RootUnreadable(reason) => {
            println!("Cannot read workspaceStorage: {}", reason);
        }
    }

    Ok(())
}
