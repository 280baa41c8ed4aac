//! Workspace folder identity.
//!
//! A storage entry's descriptor names a folder by URI; the invoker reports
//! open folders as paths or URIs. Matching works over three candidate forms
//! per open folder: the URI string as given, the URI with trailing slashes
//! stripped, and (for `file:` folders) the normalized absolute filesystem
//! path. The filesystem-path form is what lets two differently-encoded URIs
//! for the same directory match.

use std::collections::BTreeSet;
use std::path::{Component, Path, PathBuf};

use url::Url;

use crate::error::{Result, SidebarError};

/// One folder the invoker reports as open.
///
/// Candidates are derived at construction and never mutated; a fresh set is
/// built per invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OpenFolder {
    uri: String,
    fs_path: Option<PathBuf>,
}

impl OpenFolder {
    /// Builds a folder identity from a local filesystem path.
    /// Relative paths are resolved against the current directory.
    pub fn from_fs_path(path: impl AsRef<Path>) -> Self {
        let normalized = normalize_fs_path(path.as_ref());
        let uri = Url::from_file_path(&normalized)
            .map(|url| url.to_string())
            .unwrap_or_else(|_| format!("file://{}", normalized.display()));
        Self {
            uri,
            fs_path: Some(normalized),
        }
    }

    /// Builds a folder identity from a URI string.
    /// `file:` URIs also contribute their decoded filesystem path.
    pub fn from_uri(uri: &str) -> Result<Self> {
        let parsed = Url::parse(uri).map_err(|err| SidebarError::InvalidFolder {
            reference: uri.to_string(),
            reason: err.to_string(),
        })?;
        let fs_path = if parsed.scheme() == "file" {
            parsed.to_file_path().ok().map(|path| normalize_fs_path(&path))
        } else {
            None
        };
        Ok(Self {
            uri: uri.to_string(),
            fs_path,
        })
    }

    pub fn uri(&self) -> &str {
        &self.uri
    }

    pub fn fs_path(&self) -> Option<&Path> {
        self.fs_path.as_deref()
    }
}

/// Membership sets derived from the open folders.
#[derive(Debug, Default)]
pub struct FolderCandidates {
    uris: BTreeSet<String>,
    fs_paths: BTreeSet<PathBuf>,
}

impl FolderCandidates {
    pub fn from_folders(folders: &[OpenFolder]) -> Self {
        let mut candidates = Self::default();
        for folder in folders {
            candidates
                .uris
                .insert(trim_trailing_slashes(folder.uri()).to_string());
            if let Some(path) = folder.fs_path() {
                candidates.fs_paths.insert(path.to_path_buf());
            }
        }
        candidates
    }

    pub fn is_empty(&self) -> bool {
        self.uris.is_empty() && self.fs_paths.is_empty()
    }

    /// True when a descriptor's folder reference resolves to one of the
    /// open folders: either its trimmed URI string is a known candidate, or
    /// it is a `file:` URI whose decoded, normalized path is.
    pub fn matches_reference(&self, reference: &str) -> bool {
        if self.uris.contains(trim_trailing_slashes(reference)) {
            return true;
        }

        // Malformed references never match; most entries belong to other
        // workspaces anyway.
        if let Ok(parsed) = Url::parse(reference) {
            if parsed.scheme() == "file" {
                if let Ok(path) = parsed.to_file_path() {
                    return self.fs_paths.contains(&normalize_fs_path(&path));
                }
            }
        }

        false
    }
}

pub(crate) fn trim_trailing_slashes(value: &str) -> &str {
    value.trim_end_matches('/')
}

/// Makes a path absolute and collapses `.`/`..` lexically, without touching
/// the filesystem. Symlinks are deliberately not resolved; the descriptor
/// URIs Cursor writes are not canonicalized either.
pub(crate) fn normalize_fs_path(path: &Path) -> PathBuf {
    let absolute = if path.is_absolute() {
        path.to_path_buf()
    } else {
        std::env::current_dir()
            .unwrap_or_else(|_| PathBuf::from("/"))
            .join(path)
    };

    let mut normalized = PathBuf::new();
    for component in absolute.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                normalized.pop();
            }
            other => normalized.push(other.as_os_str()),
        }
    }
    normalized
}
