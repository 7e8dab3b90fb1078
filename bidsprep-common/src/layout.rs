//! Dataset layout resolution
//!
//! A dataset root holds one `sub-*` directory per subject, each holding one
//! `ses-*` directory per session. Sessions are either requested explicitly
//! (missing ones are reported and skipped) or discovered in lexicographic
//! order so repeated runs visit them identically.

use crate::ids::{SessionId, SubjectId, SESSION_PREFIX};
use crate::Result;
use std::io;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};
use walkdir::WalkDir;

/// A resolved session directory
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionDir {
    /// Canonical session identifier (directory name)
    pub id: SessionId,
    /// `<root>/<subject>/<session>`
    pub path: PathBuf,
}

impl SessionDir {
    /// `<session>/fmap`
    pub fn fmap_dir(&self) -> PathBuf {
        self.path.join("fmap")
    }

    /// `<session>/func`
    pub fn func_dir(&self) -> PathBuf {
        self.path.join("func")
    }
}

/// Resolve `<root>/<subject>`, reporting it when absent
pub fn subject_dir(root: &Path, subject: &SubjectId) -> Option<PathBuf> {
    let path = root.join(subject.as_str());
    if path.is_dir() {
        Some(path)
    } else {
        warn!("Directory not found: {}", path.display());
        None
    }
}

/// Produce the ordered session directories to process for one subject
///
/// With an explicit `filter`, sessions are returned in the requested order and
/// any that do not exist are reported and skipped. Without one, every `ses-*`
/// subdirectory is returned sorted by name.
pub fn resolve_sessions(
    subject_dir: &Path,
    filter: Option<&[SessionId]>,
) -> Result<Vec<SessionDir>> {
    match filter {
        Some(requested) if !requested.is_empty() => Ok(requested
            .iter()
            .filter_map(|id| {
                let path = subject_dir.join(id.as_str());
                if path.is_dir() {
                    Some(SessionDir { id: id.clone(), path })
                } else {
                    warn!("Session directory not found: {}", path.display());
                    None
                }
            })
            .collect()),
        _ => discover_sessions(subject_dir),
    }
}

fn discover_sessions(subject_dir: &Path) -> Result<Vec<SessionDir>> {
    let mut sessions = Vec::new();
    for entry in list_dir(subject_dir) {
        let entry = entry.map_err(io::Error::from)?;
        let Some(name) = entry.file_name().to_str() else {
            debug!("Skipping non UTF-8 entry in {}", subject_dir.display());
            continue;
        };
        if name.starts_with(SESSION_PREFIX) && entry.path().is_dir() {
            sessions.push(SessionDir {
                id: SessionId::new(name),
                path: entry.path().to_path_buf(),
            });
        }
    }
    debug!(
        "Discovered {} session(s) under {}",
        sessions.len(),
        subject_dir.display()
    );
    Ok(sessions)
}

/// Direct children of `dir`, sorted by file name
fn list_dir(dir: &Path) -> walkdir::IntoIter {
    WalkDir::new(dir)
        .min_depth(1)
        .max_depth(1)
        .follow_links(false)
        .sort_by_file_name()
        .into_iter()
}

/// Sorted names of regular files in `dir` accepted by `keep`
///
/// Subdirectories and names that are not valid UTF-8 are ignored.
pub fn sorted_file_names(dir: &Path, keep: impl Fn(&str) -> bool) -> Result<Vec<String>> {
    let mut names = Vec::new();
    for entry in list_dir(dir) {
        let entry = entry.map_err(io::Error::from)?;
        if !entry.path().is_file() {
            continue;
        }
        if let Some(name) = entry.file_name().to_str() {
            if keep(name) {
                names.push(name.to_string());
            }
        }
    }
    Ok(names)
}

/// Dataset-relative reference for `path` in the `bids::` URI form
///
/// Separators are always `/` regardless of the host platform.
pub fn bids_uri(root: &Path, path: &Path) -> Result<String> {
    let relative = path.strip_prefix(root).map_err(|_| {
        crate::Error::InvalidInput(format!(
            "{} is not inside dataset root {}",
            path.display(),
            root.display()
        ))
    })?;
    let parts: Vec<String> = relative
        .components()
        .map(|c| c.as_os_str().to_string_lossy().into_owned())
        .collect();
    Ok(format!("bids::{}", parts.join("/")))
}
