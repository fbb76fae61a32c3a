//! SDF project path derivation
//!
//! A local checkout mirrors the File Cabinet below `src/FileCabinet`, and
//! holds deployable objects below `src/Objects`. Everything here is a pure
//! function over paths so the two operations can share one set of rules.

use std::path::{Path, PathBuf};

use chrono::Utc;

/// Marker separating the local checkout prefix from the File Cabinet subtree.
pub const FILE_CABINET_MARKER: &str = "/FileCabinet";

/// Marker identifying deployable SDF object files.
pub const OBJECTS_MARKER: &str = "src/Objects/";

/// Derive the File Cabinet path for a local file.
///
/// Strips everything up to and including the last `/FileCabinet` segment:
/// `/a/b/FileCabinet/c/d.js` becomes `/c/d.js`. A path without the marker is
/// passed through unchanged - the server will reject it, but callers get the
/// CLI's own error instead of a second-guessed one.
pub fn cabinet_path(local: &Path) -> String {
    let s = local.to_string_lossy();
    match s.rfind(FILE_CABINET_MARKER) {
        Some(idx) => s[idx + FILE_CABINET_MARKER.len()..].to_string(),
        None => s.to_string(),
    }
}

/// True if the path points at a deployable object (`src/Objects/` segment).
pub fn is_object_file(local: &Path) -> bool {
    local.to_string_lossy().contains(OBJECTS_MARKER)
}

/// Project root for a File Cabinet file: the prefix before `/src/FileCabinet`.
///
/// The SuiteCloud CLI must run from the project root (the directory holding
/// `src/`). Falls back to the document's parent directory when the marker is
/// absent so the spawn still has a sane working directory.
pub fn compare_project_root(local: &Path) -> PathBuf {
    let s = local.to_string_lossy();
    let marker = format!("/src{}", FILE_CABINET_MARKER);
    match s.rfind(&marker) {
        Some(0) => PathBuf::from("/"),
        Some(idx) => PathBuf::from(&s[..idx]),
        None => local.parent().map(Path::to_path_buf).unwrap_or_default(),
    }
}

/// Project root for an object file: the prefix before `src/Objects/`.
///
/// Returns `None` when the marker is absent; deploy skips such paths.
pub fn object_project_root(local: &Path) -> Option<PathBuf> {
    let s = local.to_string_lossy();
    s.rfind(OBJECTS_MARKER).map(|idx| PathBuf::from(&s[..idx]))
}

/// Backup sibling of a document: `<path>.bak`.
pub fn backup_path(local: &Path) -> PathBuf {
    PathBuf::from(format!("{}.bak", local.display()))
}

/// Timestamped sibling of a document: `<stem>_<epoch-ms><ext>`.
///
/// Bumps the millisecond count until the candidate does not exist, so two
/// back-to-back runs against the same document get distinct names.
pub fn timestamped_copy_path(local: &Path) -> PathBuf {
    let dir = local.parent().map(Path::to_path_buf).unwrap_or_default();
    let stem = local
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    let ext = local
        .extension()
        .map(|e| format!(".{}", e.to_string_lossy()))
        .unwrap_or_default();

    let mut millis = Utc::now().timestamp_millis();
    loop {
        let candidate = dir.join(format!("{}_{}{}", stem, millis, ext));
        if !candidate.exists() {
            return candidate;
        }
        millis += 1;
    }
}
