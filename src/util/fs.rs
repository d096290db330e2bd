//! Filesystem utilities.

use std::path::{Component, Path, PathBuf};

/// Normalize a path lexically, collapsing `.` and `..` components.
///
/// Nothing is resolved against the real filesystem, so this works for
/// installation paths that no longer exist (or never did). A `..` that
/// would climb above the root is dropped; a leading `..` on a relative
/// path is kept. An empty result becomes `.`.
pub fn normalize_path(path: &Path) -> PathBuf {
    let mut out = PathBuf::new();

    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => match out.components().next_back() {
                Some(Component::Normal(_)) => {
                    out.pop();
                }
                Some(Component::RootDir) | Some(Component::Prefix(_)) => {}
                _ => out.push(".."),
            },
            other => out.push(other.as_os_str()),
        }
    }

    if out.as_os_str().is_empty() {
        out.push(".");
    }
    out
}

/// Join `relative` onto `base` and normalize the result.
///
/// `relative` may use `/` separators; each segment is pushed separately so
/// the result uses the host's separator.
pub fn join_normalized(base: &Path, relative: &str) -> PathBuf {
    let mut path = base.to_path_buf();
    for segment in relative.split('/').filter(|s| !s.is_empty()) {
        path.push(segment);
    }
    normalize_path(&path)
}
