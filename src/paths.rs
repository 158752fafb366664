// src/paths.rs

//! Utility functions for path handling.
//!
//! All configuration keys and command-line paths use forward slashes,
//! regardless of platform, so everything that crosses from `Path` land
//! into string land goes through here.

use std::path::Path;

/// Render a path as a string with forward slashes.
pub fn normalized(path: &Path) -> String {
    path.to_string_lossy().replace('\\', "/")
}

/// Convert a path into a string relative to `root`, with forward slashes.
///
/// This is intentionally robust:
/// - First we try a direct `strip_prefix(root)`.
/// - If that fails (e.g. due to symlinks or different absolute prefixes),
///   we canonicalize both paths and try again.
/// - Only if both attempts fail do we give up.
///
/// Returns `None` if the path cannot be reasonably related to `root`.
pub fn relative_key(root: &Path, path: &Path) -> Option<String> {
    // Fast path: the path already starts with our root.
    if let Ok(rel) = path.strip_prefix(root) {
        return Some(normalized(rel));
    }

    // More robust path: canonicalize both, then try again. This helps on
    // platforms (notably macOS) where different absolute prefixes may be
    // used for the same underlying directory (e.g. symlinks, /private/var).
    if let (Ok(root_canon), Ok(path_canon)) = (root.canonicalize(), path.canonicalize()) {
        if let Ok(rel) = path_canon.strip_prefix(&root_canon) {
            return Some(normalized(rel));
        }
    }

    None
}

/// The directory part of a relative key, or `""` for a top-level file.
pub fn parent_key(rel: &str) -> &str {
    match rel.rsplit_once('/') {
        Some((parent, _)) => parent,
        None => "",
    }
}

/// Default package name for a specification with no explicit
/// `package-name` option: the root-relative directory, lowercased, with
/// slashes turned into hyphens.
pub fn default_package_name(rel_dir: &str) -> String {
    rel_dir.to_lowercase().replace('/', "-")
}
