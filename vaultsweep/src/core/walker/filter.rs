// src/core/walker/filter.rs
use crate::core::ignore::Patterns;
use std::path::Path;
use walkdir::DirEntry;

pub fn is_hidden(entry: &DirEntry) -> bool {
    entry
        .file_name()
        .to_str()
        .is_some_and(|name| name.starts_with('.'))
}

/// Determines if a directory entry should be left out of a walk based on:
/// - Whether it's a hidden file/directory
/// - Whether it is a directory whose name is in `exclude_dirs`
/// - Whether its path relative to `root` matches the ignore patterns
///
/// Excluded directories are pruned together with everything below them.
pub fn should_exclude(
    entry: &DirEntry,
    root: &Path,
    exclude_dirs: &[String],
    ignore_patterns: &Patterns,
) -> bool {
    if is_hidden(entry) {
        return true;
    }

    let is_dir = entry.file_type().is_dir();
    if is_dir {
        if let Some(name) = entry.file_name().to_str() {
            if exclude_dirs.iter().any(|dir| dir == name) {
                return true;
            }
        }
    }

    if ignore_patterns.is_empty() {
        return false;
    }
    let relative = entry.path().strip_prefix(root).unwrap_or(entry.path());
    ignore_patterns.matches_entry(relative, is_dir)
}
