// src/reports/duplicates.rs
use crate::core::walker::Walker;
use std::collections::BTreeMap;
use std::path::PathBuf;

/// Groups the files `walker` yields by file name and keeps the names that
/// appear more than once. Paths are relative to the walk root and sorted.
#[must_use]
pub fn find_duplicates(walker: &Walker) -> BTreeMap<String, Vec<PathBuf>> {
    let mut by_name: BTreeMap<String, Vec<PathBuf>> = BTreeMap::new();

    for path in walker.files() {
        let Some(name) = path.file_name().map(|name| name.to_string_lossy().into_owned()) else {
            continue;
        };
        let relative = path.strip_prefix(walker.root()).unwrap_or(&path).to_path_buf();
        by_name.entry(name).or_default().push(relative);
    }

    by_name.retain(|_, paths| paths.len() > 1);
    for paths in by_name.values_mut() {
        paths.sort();
    }
    by_name
}
