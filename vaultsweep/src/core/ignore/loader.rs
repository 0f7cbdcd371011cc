// src/core/ignore/loader.rs
use crate::core::ignore::Patterns;
use anyhow::{Context as _, Result};
use std::collections::HashSet;
use std::fs;
use std::path::Path;
use tracing::debug;

pub const IGNORE_FILE: &str = ".vaultignore";

/// Loads ignore patterns from the nearest `.vaultignore`, starting at `dir`
/// and walking up through its parents until one is found.
///
/// # Errors
///
/// This function may return an error if:
/// * The `.vaultignore` file exists but cannot be read
/// * The file contains invalid pattern syntax
#[inline]
pub fn load_ignore_patterns(dir: &Path) -> Result<Patterns> {
    let mut patterns = Patterns::new();
    let mut visited = HashSet::new();
    let mut current = Some(dir.to_path_buf());

    while let Some(current_dir) = current {
        if !visited.insert(current_dir.clone()) {
            break;
        }

        let ignore_file = current_dir.join(IGNORE_FILE);
        if ignore_file.is_file() {
            let content = fs::read_to_string(&ignore_file).with_context(|| {
                format!("Failed to read ignore file: {}", ignore_file.display())
            })?;

            for line in content.lines() {
                patterns
                    .add_pattern(line)
                    .with_context(|| format!("In ignore file {}", ignore_file.display()))?;
            }
            debug!(path = %ignore_file.display(), "loaded ignore patterns");
            break;
        }

        current = current_dir.parent().map(Path::to_path_buf);
    }

    Ok(patterns)
}
