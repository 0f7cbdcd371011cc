// src/reports/missing_frontmatter.rs
use crate::core::frontmatter::has_frontmatter;
use crate::core::walker::Walker;
use crate::models::FrontmatterStats;
use std::fs;
use tracing::warn;

/// Counts the files with front matter and lists the ones without, sorted.
/// Unreadable files are logged and listed separately.
#[must_use]
pub fn scan_frontmatter(walker: &Walker) -> FrontmatterStats {
    let mut stats = FrontmatterStats::new();

    for path in walker.files() {
        let relative = path.strip_prefix(walker.root()).unwrap_or(&path).to_path_buf();
        match fs::read_to_string(&path) {
            Ok(content) => {
                stats.total_files += 1;
                if has_frontmatter(&content) {
                    stats.with_frontmatter += 1;
                } else {
                    stats.missing.push(relative);
                }
            }
            Err(err) => {
                warn!(path = %relative.display(), error = %err, "failed to read file");
                stats.unreadable.push(relative);
            }
        }
    }

    stats.missing.sort();
    stats
}
