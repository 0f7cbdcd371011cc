// src/models/frontmatter_stats.rs
use std::path::PathBuf;

/// Front matter coverage across the vault's Markdown files.
#[derive(Debug, Default)]
pub struct FrontmatterStats {
    pub total_files: u64,
    pub with_frontmatter: u64,
    pub missing: Vec<PathBuf>,
    pub unreadable: Vec<PathBuf>,
}

impl FrontmatterStats {
    #[inline]
    #[must_use]
    pub const fn new() -> Self {
        Self {
            total_files: 0,
            with_frontmatter: 0,
            missing: Vec::new(),
            unreadable: Vec::new(),
        }
    }

    #[inline]
    #[must_use]
    pub fn missing_count(&self) -> u64 {
        self.total_files.saturating_sub(self.with_frontmatter)
    }

    #[inline]
    #[must_use]
    #[expect(clippy::as_conversions, reason = "Precision not critical")]
    #[expect(clippy::cast_precision_loss, reason = "Precision not critical")]
    pub fn calculate_percentage(&self) -> f64 {
        if self.total_files == 0 {
            return 0.0;
        }
        (self.with_frontmatter as f64 / self.total_files as f64) * 100.0
    }

    #[inline]
    #[must_use]
    #[expect(clippy::as_conversions, reason = "Precision not critical")]
    #[expect(clippy::cast_precision_loss, reason = "Precision not critical")]
    pub fn missing_percentage(&self) -> f64 {
        if self.total_files == 0 {
            return 0.0;
        }
        (self.missing_count() as f64 / self.total_files as f64) * 100.0
    }
}
