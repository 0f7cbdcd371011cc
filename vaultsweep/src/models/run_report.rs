// src/models/run_report.rs
use std::path::PathBuf;

/// A file the run rewrote (or would rewrite in a dry run).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileChange {
    pub path: PathBuf,
    pub count: usize,
    pub summary: String,
}

/// A per-file message: a skip reason, a failure or a warning.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileEvent {
    pub path: PathBuf,
    pub message: String,
}

impl FileEvent {
    #[inline]
    pub fn new(path: impl Into<PathBuf>, message: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            message: message.into(),
        }
    }
}

/// Outcome of one pipeline pass.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunReport {
    pub dry_run: bool,
    pub processed: usize,
    pub unchanged: usize,
    pub changes: Vec<FileChange>,
    pub skipped: Vec<FileEvent>,
    pub failures: Vec<FileEvent>,
    pub warnings: Vec<FileEvent>,
}

impl RunReport {
    #[inline]
    #[must_use]
    pub fn new(dry_run: bool) -> Self {
        Self {
            dry_run,
            ..Self::default()
        }
    }

    #[inline]
    pub fn record_change(&mut self, path: impl Into<PathBuf>, count: usize, summary: impl Into<String>) {
        self.changes.push(FileChange {
            path: path.into(),
            count,
            summary: summary.into(),
        });
    }

    #[inline]
    pub const fn record_unchanged(&mut self) {
        self.unchanged += 1;
    }

    #[inline]
    pub fn record_skip(&mut self, path: impl Into<PathBuf>, reason: impl Into<String>) {
        self.skipped.push(FileEvent::new(path, reason));
    }

    #[inline]
    pub fn record_failure(&mut self, path: impl Into<PathBuf>, message: impl Into<String>) {
        self.failures.push(FileEvent::new(path, message));
    }

    #[inline]
    pub fn record_warning(&mut self, path: impl Into<PathBuf>, message: impl Into<String>) {
        self.warnings.push(FileEvent::new(path, message));
    }

    #[inline]
    #[must_use]
    pub fn changed(&self) -> usize {
        self.changes.len()
    }

    /// Sum of the individual edit counts across changed files.
    #[inline]
    #[must_use]
    pub fn total_count(&self) -> usize {
        self.changes.iter().map(|change| change.count).sum()
    }

    #[inline]
    #[must_use]
    pub fn has_failures(&self) -> bool {
        !self.failures.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_report_is_empty() {
        let report = RunReport::new(true);
        assert!(report.dry_run);
        assert_eq!(report.processed, 0);
        assert_eq!(report.changed(), 0);
        assert_eq!(report.total_count(), 0);
        assert!(!report.has_failures());
    }

    #[test]
    fn test_total_count_sums_changes() {
        let mut report = RunReport::new(false);
        report.record_change("a.md", 2, "removed 2 tags");
        report.record_change("b.md", 3, "removed 3 tags");
        report.record_unchanged();
        report.record_failure("c.md", "invalid UTF-8");

        assert_eq!(report.changed(), 2);
        assert_eq!(report.unchanged, 1);
        assert_eq!(report.total_count(), 5);
        assert!(report.has_failures());
    }
}
