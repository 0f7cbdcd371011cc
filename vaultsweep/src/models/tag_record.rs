// src/models/tag_record.rs
use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

/// Occurrences of one tag across the vault.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TagRecord {
    /// Tag text including the leading `#`.
    pub tag: String,
    pub count: u64,
    pub files: BTreeSet<PathBuf>,
}

impl TagRecord {
    #[inline]
    pub fn new(tag: impl Into<String>) -> Self {
        Self {
            tag: tag.into(),
            ..Self::default()
        }
    }

    #[inline]
    pub fn record(&mut self, file: &Path) {
        self.count += 1;
        if !self.files.contains(file) {
            self.files.insert(file.to_path_buf());
        }
    }

    #[inline]
    #[must_use]
    pub fn name(&self) -> &str {
        self.tag.strip_prefix('#').unwrap_or(&self.tag)
    }

    /// First segment of a nested tag: `#project/alpha` -> `project`.
    #[inline]
    #[must_use]
    pub fn root(&self) -> &str {
        self.name().split('/').next().unwrap_or_default()
    }

    #[inline]
    #[must_use]
    pub fn is_nested(&self) -> bool {
        self.name().contains('/')
    }

    /// Wikilink a tag would become: `#area/health` -> `[[area - health]]`.
    #[inline]
    #[must_use]
    pub fn suggested_link(&self) -> String {
        format!("[[{}]]", self.name().replace('/', " - "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_counts_every_occurrence() {
        let mut record = TagRecord::new("#idea");
        record.record(Path::new("a.md"));
        record.record(Path::new("a.md"));
        record.record(Path::new("b.md"));

        assert_eq!(record.count, 3);
        assert_eq!(record.files.len(), 2);
    }

    #[test]
    fn test_nested_tag_helpers() {
        let record = TagRecord::new("#area/health");
        assert_eq!(record.name(), "area/health");
        assert_eq!(record.root(), "area");
        assert!(record.is_nested());
        assert_eq!(record.suggested_link(), "[[area - health]]");
    }

    #[test]
    fn test_flat_tag_helpers() {
        let record = TagRecord::new("#reading");
        assert_eq!(record.root(), "reading");
        assert!(!record.is_nested());
        assert_eq!(record.suggested_link(), "[[reading]]");
    }
}
