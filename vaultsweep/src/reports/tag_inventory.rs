// src/reports/tag_inventory.rs
use crate::core::tags;
use crate::core::walker::Walker;
use crate::models::TagRecord;
use std::collections::BTreeMap;
use std::fmt;
use std::fs;
use std::path::Path;
use tracing::warn;

/// Every tag in the vault with its exact occurrence count.
#[derive(Debug, Clone, Default)]
pub struct TagInventory {
    records: BTreeMap<String, TagRecord>,
    pub files_scanned: usize,
    exclude_done: bool,
}

impl TagInventory {
    /// `exclude_done` leaves `#done` and its nested tags out.
    #[inline]
    #[must_use]
    pub fn new(exclude_done: bool) -> Self {
        Self {
            exclude_done,
            ..Self::default()
        }
    }

    /// Scans every file `walker` yields. Unreadable files are logged and
    /// not counted.
    #[must_use]
    pub fn scan(walker: &Walker, exclude_done: bool) -> Self {
        let mut inventory = Self::new(exclude_done);
        for path in walker.files() {
            let relative = path.strip_prefix(walker.root()).unwrap_or(&path);
            match fs::read_to_string(&path) {
                Ok(content) => inventory.add_note(relative, &content),
                Err(err) => warn!(path = %relative.display(), error = %err, "failed to read file"),
            }
        }
        inventory
    }

    pub fn add_note(&mut self, relative: &Path, content: &str) {
        self.files_scanned += 1;
        for token in tags::scan(content) {
            let name = token.name();
            if self.exclude_done && (name == "done" || name.starts_with("done/")) {
                continue;
            }
            self.records
                .entry(token.text.to_owned())
                .or_insert_with(|| TagRecord::new(token.text))
                .record(relative);
        }
    }

    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    #[inline]
    #[must_use]
    pub fn get(&self, tag: &str) -> Option<&TagRecord> {
        self.records.get(tag)
    }

    /// Number of tag tokens seen, which is the sum of all counts.
    #[must_use]
    pub fn total_occurrences(&self) -> u64 {
        self.records.values().map(|record| record.count).sum()
    }

    /// Records by count, most used first; ties in tag order.
    #[must_use]
    pub fn sorted(&self) -> Vec<&TagRecord> {
        let mut records: Vec<&TagRecord> = self.records.values().collect();
        records.sort_by(|a, b| b.count.cmp(&a.count).then_with(|| a.tag.cmp(&b.tag)));
        records
    }

    /// Root names mapped to their nested tags, both in name order.
    #[must_use]
    pub fn hierarchies(&self) -> BTreeMap<&str, Vec<&TagRecord>> {
        let mut roots: BTreeMap<&str, Vec<&TagRecord>> = BTreeMap::new();
        for record in self.records.values() {
            let nested = roots.entry(record.root()).or_default();
            if record.is_nested() {
                nested.push(record);
            }
        }
        roots
    }

    /// Markdown conversion plan listing tags used at least `min_count` times.
    #[must_use]
    pub fn render_markdown(&self, min_count: u64, generated_at: &str) -> String {
        ConversionPlan {
            inventory: self,
            min_count,
            generated_at,
        }
        .to_string()
    }
}

struct ConversionPlan<'a> {
    inventory: &'a TagInventory,
    min_count: u64,
    generated_at: &'a str,
}

impl fmt::Display for ConversionPlan<'_> {
    fn fmt(&self, out: &mut fmt::Formatter<'_>) -> fmt::Result {
        let Self {
            inventory,
            min_count,
            generated_at,
        } = *self;
        let listed: Vec<&TagRecord> = inventory
            .sorted()
            .into_iter()
            .filter(|record| record.count >= min_count)
            .collect();

        writeln!(out, "# Tag to Wikilink Conversion Plan\n")?;
        writeln!(out, "*Generated on {generated_at}*\n")?;

        writeln!(out, "## Summary\n")?;
        writeln!(out, "- Total files scanned: {}", inventory.files_scanned)?;
        writeln!(out, "- Unique tags found: {}", inventory.len())?;
        writeln!(out, "- Total tag occurrences: {}", inventory.total_occurrences())?;
        writeln!(
            out,
            "- Tags with at least {min_count} occurrences: {}\n",
            listed.len()
        )?;

        writeln!(out, "## Tag Hierarchies\n")?;
        for (root, nested) in inventory.hierarchies() {
            writeln!(out, "### {root}\n")?;
            if nested.is_empty() {
                let count = inventory
                    .records
                    .get(&format!("#{root}"))
                    .map_or(0, |record| record.count);
                writeln!(out, "No nested tags. Root occurrence count: {count}")?;
            } else {
                writeln!(out, "Nested tags:")?;
                for record in nested {
                    writeln!(out, "- {} ({} occurrences)", record.tag, record.count)?;
                }
            }
            writeln!(out)?;
        }

        writeln!(out, "## Complete Tag List (sorted by frequency)\n")?;
        writeln!(out, "| Tag | Occurrences | Files | Suggested Wikilink |")?;
        writeln!(out, "|-----|-------------|-------|--------------------|")?;
        for record in listed {
            writeln!(
                out,
                "| `{}` | {} | {} | {} |",
                record.tag,
                record.count,
                record.files.len(),
                record.suggested_link()
            )?;
        }
        Ok(())
    }
}
