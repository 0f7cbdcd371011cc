// src/transforms/simplify_links.rs
use crate::core::links::rewrite_links;
use crate::core::transform::{Edit, Outcome, Transform};
use crate::core::walker::Walker;
use crate::models::Note;
use anyhow::Result;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Case-insensitive index from link names to the vault files carrying them.
///
/// Markdown notes are indexed by file stem, everything else by file name,
/// matching how wikilinks address them.
#[derive(Debug, Clone, Default)]
pub struct NoteIndex {
    names: HashMap<String, Vec<PathBuf>>,
}

impl NoteIndex {
    /// Indexes every file `walker` yields.
    #[must_use]
    pub fn build(walker: &Walker) -> Self {
        let mut index = Self::default();
        for path in walker.files() {
            let relative = path.strip_prefix(walker.root()).unwrap_or(&path).to_path_buf();
            index.insert(relative);
        }
        debug!(names = index.names.len(), "built note index");
        index
    }

    pub fn insert(&mut self, path: PathBuf) {
        let Some(name) = link_name(&path) else { return };
        self.names.entry(name.to_lowercase()).or_default().push(path);
    }

    /// Files a link name resolves to.
    #[must_use]
    pub fn lookup(&self, name: &str) -> &[PathBuf] {
        self.names
            .get(&name.to_lowercase())
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.names.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

fn link_name(path: &Path) -> Option<String> {
    let is_markdown = path
        .extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("md"));
    let name = if is_markdown {
        path.file_stem()
    } else {
        path.file_name()
    };
    name.map(|name| name.to_string_lossy().into_owned())
}

/// Rewrites `[[folder/Note]]` to `[[Note]]` when the name is unique in the
/// vault. Ambiguous links stay as they are and are reported.
#[derive(Debug, Clone)]
pub struct SimplifyLinks {
    index: NoteIndex,
}

impl SimplifyLinks {
    #[inline]
    #[must_use]
    pub const fn new(index: NoteIndex) -> Self {
        Self { index }
    }
}

impl Transform for SimplifyLinks {
    fn name(&self) -> &'static str {
        "simplify-links"
    }

    fn apply(&self, note: &Note) -> Result<Outcome> {
        let mut warnings = Vec::new();
        let (content, count) = rewrite_links(&note.content, |link| {
            if !link.has_prefix() {
                return None;
            }
            let name = link.note_name();
            if name.is_empty() {
                return None;
            }
            let matches = self.index.lookup(name);
            if matches.len() > 1 {
                warnings.push(format!(
                    "kept {link}: {} files are named '{name}'",
                    matches.len()
                ));
                return None;
            }
            Some(link.simplified().to_string())
        });

        if count == 0 {
            return Ok(Outcome::Unchanged { warnings });
        }
        let summary = format!("simplified {count} link(s)");
        Ok(Outcome::from_edit(
            note,
            Edit::new(content, count, summary).with_warnings(warnings),
        ))
    }
}
