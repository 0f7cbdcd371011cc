// src/models/note.rs
use crate::core::frontmatter::{self, FrontmatterError};
use crate::models::Frontmatter;
use anyhow::{Context as _, Result};
use std::fs;
use std::path::{Path, PathBuf};

/// One vault file, read once per run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Note {
    pub path: PathBuf,
    /// Path relative to the vault root, used in reports.
    pub relative: PathBuf,
    pub content: String,
}

impl Note {
    #[inline]
    #[must_use]
    pub fn new(path: PathBuf, relative: PathBuf, content: String) -> Self {
        Self {
            path,
            relative,
            content,
        }
    }

    /// Reads a note from disk.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or is not valid UTF-8.
    #[inline]
    pub fn read(root: &Path, path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        let relative = path.strip_prefix(root).unwrap_or(path).to_path_buf();
        Ok(Self::new(path.to_path_buf(), relative, content))
    }

    /// File name without the extension, i.e. the name wikilinks use.
    #[inline]
    #[must_use]
    pub fn name(&self) -> String {
        self.path
            .file_stem()
            .map(|stem| stem.to_string_lossy().into_owned())
            .unwrap_or_default()
    }

    #[inline]
    #[must_use]
    pub fn file_name(&self) -> String {
        self.path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_default()
    }

    #[inline]
    #[must_use]
    pub fn has_frontmatter(&self) -> bool {
        frontmatter::has_frontmatter(&self.content)
    }

    /// Parsed front matter, `None` when the note has no block.
    ///
    /// # Errors
    ///
    /// Returns an error if the block is not a valid YAML mapping.
    #[inline]
    pub fn frontmatter(&self) -> Result<Option<Frontmatter>, FrontmatterError> {
        frontmatter::parse(&self.content)
    }

    /// Text after the front matter block, or the whole content without one.
    #[inline]
    #[must_use]
    pub fn body(&self) -> &str {
        frontmatter::split(&self.content).map_or(self.content.as_str(), |split| split.body)
    }
}
