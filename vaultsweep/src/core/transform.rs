// src/core/transform.rs
use crate::models::Note;
use anyhow::Result;

/// New content for a note and what changed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Edit {
    pub content: String,
    /// Number of individual replacements.
    pub count: usize,
    pub summary: String,
    pub warnings: Vec<String>,
}

impl Edit {
    #[inline]
    pub fn new(content: String, count: usize, summary: impl Into<String>) -> Self {
        Self {
            content,
            count,
            summary: summary.into(),
            warnings: Vec::new(),
        }
    }

    #[inline]
    #[must_use]
    pub fn with_warnings(mut self, warnings: Vec<String>) -> Self {
        self.warnings = warnings;
        self
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// Nothing to change; warnings are still reported.
    Unchanged { warnings: Vec<String> },
    Changed(Edit),
    Skipped(String),
}

impl Outcome {
    #[inline]
    #[must_use]
    pub const fn unchanged() -> Self {
        Self::Unchanged {
            warnings: Vec::new(),
        }
    }

    /// `Changed` when `content` differs from the note, `Unchanged` otherwise.
    #[inline]
    #[must_use]
    pub fn from_edit(note: &Note, edit: Edit) -> Self {
        if edit.content == note.content {
            Self::Unchanged {
                warnings: edit.warnings,
            }
        } else {
            Self::Changed(edit)
        }
    }

    #[inline]
    #[must_use]
    pub const fn is_changed(&self) -> bool {
        matches!(self, Self::Changed(_))
    }
}

/// A per-note rewrite.
///
/// `apply` depends only on the note and on read-only state built before the
/// pass starts, so running a transform never observes its own writes.
pub trait Transform {
    fn name(&self) -> &'static str;

    /// # Errors
    ///
    /// Returns an error if the note cannot be processed; the pipeline
    /// records it and moves on.
    fn apply(&self, note: &Note) -> Result<Outcome>;
}
