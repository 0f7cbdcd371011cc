// src/transforms/remove_tag.rs
use crate::core::transform::{Edit, Outcome, Transform};
use crate::models::Note;
use crate::transforms::{char_at, char_before, is_word_char};
use anyhow::{Result, bail};
use regex::Regex;

/// Deletes `#tag` and `#tag(<timestamp>)` tokens from note text.
#[derive(Debug, Clone)]
pub struct RemoveTag {
    name: String,
    pattern: Regex,
}

impl RemoveTag {
    /// # Errors
    ///
    /// Returns an error if the tag name is empty.
    #[inline]
    pub fn new(tag: &str) -> Result<Self> {
        let name = tag.trim().trim_start_matches('#');
        if name.is_empty() {
            bail!("Tag name must not be empty");
        }
        // group 1: optional `(…)` suffix, e.g. `#done(2024-05-01 10:00)`
        let pattern = Regex::new(&format!(r"#{}([ \t]*\([^)\n]*\))?", regex::escape(name)))?;
        Ok(Self {
            name: name.to_owned(),
            pattern,
        })
    }

    #[inline]
    #[must_use]
    pub fn tag(&self) -> &str {
        &self.name
    }

    /// Removes every token, repeating until nothing changes.
    #[must_use]
    pub fn remove(&self, content: &str) -> (String, usize) {
        let mut current = content.to_owned();
        let mut total = 0;
        loop {
            let (next, removed) = self.remove_once(&current);
            if removed == 0 {
                return (current, total);
            }
            total += removed;
            current = next;
        }
    }

    fn remove_once(&self, content: &str) -> (String, usize) {
        let mut output = String::with_capacity(content.len());
        let mut last = 0;
        let mut removed = 0;

        for caps in self.pattern.captures_iter(content) {
            let Some(whole) = caps.get(0) else { continue };
            if char_before(content, whole.start()).is_some_and(is_word_char) {
                continue;
            }
            let plain = caps.get(1).is_none();
            if plain
                && char_at(content, whole.end())
                    .is_some_and(|next| is_word_char(next) || next == '/' || next == '-')
            {
                continue;
            }

            output.push_str(&content[last..whole.start()]);
            last = whole.end();
            removed += 1;
        }
        output.push_str(&content[last..]);
        (output, removed)
    }
}

impl Transform for RemoveTag {
    fn name(&self) -> &'static str {
        "remove-tag"
    }

    fn apply(&self, note: &Note) -> Result<Outcome> {
        let (content, count) = self.remove(&note.content);
        if count == 0 {
            return Ok(Outcome::unchanged());
        }
        let summary = format!("removed {count} #{} tag(s)", self.name);
        Ok(Outcome::from_edit(note, Edit::new(content, count, summary)))
    }
}
