// src/transforms/tag_to_link.rs
use crate::core::frontmatter;
use crate::core::transform::{Edit, Outcome, Transform};
use crate::models::{Frontmatter, Note};
use crate::transforms::{char_at, char_before, is_word_char};
use anyhow::{Result, bail};
use regex::Regex;
use serde_yaml_ng::Value;

/// Turns `#tag` tokens in the note body into `[[link]]` wikilinks.
#[derive(Debug, Clone)]
pub struct TagToLink {
    name: String,
    link: String,
    exact: bool,
    frontmatter: bool,
    pattern: Regex,
}

impl TagToLink {
    /// Converts `#tag` (and nested `#tag/sub` unless `exact`) into `[[link]]`.
    /// `link` defaults to the tag name.
    ///
    /// # Errors
    ///
    /// Returns an error if the tag name is empty.
    #[inline]
    pub fn new(tag: &str, link: Option<&str>, exact: bool) -> Result<Self> {
        let name = tag.trim().trim_start_matches('#');
        if name.is_empty() {
            bail!("Tag name must not be empty");
        }
        let nested = if exact { "" } else { r"(?:/[A-Za-z0-9_.-]+)*" };
        let pattern = Regex::new(&format!("#{}{nested}", regex::escape(name)))?;
        let link = link
            .map(str::trim)
            .filter(|link| !link.is_empty())
            .unwrap_or(name)
            .trim_start_matches("[[")
            .trim_end_matches("]]")
            .to_owned();

        Ok(Self {
            name: name.to_owned(),
            link,
            exact,
            frontmatter: false,
            pattern,
        })
    }

    /// Also move matching front matter `tags` entries into `related`.
    #[inline]
    #[must_use]
    pub const fn with_frontmatter(mut self, frontmatter: bool) -> Self {
        self.frontmatter = frontmatter;
        self
    }

    fn wikilink(&self) -> String {
        format!("[[{}]]", self.link)
    }

    /// Whether a front matter tag entry refers to this tag.
    fn matches_entry(&self, entry: &str) -> bool {
        let entry = entry.trim().trim_start_matches('#');
        entry == self.name
            || (!self.exact
                && entry
                    .strip_prefix(self.name.as_str())
                    .is_some_and(|rest| rest.starts_with('/')))
    }

    /// Converts the tokens in `body`.
    #[must_use]
    pub fn convert_body(&self, body: &str) -> (String, usize) {
        let replacement = self.wikilink();
        let mut output = String::with_capacity(body.len());
        let mut last = 0;
        let mut count = 0;

        for found in self.pattern.find_iter(body) {
            if char_before(body, found.start()).is_some_and(|prev| is_word_char(prev) || prev == '#') {
                continue;
            }
            // Sentence punctuation after a nested tag is not part of it.
            let text = found.as_str().trim_end_matches('.');
            let end = found.start() + text.len().max(self.name.len() + 1);
            if char_at(body, end)
                .is_some_and(|next| is_word_char(next) || matches!(next, '/' | '-'))
            {
                continue;
            }
            output.push_str(&body[last..found.start()]);
            output.push_str(&replacement);
            last = end;
            count += 1;
        }
        output.push_str(&body[last..]);
        (output, count)
    }

    /// Removes matching `tags` entries and records the link in `related`.
    /// Returns the number of removed entries.
    pub fn convert_frontmatter(&self, frontmatter: &mut Frontmatter) -> usize {
        let Some(tags) = frontmatter.get("tags").cloned() else {
            return 0;
        };

        let entries: Vec<Value> = match tags {
            Value::Sequence(items) => items,
            Value::String(text) => text
                .split(|c: char| c == ',' || c.is_whitespace())
                .filter(|item| !item.is_empty())
                .map(Value::from)
                .collect(),
            _ => return 0,
        };

        let (removed, kept): (Vec<Value>, Vec<Value>) = entries
            .into_iter()
            .partition(|item| item.as_str().is_some_and(|text| self.matches_entry(text)));
        if removed.is_empty() {
            return 0;
        }

        frontmatter.insert("tags", Value::Sequence(kept));

        let link = Value::from(self.wikilink());
        let related = match frontmatter.remove("related") {
            Some(Value::Sequence(mut items)) => {
                if !items.contains(&link) {
                    items.push(link);
                }
                items
            }
            Some(Value::String(existing)) if !existing.trim().is_empty() => {
                let existing = Value::from(existing);
                if existing == link {
                    vec![link]
                } else {
                    vec![existing, link]
                }
            }
            _ => vec![link],
        };
        frontmatter.insert("related", Value::Sequence(related));
        removed.len()
    }
}

impl Transform for TagToLink {
    fn name(&self) -> &'static str {
        "tag-to-link"
    }

    fn apply(&self, note: &Note) -> Result<Outcome> {
        let split = frontmatter::split(&note.content);
        let body_start = split.map_or(0, |split| split.end);
        let (body, mut count) = self.convert_body(&note.content[body_start..]);
        let mut content = format!("{}{body}", &note.content[..body_start]);
        let mut warnings = Vec::new();

        if self.frontmatter && split.is_some() {
            match note.frontmatter() {
                Ok(Some(mut fields)) => {
                    let moved = self.convert_frontmatter(&mut fields);
                    if moved > 0 {
                        content = frontmatter::replace(&content, &fields)?;
                        count += moved;
                    }
                }
                Ok(None) => {}
                Err(err) => warnings.push(format!("front matter left as is: {err}")),
            }
        }

        if count == 0 {
            return Ok(Outcome::Unchanged { warnings });
        }
        let summary = format!("converted {count} #{} tag(s) to {}", self.name, self.wikilink());
        Ok(Outcome::from_edit(
            note,
            Edit::new(content, count, summary).with_warnings(warnings),
        ))
    }
}
