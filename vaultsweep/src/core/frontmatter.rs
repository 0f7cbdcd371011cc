// src/core/frontmatter.rs
//! Detection, parsing and rendering of the `---` delimited YAML block at the
//! top of a note.

use crate::models::Frontmatter;
use serde_yaml_ng::Value;
use thiserror::Error;

pub const DELIMITER: &str = "---";
const BOM: char = '\u{feff}';

#[derive(Debug, Error)]
pub enum FrontmatterError {
    #[error("invalid YAML front matter: {0}")]
    InvalidYaml(#[from] serde_yaml_ng::Error),
    #[error("front matter is {0}, expected a mapping")]
    NotAMapping(&'static str),
}

/// A note split at its front matter block.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Split<'a> {
    /// YAML between the delimiter lines, including its final newline.
    pub yaml: &'a str,
    /// Everything after the closing delimiter line.
    pub body: &'a str,
    /// Byte offset of the opening delimiter (past a BOM, if any).
    pub start: usize,
    /// Byte offset where the body begins.
    pub end: usize,
}

/// Splits `content` into front matter and body.
///
/// The first line (after an optional BOM) must be `---` and a later line must
/// be `---`; trailing whitespace on either line is ignored. Anything else
/// means the note has no front matter.
#[inline]
#[must_use]
pub fn split(content: &str) -> Option<Split<'_>> {
    let start = if content.starts_with(BOM) {
        BOM.len_utf8()
    } else {
        0
    };

    let mut lines = content[start..].split_inclusive('\n');
    let first = lines.next()?;
    if first.trim_end() != DELIMITER || !first.ends_with('\n') {
        return None;
    }

    let yaml_start = start + first.len();
    let mut offset = yaml_start;
    for line in lines {
        let line_end = offset + line.len();
        if line.trim_end() == DELIMITER {
            return Some(Split {
                yaml: &content[yaml_start..offset],
                body: &content[line_end..],
                start,
                end: line_end,
            });
        }
        offset = line_end;
    }
    None
}

#[inline]
#[must_use]
pub fn has_frontmatter(content: &str) -> bool {
    split(content).is_some()
}

/// Parses the front matter block of a note, if there is one.
///
/// # Errors
///
/// Returns an error if the block is not valid YAML or not a mapping.
#[inline]
pub fn parse(content: &str) -> Result<Option<Frontmatter>, FrontmatterError> {
    split(content)
        .map(|split| parse_yaml(split.yaml))
        .transpose()
}

/// Parses YAML text that should hold a front matter mapping. Empty text
/// yields an empty mapping.
///
/// # Errors
///
/// Returns an error if the text is not valid YAML or not a mapping.
#[inline]
pub fn parse_yaml(yaml: &str) -> Result<Frontmatter, FrontmatterError> {
    if yaml.trim().is_empty() {
        return Ok(Frontmatter::new());
    }
    match serde_yaml_ng::from_str::<Value>(yaml)? {
        Value::Mapping(fields) => Ok(Frontmatter::from_mapping(fields)),
        Value::Null => Ok(Frontmatter::new()),
        Value::Bool(_) => Err(FrontmatterError::NotAMapping("a boolean")),
        Value::Number(_) => Err(FrontmatterError::NotAMapping("a number")),
        Value::String(_) => Err(FrontmatterError::NotAMapping("a string")),
        Value::Sequence(_) => Err(FrontmatterError::NotAMapping("a sequence")),
        Value::Tagged(_) => Err(FrontmatterError::NotAMapping("a tagged value")),
    }
}

/// Serializes front matter to YAML text without delimiters.
///
/// # Errors
///
/// Returns an error if a value cannot be serialized.
#[inline]
pub fn to_yaml(frontmatter: &Frontmatter) -> Result<String, FrontmatterError> {
    if frontmatter.is_empty() {
        return Ok(String::new());
    }
    Ok(serde_yaml_ng::to_string(frontmatter.fields())?)
}

/// Wraps YAML text in delimiter lines.
#[inline]
#[must_use]
pub fn block(yaml: &str) -> String {
    let mut block = String::with_capacity(yaml.len() + 8);
    block.push_str(DELIMITER);
    block.push('\n');
    block.push_str(yaml);
    if !yaml.is_empty() && !yaml.ends_with('\n') {
        block.push('\n');
    }
    block.push_str(DELIMITER);
    block.push('\n');
    block
}

/// Puts `yaml` in front of the note body, replacing an existing block.
/// The body and a leading BOM are kept byte for byte.
#[inline]
#[must_use]
pub fn with_block(content: &str, yaml: &str) -> String {
    let (bom, body) = match split(content) {
        Some(split) => (&content[..split.start], split.body),
        None if content.starts_with(BOM) => content.split_at(BOM.len_utf8()),
        None => ("", content),
    };
    format!("{bom}{}{body}", block(yaml))
}

/// Replaces the front matter of a note with `frontmatter`.
///
/// # Errors
///
/// Returns an error if the front matter cannot be serialized.
#[inline]
pub fn replace(content: &str, frontmatter: &Frontmatter) -> Result<String, FrontmatterError> {
    Ok(with_block(content, &to_yaml(frontmatter)?))
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::Result;

    #[test]
    fn test_presence_truth_table() {
        let cases = [
            ("---\ntitle: A\n---\nbody", true),
            ("---\n---\n", true),
            ("---  \ntitle: A\n---\t\nbody", true),
            ("\u{feff}---\ntitle: A\n---\n", true),
            ("---\r\ntitle: A\r\n---\r\nbody", true),
            ("---\ntitle: A\n---", true),
            ("", false),
            ("# Heading\n---\ntitle: A\n---\n", false),
            ("---\ntitle: A\nno closing marker", false),
            ("----\ntitle: A\n----\n", false),
            (" ---\ntitle: A\n---\n", false),
            ("---", false),
        ];

        for (content, expected) in cases {
            assert_eq!(has_frontmatter(content), expected, "content: {content:?}");
        }
    }

    #[test]
    fn test_split_parts() -> Result<()> {
        let content = "---\ntitle: A\n---\n# Body\n";
        let split = split(content).ok_or_else(|| anyhow::anyhow!("no front matter"))?;
        assert_eq!(split.yaml, "title: A\n");
        assert_eq!(split.body, "# Body\n");
        assert_eq!(split.start, 0);
        assert_eq!(&content[split.end..], "# Body\n");
        Ok(())
    }

    #[test]
    fn test_parse_mapping() -> Result<()> {
        let frontmatter = parse("---\ntags: [a, b]\n---\nbody")?.unwrap_or_default();
        assert_eq!(frontmatter.tags(), vec!["a", "b"]);
        assert!(parse("no block")?.is_none());
        Ok(())
    }

    #[test]
    fn test_parse_rejects_non_mapping() {
        assert!(matches!(
            parse("---\n- a\n- b\n---\n"),
            Err(FrontmatterError::NotAMapping(_))
        ));
        assert!(matches!(
            parse("---\ntitle: [unclosed\n---\n"),
            Err(FrontmatterError::InvalidYaml(_))
        ));
    }

    #[test]
    fn test_empty_block_is_empty_mapping() -> Result<()> {
        let frontmatter = parse("---\n---\nbody")?.unwrap_or_default();
        assert!(frontmatter.is_empty());
        Ok(())
    }

    #[test]
    fn test_with_block_prepends() {
        assert_eq!(
            with_block("# Note\n", "title: Note"),
            "---\ntitle: Note\n---\n# Note\n"
        );
    }

    #[test]
    fn test_with_block_replaces_existing() {
        assert_eq!(
            with_block("---\nold: 1\n---\n# Note\n", "new: 2\n"),
            "---\nnew: 2\n---\n# Note\n"
        );
    }

    #[test]
    fn test_with_block_keeps_bom() {
        assert_eq!(
            with_block("\u{feff}# Note", "a: 1\n"),
            "\u{feff}---\na: 1\n---\n# Note"
        );
    }

    #[test]
    fn test_replace_round_trips_fields() -> Result<()> {
        let content = "---\ntitle: Plan\ntags:\n- work\n---\nbody";
        let mut frontmatter = parse(content)?.unwrap_or_default();
        frontmatter.remove("tags");
        let updated = replace(content, &frontmatter)?;
        assert_eq!(updated, "---\ntitle: Plan\n---\nbody");
        Ok(())
    }
}
