// src/analyzer.rs
//! The seam to whatever writes front matter for a note.
//!
//! An analyzer receives an [`AnalysisRequest`] and answers with YAML text.
//! [`CommandAnalyzer`] hands the request to an external program;
//! [`HeuristicAnalyzer`] derives a minimal block offline.

mod command;
mod heuristic;

pub use command::CommandAnalyzer;
pub use heuristic::HeuristicAnalyzer;

use crate::core::frontmatter;
use crate::models::Note;
use serde::Serialize;
use std::io;
use std::time::Duration;
use thiserror::Error;
use tracing::warn;

const TRUNCATION_MARKER: &str = "\n\n[...content truncated...]\n\n";

#[derive(Debug, Error)]
pub enum AnalysisError {
    #[error("analyzer timed out after {0:?}")]
    Timeout(Duration),
    #[error("failed to start analyzer `{program}`: {source}")]
    Spawn {
        program: String,
        #[source]
        source: io::Error,
    },
    #[error("analyzer exited with {status}: {stderr}")]
    Failed { status: String, stderr: String },
    #[error("analyzer returned no YAML")]
    Empty,
    #[error("analyzer I/O error: {0}")]
    Io(#[from] io::Error),
    #[error("failed to encode analysis request: {0}")]
    Encode(#[from] serde_json::Error),
    #[error("failed to render YAML: {0}")]
    Render(#[from] serde_yaml_ng::Error),
}

impl AnalysisError {
    /// Whether trying again might succeed.
    #[inline]
    #[must_use]
    pub const fn is_transient(&self) -> bool {
        matches!(self, Self::Timeout(_) | Self::Failed { .. } | Self::Io(_))
    }
}

/// Everything an analyzer gets to see about one note.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AnalysisRequest {
    pub filename: String,
    /// Path relative to the vault root, `/` separated.
    pub path: String,
    /// Parent folders, skipping hidden and `_` prefixed ones.
    pub folders: Vec<String>,
    pub title_hint: String,
    pub existing_yaml: Option<String>,
    pub rules: String,
    /// The note body, shortened to at most `max_chars` characters plus markers.
    pub content: String,
}

impl AnalysisRequest {
    #[must_use]
    pub fn from_note(note: &Note, rules: &str, max_chars: usize) -> Self {
        let split = frontmatter::split(&note.content);
        let body = split.map_or(note.content.as_str(), |split| split.body);
        let existing_yaml = split
            .map(|split| split.yaml.trim().to_owned())
            .filter(|yaml| !yaml.is_empty());

        let components: Vec<String> = note
            .relative
            .components()
            .map(|part| part.as_os_str().to_string_lossy().into_owned())
            .collect();
        let folders = components
            .iter()
            .take(components.len().saturating_sub(1))
            .filter(|part| !part.starts_with('.') && !part.starts_with('_'))
            .cloned()
            .collect();

        Self {
            filename: note.file_name(),
            path: components.join("/"),
            folders,
            title_hint: title_hint(&note.name(), body),
            existing_yaml,
            rules: rules.to_owned(),
            content: summarize(body.trim(), max_chars),
        }
    }
}

/// Something that can write front matter YAML for a note.
pub trait ContentAnalyzer {
    /// # Errors
    ///
    /// Returns an error when no YAML could be produced.
    fn analyze(&self, request: &AnalysisRequest) -> Result<String, AnalysisError>;
}

/// Calls `analyzer`, retrying transient failures up to `retries` times.
///
/// # Errors
///
/// Returns the last error when every attempt failed, or the first
/// permanent one.
#[inline]
pub fn analyze_with_retry(
    analyzer: &dyn ContentAnalyzer,
    request: &AnalysisRequest,
    retries: u32,
) -> Result<String, AnalysisError> {
    let mut attempt = 0;
    loop {
        match analyzer.analyze(request) {
            Ok(yaml) => return Ok(yaml),
            Err(err) if err.is_transient() && attempt < retries => {
                attempt += 1;
                warn!(file = %request.path, attempt, "{err}, retrying");
            }
            Err(err) => return Err(err),
        }
    }
}

/// First `# ` heading of the body, or the file stem in title case.
#[must_use]
pub fn title_hint(stem: &str, body: &str) -> String {
    if let Some(first) = body.trim_start().lines().next() {
        if let Some(heading) = first.strip_prefix("# ") {
            let heading = heading.trim();
            if !heading.is_empty() {
                return heading.to_owned();
            }
        }
    }
    title_case(&stem.replace('_', " "))
}

fn title_case(text: &str) -> String {
    text.split(' ')
        .map(|word| {
            let mut chars = word.chars();
            chars.next().map_or_else(String::new, |first| {
                first.to_uppercase().chain(chars.flat_map(char::to_lowercase)).collect()
            })
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// Shortens long text to its first half, a middle quarter and its last
/// quarter, measured in characters.
#[must_use]
pub fn summarize(text: &str, max_chars: usize) -> String {
    let chars: Vec<char> = text.chars().collect();
    let total = chars.len();
    if total <= max_chars {
        return text.to_owned();
    }

    let first = max_chars / 2;
    let last = max_chars / 4;
    let middle = max_chars - first - last;
    let middle_start = (total / 2).saturating_sub(middle / 2);

    let head: String = chars[..first].iter().collect();
    let center: String = chars[middle_start..middle_start + middle].iter().collect();
    let tail: String = chars[total - last..].iter().collect();
    format!("{head}{TRUNCATION_MARKER}{center}{TRUNCATION_MARKER}{tail}")
}

/// Strips code fences and `---` lines an analyzer may wrap its answer in.
#[must_use]
pub fn clean_yaml(answer: &str) -> String {
    let mut yaml = answer
        .lines()
        .filter(|line| {
            let line = line.trim();
            line != frontmatter::DELIMITER && !line.starts_with("```")
        })
        .collect::<Vec<_>>()
        .join("\n");
    let trimmed = yaml.trim_end().len();
    yaml.truncate(trimmed);
    if !yaml.is_empty() {
        yaml.push('\n');
    }
    yaml
}
