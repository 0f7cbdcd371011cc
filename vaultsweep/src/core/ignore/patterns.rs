// src/core/ignore/patterns.rs
use anyhow::{Context as _, Result, anyhow};
use glob::{MatchOptions, Pattern};
use std::path::Path;

const MATCH_OPTIONS: MatchOptions = MatchOptions {
    case_sensitive: true,
    require_literal_separator: true,
    require_literal_leading_dot: false,
};

#[derive(Debug, Clone)]
struct Rule {
    glob: Pattern,
    negated: bool,
    /// Rule written with a trailing `/`; it only matches directories.
    dir_only: bool,
}

/// Gitignore-style patterns matched against paths relative to the vault root.
#[derive(Debug, Clone, Default)]
pub struct Patterns {
    rules: Vec<Rule>,
}

impl Patterns {
    #[inline]
    #[must_use]
    pub const fn new() -> Self {
        Self { rules: Vec::new() }
    }

    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Adds one line of an ignore file.
    ///
    /// Supported forms:
    /// - `# comment` and blank lines are skipped
    /// - `!pattern` re-includes paths an earlier pattern ignored
    /// - `/pattern` is anchored to the vault root
    /// - `dir/` only matches directories (and everything beneath them)
    /// - `*.{png,jpg}` expands into one rule per alternative
    ///
    /// # Errors
    ///
    /// Returns an error if the line contains invalid glob syntax or an
    /// unbalanced brace group.
    #[inline]
    pub fn add_pattern(&mut self, line: &str) -> Result<()> {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            return Ok(());
        }

        let (body, negated) = line
            .strip_prefix('!')
            .map_or((line, false), |rest| (rest, true));
        let (body, anchored) = body
            .strip_prefix('/')
            .map_or((body, false), |rest| (rest, true));
        let dir_only = body.ends_with('/');
        let body = body.trim_end_matches('/');
        // `dir/**` is covered by the descendants rule below.
        let body = body.strip_suffix("/**").unwrap_or(body);
        if body.is_empty() {
            return Ok(());
        }

        for expanded in expand_braces(body)? {
            let base = if anchored || expanded.contains('/') {
                expanded
            } else {
                format!("**/{expanded}")
            };
            let descendants = format!("{base}/**/*");

            self.rules.push(Rule {
                glob: Pattern::new(&base).with_context(|| format!("Invalid pattern: {line}"))?,
                negated,
                dir_only,
            });
            self.rules.push(Rule {
                glob: Pattern::new(&descendants)
                    .with_context(|| format!("Invalid pattern: {line}"))?,
                negated,
                dir_only: false,
            });
        }
        Ok(())
    }

    /// Whether a relative path is ignored, treating it as a file unless a
    /// trailing separator marks it as a directory.
    #[inline]
    pub fn matches<P: AsRef<Path>>(&self, path: P) -> bool {
        let path = path.as_ref();
        let is_dir = path.to_string_lossy().ends_with('/');
        self.matches_entry(path, is_dir)
    }

    /// Whether a relative path is ignored. Negated rules win over plain ones.
    #[inline]
    pub fn matches_entry(&self, path: &Path, is_dir: bool) -> bool {
        let text = path.to_string_lossy();
        let text = text.trim_end_matches('/');
        if text.is_empty() {
            return false;
        }

        let hit = |rule: &Rule| {
            (!rule.dir_only || is_dir) && rule.glob.matches_with(text, MATCH_OPTIONS)
        };

        if self.rules.iter().any(|rule| rule.negated && hit(rule)) {
            return false;
        }
        self.rules.iter().any(|rule| !rule.negated && hit(rule))
    }
}

/// Expands a single `{a,b,c}` group into its alternatives.
fn expand_braces(pattern: &str) -> Result<Vec<String>> {
    let Some((prefix, rest)) = pattern.split_once('{') else {
        if pattern.contains('}') {
            return Err(anyhow!("Invalid pattern: unmatched '}}' in {pattern}"));
        }
        return Ok(vec![pattern.to_owned()]);
    };
    let (alternatives, suffix) = rest
        .split_once('}')
        .ok_or_else(|| anyhow!("Invalid pattern: missing closing brace in {pattern}"))?;

    Ok(alternatives
        .split(',')
        .map(str::trim)
        .map(|alt| format!("{prefix}{alt}{suffix}"))
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_patterns_match_nothing() {
        let patterns = Patterns::new();
        assert!(!patterns.matches("note.md"));
    }

    #[test]
    fn test_extension_pattern() -> Result<()> {
        let mut patterns = Patterns::new();
        patterns.add_pattern("*.bak")?;
        assert!(patterns.matches("note.md.bak"));
        assert!(patterns.matches("deep/folder/note.md.bak"));
        assert!(!patterns.matches("note.md"));
        Ok(())
    }

    #[test]
    fn test_directory_pattern() -> Result<()> {
        let mut patterns = Patterns::new();
        patterns.add_pattern("Templates/")?;

        assert!(
            patterns.matches("Templates/Daily.md"),
            "Should match file directly in Templates"
        );
        assert!(
            patterns.matches("99 - Meta/Templates/Daily.md"),
            "Should match Templates in a subdirectory"
        );
        assert!(
            patterns.matches_entry(Path::new("Templates"), true),
            "Should match the directory itself"
        );
        assert!(
            !patterns.matches_entry(Path::new("Templates"), false),
            "Should not match a file named like the directory"
        );
        assert!(!patterns.matches("MyTemplates/file.md"));
        Ok(())
    }

    #[test]
    fn test_negation_pattern() -> Result<()> {
        let mut patterns = Patterns::new();
        patterns.add_pattern("*.canvas")?;
        patterns.add_pattern("!Home.canvas")?;
        assert!(patterns.matches("Board.canvas"));
        assert!(!patterns.matches("Home.canvas"));
        Ok(())
    }

    #[test]
    fn test_anchored_pattern() -> Result<()> {
        let mut patterns = Patterns::new();
        patterns.add_pattern("/Inbox.md")?;
        assert!(patterns.matches("Inbox.md"), "Should match at the root");
        assert!(
            !patterns.matches("Projects/Inbox.md"),
            "Should not match anchored name in a subdirectory"
        );
        Ok(())
    }

    #[test]
    fn test_brace_group_pattern() -> Result<()> {
        let mut patterns = Patterns::new();
        patterns.add_pattern("*.{png,jpg}")?;
        assert!(patterns.matches("image.png"));
        assert!(patterns.matches("img/photo.jpg"));
        assert!(!patterns.matches("note.md"));
        Ok(())
    }

    #[test]
    fn test_unbalanced_brace_is_an_error() {
        let mut patterns = Patterns::new();
        assert!(patterns.add_pattern("*.{png,jpg").is_err());
    }

    #[test]
    fn test_double_star_pattern() -> Result<()> {
        let mut patterns = Patterns::new();
        patterns.add_pattern("**/archive/**")?;
        assert!(patterns.matches("archive/old.md"));
        assert!(patterns.matches("2023/archive/old.md"));
        assert!(!patterns.matches("archived/old.md"));
        Ok(())
    }

    #[test]
    fn test_comment_and_empty_lines() -> Result<()> {
        let mut patterns = Patterns::new();
        patterns.add_pattern("")?;
        patterns.add_pattern("   # a comment")?;
        assert!(patterns.is_empty());
        patterns.add_pattern("scratch.md")?;
        assert!(patterns.matches("scratch.md"));
        assert!(patterns.matches("sub/scratch.md"));
        assert!(!patterns.matches("not-scratch.md"));
        Ok(())
    }
}
