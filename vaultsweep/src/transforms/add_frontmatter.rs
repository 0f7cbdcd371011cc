// src/transforms/add_frontmatter.rs
use crate::analyzer::{AnalysisRequest, ContentAnalyzer, analyze_with_retry, clean_yaml};
use crate::core::frontmatter;
use crate::core::transform::{Edit, Outcome, Transform};
use crate::models::Note;
use anyhow::{Result, anyhow};

/// Writes analyzer-generated front matter in front of notes that lack it.
pub struct AddFrontmatter {
    analyzer: Option<Box<dyn ContentAnalyzer>>,
    fallback: Option<Box<dyn ContentAnalyzer>>,
    rules: String,
    rules_file: String,
    regenerate: bool,
    retries: u32,
    max_chars: usize,
}

impl AddFrontmatter {
    #[inline]
    #[must_use]
    pub fn new(analyzer: Option<Box<dyn ContentAnalyzer>>, rules: String, rules_file: String) -> Self {
        Self {
            analyzer,
            fallback: None,
            rules,
            rules_file,
            regenerate: false,
            retries: 2,
            max_chars: 2500,
        }
    }

    /// Analyzer used when the primary one fails or returns unusable YAML.
    #[inline]
    #[must_use]
    pub fn with_fallback(mut self, fallback: Option<Box<dyn ContentAnalyzer>>) -> Self {
        self.fallback = fallback;
        self
    }

    /// Also replace front matter that is already there.
    #[inline]
    #[must_use]
    pub const fn regenerate(mut self, regenerate: bool) -> Self {
        self.regenerate = regenerate;
        self
    }

    #[inline]
    #[must_use]
    pub const fn retries(mut self, retries: u32) -> Self {
        self.retries = retries;
        self
    }

    #[inline]
    #[must_use]
    pub const fn max_chars(mut self, max_chars: usize) -> Self {
        self.max_chars = max_chars;
        self
    }

    /// Asks the analyzer and returns YAML that parses as a non-empty mapping.
    fn generate(&self, analyzer: &dyn ContentAnalyzer, request: &AnalysisRequest) -> Result<String> {
        let answer = analyze_with_retry(analyzer, request, self.retries)?;
        let yaml = clean_yaml(&answer);
        let fields = frontmatter::parse_yaml(&yaml)?;
        if fields.is_empty() {
            return Err(anyhow!("analyzer returned an empty mapping"));
        }
        Ok(yaml)
    }
}

impl Transform for AddFrontmatter {
    fn name(&self) -> &'static str {
        "add-frontmatter"
    }

    fn apply(&self, note: &Note) -> Result<Outcome> {
        if note.file_name() == self.rules_file {
            return Ok(Outcome::Skipped("rules file".to_owned()));
        }
        let existing = note.has_frontmatter();
        if existing && !self.regenerate {
            return Ok(Outcome::unchanged());
        }

        let request = AnalysisRequest::from_note(note, &self.rules, self.max_chars);
        let mut warnings = Vec::new();

        let primary = match &self.analyzer {
            Some(analyzer) => self.generate(analyzer.as_ref(), &request),
            None => Err(anyhow!("no analyzer configured")),
        };
        let yaml = match (primary, &self.fallback) {
            (Ok(yaml), _) => yaml,
            (Err(err), Some(fallback)) => {
                warnings.push(format!("analysis failed, using fallback: {err:#}"));
                self.generate(fallback.as_ref(), &request)?
            }
            (Err(err), None) => {
                return Ok(Outcome::Skipped(format!("analysis failed: {err:#}")));
            }
        };

        let content = frontmatter::with_block(&note.content, &yaml);
        let summary = if existing {
            "regenerated front matter"
        } else {
            "added front matter"
        };
        Ok(Outcome::from_edit(
            note,
            Edit::new(content, 1, summary).with_warnings(warnings),
        ))
    }
}
