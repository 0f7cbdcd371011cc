// src/transforms/daily_nav.rs
use crate::core::transform::{Edit, Outcome, Transform};
use crate::models::Note;
use anyhow::Result;
use regex::{Captures, Regex};
use std::path::Path;
use std::sync::LazyLock;

// ←← [[W |alias / [[D |alias / [[D |alias / [[W |alias →→
// Each slot: a bare name (group 2n+1) and an optional alias (group 2n+2).
// Names cannot contain `/`, so a repaired row no longer matches.
static BROKEN_NAV: LazyLock<Regex> = LazyLock::new(|| {
    let slot = r"\[\[([^\]/|]+)(?:\s*\|([^\]/]+))?";
    Regex::new(&format!(
        r"←←\s*{slot}\s*/\s*{slot}\s*/\s*{slot}\s*/\s*{slot}\s*→→"
    ))
    .expect("navigation pattern is valid")
});

/// Repairs the `←← … →→` navigation row of daily notes whose links lost
/// their folder paths and closing brackets.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FixDailyNav {
    daily_dir: String,
    weekly_dir: String,
}

impl FixDailyNav {
    #[inline]
    #[must_use]
    pub fn new(daily_dir: &Path, weekly_dir: &Path) -> Self {
        Self {
            daily_dir: link_path(daily_dir),
            weekly_dir: link_path(weekly_dir),
        }
    }

    fn slot(dir: &str, caps: &Captures<'_>, index: usize) -> String {
        let name = caps.get(index).map_or("", |m| m.as_str().trim());
        match caps.get(index + 1).map(|m| m.as_str().trim()) {
            Some(alias) if !alias.is_empty() => format!("[[{dir}/{name} |{alias}]]"),
            _ => format!("[[{dir}/{name}]]"),
        }
    }

    /// The repaired row, or `None` when the note has no broken row.
    #[must_use]
    pub fn repair(&self, content: &str) -> Option<String> {
        let caps = BROKEN_NAV.captures(content)?;
        let row = caps.get(0)?.as_str();
        let fixed = format!(
            "←← {} / {} / {} / {} →→",
            Self::slot(&self.weekly_dir, &caps, 1),
            Self::slot(&self.daily_dir, &caps, 3),
            Self::slot(&self.daily_dir, &caps, 5),
            Self::slot(&self.weekly_dir, &caps, 7),
        );
        Some(content.replace(row, &fixed))
    }
}

fn link_path(dir: &Path) -> String {
    dir.to_string_lossy()
        .replace('\\', "/")
        .trim_end_matches('/')
        .to_owned()
}

impl Transform for FixDailyNav {
    fn name(&self) -> &'static str {
        "fix-nav"
    }

    fn apply(&self, note: &Note) -> Result<Outcome> {
        let Some(content) = self.repair(&note.content) else {
            return Ok(Outcome::unchanged());
        };
        Ok(Outcome::from_edit(
            note,
            Edit::new(content, 1, "repaired navigation row"),
        ))
    }
}
