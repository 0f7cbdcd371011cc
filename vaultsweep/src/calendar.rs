// src/calendar.rs
//! Naming rules for importing calendar notes and their attachments.

use crate::config::{AttachmentsConfig, CalendarConfig};
use chrono::NaiveDate;
use regex::Regex;
use std::collections::HashSet;
use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::LazyLock;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum CalendarKind {
    Daily,
    Weekly,
    Monthly,
    Quarterly,
    Yearly,
}

impl CalendarKind {
    pub const ALL: [Self; 5] = [
        Self::Daily,
        Self::Weekly,
        Self::Monthly,
        Self::Quarterly,
        Self::Yearly,
    ];

    #[inline]
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Daily => "Daily",
            Self::Weekly => "Weekly",
            Self::Monthly => "Monthly",
            Self::Quarterly => "Quarterly",
            Self::Yearly => "Yearly",
        }
    }

    /// Vault folder notes of this kind go to.
    #[inline]
    #[must_use]
    pub fn dir(self, config: &CalendarConfig) -> &Path {
        match self {
            Self::Daily => &config.daily_dir,
            Self::Weekly => &config.weekly_dir,
            Self::Monthly => &config.monthly_dir,
            Self::Quarterly => &config.quarterly_dir,
            Self::Yearly => &config.yearly_dir,
        }
    }
}

impl fmt::Display for CalendarKind {
    #[inline]
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

// Checked in this order; the first match wins.
static PATTERNS: LazyLock<Vec<(CalendarKind, Regex)>> = LazyLock::new(|| {
    [
        (CalendarKind::Daily, r"^(\d{8})\.md$"),
        (CalendarKind::Monthly, r"^(\d{4})[-.](\d{2})\.md$"),
        (CalendarKind::Weekly, r"^(\d{4})[-.]?W(\d{1,2})\.md$"),
        (CalendarKind::Quarterly, r"^(\d{4})[-.]?Q([1-4])\.md$"),
        (CalendarKind::Yearly, r"^(\d{4})\.md$"),
    ]
    .into_iter()
    .map(|(kind, pattern)| (kind, Regex::new(pattern).expect("calendar pattern is valid")))
    .collect()
});

/// A calendar note file name and the name it gets in the vault.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CalendarNote {
    pub kind: CalendarKind,
    pub target_name: String,
}

/// Classifies a source file name:
/// - `20220325.md` -> daily `2022-03-25.md`
/// - `2023.01.md` -> monthly `2023-01.md`
/// - `2023W7.md` -> weekly `2023-W07.md`
/// - `2023Q1.md` -> quarterly `2023-Q1.md`
/// - `2024.md` -> yearly `2024.md`
///
/// Daily names that are not real dates are not calendar notes.
#[must_use]
pub fn classify(file_name: &str) -> Option<CalendarNote> {
    let (kind, caps) = PATTERNS
        .iter()
        .find_map(|(kind, pattern)| pattern.captures(file_name).map(|caps| (*kind, caps)))?;
    let group = |index: usize| caps.get(index).map_or("", |m| m.as_str());

    let target_name = match kind {
        CalendarKind::Daily => {
            let date = NaiveDate::parse_from_str(group(1), "%Y%m%d").ok()?;
            format!("{}.md", date.format("%Y-%m-%d"))
        }
        CalendarKind::Monthly => format!("{}-{}.md", group(1), group(2)),
        CalendarKind::Weekly => format!("{}-W{:0>2}.md", group(1), group(2)),
        CalendarKind::Quarterly => format!("{}-Q{}.md", group(1), group(2)),
        CalendarKind::Yearly => file_name.to_owned(),
    };
    Some(CalendarNote { kind, target_name })
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum AttachmentKind {
    Audio,
    Image,
    Document,
    Video,
}

const AUDIO: &[&str] = &["mp3", "wav", "m4a", "ogg", "flac", "aac"];
const IMAGE: &[&str] = &[
    "jpg", "jpeg", "png", "gif", "webp", "svg", "heic", "heif", "bmp", "tiff", "tif",
];
const VIDEO: &[&str] = &["mp4", "mov", "avi", "mkv", "wmv", "flv", "webm", "m4v"];

impl AttachmentKind {
    /// Kind by extension; anything unknown is a document.
    #[must_use]
    pub fn from_path(path: &Path) -> Self {
        let ext = path
            .extension()
            .map(|ext| ext.to_string_lossy().to_lowercase())
            .unwrap_or_default();
        if AUDIO.contains(&ext.as_str()) {
            Self::Audio
        } else if IMAGE.contains(&ext.as_str()) {
            Self::Image
        } else if VIDEO.contains(&ext.as_str()) {
            Self::Video
        } else {
            Self::Document
        }
    }

    #[inline]
    #[must_use]
    pub fn dir(self, config: &AttachmentsConfig) -> &Path {
        match self {
            Self::Audio => &config.audio,
            Self::Image => &config.image,
            Self::Document => &config.document,
            Self::Video => &config.video,
        }
    }
}

/// Appends imported text to an existing note after a separator naming its
/// origin. `None` when there is nothing new to add.
#[must_use]
pub fn merge_content(
    existing: &str,
    imported: &str,
    label: &str,
    source_name: &str,
    date: NaiveDate,
) -> Option<String> {
    let imported_text = imported.trim();
    if imported_text.is_empty() || existing.contains(imported_text) {
        return None;
    }
    Some(format!(
        "{existing}\n\n---\n\n**Content imported from {label} ({source_name}) on {}:**\n\n{imported}",
        date.format("%Y-%m-%d")
    ))
}

/// `dir/name.ext`, or `dir/name_1.ext`, `dir/name_2.ext`… when the name is
/// already on disk or in `taken`.
#[must_use]
pub fn unique_destination(dir: &Path, file_name: &str, taken: &HashSet<PathBuf>) -> PathBuf {
    let candidate = dir.join(file_name);
    if !candidate.exists() && !taken.contains(&candidate) {
        return candidate;
    }

    let original = Path::new(file_name);
    let stem = original
        .file_stem()
        .map_or_else(|| file_name.to_owned(), |stem| stem.to_string_lossy().into_owned());
    let ext = original
        .extension()
        .map(|ext| format!(".{}", ext.to_string_lossy()))
        .unwrap_or_default();

    let mut counter = 1_u32;
    loop {
        let candidate = dir.join(format!("{stem}_{counter}{ext}"));
        if !candidate.exists() && !taken.contains(&candidate) {
            return candidate;
        }
        counter += 1;
    }
}
