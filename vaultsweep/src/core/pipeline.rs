// src/core/pipeline.rs
use crate::core::gate::Gate;
use crate::core::transform::{Outcome, Transform};
use crate::core::walker::Walker;
use crate::models::{Note, RunReport};
use std::fs;
use std::path::Path;
use tracing::{debug, info, warn};

/// Limits shared by every rewriting command.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BatchOptions {
    /// Skip files larger than this many kilobytes.
    pub max_size_kb: Option<u64>,
    /// Skip this many paths before processing starts.
    pub start_at: usize,
    /// Stop after this many files.
    pub max_files: Option<usize>,
}

/// Runs `transform` over every file `walker` yields and writes the results
/// through `gate`. Per-file failures are logged and recorded; they never
/// stop the run.
#[inline]
pub fn run_transform<T>(walker: &Walker, transform: &T, gate: &Gate, batch: &BatchOptions) -> RunReport
where
    T: Transform + ?Sized,
{
    let root = walker.root();
    let mut report = RunReport::new(gate.is_dry_run());
    info!(transform = transform.name(), root = %root.display(), "starting");

    for path in walker.files().skip(batch.start_at) {
        if batch.max_files.is_some_and(|max| report.processed >= max) {
            debug!(processed = report.processed, "file limit reached");
            break;
        }
        report.processed += 1;

        let relative = path.strip_prefix(root).unwrap_or(&path).to_path_buf();
        if let Some(reason) = oversized(&path, batch.max_size_kb) {
            debug!(path = %relative.display(), "{reason}");
            report.record_skip(relative, reason);
            continue;
        }

        process_file(root, &path, transform, gate, &mut report);
    }

    info!(
        transform = transform.name(),
        processed = report.processed,
        changed = report.changed(),
        failed = report.failures.len(),
        "finished"
    );
    report
}

fn oversized(path: &Path, max_size_kb: Option<u64>) -> Option<String> {
    let limit = max_size_kb?;
    let size = fs::metadata(path).ok()?.len();
    (size > limit.saturating_mul(1024)).then(|| format!("larger than {limit} KB"))
}

fn process_file<T>(root: &Path, path: &Path, transform: &T, gate: &Gate, report: &mut RunReport)
where
    T: Transform + ?Sized,
{
    let relative = path.strip_prefix(root).unwrap_or(path).to_path_buf();

    let note = match Note::read(root, path) {
        Ok(note) => note,
        Err(err) => {
            warn!(path = %relative.display(), "{err:#}");
            report.record_failure(relative, format!("{err:#}"));
            return;
        }
    };

    let outcome = match transform.apply(&note) {
        Ok(outcome) => outcome,
        Err(err) => {
            warn!(path = %relative.display(), "{err:#}");
            report.record_failure(relative, format!("{err:#}"));
            return;
        }
    };

    match outcome {
        Outcome::Unchanged { warnings } => {
            record_warnings(report, &relative, warnings);
            report.record_unchanged();
        }
        Outcome::Skipped(reason) => {
            debug!(path = %relative.display(), "skipped: {reason}");
            report.record_skip(relative, reason);
        }
        Outcome::Changed(edit) => {
            record_warnings(report, &relative, edit.warnings);
            match gate.update(path, &note.content, &edit.content) {
                Ok(_) => {
                    debug!(path = %relative.display(), count = edit.count, "{}", edit.summary);
                    report.record_change(relative, edit.count, edit.summary);
                }
                Err(err) => {
                    warn!(path = %relative.display(), "{err:#}");
                    report.record_failure(relative, format!("{err:#}"));
                }
            }
        }
    }
}

fn record_warnings(report: &mut RunReport, relative: &Path, warnings: Vec<String>) {
    for warning in warnings {
        warn!(path = %relative.display(), "{warning}");
        report.record_warning(relative, warning);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::transform::Edit;
    use anyhow::{Result, bail};

    struct Upper;

    impl Transform for Upper {
        fn name(&self) -> &'static str {
            "upper"
        }

        fn apply(&self, note: &Note) -> Result<Outcome> {
            if note.content.contains("fail") {
                bail!("cannot uppercase");
            }
            if note.content.contains("skip") {
                return Ok(Outcome::Skipped("asked to skip".to_owned()));
            }
            let edit = Edit::new(note.content.to_uppercase(), 1, "uppercased");
            Ok(Outcome::from_edit(note, edit))
        }
    }

    fn vault(files: &[(&str, &str)]) -> Result<tempfile::TempDir> {
        let dir = tempfile::tempdir()?;
        for (name, content) in files {
            fs::write(dir.path().join(name), content)?;
        }
        Ok(dir)
    }

    #[test]
    fn test_run_records_every_outcome() -> Result<()> {
        let dir = vault(&[
            ("a.md", "hello"),
            ("b.md", "UPPER"),
            ("c.md", "please skip"),
            ("d.md", "fail"),
        ])?;
        let walker = Walker::new(dir.path()).markdown();
        let gate = Gate::new(false).backup_extension(None);

        let report = run_transform(&walker, &Upper, &gate, &BatchOptions::default());

        assert_eq!(report.processed, 4);
        assert_eq!(report.changed(), 1);
        assert_eq!(report.unchanged, 1);
        assert_eq!(report.skipped.len(), 1);
        assert_eq!(report.failures.len(), 1);
        assert_eq!(fs::read_to_string(dir.path().join("a.md"))?, "HELLO");
        assert_eq!(fs::read_to_string(dir.path().join("d.md"))?, "fail");
        Ok(())
    }

    #[test]
    fn test_batch_limits() -> Result<()> {
        let dir = vault(&[("a.md", "a"), ("b.md", "b"), ("c.md", "c"), ("d.md", "d")])?;
        let walker = Walker::new(dir.path()).markdown();
        let gate = Gate::new(false).backup_extension(None);
        let batch = BatchOptions {
            start_at: 1,
            max_files: Some(2),
            ..BatchOptions::default()
        };

        let report = run_transform(&walker, &Upper, &gate, &batch);

        assert_eq!(report.processed, 2);
        assert_eq!(fs::read_to_string(dir.path().join("a.md"))?, "a");
        assert_eq!(fs::read_to_string(dir.path().join("b.md"))?, "B");
        assert_eq!(fs::read_to_string(dir.path().join("c.md"))?, "C");
        assert_eq!(fs::read_to_string(dir.path().join("d.md"))?, "d");
        Ok(())
    }

    #[test]
    fn test_max_size_skips_large_files() -> Result<()> {
        let big = "x".repeat(2048);
        let dir = vault(&[("big.md", &big), ("small.md", "x")])?;
        let walker = Walker::new(dir.path()).markdown();
        let gate = Gate::new(false).backup_extension(None);
        let batch = BatchOptions {
            max_size_kb: Some(1),
            ..BatchOptions::default()
        };

        let report = run_transform(&walker, &Upper, &gate, &batch);

        assert_eq!(report.skipped.len(), 1);
        assert_eq!(report.changed(), 1);
        assert_eq!(fs::read_to_string(dir.path().join("big.md"))?, big);
        Ok(())
    }

    #[test]
    fn test_invalid_utf8_is_a_failure() -> Result<()> {
        let dir = tempfile::tempdir()?;
        fs::write(dir.path().join("bad.md"), [0xff, 0xfe, 0x00])?;
        let walker = Walker::new(dir.path()).markdown();

        let report = run_transform(&walker, &Upper, &Gate::new(true), &BatchOptions::default());

        assert_eq!(report.failures.len(), 1);
        assert!(report.dry_run);
        Ok(())
    }
}
