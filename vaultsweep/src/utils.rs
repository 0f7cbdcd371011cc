// src/utils.rs
//! Console output for the command summaries.

use crate::models::{FileEvent, FrontmatterStats, RunReport, TagRecord};
use std::collections::BTreeMap;
use std::path::PathBuf;

/// Prefix for lines describing changes that were not written.
#[inline]
#[must_use]
pub const fn dry_run_prefix(dry_run: bool) -> &'static str {
    if dry_run { "[DRY RUN] " } else { "" }
}

pub fn print_run_report(report: &RunReport) {
    let prefix = dry_run_prefix(report.dry_run);
    let verb = if report.dry_run { "would change" } else { "changed" };

    for change in &report.changes {
        println!(
            "{prefix}{:6}  {}  {}",
            change.count,
            change.path.display(),
            change.summary
        );
    }
    print_events("warning", &report.warnings);
    print_events("skipped", &report.skipped);
    print_events("failed", &report.failures);

    println!(
        "{prefix}Processed {} files: {} {verb} ({} edits), {} unchanged, {} skipped, {} failed",
        report.processed,
        report.changed(),
        report.total_count(),
        report.unchanged,
        report.skipped.len(),
        report.failures.len()
    );
}

fn print_events(label: &str, events: &[FileEvent]) {
    for event in events {
        println!("  {label}: {}: {}", event.path.display(), event.message);
    }
}

pub fn print_duplicates(duplicates: &BTreeMap<String, Vec<PathBuf>>) {
    if duplicates.is_empty() {
        println!("No duplicate note names found.");
        return;
    }

    println!("Found {} duplicate note names:", duplicates.len());
    for (name, paths) in duplicates {
        println!("\n{name}");
        for path in paths {
            println!("  {}", path.display());
        }
    }
}

pub fn print_frontmatter_stats(stats: &FrontmatterStats) {
    for path in &stats.missing {
        println!("{}", path.display());
    }
    for path in &stats.unreadable {
        println!("  unreadable: {}", path.display());
    }

    println!("\nTotal Markdown files: {}", stats.total_files);
    println!(
        "With front matter: {} ({:.2}%)",
        stats.with_frontmatter,
        stats.calculate_percentage()
    );
    println!(
        "Without front matter: {} ({:.2}%)",
        stats.missing_count(),
        stats.missing_percentage()
    );
}

pub fn print_top_tags(records: &[&TagRecord], top: usize) {
    for record in records.iter().take(top) {
        println!(
            "{:8} uses  {:5} files  {}",
            record.count,
            record.files.len(),
            record.tag
        );
    }
}
