// src/commands/tags.rs
use crate::cli::TagsArgs;
use crate::core::gate::{Disposition, Gate};
use crate::core::vault::Vault;
use crate::reports::TagInventory;
use crate::utils::{dry_run_prefix, print_top_tags};
use anyhow::Result;
use chrono::Local;

/// Prints the most used tags and writes the conversion plan when a report
/// path is given or configured.
///
/// # Errors
///
/// Returns an error if the report cannot be written.
#[inline]
pub fn run(vault: &Vault, gate: &Gate, args: &TagsArgs) -> Result<()> {
    let inventory = TagInventory::scan(&vault.notes(), args.exclude_done);
    println!(
        "Scanned {} files: {} unique tags, {} occurrences",
        inventory.files_scanned,
        inventory.len(),
        inventory.total_occurrences()
    );
    print_top_tags(&inventory.sorted(), args.top);

    let output = args
        .output
        .clone()
        .or_else(|| vault.config().tags.report_path.clone());
    if let Some(output) = output {
        let path = vault.resolve(&output);
        let generated_at = Local::now().format("%Y-%m-%d %H:%M:%S").to_string();
        let report = inventory.render_markdown(args.min_count, &generated_at);
        let written = gate.create(&path, &report)?;
        println!(
            "{}Report {}: {}",
            dry_run_prefix(written == Disposition::DryRun),
            if written == Disposition::DryRun { "not written" } else { "written" },
            path.display()
        );
    }
    Ok(())
}
