// src/commands/simplify_links.rs
use crate::cli::BatchArgs;
use crate::core::gate::Gate;
use crate::core::pipeline::run_transform;
use crate::core::vault::Vault;
use crate::transforms::{NoteIndex, SimplifyLinks};
use crate::utils::print_run_report;
use anyhow::Result;
use tracing::info;

/// Indexes every file in the vault first, then rewrites the notes the
/// walk options select.
///
/// # Errors
///
/// Never fails as a whole; per-file failures end up in the report.
#[inline]
pub fn run(vault: &Vault, gate: &Gate, batch: &BatchArgs) -> Result<()> {
    let index = NoteIndex::build(&vault.full_walker());
    info!(names = index.len(), "indexed vault");

    let transform = SimplifyLinks::new(index);
    let report = run_transform(&vault.notes(), &transform, gate, &batch.options());
    print_run_report(&report);
    Ok(())
}
