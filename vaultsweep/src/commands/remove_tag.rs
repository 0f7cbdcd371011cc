// src/commands/remove_tag.rs
use crate::cli::RemoveTagArgs;
use crate::core::gate::Gate;
use crate::core::pipeline::run_transform;
use crate::core::vault::Vault;
use crate::transforms::RemoveTag;
use crate::utils::print_run_report;
use anyhow::Result;

/// # Errors
///
/// Returns an error if the tag is not a valid tag name.
#[inline]
pub fn run(vault: &Vault, gate: &Gate, args: &RemoveTagArgs) -> Result<()> {
    let transform = RemoveTag::new(&args.tag)?;
    let report = run_transform(&vault.notes(), &transform, gate, &args.batch.options());
    print_run_report(&report);
    Ok(())
}
