// src/commands/tag_to_link.rs
use crate::cli::TagToLinkArgs;
use crate::core::gate::Gate;
use crate::core::pipeline::run_transform;
use crate::core::vault::Vault;
use crate::transforms::TagToLink;
use crate::utils::print_run_report;
use anyhow::Result;

/// # Errors
///
/// Returns an error if the tag or link name is empty.
#[inline]
pub fn run(vault: &Vault, gate: &Gate, args: &TagToLinkArgs) -> Result<()> {
    let transform = TagToLink::new(&args.tag, args.link.as_deref(), args.exact)?
        .with_frontmatter(args.frontmatter);
    let report = run_transform(&vault.notes(), &transform, gate, &args.batch.options());
    print_run_report(&report);
    Ok(())
}
