// src/commands/fix_nav.rs
use crate::cli::BatchArgs;
use crate::core::gate::Gate;
use crate::core::pipeline::run_transform;
use crate::core::vault::Vault;
use crate::transforms::FixDailyNav;
use crate::utils::print_run_report;
use anyhow::{Result, bail};

/// Repairs the notes directly inside the daily-notes folder.
///
/// # Errors
///
/// Returns an error if the configured daily-notes folder does not exist.
#[inline]
pub fn run(vault: &Vault, gate: &Gate, batch: &BatchArgs) -> Result<()> {
    let calendar = &vault.config().calendar;
    let daily = vault.resolve(&calendar.daily_dir);
    if !daily.is_dir() {
        bail!("Daily notes folder does not exist: {}", daily.display());
    }

    let walker = vault.notes().with_root(daily).recursive(false);
    let transform = FixDailyNav::new(&calendar.daily_dir, &calendar.weekly_dir);
    let report = run_transform(&walker, &transform, gate, &batch.options());
    print_run_report(&report);
    Ok(())
}
