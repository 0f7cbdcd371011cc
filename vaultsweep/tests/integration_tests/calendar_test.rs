// tests/integration_tests/calendar_test.rs
use super::common::{create_test_file, setup_test_vault};
use anyhow::{Result, anyhow};
use chrono::NaiveDate;
use std::fs;
use tempfile::TempDir;
use vaultsweep::calendar::CalendarKind;
use vaultsweep::commands::migrate_calendar::migrate;
use vaultsweep::core::gate::Gate;
use vaultsweep::core::vault::Vault;

#[test]
fn test_migration_sorts_notes_into_calendar_folders() -> Result<()> {
    let temp_dir = setup_test_vault()?;
    let source = TempDir::new()?;
    create_test_file(source.path(), "20250321.md", "daily")?;
    create_test_file(source.path(), "2025-03.md", "monthly")?;
    create_test_file(source.path(), "2025W9.md", "weekly")?;
    create_test_file(source.path(), "2025Q1.md", "quarterly")?;
    create_test_file(source.path(), "2025.md", "yearly")?;
    create_test_file(source.path(), "Untitled.md", "not calendar")?;

    let vault = Vault::open(temp_dir.path(), None)?;
    let gate = Gate::new(false);
    let today = NaiveDate::from_ymd_opt(2025, 3, 22).ok_or_else(|| anyhow!("bad date"))?;
    let migration = migrate(&vault, &gate, source.path(), false, today)?;

    let calendar = temp_dir.path().join("01 - Calendar");
    assert_eq!(fs::read_to_string(calendar.join("Daily/2025-03-21.md"))?, "daily");
    assert_eq!(fs::read_to_string(calendar.join("Monthly/2025-03.md"))?, "monthly");
    assert_eq!(fs::read_to_string(calendar.join("Weekly/2025-W09.md"))?, "weekly");
    assert_eq!(fs::read_to_string(calendar.join("Quarterly/2025-Q1.md"))?, "quarterly");
    assert_eq!(fs::read_to_string(calendar.join("Yearly/2025.md"))?, "yearly");

    for kind in CalendarKind::ALL {
        let stats = migration.notes.get(&kind).copied().unwrap_or_default();
        assert_eq!((stats.processed, stats.created, stats.errors), (1, 1, 0), "{kind}");
    }
    assert_eq!(migration.skipped.len(), 1);
    assert_eq!(migration.manifest.created.len(), 5);
    Ok(())
}
