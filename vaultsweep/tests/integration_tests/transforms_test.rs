// tests/integration_tests/transforms_test.rs
use super::common::{create_test_file, setup_test_vault};
use anyhow::Result;
use clap::Parser as _;
use std::fs;
use tempfile::TempDir;
use vaultsweep::core::gate::Gate;
use vaultsweep::core::pipeline::{BatchOptions, run_transform};
use vaultsweep::core::vault::Vault;
use vaultsweep::transforms::{FixDailyNav, NoteIndex, RemoveTag, SimplifyLinks, TagToLink};
use vaultsweep::{Args, run};

fn gate() -> Gate {
    Gate::new(false).backup_extension(None)
}

#[test]
fn test_remove_tag_is_idempotent() -> Result<()> {
    let temp_dir = setup_test_vault()?;
    let vault = Vault::open(temp_dir.path(), None)?;
    let transform = RemoveTag::new("done")?;

    let first = run_transform(&vault.notes(), &transform, &gate(), &BatchOptions::default());
    assert_eq!(first.changed(), 2, "Alpha and Todo carry #done");
    assert_eq!(first.total_count(), 3);
    assert!(!first.has_failures());

    let alpha = fs::read_to_string(temp_dir.path().join("Projects/Alpha.md"))?;
    assert!(!alpha.contains("#done"));
    assert!(alpha.contains("#idea/draft"));

    let second = run_transform(&vault.notes(), &transform, &gate(), &BatchOptions::default());
    assert_eq!(second.changed(), 0, "Second run should change nothing");
    assert_eq!(
        fs::read_to_string(temp_dir.path().join("Projects/Alpha.md"))?,
        alpha
    );
    Ok(())
}

#[test]
fn test_rewrite_keeps_backup() -> Result<()> {
    let temp_dir = setup_test_vault()?;
    let vault = Vault::open(temp_dir.path(), None)?;
    let transform = RemoveTag::new("done")?;

    run_transform(&vault.notes(), &transform, &Gate::new(false), &BatchOptions::default());

    let backup = fs::read_to_string(temp_dir.path().join("Inbox/Todo.md.bak"))?;
    assert_eq!(backup, "---\ntags: [inbox]\n---\n- [ ] call #done\n");
    Ok(())
}

#[test]
fn test_simplify_links_skips_ambiguous_names() -> Result<()> {
    let temp_dir = setup_test_vault()?;
    let vault = Vault::open(temp_dir.path(), None)?;
    let transform = SimplifyLinks::new(NoteIndex::build(&vault.full_walker()));

    let report = run_transform(&vault.notes(), &transform, &gate(), &BatchOptions::default());
    assert_eq!(report.changed(), 1);
    assert_eq!(report.warnings.len(), 1, "Alpha is ambiguous");

    let home = fs::read_to_string(temp_dir.path().join("Home.md"))?;
    assert_eq!(
        home,
        "---\ntitle: Home\n---\nSee [[Projects/Alpha]] and [[Health|health]] #idea\n"
    );

    let again = run_transform(&vault.notes(), &transform, &gate(), &BatchOptions::default());
    assert_eq!(again.changed(), 0, "Simplification should be idempotent");
    assert_eq!(fs::read_to_string(temp_dir.path().join("Home.md"))?, home);
    Ok(())
}

fn simplify_with(vault: &TempDir, flags: &[&str]) -> Result<String> {
    let directory = vault.path().to_string_lossy().into_owned();
    let mut argv = vec!["vaultsweep", "-d", directory.as_str(), "--no-backup"];
    argv.extend_from_slice(flags);
    argv.push("simplify-links");
    run(Args::try_parse_from(argv)?)?;
    Ok(fs::read_to_string(vault.path().join("Home.md"))?)
}

#[test]
fn test_shallow_simplify_still_sees_nested_duplicates() -> Result<()> {
    let temp_dir = TempDir::new()?;
    create_test_file(temp_dir.path(), "Home.md", "See [[A/Note]]\n")?;
    create_test_file(temp_dir.path(), "A/Note.md", "a")?;
    create_test_file(temp_dir.path(), "B/Note.md", "b")?;

    let home = simplify_with(&temp_dir, &["--no-recursive"])?;
    assert_eq!(home, "See [[A/Note]]\n", "Note is ambiguous across folders");
    Ok(())
}

#[test]
fn test_excluded_folders_still_count_as_duplicates() -> Result<()> {
    let temp_dir = TempDir::new()?;
    create_test_file(temp_dir.path(), "Home.md", "See [[A/Note]]\n")?;
    create_test_file(temp_dir.path(), "A/Note.md", "a")?;
    create_test_file(temp_dir.path(), "Archive/Note.md", "archived")?;
    create_test_file(temp_dir.path(), ".vaultignore", "Old/\n")?;
    create_test_file(temp_dir.path(), "Old/Other.md", "other")?;

    let home = simplify_with(&temp_dir, &["-e", "Archive"])?;
    assert_eq!(home, "See [[A/Note]]\n", "Archive/Note.md still collides");

    let vault = Vault::open(temp_dir.path(), None)?.with_excludes(["Archive"]);
    let index = NoteIndex::build(&vault.full_walker());
    assert_eq!(index.lookup("note").len(), 2);
    assert_eq!(index.lookup("other").len(), 1, "Ignored folders are indexed too");
    Ok(())
}

#[test]
fn test_tag_to_link_with_frontmatter() -> Result<()> {
    let temp_dir = setup_test_vault()?;
    create_test_file(
        temp_dir.path(),
        "Ideas.md",
        "---\ntags:\n- idea\n- misc\n---\nA thought #idea\n",
    )?;
    let vault = Vault::open(temp_dir.path(), None)?;
    let transform = TagToLink::new("idea", Some("Ideas"), true)?.with_frontmatter(true);

    run_transform(&vault.notes(), &transform, &gate(), &BatchOptions::default());

    let home = fs::read_to_string(temp_dir.path().join("Home.md"))?;
    assert!(home.ends_with("[[Areas/Health|health]] [[Ideas]]\n"));
    let alpha = fs::read_to_string(temp_dir.path().join("Projects/Alpha.md"))?;
    assert!(alpha.contains("#idea/draft"), "Exact mode keeps nested tags");

    let ideas = fs::read_to_string(temp_dir.path().join("Ideas.md"))?;
    assert!(ideas.contains("A thought [[Ideas]]"));
    assert!(ideas.contains("related:"));
    assert!(ideas.contains("- misc"));
    assert!(!ideas.contains("- idea\n"));
    Ok(())
}

#[test]
fn test_batch_options_limit_the_run() -> Result<()> {
    let temp_dir = setup_test_vault()?;
    let vault = Vault::open(temp_dir.path(), None)?;
    let transform = RemoveTag::new("done")?;
    let batch = BatchOptions {
        max_size_kb: None,
        start_at: 1,
        max_files: Some(2),
    };

    let report = run_transform(&vault.notes(), &transform, &gate(), &batch);
    assert_eq!(report.processed, 2);
    Ok(())
}

#[test]
fn test_fix_daily_navigation() -> Result<()> {
    let temp_dir = setup_test_vault()?;
    create_test_file(
        temp_dir.path(),
        "01 - Calendar/Daily/2025-03-21.md",
        "# Friday\n←← [[2025-W12 |THIS WEEK / [[2025-03-20 |-1D / [[2025-03-22 |+1D / [[2025-W13 |NEXT WEEK →→\n",
    )?;
    let vault = Vault::open(temp_dir.path(), None)?;
    let calendar = &vault.config().calendar;
    let transform = FixDailyNav::new(&calendar.daily_dir, &calendar.weekly_dir);
    let walker = vault
        .notes()
        .with_root(vault.resolve(&calendar.daily_dir))
        .recursive(false);

    let report = run_transform(&walker, &transform, &gate(), &BatchOptions::default());
    assert_eq!(report.processed, 1);
    assert_eq!(report.changed(), 1);

    let daily = fs::read_to_string(temp_dir.path().join("01 - Calendar/Daily/2025-03-21.md"))?;
    assert!(daily.contains("[[01 - Calendar/Weekly/2025-W12 |THIS WEEK]]"));
    assert!(daily.contains("[[01 - Calendar/Daily/2025-03-22 |+1D]]"));
    Ok(())
}
