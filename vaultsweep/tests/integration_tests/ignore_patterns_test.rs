// tests/integration_tests/ignore_patterns_test.rs
use super::common::{create_ignore_file, create_test_file, setup_test_vault};
use anyhow::Result;
use std::path::PathBuf;
use vaultsweep::core::ignore::load_ignore_patterns;
use vaultsweep::core::vault::Vault;

#[test]
fn test_ignore_patterns() -> Result<()> {
    let temp_dir = setup_test_vault()?;

    create_ignore_file(
        temp_dir.path(),
        &[
            "# Comment line",
            "*.tmp",
            "Archive/",
            "!Archive/keep.md",
            "*.{log,cache}",
            "/Home.md",
            "build/**/*.js",
        ],
    )?;

    let patterns = load_ignore_patterns(temp_dir.path())?;

    assert!(patterns.matches("test.tmp"), "Should match *.tmp pattern");
    assert!(
        patterns.matches("Archive/Alpha.md"),
        "Should match directory pattern"
    );
    assert!(
        !patterns.matches("Archive/keep.md"),
        "Should respect negation pattern"
    );
    assert!(patterns.matches("debug.log"), "Should match brace group");
    assert!(patterns.matches("data.cache"), "Should match brace group");
    assert!(patterns.matches("Home.md"), "Should match anchored pattern");
    assert!(
        !patterns.matches("Projects/Home.md"),
        "Anchored pattern should only match at the root"
    );
    assert!(
        patterns.matches("build/src/main.js"),
        "Should match globstar pattern"
    );
    assert!(!patterns.matches("Projects/Alpha.md"));
    Ok(())
}

#[test]
fn test_walk_honors_ignore_file_and_excludes() -> Result<()> {
    let temp_dir = setup_test_vault()?;
    create_ignore_file(temp_dir.path(), &["Archive/", "Inbox/"])?;
    create_test_file(temp_dir.path(), ".obsidian/workspace.md", "hidden")?;

    let vault = Vault::open(temp_dir.path(), None)?.with_excludes(["Areas"]);
    let notes: Vec<PathBuf> = vault
        .notes()
        .files()
        .map(|path| vault.relative(&path).to_path_buf())
        .collect();

    assert_eq!(
        notes,
        vec![PathBuf::from("Home.md"), PathBuf::from("Projects/Alpha.md")]
    );
    Ok(())
}

#[test]
fn test_shallow_walk() -> Result<()> {
    let temp_dir = setup_test_vault()?;
    let vault = Vault::open(temp_dir.path(), None)?.with_recursive(false);

    let count = vault.notes().files().count();
    assert_eq!(count, 1, "Only Home.md sits at the top level");
    Ok(())
}
