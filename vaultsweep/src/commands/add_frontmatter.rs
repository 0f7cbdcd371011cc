// src/commands/add_frontmatter.rs
use crate::analyzer::{CommandAnalyzer, ContentAnalyzer, HeuristicAnalyzer};
use crate::cli::AddFrontmatterArgs;
use crate::core::gate::Gate;
use crate::core::pipeline::run_transform;
use crate::core::vault::Vault;
use crate::transforms::AddFrontmatter;
use crate::utils::print_run_report;
use anyhow::{Context as _, Result, bail};
use chrono::Local;
use std::fs;
use std::time::Duration;
use tracing::warn;

/// # Errors
///
/// Returns an error if neither an analyzer nor `--fallback` is available,
/// or the rules file exists but cannot be read.
#[inline]
pub fn run(vault: &Vault, gate: &Gate, args: &AddFrontmatterArgs) -> Result<()> {
    let config = &vault.config().frontmatter;
    let timeout = Duration::from_secs(config.timeout_secs);

    let analyzer = match &args.analyzer {
        Some(line) => CommandAnalyzer::from_command_line(line, timeout),
        None => CommandAnalyzer::from_argv(&config.analyzer, timeout),
    }
    .map(|analyzer| Box::new(analyzer) as Box<dyn ContentAnalyzer>);

    let fallback = args.fallback.then(|| {
        Box::new(HeuristicAnalyzer::new(
            Local::now().date_naive(),
            config.default_type.clone(),
            config.default_tag.clone(),
        )) as Box<dyn ContentAnalyzer>
    });

    if analyzer.is_none() && fallback.is_none() {
        bail!("No analyzer configured: set frontmatter.analyzer, pass --analyzer, or use --fallback");
    }

    let rules_path = vault.root().join(&config.rules_file);
    let rules = if rules_path.is_file() {
        fs::read_to_string(&rules_path)
            .with_context(|| format!("Failed to read rules file: {}", rules_path.display()))?
    } else {
        warn!(path = %rules_path.display(), "rules file not found, continuing without rules");
        String::new()
    };

    let transform = AddFrontmatter::new(analyzer, rules, config.rules_file.clone())
        .with_fallback(fallback)
        .regenerate(args.regenerate)
        .retries(config.retries)
        .max_chars(config.max_chars);
    let report = run_transform(&vault.notes(), &transform, gate, &args.batch.options());
    print_run_report(&report);
    Ok(())
}
