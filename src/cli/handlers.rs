// src/cli/handlers.rs
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{anyhow, Context, Result};
use colored::Colorize;
use tracing::{info, warn};

use crate::analyzer::{self, AnalyzerFinding};
use crate::config::{Config, CONFIG_FILE};
use crate::discovery;
use crate::history::{ChangeSet, Grouping};
use crate::job::{self, JobReport, ProjectJob};
use crate::reporting::{self, console, MarkdownSmellPrinter};
use crate::smells::SmellDetector;
use crate::tree::{JsonTreeStore, ReadOnlyStore, TreeStore};
use crate::vcs;

/// Options of the fix command.
#[derive(Debug, Clone, Default)]
pub struct FixArgs {
    pub dir: PathBuf,
    pub findings: Option<PathBuf>,
    pub reported: Option<PathBuf>,
    pub from_smells: bool,
    pub rules: Vec<String>,
    pub dry_run: bool,
    pub commit: bool,
}

fn load_config(dir: &Path, rules: &[String]) -> Result<Config> {
    let mut config = Config::load(dir)?;
    if !rules.is_empty() {
        config.active_rules = rules.to_vec();
        config.validate();
    }
    Ok(config)
}

/// Writes the default configuration into `dir`.
///
/// # Errors
/// Returns error if a configuration exists and `force` is off, or the write fails.
pub fn handle_init(dir: &Path, force: bool) -> Result<()> {
    let existing = dir.join(CONFIG_FILE);
    if existing.exists() && !force {
        return Err(anyhow!("{} already exists (use --force)", existing.display()));
    }
    let path = Config::default().save(dir)?;
    println!("{} {}", "Wrote".green().bold(), path.display());
    Ok(())
}

/// Prints the resolved source roots of `dir`.
///
/// # Errors
/// Returns error if the configuration is invalid.
pub fn handle_roots(dir: &Path) -> Result<()> {
    let config = load_config(dir, &[])?;
    let roots = discovery::discover_source_roots(dir, &config);
    if roots.is_empty() {
        println!("{}", "No source roots found.".yellow());
    }
    for root in roots {
        println!("{}", root.display());
    }
    Ok(())
}

/// Prints the smells detected below `dir` as markdown.
///
/// # Errors
/// Returns error if the configuration or a tree cannot be loaded.
pub fn handle_smells(dir: &Path) -> Result<()> {
    let config = load_config(dir, &[])?;
    let roots = discovery::discover_source_roots(dir, &config);
    let model = JsonTreeStore.load(&roots)?;
    let smells = SmellDetector.detect(&model);
    print!("{}", MarkdownSmellPrinter::print_all(&smells));
    Ok(())
}

/// Repairs the project and prints one changelog per change set.
///
/// # Errors
/// Returns error if inputs cannot be read, the job fails or the commit fails.
pub fn handle_fix(args: &FixArgs) -> Result<()> {
    let config = load_config(&args.dir, &args.rules)?;
    if args.commit && !vcs::in_repo(&args.dir) {
        return Err(anyhow!("{} is not inside a git repository", args.dir.display()));
    }
    let mut job = ProjectJob::new(&args.dir);
    if let Some(findings) = load_new_findings(args)? {
        job = job.with_findings(findings);
    } else if args.reported.is_some() {
        warn!("--reported has no effect without --findings");
    }
    if args.from_smells {
        job = job.with_smell_targets();
    }

    let report = if args.dry_run {
        job::run_job(&job, &config, &ReadOnlyStore(JsonTreeStore))
    } else {
        job::run_job(&job, &config, &JsonTreeStore)
    };
    console::print_job_summary(&report);
    print_change_sets(&report, &config)?;
    if let Some(error) = report.outcome.error() {
        return Err(anyhow!("job failed: {error}"));
    }

    if args.commit && report.outcome.applied() > 0 {
        let message = commit_message(&report)?;
        if vcs::commit_all(&args.dir, &message)? {
            println!("{}", "Committed.".green().bold());
        }
    }
    Ok(())
}

fn load_new_findings(args: &FixArgs) -> Result<Option<Vec<AnalyzerFinding>>> {
    let Some(path) = &args.findings else {
        return Ok(None);
    };
    let findings = analyzer::load_findings(path)?;
    let Some(reported) = &args.reported else {
        return Ok(Some(findings));
    };
    let text = fs::read_to_string(reported)
        .with_context(|| format!("Failed to read {}", reported.display()))?;
    let seen = reporting::extract_fingerprints(&text);
    let total = findings.len();
    let fresh = analyzer::filter_new_findings(findings, &seen);
    info!(skipped = total - fresh.len(), "skipping already reported findings");
    Ok(Some(fresh))
}

fn print_change_sets(report: &JobReport, config: &Config) -> Result<()> {
    for set in report.change_sets(config.grouping(), config.max_change_sets) {
        println!();
        println!("{}", set_title(&set).bold());
        print!("{}", reporting::print_change_set(&set)?);
    }
    Ok(())
}

fn set_title(set: &ChangeSet<'_>) -> String {
    match set.affected_type {
        Some(ty) => format!("Repair code smells in {ty}"),
        None => format!("Repair code smells in {} types", set.affected_types().len()),
    }
}

fn commit_message(report: &JobReport) -> Result<String> {
    let sets = report.change_sets(Grouping::Single, 1);
    let Some(set) = sets.first() else {
        return Err(anyhow!("nothing to commit"));
    };
    Ok(format!("{}\n\n{}", set_title(set), reporting::print_change_set(set)?))
}

/// Prints an analyzer findings report.
///
/// # Errors
/// Returns error if the findings or the configuration cannot be read.
pub fn handle_findings(file: &Path, dir: &Path, all: bool) -> Result<()> {
    let config = load_config(dir, &[])?;
    let findings = analyzer::load_findings(file)?;
    let out = if all {
        reporting::print_all_results(&findings, &config.active_rules)?
    } else {
        reporting::print_results(&findings, &config.active_rules)?
    };
    print!("{out}");
    Ok(())
}

/// Runs a read-only job on a fresh clone of `url`.
///
/// # Errors
/// Returns error if cloning or the job fails.
pub fn handle_remote(url: &str, findings: Option<&Path>) -> Result<()> {
    let findings = findings.map(analyzer::load_findings).transpose()?;
    let config = Config::default();
    job::run_checkout_job(url, findings, &config, &ReadOnlyStore(JsonTreeStore), |_, report| {
        console::print_job_summary(report);
        for set in report.change_sets(config.grouping(), config.max_change_sets) {
            println!();
            print!("{}", reporting::print_change_set(&set)?);
        }
        Ok(())
    })?;
    Ok(())
}
