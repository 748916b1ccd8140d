// src/job.rs
//! Project jobs: resolve roots, transform, report.
//!
//! Targets restrict where processors fire. They come from analyzer findings,
//! from the smells detected in the loaded model, or from both.
//!
//! Jobs are independent. Each owns its model and ledger, so several run in
//! parallel without sharing mutable state.

use std::path::{Path, PathBuf};

use rayon::prelude::*;
use tracing::{debug, info, info_span};

use crate::analyzer::{active_findings, AnalyzerFinding};
use crate::config::Config;
use crate::discovery::discover_source_roots;
use crate::error::Result;
use crate::history::{ChangeSet, Grouping};
use crate::smells::SmellDetector;
use crate::transform::registry::{processor_ids, processors_for};
use crate::transform::{JobOutcome, Target, TargetCollector, TransformationEngine};
use crate::tree::TreeStore;
use crate::vcs;
use crate::workspace::ScratchCheckout;

/// One project to repair.
#[derive(Debug, Clone)]
pub struct ProjectJob {
    pub project: PathBuf,
    /// When present, processors only fire where one of these points.
    pub findings: Option<Vec<AnalyzerFinding>>,
    /// Detect smells first and only repair where one was found.
    pub from_smells: bool,
}

impl ProjectJob {
    pub fn new(project: impl Into<PathBuf>) -> Self {
        Self {
            project: project.into(),
            findings: None,
            from_smells: false,
        }
    }

    #[must_use]
    pub fn with_findings(mut self, findings: Vec<AnalyzerFinding>) -> Self {
        self.findings = Some(findings);
        self
    }

    #[must_use]
    pub fn with_smell_targets(mut self) -> Self {
        self.from_smells = true;
        self
    }
}

/// What a finished job produced.
#[derive(Debug)]
pub struct JobReport {
    pub project: PathBuf,
    pub roots: Vec<PathBuf>,
    pub outcome: JobOutcome,
    /// Commit the job ran against, for checkouts.
    pub head: Option<String>,
}

impl JobReport {
    /// Persisted changes split for commits, at most `limit` sets.
    #[must_use]
    pub fn change_sets(&self, grouping: Grouping, limit: usize) -> Vec<ChangeSet<'_>> {
        let mut sets = self.outcome.ledger().partition(grouping);
        sets.truncate(limit);
        sets
    }
}

/// Builds the engine for `job` under `config`, targeted by its findings.
#[must_use]
pub fn engine_for(job: &ProjectJob, config: &Config) -> TransformationEngine {
    let engine = TransformationEngine::new(processors_for(&config.active_rules));
    debug!(processors = ?processor_ids(engine.processors()), "engine ready");
    match finding_targets(job, config) {
        Some(targets) => engine.with_targets(targets),
        None => engine,
    }
}

fn finding_targets(job: &ProjectJob, config: &Config) -> Option<Vec<Target>> {
    job.findings.as_ref().map(|findings| {
        active_findings(findings, &config.active_rules)
            .into_iter()
            .map(Target::from_finding)
            .collect()
    })
}

/// Runs one job against the sources below `job.project`.
pub fn run_job(job: &ProjectJob, config: &Config, store: &dyn TreeStore) -> JobReport {
    let span = info_span!("job", project = %job.project.display());
    let _guard = span.enter();

    let roots = discover_source_roots(&job.project, config);
    let outcome = if job.from_smells {
        run_smell_targeted(job, config, store, &roots)
    } else {
        engine_for(job, config).run(store, &roots)
    };
    info!(
        roots = roots.len(),
        applied = outcome.applied(),
        failed = !outcome.is_success(),
        "job finished"
    );
    JobReport {
        project: job.project.clone(),
        roots,
        outcome,
        head: None,
    }
}

fn run_smell_targeted(
    job: &ProjectJob,
    config: &Config,
    store: &dyn TreeStore,
    roots: &[PathBuf],
) -> JobOutcome {
    let model = match store.load(roots) {
        Ok(model) => model,
        Err(error) => return JobOutcome::failed(error),
    };
    let smells = SmellDetector.detect(&model);
    let mut targets = finding_targets(job, config).unwrap_or_default();
    targets.extend(TargetCollector::collect(&smells));
    info!(smells = smells.len(), targets = targets.len(), "targets seeded from smells");

    engine_for(job, config)
        .with_targets(targets)
        .run_loaded(store, model)
}

/// Runs independent jobs in parallel. Reports keep the order of `jobs`.
pub fn run_jobs(jobs: &[ProjectJob], config: &Config, store: &dyn TreeStore) -> Vec<JobReport> {
    jobs.par_iter()
        .map(|job| run_job(job, config, store))
        .collect()
}

/// Clones `url` into a scratch checkout, runs a job there and hands the
/// checkout to `finish` before it is removed.
///
/// # Errors
/// Returns error if the checkout cannot be prepared or `finish` fails.
pub fn run_checkout_job<F, T>(
    url: &str,
    findings: Option<Vec<AnalyzerFinding>>,
    config: &Config,
    store: &dyn TreeStore,
    finish: F,
) -> Result<T>
where
    F: FnOnce(&Path, &JobReport) -> Result<T>,
{
    let prefix = format!("smellfix-{}-", vcs::repo_name(url).unwrap_or("checkout"));
    let checkout = ScratchCheckout::new(&prefix)?;
    vcs::clone_repository(url, checkout.path())?;
    let head = vcs::head_hash(checkout.path())?;

    let mut job = ProjectJob::new(checkout.path());
    job.findings = findings;
    let mut report = run_job(&job, config, store);
    report.head = Some(head);

    finish(checkout.path(), &report)
}

#[cfg(test)]
#[path = "job_test.rs"]
mod tests;
