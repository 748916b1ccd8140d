// src/reporting/console.rs
//! Colored terminal summaries.

use colored::Colorize;

use crate::history::Change;
use crate::job::JobReport;

/// Prints what a job did, one line per change.
pub fn print_job_summary(report: &JobReport) {
    println!("{} {}", "project".bold(), report.project.display());
    for root in &report.roots {
        println!("  {} {}", "root".dimmed(), root.display());
    }
    if let Some(head) = &report.head {
        println!("  {} {head}", "head".dimmed());
    }

    let changes = report.outcome.changes();
    for change in changes {
        print_change(change);
    }

    if let Some(error) = report.outcome.error() {
        println!("  {} {error}", "failed:".red().bold());
        let unsaved = report.outcome.unsaved();
        if !changes.is_empty() {
            let saved = format!(
                "{} {} saved before the failure",
                changes.len(),
                pluralize("change", changes.len())
            );
            println!("  {}", saved.yellow());
        }
        if unsaved > 0 {
            let lost = format!("{unsaved} {} not saved", pluralize("change", unsaved));
            println!("  {}", lost.yellow());
        }
        return;
    }

    let types = report.outcome.ledger().changed_types().len();
    let summary = format!(
        "{} {} in {types} {}",
        changes.len(),
        pluralize("change", changes.len()),
        pluralize("type", types)
    );
    if changes.is_empty() {
        println!("  {}", "nothing to repair".green());
    } else {
        println!("  {}", summary.green().bold());
    }
}

fn print_change(change: &Change) {
    println!(
        "  {} [{}] {}",
        "*".cyan(),
        change.category().name.yellow(),
        change.summary()
    );
}

pub(crate) fn pluralize(word: &str, count: usize) -> String {
    if count == 1 {
        word.to_string()
    } else {
        format!("{word}s")
    }
}
