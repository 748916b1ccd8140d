// src/cli/args.rs
use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "smellfix", version, about = "Repairs code smells reported by static analyzers")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
    /// More log output (-v info, -vv debug). `SMELLFIX_LOG` overrides.
    #[arg(long, short, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Write a default smellfix.toml
    Init {
        #[arg(default_value = ".")]
        dir: PathBuf,
        /// Overwrite an existing configuration
        #[arg(long)]
        force: bool,
    },
    /// List the source roots of a project
    Roots {
        #[arg(default_value = ".")]
        dir: PathBuf,
    },
    /// Detect smells without changing anything
    Smells {
        #[arg(default_value = ".")]
        dir: PathBuf,
    },
    /// Repair smells in a project
    Fix {
        #[arg(default_value = ".")]
        dir: PathBuf,
        /// Analyzer findings (JSON); only these places are repaired
        #[arg(long, value_name = "FILE")]
        findings: Option<PathBuf>,
        /// Previously rendered changelog; findings listed there are skipped
        #[arg(long, value_name = "FILE")]
        reported: Option<PathBuf>,
        /// Detect smells first and only repair where one was found
        #[arg(long)]
        from_smells: bool,
        /// Restrict to these analyzer rules instead of the configured ones
        #[arg(long = "rule", value_name = "ID")]
        rules: Vec<String>,
        /// Transform in memory without saving
        #[arg(long)]
        dry_run: bool,
        /// Commit the result with the changelog as message
        #[arg(long, conflicts_with = "dry_run")]
        commit: bool,
    },
    /// Render an analyzer findings report
    Findings {
        /// Analyzer findings (JSON)
        file: PathBuf,
        /// Project whose configuration decides which rules are repairable
        #[arg(long, default_value = ".")]
        dir: PathBuf,
        /// Include findings no processor can repair, with a summary table
        #[arg(long)]
        all: bool,
    },
    /// Clone a repository into a scratch checkout and report what would change
    Remote {
        url: String,
        #[arg(long, value_name = "FILE")]
        findings: Option<PathBuf>,
    },
}
