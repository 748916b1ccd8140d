// src/bin/smellfix.rs
use std::process;

use anyhow::Result;
use clap::Parser;
use colored::Colorize;

use smellfix_core::cli::{self, Cli, Commands, FixArgs};
use smellfix_core::logging::init_logging;

fn main() {
    if let Err(e) = run() {
        eprintln!("{} {e:#}", "error:".red().bold());
        process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);
    dispatch(cli.command)
}

fn dispatch(command: Commands) -> Result<()> {
    match command {
        Commands::Init { dir, force } => cli::handle_init(&dir, force),
        Commands::Roots { dir } => cli::handle_roots(&dir),
        Commands::Smells { dir } => cli::handle_smells(&dir),
        Commands::Fix {
            dir,
            findings,
            reported,
            from_smells,
            rules,
            dry_run,
            commit,
        } => cli::handle_fix(&FixArgs {
            dir,
            findings,
            reported,
            from_smells,
            rules,
            dry_run,
            commit,
        }),
        Commands::Findings { file, dir, all } => cli::handle_findings(&file, &dir, all),
        Commands::Remote { url, findings } => cli::handle_remote(&url, findings.as_deref()),
    }
}
