mod activity;
mod churn;
mod classify;
mod cli;
mod compliance;
mod config;
mod contributors;
mod deadcode;
mod git;
mod inventory;
mod report;
mod report_helpers;
mod search;
mod security;
mod stack;
mod summary;
mod util;
mod walk;

use std::error::Error;
use std::io;
use std::path::PathBuf;

use clap::{CommandFactory, Parser};

use cli::{Cli, Commands, CommonArgs};
use config::Config;

/// Resolve the target directory and load its configuration.
fn prepare(common: &CommonArgs) -> Result<(PathBuf, Config), Box<dyn Error>> {
    let target = common.path.clone().unwrap_or_else(|| PathBuf::from("."));
    let config = Config::load(&target, common.config.as_deref())?;
    Ok((target, config))
}

fn dispatch(command: Commands) -> Result<(), Box<dyn Error>> {
    match command {
        Commands::Report {
            common,
            since,
            depth,
            no_summary,
        } => {
            let (target, mut config) = prepare(&common)?;
            if let Some(depth) = depth {
                config.history_depth = depth;
            }
            report::run(&target, common.json, since.as_deref(), no_summary, &config)
        }
        Commands::Contributors {
            common,
            top,
            since,
            depth,
        } => {
            let (target, mut config) = prepare(&common)?;
            if let Some(depth) = depth {
                config.history_depth = depth;
            }
            contributors::run(&target, common.json, top, since.as_deref(), &config)
        }
        Commands::Churn { common, top, since } => {
            let (target, config) = prepare(&common)?;
            let top = top.unwrap_or(config.churn_top);
            churn::run(&target, common.json, top, since.as_deref())
        }
        Commands::Deadcode { common, kind, top } => {
            let (target, config) = prepare(&common)?;
            deadcode::run(&target, common.json, top, kind, &config)
        }
        Commands::Compliance { common } => {
            let (target, config) = prepare(&common)?;
            compliance::run(&target, common.json, &config)
        }
        Commands::Security { common } => {
            let (target, config) = prepare(&common)?;
            security::run(&target, common.json, &config)
        }
        Commands::Completions { shell } => {
            clap_complete::generate(shell, &mut Cli::command(), "rastro", &mut io::stdout());
            Ok(())
        }
    }
}

fn main() {
    // stdout carries the report; diagnostics go to stderr
    tracing_subscriber::fmt()
        .with_writer(io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .init();

    let cli = Cli::parse();
    if let Err(err) = dispatch(cli.command) {
        eprintln!("error: {err}");
        std::process::exit(1);
    }
}
