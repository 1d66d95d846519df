// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! morty - drives an AI-assisted execution loop over a structured Plan.

mod color;
mod commands;
mod config_paths;
mod table;

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tokio_util::sync::CancellationToken;

#[derive(Parser)]
#[command(name = "morty", version, about = "Drives an AI-assisted execution loop over a structured Plan")]
struct Cli {
    /// Change to <dir> before doing anything
    #[arg(short = 'C', global = true, value_name = "DIR")]
    directory: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the Engine to terminal status
    Doing(commands::doing::DoingArgs),
    /// Print state summary and per-module/per-job status
    Stat(commands::stat::StatArgs),
    /// Reset the repository and state to a past loop or commit
    Reset(commands::reset::ResetArgs),
    /// Validate and display a Plan document (not yet implemented)
    Plan(commands::plan::PlanArgs),
    /// Generate a Plan from a research prompt (not yet implemented)
    Research(commands::research::ResearchArgs),
}

fn init_tracing() {
    use tracing_subscriber::EnvFilter;
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();
}

/// Installs a single SIGINT/SIGTERM handler that cancels `token`. Idempotent:
/// a second call is a no-op since each invocation spawns its own listener
/// task, but `main` only ever calls this once.
fn install_signal_handler(token: CancellationToken) {
    tokio::spawn(async move {
        let ctrl_c = tokio::signal::ctrl_c();
        #[cfg(unix)]
        {
            let mut term = match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
                Ok(s) => s,
                Err(_) => return,
            };
            tokio::select! {
                _ = ctrl_c => {}
                _ = term.recv() => {}
            }
        }
        #[cfg(not(unix))]
        {
            let _ = ctrl_c.await;
        }
        token.cancel();
    });
}

#[tokio::main]
async fn main() {
    if let Err(e) = run().await {
        tracing::error!(error = %e, "command failed");
        eprintln!("Error: {e:#}");
        std::process::exit(1);
    }
}

async fn run() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();

    if let Some(dir) = &cli.directory {
        std::env::set_current_dir(dir).map_err(|e| anyhow::anyhow!("cannot change to directory '{}': {e}", dir.display()))?;
    }

    let cancel = CancellationToken::new();
    install_signal_handler(cancel.clone());

    match cli.command {
        Commands::Doing(args) => commands::doing::handle(args, cancel).await,
        Commands::Stat(args) => commands::stat::handle(args),
        Commands::Reset(args) => commands::reset::handle(args),
        Commands::Plan(args) => commands::plan::handle(args),
        Commands::Research(args) => commands::research::handle(args),
    }
}

#[cfg(test)]
#[path = "main_tests.rs"]
mod tests;
