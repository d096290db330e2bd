//! vsselect CLI - Visual Studio version selection

use anyhow::Result;
use clap::Parser;
use miette::Diagnostic;
use tracing_subscriber::EnvFilter;

mod cli;
mod commands;

use cli::{Cli, Commands};
use vsselect::{DescriptorError, SelectError};

fn main() {
    if let Err(e) = run() {
        eprintln!("error: {:#}", e);
        if let Some(help) = diagnostic_help(&e) {
            eprintln!("help: {}", help);
        }
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    // Parse CLI
    let cli = Cli::parse();

    // Set up logging
    let filter = if cli.verbose {
        EnvFilter::new("vsselect=debug")
    } else {
        EnvFilter::new("vsselect=info")
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .without_time()
        .init();

    // Execute command
    match cli.command {
        Commands::Show(args) => commands::show::execute(args),
        Commands::Detect(args) => commands::detect::execute(args),
        Commands::Setup(args) => commands::setup::execute(args),
        Commands::Tool(args) => commands::tool::execute(args),
        Commands::Completions(args) => commands::completions::execute(args),
    }
}

/// Help text attached to the library's diagnostics, if any.
fn diagnostic_help(e: &anyhow::Error) -> Option<String> {
    let help = if let Some(diag) = e.downcast_ref::<SelectError>() {
        diag.help()
    } else if let Some(diag) = e.downcast_ref::<DescriptorError>() {
        diag.help()
    } else {
        None
    };
    help.map(|h| h.to_string())
}
