//! # fileutils Main Entry Point
//!
//! File: cli/src/main.rs
//!
//! ## Overview
//!
//! Entry point for the `fileutils` CLI. It handles:
//! - Command-line argument parsing using Clap
//! - Setting up the logging system based on verbosity flags
//! - Loading the layered configuration
//! - Routing execution to the command handlers
//!
//! ## Examples
//!
//! ```bash
//! fileutils --help
//! fileutils -v ls data/ -r -e .jpg
//! fileutils -vv cp --batch pairs.tsv
//! ```
//!
//! Logs go to stderr so command output on stdout stays pipeable. `RUST_LOG`
//! overrides the level picked from `-v`.
//!
use clap::Parser;
use fileutils::core::config;
use tracing_subscriber::{fmt, EnvFilter};

mod commands;

#[derive(Parser, Debug)]
#[command(
    name = "fileutils",
    about = "File helpers for data-processing scripts",
    long_about = "List directories, copy and move files, and convert between JSON-lines,\n\
                  JSON, CSV and image files.",
    propagate_version = true,
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,
}

#[derive(Parser, Debug)]
enum Commands {
    Ls(commands::ls::LsArgs),
    Cp(commands::copy::CpArgs),
    Mv(commands::copy::MvArgs),
    #[command(alias = "c")]
    Convert(commands::convert::ConvertArgs),
    Time(commands::time::TimeArgs),
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let log_level = match cli.verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(log_level));
    fmt::Subscriber::builder()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .compact()
        .init();

    tracing::debug!("Parsed CLI arguments: {:?}", cli);

    let command_result = config::load_config().and_then(|cfg| match cli.command {
        Commands::Ls(args) => commands::ls::handle_ls(args),
        Commands::Cp(args) => commands::copy::handle_cp(args, &cfg),
        Commands::Mv(args) => commands::copy::handle_mv(args),
        Commands::Convert(args) => commands::convert::handle_convert(args, &cfg),
        Commands::Time(args) => commands::time::handle_time(args, &cfg),
    });

    if let Err(e) = command_result {
        tracing::error!("Command execution failed: {:?}", e);
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }

    Ok(())
}
