//! # netreport Main Entry Point
//!
//! File: cli/src/main.rs
//!
//! ## Overview
//!
//! This file serves as the main entry point for the netreport CLI.
//! It handles:
//! - Command-line argument parsing using Clap
//! - Setting up the logging system based on verbosity flags
//! - Running the report command
//!
//! ## Examples
//!
//! ```bash
//! # Print the report
//! netreport
//!
//! # Same, with debug logs on stderr
//! netreport -vv
//! ```
//!
//! Command processing flow:
//! 1. Parse command-line args via Clap
//! 2. Configure logging based on verbosity level
//! 3. Produce the report
//! 4. Format and display any error that stops the run
//!
use clap::Parser;
use tracing_subscriber::{fmt, EnvFilter};

mod commands; // The report command
mod common; // Process runner and network context discovery
mod core; // Errors and configuration

/// Top-level command-line arguments.
#[derive(Parser, Debug)]
#[command(
    name = "netreport",
    about = "Network diagnostic report",
    long_about = "Discovers the default interface, its CIDR and the wireless interface, then runs\n\
                  nmap, iw and speedtest concurrently and prints a single report.",
    version
)]
struct Cli {
    #[command(flatten)]
    report: commands::report::ReportArgs,
    /// Increase log verbosity (-v info, -vv debug, -vvv trace). Logs go to stderr.
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
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

    if let Err(e) = commands::report::handle_report(cli.report).await {
        tracing::error!("Report failed: {:?}", e);
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }

    Ok(())
}
