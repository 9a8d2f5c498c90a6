//! poldrift CLI
//!
//! Two-invocation automation surface: `pre` persists a collection run as
//! the durable pre-deployment state, `post` loads it, takes the fresh
//! capture, and emits the multi-hub comparison for a reporter.

use clap::{Parser, Subcommand};
use poldrift_core::logging_facility::{self, Profile};

mod commands;
mod errors;
mod source;

#[derive(Debug, Parser)]
#[command(name = "poldrift")]
#[command(about = "Pre/post deployment policy-compliance drift", long_about = None)]
struct Cli {
    /// Emit JSON logs (for automation) instead of human-readable output
    #[arg(long, global = true)]
    json_logs: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Capture and persist the pre-deployment compliance state
    Pre(commands::pre::PreArgs),
    /// Compare the persisted pre state against a fresh capture
    Post(commands::post::PostArgs),
}

fn main() {
    let cli = Cli::parse();

    logging_facility::init(if cli.json_logs {
        Profile::Production
    } else {
        Profile::Development
    });

    let started = std::time::Instant::now();
    let (op, result) = match cli.command {
        Commands::Pre(args) => ("pre", commands::pre::execute(args)),
        Commands::Post(args) => ("post", commands::post::execute(args)),
    };

    if let Err(e) = result {
        poldrift_core::log_op_error!(op, e, duration_ms = started.elapsed().as_millis() as u64);
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
