//! Pre-deployment capture command

use clap::Args;
use std::path::PathBuf;

use poldrift_core::archive::codec::encode_archive;
use poldrift_core::archive::build_archive;
use poldrift_core::model::SnapshotPhase;
use poldrift_core::{log_op_end, log_op_start};

use crate::errors::CliError;
use crate::source::CaptureFileSource;

#[derive(Debug, Args)]
pub struct PreArgs {
    /// Collector capture file to persist as pre-deployment state
    #[arg(long)]
    pub capture: PathBuf,

    /// Where to write the durable pre-deployment state
    #[arg(long, default_value = ".poldrift/pre-state.json")]
    pub state: PathBuf,
}

pub fn execute(args: PreArgs) -> Result<(), CliError> {
    let started = std::time::Instant::now();
    log_op_start!("pre", capture = %args.capture.display());

    let source = CaptureFileSource::open(&args.capture)?;
    let hubs = source.collect_all()?;

    let hub_count = hubs.len();
    let unreachable = hubs.values().filter(|c| c.error().is_some()).count();

    let archive = build_archive(SnapshotPhase::Pre, hubs)?;
    let bytes = encode_archive(&archive)?;

    if let Some(parent) = args.state.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent).map_err(|e| CliError::io(parent, e))?;
        }
    }
    std::fs::write(&args.state, &bytes).map_err(|e| CliError::io(&args.state, e))?;

    log_op_end!(
        "pre",
        duration_ms = started.elapsed().as_millis() as u64,
        hub_count,
        unreachable,
        state = %args.state.display()
    );
    println!("Pre-deployment state captured:");
    println!("  hubs: {}", hub_count);
    if unreachable > 0 {
        println!("  unreachable: {}", unreachable);
    }
    println!("  state: {}", args.state.display());

    Ok(())
}
