//! Post-deployment comparison command

use clap::Args;
use std::path::PathBuf;

use poldrift_core::archive::codec::parse_archive_bytes;
use poldrift_core::diff::diff_all;
use poldrift_core::model::SnapshotPhase;
use poldrift_core::{log_op_end, log_op_start, DriftError, DriftErrorKind};

use crate::errors::CliError;
use crate::source::CaptureFileSource;

#[derive(Debug, Args)]
pub struct PostArgs {
    /// Collector capture file holding the fresh post-deployment state
    #[arg(long)]
    pub capture: PathBuf,

    /// Persisted pre-deployment state written by `poldrift pre`
    #[arg(long, default_value = ".poldrift/pre-state.json")]
    pub state: PathBuf,

    /// Where to write the comparison JSON (stdout when omitted)
    #[arg(long)]
    pub out: Option<PathBuf>,
}

pub fn execute(args: PostArgs) -> Result<(), CliError> {
    let started = std::time::Instant::now();
    log_op_start!("post", state = %args.state.display(), capture = %args.capture.display());

    let state_bytes = std::fs::read(&args.state).map_err(|e| CliError::io(&args.state, e))?;
    let pre_archive = parse_archive_bytes(&state_bytes)?;
    if pre_archive.phase != SnapshotPhase::Pre {
        return Err(CliError::WrongPhase {
            path: args.state.clone(),
            found: pre_archive.phase.to_string(),
            expected: SnapshotPhase::Pre.to_string(),
        });
    }

    let source = CaptureFileSource::open(&args.capture)?;
    let post_hubs = source.collect_all()?;

    let comparison = diff_all(&pre_archive.hubs, &post_hubs);

    let json = serde_json::to_vec_pretty(&comparison).map_err(|e| {
        DriftError::new(DriftErrorKind::Serialization)
            .with_op("post")
            .with_message(format!("failed to serialize comparison: {}", e))
    })?;

    match &args.out {
        Some(path) => {
            if let Some(parent) = path.parent() {
                if !parent.as_os_str().is_empty() {
                    std::fs::create_dir_all(parent).map_err(|e| CliError::io(parent, e))?;
                }
            }
            std::fs::write(path, &json).map_err(|e| CliError::io(path, e))?;
        }
        None => {
            use std::io::Write;
            let mut stdout = std::io::stdout().lock();
            stdout
                .write_all(&json)
                .and_then(|()| stdout.write_all(b"\n"))
                .map_err(|e| CliError::io("<stdout>", e))?;
        }
    }

    log_op_end!(
        "post",
        duration_ms = started.elapsed().as_millis() as u64,
        hubs_compared = comparison.totals.hubs_compared,
        hubs_unreachable = comparison.totals.hubs_unreachable,
        policies_changed = comparison.totals.policies_changed
    );
    // Stdout carries the comparison JSON when --out is omitted; the human
    // summary only prints when the JSON went to a file.
    if let Some(path) = &args.out {
        println!("Comparison complete:");
        println!("  hubs compared: {}", comparison.totals.hubs_compared);
        if comparison.totals.hubs_unreachable > 0 {
            println!("  hubs unreachable: {}", comparison.totals.hubs_unreachable);
        }
        println!("  policies (current): {}", comparison.totals.total_policies);
        println!("  policies changed: {}", comparison.totals.policies_changed);
        println!(
            "  currently non-compliant: {}",
            comparison.totals.currently_non_compliant
        );
        println!("  comparison: {}", path.display());
    }

    Ok(())
}
