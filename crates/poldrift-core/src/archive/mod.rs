//! Durable snapshot archive.
//!
//! The pre-deployment capture is taken in one process invocation and
//! consumed by a separate invocation after a settle interval, so it is
//! persisted as a keyed JSON document with a schema version and an
//! integrity digest. The codec here is bytes-in/bytes-out; reading and
//! writing files is the caller's concern.
//!
//! ## Schema Version
//!
//! Current archive schema version: **1**
//!
//! ## Archive Fields
//!
//! - `archive_schema_version`: Schema version (currently 1)
//! - `captured_at`: RFC3339 timestamp
//! - `phase`: Which half of the comparison this capture belongs to
//! - `hubs`: Per-hub capture outcomes (snapshot or unreachable marker)
//! - `archive_digest`: SHA256 over the archive with this field blanked

pub mod codec;
pub mod digest;

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::errors::Result;
use crate::model::{HubCapture, SnapshotPhase};

/// Archive schema version written by this build.
pub const ARCHIVE_SCHEMA_VERSION: u32 = 1;

/// A persisted collection run: every hub's capture outcome plus identity
/// and integrity metadata.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SnapshotArchive {
    /// Archive schema version (currently 1)
    pub archive_schema_version: u32,

    /// RFC3339 timestamp of capture
    pub captured_at: String,

    /// Which half of the comparison this capture belongs to
    pub phase: SnapshotPhase,

    /// Per-hub capture outcomes, keyed by hub name
    pub hubs: BTreeMap<String, HubCapture>,

    /// SHA256 digest over the archive with this field blanked
    pub archive_digest: String,
}

/// Assemble an archive from capture outcomes, stamping the current time
/// and computing the integrity digest.
///
/// # Errors
///
/// Returns `Serialization` if digest computation fails.
pub fn build_archive(
    phase: SnapshotPhase,
    hubs: BTreeMap<String, HubCapture>,
) -> Result<SnapshotArchive> {
    let mut archive = SnapshotArchive {
        archive_schema_version: ARCHIVE_SCHEMA_VERSION,
        captured_at: chrono::Utc::now().to_rfc3339(),
        phase,
        hubs,
        archive_digest: String::new(),
    };
    archive.archive_digest = digest::compute_archive_digest(&archive)?;
    Ok(archive)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_archive_fills_digest_and_version() {
        let archive = build_archive(SnapshotPhase::Pre, BTreeMap::new()).unwrap();
        assert_eq!(archive.archive_schema_version, ARCHIVE_SCHEMA_VERSION);
        assert_eq!(archive.archive_digest.len(), 64);
        assert!(!archive.captured_at.is_empty());
    }
}
