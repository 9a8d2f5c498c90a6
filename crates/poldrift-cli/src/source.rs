//! Capture-file implementation of the collector output contract.
//!
//! A real collector polls hub APIs with a bounded worker pool and writes
//! its results to a capture file; this module reads that file back as
//! typed [`HubCapture`]s. The diff core never touches the filesystem.

use serde::Deserialize;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use poldrift_core::collector::SnapshotSource;
use poldrift_core::{DriftError, DriftErrorKind, HubCapture};

use crate::errors::CliError;

/// On-disk shape of a collector capture file.
#[derive(Debug, Deserialize)]
struct CaptureFile {
    hubs: BTreeMap<String, HubCapture>,
}

/// A [`SnapshotSource`] backed by one parsed capture file.
pub struct CaptureFileSource {
    path: PathBuf,
    hubs: BTreeMap<String, HubCapture>,
}

impl CaptureFileSource {
    /// Read and parse a capture file.
    pub fn open(path: &Path) -> Result<Self, CliError> {
        let bytes = std::fs::read(path).map_err(|e| CliError::io(path, e))?;
        let file: CaptureFile =
            serde_json::from_slice(&bytes).map_err(|e| CliError::InvalidCapture {
                path: path.to_path_buf(),
                message: e.to_string(),
            })?;
        Ok(Self {
            path: path.to_path_buf(),
            hubs: file.hubs,
        })
    }

    /// Collect every hub in the file into a capture map.
    pub fn collect_all(&self) -> Result<BTreeMap<String, HubCapture>, CliError> {
        let mut captures = BTreeMap::new();
        for hub in self.hubs.keys() {
            let capture = self.collect(hub, &[])?;
            captures.insert(hub.clone(), capture);
        }
        Ok(captures)
    }
}

impl SnapshotSource for CaptureFileSource {
    fn collect(&self, hub: &str, _namespaces: &[String]) -> poldrift_core::Result<HubCapture> {
        self.hubs.get(hub).cloned().ok_or_else(|| {
            DriftError::new(DriftErrorKind::ExternalService)
                .with_op("collect")
                .with_hub(hub)
                .with_message(format!(
                    "hub not present in capture file {}",
                    self.path.display()
                ))
        })
    }
}
