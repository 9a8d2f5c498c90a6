//! Archive encode/parse.
//!
//! The entry points are [`encode_archive`] and [`parse_archive_bytes`].
//! Parsing is staged so that the error pinpoints the first violated
//! expectation: UTF-8, JSON shape, required fields, schema version, typed
//! deserialization, then integrity digest.

use serde_json::Value;
use std::collections::BTreeSet;

use crate::archive::digest::compute_archive_digest;
use crate::archive::{SnapshotArchive, ARCHIVE_SCHEMA_VERSION};
use crate::errors::{DriftError, DriftErrorKind, Result};

/// Known top-level archive fields used for unknown-field detection.
const KNOWN_FIELDS: &[&str] = &[
    "archive_schema_version",
    "captured_at",
    "phase",
    "hubs",
    "archive_digest",
];

/// Required top-level archive fields.
const REQUIRED_FIELDS: &[&str] = &[
    "archive_schema_version",
    "captured_at",
    "phase",
    "hubs",
    "archive_digest",
];

/// Serialize an archive to JSON bytes, filling in the integrity digest.
///
/// # Errors
///
/// - `Serialization` — the archive fails JSON serialization
/// - `DeterminismViolation` — the encoded bytes fail the internal
///   round-trip sanity check (should never occur in correct builds)
pub fn encode_archive(archive: &SnapshotArchive) -> Result<Vec<u8>> {
    let mut stamped = archive.clone();
    stamped.archive_digest = compute_archive_digest(&stamped)?;

    let bytes = serde_json::to_vec_pretty(&stamped).map_err(|e| {
        DriftError::new(DriftErrorKind::Serialization)
            .with_op("encode_archive")
            .with_message(format!("failed to serialize archive: {}", e))
    })?;

    // Determinism guard: parsing our own output must reproduce the value.
    let reparsed = parse_archive_bytes(&bytes).map_err(|e| {
        DriftError::new(DriftErrorKind::DeterminismViolation)
            .with_op("encode_archive")
            .with_message("encoded archive failed to re-parse")
            .with_source(e)
    })?;
    if reparsed != stamped {
        return Err(DriftError::new(DriftErrorKind::DeterminismViolation)
            .with_op("encode_archive")
            .with_message("archive round-trip produced a different value"));
    }

    Ok(bytes)
}

/// Parse raw archive bytes into a typed [`SnapshotArchive`].
///
/// # Errors
///
/// - `InvalidArchive` — bytes are not valid UTF-8, not valid JSON, the
///   root is not an object, or `archive_schema_version` is not an
///   unsigned integer
/// - `UnsupportedSchemaVersion` — the version is an integer this build
///   does not read
/// - `MissingField` — a required top-level field is absent
/// - `DigestMismatch` — the recorded digest disagrees with the recomputed
///   digest (the archive was altered after capture)
pub fn parse_archive_bytes(bytes: &[u8]) -> Result<SnapshotArchive> {
    // 1. UTF-8 decode
    let text = std::str::from_utf8(bytes).map_err(|e| {
        DriftError::new(DriftErrorKind::InvalidArchive)
            .with_op("parse_archive_bytes")
            .with_message(format!("archive is not valid UTF-8: {}", e))
    })?;

    // 2. JSON parse to generic Value
    let raw: Value = serde_json::from_str(text).map_err(|e| {
        DriftError::new(DriftErrorKind::InvalidArchive)
            .with_op("parse_archive_bytes")
            .with_message(format!("archive is not valid JSON: {}", e))
    })?;

    let obj = raw.as_object().ok_or_else(|| {
        DriftError::new(DriftErrorKind::InvalidArchive)
            .with_op("parse_archive_bytes")
            .with_message("archive JSON root must be an object")
    })?;

    // 3. Required fields must be present
    for field in REQUIRED_FIELDS {
        if !obj.contains_key(*field) {
            return Err(DriftError::new(DriftErrorKind::MissingField)
                .with_op("parse_archive_bytes")
                .with_message(format!("required field `{}` is absent", field)));
        }
    }

    // 4. Schema version must be an unsigned integer this build reads
    let version_value = &obj["archive_schema_version"];
    let version = version_value.as_u64().ok_or_else(|| {
        DriftError::new(DriftErrorKind::InvalidArchive)
            .with_op("parse_archive_bytes")
            .with_message(format!(
                "`archive_schema_version` must be an unsigned integer, got: {}",
                version_value
            ))
    })?;
    if version != u64::from(ARCHIVE_SCHEMA_VERSION) {
        return Err(DriftError::new(DriftErrorKind::UnsupportedSchemaVersion)
            .with_op("parse_archive_bytes")
            .with_message(format!(
                "archive schema version {} is not supported (this build reads {})",
                version, ARCHIVE_SCHEMA_VERSION
            )));
    }

    // 5. Unknown top-level fields are tolerated but surfaced
    let known: BTreeSet<&str> = KNOWN_FIELDS.iter().copied().collect();
    for key in obj.keys().filter(|k| !known.contains(k.as_str())) {
        tracing::warn!(field = %key, "ignoring unknown archive field");
    }

    // 6. Full typed deserialization
    let archive: SnapshotArchive = serde_json::from_value(raw.clone()).map_err(|e| {
        DriftError::new(DriftErrorKind::InvalidArchive)
            .with_op("parse_archive_bytes")
            .with_message(format!("failed to deserialize archive: {}", e))
    })?;

    // 7. Integrity check
    let computed = compute_archive_digest(&archive)?;
    if computed != archive.archive_digest {
        return Err(DriftError::new(DriftErrorKind::DigestMismatch)
            .with_op("parse_archive_bytes")
            .with_phase(archive.phase.to_string())
            .with_message(format!(
                "recorded digest {} does not match computed {}",
                archive.archive_digest, computed
            )));
    }

    Ok(archive)
}
