//! poldrift core - pre/post compliance-state diff engine
//!
//! This crate provides the data model and pure comparison logic for
//! tracking policy-compliance drift across a deployment, including:
//! - Typed compliance model (policies, managed clusters, snapshots)
//! - Per-policy and per-hub diff computation over two snapshots
//! - Multi-hub aggregation with explicit unreachable-hub markers
//! - A durable archive codec for persisting pre-deployment state
//! - The output contract of the external snapshot collector
//!
//! The diff engine and aggregator are pure, deterministic functions over
//! immutable inputs; all I/O lives in callers.

pub mod archive;
pub mod collector;
pub mod diff;
pub mod errors;
pub mod logging_facility;
pub mod model;

// Re-exported for macro expansions
#[doc(hidden)]
pub use poldrift_core_types as core_types;

// Re-export commonly used types
pub use diff::{diff_all, diff_hub, diff_policy};
pub use diff::{HubComparison, MultiHubComparison, PolicyComparison};
pub use errors::{DriftError, DriftErrorKind, Result};
pub use model::{ComplianceValue, HubCapture, PolicyKey, PolicyRecord, Snapshot, SnapshotPhase};
