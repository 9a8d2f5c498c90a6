//! Compliance data model: policies, managed clusters, snapshots.
//!
//! Snapshots are read-only inputs to the diff engine; they are produced
//! once per collection run and never mutated afterwards.

pub mod compliance;
pub mod policy;
pub mod snapshot;

pub use compliance::{ComplianceValue, RemediationMode};
pub use policy::{
    policy_keyed_map, ClusterComplianceEntry, PolicyDetails, PolicyKey, PolicyKeyed, PolicyRecord,
};
pub use snapshot::{HubCapture, Snapshot, SnapshotPhase};
