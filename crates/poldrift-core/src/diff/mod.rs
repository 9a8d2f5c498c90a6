//! Pre/post compliance comparison.
//!
//! [`engine`] computes per-policy and per-hub comparisons between two
//! snapshots; [`aggregate`] fans the engine out over every hub present in
//! either capture set and folds the results into multi-hub totals.
//!
//! All functions here are pure and deterministic: no I/O, no shared
//! mutable state, inputs taken by shared reference only. Callers may run
//! them concurrently (e.g. one hub per worker) without synchronization.

pub mod aggregate;
pub mod engine;
pub mod model;

pub use aggregate::diff_all;
pub use engine::{diff_hub, diff_policy};
pub use model::{
    AggregateTotals, ClusterChange, CollectionError, ComplianceCategory, HubClusterRef,
    HubComparison, HubTotals, MultiHubComparison, PolicyComparison,
};
