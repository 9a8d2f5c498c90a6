//! Comparison output types.
//!
//! All types implement `Debug, Clone, Serialize, Deserialize, PartialEq`.
//! Collections use `BTreeMap`/`BTreeSet` and sorted `Vec` for
//! deterministic serialization. Comparisons are value objects: created
//! fresh by each diff invocation, handed to a reporter, then discarded.

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

use crate::model::policy::{policy_keyed_map, PolicyKeyed};
use crate::model::{ClusterComplianceEntry, ComplianceValue, PolicyDetails, PolicyKey, SnapshotPhase};

/// Transition class of one policy, derived purely from its before/after
/// overall compliance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ComplianceCategory {
    /// Was Compliant or Unknown before, NonCompliant after
    NewlyNonCompliant,
    /// NonCompliant on both sides
    StillNonCompliant,
    /// Everything else (including policies that recovered)
    Compliant,
}

/// A per-cluster compliance transition. Exists only for clusters where
/// before != after.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClusterChange {
    pub cluster_name: String,
    pub before: ComplianceValue,
    pub after: ComplianceValue,
}

/// Comparison of one policy across the pre and post snapshots.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PolicyComparison {
    /// Identity of the compared policy
    pub key: PolicyKey,

    /// Overall compliance before the deployment (Unknown if absent pre)
    pub before: ComplianceValue,

    /// Overall compliance after the deployment (Unknown if absent post)
    pub after: ComplianceValue,

    /// True iff at least one cluster-level transition was detected.
    ///
    /// Per-cluster comparison is the authoritative change signal; the
    /// overall scalars are not consulted for this flag.
    pub changed: bool,

    /// Every cluster whose compliance differs between the two sides,
    /// cluster-name ascending
    pub cluster_changes: Vec<ClusterChange>,

    /// All clusters currently (post-side) NonCompliant, whether or not
    /// they changed, cluster-name ascending
    pub non_compliant_clusters: Vec<ClusterComplianceEntry>,

    /// Transition class derived from (before, after)
    pub category: ComplianceCategory,

    /// Policy metadata, post-side preferred, pre as fallback
    pub details: PolicyDetails,
}

impl PolicyComparison {
    /// Whether this policy is currently non-compliant, judged from the
    /// post-side cluster union rather than the overall scalar
    pub fn is_currently_non_compliant(&self) -> bool {
        !self.non_compliant_clusters.is_empty()
    }
}

impl PolicyKeyed for PolicyComparison {
    fn policy_key(&self) -> &PolicyKey {
        &self.key
    }
}

/// Summary counts for one hub's comparison.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct HubTotals {
    /// Policies currently present (size of the post snapshot; policies
    /// deleted between pre and post are excluded from this count but still
    /// appear in `HubComparison::policies`)
    pub total_policies: usize,

    /// Policies with at least one cluster-level transition
    pub policies_changed: usize,

    /// Policies with at least one currently NonCompliant cluster
    pub currently_non_compliant: usize,

    /// Union of cluster names appearing in any policy's transitions
    pub clusters_with_changes: BTreeSet<String>,
}

/// A per-hub collection failure, propagated from the collector.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CollectionError {
    /// Which invocation failed to sample the hub
    pub phase: SnapshotPhase,
    /// The collector's reason
    pub error: String,
}

/// Comparison of all policies on one hub.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HubComparison {
    /// Hub this comparison describes
    pub hub: String,

    /// One comparison per policy in the union of both snapshots
    #[serde(with = "policy_keyed_map")]
    pub policies: BTreeMap<PolicyKey, PolicyComparison>,

    /// Summary counts for this hub
    pub totals: HubTotals,

    /// Every managed cluster observed on either side of any policy
    pub managed_clusters: BTreeSet<String>,

    /// Collection failures for this hub; non-empty means the hub could not
    /// be sampled in at least one phase and `policies`/`totals` are empty
    pub collection_errors: Vec<CollectionError>,
}

impl HubComparison {
    /// An empty comparison carrying only collection errors
    pub fn unreachable(hub: impl Into<String>, errors: Vec<CollectionError>) -> Self {
        Self {
            hub: hub.into(),
            policies: BTreeMap::new(),
            totals: HubTotals::default(),
            managed_clusters: BTreeSet::new(),
            collection_errors: errors,
        }
    }

    /// Whether this hub was sampled successfully in both phases
    pub fn is_compared(&self) -> bool {
        self.collection_errors.is_empty()
    }
}

/// A managed cluster qualified by its hub.
///
/// Cluster names are only unique within one hub; the pair is the identity.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct HubClusterRef {
    pub hub: String,
    pub cluster: String,
}

/// Summary counts folded across all hubs.
///
/// The fold is a plain summation (commutative and associative), so hub
/// processing order never affects the result.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct AggregateTotals {
    /// Sum of per-hub `total_policies`
    pub total_policies: usize,

    /// Sum of per-hub `policies_changed`
    pub policies_changed: usize,

    /// Sum of per-hub `currently_non_compliant`
    pub currently_non_compliant: usize,

    /// Sum of per-hub `clusters_with_changes` set sizes (cluster names are
    /// only unique per hub, so the sum equals the count of distinct
    /// (hub, cluster) pairs with transitions)
    pub clusters_with_changes: usize,

    /// Hubs sampled successfully in both phases
    pub hubs_compared: usize,

    /// Hubs excluded from every count above because collection failed;
    /// never conflated with "hub has zero policies"
    pub hubs_unreachable: usize,
}

impl AggregateTotals {
    /// Fold one hub's totals into the aggregate
    pub fn absorb(&mut self, totals: &HubTotals) {
        self.total_policies += totals.total_policies;
        self.policies_changed += totals.policies_changed;
        self.currently_non_compliant += totals.currently_non_compliant;
        self.clusters_with_changes += totals.clusters_with_changes.len();
    }
}

/// Comparison across every hub present in either capture set.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MultiHubComparison {
    /// Schema version of this comparison structure (always 1)
    pub comparison_schema_version: u32,

    /// One comparison per hub, keyed by hub name
    pub hubs: BTreeMap<String, HubComparison>,

    /// Folded summary counts
    pub totals: AggregateTotals,

    /// Every (hub, cluster) pair observed in any hub comparison, each
    /// counted once regardless of how many policies reference it
    pub all_managed_clusters: BTreeSet<HubClusterRef>,
}
