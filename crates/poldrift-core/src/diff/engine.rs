//! Per-policy and per-hub diff computation.
//!
//! The entry points are [`diff_policy`] and [`diff_hub`]. Both are total
//! over well-formed snapshots: absence of a record, an empty snapshot, or
//! a record with zero clusters are ordinary inputs, not errors.

use std::collections::BTreeSet;

use crate::diff::model::{
    ClusterChange, ComplianceCategory, HubComparison, HubTotals, PolicyComparison,
};
use crate::model::{ComplianceValue, PolicyDetails, PolicyKey, PolicyRecord, Snapshot};

/// Derive the transition class from the before/after overall compliance.
fn categorize(before: ComplianceValue, after: ComplianceValue) -> ComplianceCategory {
    match (before, after) {
        (ComplianceValue::NonCompliant, ComplianceValue::NonCompliant) => {
            ComplianceCategory::StillNonCompliant
        }
        (_, ComplianceValue::NonCompliant) => ComplianceCategory::NewlyNonCompliant,
        _ => ComplianceCategory::Compliant,
    }
}

/// Resolve the metadata carried through a comparison: post preferred, pre
/// as fallback, default when both sides are absent.
fn resolve_details(
    pre: Option<&PolicyRecord>,
    post: Option<&PolicyRecord>,
) -> PolicyDetails {
    post.or(pre)
        .map(|record| record.details.clone())
        .unwrap_or_default()
}

/// Compare one policy across the pre and post snapshots.
///
/// Either side may be absent (a policy created or deleted between the two
/// captures); the absent side reads as overall `Unknown` with an empty
/// cluster map. The cluster keyspace is the union of both sides: a cluster
/// missing from one side reads as `Unknown` there, and a [`ClusterChange`]
/// is recorded only when the two sides disagree. `cluster_changes` and
/// `non_compliant_clusters` are ordered cluster-name ascending.
pub fn diff_policy(
    key: &PolicyKey,
    pre: Option<&PolicyRecord>,
    post: Option<&PolicyRecord>,
) -> PolicyComparison {
    let before = pre
        .map(|r| r.overall_compliance)
        .unwrap_or(ComplianceValue::Unknown);
    let after = post
        .map(|r| r.overall_compliance)
        .unwrap_or(ComplianceValue::Unknown);

    // Union of cluster names across both sides, sorted by BTreeSet.
    let mut cluster_names: BTreeSet<&str> = BTreeSet::new();
    if let Some(record) = pre {
        cluster_names.extend(record.cluster_status.keys().map(|s| s.as_str()));
    }
    if let Some(record) = post {
        cluster_names.extend(record.cluster_status.keys().map(|s| s.as_str()));
    }

    let mut cluster_changes = Vec::new();
    let mut non_compliant_clusters = Vec::new();
    for name in &cluster_names {
        let cluster_before = pre
            .map(|r| r.cluster_compliance(name))
            .unwrap_or(ComplianceValue::Unknown);
        let cluster_after = post
            .map(|r| r.cluster_compliance(name))
            .unwrap_or(ComplianceValue::Unknown);

        if cluster_before != cluster_after {
            cluster_changes.push(ClusterChange {
                cluster_name: name.to_string(),
                before: cluster_before,
                after: cluster_after,
            });
        }

        // "All currently non-compliant", not "newly non-compliant": the
        // post-side entry qualifies independently of whether it changed.
        if cluster_after.is_non_compliant() {
            if let Some(entry) = post.and_then(|r| r.cluster_status.get(*name)) {
                non_compliant_clusters.push(entry.clone());
            }
        }
    }

    let changed = !cluster_changes.is_empty();

    PolicyComparison {
        key: key.clone(),
        before,
        after,
        changed,
        cluster_changes,
        non_compliant_clusters,
        category: categorize(before, after),
        details: resolve_details(pre, post),
    }
}

/// Compare every policy on one hub across two snapshots.
///
/// The policy keyspace is the union of both snapshots; no key is skipped,
/// including policies present on only one side. Both snapshots are assumed
/// already scoped to `hub` (scoping is the collector's responsibility).
///
/// `totals.total_policies` counts the post snapshot only: a policy deleted
/// between pre and post still surfaces in `policies` for transition
/// visibility but does not inflate the current total.
pub fn diff_hub(hub: &str, pre: &Snapshot, post: &Snapshot) -> HubComparison {
    let keys: BTreeSet<&PolicyKey> = pre.policies.keys().chain(post.policies.keys()).collect();

    let mut comparison = HubComparison {
        hub: hub.to_string(),
        policies: Default::default(),
        totals: HubTotals {
            total_policies: post.len(),
            ..Default::default()
        },
        managed_clusters: BTreeSet::new(),
        collection_errors: Vec::new(),
    };

    for key in keys {
        let pre_record = pre.get(key);
        let post_record = post.get(key);

        for record in [pre_record, post_record].into_iter().flatten() {
            comparison
                .managed_clusters
                .extend(record.cluster_status.keys().cloned());
        }

        let policy = diff_policy(key, pre_record, post_record);
        if policy.changed {
            comparison.totals.policies_changed += 1;
            comparison.totals.clusters_with_changes.extend(
                policy
                    .cluster_changes
                    .iter()
                    .map(|c| c.cluster_name.clone()),
            );
        }
        if policy.is_currently_non_compliant() {
            comparison.totals.currently_non_compliant += 1;
        }
        comparison.policies.insert(key.clone(), policy);
    }

    comparison
}
