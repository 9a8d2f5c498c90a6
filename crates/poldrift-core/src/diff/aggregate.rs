//! Multi-hub aggregation.
//!
//! Fans [`diff_hub`](crate::diff::engine::diff_hub) out over every hub
//! present in either capture set and folds the per-hub totals into
//! [`AggregateTotals`]. The fold is commutative and associative, so hub
//! processing order never affects the result.

use std::collections::{BTreeMap, BTreeSet};

use crate::diff::engine::diff_hub;
use crate::diff::model::{
    AggregateTotals, CollectionError, HubClusterRef, HubComparison, MultiHubComparison,
};
use crate::model::{HubCapture, Snapshot, SnapshotPhase};

/// Schema version of [`MultiHubComparison`] (always 1 in this build).
pub const COMPARISON_SCHEMA_VERSION: u32 = 1;

/// Per-side view of one hub's capture: a snapshot to diff, or the
/// collection error that prevented one.
enum SideState<'a> {
    Sampled(&'a Snapshot),
    /// Hub absent from this side's capture set entirely (first run,
    /// decommissioned hub); reads as an empty snapshot, not an error.
    Absent,
    Failed(&'a str),
}

fn side_state<'a>(captures: &'a BTreeMap<String, HubCapture>, hub: &str) -> SideState<'a> {
    match captures.get(hub) {
        Some(HubCapture::Collected(snapshot)) => SideState::Sampled(snapshot),
        Some(HubCapture::Unreachable { error, .. }) => SideState::Failed(error),
        None => SideState::Absent,
    }
}

/// Compare every hub present in either capture set.
///
/// A hub missing from one side gets an empty snapshot substituted; a hub
/// marked unreachable on either side yields an empty [`HubComparison`]
/// carrying one [`CollectionError`] per failed phase. Unreachable hubs
/// contribute zero to every count and are excluded from the compared-hub
/// denominator, tracked separately in `totals.hubs_unreachable` — they are
/// never silently dropped and never conflated with "zero policies".
pub fn diff_all(
    pre: &BTreeMap<String, HubCapture>,
    post: &BTreeMap<String, HubCapture>,
) -> MultiHubComparison {
    let hub_names: BTreeSet<&str> = pre.keys().chain(post.keys()).map(|s| s.as_str()).collect();

    let mut hubs: BTreeMap<String, HubComparison> = BTreeMap::new();
    let mut totals = AggregateTotals::default();
    let mut all_managed_clusters: BTreeSet<HubClusterRef> = BTreeSet::new();

    for hub in hub_names {
        let pre_state = side_state(pre, hub);
        let post_state = side_state(post, hub);

        let mut errors = Vec::new();
        if let SideState::Failed(error) = &pre_state {
            errors.push(CollectionError {
                phase: SnapshotPhase::Pre,
                error: error.to_string(),
            });
        }
        if let SideState::Failed(error) = &post_state {
            errors.push(CollectionError {
                phase: SnapshotPhase::Post,
                error: error.to_string(),
            });
        }

        let comparison = if errors.is_empty() {
            let empty = Snapshot::empty(hub);
            let pre_snapshot = match pre_state {
                SideState::Sampled(snapshot) => snapshot,
                _ => &empty,
            };
            let post_snapshot = match post_state {
                SideState::Sampled(snapshot) => snapshot,
                _ => &empty,
            };

            let comparison = diff_hub(hub, pre_snapshot, post_snapshot);
            totals.hubs_compared += 1;
            totals.absorb(&comparison.totals);
            all_managed_clusters.extend(comparison.managed_clusters.iter().map(|cluster| {
                HubClusterRef {
                    hub: hub.to_string(),
                    cluster: cluster.clone(),
                }
            }));
            comparison
        } else {
            totals.hubs_unreachable += 1;
            HubComparison::unreachable(hub, errors)
        };

        hubs.insert(hub.to_string(), comparison);
    }

    MultiHubComparison {
        comparison_schema_version: COMPARISON_SCHEMA_VERSION,
        hubs,
        totals,
        all_managed_clusters,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{ComplianceValue, PolicyKey, PolicyRecord};

    #[test]
    fn test_empty_inputs_produce_empty_comparison() {
        let comparison = diff_all(&BTreeMap::new(), &BTreeMap::new());
        assert!(comparison.hubs.is_empty());
        assert_eq!(comparison.totals, AggregateTotals::default());
        assert!(comparison.all_managed_clusters.is_empty());
    }

    #[test]
    fn test_hub_absent_from_pre_is_compared_against_empty() {
        let mut snapshot = Snapshot::empty("hub-a");
        snapshot.insert(PolicyRecord::new(
            PolicyKey::new("ns1", "p1"),
            ComplianceValue::Compliant,
        ));
        let post = BTreeMap::from([(
            "hub-a".to_string(),
            HubCapture::Collected(snapshot),
        )]);

        let comparison = diff_all(&BTreeMap::new(), &post);
        assert_eq!(comparison.totals.hubs_compared, 1);
        assert_eq!(comparison.totals.hubs_unreachable, 0);
        assert_eq!(comparison.totals.total_policies, 1);
        assert!(comparison.hubs["hub-a"].is_compared());
    }

    #[test]
    fn test_unreachable_both_phases_yields_two_errors() {
        let pre = BTreeMap::from([(
            "hub-a".to_string(),
            HubCapture::Unreachable {
                hub: "hub-a".to_string(),
                error: "dns failure".to_string(),
            },
        )]);
        let post = BTreeMap::from([(
            "hub-a".to_string(),
            HubCapture::Unreachable {
                hub: "hub-a".to_string(),
                error: "dns failure".to_string(),
            },
        )]);

        let comparison = diff_all(&pre, &post);
        let hub = &comparison.hubs["hub-a"];
        assert_eq!(hub.collection_errors.len(), 2);
        assert_eq!(hub.collection_errors[0].phase, SnapshotPhase::Pre);
        assert_eq!(hub.collection_errors[1].phase, SnapshotPhase::Post);
        assert_eq!(comparison.totals.hubs_unreachable, 1);
        assert_eq!(comparison.totals.hubs_compared, 0);
    }
}
