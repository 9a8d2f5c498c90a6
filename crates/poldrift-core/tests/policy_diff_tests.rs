//! Pure per-policy diff tests — no I/O, no clock.

use poldrift_core::diff::model::ComplianceCategory;
use poldrift_core::diff::{diff_policy, PolicyComparison};
use poldrift_core::model::{
    ClusterComplianceEntry, ComplianceValue, PolicyDetails, PolicyKey, PolicyRecord,
    RemediationMode,
};

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn key() -> PolicyKey {
    PolicyKey::new("ns1", "p1")
}

/// Build a record with the given overall scalar and per-cluster entries.
fn record(overall: ComplianceValue, clusters: &[(&str, ComplianceValue)]) -> PolicyRecord {
    let mut record = PolicyRecord::new(key(), overall);
    for (name, compliance) in clusters {
        record.insert_cluster(ClusterComplianceEntry::new(*name, *compliance));
    }
    record
}

fn change_names(comparison: &PolicyComparison) -> Vec<&str> {
    comparison
        .cluster_changes
        .iter()
        .map(|c| c.cluster_name.as_str())
        .collect()
}

fn non_compliant_names(comparison: &PolicyComparison) -> Vec<&str> {
    comparison
        .non_compliant_clusters
        .iter()
        .map(|e| e.cluster_name.as_str())
        .collect()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

// S1: Diff output is deterministic
#[test]
fn test_diff_is_deterministic() {
    let pre = record(
        ComplianceValue::Compliant,
        &[("c1", ComplianceValue::Compliant)],
    );
    let post = record(
        ComplianceValue::NonCompliant,
        &[("c1", ComplianceValue::NonCompliant)],
    );

    let diff1 = diff_policy(&key(), Some(&pre), Some(&post));
    let diff2 = diff_policy(&key(), Some(&pre), Some(&post));
    assert_eq!(diff1, diff2);
    // Serialized form must also be identical
    let s1 = serde_json::to_string(&diff1).unwrap();
    let s2 = serde_json::to_string(&diff2).unwrap();
    assert_eq!(s1, s2);
}

// S2: Diffing a record against itself → no changes
#[test]
fn test_diff_self_yields_no_changes() {
    let record = record(
        ComplianceValue::NonCompliant,
        &[
            ("c1", ComplianceValue::NonCompliant),
            ("c2", ComplianceValue::Compliant),
        ],
    );
    let comparison = diff_policy(&key(), Some(&record), Some(&record));
    assert!(!comparison.changed);
    assert!(comparison.cluster_changes.is_empty());
    // Still currently non-compliant even with zero transitions.
    assert_eq!(non_compliant_names(&comparison), vec!["c1"]);
    assert_eq!(comparison.category, ComplianceCategory::StillNonCompliant);
}

// S3: Compliant → NonCompliant on one cluster
#[test]
fn test_single_cluster_regression() {
    let pre = record(
        ComplianceValue::Compliant,
        &[("c1", ComplianceValue::Compliant)],
    );
    let post = record(
        ComplianceValue::NonCompliant,
        &[("c1", ComplianceValue::NonCompliant)],
    );

    let comparison = diff_policy(&key(), Some(&pre), Some(&post));
    assert!(comparison.changed);
    assert_eq!(comparison.category, ComplianceCategory::NewlyNonCompliant);
    assert_eq!(change_names(&comparison), vec!["c1"]);
    assert_eq!(comparison.cluster_changes[0].before, ComplianceValue::Compliant);
    assert_eq!(
        comparison.cluster_changes[0].after,
        ComplianceValue::NonCompliant
    );
    assert_eq!(non_compliant_names(&comparison), vec!["c1"]);
}

// S4: Policy absent pre (first run) — missing side reads as Unknown
#[test]
fn test_policy_created_between_snapshots() {
    let post = record(
        ComplianceValue::NonCompliant,
        &[
            ("c1", ComplianceValue::NonCompliant),
            ("c2", ComplianceValue::Compliant),
        ],
    );

    let comparison = diff_policy(&key(), None, Some(&post));
    assert_eq!(comparison.before, ComplianceValue::Unknown);
    assert_eq!(comparison.after, ComplianceValue::NonCompliant);
    // c1 goes Unknown→NonCompliant, c2 goes Unknown→Compliant.
    assert!(comparison.changed);
    assert_eq!(change_names(&comparison), vec!["c1", "c2"]);
    assert_eq!(comparison.category, ComplianceCategory::NewlyNonCompliant);
    assert_eq!(non_compliant_names(&comparison), vec!["c1"]);
}

// S5: Policy deleted between snapshots — still surfaces as a transition
#[test]
fn test_policy_deleted_between_snapshots() {
    let pre = record(
        ComplianceValue::NonCompliant,
        &[("c1", ComplianceValue::NonCompliant)],
    );

    let comparison = diff_policy(&key(), Some(&pre), None);
    assert_eq!(comparison.before, ComplianceValue::NonCompliant);
    assert_eq!(comparison.after, ComplianceValue::Unknown);
    assert!(comparison.changed);
    assert_eq!(change_names(&comparison), vec!["c1"]);
    // Nothing is currently non-compliant: there is no post side.
    assert!(comparison.non_compliant_clusters.is_empty());
    assert_eq!(comparison.category, ComplianceCategory::Compliant);
}

// S6: Inconsistent overall scalars with identical cluster state → unchanged
#[test]
fn test_scalar_disagreement_is_not_a_change() {
    let pre = record(
        ComplianceValue::Compliant,
        &[("c1", ComplianceValue::Compliant)],
    );
    // Same cluster state, but the hub reported a different overall scalar.
    let post = record(
        ComplianceValue::Unknown,
        &[("c1", ComplianceValue::Compliant)],
    );

    let comparison = diff_policy(&key(), Some(&pre), Some(&post));
    assert!(!comparison.changed);
    assert!(comparison.cluster_changes.is_empty());
}

// S7: Identical overall scalars with a cluster-level transition → changed
#[test]
fn test_cluster_transition_under_stable_scalar() {
    let pre = record(
        ComplianceValue::NonCompliant,
        &[
            ("c1", ComplianceValue::NonCompliant),
            ("c2", ComplianceValue::Compliant),
        ],
    );
    let post = record(
        ComplianceValue::NonCompliant,
        &[
            ("c1", ComplianceValue::Compliant),
            ("c2", ComplianceValue::NonCompliant),
        ],
    );

    let comparison = diff_policy(&key(), Some(&pre), Some(&post));
    assert!(comparison.changed);
    assert_eq!(change_names(&comparison), vec!["c1", "c2"]);
    assert_eq!(comparison.category, ComplianceCategory::StillNonCompliant);
    assert_eq!(non_compliant_names(&comparison), vec!["c2"]);
}

// S8: non_compliant_clusters is "all currently non-compliant", not "newly"
#[test]
fn test_non_compliant_clusters_include_unchanged() {
    let pre = record(
        ComplianceValue::NonCompliant,
        &[
            ("c1", ComplianceValue::NonCompliant),
            ("c2", ComplianceValue::Compliant),
        ],
    );
    let post = record(
        ComplianceValue::NonCompliant,
        &[
            ("c1", ComplianceValue::NonCompliant),
            ("c2", ComplianceValue::NonCompliant),
        ],
    );

    let comparison = diff_policy(&key(), Some(&pre), Some(&post));
    // Only c2 changed, but both are currently non-compliant.
    assert_eq!(change_names(&comparison), vec!["c2"]);
    assert_eq!(non_compliant_names(&comparison), vec!["c1", "c2"]);
}

// S9: Both sides absent — total, everything Unknown
#[test]
fn test_both_sides_absent() {
    let comparison = diff_policy(&key(), None, None);
    assert_eq!(comparison.before, ComplianceValue::Unknown);
    assert_eq!(comparison.after, ComplianceValue::Unknown);
    assert!(!comparison.changed);
    assert!(comparison.cluster_changes.is_empty());
    assert!(comparison.non_compliant_clusters.is_empty());
    assert_eq!(comparison.category, ComplianceCategory::Compliant);
    assert_eq!(comparison.details, PolicyDetails::default());
}

// S10: Cluster present on one side only reads as Unknown on the other
#[test]
fn test_cluster_union_covers_one_sided_clusters() {
    let pre = record(
        ComplianceValue::Compliant,
        &[("c1", ComplianceValue::Compliant)],
    );
    let post = record(
        ComplianceValue::Compliant,
        &[("c2", ComplianceValue::Compliant)],
    );

    let comparison = diff_policy(&key(), Some(&pre), Some(&post));
    // c1: Compliant→Unknown, c2: Unknown→Compliant.
    assert_eq!(change_names(&comparison), vec!["c1", "c2"]);
    assert_eq!(comparison.cluster_changes[0].after, ComplianceValue::Unknown);
    assert_eq!(comparison.cluster_changes[1].before, ComplianceValue::Unknown);
}

// S11: Records with zero clusters diff cleanly
#[test]
fn test_zero_cluster_records() {
    let pre = record(ComplianceValue::Compliant, &[]);
    let post = record(ComplianceValue::NonCompliant, &[]);

    let comparison = diff_policy(&key(), Some(&pre), Some(&post));
    assert!(!comparison.changed);
    assert!(comparison.cluster_changes.is_empty());
    assert!(comparison.non_compliant_clusters.is_empty());
    // The scalar still drives the category.
    assert_eq!(comparison.category, ComplianceCategory::NewlyNonCompliant);
}

// S12: Recovery (NonCompliant → Compliant) lands in the Compliant category
#[test]
fn test_recovery_is_compliant_category() {
    let pre = record(
        ComplianceValue::NonCompliant,
        &[("c1", ComplianceValue::NonCompliant)],
    );
    let post = record(
        ComplianceValue::Compliant,
        &[("c1", ComplianceValue::Compliant)],
    );

    let comparison = diff_policy(&key(), Some(&pre), Some(&post));
    assert!(comparison.changed);
    assert_eq!(comparison.category, ComplianceCategory::Compliant);
    assert!(comparison.non_compliant_clusters.is_empty());
}

// S13: Deep link and message survive into non_compliant_clusters
#[test]
fn test_non_compliant_entry_carries_detail_fields() {
    let mut post = PolicyRecord::new(key(), ComplianceValue::NonCompliant).with_details(
        PolicyDetails {
            description: "deny privileged pods".to_string(),
            remediation_mode: RemediationMode::Enforce,
        },
    );
    post.insert_cluster(
        ClusterComplianceEntry::new("c1", ComplianceValue::NonCompliant)
            .with_detail_url("https://hub.example/governance/ns1/p1/c1")
            .with_message("privileged container found"),
    );

    let comparison = diff_policy(&key(), None, Some(&post));
    let entry = &comparison.non_compliant_clusters[0];
    assert_eq!(
        entry.detail_url.as_deref(),
        Some("https://hub.example/governance/ns1/p1/c1")
    );
    assert_eq!(entry.message.as_deref(), Some("privileged container found"));
    assert_eq!(comparison.details.description, "deny privileged pods");
}
