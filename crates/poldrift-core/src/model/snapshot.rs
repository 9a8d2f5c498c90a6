use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::policy::{policy_keyed_map, PolicyKey, PolicyRecord};

/// Which half of a deployment comparison a capture belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SnapshotPhase {
    Pre,
    Post,
}

impl std::fmt::Display for SnapshotPhase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SnapshotPhase::Pre => write!(f, "pre"),
            SnapshotPhase::Post => write!(f, "post"),
        }
    }
}

/// Point-in-time capture of compliance state for all policies in scope on
/// one hub.
///
/// Produced once by the collector and never mutated afterwards; the diff
/// engine takes snapshots by shared reference only. On the wire the policy
/// map is a sorted sequence of records (each embeds its composite key).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    /// Hub this snapshot was taken on
    pub hub: String,

    /// All policies in scope, keyed by (namespace, name)
    #[serde(with = "policy_keyed_map")]
    pub policies: BTreeMap<PolicyKey, PolicyRecord>,
}

impl Snapshot {
    /// Create an empty snapshot for a hub
    pub fn empty(hub: impl Into<String>) -> Self {
        Self {
            hub: hub.into(),
            policies: BTreeMap::new(),
        }
    }

    /// Insert a policy record, keyed by its embedded key
    pub fn insert(&mut self, record: PolicyRecord) {
        self.policies.insert(record.key.clone(), record);
    }

    /// Look up one policy by key
    pub fn get(&self, key: &PolicyKey) -> Option<&PolicyRecord> {
        self.policies.get(key)
    }

    /// Number of policies in scope
    pub fn len(&self) -> usize {
        self.policies.len()
    }

    /// Check whether the snapshot holds no policies
    pub fn is_empty(&self) -> bool {
        self.policies.is_empty()
    }
}

/// Outcome of sampling one hub during a collection run.
///
/// "This hub could not be sampled" is a first-class marker, distinct from
/// "this hub has zero policies" — aggregation must never conflate the two.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum HubCapture {
    /// The hub was sampled successfully
    Collected(Snapshot),
    /// The hub could not be sampled; `error` is the collector's reason
    Unreachable { hub: String, error: String },
}

impl HubCapture {
    /// Name of the hub this capture describes
    pub fn hub_name(&self) -> &str {
        match self {
            HubCapture::Collected(snapshot) => &snapshot.hub,
            HubCapture::Unreachable { hub, .. } => hub,
        }
    }

    /// The snapshot, when the hub was sampled successfully
    pub fn as_snapshot(&self) -> Option<&Snapshot> {
        match self {
            HubCapture::Collected(snapshot) => Some(snapshot),
            HubCapture::Unreachable { .. } => None,
        }
    }

    /// The collector's error, when the hub was unreachable
    pub fn error(&self) -> Option<&str> {
        match self {
            HubCapture::Collected(_) => None,
            HubCapture::Unreachable { error, .. } => Some(error),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::compliance::ComplianceValue;
    use crate::model::policy::ClusterComplianceEntry;

    fn sample_snapshot() -> Snapshot {
        let mut snapshot = Snapshot::empty("hub-east");
        let mut record = PolicyRecord::new(
            PolicyKey::new("ns1", "p1"),
            ComplianceValue::Compliant,
        );
        record.insert_cluster(ClusterComplianceEntry::new(
            "c1",
            ComplianceValue::Compliant,
        ));
        snapshot.insert(record);
        snapshot
    }

    #[test]
    fn test_snapshot_serde_roundtrip() {
        let snapshot = sample_snapshot();
        let json = serde_json::to_string(&snapshot).unwrap();
        let back: Snapshot = serde_json::from_str(&json).unwrap();
        assert_eq!(snapshot, back);
    }

    #[test]
    fn test_snapshot_policies_serialize_as_sequence() {
        let snapshot = sample_snapshot();
        let value: serde_json::Value = serde_json::to_value(&snapshot).unwrap();
        assert!(value["policies"].is_array());
        assert_eq!(value["policies"][0]["key"]["namespace"], "ns1");
    }

    #[test]
    fn test_hub_capture_tagged_serde() {
        let unreachable = HubCapture::Unreachable {
            hub: "hub-west".to_string(),
            error: "connection refused".to_string(),
        };
        let value: serde_json::Value = serde_json::to_value(&unreachable).unwrap();
        assert_eq!(value["status"], "unreachable");

        let collected = HubCapture::Collected(sample_snapshot());
        let value: serde_json::Value = serde_json::to_value(&collected).unwrap();
        assert_eq!(value["status"], "collected");
        assert_eq!(value["hub"], "hub-east");

        let back: HubCapture = serde_json::from_value(value).unwrap();
        assert_eq!(back, collected);
    }

    #[test]
    fn test_hub_capture_accessors() {
        let collected = HubCapture::Collected(sample_snapshot());
        assert_eq!(collected.hub_name(), "hub-east");
        assert!(collected.as_snapshot().is_some());
        assert!(collected.error().is_none());

        let unreachable = HubCapture::Unreachable {
            hub: "hub-west".to_string(),
            error: "timeout".to_string(),
        };
        assert_eq!(unreachable.hub_name(), "hub-west");
        assert!(unreachable.as_snapshot().is_none());
        assert_eq!(unreachable.error(), Some("timeout"));
    }

    #[test]
    fn test_phase_display() {
        assert_eq!(SnapshotPhase::Pre.to_string(), "pre");
        assert_eq!(SnapshotPhase::Post.to_string(), "post");
    }
}
