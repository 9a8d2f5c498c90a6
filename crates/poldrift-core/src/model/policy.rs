use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::compliance::{ComplianceValue, RemediationMode};

/// Identity of one policy instance within a hub.
///
/// Namespace is part of the identity: policy names are not guaranteed
/// unique across namespaces. The key is a structural composite, never a
/// concatenated string, so names containing separator characters stay
/// unambiguous. The hub name completes the identity and is carried at the
/// snapshot/comparison level.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct PolicyKey {
    pub namespace: String,
    pub name: String,
}

impl PolicyKey {
    /// Create a new key from namespace and policy name
    pub fn new(namespace: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            namespace: namespace.into(),
            name: name.into(),
        }
    }
}

impl std::fmt::Display for PolicyKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}/{}", self.namespace, self.name)
    }
}

/// Immutable policy metadata carried through a comparison.
///
/// Metadata does not affect compliance semantics; the diff engine prefers
/// the post-side copy and falls back to pre, then to this default.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct PolicyDetails {
    pub description: String,
    pub remediation_mode: RemediationMode,
}

/// Per managed-cluster compliance record attached to a policy.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClusterComplianceEntry {
    /// Managed cluster name (unique within one hub)
    pub cluster_name: String,

    /// Evaluated compliance of this cluster against the policy
    pub compliance: ComplianceValue,

    /// Optional deep link into the hub console for this cluster/policy
    pub detail_url: Option<String>,

    /// Optional evaluation message reported by the cluster
    pub message: Option<String>,
}

impl ClusterComplianceEntry {
    /// Create a new entry with no detail link or message
    pub fn new(cluster_name: impl Into<String>, compliance: ComplianceValue) -> Self {
        Self {
            cluster_name: cluster_name.into(),
            compliance,
            detail_url: None,
            message: None,
        }
    }

    /// Attach a console deep link
    pub fn with_detail_url(mut self, url: impl Into<String>) -> Self {
        self.detail_url = Some(url.into());
        self
    }

    /// Attach an evaluation message
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }
}

/// One policy's compliance state at a single instant.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PolicyRecord {
    /// Identity of this policy within its hub
    pub key: PolicyKey,

    /// Overall compliance scalar as reported by the hub.
    ///
    /// Source hubs may report this inconsistently with the per-cluster
    /// entries; per-cluster state is ground truth for change detection.
    pub overall_compliance: ComplianceValue,

    /// Per managed-cluster compliance, keyed by cluster name
    pub cluster_status: BTreeMap<String, ClusterComplianceEntry>,

    /// Policy metadata (description, remediation mode)
    pub details: PolicyDetails,
}

impl PolicyRecord {
    /// Create a record with no cluster entries
    pub fn new(key: PolicyKey, overall_compliance: ComplianceValue) -> Self {
        Self {
            key,
            overall_compliance,
            cluster_status: BTreeMap::new(),
            details: PolicyDetails::default(),
        }
    }

    /// Replace the policy metadata
    pub fn with_details(mut self, details: PolicyDetails) -> Self {
        self.details = details;
        self
    }

    /// Insert a per-cluster entry, keyed by its cluster name
    pub fn insert_cluster(&mut self, entry: ClusterComplianceEntry) {
        self.cluster_status.insert(entry.cluster_name.clone(), entry);
    }

    /// Compliance of one cluster, `Unknown` when this record has no entry
    /// for that cluster
    pub fn cluster_compliance(&self, cluster_name: &str) -> ComplianceValue {
        self.cluster_status
            .get(cluster_name)
            .map(|e| e.compliance)
            .unwrap_or(ComplianceValue::Unknown)
    }
}

/// Values stored in a [`PolicyKey`]-keyed map that embed their own key.
///
/// JSON object keys must be strings, so map-valued fields keyed by the
/// composite [`PolicyKey`] serialize as a sorted sequence of their values
/// and rebuild the map from each value's embedded key on deserialization.
pub trait PolicyKeyed {
    fn policy_key(&self) -> &PolicyKey;
}

impl PolicyKeyed for PolicyRecord {
    fn policy_key(&self) -> &PolicyKey {
        &self.key
    }
}

/// serde adapter for `BTreeMap<PolicyKey, V>` fields (see [`PolicyKeyed`]).
pub mod policy_keyed_map {
    use super::{PolicyKey, PolicyKeyed};
    use serde::de::{Deserialize, Deserializer};
    use serde::ser::{Serialize, Serializer};
    use std::collections::BTreeMap;

    pub fn serialize<V, S>(map: &BTreeMap<PolicyKey, V>, serializer: S) -> Result<S::Ok, S::Error>
    where
        V: Serialize,
        S: Serializer,
    {
        serializer.collect_seq(map.values())
    }

    pub fn deserialize<'de, V, D>(deserializer: D) -> Result<BTreeMap<PolicyKey, V>, D::Error>
    where
        V: Deserialize<'de> + PolicyKeyed,
        D: Deserializer<'de>,
    {
        let values = Vec::<V>::deserialize(deserializer)?;
        Ok(values
            .into_iter()
            .map(|v| (v.policy_key().clone(), v))
            .collect())
    }
}
