use serde::{Deserialize, Serialize};

/// Evaluated state of a policy against a managed cluster.
///
/// `Unknown` covers "not yet evaluated/reported" as well as "this side of
/// the comparison has no record". No ordering is defined between the
/// variants: only equality matters when diffing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ComplianceValue {
    Compliant,
    NonCompliant,
    Unknown,
}

impl ComplianceValue {
    /// Check whether this value is `NonCompliant`
    pub fn is_non_compliant(&self) -> bool {
        matches!(self, ComplianceValue::NonCompliant)
    }
}

/// Whether a policy only reports violations (Inform) or actively corrects
/// them (Enforce).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum RemediationMode {
    #[default]
    Inform,
    Enforce,
}
