//! Canonical schema constants for structured logging and events
//!
//! These constants ensure consistency across all logging and error reporting.

// Canonical field keys for structured logging
pub const FIELD_COMPONENT: &str = "component";
pub const FIELD_OP: &str = "op";
pub const FIELD_EVENT: &str = "event";
pub const FIELD_DURATION_MS: &str = "duration_ms";
pub const FIELD_REQUEST_ID: &str = "request_id";
pub const FIELD_TRACE_ID: &str = "trace_id";

// Entity identifiers
pub const FIELD_HUB: &str = "hub";
pub const FIELD_NAMESPACE: &str = "namespace";
pub const FIELD_POLICY: &str = "policy";
pub const FIELD_CLUSTER: &str = "cluster";
pub const FIELD_PHASE: &str = "phase";

// Collection sizes
pub const FIELD_HUB_COUNT: &str = "hub_count";
pub const FIELD_POLICY_COUNT: &str = "policy_count";

// Error fields
pub const FIELD_ERR_KIND: &str = "err.kind";
pub const FIELD_ERR_CODE: &str = "err.code";

// Canonical event names
pub const EVENT_START: &str = "start";
pub const EVENT_END: &str = "end";
pub const EVENT_END_ERROR: &str = "end_error";
