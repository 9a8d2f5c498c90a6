use poldrift_core_types::{RequestId, TraceId};

/// Result type alias using DriftError
pub type Result<T> = std::result::Result<T, DriftError>;

/// Canonical error kind taxonomy
///
/// Provides a stable, structured classification of all errors raised by
/// this crate. Each kind maps to a stable error code usable for
/// programmatic handling, testing, and automation exit paths.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DriftErrorKind {
    // Archive parsing
    /// Archive bytes are not valid UTF-8 JSON, or a field has the wrong type
    InvalidArchive,
    /// A required archive field (e.g. `archive_digest`, `hubs`) is absent
    MissingField,
    /// `archive_schema_version` is an integer but not a version this build reads
    UnsupportedSchemaVersion,
    /// The recorded archive digest does not match the recomputed digest
    DigestMismatch,
    /// An encoded value failed its internal round-trip sanity check
    DeterminismViolation,

    // Integration/IO
    Serialization,
    Io,
    ExternalService,

    // Internal
    Internal,
}

impl DriftErrorKind {
    /// Get the stable error code for this kind
    pub fn code(&self) -> &'static str {
        match self {
            DriftErrorKind::InvalidArchive => "ERR_INVALID_ARCHIVE",
            DriftErrorKind::MissingField => "ERR_MISSING_FIELD",
            DriftErrorKind::UnsupportedSchemaVersion => "ERR_UNSUPPORTED_SCHEMA_VERSION",
            DriftErrorKind::DigestMismatch => "ERR_DIGEST_MISMATCH",
            DriftErrorKind::DeterminismViolation => "ERR_DETERMINISM_VIOLATION",
            DriftErrorKind::Serialization => "ERR_SERIALIZATION",
            DriftErrorKind::Io => "ERR_IO",
            DriftErrorKind::ExternalService => "ERR_EXTERNAL_SERVICE",
            DriftErrorKind::Internal => "ERR_INTERNAL",
        }
    }
}

/// Canonical structured error type
///
/// Carries classification plus context for debugging: the failing
/// operation, the hub and phase involved, and correlation identifiers
/// tying the pre and post invocations of one comparison together.
#[derive(Debug, Clone)]
pub struct DriftError {
    kind: DriftErrorKind,
    op: Option<String>,
    hub: Option<String>,
    phase: Option<String>,
    request_id: Option<RequestId>,
    trace_id: Option<TraceId>,
    message: String,
    source: Option<Box<DriftError>>,
}

impl DriftError {
    /// Create a new error with the specified kind
    pub fn new(kind: DriftErrorKind) -> Self {
        Self {
            kind,
            op: None,
            hub: None,
            phase: None,
            request_id: None,
            trace_id: None,
            message: String::new(),
            source: None,
        }
    }

    /// Add operation context
    pub fn with_op(mut self, op: impl Into<String>) -> Self {
        self.op = Some(op.into());
        self
    }

    /// Add hub context
    pub fn with_hub(mut self, hub: impl Into<String>) -> Self {
        self.hub = Some(hub.into());
        self
    }

    /// Add snapshot phase context ("pre" or "post")
    pub fn with_phase(mut self, phase: impl Into<String>) -> Self {
        self.phase = Some(phase.into());
        self
    }

    /// Add request ID context
    pub fn with_request_id(mut self, request_id: RequestId) -> Self {
        self.request_id = Some(request_id);
        self
    }

    /// Add trace ID context
    pub fn with_trace_id(mut self, trace_id: TraceId) -> Self {
        self.trace_id = Some(trace_id);
        self
    }

    /// Add custom message
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = message.into();
        self
    }

    /// Add source error
    pub fn with_source(mut self, source: DriftError) -> Self {
        self.source = Some(Box::new(source));
        self
    }

    /// Get the error kind
    pub fn kind(&self) -> DriftErrorKind {
        self.kind
    }

    /// Get the stable error code
    pub fn code(&self) -> &'static str {
        self.kind.code()
    }

    /// Get the operation context, if any
    pub fn op(&self) -> Option<&str> {
        self.op.as_deref()
    }

    /// Get the hub context, if any
    pub fn hub(&self) -> Option<&str> {
        self.hub.as_deref()
    }

    /// Get the phase context, if any
    pub fn phase(&self) -> Option<&str> {
        self.phase.as_deref()
    }

    /// Get the request ID context, if any
    pub fn request_id(&self) -> Option<&RequestId> {
        self.request_id.as_ref()
    }

    /// Get the trace ID context, if any
    pub fn trace_id(&self) -> Option<&TraceId> {
        self.trace_id.as_ref()
    }

    /// Get the error message
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Get the source error, if any
    pub fn source_error(&self) -> Option<&DriftError> {
        self.source.as_deref()
    }
}

impl std::fmt::Display for DriftError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}]", self.code())?;
        if let Some(op) = &self.op {
            write!(f, " in operation '{}'", op)?;
        }
        if !self.message.is_empty() {
            write!(f, ": {}", self.message)?;
        }
        if let Some(hub) = &self.hub {
            write!(f, " (hub: {})", hub)?;
        }
        if let Some(phase) = &self.phase {
            write!(f, " (phase: {})", phase)?;
        }
        Ok(())
    }
}

impl std::error::Error for DriftError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        None
    }
}
