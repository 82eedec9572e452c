use thiserror::Error;

use crate::model::SnapshotKind;

/// Result type alias using the canonical structured error
pub type Result<T> = std::result::Result<T, ExError>;

// ========== Error Facility ==========

/// Canonical error kind taxonomy
///
/// Each kind maps to a stable error code that callers can match on
/// programmatically and that shows up verbatim in structured logs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExErrorKind {
    // Structural/Validation
    InvalidInput,
    NotFound,
    CircularReference,
    MaxDepthExceeded,

    // Integration/IO
    Io,
    Serialization,
    Persistence,

    // Internal
    Internal,
}

impl ExErrorKind {
    /// Get the stable error code for this kind
    pub fn code(&self) -> &'static str {
        match self {
            ExErrorKind::InvalidInput => "ERR_INVALID_INPUT",
            ExErrorKind::NotFound => "ERR_NOT_FOUND",
            ExErrorKind::CircularReference => "ERR_CIRCULAR_REFERENCE",
            ExErrorKind::MaxDepthExceeded => "ERR_MAX_DEPTH_EXCEEDED",
            ExErrorKind::Io => "ERR_IO",
            ExErrorKind::Serialization => "ERR_SERIALIZATION",
            ExErrorKind::Persistence => "ERR_PERSISTENCE",
            ExErrorKind::Internal => "ERR_INTERNAL",
        }
    }

    /// Structural errors describe a broken catalog shape rather than an
    /// infrastructure failure.
    pub fn is_structural(&self) -> bool {
        matches!(
            self,
            ExErrorKind::CircularReference | ExErrorKind::MaxDepthExceeded
        )
    }
}

/// Canonical structured error type
///
/// Carries classification fields for programmatic handling plus the
/// context needed to diagnose a failed snapshot (the offending source id,
/// the composite path, the depth reached).
#[derive(Debug, Clone)]
pub struct ExError {
    kind: ExErrorKind,
    op: Option<String>,
    entity_id: Option<String>,
    message: String,
    path: Option<Vec<i64>>,
    depth: Option<usize>,
    max_depth: Option<usize>,
}

impl ExError {
    /// Create a new error with the specified kind
    pub fn new(kind: ExErrorKind) -> Self {
        Self {
            kind,
            op: None,
            entity_id: None,
            message: String::new(),
            path: None,
            depth: None,
            max_depth: None,
        }
    }

    /// Add operation context
    pub fn with_op(mut self, op: impl Into<String>) -> Self {
        self.op = Some(op.into());
        self
    }

    /// Add entity ID context
    pub fn with_entity_id(mut self, id: impl ToString) -> Self {
        self.entity_id = Some(id.to_string());
        self
    }

    /// Add custom message
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = message.into();
        self
    }

    /// Add the composite path (root first) that led to the failure
    pub fn with_path(mut self, path: Vec<i64>) -> Self {
        self.path = Some(path);
        self
    }

    /// Add the depth reached and the configured bound
    pub fn with_depth(mut self, depth: usize, max_depth: usize) -> Self {
        self.depth = Some(depth);
        self.max_depth = Some(max_depth);
        self
    }

    /// Get the error kind
    pub fn kind(&self) -> ExErrorKind {
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

    /// Get the entity ID context, if any
    pub fn entity_id(&self) -> Option<&str> {
        self.entity_id.as_deref()
    }

    /// Get the error message
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Get the composite path, if any (populated on CircularReference)
    pub fn path(&self) -> Option<&[i64]> {
        self.path.as_deref()
    }

    /// Get the depth reached, if any (populated on MaxDepthExceeded)
    pub fn depth(&self) -> Option<usize> {
        self.depth
    }

    /// Get the configured depth bound, if any (populated on MaxDepthExceeded)
    pub fn max_depth(&self) -> Option<usize> {
        self.max_depth
    }
}

impl std::fmt::Display for ExError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}]", self.code())?;
        if let Some(op) = &self.op {
            write!(f, " in operation '{}'", op)?;
        }
        if !self.message.is_empty() {
            write!(f, ": {}", self.message)?;
        }
        if let Some(entity_id) = &self.entity_id {
            write!(f, " (entity_id: {})", entity_id)?;
        }
        Ok(())
    }
}

impl std::error::Error for ExError {}

// ========== End Error Facility ==========

/// Render a composite path for humans, e.g. `"1 → 2 → 1"`.
pub fn format_path(path: &[i64]) -> String {
    path.iter()
        .map(|id| id.to_string())
        .collect::<Vec<_>>()
        .join(" → ")
}

/// Domain failures raised while capturing a snapshot tree
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SnapshotError {
    /// The live catalog has no row for the requested source
    #[error("{kind} {source_id} not found in catalog")]
    SourceNotFound { kind: SnapshotKind, source_id: i64 },

    /// A finished good contains itself, directly or transitively
    #[error("Circular reference detected at finished good {source_id}: {}", format_path(.path))]
    CircularReference { source_id: i64, path: Vec<i64> },

    /// Nesting went deeper than the configured bound
    #[error("Maximum nesting depth exceeded: depth {depth} > max {max}")]
    MaxDepthExceeded { depth: usize, max: usize },

    /// A definition payload could not be encoded or decoded
    #[error("Serialization error: {message}")]
    Serialization { message: String },
}

impl From<SnapshotError> for ExError {
    fn from(err: SnapshotError) -> Self {
        let message = err.to_string();
        match err {
            SnapshotError::SourceNotFound { source_id, .. } => {
                ExError::new(ExErrorKind::NotFound)
                    .with_entity_id(source_id)
                    .with_message(message)
            }
            SnapshotError::CircularReference { source_id, path } => {
                ExError::new(ExErrorKind::CircularReference)
                    .with_entity_id(source_id)
                    .with_path(path)
                    .with_message(message)
            }
            SnapshotError::MaxDepthExceeded { depth, max } => {
                ExError::new(ExErrorKind::MaxDepthExceeded)
                    .with_depth(depth, max)
                    .with_message(message)
            }
            SnapshotError::Serialization { .. } => {
                ExError::new(ExErrorKind::Serialization).with_message(message)
            }
        }
    }
}

impl From<serde_json::Error> for ExError {
    fn from(err: serde_json::Error) -> Self {
        SnapshotError::Serialization {
            message: err.to_string(),
        }
        .into()
    }
}
