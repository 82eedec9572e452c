//! Canonical schema constants for structured logging and events
//!
//! These constants ensure consistency across all logging and error reporting.

// Canonical field keys for structured logging
pub const FIELD_COMPONENT: &str = "component";
pub const FIELD_OP: &str = "op";
pub const FIELD_EVENT: &str = "event";
pub const FIELD_DURATION_MS: &str = "duration_ms";

// Entity identifiers
pub const FIELD_SOURCE_ID: &str = "source_id";
pub const FIELD_SNAPSHOT_ID: &str = "snapshot_id";
pub const FIELD_GROUP_ID: &str = "group_id";
pub const FIELD_RUN_ID: &str = "run_id";

// Traversal state
pub const FIELD_DEPTH: &str = "depth";
pub const FIELD_COMPONENT_COUNT: &str = "component_count";

// Error fields
pub const FIELD_ERR_KIND: &str = "err_kind";
pub const FIELD_ERR_CODE: &str = "err_code";

// Canonical event names
pub const EVENT_START: &str = "start";
pub const EVENT_END: &str = "end";
pub const EVENT_END_ERROR: &str = "end_error";
