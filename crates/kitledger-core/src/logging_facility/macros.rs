//! Canonical logging macros
//!
//! These macros provide a structured, consistent way to log operations.

/// Log the start of an operation
///
/// # Example
///
/// ```
/// # use kitledger_core::log_op_start;
/// log_op_start!("create_finished_good_snapshot");
/// log_op_start!("create_finished_good_snapshot", source_id = 42);
/// ```
#[macro_export]
macro_rules! log_op_start {
    ($op:expr) => {
        tracing::info!(
            component = module_path!(),
            op = $op,
            event = $crate::kitledger_core_types::schema::EVENT_START,
        );
    };
    ($op:expr, $($field:tt)*) => {
        tracing::info!(
            component = module_path!(),
            op = $op,
            event = $crate::kitledger_core_types::schema::EVENT_START,
            $($field)*
        );
    };
}

/// Log the successful end of an operation
///
/// # Example
///
/// ```
/// # use kitledger_core::log_op_end;
/// log_op_end!("create_group", duration_ms = 3);
/// ```
#[macro_export]
macro_rules! log_op_end {
    ($op:expr, duration_ms = $duration:expr) => {
        tracing::info!(
            component = module_path!(),
            op = $op,
            event = $crate::kitledger_core_types::schema::EVENT_END,
            duration_ms = $duration,
        );
    };
    ($op:expr, duration_ms = $duration:expr, $($field:tt)*) => {
        tracing::info!(
            component = module_path!(),
            op = $op,
            event = $crate::kitledger_core_types::schema::EVENT_END,
            duration_ms = $duration,
            $($field)*
        );
    };
}

/// Log an operation error
///
/// `$err` is anything exposing `kind()` and `code()`, normally an `ExError`.
///
/// # Example
///
/// ```
/// # use kitledger_core::log_op_error;
/// # use kitledger_core::errors::{ExError, ExErrorKind};
/// let err = ExError::new(ExErrorKind::NotFound);
/// log_op_error!("get_group", err, duration_ms = 1);
/// ```
#[macro_export]
macro_rules! log_op_error {
    ($op:expr, $err:expr, duration_ms = $duration:expr) => {
        tracing::error!(
            component = module_path!(),
            op = $op,
            event = $crate::kitledger_core_types::schema::EVENT_END_ERROR,
            duration_ms = $duration,
            err_kind = ?$err.kind(),
            err_code = $err.code(),
        );
    };
    ($op:expr, $err:expr, duration_ms = $duration:expr, $($field:tt)*) => {
        tracing::error!(
            component = module_path!(),
            op = $op,
            event = $crate::kitledger_core_types::schema::EVENT_END_ERROR,
            duration_ms = $duration,
            err_kind = ?$err.kind(),
            err_code = $err.code(),
            $($field)*
        );
    };
}
