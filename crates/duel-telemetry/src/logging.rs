//! Structured log helpers.
//!
//! Every match-related line carries the same field names so logs can be
//! filtered per match or per user:
//! - `subsystem`: emitting subsystem (`match-store`, `action-processor`, ...)
//! - `match_id`
//! - `user_id`
//! - additional context fields (`role`, `status`, `action`, ...)

/// Log with a subsystem field.
#[macro_export]
macro_rules! log_event {
    ($level:ident, $subsystem:expr, $msg:expr $(, $($field:tt)*)?) => {
        $crate::tracing::$level!(
            subsystem = $subsystem,
            $($($field)*,)?
            $msg
        )
    };
}

/// Log a match-related event with standard fields.
#[macro_export]
macro_rules! log_match_event {
    ($level:ident, $subsystem:expr, $msg:expr, $match_id:expr, $user_id:expr $(, $($field:tt)*)?) => {
        $crate::tracing::$level!(
            subsystem = $subsystem,
            match_id = %$match_id,
            user_id = %$user_id,
            $($($field)*,)?
            $msg
        )
    };
}
