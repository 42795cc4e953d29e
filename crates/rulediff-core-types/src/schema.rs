//! Canonical schema constants for structured logging and events
//!
//! These constants keep field and event names consistent between the
//! logging macros, the rules that emit diagnostics, and the tests that
//! assert on captured events.
//!
//! `tracing` macros take field names as identifiers, so the rules write
//! them literally. Every literal field name emitted by the engine must be
//! one of the `FIELD_*` values below; the logging integration tests check
//! captured events against them.

// Canonical field keys for structured logging
pub const FIELD_COMPONENT: &str = "component";
pub const FIELD_OP: &str = "op";
pub const FIELD_EVENT: &str = "event";
pub const FIELD_DURATION_MS: &str = "duration_ms";

// Comparison context
pub const FIELD_RULE_KIND: &str = "rule_kind";
pub const FIELD_SIDE: &str = "side";
pub const FIELD_POSITION: &str = "position";
pub const FIELD_FIRST_POSITION: &str = "first_position";
pub const FIELD_MATCHES: &str = "matches";
pub const FIELD_NESTED: &str = "nested";

// Collection sizes and counts
pub const FIELD_RULE_COUNT: &str = "rule_count";
pub const FIELD_DIFF_COUNT: &str = "diff_count";
pub const FIELD_SOURCE_LEN: &str = "source_len";
pub const FIELD_TARGET_LEN: &str = "target_len";
pub const FIELD_MATCHED: &str = "matched";
pub const FIELD_ADDED: &str = "added";
pub const FIELD_REMOVED: &str = "removed";

// Error fields
pub const FIELD_ERR_KIND: &str = "err_kind";
pub const FIELD_ERR_CODE: &str = "err_code";

// Canonical event names
pub const EVENT_START: &str = "start";
pub const EVENT_END: &str = "end";
pub const EVENT_END_ERROR: &str = "end_error";

// Rule kinds, as reported in `rule_kind`
pub const RULE_KIND_SCALAR: &str = "scalar";
pub const RULE_KIND_PREDICATE: &str = "predicate_collection";
pub const RULE_KIND_KEYED: &str = "keyed_collection";
