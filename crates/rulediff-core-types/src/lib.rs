//! Core types shared across rulediff facilities
//!
//! - **Schema constants**: canonical field keys, event names and rule kinds
//!   used by the structured logging facility and its tests.

pub mod schema;
