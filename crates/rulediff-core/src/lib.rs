//! rulediff Core - rule-driven structural diffing engine
//!
//! Given two values of the same type, a [`Comparer`] evaluates an ordered set
//! of caller-configured rules and returns the caller-defined differences they
//! produce. This crate provides:
//! - [`Comparer`], the orchestrator with a fluent `add_rule*` builder
//! - Scalar rules (one predicate, at most one difference)
//! - Collection rules matched by predicate (O(n·m)) or by unique key (O(n+m)),
//!   each optionally recursing into a nested comparer for matched items
//! - A structured error facility and a `tracing`-based logging facility
//!
//! The engine never inspects difference values; it only calls the caller's
//! factories and collects what they return.

pub mod comparer;
pub mod difference;
pub mod errors;
pub mod logging_facility;
pub mod rules;

#[doc(hidden)]
pub use rulediff_core_types as core_types;

// Re-export commonly used types
pub use comparer::Comparer;
pub use difference::GenericDifference;
pub use errors::{DiffError, ExError, ExErrorKind, Result, Side};
pub use rules::{KeyedCollectionRule, PredicateCollectionRule, Rule, ScalarRule};
