//! Rule orchestration.
//!
//! A [`Comparer`] owns an ordered list of rules. It is configured through
//! `&mut self` builder calls and evaluated through `&self`, so a configured
//! comparer can be shared across threads while the borrow checker rules out
//! configuring it during an in-flight comparison.

use std::fmt;
use std::hash::Hash;
use std::time::Instant;

use crate::errors::Result;
use crate::rules::{KeyedCollectionRule, PredicateCollectionRule, Rule, ScalarRule};
use crate::{log_op_end, log_op_error, log_op_start};

/// Compares two values of type `T` and reports differences of type `D`
///
/// Differences are returned in rule registration order; within a collection
/// rule they follow that rule's traversal order.
///
/// # Example
///
/// ```
/// use rulediff_core::{Comparer, KeyedCollectionRule};
///
/// struct Order { status: String, lines: Vec<(u32, u32)> } // (line id, quantity)
///
/// let mut comparer: Comparer<Order, String> = Comparer::new();
/// comparer
///     .add_rule(
///         |a, b| a.status != b.status,
///         |a, b| format!("status {} -> {}", a.status, b.status),
///     )
///     .add_rule_for_each_keyed(
///         KeyedCollectionRule::new(|o: &Order| o.lines.iter().collect(), |l: &(u32, u32)| l.0)
///             .on_added(|_, _, l| format!("line {} added", l.0))
///             .on_removed(|_, _, l| format!("line {} removed", l.0)),
///     );
///
/// let before = Order { status: "open".into(), lines: vec![(1, 2), (2, 1)] };
/// let after = Order { status: "paid".into(), lines: vec![(1, 2), (3, 4)] };
///
/// let diffs = comparer.compare(&before, &after).unwrap();
/// assert_eq!(diffs, vec!["status open -> paid", "line 2 removed", "line 3 added"]);
/// ```
pub struct Comparer<T, D> {
    rules: Vec<Box<dyn Rule<T, D>>>,
}

impl<T, D> Comparer<T, D>
where
    T: 'static,
    D: 'static,
{
    /// Create a comparer with no rules
    pub fn new() -> Self {
        Self { rules: Vec::new() }
    }

    /// Append a [`ScalarRule`]: one difference from `factory` whenever
    /// `is_different(source, target)` holds
    pub fn add_rule<P, F>(&mut self, is_different: P, factory: F) -> &mut Self
    where
        P: Fn(&T, &T) -> bool + Send + Sync + 'static,
        F: Fn(&T, &T) -> D + Send + Sync + 'static,
    {
        self.rules
            .push(Box::new(ScalarRule::new(is_different, factory)));
        self
    }

    /// Append a collection rule that pairs items with a matching predicate
    ///
    /// The rule's selector may borrow items from any collection: a `Vec`,
    /// the values of a map, or a filtered view.
    pub fn add_rule_for_each<I>(&mut self, rule: PredicateCollectionRule<T, I, D>) -> &mut Self
    where
        I: 'static,
    {
        self.rules.push(Box::new(rule));
        self
    }

    /// Append a collection rule that pairs items by a unique key
    pub fn add_rule_for_each_keyed<I, K>(
        &mut self,
        rule: KeyedCollectionRule<T, I, K, D>,
    ) -> &mut Self
    where
        I: 'static,
        K: Eq + Hash + 'static,
    {
        self.rules.push(Box::new(rule));
        self
    }
}

impl<T, D> Comparer<T, D> {
    /// Number of registered rules
    pub fn rule_count(&self) -> usize {
        self.rules.len()
    }

    /// True when no rule has been registered
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Run every rule in registration order and concatenate their differences
    ///
    /// Returns an empty vector when no rule fires. This is the logging
    /// boundary: it emits `start` and `end` (or `end_error`) events for op
    /// `compare`; nested comparers invoked by collection rules do not.
    ///
    /// # Errors
    ///
    /// - `DuplicateKey` - a keyed collection rule, at any nesting depth, saw
    ///   the same key twice on one side
    /// - `AmbiguousMatch` - a predicate collection rule, at any nesting
    ///   depth, paired an item with more than one counterpart
    ///
    /// On error no differences are returned.
    pub fn compare(&self, source: &T, target: &T) -> Result<Vec<D>> {
        log_op_start!("compare", rule_count = self.rules.len());
        let start = Instant::now();

        let result = self.evaluate(source, target);

        let elapsed = start.elapsed().as_millis() as u64;
        match &result {
            Ok(differences) => {
                log_op_end!(
                    "compare",
                    duration_ms = elapsed,
                    diff_count = differences.len()
                );
            }
            Err(e) => {
                log_op_error!("compare", e.clone(), duration_ms = elapsed);
            }
        }
        result
    }

    /// Evaluate all rules without emitting boundary events
    pub(crate) fn evaluate(&self, source: &T, target: &T) -> Result<Vec<D>> {
        let mut differences = Vec::new();
        for rule in &self.rules {
            differences.extend(rule.compare(source, target)?);
        }
        Ok(differences)
    }
}

impl<T, D> Default for Comparer<T, D>
where
    T: 'static,
    D: 'static,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<T, D> fmt::Debug for Comparer<T, D> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let kinds: Vec<&'static str> = self.rules.iter().map(|rule| rule.kind()).collect();
        f.debug_struct("Comparer").field("rules", &kinds).finish()
    }
}
