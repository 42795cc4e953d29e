//! Comparison rules
//!
//! A rule turns a `(source, target)` pair into zero or more caller-defined
//! differences. Three shapes exist:
//!
//! - [`ScalarRule`] - one predicate, at most one difference
//! - [`PredicateCollectionRule`] - reconciles two item collections with a pairwise
//!   matching predicate, O(n·m)
//! - [`KeyedCollectionRule`] - reconciles two item collections through an extracted
//!   key, O(n+m), rejecting duplicate keys
//!
//! Rules are registered on a [`Comparer`](crate::Comparer), which evaluates
//! them in registration order.

pub mod keyed;
pub mod predicate;
pub mod scalar;

pub use keyed::KeyedCollectionRule;
pub use predicate::PredicateCollectionRule;
pub use scalar::ScalarRule;

use crate::comparer::Comparer;
use crate::errors::Result;

/// A configured unit of comparison logic
///
/// Implementations hold only configuration set at construction time, so a
/// rule can be evaluated from several threads at once.
pub trait Rule<T, D>: Send + Sync {
    /// Stable rule kind, as reported in log events
    fn kind(&self) -> &'static str;

    /// Compare `source` against `target` and return the differences found
    ///
    /// # Errors
    ///
    /// Returns a [`DiffError`](crate::errors::DiffError) when the inputs
    /// violate the rule's matching contract (duplicate keys, ambiguous
    /// matches), including violations raised by nested comparers.
    fn compare(&self, source: &T, target: &T) -> Result<Vec<D>>;
}

/// Borrows the items of one side; called once per side per comparison
pub(crate) type ItemsSelector<T, I> = Box<dyn for<'a> Fn(&'a T) -> Vec<&'a I> + Send + Sync>;
pub(crate) type ItemFactory<T, I, D> = Box<dyn Fn(&T, &T, &I) -> D + Send + Sync>;

/// What a collection rule does with the three outcomes of reconciliation
///
/// Shared by both collection strategies: an unset factory or comparer means
/// that outcome is not reported.
pub(crate) struct CollectionHandlers<T, I, D> {
    added: Option<ItemFactory<T, I, D>>,
    removed: Option<ItemFactory<T, I, D>>,
    nested: Option<Comparer<I, D>>,
}

impl<T, I, D> CollectionHandlers<T, I, D> {
    pub(crate) fn new() -> Self {
        Self {
            added: None,
            removed: None,
            nested: None,
        }
    }

    pub(crate) fn set_added(&mut self, factory: ItemFactory<T, I, D>) {
        self.added = Some(factory);
    }

    pub(crate) fn set_removed(&mut self, factory: ItemFactory<T, I, D>) {
        self.removed = Some(factory);
    }

    pub(crate) fn set_nested(&mut self, comparer: Comparer<I, D>) {
        self.nested = Some(comparer);
    }

    pub(crate) fn has_nested(&self) -> bool {
        self.nested.is_some()
    }

    /// Report an item present only in the target collection
    pub(crate) fn emit_added(&self, out: &mut Vec<D>, source: &T, target: &T, item: &I) {
        if let Some(factory) = &self.added {
            out.push(factory(source, target, item));
        }
    }

    /// Report an item present only in the source collection
    pub(crate) fn emit_removed(&self, out: &mut Vec<D>, source: &T, target: &T, item: &I) {
        if let Some(factory) = &self.removed {
            out.push(factory(source, target, item));
        }
    }

    /// Run the nested comparer over a matched pair
    pub(crate) fn compare_matched(
        &self,
        out: &mut Vec<D>,
        source_item: &I,
        target_item: &I,
    ) -> Result<()> {
        if let Some(comparer) = &self.nested {
            out.extend(comparer.evaluate(source_item, target_item)?);
        }
        Ok(())
    }
}

/// Counts reported in a collection rule's debug summary
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub(crate) struct ReconcileCounts {
    pub(crate) matched: usize,
    pub(crate) added: usize,
    pub(crate) removed: usize,
}
