//! Key-indexed collection rule.
//!
//! Both sides are indexed by an extracted key before anything is compared,
//! giving O(n+m) reconciliation. Keys must be unique within each side; the
//! first duplicate aborts the comparison with [`DiffError::DuplicateKey`],
//! which reports the positions of the two colliding items.

use std::collections::hash_map::Entry;
use std::collections::HashMap;
use std::hash::Hash;

use super::{CollectionHandlers, ItemsSelector, ReconcileCounts, Rule};
use crate::comparer::Comparer;
use crate::errors::{DiffError, Result, Side};
use rulediff_core_types::schema::RULE_KIND_KEYED;

type KeySelector<I, K> = Box<dyn Fn(&I) -> K + Send + Sync>;

/// Reconciles two item collections by a unique key
///
/// The key selector runs exactly once per item. Output order: for each source
/// item in order, its nested differences (key on both sides) or its removed
/// difference; then, for each target-only item in order, its added
/// difference.
///
/// # Example
///
/// ```
/// use rulediff_core::rules::{KeyedCollectionRule, Rule};
///
/// struct Inventory { skus: Vec<(u32, u32)> } // (sku, quantity)
///
/// let rule = KeyedCollectionRule::new(|inv: &Inventory| inv.skus.iter().collect(), |s: &(u32, u32)| s.0)
///     .on_added(|_, _, s: &(u32, u32)| format!("new sku {}", s.0))
///     .with_nested(|c| {
///         c.add_rule(|a, b| a.1 != b.1, |a, b| format!("sku {}: {} -> {}", a.0, a.1, b.1));
///     });
///
/// let before = Inventory { skus: vec![(1, 10), (2, 5)] };
/// let after = Inventory { skus: vec![(1, 7), (2, 5), (3, 1)] };
/// assert_eq!(
///     rule.compare(&before, &after).unwrap(),
///     vec!["sku 1: 10 -> 7", "new sku 3"]
/// );
/// ```
pub struct KeyedCollectionRule<T, I, K, D> {
    items: ItemsSelector<T, I>,
    key: KeySelector<I, K>,
    handlers: CollectionHandlers<T, I, D>,
}

impl<T, I, K, D> KeyedCollectionRule<T, I, K, D>
where
    I: 'static,
    K: Eq + Hash,
    D: 'static,
{
    /// Create a rule over the items borrowed by `items`, identifying entries by `key`
    pub fn new<S, F>(items: S, key: F) -> Self
    where
        S: for<'a> Fn(&'a T) -> Vec<&'a I> + Send + Sync + 'static,
        F: Fn(&I) -> K + Send + Sync + 'static,
    {
        Self {
            items: Box::new(items),
            key: Box::new(key),
            handlers: CollectionHandlers::new(),
        }
    }

    /// Report target-only items through `factory(source, target, item)`
    pub fn on_added<F>(mut self, factory: F) -> Self
    where
        F: Fn(&T, &T, &I) -> D + Send + Sync + 'static,
    {
        self.handlers.set_added(Box::new(factory));
        self
    }

    /// Report source-only items through `factory(source, target, item)`
    pub fn on_removed<F>(mut self, factory: F) -> Self
    where
        F: Fn(&T, &T, &I) -> D + Send + Sync + 'static,
    {
        self.handlers.set_removed(Box::new(factory));
        self
    }

    /// Compare matched pairs with a nested comparer configured by `configure`
    ///
    /// `configure` runs immediately against a fresh, empty comparer.
    pub fn with_nested<C>(self, configure: C) -> Self
    where
        C: FnOnce(&mut Comparer<I, D>),
    {
        let mut comparer = Comparer::new();
        configure(&mut comparer);
        self.with_comparer(comparer)
    }

    /// Compare matched pairs with an already configured comparer
    pub fn with_comparer(mut self, comparer: Comparer<I, D>) -> Self {
        self.handlers.set_nested(comparer);
        self
    }
}

/// Map each key to its position, failing on the first repeated key
fn index_unique<K>(keys: &[K], side: Side) -> Result<HashMap<&K, usize>>
where
    K: Eq + Hash,
{
    let mut index = HashMap::with_capacity(keys.len());
    for (position, key) in keys.iter().enumerate() {
        match index.entry(key) {
            Entry::Occupied(first) => {
                let first_position = *first.get();
                tracing::warn!(
                    rule_kind = RULE_KIND_KEYED,
                    side = side.as_str(),
                    first_position,
                    position,
                    "duplicate key in collection"
                );
                return Err(DiffError::DuplicateKey {
                    side,
                    first_position,
                    position,
                });
            }
            Entry::Vacant(slot) => {
                slot.insert(position);
            }
        }
    }
    Ok(index)
}

impl<T, I, K, D> Rule<T, D> for KeyedCollectionRule<T, I, K, D>
where
    K: Eq + Hash,
{
    fn kind(&self) -> &'static str {
        RULE_KIND_KEYED
    }

    fn compare(&self, source: &T, target: &T) -> Result<Vec<D>> {
        let source_items = (self.items)(source);
        let target_items = (self.items)(target);

        let source_keys: Vec<K> = source_items.iter().map(|&item| (self.key)(item)).collect();
        let target_keys: Vec<K> = target_items.iter().map(|&item| (self.key)(item)).collect();

        // Both indexes are complete before any factory or nested comparer runs.
        let source_index = index_unique(&source_keys, Side::Source)?;
        let target_index = index_unique(&target_keys, Side::Target)?;

        let mut differences = Vec::new();
        let mut counts = ReconcileCounts::default();

        for (source_item, key) in source_items.iter().copied().zip(&source_keys) {
            match target_index.get(key) {
                Some(&position) => {
                    counts.matched += 1;
                    self.handlers.compare_matched(
                        &mut differences,
                        source_item,
                        target_items[position],
                    )?;
                }
                None => {
                    counts.removed += 1;
                    self.handlers
                        .emit_removed(&mut differences, source, target, source_item);
                }
            }
        }

        for (target_item, key) in target_items.iter().copied().zip(&target_keys) {
            if !source_index.contains_key(key) {
                counts.added += 1;
                self.handlers
                    .emit_added(&mut differences, source, target, target_item);
            }
        }

        tracing::debug!(
            rule_kind = RULE_KIND_KEYED,
            source_len = source_items.len(),
            target_len = target_items.len(),
            matched = counts.matched,
            added = counts.added,
            removed = counts.removed,
            nested = self.handlers.has_nested(),
            diff_count = differences.len(),
        );

        Ok(differences)
    }
}
