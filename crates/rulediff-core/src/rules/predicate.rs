//! Predicate-matched collection rule.
//!
//! Items are paired with a caller predicate instead of a key, which allows
//! composite or fuzzy identity at O(n·m) predicate evaluations per pass.
//! The predicate must pair every item with at most one counterpart; an item
//! matching two or more counterparts fails the comparison instead of picking
//! one arbitrarily.

use super::{CollectionHandlers, ItemsSelector, ReconcileCounts, Rule};
use crate::comparer::Comparer;
use crate::errors::{DiffError, Result, Side};
use rulediff_core_types::schema::RULE_KIND_PREDICATE;

type MatchingPredicate<I> = Box<dyn Fn(&I, &I) -> bool + Send + Sync>;

/// Reconciles two item collections with a pairwise matching predicate
///
/// The predicate is always invoked as `matching(source_item, target_item)`.
/// Every item on both sides is paired before any factory or nested comparer
/// runs, so an ambiguous match fails the rule without side effects.
///
/// Output order: for each source item in order, either its nested
/// differences (matched) or its removed difference (unmatched); then, for
/// each unmatched target item in order, its added difference.
///
/// # Example
///
/// ```
/// use rulediff_core::rules::{PredicateCollectionRule, Rule};
///
/// struct Basket { fruit: Vec<String> }
///
/// let rule = PredicateCollectionRule::new(
///     |b: &Basket| b.fruit.iter().collect(),
///     |a: &String, b: &String| a.eq_ignore_ascii_case(b),
/// )
/// .on_added(|_, _, f: &String| format!("+{}", f))
/// .on_removed(|_, _, f: &String| format!("-{}", f));
///
/// let old = Basket { fruit: vec!["Apple".into(), "pear".into()] };
/// let new = Basket { fruit: vec!["apple".into(), "fig".into()] };
/// assert_eq!(rule.compare(&old, &new).unwrap(), vec!["-pear", "+fig"]);
/// ```
pub struct PredicateCollectionRule<T, I, D> {
    items: ItemsSelector<T, I>,
    matching: MatchingPredicate<I>,
    handlers: CollectionHandlers<T, I, D>,
}

impl<T, I, D> PredicateCollectionRule<T, I, D>
where
    I: 'static,
    D: 'static,
{
    /// Create a rule over the items borrowed by `items`, pairing entries with `matching`
    pub fn new<S, P>(items: S, matching: P) -> Self
    where
        S: for<'a> Fn(&'a T) -> Vec<&'a I> + Send + Sync + 'static,
        P: Fn(&I, &I) -> bool + Send + Sync + 'static,
    {
        Self {
            items: Box::new(items),
            matching: Box::new(matching),
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

impl<T, I, D> PredicateCollectionRule<T, I, D> {
    /// Index of the single candidate paired with `item`, if any
    ///
    /// `item_side` says which collection `item` belongs to; `candidates`
    /// always come from the opposite one.
    fn unique_match(
        &self,
        item: &I,
        item_side: Side,
        position: usize,
        candidates: &[&I],
    ) -> Result<Option<usize>> {
        let mut found = None;
        let mut matches = 0usize;
        for (index, candidate) in candidates.iter().copied().enumerate() {
            let is_match = match item_side {
                Side::Source => (self.matching)(item, candidate),
                Side::Target => (self.matching)(candidate, item),
            };
            if is_match {
                matches += 1;
                if found.is_none() {
                    found = Some(index);
                }
            }
        }

        if matches > 1 {
            tracing::warn!(
                rule_kind = RULE_KIND_PREDICATE,
                side = item_side.as_str(),
                position,
                matches,
                "matching predicate paired one item with several counterparts"
            );
            return Err(DiffError::AmbiguousMatch {
                side: item_side,
                position,
                matches,
            });
        }
        Ok(found)
    }
}

impl<T, I, D> Rule<T, D> for PredicateCollectionRule<T, I, D> {
    fn kind(&self) -> &'static str {
        RULE_KIND_PREDICATE
    }

    fn compare(&self, source: &T, target: &T) -> Result<Vec<D>> {
        let source_items = (self.items)(source);
        let target_items = (self.items)(target);

        // Pair both sides completely before emitting anything.
        let mut source_pairs = Vec::with_capacity(source_items.len());
        for (position, item) in source_items.iter().copied().enumerate() {
            source_pairs.push(self.unique_match(item, Side::Source, position, &target_items)?);
        }
        let mut target_paired = Vec::with_capacity(target_items.len());
        for (position, item) in target_items.iter().copied().enumerate() {
            let pair = self.unique_match(item, Side::Target, position, &source_items)?;
            target_paired.push(pair.is_some());
        }

        let mut differences = Vec::new();
        let mut counts = ReconcileCounts::default();

        for (source_item, pair) in source_items.iter().copied().zip(source_pairs) {
            match pair {
                Some(index) => {
                    counts.matched += 1;
                    self.handlers.compare_matched(
                        &mut differences,
                        source_item,
                        target_items[index],
                    )?;
                }
                None => {
                    counts.removed += 1;
                    self.handlers
                        .emit_removed(&mut differences, source, target, source_item);
                }
            }
        }

        for (target_item, paired) in target_items.iter().copied().zip(target_paired) {
            if !paired {
                counts.added += 1;
                self.handlers
                    .emit_added(&mut differences, source, target, target_item);
            }
        }

        tracing::debug!(
            rule_kind = RULE_KIND_PREDICATE,
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
