//! Scalar rule: one predicate, at most one difference.

use super::Rule;
use crate::errors::Result;
use rulediff_core_types::schema::RULE_KIND_SCALAR;

type Predicate<T> = Box<dyn Fn(&T, &T) -> bool + Send + Sync>;
type Factory<T, D> = Box<dyn Fn(&T, &T) -> D + Send + Sync>;

/// Emits exactly one difference when `is_different(source, target)` holds
///
/// # Example
///
/// ```
/// use rulediff_core::rules::{Rule, ScalarRule};
///
/// let rule = ScalarRule::new(
///     |a: &i32, b: &i32| a != b,
///     |a: &i32, b: &i32| format!("{} -> {}", a, b),
/// );
/// assert_eq!(rule.compare(&1, &2).unwrap(), vec!["1 -> 2".to_string()]);
/// assert!(rule.compare(&1, &1).unwrap().is_empty());
/// ```
pub struct ScalarRule<T, D> {
    is_different: Predicate<T>,
    factory: Factory<T, D>,
}

impl<T, D> ScalarRule<T, D> {
    pub fn new<P, F>(is_different: P, factory: F) -> Self
    where
        P: Fn(&T, &T) -> bool + Send + Sync + 'static,
        F: Fn(&T, &T) -> D + Send + Sync + 'static,
    {
        Self {
            is_different: Box::new(is_different),
            factory: Box::new(factory),
        }
    }
}

impl<T, D> Rule<T, D> for ScalarRule<T, D> {
    fn kind(&self) -> &'static str {
        RULE_KIND_SCALAR
    }

    fn compare(&self, source: &T, target: &T) -> Result<Vec<D>> {
        if (self.is_different)(source, target) {
            Ok(vec![(self.factory)(source, target)])
        } else {
            Ok(Vec::new())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    #[test]
    fn test_factory_not_called_when_predicate_false() {
        let calls = Arc::new(AtomicUsize::new(0));
        let counter = calls.clone();
        let rule = ScalarRule::new(
            |_: &u8, _: &u8| false,
            move |_: &u8, _: &u8| {
                counter.fetch_add(1, Ordering::SeqCst);
            },
        );

        assert!(rule.compare(&1, &2).unwrap().is_empty());
        assert_eq!(calls.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn test_factory_receives_source_then_target() {
        let rule = ScalarRule::new(
            |a: &String, b: &String| a != b,
            |a: &String, b: &String| format!("{}->{}", a, b),
        );
        let diffs = rule
            .compare(&"old".to_string(), &"new".to_string())
            .unwrap();
        assert_eq!(diffs, vec!["old->new".to_string()]);
    }

    #[test]
    fn test_kind() {
        let rule = ScalarRule::new(|_: &(), _: &()| true, |_: &(), _: &()| ());
        assert_eq!(rule.kind(), RULE_KIND_SCALAR);
    }
}
