//! Property tests for the collection rules.
//!
//! Inputs use unique address ids on each side, so both matching strategies
//! are well-defined and must agree.

#![allow(clippy::unwrap_used, clippy::expect_used)]

mod common;

use std::collections::BTreeSet;

use common::{
    address, addresses_by_key, addresses_by_predicate, person_comparer, with_addresses, Address,
    Difference, Person,
};
use proptest::prelude::*;
use rulediff_core::Comparer;

fn arb_addresses() -> impl Strategy<Value = Vec<Address>> {
    let cities = proptest::sample::select(vec!["A", "B", "C"]);
    proptest::collection::btree_map(0u32..40, cities, 0..25).prop_map(|entries| {
        entries
            .into_iter()
            .map(|(id, city)| address(id, city))
            .collect()
    })
}

fn arb_person() -> impl Strategy<Value = Person> {
    ("[a-z]{1,6}", 0u32..100, arb_addresses()).prop_map(|(name, age, addresses)| Person {
        name,
        age,
        addresses,
    })
}

fn ids(addresses: &[Address]) -> BTreeSet<u32> {
    addresses.iter().map(|a| a.id).collect()
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    #[test]
    fn self_compare_reports_nothing(value in arb_person()) {
        let diffs = person_comparer().compare(&value, &value).unwrap();
        prop_assert!(diffs.is_empty());
    }

    #[test]
    fn keyed_counts_match_set_differences(
        source in arb_addresses(),
        target in arb_addresses(),
    ) {
        let mut comparer: Comparer<Person, Difference> = Comparer::new();
        comparer.add_rule_for_each_keyed(addresses_by_key());

        let diffs = comparer
            .compare(&with_addresses(source.clone()), &with_addresses(target.clone()))
            .unwrap();

        let source_ids = ids(&source);
        let target_ids = ids(&target);
        let removed = diffs.iter().filter(|d| d.is_removed()).count();
        let added = diffs.iter().filter(|d| d.is_added()).count();

        prop_assert_eq!(removed, source_ids.difference(&target_ids).count());
        prop_assert_eq!(added, target_ids.difference(&source_ids).count());
    }

    #[test]
    fn predicate_and_keyed_strategies_agree(
        source in arb_addresses(),
        target in arb_addresses(),
    ) {
        let mut by_predicate: Comparer<Person, Difference> = Comparer::new();
        by_predicate.add_rule_for_each(addresses_by_predicate());
        let mut by_key: Comparer<Person, Difference> = Comparer::new();
        by_key.add_rule_for_each_keyed(addresses_by_key());

        let source = with_addresses(source);
        let target = with_addresses(target);

        prop_assert_eq!(
            by_predicate.compare(&source, &target).unwrap(),
            by_key.compare(&source, &target).unwrap()
        );
    }
}
