//! rulediff demo
//!
//! Compares two versions of a person record:
//! - Scalar rules for name and age
//! - Addresses reconciled by id, with a nested comparer for matched addresses
//! - Tags reconciled by a case-insensitive predicate
//! - The duplicate-key failure mode
//!
//! Run with `RUST_LOG=rulediff_core=debug` to see per-rule summaries.

use rulediff_core::logging_facility::{init, Profile};
use rulediff_core::{Comparer, ExError, GenericDifference, KeyedCollectionRule, PredicateCollectionRule};

#[derive(Debug, Clone)]
struct Address {
    id: u32,
    street: String,
    city: String,
}

#[derive(Debug, Clone)]
struct Person {
    name: String,
    age: u32,
    addresses: Vec<Address>,
    tags: Vec<String>,
}

fn address(id: u32, street: &str, city: &str) -> Address {
    Address {
        id,
        street: street.to_string(),
        city: city.to_string(),
    }
}

fn build_comparer() -> Comparer<Person, GenericDifference> {
    let mut comparer = Comparer::new();
    comparer
        .add_rule(
            |s: &Person, t: &Person| s.name != t.name,
            |s: &Person, t: &Person| {
                GenericDifference::new(format!("Name changed: {} -> {}", s.name, t.name))
            },
        )
        .add_rule(
            |s: &Person, t: &Person| s.age != t.age,
            |s: &Person, t: &Person| {
                GenericDifference::new(format!("Age changed: {} -> {}", s.age, t.age))
            },
        )
        .add_rule_for_each_keyed(
            KeyedCollectionRule::new(|p: &Person| p.addresses.iter().collect(), |a: &Address| a.id)
                .on_added(|_, t, a| {
                    GenericDifference::new(format!("{}: address {} added in {}", t.name, a.id, a.city))
                })
                .on_removed(|s, _, a| {
                    GenericDifference::new(format!("{}: address {} removed", s.name, a.id))
                })
                .with_nested(|nested| {
                    nested
                        .add_rule(
                            |s, t| s.street != t.street,
                            |s, t| {
                                GenericDifference::new(format!(
                                    "Address {} street: {} -> {}",
                                    s.id, s.street, t.street
                                ))
                            },
                        )
                        .add_rule(
                            |s, t| s.city != t.city,
                            |s, t| {
                                GenericDifference::new(format!(
                                    "Address {} city: {} -> {}",
                                    s.id, s.city, t.city
                                ))
                            },
                        );
                }),
        )
        .add_rule_for_each(
            PredicateCollectionRule::new(
                |p: &Person| p.tags.iter().collect(),
                |s: &String, t: &String| s.eq_ignore_ascii_case(t),
            )
            .on_added(|_, _, tag| GenericDifference::new(format!("Tag added: {}", tag)))
            .on_removed(|_, _, tag| GenericDifference::new(format!("Tag removed: {}", tag))),
        );
    comparer
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    init(Profile::Development);

    println!("=== rulediff Person Demo ===\n");

    let comparer = build_comparer();
    println!("Configured {:?}\n", comparer);

    let before = Person {
        name: "John".to_string(),
        age: 30,
        addresses: vec![
            address(1, "1 Main St", "Springfield"),
            address(2, "9 Elm St", "Shelbyville"),
        ],
        tags: vec!["VIP".to_string(), "newsletter".to_string()],
    };
    let after = Person {
        name: "Jane".to_string(),
        age: 31,
        addresses: vec![
            address(1, "1 Main St", "Capital City"),
            address(3, "4 Oak Ave", "Ogdenville"),
        ],
        tags: vec!["vip".to_string(), "beta".to_string()],
    };

    println!("## Part 1: Differences\n");
    let diffs = comparer.compare(&before, &after)?;
    for diff in &diffs {
        println!("  - {}", diff);
    }
    println!("\n{} differences found\n", diffs.len());

    println!("## Part 2: Identical values\n");
    let same = comparer.compare(&before, &before.clone())?;
    println!("  {} differences found\n", same.len());

    println!("## Part 3: Duplicate keys\n");
    let mut broken = after.clone();
    broken.addresses.push(address(3, "5 Oak Ave", "Ogdenville"));
    match comparer.compare(&before, &broken) {
        Ok(_) => println!("  unexpected success"),
        Err(err) => {
            println!("  error: {}", err);
            println!("  canonical: {}", ExError::from(err));
        }
    }

    Ok(())
}
