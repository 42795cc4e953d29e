//! Shared fixtures: a small person/address model and a typed difference enum.

use rulediff_core::{Comparer, KeyedCollectionRule, PredicateCollectionRule};

#[derive(Debug, Clone, PartialEq, Default)]
pub struct Person {
    pub name: String,
    pub age: u32,
    pub addresses: Vec<Address>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Address {
    pub id: u32,
    pub city: String,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Difference {
    NameChanged { old: String, new: String },
    AgeChanged { old: u32, new: u32 },
    AddressAdded { id: u32, city: String },
    AddressRemoved { id: u32 },
    AddressCityChanged { id: u32, old: String, new: String },
}

#[allow(dead_code)]
impl Difference {
    pub fn is_added(&self) -> bool {
        matches!(self, Difference::AddressAdded { .. })
    }

    pub fn is_removed(&self) -> bool {
        matches!(self, Difference::AddressRemoved { .. })
    }
}

#[allow(dead_code)]
pub fn address(id: u32, city: &str) -> Address {
    Address {
        id,
        city: city.to_string(),
    }
}

#[allow(dead_code)]
pub fn person(name: &str, age: u32, addresses: Vec<Address>) -> Person {
    Person {
        name: name.to_string(),
        age,
        addresses,
    }
}

#[allow(dead_code)]
pub fn with_addresses(addresses: Vec<Address>) -> Person {
    Person {
        addresses,
        ..Person::default()
    }
}

/// Configure the city-changed rule on an address comparer
#[allow(dead_code)]
pub fn city_rule(c: &mut Comparer<Address, Difference>) {
    c.add_rule(
        |s, t| s.city != t.city,
        |s, t| Difference::AddressCityChanged {
            id: s.id,
            old: s.city.clone(),
            new: t.city.clone(),
        },
    );
}

/// Addresses matched by id through a predicate, reporting all three outcomes
#[allow(dead_code)]
pub fn addresses_by_predicate() -> PredicateCollectionRule<Person, Address, Difference> {
    PredicateCollectionRule::new(
        |p: &Person| p.addresses.iter().collect(),
        |s: &Address, t: &Address| s.id == t.id,
    )
    .on_added(|_, _, a| Difference::AddressAdded {
        id: a.id,
        city: a.city.clone(),
    })
    .on_removed(|_, _, a| Difference::AddressRemoved { id: a.id })
    .with_nested(city_rule)
}

/// Addresses matched by id through a key selector, reporting all three outcomes
#[allow(dead_code)]
pub fn addresses_by_key() -> KeyedCollectionRule<Person, Address, u32, Difference> {
    KeyedCollectionRule::new(|p: &Person| p.addresses.iter().collect(), |a: &Address| a.id)
        .on_added(|_, _, a| Difference::AddressAdded {
            id: a.id,
            city: a.city.clone(),
        })
        .on_removed(|_, _, a| Difference::AddressRemoved { id: a.id })
        .with_nested(city_rule)
}

/// Name and age rules followed by the keyed address rule
#[allow(dead_code)]
pub fn person_comparer() -> Comparer<Person, Difference> {
    let mut comparer = Comparer::new();
    comparer
        .add_rule(
            |s: &Person, t: &Person| s.name != t.name,
            |s: &Person, t: &Person| Difference::NameChanged {
                old: s.name.clone(),
                new: t.name.clone(),
            },
        )
        .add_rule(
            |s: &Person, t: &Person| s.age != t.age,
            |s: &Person, t: &Person| Difference::AgeChanged {
                old: s.age,
                new: t.age,
            },
        )
        .add_rule_for_each_keyed(addresses_by_key());
    comparer
}
