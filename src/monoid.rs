use std::collections::BTreeSet;

use crate::model::UseCase;

// Effective use cases are the union of the use cases of every existing group
// a profile belongs to, so only a set union is needed for now.

// Trait defining a Monoid, which represents a mathematical structure with an
// identity element and an associative binary operation.
pub trait Monoid<V> {
    // Returns the neutral element of the monoid.
    fn neutral() -> V;

    // Combines two elements of the monoid into a single element.
    fn combine(a: &V, b: &V) -> V;

    // Combines multiple elements, starting from `neutral()`.
    fn combine_all<I: IntoIterator<Item = V>>(values: I) -> V {
        values
            .into_iter()
            .fold(Self::neutral(), |acc, val| Self::combine(&acc, &val))
    }
}

impl Monoid<BTreeSet<UseCase>> for BTreeSet<UseCase> {
    fn neutral() -> BTreeSet<UseCase> {
        BTreeSet::new()
    }

    fn combine(a: &BTreeSet<UseCase>, b: &BTreeSet<UseCase>) -> BTreeSet<UseCase> {
        a.union(b).copied().collect()
    }
}
