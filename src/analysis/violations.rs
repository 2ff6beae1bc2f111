//! Dependency lookups and normal-form violation extraction
//!
//! The extraction functions drive the 2NF/3NF synthesis and BCNF steps:
//! partial dependencies (a proper subset of a candidate key determines a
//! non-prime attribute), transitive dependencies (a fully non-prime
//! determinant), and non-superkey dependencies (the BCNF violation set).

use crate::analysis::closure::is_superkey;
use crate::analysis::keys::{candidate_keys, prime_attributes};
use crate::relation::{AttrOrdinal, AttrSet, FunctionalDependency, Relation};

/// Every declared FD whose dependant set contains `attr`
pub fn determinants_of(relation: &Relation, attr: AttrOrdinal) -> Vec<&FunctionalDependency> {
    relation
        .functional_dependencies()
        .iter()
        .filter(|fd| fd.dependant.contains(&attr))
        .collect()
}

/// Dependant set of the FD whose determinant exactly equals `determinant`
///
/// This is an exact-match lookup, not a closure-based one: a determinant
/// that is a superset or subset of a declared FD's determinant finds
/// nothing. The 2NF/3NF synthesis relies on this exact behavior.
pub fn dependants_of(relation: &Relation, determinant: &AttrSet) -> AttrSet {
    relation
        .functional_dependencies()
        .iter()
        .find(|fd| fd.determinant == *determinant)
        .map(|fd| fd.dependant.clone())
        .unwrap_or_default()
}

/// Partial dependencies: for every non-prime attribute and candidate key,
/// every declared FD whose determinant is a proper subset of that key and
/// determines the attribute
///
/// Results are merged by determinant (first-seen order), with dependants
/// trimmed to non-prime attributes. Intended precondition: the relation is
/// in 1NF.
pub fn partial_dependencies(relation: &Relation) -> Vec<FunctionalDependency> {
    let primes = prime_attributes(relation);
    let keys = candidate_keys(relation);
    let non_primes: Vec<AttrOrdinal> = relation
        .all_ordinals()
        .difference(&primes)
        .copied()
        .collect();

    let mut collected: Vec<FunctionalDependency> = Vec::new();
    for &attr in &non_primes {
        for key in &keys {
            for fd in relation.functional_dependencies() {
                let proper_subset = fd.determinant.is_subset(key) && fd.determinant != *key;
                if !proper_subset || !fd.dependant.contains(&attr) {
                    continue;
                }
                let non_prime_dependants: AttrSet = fd
                    .dependant
                    .difference(&primes)
                    .copied()
                    .collect();
                if non_prime_dependants.is_empty() {
                    continue;
                }
                merge_by_determinant(&mut collected, &fd.determinant, &non_prime_dependants);
            }
        }
    }
    collected
}

/// Transitive dependencies: every declared FD whose determinant is composed
/// entirely of non-prime attributes, with dependants trimmed to non-prime
/// attributes
///
/// Results are merged by determinant. Intended precondition: the relation is
/// in 2NF.
pub fn transitive_dependencies(relation: &Relation) -> Vec<FunctionalDependency> {
    let primes = prime_attributes(relation);

    let mut collected: Vec<FunctionalDependency> = Vec::new();
    for fd in relation.functional_dependencies() {
        if fd.determinant.iter().any(|attr| primes.contains(attr)) {
            continue;
        }
        let non_prime_dependants: AttrSet = fd
            .dependant
            .difference(&primes)
            .copied()
            .collect();
        if non_prime_dependants.is_empty() {
            continue;
        }
        merge_by_determinant(&mut collected, &fd.determinant, &non_prime_dependants);
    }
    collected
}

/// Non-superkey dependencies: every declared FD whose determinant is not a
/// superkey - the BCNF violation set, in declaration order
///
/// Trivial dependencies (dependant contained in the determinant) are not
/// violations: splitting on one would not remove any attribute and the
/// decomposition loop could not make progress.
pub fn non_superkey_dependencies(relation: &Relation) -> Vec<&FunctionalDependency> {
    relation
        .functional_dependencies()
        .iter()
        .filter(|fd| {
            !fd.dependant.is_subset(&fd.determinant) && !is_superkey(relation, &fd.determinant)
        })
        .collect()
}

fn merge_by_determinant(
    collected: &mut Vec<FunctionalDependency>,
    determinant: &AttrSet,
    dependants: &AttrSet,
) {
    if let Some(existing) = collected
        .iter_mut()
        .find(|fd| fd.determinant == *determinant)
    {
        existing.dependant.extend(dependants.iter().copied());
    } else {
        collected.push(FunctionalDependency::new(
            determinant.clone(),
            dependants.clone(),
        ));
    }
}
