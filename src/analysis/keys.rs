//! Superkey enumeration, candidate keys, and prime attributes
//!
//! Enumeration is a top-down search from the full attribute set: every
//! superkey found is shrunk one attribute at a time, memoized by exact set
//! so a subset reachable along several removal paths is processed once.
//! Worst case is exponential in attribute count; relation arity in this
//! domain is classroom-scale, and `NormalizerConfig::max_enumeration_arity`
//! guards the entry point.

use crate::analysis::closure::is_superkey;
use crate::relation::{AttrOrdinal, AttrSet, Relation};
use fxhash::FxHashSet;

/// Enumerate every superkey of the relation
///
/// Output order is the deterministic pre-order of the search (removal
/// candidates visited in ascending ordinal order); clients must not rely on
/// any other property of the order.
pub fn superkeys(relation: &Relation) -> Vec<AttrSet> {
    let mut found: Vec<AttrSet> = Vec::new();
    let mut visited: FxHashSet<Vec<AttrOrdinal>> = FxHashSet::default();
    let full = relation.all_ordinals();
    shrink(relation, full, &mut visited, &mut found);
    found
}

fn shrink(
    relation: &Relation,
    candidate: AttrSet,
    visited: &mut FxHashSet<Vec<AttrOrdinal>>,
    found: &mut Vec<AttrSet>,
) {
    let key: Vec<AttrOrdinal> = candidate.iter().copied().collect();
    if !visited.insert(key) {
        return;
    }
    if !is_superkey(relation, &candidate) {
        // every subset of a non-superkey fails too; prune this branch
        return;
    }
    found.push(candidate.clone());
    for &attr in &candidate {
        let mut smaller = candidate.clone();
        smaller.remove(&attr);
        if smaller.is_empty() {
            continue;
        }
        shrink(relation, smaller, visited, found);
    }
}

/// Candidate keys: superkeys with no proper subset that is itself a superkey
pub fn candidate_keys(relation: &Relation) -> Vec<AttrSet> {
    let all = superkeys(relation);
    all.iter()
        .filter(|key| {
            !all.iter()
                .any(|other| other.len() < key.len() && other.is_subset(key))
        })
        .cloned()
        .collect()
}

/// Prime attributes: union of all candidate keys
pub fn prime_attributes(relation: &Relation) -> AttrSet {
    candidate_keys(relation)
        .into_iter()
        .flatten()
        .collect()
}
