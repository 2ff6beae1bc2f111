//! Attribute closure and the closure-based superkey test
//!
//! This is the classical attribute-closure fixpoint: starting from a seed
//! set, repeatedly apply every functional dependency whose determinant is
//! already covered, until a full pass adds nothing. Scan order is the FD
//! declaration order, which keeps the computation deterministic.

use crate::relation::{AttrSet, Relation};

/// Compute the attribute closure of `seed` under the relation's FDs
///
/// Complexity: each fixpoint pass is O(|FD| x |attrs|); bounded by
/// O(|FD|) passes, since every productive pass grows the closure.
pub fn attribute_closure(relation: &Relation, seed: &AttrSet) -> AttrSet {
    let mut closure = seed.clone();
    let mut changed = true;
    while changed {
        changed = false;
        for fd in relation.functional_dependencies() {
            if fd.determinant.is_subset(&closure) && !fd.dependant.is_subset(&closure) {
                closure.extend(fd.dependant.iter().copied());
                changed = true;
            }
        }
    }
    closure
}

/// True if `candidate` is a superkey: its closure covers every attribute
///
/// Implemented as the incremental "remaining set" variant: attributes not
/// yet reachable are tracked explicitly so the test can return as soon as
/// nothing is left to cover.
pub fn is_superkey(relation: &Relation, candidate: &AttrSet) -> bool {
    let mut remaining: AttrSet = relation
        .all_ordinals()
        .difference(candidate)
        .copied()
        .collect();
    if remaining.is_empty() {
        return true;
    }

    let mut effective = candidate.clone();
    loop {
        let mut grew = false;
        for fd in relation.functional_dependencies() {
            if fd.determinant.is_subset(&effective) && !fd.dependant.is_subset(&effective) {
                for &attr in &fd.dependant {
                    effective.insert(attr);
                    remaining.remove(&attr);
                }
                grew = true;
                if remaining.is_empty() {
                    return true;
                }
            }
        }
        if !grew {
            // fixpoint reached without full closure
            return false;
        }
    }
}
