/// Dependency types for the normal-form engine
///
/// Attributes are addressed by ordinal position throughout the analysis and
/// decomposition code; name lookup happens only at relation boundaries
/// (construction, declaration, display). Ordinals are only stable within one
/// Relation instance and must never cross relations without translating
/// through names.
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Attribute ordinal (index within a relation's attribute list)
pub type AttrOrdinal = usize;

/// Ordered set of attribute ordinals
///
/// BTreeSet gives deterministic ascending iteration, which the closure and
/// enumeration algorithms rely on for reproducible output.
pub type AttrSet = BTreeSet<AttrOrdinal>;

/// Build an AttrSet from a slice of ordinals
pub fn attr_set(ordinals: &[AttrOrdinal]) -> AttrSet {
    ordinals.iter().copied().collect()
}

/// Functional dependency: determinant -> dependant
///
/// Semantics: for all row pairs, equal values on the determinant imply equal
/// values on the dependant.
///
/// # Invariants
/// - The determinant is never empty
/// - Every ordinal references an existing attribute of the owning relation
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct FunctionalDependency {
    /// Determining attribute set
    pub determinant: AttrSet,

    /// Determined attribute set
    pub dependant: AttrSet,
}

impl FunctionalDependency {
    pub fn new(determinant: AttrSet, dependant: AttrSet) -> Self {
        Self {
            determinant,
            dependant,
        }
    }

    /// True if every determinant and dependant ordinal lies within `attrs`
    pub fn is_contained_in(&self, attrs: &AttrSet) -> bool {
        self.determinant.is_subset(attrs) && self.dependant.is_subset(attrs)
    }
}

/// Restricted multivalued dependency: X ->> {Y, Z}
///
/// Only the complementary-pair form is representable: the dependant is always
/// the specific pair (Y, Z) with Z = R - X - Y, per the classical
/// X ->> Y | Z equivalence used by the 4NF step. General MVDs are not
/// supported; this is a design restriction, not a bug.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MultivaluedDependency {
    /// Determining attribute
    pub determinant: AttrOrdinal,

    /// Unordered dependant pair, stored with the smaller ordinal first
    pub dependants: (AttrOrdinal, AttrOrdinal),
}

impl MultivaluedDependency {
    pub fn new(determinant: AttrOrdinal, a: AttrOrdinal, b: AttrOrdinal) -> Self {
        let dependants = if a <= b { (a, b) } else { (b, a) };
        Self {
            determinant,
            dependants,
        }
    }

    /// True if the determinant and both dependants lie within `attrs`
    pub fn is_contained_in(&self, attrs: &AttrSet) -> bool {
        attrs.contains(&self.determinant)
            && attrs.contains(&self.dependants.0)
            && attrs.contains(&self.dependants.1)
    }
}
