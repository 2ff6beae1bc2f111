//! Relation data model
//!
//! A `Relation` holds an ordered attribute list, row tuples, a declared
//! primary key, and the declared functional / multivalued dependency sets.
//! It is populated once during setup (rows, key, dependencies) and is then
//! read-only input to the analysis and decomposition code, which only ever
//! produce new `Relation` instances - never an in-place edit.

pub mod dependency;

pub use dependency::{attr_set, AttrOrdinal, AttrSet, FunctionalDependency, MultivaluedDependency};

use crate::error::{NormalizerError, NormalizerResult};
use fxhash::FxHashMap;
use serde::Serialize;

/// A single relation: attributes, rows, primary key, dependencies
///
/// # Invariants
/// - Attribute names are unique; ordinal = index into `attributes`
/// - Every stored row has arity == `attributes.len()`
/// - Primary-key and dependency ordinals always reference existing attributes
///
/// Note: serialization is one-way (for presentation); rebuilding a Relation
/// goes through `Relation::new` so the name lookup stays consistent.
#[derive(Clone, Debug, Serialize)]
pub struct Relation {
    /// Relation name (used in error messages and rendering)
    name: String,

    /// Ordered attribute names (ordinal = index)
    attributes: Vec<String>,

    /// Row tuples, one value per attribute
    rows: Vec<Vec<String>>,

    /// Primary key as attribute ordinals (empty until assigned)
    primary_key: AttrSet,

    /// Declared functional dependencies, in declaration order
    ///
    /// Declaration order is the tie-break that determines the exact
    /// decomposition shape in BCNF, so it is preserved.
    functional_dependencies: Vec<FunctionalDependency>,

    /// Declared multivalued dependencies, in declaration order
    multivalued_dependencies: Vec<MultivaluedDependency>,

    /// Fast lookup: attribute name -> ordinal
    #[serde(skip)]
    name_lookup: FxHashMap<String, AttrOrdinal>,
}

impl Relation {
    /// Create an empty relation from an ordered list of unique attribute names
    pub fn new(name: impl Into<String>, attributes: Vec<String>) -> NormalizerResult<Self> {
        let name = name.into();
        let mut name_lookup = FxHashMap::default();
        for (ordinal, attr) in attributes.iter().enumerate() {
            if name_lookup.insert(attr.clone(), ordinal).is_some() {
                return Err(NormalizerError::invalid_attribute(
                    format!("duplicate attribute '{}'", attr),
                    name,
                ));
            }
        }
        Ok(Self {
            name,
            attributes,
            rows: Vec::new(),
            primary_key: AttrSet::new(),
            functional_dependencies: Vec::new(),
            multivalued_dependencies: Vec::new(),
            name_lookup,
        })
    }

    /// Internal constructor for decomposition output
    ///
    /// Callers guarantee attribute uniqueness (names are projected from an
    /// already-valid source relation) and that every ordinal in the key and
    /// dependency sets is a valid index into `attributes`.
    pub(crate) fn from_parts(
        name: String,
        attributes: Vec<String>,
        primary_key: AttrSet,
        functional_dependencies: Vec<FunctionalDependency>,
        multivalued_dependencies: Vec<MultivaluedDependency>,
    ) -> Self {
        let name_lookup = attributes
            .iter()
            .enumerate()
            .map(|(ordinal, attr)| (attr.clone(), ordinal))
            .collect();
        Self {
            name,
            attributes,
            rows: Vec::new(),
            primary_key,
            functional_dependencies,
            multivalued_dependencies,
            name_lookup,
        }
    }

    // --- accessors -------------------------------------------------------

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn attribute_names(&self) -> &[String] {
        &self.attributes
    }

    pub fn attribute_count(&self) -> usize {
        self.attributes.len()
    }

    pub fn rows(&self) -> &[Vec<String>] {
        &self.rows
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Primary key as ordinals (empty until assigned)
    pub fn primary_key(&self) -> &AttrSet {
        &self.primary_key
    }

    /// Primary key as attribute names, in ascending ordinal order
    pub fn primary_key_names(&self) -> Vec<&str> {
        self.primary_key
            .iter()
            .map(|&ordinal| self.attributes[ordinal].as_str())
            .collect()
    }

    pub fn functional_dependencies(&self) -> &[FunctionalDependency] {
        &self.functional_dependencies
    }

    pub fn multivalued_dependencies(&self) -> &[MultivaluedDependency] {
        &self.multivalued_dependencies
    }

    /// FD list as paired name-lists (determinant names, dependant names)
    pub fn functional_dependency_names(&self) -> Vec<(Vec<&str>, Vec<&str>)> {
        self.functional_dependencies
            .iter()
            .map(|fd| {
                (
                    self.ordinals_to_names(&fd.determinant),
                    self.ordinals_to_names(&fd.dependant),
                )
            })
            .collect()
    }

    /// MVD list as (determinant name, dependant name pair)
    pub fn multivalued_dependency_names(&self) -> Vec<(&str, (&str, &str))> {
        self.multivalued_dependencies
            .iter()
            .map(|mvd| {
                (
                    self.attributes[mvd.determinant].as_str(),
                    (
                        self.attributes[mvd.dependants.0].as_str(),
                        self.attributes[mvd.dependants.1].as_str(),
                    ),
                )
            })
            .collect()
    }

    /// Resolve an attribute name to its ordinal
    pub fn ordinal_of(&self, name: &str) -> Option<AttrOrdinal> {
        self.name_lookup.get(name).copied()
    }

    /// Attribute name at the given ordinal
    pub fn name_of(&self, ordinal: AttrOrdinal) -> Option<&str> {
        self.attributes.get(ordinal).map(|s| s.as_str())
    }

    /// Full attribute set {0..n} as ordinals
    pub fn all_ordinals(&self) -> AttrSet {
        (0..self.attributes.len()).collect()
    }

    fn ordinals_to_names(&self, set: &AttrSet) -> Vec<&str> {
        set.iter()
            .map(|&ordinal| self.attributes[ordinal].as_str())
            .collect()
    }

    fn resolve(&self, name: &str) -> NormalizerResult<AttrOrdinal> {
        self.ordinal_of(name)
            .ok_or_else(|| NormalizerError::invalid_attribute(name, &self.name))
    }

    // --- rows ------------------------------------------------------------

    /// Insert a row; its arity must equal the attribute count
    pub fn add_row(&mut self, row: Vec<String>) -> NormalizerResult<()> {
        if row.len() != self.attributes.len() {
            return Err(NormalizerError::shape_mismatch(
                self.attributes.len(),
                row.len(),
            )
            .with_context(format!("row rejected by relation '{}'", self.name)));
        }
        self.rows.push(row);
        Ok(())
    }

    pub fn add_rows(&mut self, rows: Vec<Vec<String>>) -> NormalizerResult<()> {
        for row in rows {
            self.add_row(row)?;
        }
        Ok(())
    }

    /// Insert a projected row unless an identical tuple is already present
    /// (relational set semantics, used by decomposition projection)
    pub(crate) fn add_row_deduplicated(&mut self, row: Vec<String>) {
        debug_assert_eq!(row.len(), self.attributes.len());
        if !self.rows.iter().any(|existing| *existing == row) {
            self.rows.push(row);
        }
    }

    /// Remove the single row identified by the given primary-key values
    ///
    /// Values must be supplied in ascending primary-key ordinal order (the
    /// order the key attributes appear in the relation). Fails if the key
    /// matches zero rows or more than one row.
    pub fn remove_row_by_key(&mut self, key_values: &[&str]) -> NormalizerResult<()> {
        if key_values.len() != self.primary_key.len() {
            return Err(NormalizerError::shape_mismatch(
                self.primary_key.len(),
                key_values.len(),
            )
            .with_context("primary-key value arity"));
        }
        let key_ordinals: Vec<AttrOrdinal> = self.primary_key.iter().copied().collect();
        let matches: Vec<usize> = self
            .rows
            .iter()
            .enumerate()
            .filter(|(_, row)| {
                key_ordinals
                    .iter()
                    .zip(key_values.iter())
                    .all(|(&ordinal, &value)| row[ordinal] == value)
            })
            .map(|(index, _)| index)
            .collect();
        match matches.len() {
            1 => {
                self.rows.remove(matches[0]);
                Ok(())
            }
            0 => Err(NormalizerError::row_lookup(format!(
                "key {:?} matches no row in relation '{}'",
                key_values, self.name
            ))),
            n => Err(NormalizerError::row_lookup(format!(
                "key {:?} does not uniquely describe a row in relation '{}' ({} matches)",
                key_values, self.name, n
            ))),
        }
    }

    // --- declarations ----------------------------------------------------

    /// Set the primary key from attribute names
    ///
    /// Every name is validated eagerly; on any failure the relation is left
    /// unchanged.
    pub fn set_primary_key(&mut self, attributes: &[&str]) -> NormalizerResult<()> {
        let mut key = AttrSet::new();
        for name in attributes {
            key.insert(self.resolve(name)?);
        }
        self.primary_key = key;
        Ok(())
    }

    /// Set the primary key from ordinals (decomposition-internal path)
    pub(crate) fn set_primary_key_ordinals(&mut self, key: AttrSet) -> NormalizerResult<()> {
        for &ordinal in &key {
            if ordinal >= self.attributes.len() {
                return Err(NormalizerError::invalid_attribute(
                    format!("ordinal {}", ordinal),
                    &self.name,
                ));
            }
        }
        self.primary_key = key;
        Ok(())
    }

    /// Declare a functional dependency from attribute names
    ///
    /// The determinant must be non-empty; every name must exist. Exact
    /// duplicates of an already-declared dependency are ignored.
    pub fn declare_fd(&mut self, determinant: &[&str], dependant: &[&str]) -> NormalizerResult<()> {
        if determinant.is_empty() {
            return Err(NormalizerError::malformed(
                "functional dependency determinant must be non-empty",
            ));
        }
        let mut det = AttrSet::new();
        for name in determinant {
            det.insert(self.resolve(name)?);
        }
        let mut dep = AttrSet::new();
        for name in dependant {
            dep.insert(self.resolve(name)?);
        }
        self.push_fd(FunctionalDependency::new(det, dep));
        Ok(())
    }

    pub(crate) fn push_fd(&mut self, fd: FunctionalDependency) {
        if !self.functional_dependencies.contains(&fd) {
            self.functional_dependencies.push(fd);
        }
    }

    /// Declare a restricted multivalued dependency X ->> {Y, Z}
    ///
    /// The three attributes must be distinct; the dependant pair is stored
    /// unordered.
    pub fn declare_mvd(
        &mut self,
        determinant: &str,
        dependant_a: &str,
        dependant_b: &str,
    ) -> NormalizerResult<()> {
        let det = self.resolve(determinant)?;
        let a = self.resolve(dependant_a)?;
        let b = self.resolve(dependant_b)?;
        if det == a || det == b || a == b {
            return Err(NormalizerError::malformed(format!(
                "multivalued dependency attributes must be distinct: {} ->> {{{}, {}}}",
                determinant, dependant_a, dependant_b
            )));
        }
        self.push_mvd(MultivaluedDependency::new(det, a, b));
        Ok(())
    }

    pub(crate) fn push_mvd(&mut self, mvd: MultivaluedDependency) {
        if !self.multivalued_dependencies.contains(&mvd) {
            self.multivalued_dependencies.push(mvd);
        }
    }
}
