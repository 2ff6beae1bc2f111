//! Table construction: projecting a source relation onto an attribute subset
//!
//! This is the one place where ordinals cross relation boundaries, so every
//! carried ordinal is translated old ordinal -> name -> new ordinal. A carry
//! set computed correctly by the caller always survives the translation; a
//! miss means the carry set referenced an attribute outside the target and
//! fails loudly instead of silently renumbering.

use crate::analysis::keys::candidate_keys;
use crate::error::{NormalizerError, NormalizerResult};
use crate::relation::{
    AttrOrdinal, AttrSet, FunctionalDependency, MultivaluedDependency, Relation,
};

/// Find the dependencies of `source` that survive a projection onto
/// `target`: every FD whose determinant lies fully within the target
/// (dependant trimmed to the overlap, dropped entirely if the trimmed
/// dependant becomes empty) and every MVD whose determinant and dependant
/// pair lie within the target. FDs are merged by determinant.
///
/// Returned dependencies are still in the source's ordinal space; `build`
/// remaps them into the new relation's space.
pub fn carry_dependencies(
    source: &Relation,
    target: &AttrSet,
) -> (Vec<FunctionalDependency>, Vec<MultivaluedDependency>) {
    let mut fds: Vec<FunctionalDependency> = Vec::new();
    for fd in source.functional_dependencies() {
        if !fd.determinant.is_subset(target) {
            continue;
        }
        let trimmed: AttrSet = fd.dependant.intersection(target).copied().collect();
        if trimmed.is_empty() {
            continue;
        }
        if let Some(existing) = fds.iter_mut().find(|f| f.determinant == fd.determinant) {
            existing.dependant.extend(trimmed);
        } else {
            fds.push(FunctionalDependency::new(fd.determinant.clone(), trimmed));
        }
    }

    let mvds: Vec<MultivaluedDependency> = source
        .multivalued_dependencies()
        .iter()
        .filter(|mvd| mvd.is_contained_in(target))
        .cloned()
        .collect();

    (fds, mvds)
}

/// Build a new relation by projecting `source` onto `target_ordinals`
///
/// Steps:
/// 1. Target ordinals (ascending) map to attribute names, forming the new
///    relation's attribute list.
/// 2. Carried FD/MVD ordinals are re-expressed against the new ordering via
///    names; a lost attribute is a malformed carry set.
/// 3. An empty `explicit_primary_key` triggers key discovery on the
///    partially built relation; no discoverable key is `NoKeyFound`.
/// 4. Source rows are projected in order and inserted with duplicate
///    elimination (relational set semantics).
pub fn build(
    source: &Relation,
    name: impl Into<String>,
    target_ordinals: &AttrSet,
    explicit_primary_key: &AttrSet,
    fds_to_carry: &[FunctionalDependency],
    mvds_to_carry: &[MultivaluedDependency],
) -> NormalizerResult<Relation> {
    let name = name.into();
    let attributes: Vec<String> = target_ordinals
        .iter()
        .map(|&ordinal| {
            source
                .name_of(ordinal)
                .map(str::to_string)
                .ok_or_else(|| {
                    NormalizerError::invalid_attribute(format!("ordinal {}", ordinal), source.name())
                })
        })
        .collect::<NormalizerResult<_>>()?;

    let remap = |old: AttrOrdinal| -> NormalizerResult<AttrOrdinal> {
        let attr_name = source.name_of(old).ok_or_else(|| {
            NormalizerError::invalid_attribute(format!("ordinal {}", old), source.name())
        })?;
        attributes
            .iter()
            .position(|candidate| candidate == attr_name)
            .ok_or_else(|| {
                NormalizerError::malformed(format!(
                    "attribute '{}' lost while projecting '{}' into '{}'",
                    attr_name,
                    source.name(),
                    name
                ))
            })
    };
    let remap_set = |set: &AttrSet| -> NormalizerResult<AttrSet> {
        set.iter().map(|&ordinal| remap(ordinal)).collect()
    };

    let functional_dependencies = fds_to_carry
        .iter()
        .map(|fd| {
            Ok(FunctionalDependency::new(
                remap_set(&fd.determinant)?,
                remap_set(&fd.dependant)?,
            ))
        })
        .collect::<NormalizerResult<Vec<_>>>()?;
    let multivalued_dependencies = mvds_to_carry
        .iter()
        .map(|mvd| {
            Ok(MultivaluedDependency::new(
                remap(mvd.determinant)?,
                remap(mvd.dependants.0)?,
                remap(mvd.dependants.1)?,
            ))
        })
        .collect::<NormalizerResult<Vec<_>>>()?;
    let explicit_key = if explicit_primary_key.is_empty() {
        None
    } else {
        Some(remap_set(explicit_primary_key)?)
    };

    let mut relation = Relation::from_parts(
        name,
        attributes,
        AttrSet::new(),
        functional_dependencies,
        multivalued_dependencies,
    );

    let primary_key = match explicit_key {
        Some(key) => key,
        None => candidate_keys(&relation)
            .into_iter()
            .next()
            .ok_or_else(|| {
                NormalizerError::no_key_found(relation.name())
                    .with_context("dependency set cannot guarantee uniqueness")
            })?,
    };
    relation.set_primary_key_ordinals(primary_key)?;

    let projection: Vec<AttrOrdinal> = target_ordinals.iter().copied().collect();
    for row in source.rows() {
        let projected: Vec<String> = projection
            .iter()
            .map(|&ordinal| row[ordinal].clone())
            .collect();
        relation.add_row_deduplicated(projected);
    }

    Ok(relation)
}
