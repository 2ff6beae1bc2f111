//! Normal-form transitions
//!
//! Each transition consumes one relation and produces the list of relations
//! replacing it. The engine drives the ladder form by form, applying a
//! transition to every relation in the current list and concatenating the
//! results. Transitions never mutate their input: every output is a freshly
//! constructed `Relation`.

use crate::analysis::closure::is_superkey;
use crate::analysis::keys::prime_attributes;
use crate::analysis::violations::{
    dependants_of, non_superkey_dependencies, partial_dependencies, transitive_dependencies,
};
use crate::decompose::project::{build, carry_dependencies};
use crate::error::NormalizerResult;
use crate::relation::{attr_set, AttrSet, FunctionalDependency, Relation};
use tracing::debug;

/// True if no cell of any row contains the multivalue delimiter
pub fn is_first_normal_form(relation: &Relation, delimiter: char) -> bool {
    relation
        .rows()
        .iter()
        .all(|row| row.iter().all(|value| !value.contains(delimiter)))
}

/// 1NF: flatten multivalued cells
///
/// A row containing delimiter-separated values in a cell is replaced by one
/// row per value, holding all other cells fixed; a row with several
/// multivalued cells is expanded one cell at a time. The schema, key, and
/// dependency sets pass through unchanged, so this always returns exactly
/// one relation.
pub fn first_normal_form(relation: &Relation, delimiter: char) -> NormalizerResult<Vec<Relation>> {
    let mut flattened = Relation::from_parts(
        relation.name().to_string(),
        relation.attribute_names().to_vec(),
        relation.primary_key().clone(),
        relation.functional_dependencies().to_vec(),
        relation.multivalued_dependencies().to_vec(),
    );

    for row in relation.rows() {
        expand_row(row.clone(), delimiter, &mut flattened)?;
    }

    debug!(
        relation = relation.name(),
        rows_in = relation.row_count(),
        rows_out = flattened.row_count(),
        "flattened to 1NF"
    );
    Ok(vec![flattened])
}

fn expand_row(row: Vec<String>, delimiter: char, out: &mut Relation) -> NormalizerResult<()> {
    let multivalued = row
        .iter()
        .position(|value| value.contains(delimiter));
    match multivalued {
        None => out.add_row(row),
        Some(cell) => {
            for token in row[cell].split(delimiter).filter(|t| !t.is_empty()) {
                let mut expanded = row.clone();
                expanded[cell] = token.to_string();
                expand_row(expanded, delimiter, out)?;
            }
            Ok(())
        }
    }
}

/// 2NF: eliminate partial dependencies
///
/// Every collected partial dependency becomes its own relation keyed by its
/// determinant. If the primary key is not itself one of the collected
/// determinants, a `(primary_key, unclaimed non-prime attributes)` entry is
/// synthesized so the key table survives and the decomposition stays
/// lossless.
pub fn second_normal_form(relation: &Relation) -> NormalizerResult<Vec<Relation>> {
    let mut dependencies = partial_dependencies(relation);
    if !dependencies
        .iter()
        .any(|fd| fd.determinant == *relation.primary_key())
    {
        let claimed: AttrSet = dependencies
            .iter()
            .flat_map(|fd| fd.dependant.iter().copied())
            .collect();
        let primes: AttrSet = prime_attributes(relation);
        let remainder: AttrSet = relation
            .all_ordinals()
            .iter()
            .filter(|&&attr| !primes.contains(&attr) && !claimed.contains(&attr))
            .copied()
            .collect();
        dependencies.push(FunctionalDependency::new(
            relation.primary_key().clone(),
            remainder,
        ));
    }
    synthesize(relation, dependencies)
}

/// 3NF: eliminate transitive dependencies
///
/// Every collected transitive dependency becomes its own relation; a
/// `(primary_key, dependants of the key minus those already claimed)` entry
/// is always appended. The key's dependants come from the exact-match
/// lookup, so only an FD declared verbatim on the primary key contributes.
pub fn third_normal_form(relation: &Relation) -> NormalizerResult<Vec<Relation>> {
    let mut dependencies = transitive_dependencies(relation);
    let claimed: AttrSet = dependencies
        .iter()
        .flat_map(|fd| fd.dependant.iter().copied())
        .collect();
    let key_dependants: AttrSet = dependants_of(relation, relation.primary_key())
        .difference(&claimed)
        .copied()
        .collect();
    dependencies.push(FunctionalDependency::new(
        relation.primary_key().clone(),
        key_dependants,
    ));
    synthesize(relation, dependencies)
}

/// Construct one relation per synthesized dependency, keyed by its
/// determinant
///
/// Each table carries every declared dependency that survives the
/// projection, so later rungs of the ladder (3NF after 2NF, BCNF after
/// 3NF) can still see the dependencies they need. The synthesized
/// dependency itself is added when no declared FD already covers its
/// determinant.
fn synthesize(
    relation: &Relation,
    dependencies: Vec<FunctionalDependency>,
) -> NormalizerResult<Vec<Relation>> {
    let mut output = Vec::with_capacity(dependencies.len());
    for dependency in &dependencies {
        let target: AttrSet = dependency
            .determinant
            .union(&dependency.dependant)
            .copied()
            .collect();
        let (mut carried_fds, carried_mvds) = carry_dependencies(relation, &target);
        if !dependency.dependant.is_empty()
            && !carried_fds
                .iter()
                .any(|fd| fd.determinant == dependency.determinant)
        {
            carried_fds.push(dependency.clone());
        }
        let name = child_name(relation, &dependency.determinant);
        output.push(build(
            relation,
            name,
            &target,
            &dependency.determinant,
            &carried_fds,
            &carried_mvds,
        )?);
    }
    debug!(
        relation = relation.name(),
        tables = output.len(),
        "dependency-driven synthesis"
    );
    Ok(output)
}

fn child_name(relation: &Relation, determinant: &AttrSet) -> String {
    let key_part: Vec<&str> = determinant
        .iter()
        .filter_map(|&attr| relation.name_of(attr))
        .collect();
    format!("{}_{}", relation.name(), key_part.join("_"))
}

/// BCNF: split on non-superkey dependencies until none remain
///
/// The recursion is run as an explicit work list of pending relations; each
/// split strictly reduces attribute count, so the loop terminates. The first
/// violating FD in declaration order is the tie-break that fixes the exact
/// decomposition shape. Output order matches a depth-first recursion
/// (violator table before the remainder's expansion).
pub fn boyce_codd_normal_form(relation: &Relation) -> NormalizerResult<Vec<Relation>> {
    let mut pending: Vec<Relation> = vec![relation.clone()];
    let mut output: Vec<Relation> = Vec::new();

    while let Some(current) = pending.pop() {
        let violation = non_superkey_dependencies(&current).first().map(|fd| {
            FunctionalDependency::new(fd.determinant.clone(), fd.dependant.clone())
        });
        let Some(fd) = violation else {
            output.push(current);
            continue;
        };

        // Y may overlap X; only the genuinely determined attributes move out
        let moved: AttrSet = fd.dependant.difference(&fd.determinant).copied().collect();
        let split_attrs: AttrSet = fd.determinant.union(&moved).copied().collect();
        let rest_attrs: AttrSet = current
            .all_ordinals()
            .difference(&moved)
            .copied()
            .collect();

        let determinant_names: Vec<&str> = fd
            .determinant
            .iter()
            .filter_map(|&attr| current.name_of(attr))
            .collect();
        debug!(
            relation = current.name(),
            determinant = ?determinant_names,
            "splitting on non-superkey dependency"
        );

        let (split_fds, split_mvds) = carry_dependencies(&current, &split_attrs);
        let split = build(
            &current,
            format!("{}_1", current.name()),
            &split_attrs,
            &fd.determinant,
            &split_fds,
            &split_mvds,
        )?;

        let (rest_fds, rest_mvds) = carry_dependencies(&current, &rest_attrs);
        let rest = build(
            &current,
            format!("{}_2", current.name()),
            &rest_attrs,
            &AttrSet::new(),
            &rest_fds,
            &rest_mvds,
        )?;

        // LIFO: the violator table is expanded (and emitted) first
        pending.push(rest);
        pending.push(split);
    }

    Ok(output)
}

/// 4NF: split on multivalued dependencies until none remain
///
/// Mirrors the BCNF loop. Terminal cases: no MVDs are carried, or the sole
/// remaining MVD's determinant is on its own a superkey. Otherwise the first
/// MVD X ->> {Y, Z} splits the relation into {X, Y} (keyed by the whole
/// pair) and R - {Y}; both sides of the split preserve the nonadditive-join
/// property by the classical 4NF decomposition theorem.
pub fn fourth_normal_form(relation: &Relation) -> NormalizerResult<Vec<Relation>> {
    let mut pending: Vec<Relation> = vec![relation.clone()];
    let mut output: Vec<Relation> = Vec::new();

    while let Some(current) = pending.pop() {
        let mvds = current.multivalued_dependencies();
        if mvds.is_empty() {
            output.push(current);
            continue;
        }
        if mvds.len() == 1 && is_superkey(&current, &attr_set(&[mvds[0].determinant])) {
            output.push(current);
            continue;
        }

        let mvd = mvds[0].clone();
        let (moved, _kept) = mvd.dependants;
        let split_attrs = attr_set(&[mvd.determinant, moved]);
        let rest_attrs: AttrSet = current
            .all_ordinals()
            .iter()
            .filter(|&&attr| attr != moved)
            .copied()
            .collect();

        debug!(relation = current.name(), "splitting on multivalued dependency");

        let (split_fds, split_mvds) = carry_dependencies(&current, &split_attrs);
        let split = build(
            &current,
            format!("{}_1", current.name()),
            &split_attrs,
            &split_attrs,
            &split_fds,
            &split_mvds,
        )?;

        let (rest_fds, rest_mvds) = carry_dependencies(&current, &rest_attrs);
        let rest = build(
            &current,
            format!("{}_2", current.name()),
            &rest_attrs,
            &AttrSet::new(),
            &rest_fds,
            &rest_mvds,
        )?;

        pending.push(rest);
        pending.push(split);
    }

    Ok(output)
}

/// 5NF: identity transform
///
/// Join-dependency decomposition is not implemented; a relation reaching
/// this rung passes through unchanged.
pub fn fifth_normal_form(relation: &Relation) -> NormalizerResult<Vec<Relation>> {
    Ok(vec![relation.clone()])
}
