//! Integration tests for the normalization pipeline
//!
//! Run with: `cargo test --test normalization_test`

use normal_form_engine::analysis::{
    attribute_closure, candidate_keys, is_superkey, non_superkey_dependencies,
};
use normal_form_engine::decompose::{
    boyce_codd_normal_form, first_normal_form, fourth_normal_form, is_first_normal_form,
};
use normal_form_engine::{NormalForm, NormalFormEngine, Relation};
use std::collections::BTreeSet;

fn attrs(names: &[&str]) -> Vec<String> {
    names.iter().map(|s| s.to_string()).collect()
}

fn row(values: &[&str]) -> Vec<String> {
    values.iter().map(|s| s.to_string()).collect()
}

/// The classic works-on schema with data obeying its dependencies
fn works_on() -> Relation {
    let mut rel = Relation::new(
        "works_on",
        attrs(&["ssn", "pnumber", "hours", "ename", "pname", "plocation"]),
    )
    .unwrap();
    rel.set_primary_key(&["ssn", "pnumber"]).unwrap();
    rel.declare_fd(&["ssn", "pnumber"], &["hours"]).unwrap();
    rel.declare_fd(&["ssn"], &["ename"]).unwrap();
    rel.declare_fd(&["pnumber"], &["pname", "plocation"])
        .unwrap();
    rel.add_rows(vec![
        row(&["s1", "p1", "10", "Alice", "Alpha", "York"]),
        row(&["s1", "p2", "20", "Alice", "Beta", "Kent"]),
        row(&["s2", "p1", "30", "Bob", "Alpha", "York"]),
    ])
    .unwrap();
    rel
}

/// Natural join of two (columns, rows) tables on their shared columns
fn natural_join(
    left: (Vec<String>, Vec<Vec<String>>),
    right: (Vec<String>, Vec<Vec<String>>),
) -> (Vec<String>, Vec<Vec<String>>) {
    let (left_cols, left_rows) = left;
    let (right_cols, right_rows) = right;
    let shared: Vec<(usize, usize)> = left_cols
        .iter()
        .enumerate()
        .filter_map(|(li, name)| {
            right_cols
                .iter()
                .position(|r| r == name)
                .map(|ri| (li, ri))
        })
        .collect();
    let right_only: Vec<usize> = (0..right_cols.len())
        .filter(|ri| !shared.iter().any(|(_, s)| s == ri))
        .collect();

    let mut out_cols = left_cols.clone();
    for &ri in &right_only {
        out_cols.push(right_cols[ri].clone());
    }

    let mut out_rows: Vec<Vec<String>> = Vec::new();
    for lrow in &left_rows {
        for rrow in &right_rows {
            if shared.iter().all(|&(li, ri)| lrow[li] == rrow[ri]) {
                let mut merged = lrow.clone();
                for &ri in &right_only {
                    merged.push(rrow[ri].clone());
                }
                if !out_rows.contains(&merged) {
                    out_rows.push(merged);
                }
            }
        }
    }
    (out_cols, out_rows)
}

/// Join a decomposition back together and compare against the source rows
fn assert_lossless(source: &Relation, decomposition: &[Relation]) {
    let mut joined = (
        decomposition[0].attribute_names().to_vec(),
        decomposition[0].rows().to_vec(),
    );
    for relation in &decomposition[1..] {
        joined = natural_join(
            joined,
            (relation.attribute_names().to_vec(), relation.rows().to_vec()),
        );
    }

    let (joined_cols, joined_rows) = joined;
    assert_eq!(
        joined_cols.iter().collect::<BTreeSet<_>>(),
        source.attribute_names().iter().collect::<BTreeSet<_>>(),
        "join must recover every source attribute"
    );

    // compare row sets in the source's column order
    let order: Vec<usize> = source
        .attribute_names()
        .iter()
        .map(|name| joined_cols.iter().position(|c| c == name).unwrap())
        .collect();
    let reconstructed: BTreeSet<Vec<String>> = joined_rows
        .iter()
        .map(|r| order.iter().map(|&i| r[i].clone()).collect())
        .collect();
    let original: BTreeSet<Vec<String>> = source.rows().iter().cloned().collect();
    assert_eq!(reconstructed, original, "natural join must be lossless");
}

fn attribute_name_sets(relations: &[Relation]) -> BTreeSet<Vec<String>> {
    relations
        .iter()
        .map(|r| r.attribute_names().to_vec())
        .collect()
}

#[test]
fn test_superkey_agrees_with_closure() {
    let rel = works_on();
    let key: BTreeSet<usize> = [0usize, 1].into_iter().collect();
    assert!(is_superkey(&rel, &key));
    assert_eq!(attribute_closure(&rel, &key), rel.all_ordinals());
}

#[test]
fn test_candidate_keys_on_two_independent_determinants() {
    let mut rel = Relation::new("r", attrs(&["a", "b", "c"])).unwrap();
    rel.declare_fd(&["a"], &["b", "c"]).unwrap();
    rel.declare_fd(&["b"], &["a", "c"]).unwrap();
    let keys = candidate_keys(&rel);
    let expected: BTreeSet<BTreeSet<usize>> = [
        [0usize].into_iter().collect(),
        [1usize].into_iter().collect(),
    ]
    .into_iter()
    .collect();
    assert_eq!(keys.into_iter().collect::<BTreeSet<_>>(), expected);
}

#[test]
fn test_1nf_splits_multivalued_cell() {
    let mut rel = Relation::new("r", attrs(&["a", "b", "c"])).unwrap();
    rel.add_row(row(&["x", "a b", "y"])).unwrap();
    let result = first_normal_form(&rel, ' ').unwrap();
    assert_eq!(result.len(), 1);
    assert_eq!(
        result[0].rows(),
        &[row(&["x", "a", "y"]), row(&["x", "b", "y"])]
    );
}

#[test]
fn test_1nf_expands_multiple_cells_in_one_row() {
    let mut rel = Relation::new("r", attrs(&["a", "b"])).unwrap();
    rel.add_row(row(&["p q", "r s"])).unwrap();
    let result = first_normal_form(&rel, ' ').unwrap();
    assert_eq!(result[0].row_count(), 4);
    assert!(result[0].rows().contains(&row(&["p", "r"])));
    assert!(result[0].rows().contains(&row(&["q", "s"])));
}

#[test]
fn test_1nf_idempotent() {
    let rel = works_on();
    assert!(is_first_normal_form(&rel, ' '));
    let result = first_normal_form(&rel, ' ').unwrap();
    assert_eq!(result.len(), 1);
    assert_eq!(result[0].attribute_names(), rel.attribute_names());
    assert_eq!(result[0].rows(), rel.rows());
    assert_eq!(result[0].primary_key(), rel.primary_key());
}

#[test]
fn test_bcnf_leaves_clean_relation_unchanged() {
    let mut rel = Relation::new("r", attrs(&["a", "b", "c"])).unwrap();
    rel.set_primary_key(&["a"]).unwrap();
    rel.declare_fd(&["a"], &["b"]).unwrap();
    rel.declare_fd(&["a"], &["c"]).unwrap();
    let result = boyce_codd_normal_form(&rel).unwrap();
    assert_eq!(result.len(), 1);
    assert_eq!(result[0].attribute_names(), rel.attribute_names());
    assert_eq!(result[0].functional_dependencies().len(), 2);
}

#[test]
fn test_bcnf_works_on_yields_three_relations() {
    let rel = works_on();
    let result = boyce_codd_normal_form(&rel).unwrap();
    assert_eq!(result.len(), 3);

    let expected: BTreeSet<Vec<String>> = [
        attrs(&["ssn", "pnumber", "hours"]),
        attrs(&["ssn", "ename"]),
        attrs(&["pnumber", "pname", "plocation"]),
    ]
    .into_iter()
    .collect();
    assert_eq!(attribute_name_sets(&result), expected);
}

#[test]
fn test_bcnf_outputs_have_no_violations() {
    let rel = works_on();
    for decomposed in boyce_codd_normal_form(&rel).unwrap() {
        assert!(
            non_superkey_dependencies(&decomposed).is_empty(),
            "relation '{}' still has a BCNF violation",
            decomposed.name()
        );
    }
}

#[test]
fn test_bcnf_is_lossless() {
    let rel = works_on();
    let result = boyce_codd_normal_form(&rel).unwrap();
    assert_lossless(&rel, &result);
}

#[test]
fn test_2nf_works_on() {
    let engine = NormalFormEngine::new();
    let rel = works_on();
    let result = engine.normalize(&rel, NormalForm::Second).unwrap();

    let expected: BTreeSet<Vec<String>> = [
        attrs(&["ssn", "ename"]),
        attrs(&["pnumber", "pname", "plocation"]),
        attrs(&["ssn", "pnumber", "hours"]),
    ]
    .into_iter()
    .collect();
    assert_eq!(attribute_name_sets(&result), expected);
    assert_lossless(&rel, &result);
}

#[test]
fn test_3nf_splits_transitive_chain() {
    let mut rel = Relation::new("emp", attrs(&["eid", "dept", "dname"])).unwrap();
    rel.set_primary_key(&["eid"]).unwrap();
    rel.declare_fd(&["eid"], &["dept"]).unwrap();
    rel.declare_fd(&["dept"], &["dname"]).unwrap();
    rel.add_rows(vec![
        row(&["1", "d1", "Sales"]),
        row(&["2", "d1", "Sales"]),
        row(&["3", "d2", "Ops"]),
    ])
    .unwrap();

    let engine = NormalFormEngine::new();
    let result = engine.normalize(&rel, NormalForm::Third).unwrap();
    let expected: BTreeSet<Vec<String>> =
        [attrs(&["dept", "dname"]), attrs(&["eid", "dept"])]
            .into_iter()
            .collect();
    assert_eq!(attribute_name_sets(&result), expected);
    assert_lossless(&rel, &result);
}

#[test]
fn test_4nf_splits_independent_multivalued_facts() {
    let mut rel = Relation::new("teaches", attrs(&["course", "teacher", "book"])).unwrap();
    rel.set_primary_key(&["course", "teacher", "book"]).unwrap();
    rel.declare_mvd("course", "teacher", "book").unwrap();
    rel.add_rows(vec![
        row(&["db", "smith", "codd"]),
        row(&["db", "smith", "date"]),
        row(&["db", "jones", "codd"]),
        row(&["db", "jones", "date"]),
    ])
    .unwrap();

    let result = fourth_normal_form(&rel).unwrap();
    assert_eq!(result.len(), 2);
    let expected: BTreeSet<Vec<String>> =
        [attrs(&["course", "teacher"]), attrs(&["course", "book"])]
            .into_iter()
            .collect();
    assert_eq!(attribute_name_sets(&result), expected);
    assert_lossless(&rel, &result);
}

#[test]
fn test_4nf_superkey_determinant_is_terminal() {
    let mut rel = Relation::new("r", attrs(&["a", "b", "c"])).unwrap();
    rel.set_primary_key(&["a"]).unwrap();
    rel.declare_fd(&["a"], &["b", "c"]).unwrap();
    rel.declare_mvd("a", "b", "c").unwrap();
    let result = fourth_normal_form(&rel).unwrap();
    assert_eq!(result.len(), 1);
    assert_eq!(result[0].attribute_names(), rel.attribute_names());
}

#[test]
fn test_5nf_is_identity() {
    let engine = NormalFormEngine::new();
    let rel = works_on();
    let via_bcnf = engine.normalize(&rel, NormalForm::Fourth).unwrap();
    let via_fifth = engine.normalize(&rel, NormalForm::Fifth).unwrap();
    assert_eq!(
        attribute_name_sets(&via_bcnf),
        attribute_name_sets(&via_fifth)
    );
}

#[test]
fn test_full_ladder_preserves_data() {
    let engine = NormalFormEngine::new();
    let mut rel = works_on();
    // make one cell multivalued so 1NF has work to do
    rel.add_row(row(&["s3", "p3", "5 15", "Cara", "Gamma", "Hull"]))
        .unwrap();

    let result = engine.normalize(&rel, NormalForm::Fifth).unwrap();
    assert!(!result.is_empty());

    // the flattened source is what the ladder actually decomposes
    let flattened = first_normal_form(&rel, ' ').unwrap().remove(0);
    assert_lossless(&flattened, &result);
}
