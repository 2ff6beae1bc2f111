/// Presentation helpers: text rendering of relations and dependency lists
use crate::error::NormalizerResult;
use crate::relation::Relation;
use serde::{Deserialize, Serialize};

/// Serializable summary of a relation for presentation clients
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct RelationSummary {
    /// Relation name
    pub name: String,
    /// Attribute names, in ordinal order
    pub attributes: Vec<String>,
    /// Primary-key attribute names
    pub primary_key: Vec<String>,
    /// Total row count
    pub row_count: usize,
    /// Functional dependencies as (determinant, dependant) name lists
    pub functional_dependencies: Vec<(Vec<String>, Vec<String>)>,
    /// Multivalued dependencies as (determinant, dependant pair)
    pub multivalued_dependencies: Vec<(String, (String, String))>,
}

/// Build a summary of a relation
pub fn summarize(relation: &Relation) -> RelationSummary {
    RelationSummary {
        name: relation.name().to_string(),
        attributes: relation.attribute_names().to_vec(),
        primary_key: relation
            .primary_key_names()
            .iter()
            .map(|s| s.to_string())
            .collect(),
        row_count: relation.row_count(),
        functional_dependencies: relation
            .functional_dependency_names()
            .into_iter()
            .map(|(det, dep)| {
                (
                    det.iter().map(|s| s.to_string()).collect(),
                    dep.iter().map(|s| s.to_string()).collect(),
                )
            })
            .collect(),
        multivalued_dependencies: relation
            .multivalued_dependency_names()
            .into_iter()
            .map(|(det, (a, b))| (det.to_string(), (a.to_string(), b.to_string())))
            .collect(),
    }
}

/// Summary as a JSON string
pub fn summary_json(relation: &Relation) -> NormalizerResult<String> {
    serde_json::to_string_pretty(&summarize(relation))
        .map_err(|err| crate::error::NormalizerError::io(err.to_string()))
}

/// Render a relation as an aligned text table, showing at most `max_rows`
pub fn render_relation(relation: &Relation, max_rows: usize) -> String {
    let headers = relation.attribute_names();
    let mut widths: Vec<usize> = headers.iter().map(|h| h.len()).collect();
    for row in relation.rows().iter().take(max_rows) {
        for (index, value) in row.iter().enumerate() {
            if value.len() > widths[index] {
                widths[index] = value.len();
            }
        }
    }

    let mut out = String::new();
    out.push_str(&format!("Relation: {}\n", relation.name()));

    let header_line: Vec<String> = headers
        .iter()
        .zip(widths.iter())
        .map(|(header, &width)| format!("{:<width$}", header, width = width))
        .collect();
    out.push_str(&header_line.join(" | "));
    out.push('\n');

    let total_width: usize = widths.iter().sum::<usize>() + 3 * widths.len().saturating_sub(1);
    out.push_str(&"-".repeat(total_width));
    out.push('\n');

    for row in relation.rows().iter().take(max_rows) {
        let line: Vec<String> = row
            .iter()
            .zip(widths.iter())
            .map(|(value, &width)| format!("{:<width$}", value, width = width))
            .collect();
        out.push_str(&line.join(" | "));
        out.push('\n');
    }
    if relation.row_count() > max_rows {
        out.push_str(&format!(
            "... (showing first {} of {} rows)\n",
            max_rows,
            relation.row_count()
        ));
    }
    out
}

/// Render the primary key as `{A, B}`
pub fn render_primary_key(relation: &Relation) -> String {
    format!("Primary key: {{{}}}", relation.primary_key_names().join(", "))
}

/// Render the FD and MVD lists, one per line
///
/// FDs print as `{A, B} -> {C}`, MVDs as `A ->> {B, C}`.
pub fn render_dependencies(relation: &Relation) -> String {
    let mut lines = Vec::new();
    for (determinant, dependant) in relation.functional_dependency_names() {
        lines.push(format!(
            "{{{}}} -> {{{}}}",
            determinant.join(", "),
            dependant.join(", ")
        ));
    }
    for (determinant, (a, b)) in relation.multivalued_dependency_names() {
        lines.push(format!("{} ->> {{{}, {}}}", determinant, a, b));
    }
    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Relation {
        let mut rel = Relation::new(
            "staff",
            vec!["id".to_string(), "name".to_string()],
        )
        .unwrap();
        rel.set_primary_key(&["id"]).unwrap();
        rel.declare_fd(&["id"], &["name"]).unwrap();
        rel.add_rows(vec![
            vec!["1".to_string(), "Alice".to_string()],
            vec!["2".to_string(), "Bob".to_string()],
        ])
        .unwrap();
        rel
    }

    #[test]
    fn test_render_relation_aligns_columns() {
        let rendered = render_relation(&sample(), 50);
        assert!(rendered.contains("Relation: staff"));
        assert!(rendered.contains("id | name"));
        assert!(rendered.contains("1  | Alice"));
    }

    #[test]
    fn test_render_relation_caps_rows() {
        let rendered = render_relation(&sample(), 1);
        assert!(rendered.contains("showing first 1 of 2 rows"));
    }

    #[test]
    fn test_render_dependencies() {
        let rendered = render_dependencies(&sample());
        assert_eq!(rendered, "{id} -> {name}");
    }

    #[test]
    fn test_summary_round_trips_to_json() {
        let json = summary_json(&sample()).unwrap();
        assert!(json.contains("\"name\": \"staff\""));
        let parsed: RelationSummary = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed.row_count, 2);
        assert_eq!(parsed.primary_key, vec!["id"]);
    }
}
