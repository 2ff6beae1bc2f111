//! Delimited-text loader
//!
//! Yields an ordered list of unique column names and a list of row tuples
//! whose arity matches it. Every field is whitespace-trimmed; a row whose
//! arity disagrees with the header is rejected here, before any data
//! reaches the core.

use crate::error::{NormalizerError, NormalizerResult};
use crate::relation::Relation;
use csv::ReaderBuilder;
use std::fs::File;
use std::io::Read;
use std::path::Path;

/// Parsed delimited input: header plus rows
#[derive(Clone, Debug)]
pub struct ParsedTable {
    pub columns: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl ParsedTable {
    /// Build a relation named `name` from the parsed data
    pub fn into_relation(self, name: impl Into<String>) -> NormalizerResult<Relation> {
        let mut relation = Relation::new(name, self.columns)?;
        relation.add_rows(self.rows)?;
        Ok(relation)
    }
}

/// Load a comma-delimited file with a header line
pub fn load_delimited_file(path: impl AsRef<Path>) -> NormalizerResult<ParsedTable> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|err| {
        NormalizerError::io_with_path(err.to_string(), path.display().to_string())
    })?;
    parse_delimited(file)
}

/// Parse comma-delimited text from any reader
///
/// The first record is the header; reading is flexible so that arity
/// violations surface as `ShapeMismatch` (with the offending line) rather
/// than an opaque parser error.
pub fn parse_delimited(input: impl Read) -> NormalizerResult<ParsedTable> {
    let mut reader = ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All)
        .flexible(true)
        .from_reader(input);

    let columns: Vec<String> = reader
        .headers()?
        .iter()
        .map(|field| field.to_string())
        .collect();

    let mut rows = Vec::new();
    for (line, record) in reader.records().enumerate() {
        let record = record?;
        if record.len() != columns.len() {
            return Err(NormalizerError::shape_mismatch(columns.len(), record.len())
                .with_context(format!("data line {}", line + 1)));
        }
        rows.push(record.iter().map(|field| field.to_string()).collect());
    }

    Ok(ParsedTable { columns, rows })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_header_and_rows() {
        let input = "id,name,dept\n1, Alice ,Sales\n2,Bob,Ops\n";
        let parsed = parse_delimited(input.as_bytes()).unwrap();
        assert_eq!(parsed.columns, vec!["id", "name", "dept"]);
        assert_eq!(parsed.rows.len(), 2);
        // fields are trimmed
        assert_eq!(parsed.rows[0][1], "Alice");
    }

    #[test]
    fn test_arity_mismatch_rejected() {
        let input = "id,name\n1,Alice,extra\n";
        let err = parse_delimited(input.as_bytes());
        assert!(matches!(err, Err(NormalizerError::ShapeMismatch { .. })));
    }

    #[test]
    fn test_into_relation() {
        let input = "a,b\n1,x\n2,y\n";
        let relation = parse_delimited(input.as_bytes())
            .unwrap()
            .into_relation("sample")
            .unwrap();
        assert_eq!(relation.attribute_names(), &["a", "b"]);
        assert_eq!(relation.row_count(), 2);
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let err = load_delimited_file("/definitely/not/here.csv");
        assert!(matches!(err, Err(NormalizerError::Io { .. })));
    }
}
