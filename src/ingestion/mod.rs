//! Ingestion - parsing delimited text into column names and row tuples

pub mod csv_loader;

pub use csv_loader::{load_delimited_file, parse_delimited, ParsedTable};
