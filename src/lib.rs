//! # Normal Form Engine
//!
//! A relational-theory engine that decomposes a single relation into a set
//! of smaller relations satisfying a target normal form (1NF-5NF), given a
//! declared primary key, functional dependencies, and optionally
//! multivalued dependencies.
//!
//! ## Quick Start
//!
//! ```rust
//! use normal_form_engine::{NormalForm, NormalFormEngine, Relation};
//!
//! // Build a relation and declare its key and dependencies
//! let mut relation = Relation::new(
//!     "works_on",
//!     vec!["ssn".to_string(), "pnumber".to_string(), "hours".to_string()],
//! ).unwrap();
//! relation.set_primary_key(&["ssn", "pnumber"]).unwrap();
//! relation.declare_fd(&["ssn", "pnumber"], &["hours"]).unwrap();
//!
//! // Normalize to BCNF
//! let engine = NormalFormEngine::new();
//! let result = engine.normalize(&relation, NormalForm::BoyceCodd).unwrap();
//!
//! println!("decomposed into {} relation(s)", result.len());
//! ```
//!
//! ## Features
//!
//! - **Dependency reasoning**: attribute closures, superkey/candidate-key
//!   enumeration, prime attributes
//! - **Violation extraction**: partial, transitive, and non-superkey
//!   dependencies
//! - **Decomposition**: 2NF/3NF synthesis, BCNF/4NF work-list splitting,
//!   lossless by construction
//! - **Delimited-text ingestion** and plain-text rendering at the edges

// Internal modules
pub mod analysis;
pub mod config;
pub mod decompose;
pub mod engine;
pub mod error;
pub mod ingestion;
pub mod relation;
pub mod render;

// Public API - Main types users need
pub use config::NormalizerConfig;
pub use decompose::NormalForm;
pub use engine::NormalFormEngine;
pub use relation::{FunctionalDependency, MultivaluedDependency, Relation};

// Re-export commonly used error types
pub use error::{NormalizerError, NormalizerResult};
