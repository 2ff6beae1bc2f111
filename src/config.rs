/// Configuration for the normal-form engine
use serde::{Deserialize, Serialize};

/// Engine configuration
///
/// Superkey enumeration is exponential in relation arity; the ceiling keeps
/// a mistyped wide schema from hanging the engine. Classroom-scale schemas
/// sit far below the default.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct NormalizerConfig {
    /// Maximum relation arity accepted before superkey enumeration
    pub max_enumeration_arity: usize,

    /// Delimiter separating the values of a multivalued cell (1NF input)
    pub multivalue_delimiter: char,

    /// Maximum rows rendered per relation by the presentation helpers
    pub max_display_rows: usize,
}

impl Default for NormalizerConfig {
    fn default() -> Self {
        Self {
            max_enumeration_arity: 16,
            multivalue_delimiter: ' ',
            max_display_rows: 50,
        }
    }
}
