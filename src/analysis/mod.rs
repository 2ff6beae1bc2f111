//! Dependency reasoning: closures, keys, and violation extraction

pub mod closure;
pub mod keys;
pub mod violations;

pub use closure::{attribute_closure, is_superkey};
pub use keys::{candidate_keys, prime_attributes, superkeys};
pub use violations::{
    dependants_of, determinants_of, non_superkey_dependencies, partial_dependencies,
    transitive_dependencies,
};
