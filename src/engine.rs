//! Engine facade: drives a relation up the normalization ladder
//!
//! The engine owns the configuration and applies one transition per form to
//! every relation in the current working set, concatenating the results,
//! until the target form is reached. Transitions never mutate their inputs,
//! so the working set can be rebuilt from scratch at every rung.

use crate::config::NormalizerConfig;
use crate::decompose::forms::NormalForm;
use crate::decompose::normalizer::{
    boyce_codd_normal_form, fifth_normal_form, first_normal_form, fourth_normal_form,
    second_normal_form, third_normal_form,
};
use crate::error::{NormalizerError, NormalizerResult};
use crate::relation::Relation;
use tracing::{debug, info};

/// Main normalization engine interface
pub struct NormalFormEngine {
    config: NormalizerConfig,
}

impl NormalFormEngine {
    /// Create an engine with the default configuration
    pub fn new() -> Self {
        Self {
            config: NormalizerConfig::default(),
        }
    }

    pub fn with_config(config: NormalizerConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &NormalizerConfig {
        &self.config
    }

    /// Normalize `relation` to the target form
    ///
    /// Applies every transition from 1NF up to and including `target`,
    /// feeding each form's output list into the next. A failing branch
    /// (`NoKeyFound`) aborts the whole call: an unrepresentable dependency
    /// set is a caller error, not something to paper over.
    pub fn normalize(
        &self,
        relation: &Relation,
        target: NormalForm,
    ) -> NormalizerResult<Vec<Relation>> {
        if relation.attribute_count() > self.config.max_enumeration_arity {
            return Err(NormalizerError::resource_limit(
                "relation arity exceeds enumeration ceiling",
                self.config.max_enumeration_arity,
                relation.attribute_count(),
            ));
        }
        if target != NormalForm::First && relation.primary_key().is_empty() {
            return Err(NormalizerError::no_key_found(relation.name())
                .with_context("a primary key must be declared before normalizing past 1NF"));
        }

        info!(
            relation = relation.name(),
            target = %target,
            "normalizing"
        );

        let mut working_set = vec![relation.clone()];
        for form in target.ladder_to() {
            let mut next = Vec::with_capacity(working_set.len());
            for current in &working_set {
                next.extend(self.apply(current, *form)?);
            }
            debug!(form = %form, relations = next.len(), "transition complete");
            working_set = next;
        }
        Ok(working_set)
    }

    /// Apply a single form transition to one relation
    pub fn apply(&self, relation: &Relation, form: NormalForm) -> NormalizerResult<Vec<Relation>> {
        match form {
            NormalForm::First => {
                first_normal_form(relation, self.config.multivalue_delimiter)
            }
            NormalForm::Second => second_normal_form(relation),
            NormalForm::Third => third_normal_form(relation),
            NormalForm::BoyceCodd => boyce_codd_normal_form(relation),
            NormalForm::Fourth => fourth_normal_form(relation),
            NormalForm::Fifth => fifth_normal_form(relation),
        }
    }
}

impl Default for NormalFormEngine {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_arity_ceiling_enforced() {
        let config = NormalizerConfig {
            max_enumeration_arity: 2,
            ..NormalizerConfig::default()
        };
        let engine = NormalFormEngine::with_config(config);
        let rel = Relation::new(
            "wide",
            vec!["a".to_string(), "b".to_string(), "c".to_string()],
        )
        .unwrap();
        let err = engine.normalize(&rel, NormalForm::First);
        assert!(matches!(err, Err(NormalizerError::ResourceLimit { .. })));
    }
}
