//! Explicit augmenter construction by name.
//!
//! The registry is the only place a configuration name turns into code: a
//! plain table from name to constructor function, populated at startup.
//! Unknown names fail the lookup instead of falling through to anything
//! dynamic.

use std::collections::HashMap;

use serde_json::Value;

use crate::augment::{Augmenter, AugmenterStack, Detuning, SemitoneShift};
use crate::config::{DetuningParams, SemitoneShiftParams};
use crate::error::{AugmentError, AugmentResult};

/// Constructor signature stored in the registry.
///
/// Takes the augmenter's parameter map as JSON and returns the built
/// augmenter or a construction error.
pub type BuilderFn = fn(&Value) -> AugmentResult<Augmenter>;

/// Name-to-constructor table for augmenters.
#[derive(Debug, Default)]
pub struct AugmenterRegistry {
    builders: HashMap<String, BuilderFn>,
}

impl AugmenterRegistry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a registry with the built-in augmenters registered under
    /// `"SemitoneShift"` and `"Detuning"`.
    pub fn with_builtins() -> Self {
        let mut builders: HashMap<String, BuilderFn> = HashMap::new();
        builders.insert("SemitoneShift".to_string(), build_semitone_shift);
        builders.insert("Detuning".to_string(), build_detuning);
        Self { builders }
    }

    /// Registers a constructor under a name.
    ///
    /// Registering a name twice is an error; replacing a constructor
    /// silently would make `{name: params}` configurations ambiguous.
    pub fn register(&mut self, name: impl Into<String>, builder: BuilderFn) -> AugmentResult<()> {
        let name = name.into();
        if self.builders.contains_key(&name) {
            return Err(AugmentError::AlreadyRegistered { name });
        }
        self.builders.insert(name, builder);
        Ok(())
    }

    /// Builds one augmenter from its name and parameter map.
    pub fn build(&self, name: &str, params: &Value) -> AugmentResult<Augmenter> {
        let builder = self
            .builders
            .get(name)
            .ok_or_else(|| AugmentError::UnknownAugmenter {
                name: name.to_string(),
            })?;
        builder(params)
    }

    /// Builds every entry of a `{name: params}` map into one stack.
    ///
    /// Entries are built in sorted-name order, so the resulting stack does
    /// not depend on the map's iteration order.
    pub fn build_stack(
        &self,
        config: &serde_json::Map<String, Value>,
    ) -> AugmentResult<AugmenterStack> {
        let mut entries: Vec<(&String, &Value)> = config.iter().collect();
        entries.sort_by_key(|(name, _)| name.as_str());

        let mut augmenters = Vec::with_capacity(entries.len());
        for (name, params) in entries {
            augmenters.push(self.build(name, params)?);
        }
        Ok(AugmenterStack::new(augmenters))
    }

    /// True when a constructor is registered under the name.
    pub fn contains(&self, name: &str) -> bool {
        self.builders.contains_key(name)
    }

    /// All registered names, sorted.
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.builders.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    /// Number of registered constructors.
    pub fn len(&self) -> usize {
        self.builders.len()
    }

    /// True when nothing is registered.
    pub fn is_empty(&self) -> bool {
        self.builders.is_empty()
    }
}

fn build_semitone_shift(params: &Value) -> AugmentResult<Augmenter> {
    let params: SemitoneShiftParams = serde_json::from_value(params.clone())?;
    Ok(SemitoneShift::new(params)?.into())
}

fn build_detuning(params: &Value) -> AugmentResult<Augmenter> {
    let params: DetuningParams = serde_json::from_value(params.clone())?;
    Ok(Detuning::new(params)?.into())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{default_augmentation, TargetType};
    use serde_json::json;

    #[test]
    fn test_builtins_are_registered() {
        let registry = AugmenterRegistry::with_builtins();
        assert!(registry.contains("SemitoneShift"));
        assert!(registry.contains("Detuning"));
        assert_eq!(registry.names(), vec!["Detuning", "SemitoneShift"]);
    }

    #[test]
    fn test_unknown_name_fails_lookup() {
        let registry = AugmenterRegistry::with_builtins();
        let result = registry.build("PitchBend", &json!({}));
        assert!(matches!(
            result,
            Err(AugmentError::UnknownAugmenter { name }) if name == "PitchBend"
        ));
    }

    #[test]
    fn test_duplicate_registration_fails() {
        let mut registry = AugmenterRegistry::with_builtins();
        let result = registry.register("Detuning", build_detuning);
        assert!(matches!(
            result,
            Err(AugmentError::AlreadyRegistered { name }) if name == "Detuning"
        ));
    }

    #[test]
    fn test_custom_registration_builds() {
        let mut registry = AugmenterRegistry::new();
        registry
            .register("Warble", build_detuning)
            .expect("fresh name");
        let augmenter = registry
            .build("Warble", &json!({ "max_shift": 0.1 }))
            .expect("valid params");
        assert_eq!(augmenter.name(), "Detuning");
    }

    #[test]
    fn test_empty_params_use_defaults() {
        let registry = AugmenterRegistry::with_builtins();
        let augmenter = registry
            .build("SemitoneShift", &json!({}))
            .expect("defaults fill in");
        match augmenter {
            Augmenter::SemitoneShift(inner) => {
                assert_eq!(inner.max_shift(), 4);
                assert_eq!(inner.target_type(), TargetType::ChordsMajMin);
            }
            other => panic!("unexpected augmenter {:?}", other),
        }
    }

    #[test]
    fn test_unknown_parameter_key_fails() {
        let registry = AugmenterRegistry::with_builtins();
        let result = registry.build("SemitoneShift", &json!({ "max_shfit": 4 }));
        assert!(matches!(result, Err(AugmentError::InvalidParams(_))));
    }

    #[test]
    fn test_bad_target_type_fails_construction() {
        let registry = AugmenterRegistry::with_builtins();
        let result = registry.build("SemitoneShift", &json!({ "target_type": "tetrads" }));
        assert!(matches!(result, Err(AugmentError::InvalidParams(_))));
    }

    #[test]
    fn test_detuning_bound_is_enforced_through_registry() {
        let registry = AugmenterRegistry::with_builtins();
        let result = registry.build("Detuning", &json!({ "max_shift": 0.6 }));
        assert!(matches!(
            result,
            Err(AugmentError::DetuneTooLarge { .. })
        ));
    }

    #[test]
    fn test_oversized_semitone_bound_is_enforced_through_registry() {
        let registry = AugmenterRegistry::with_builtins();
        let result = registry.build("SemitoneShift", &json!({ "max_shift": 4_000_000_000u32 }));
        assert!(matches!(result, Err(AugmentError::InvalidParameter { .. })));
    }

    #[test]
    fn test_default_bundle_builds_sorted_stack() {
        let registry = AugmenterRegistry::with_builtins();
        let stack = registry
            .build_stack(&default_augmentation())
            .expect("canonical bundle");
        let names: Vec<&str> = stack.augmenters().iter().map(Augmenter::name).collect();
        assert_eq!(names, vec!["Detuning", "SemitoneShift"]);
    }

    #[test]
    fn test_build_stack_propagates_member_errors() {
        let registry = AugmenterRegistry::with_builtins();
        let mut config = serde_json::Map::new();
        config.insert("SemitoneShift".to_string(), json!({}));
        config.insert("Tremolo".to_string(), json!({}));
        let result = registry.build_stack(&config);
        assert!(matches!(
            result,
            Err(AugmentError::UnknownAugmenter { name }) if name == "Tremolo"
        ));
    }
}
