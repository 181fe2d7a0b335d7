//! Scorer profiles: named weight bundles per content type
//!
//! A profile overrides the default weight of the scorers it names and leaves
//! every other scorer at its own default. Profiles are immutable once
//! registered.

use crate::error::{validate_weight, DistillError, DistillResult};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::sync::Arc;
use tracing::debug;

/// A named set of scorer weight overrides
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Profile {
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub weights: BTreeMap<String, f64>,
}

impl Profile {
    pub fn new(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            weights: BTreeMap::new(),
        }
    }

    pub fn with_weight(mut self, scorer: impl Into<String>, weight: f64) -> Self {
        self.weights.insert(scorer.into(), weight);
        self
    }

    /// Override for `scorer`, if this profile sets one
    pub fn weight(&self, scorer: &str) -> Option<f64> {
        self.weights.get(scorer).copied()
    }
}

fn builtin_profiles() -> Vec<Profile> {
    vec![
        Profile::new("default", "General-purpose scoring (balanced weights)")
            .with_weight("substance", 1.5)
            .with_weight("epistemic", 1.0)
            .with_weight("readability", 0.75),
        Profile::new(
            "technical",
            "Docs, tutorials and engineering posts; substance matters most",
        )
        .with_weight("substance", 2.0)
        .with_weight("epistemic", 0.5)
        .with_weight("readability", 1.0),
        Profile::new("news", "Journalism; epistemic honesty is critical")
            .with_weight("substance", 1.0)
            .with_weight("epistemic", 2.0)
            .with_weight("readability", 1.0),
        Profile::new("opinion", "Essays and editorials; reasoning and nuance matter")
            .with_weight("substance", 1.0)
            .with_weight("epistemic", 1.5)
            .with_weight("readability", 1.0),
    ]
}

/// Registry of profiles, keyed by name
#[derive(Debug, Clone, Default)]
pub struct ProfileRegistry {
    profiles: BTreeMap<String, Arc<Profile>>,
}

impl ProfileRegistry {
    /// Empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry holding `default`, `technical`, `news` and `opinion`
    pub fn with_builtin() -> Self {
        let profiles = builtin_profiles()
            .into_iter()
            .map(|p| (p.name.clone(), Arc::new(p)))
            .collect();
        Self { profiles }
    }

    /// Register a profile; names must be unique and weights valid
    pub fn register(&mut self, profile: Profile) -> DistillResult<()> {
        if self.profiles.contains_key(&profile.name) {
            return Err(DistillError::DuplicateProfile(profile.name));
        }
        for (scorer, weight) in &profile.weights {
            validate_weight(scorer, *weight)?;
        }
        debug!(
            "Registered profile '{}' ({} weights)",
            profile.name,
            profile.weights.len()
        );
        self.profiles.insert(profile.name.clone(), Arc::new(profile));
        Ok(())
    }

    pub fn get(&self, name: &str) -> DistillResult<Arc<Profile>> {
        self.profiles
            .get(name)
            .cloned()
            .ok_or_else(|| DistillError::UnknownProfile {
                name: name.to_string(),
                available: self.names(),
            })
    }

    pub fn contains(&self, name: &str) -> bool {
        self.profiles.contains_key(name)
    }

    /// Profile names in lexicographic order
    pub fn names(&self) -> Vec<String> {
        self.profiles.keys().cloned().collect()
    }

    /// `(name, description)` pairs in lexicographic order
    pub fn list(&self) -> Vec<(&str, &str)> {
        self.profiles
            .values()
            .map(|p| (p.name.as_str(), p.description.as_str()))
            .collect()
    }

    pub fn len(&self) -> usize {
        self.profiles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.profiles.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_profiles() {
        let registry = ProfileRegistry::with_builtin();
        assert_eq!(
            registry.names(),
            vec!["default", "news", "opinion", "technical"]
        );
        let technical = registry.get("technical").unwrap();
        assert_eq!(technical.weight("substance"), Some(2.0));
        assert_eq!(technical.weight("epistemic"), Some(0.5));
        assert_eq!(technical.weight("argument"), None);
        assert_eq!(registry.get("news").unwrap().weight("epistemic"), Some(2.0));
    }

    #[test]
    fn test_unknown_profile_lists_available() {
        let registry = ProfileRegistry::with_builtin();
        let err = registry.get("legal").unwrap_err();
        assert!(matches!(err, DistillError::UnknownProfile { .. }));
        assert!(err
            .to_string()
            .ends_with("default, news, opinion, technical"));
    }

    #[test]
    fn test_register_custom_profile() {
        let mut registry = ProfileRegistry::with_builtin();
        registry
            .register(Profile::new("legal", "Contracts").with_weight("argument", 2.0))
            .unwrap();
        assert_eq!(registry.len(), 5);
        assert_eq!(registry.list()[1], ("legal", "Contracts"));
    }

    #[test]
    fn test_register_rejects_duplicates_and_bad_weights() {
        let mut registry = ProfileRegistry::with_builtin();
        let err = registry.register(Profile::new("news", "again")).unwrap_err();
        assert!(matches!(err, DistillError::DuplicateProfile(ref n) if n == "news"));

        let err = registry
            .register(Profile::new("odd", "").with_weight("substance", -1.0))
            .unwrap_err();
        assert!(matches!(err, DistillError::InvalidWeight { .. }));
        assert!(!registry.contains("odd"));
    }
}
