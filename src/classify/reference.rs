//! Cross-population reference lookup
//!
//! Resolves a test owner class (`UserServiceTest`) to the production class
//! it exercises (`UserService`) and exposes that class's method names as
//! the sibling set for `matches_sibling`.

use crate::models::Identifier;
use rustc_hash::{FxHashMap, FxHashSet};
use std::sync::OnceLock;

// Longest-first within each family, otherwise `UserServiceIntegrationTest`
// would resolve to `UserServiceIntegration`.
const TEST_CLASS_SUFFIXES: &[&str] = &[
    "IntegrationTest",
    "Test",
    "IntegrationTests",
    "Tests",
    "ITCase",
    "IT",
];

/// Strip the first matching test suffix from a class name.
///
/// Returns `None` when the name carries no known suffix, or when nothing
/// would remain after stripping it.
pub fn source_class_name(test_class: &str) -> Option<&str> {
    if test_class.trim().is_empty() {
        return None;
    }
    TEST_CLASS_SUFFIXES.iter().find_map(|suffix| {
        test_class
            .strip_suffix(suffix)
            .filter(|rest| !rest.is_empty())
    })
}

/// Method names of the reference population, grouped by owner class.
#[derive(Debug, Clone, Default)]
pub struct ReferenceIndex {
    by_owner: FxHashMap<String, FxHashSet<String>>,
}

impl ReferenceIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Index every identifier outside `analyzed_population` that has an owner.
    pub fn from_identifiers(identifiers: &[Identifier], analyzed_population: &str) -> Self {
        let mut index = Self::new();
        for id in identifiers {
            let Some(population) = id.population.as_deref() else {
                continue;
            };
            if population == analyzed_population {
                continue;
            }
            if let Some(owner) = id.owner.as_deref() {
                index.insert(owner, &id.name);
            }
        }
        index
    }

    pub fn insert(&mut self, owner: &str, method: &str) {
        self.by_owner
            .entry(owner.to_string())
            .or_default()
            .insert(method.to_string());
    }

    pub fn len(&self) -> usize {
        self.by_owner.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_owner.is_empty()
    }

    /// Reference methods for the class a test owner exercises.
    ///
    /// Degrades to an empty set when the owner is missing, carries no test
    /// suffix, or the production class is unknown.
    pub fn siblings_for(&self, test_owner: Option<&str>) -> &FxHashSet<String> {
        test_owner
            .and_then(source_class_name)
            .and_then(|class| self.by_owner.get(class))
            .unwrap_or_else(|| empty_set())
    }
}

fn empty_set() -> &'static FxHashSet<String> {
    static EMPTY: OnceLock<FxHashSet<String>> = OnceLock::new();
    EMPTY.get_or_init(FxHashSet::default)
}
