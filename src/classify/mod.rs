//! Naming predicates
//!
//! Stateless boolean heuristics over an identifier, its tokens, and
//! externally supplied reference data. [`NamingModel`] counts how many
//! identifiers of a population satisfy each one.
//!
//! `is_phrase_like` and `is_keyword_dense` look similar but match
//! differently: the former compares whole tokens against the action/outcome
//! vocabularies, the latter does substring containment against
//! [`vocabulary::PHRASE_WORDS`]. `nullableField` is keyword-dense material
//! (`null`) but contributes no outcome token.

mod naming_model;
mod reference;
pub mod vocabulary;

pub use naming_model::{NamingModel, NamingRule};
pub use reference::{source_class_name, ReferenceIndex};

use crate::models::Identifier;
use crate::tokens::split_words;
use rustc_hash::FxHashSet;

/// Literal prefix match.
pub fn starts_with_prefix(id: &str, prefix: &str) -> bool {
    id.starts_with(prefix)
}

/// Substring containment of a separator character.
pub fn contains_separator(id: &str, separator: char) -> bool {
    id.contains(separator)
}

/// Camel-like: starts with a letter, has no `_`, and has an uppercase
/// letter after the first character.
///
/// Only the humps are checked, not the case of the first letter, so
/// `ShouldWork` counts alongside `shouldWork`.
pub fn is_camel_like(id: &str) -> bool {
    if id.trim().is_empty() || id.contains('_') {
        return false;
    }
    let mut chars = id.chars();
    match chars.next() {
        Some(first) if first.is_alphabetic() => chars.any(char::is_uppercase),
        _ => false,
    }
}

/// Non-blank and contains no uppercase character.
pub fn has_no_uppercase(id: &str) -> bool {
    !id.trim().is_empty() && !id.chars().any(char::is_uppercase)
}

/// `a` occurs, and `b` occurs after the end of the first `a`.
pub fn matches_ordered_marker_pair(id: &str, a: &str, b: &str) -> bool {
    match id.find(a) {
        Some(pos) => id[pos + a.len()..].contains(b),
        None => false,
    }
}

/// `When` followed later by `Then`.
pub fn follows_when_then(id: &str) -> bool {
    matches_ordered_marker_pair(id, "When", "Then")
}

pub fn has_annotation_tag(identifier: &Identifier, tag: &str) -> bool {
    identifier.annotations.contains(tag)
}

/// Verbatim membership in the reference set. An empty set never matches.
pub fn matches_sibling(id: &str, siblings: &FxHashSet<String>) -> bool {
    !siblings.is_empty() && siblings.contains(id)
}

/// Token-exact phrase heuristic.
///
/// True when the tokens contain at least one action word and one outcome
/// word, or at least two distinct core BDD words. Catches
/// `parseInvalidJsonThrowsException` (action + outcome) while rejecting
/// `testNullValue` (outcome only).
pub fn is_phrase_like<S: AsRef<str>>(tokens: &[S]) -> bool {
    let actions = vocabulary::action_words();
    let outcomes = vocabulary::outcome_words();
    let core = vocabulary::bdd_core();

    let mut has_action = false;
    let mut has_outcome = false;
    let mut core_seen: Vec<&str> = Vec::with_capacity(2);

    for token in tokens {
        let t = token.as_ref();
        has_action |= actions.contains(t);
        has_outcome |= outcomes.contains(t);
        if core.contains(t) && !core_seen.contains(&t) {
            core_seen.push(t);
        }

        if (has_action && has_outcome) || core_seen.len() >= 2 {
            return true;
        }
    }

    false
}

/// [`is_phrase_like`] over the word split of a raw identifier.
pub fn is_phrase_like_name(id: &str) -> bool {
    if id.trim().is_empty() {
        return false;
    }
    is_phrase_like(&split_words(id))
}

/// Substring heuristic: at least two distinct phrase words occur anywhere in
/// the lowercased identifier.
pub fn is_keyword_dense(id: &str) -> bool {
    if id.trim().is_empty() {
        return false;
    }
    let lower = id.to_lowercase();
    let mut matches = 0;
    for word in vocabulary::PHRASE_WORDS {
        if lower.contains(word) {
            matches += 1;
            if matches >= 2 {
                return true;
            }
        }
    }
    false
}
