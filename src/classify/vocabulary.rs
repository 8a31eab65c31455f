//! Word lists used by the naming heuristics
//!
//! Built once per process and shared by reference.

use rustc_hash::FxHashSet;
use std::sync::OnceLock;

/// Core BDD words; two distinct ones make a name phrase-like on their own.
const BDD_CORE_WORDS: &[&str] = &["given", "when", "then", "should", "expect"];

/// Verbs naming the action or trigger under test
const ACTION_WORDS: &[&str] = &[
    "call", "calling",
    "invoke", "invoking",
    "execute", "executing",
    "create", "creating",
    "update", "updating",
    "delete", "deleting",
    "save", "saving",
    "load", "loading",
    "send", "sending",
    "receive", "receiving",
    "parse", "parsing",
    "convert", "converting",
    "process", "processing",
    "handle", "handling",
    "get", "getting",
    "set", "setting",
    "compute", "computing",
    "calculate", "calculating",
];

/// Assertion / outcome words (Then/Should style)
const OUTCOME_WORDS: &[&str] = &[
    "then", "should", "expect",
    "return", "returns", "returned",
    "throw", "throws", "thrown",
    "fail", "fails", "failed",
    "error", "exception",
    "success", "succeeds", "succeeded",
    "true", "false",
    "null", "empty",
    "invalid", "valid",
    "contains", "equals", "matches",
    "not", "no",
];

/// Substring vocabulary for the keyword-density check.
///
/// Matched by containment, so `nullable` hits `null` and `returned` hits
/// `return`.
pub const PHRASE_WORDS: &[&str] = &[
    "given", "when", "should", "then", "expect", "return",
    "throw", "fail", "error", "exception", "invalid", "null", "empty",
];

static BDD_CORE: OnceLock<FxHashSet<&'static str>> = OnceLock::new();
static ACTIONS: OnceLock<FxHashSet<&'static str>> = OnceLock::new();
static OUTCOMES: OnceLock<FxHashSet<&'static str>> = OnceLock::new();

fn build(words: &'static [&'static str]) -> FxHashSet<&'static str> {
    words.iter().copied().collect()
}

pub fn bdd_core() -> &'static FxHashSet<&'static str> {
    BDD_CORE.get_or_init(|| build(BDD_CORE_WORDS))
}

pub fn action_words() -> &'static FxHashSet<&'static str> {
    ACTIONS.get_or_init(|| build(ACTION_WORDS))
}

pub fn outcome_words() -> &'static FxHashSet<&'static str> {
    OUTCOMES.get_or_init(|| build(OUTCOME_WORDS))
}
