//! Phrase pattern generalization
//!
//! Collapses method names into reusable templates by keeping a small set
//! of anchor words and replacing everything else with placeholders:
//!
//! ```text
//! whenInputInvalidThenThrowsIllegalArgumentException
//!   tokens      when input invalid then throws illegal argument exception
//!   granular    When <w> <w> Then Throws <w> <w> Exception
//!   compressed  When <any> Then Throws <any> Exception
//! ```
//!
//! Tokens are canonicalized first (`thrown` -> `Throws`, `asserted` ->
//! `Expect`) so equivalent names land on the same template.

use crate::metrics::MetricTable;
use crate::models::{MetricsReport, ReportKind};
use crate::tokens::{canonical_form, tokenize, Canonicalize};
use rustc_hash::FxHashSet;
use serde::{Deserialize, Serialize};
use std::sync::OnceLock;

/// Placeholder for a single non-anchor token
pub const WORD: &str = "<w>";

/// Placeholder for a run of non-anchor tokens
pub const ANY: &str = "<any>";

/// Words kept verbatim in templates. Keep this small, or every token
/// becomes an anchor and the templates stop abstracting anything.
const ANCHOR_WORDS: &[&str] = &[
    "given", "when", "then", "should", "if", "throws", "expect", "exception", "error", "fail",
    "fails", "failed", "return", "returns", "not", "no", "null", "empty", "missing", "invalid",
    "valid",
];

static ANCHORS: OnceLock<FxHashSet<&'static str>> = OnceLock::new();

fn anchors() -> &'static FxHashSet<&'static str> {
    ANCHORS.get_or_init(|| ANCHOR_WORDS.iter().copied().collect())
}

pub fn is_anchor(token: &str) -> bool {
    anchors().contains(token)
}

/// How non-anchor tokens are rendered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PatternMode {
    /// One `<w>` per non-anchor token
    Granular,
    /// One `<any>` per maximal run of non-anchor tokens
    #[default]
    Compressed,
}

/// Render canonical tokens as a template.
pub fn to_template<S: AsRef<str>>(tokens: &[S], mode: PatternMode) -> String {
    let mut parts: Vec<String> = Vec::with_capacity(tokens.len());
    let mut previous_was_placeholder = false;

    for token in tokens {
        let t = token.as_ref();
        if is_anchor(t) {
            parts.push(capitalize(t));
            previous_was_placeholder = false;
            continue;
        }
        match mode {
            PatternMode::Granular => parts.push(WORD.to_string()),
            PatternMode::Compressed if !previous_was_placeholder => parts.push(ANY.to_string()),
            PatternMode::Compressed => {}
        }
        previous_was_placeholder = true;
    }

    parts.join(" ")
}

/// Tokenize, canonicalize and render an identifier.
pub fn generalize(identifier: &str, mode: PatternMode) -> String {
    to_template(&tokenize(identifier, Canonicalize::Yes), mode)
}

pub fn anchor_count<S: AsRef<str>>(tokens: &[S]) -> usize {
    tokens.iter().filter(|t| is_anchor(t.as_ref())).count()
}

fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Template distribution over a population of identifiers.
#[derive(Debug, Clone)]
pub struct PatternModel {
    mode: PatternMode,
    min_anchors: usize,
    table: MetricTable,
    /// Identifiers with at least one token
    sequences: u64,
    /// Identifiers whose template made it into the distribution
    anchored: u64,
}

impl PatternModel {
    pub fn new(mode: PatternMode, min_anchors: usize, max_sample_lines: usize) -> Self {
        Self {
            mode,
            min_anchors,
            table: MetricTable::new(max_sample_lines),
            sequences: 0,
            anchored: 0,
        }
    }

    /// Ingest one identifier.
    pub fn accept(&mut self, identifier: &str) -> bool {
        let tokens = tokenize(identifier, Canonicalize::No);
        self.accept_tokens(identifier, &tokens)
    }

    /// Ingest a pre-tokenized (non-canonical) identifier.
    ///
    /// Returns whether a template was recorded. Anchor-free identifiers
    /// still count toward [`sequences`](Self::sequences).
    pub fn accept_tokens(&mut self, identifier: &str, raw_tokens: &[String]) -> bool {
        if raw_tokens.is_empty() {
            return false;
        }
        self.sequences += 1;

        let tokens: Vec<&str> = raw_tokens.iter().map(|t| canonical_form(t)).collect();
        if anchor_count(&tokens) < self.min_anchors {
            return false;
        }

        self.anchored += 1;
        let template = to_template(&tokens, self.mode);
        self.table.record(&template, identifier);
        true
    }

    pub fn merge(&mut self, other: PatternModel) {
        self.sequences += other.sequences;
        self.anchored += other.anchored;
        self.table.merge(other.table);
    }

    pub fn sequences(&self) -> u64 {
        self.sequences
    }

    pub fn anchored(&self) -> u64 {
        self.anchored
    }

    pub fn distinct_patterns(&self) -> usize {
        self.table.len()
    }

    pub fn count(&self, template: &str) -> u64 {
        self.table.count(template)
    }

    /// Most frequent template, ties broken by name.
    pub fn dominant(&self) -> Option<String> {
        self.table.top_k(1).into_iter().next().map(|r| r.name)
    }

    /// Freeze the top `k` templates into the patterns report.
    pub fn report(&self, k: usize) -> MetricsReport {
        let mode = match self.mode {
            PatternMode::Granular => "granular",
            PatternMode::Compressed => "compressed",
        };
        MetricsReport::assemble(
            ReportKind::Patterns,
            "Patterns",
            format!(
                "Top {} phrase templates ({} mode) over {} anchored of {} names, {} distinct.",
                k,
                mode,
                self.anchored,
                self.sequences,
                self.table.len()
            ),
            format!(
                "Builds common phrase templates from method names. Names are tokenized \
                 (camelCase, _, -), normalized (throw/throws/thrown -> Throws, \
                 assert/expect -> Expect), anchor words are kept, and all other words are \
                 replaced with <w> (granular) or <any> (compressed). {}",
                match self.min_anchors {
                    0 => "Every name is kept, anchor-free ones included.".to_string(),
                    n => format!("Names with fewer than {} anchor word(s) are left out.", n),
                }
            ),
            self.anchored,
            self.table.top_k(k),
        )
    }
}
