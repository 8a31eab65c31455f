//! Token n-gram model for identifier naming analysis
//!
//! Builds a statistical model of "how this project names things" from the
//! token sequences of its identifiers. Each sequence is padded with two
//! start markers and one end marker, so the model also learns which words
//! open and close a name:
//!
//! ```text
//! shouldReturnTrue  ->  ^ ^ should return true $
//! ```
//!
//! Unigrams count raw tokens only; bigrams and trigrams run over the padded
//! sequence. All counts are plain sums, so models built on separate workers
//! merge into the same result in any order.

mod token_model;

pub use token_model::TokenModel;

use crate::models::{MetricRecord, MetricsReport, ReportKind};
use crate::tokens::{tokenize, Canonicalize};
use rustc_hash::FxHashMap;
use serde::Serialize;

/// Start-of-name marker (two are prepended)
pub const START: &str = "^";

/// End-of-name marker
pub const END: &str = "$";

/// A (prev → next) pair with its count.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Bigram {
    pub prev: String,
    pub next: String,
    pub count: u64,
}

/// A (prev1, prev2 → next) triple with its count.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Trigram {
    pub prev1: String,
    pub prev2: String,
    pub next: String,
    pub count: u64,
}

/// Unigram/bigram/trigram frequency tables.
#[derive(Debug, Clone, Default)]
pub struct FrequencyModel {
    unigrams: FxHashMap<String, u64>,
    /// prev -> (next -> count)
    bigrams: FxHashMap<String, FxHashMap<String, u64>>,
    /// (prev1, prev2) -> (next -> count)
    trigrams: FxHashMap<(String, String), FxHashMap<String, u64>>,
    sequences: u64,
}

impl FrequencyModel {
    pub fn new() -> Self {
        Self::default()
    }

    /// Tokenize and ingest one identifier.
    pub fn accept(&mut self, identifier: &str) {
        let tokens = tokenize(identifier, Canonicalize::No);
        self.accept_tokens(&tokens);
    }

    /// Ingest one token sequence. Empty sequences are ignored.
    pub fn accept_tokens(&mut self, tokens: &[String]) {
        if tokens.is_empty() {
            return;
        }
        self.sequences += 1;

        for token in tokens {
            *self.unigrams.entry(token.clone()).or_insert(0) += 1;
        }

        let mut seq: Vec<&str> = Vec::with_capacity(tokens.len() + 3);
        seq.push(START);
        seq.push(START);
        seq.extend(tokens.iter().map(String::as_str));
        seq.push(END);

        for pair in seq.windows(2) {
            *self
                .bigrams
                .entry(pair[0].to_string())
                .or_default()
                .entry(pair[1].to_string())
                .or_insert(0) += 1;
        }
        for triple in seq.windows(3) {
            *self
                .trigrams
                .entry((triple[0].to_string(), triple[1].to_string()))
                .or_default()
                .entry(triple[2].to_string())
                .or_insert(0) += 1;
        }
    }

    /// Fold another model's counts into this one.
    pub fn merge(&mut self, other: FrequencyModel) {
        self.sequences += other.sequences;
        for (token, count) in other.unigrams {
            *self.unigrams.entry(token).or_insert(0) += count;
        }
        for (prev, nexts) in other.bigrams {
            merge_counts(self.bigrams.entry(prev).or_default(), nexts);
        }
        for (context, nexts) in other.trigrams {
            merge_counts(self.trigrams.entry(context).or_default(), nexts);
        }
    }

    pub fn sequences(&self) -> u64 {
        self.sequences
    }

    pub fn vocab_size(&self) -> usize {
        self.unigrams.len()
    }

    pub fn unigram_count(&self, token: &str) -> u64 {
        self.unigrams.get(token).copied().unwrap_or(0)
    }

    pub fn bigram_count(&self, prev: &str, next: &str) -> u64 {
        self.bigrams
            .get(prev)
            .and_then(|nexts| nexts.get(next))
            .copied()
            .unwrap_or(0)
    }

    pub fn trigram_count(&self, prev1: &str, prev2: &str, next: &str) -> u64 {
        self.trigram_nexts(prev1, prev2)
            .and_then(|nexts| nexts.get(next))
            .copied()
            .unwrap_or(0)
    }

    /// P(next | prev) from bigram counts; 0.0 for an unseen context.
    pub fn p_bigram(&self, prev: &str, next: &str) -> f64 {
        match self.bigrams.get(prev) {
            Some(nexts) => conditional(nexts, next),
            None => 0.0,
        }
    }

    /// P(next | prev1, prev2) from trigram counts; 0.0 for an unseen context.
    pub fn p_trigram(&self, prev1: &str, prev2: &str, next: &str) -> f64 {
        match self.trigram_nexts(prev1, prev2) {
            Some(nexts) => conditional(nexts, next),
            None => 0.0,
        }
    }

    /// Highest-count continuation of `(prev1, prev2)`.
    ///
    /// Equal counts resolve to the lexicographically smallest token.
    pub fn most_likely_next(&self, prev1: &str, prev2: &str) -> Option<&str> {
        self.trigram_nexts(prev1, prev2)?
            .iter()
            .max_by(|a, b| a.1.cmp(b.1).then_with(|| b.0.cmp(a.0)))
            .map(|(token, _)| token.as_str())
    }

    /// Greedy walk from `(^, ^)` until the end marker, an unseen context,
    /// or `max_tokens` tokens.
    pub fn generate_greedy(&self, max_tokens: usize) -> Vec<String> {
        let mut out = Vec::new();
        let mut prev1 = START.to_string();
        let mut prev2 = START.to_string();

        while out.len() < max_tokens {
            let next = match self.most_likely_next(&prev1, &prev2) {
                Some(next) if next != END => next.to_string(),
                _ => break,
            };
            out.push(next.clone());
            prev1 = std::mem::replace(&mut prev2, next);
        }
        out
    }

    /// Top `k` tokens, count descending then token ascending.
    pub fn top_unigrams(&self, k: usize) -> Vec<(String, u64)> {
        let mut out: Vec<(String, u64)> = self
            .unigrams
            .iter()
            .map(|(t, c)| (t.clone(), *c))
            .collect();
        out.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
        out.truncate(k);
        out
    }

    /// Top `k` bigrams, flattened; ties ordered by (prev, next).
    pub fn top_bigrams(&self, k: usize) -> Vec<Bigram> {
        let mut out: Vec<Bigram> = self
            .bigrams
            .iter()
            .flat_map(|(prev, nexts)| {
                nexts.iter().map(move |(next, count)| Bigram {
                    prev: prev.clone(),
                    next: next.clone(),
                    count: *count,
                })
            })
            .collect();
        out.sort_by(|a, b| {
            b.count
                .cmp(&a.count)
                .then_with(|| (&a.prev, &a.next).cmp(&(&b.prev, &b.next)))
        });
        out.truncate(k);
        out
    }

    /// Top `k` trigrams, flattened; ties ordered by (prev1, prev2, next).
    pub fn top_trigrams(&self, k: usize) -> Vec<Trigram> {
        let mut out: Vec<Trigram> = self
            .trigrams
            .iter()
            .flat_map(|((prev1, prev2), nexts)| {
                nexts.iter().map(move |(next, count)| Trigram {
                    prev1: prev1.clone(),
                    prev2: prev2.clone(),
                    next: next.clone(),
                    count: *count,
                })
            })
            .collect();
        out.sort_by(|a, b| {
            b.count.cmp(&a.count).then_with(|| {
                (&a.prev1, &a.prev2, &a.next).cmp(&(&b.prev1, &b.prev2, &b.next))
            })
        });
        out.truncate(k);
        out
    }

    /// Total bigram occurrences across all contexts.
    pub fn bigram_total(&self) -> u64 {
        self.bigrams.values().flat_map(|m| m.values()).sum()
    }

    /// Total trigram occurrences across all contexts.
    pub fn trigram_total(&self) -> u64 {
        self.trigrams.values().flat_map(|m| m.values()).sum()
    }

    pub fn bigram_report(&self, k: usize) -> MetricsReport {
        let items = self
            .top_bigrams(k)
            .into_iter()
            .map(|b| MetricRecord::of(format!("{} → {}", b.prev, b.next), b.count))
            .collect();
        MetricsReport::assemble(
            ReportKind::Bigrams,
            "Bigrams",
            format!("Top {} token pairs ({} names)", k, self.sequences),
            format!("'{}' marks the start of a name and '{}' its end.", START, END),
            self.bigram_total(),
            items,
        )
    }

    pub fn trigram_report(&self, k: usize, greedy_max_tokens: usize) -> MetricsReport {
        let items = self
            .top_trigrams(k)
            .into_iter()
            .map(|t| MetricRecord::of(format!("{} {} → {}", t.prev1, t.prev2, t.next), t.count))
            .collect();
        let greedy = self.generate_greedy(greedy_max_tokens).join(" ");
        MetricsReport::assemble(
            ReportKind::Trigrams,
            "Trigrams",
            format!("Top {} token triples ({} names)", k, self.sequences),
            format!("Most likely name (greedy): {}", greedy),
            self.trigram_total(),
            items,
        )
    }

    fn trigram_nexts(&self, prev1: &str, prev2: &str) -> Option<&FxHashMap<String, u64>> {
        self.trigrams.get(&(prev1.to_string(), prev2.to_string()))
    }
}

fn merge_counts(into: &mut FxHashMap<String, u64>, from: FxHashMap<String, u64>) {
    for (token, count) in from {
        *into.entry(token).or_insert(0) += count;
    }
}

fn conditional(nexts: &FxHashMap<String, u64>, next: &str) -> f64 {
    let denom: u64 = nexts.values().sum();
    crate::metrics::ratio(nexts.get(next).copied().unwrap_or(0), denom)
}
