//! Unigram token frequencies with example names

use crate::metrics::MetricTable;
use crate::models::{MetricsReport, ReportKind};
use crate::tokens::{tokenize, Canonicalize};

/// Simple unigram token frequency table.
///
/// Unlike [`FrequencyModel`](super::FrequencyModel) it keeps, for each
/// token, a bounded list of the names it came from.
#[derive(Debug, Clone)]
pub struct TokenModel {
    table: MetricTable,
    sequences: u64,
    total_tokens: u64,
}

impl TokenModel {
    pub fn new(max_sample_lines: usize) -> Self {
        Self {
            table: MetricTable::new(max_sample_lines),
            sequences: 0,
            total_tokens: 0,
        }
    }

    pub fn accept(&mut self, identifier: &str) {
        let tokens = tokenize(identifier, Canonicalize::No);
        self.accept_tokens(identifier, &tokens);
    }

    pub fn accept_tokens(&mut self, identifier: &str, tokens: &[String]) {
        if tokens.is_empty() {
            return;
        }
        self.sequences += 1;
        self.total_tokens += tokens.len() as u64;
        for token in tokens {
            self.table.record(token, identifier);
        }
    }

    pub fn merge(&mut self, other: TokenModel) {
        self.sequences += other.sequences;
        self.total_tokens += other.total_tokens;
        self.table.merge(other.table);
    }

    pub fn sequences(&self) -> u64 {
        self.sequences
    }

    pub fn total_tokens(&self) -> u64 {
        self.total_tokens
    }

    pub fn count(&self, token: &str) -> u64 {
        self.table.count(token)
    }

    pub fn report(&self, k: usize) -> MetricsReport {
        MetricsReport::assemble(
            ReportKind::Tokens,
            "Tokens",
            format!("Top tokens ({})", k),
            "Method names split on camelCase, '_' and '-', lowercased. \
             Percentages are relative to all tokens seen.",
            self.total_tokens,
            self.table.top_k(k),
        )
    }
}
