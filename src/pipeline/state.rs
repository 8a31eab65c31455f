//! Per-shard model state

use crate::classify::NamingModel;
use crate::config::MiningConfig;
use crate::ngram::{FrequencyModel, TokenModel};
use crate::patterns::PatternModel;
use crate::models::Identifier;
use crate::tokens::{tokenize, Canonicalize};
use rustc_hash::FxHashSet;

/// All models fed by one shard of the identifier stream.
///
/// A fresh state is the identity of [`merge`](Self::merge), so shards can
/// be reduced in any grouping.
#[derive(Debug, Clone)]
pub(crate) struct MiningState {
    pub(crate) tokens: TokenModel,
    pub(crate) naming: NamingModel,
    pub(crate) patterns: PatternModel,
    pub(crate) ngrams: FrequencyModel,
    /// Identifiers that produced no tokens
    pub(crate) skipped: u64,
}

impl MiningState {
    pub(crate) fn new(config: &MiningConfig) -> Self {
        Self {
            tokens: TokenModel::new(config.max_sample_lines),
            naming: NamingModel::new(
                &config.display_annotation,
                &config.test_prefix,
                config.max_sample_lines,
            ),
            patterns: PatternModel::new(
                config.pattern_mode,
                config.min_anchors,
                config.max_sample_lines,
            ),
            ngrams: FrequencyModel::new(),
            skipped: 0,
        }
    }

    /// Tokenize once and feed every model.
    pub(crate) fn accept(&mut self, identifier: &Identifier, siblings: &FxHashSet<String>) {
        let tokens = tokenize(&identifier.name, Canonicalize::No);
        if tokens.is_empty() {
            self.skipped += 1;
            return;
        }

        self.tokens.accept_tokens(&identifier.name, &tokens);
        self.naming.accept(identifier, siblings);
        self.patterns.accept_tokens(&identifier.name, &tokens);
        self.ngrams.accept_tokens(&tokens);
    }

    pub(crate) fn merge(mut self, other: MiningState) -> Self {
        self.tokens.merge(other.tokens);
        self.naming.merge(other.naming);
        self.patterns.merge(other.patterns);
        self.ngrams.merge(other.ngrams);
        self.skipped += other.skipped;
        self
    }
}
