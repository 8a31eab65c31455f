//! Per-rule naming counters for the analyzed population

use super::{
    contains_separator, follows_when_then, has_annotation_tag, has_no_uppercase,
    is_keyword_dense, is_camel_like, is_phrase_like_name, matches_sibling,
    starts_with_prefix,
};
use crate::metrics::MetricTable;
use crate::models::{Identifier, MetricRecord, MetricsReport, ReportKind};
use rustc_hash::FxHashSet;

/// Label of the row carrying the population total
pub const ALL_ROW: &str = "All tests";

/// The naming rules counted by [`NamingModel`], in report order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NamingRule {
    DisplayAnnotation,
    StartsWithPrefix,
    WhenThen,
    PhraseLike,
    KeywordDense,
    SameAsSource,
    ContainsUnderscore,
    CamelCase,
    NoUppercase,
}

impl NamingRule {
    pub fn all() -> &'static [NamingRule] {
        &[
            NamingRule::DisplayAnnotation,
            NamingRule::StartsWithPrefix,
            NamingRule::WhenThen,
            NamingRule::PhraseLike,
            NamingRule::KeywordDense,
            NamingRule::SameAsSource,
            NamingRule::ContainsUnderscore,
            NamingRule::CamelCase,
            NamingRule::NoUppercase,
        ]
    }

    /// Stable key used in the counting table.
    pub fn key(&self) -> &'static str {
        match self {
            NamingRule::DisplayAnnotation => "display_annotation",
            NamingRule::StartsWithPrefix => "starts_with_prefix",
            NamingRule::WhenThen => "when_then",
            NamingRule::PhraseLike => "phrase_like",
            NamingRule::KeywordDense => "keyword_dense",
            NamingRule::SameAsSource => "same_as_source",
            NamingRule::ContainsUnderscore => "contains_underscore",
            NamingRule::CamelCase => "camel_case",
            NamingRule::NoUppercase => "no_uppercase",
        }
    }
}

/// Counts how many identifiers satisfy each [`NamingRule`].
#[derive(Debug, Clone)]
pub struct NamingModel {
    table: MetricTable,
    total: u64,
    annotation_tag: String,
    test_prefix: String,
}

impl NamingModel {
    pub fn new(annotation_tag: &str, test_prefix: &str, max_sample_lines: usize) -> Self {
        Self {
            table: MetricTable::new(max_sample_lines),
            total: 0,
            annotation_tag: annotation_tag.to_string(),
            test_prefix: test_prefix.to_string(),
        }
    }

    /// Ingest one identifier of the analyzed population.
    pub fn accept(&mut self, identifier: &Identifier, siblings: &FxHashSet<String>) {
        let name = identifier.name.as_str();
        let sample = identifier.qualified();
        self.total += 1;

        for rule in NamingRule::all() {
            let hit = match rule {
                NamingRule::DisplayAnnotation => has_annotation_tag(identifier, &self.annotation_tag),
                NamingRule::StartsWithPrefix => starts_with_prefix(name, &self.test_prefix),
                NamingRule::WhenThen => follows_when_then(name),
                NamingRule::PhraseLike => is_phrase_like_name(name),
                NamingRule::KeywordDense => is_keyword_dense(name),
                NamingRule::SameAsSource => matches_sibling(name, siblings),
                NamingRule::ContainsUnderscore => contains_separator(name, '_'),
                NamingRule::CamelCase => is_camel_like(name),
                NamingRule::NoUppercase => has_no_uppercase(name),
            };
            if hit {
                self.table.record(rule.key(), &sample);
            }
        }
    }

    pub fn merge(&mut self, other: NamingModel) {
        self.total += other.total;
        self.table.merge(other.table);
    }

    pub fn total(&self) -> u64 {
        self.total
    }

    pub fn count(&self, rule: NamingRule) -> u64 {
        self.table.count(rule.key())
    }

    fn label(&self, rule: NamingRule) -> String {
        match rule {
            NamingRule::DisplayAnnotation => format!("@{} annotation", self.annotation_tag),
            NamingRule::StartsWithPrefix => format!("Start with \"{}\"", self.test_prefix),
            NamingRule::WhenThen => "follows pattern ..When..Then..".to_string(),
            NamingRule::PhraseLike => "Is like a phrase".to_string(),
            NamingRule::KeywordDense => "Keyword dense".to_string(),
            NamingRule::SameAsSource => "same name for source and test".to_string(),
            NamingRule::ContainsUnderscore => "contains \"_\"".to_string(),
            NamingRule::CamelCase => "camelCase".to_string(),
            NamingRule::NoUppercase => "no CamelCase".to_string(),
        }
    }

    /// Freeze into the test-method naming report.
    ///
    /// Every rule gets a row, zero counts included.
    pub fn report(&self) -> MetricsReport {
        let mut items = Vec::with_capacity(NamingRule::all().len() + 1);
        items.push(MetricRecord::of(ALL_ROW, self.total));
        for rule in NamingRule::all() {
            let sample = self
                .table
                .get(rule.key())
                .map(|r| r.sample.clone())
                .unwrap_or_default();
            items.push(MetricRecord::new(self.label(*rule), self.count(*rule), sample));
        }

        MetricsReport::assemble(
            ReportKind::TestMethodNaming,
            "Test naming",
            format!(
                "How test method names are written (prefix '{}', underscores, camelCase, @{}, etc.).",
                self.test_prefix, self.annotation_tag
            ),
            "",
            self.total,
            items,
        )
    }
}
