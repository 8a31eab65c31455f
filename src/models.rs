//! Core data models for naming-miner
//!
//! These models are used throughout the crate for representing the
//! identifiers fed into a run and the reports that come out of it.

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

/// Schema version stamped on every [`MetricsReport`].
pub const REPORT_VERSION: u32 = 1;

/// A source-code name handed to the engine by the external enumerator.
///
/// The engine treats `name` as an opaque string. Everything else is
/// metadata that the enumerator resolved from the source grammar.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Identifier {
    /// Raw method name, e.g. `whenInputInvalidThenThrows`
    pub name: String,
    /// Annotation tags attached to the declaration (`Test`, `DisplayName`, ...)
    #[serde(default)]
    pub annotations: BTreeSet<String>,
    /// Population tag ("test", "reference", ...). `None` means the
    /// enumerator did not partition the stream.
    #[serde(default)]
    pub population: Option<String>,
    /// Enclosing type name, used to resolve siblings and qualify samples
    #[serde(default)]
    pub owner: Option<String>,
}

impl Identifier {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    pub fn with_population(mut self, population: impl Into<String>) -> Self {
        self.population = Some(population.into());
        self
    }

    pub fn with_owner(mut self, owner: impl Into<String>) -> Self {
        self.owner = Some(owner.into());
        self
    }

    pub fn with_annotation(mut self, tag: impl Into<String>) -> Self {
        self.annotations.insert(tag.into());
        self
    }

    /// `Owner.name` when the owner is known, otherwise the bare name.
    pub fn qualified(&self) -> String {
        match &self.owner {
            Some(owner) if !owner.is_empty() => format!("{}.{}", owner, self.name),
            _ => self.name.clone(),
        }
    }

    /// Whether this identifier belongs to `population`.
    ///
    /// Untagged identifiers belong to every population.
    pub fn is_in_population(&self, population: &str) -> bool {
        self.population.as_deref().map_or(true, |p| p == population)
    }
}

/// Report categories, in display precedence order.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ReportKind {
    Summary,
    FileTypes,
    SrcVsTest,
    TestMethodNaming,
    Tokens,
    Patterns,
    Bigrams,
    Trigrams,
}

impl ReportKind {
    pub fn all() -> &'static [ReportKind] {
        &[
            ReportKind::Summary,
            ReportKind::FileTypes,
            ReportKind::SrcVsTest,
            ReportKind::TestMethodNaming,
            ReportKind::Tokens,
            ReportKind::Patterns,
            ReportKind::Bigrams,
            ReportKind::Trigrams,
        ]
    }

    /// Stable identifier used as the report key by presentation layers.
    pub fn id(&self) -> &'static str {
        match self {
            ReportKind::Summary => "SUMMARY",
            ReportKind::FileTypes => "FILE_TYPES",
            ReportKind::SrcVsTest => "SRC_VS_TEST",
            ReportKind::TestMethodNaming => "TEST_METHOD_NAMING",
            ReportKind::Tokens => "TOKENS",
            ReportKind::Patterns => "PATTERNS",
            ReportKind::Bigrams => "BIGRAMS",
            ReportKind::Trigrams => "TRIGRAMS",
        }
    }
}

impl std::fmt::Display for ReportKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.id())
    }
}

/// One row of a report: a counted key with bounded sample text.
///
/// `percent` is derived by [`MetricsReport::assemble`]; callers only ever
/// set counts and samples.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MetricRecord {
    pub name: String,
    pub count: u64,
    #[serde(default)]
    pub(crate) percent: f64,
    /// Newline-separated examples, capped at the configured line count
    #[serde(default)]
    pub sample: String,
}

impl MetricRecord {
    pub fn new(name: impl Into<String>, count: u64, sample: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            count,
            percent: 0.0,
            sample: sample.into(),
        }
    }

    pub fn of(name: impl Into<String>, count: u64) -> Self {
        Self::new(name, count, "")
    }

    pub fn percent(&self) -> f64 {
        self.percent
    }

    /// Ranking order: highest count first, then name ascending.
    pub fn rank_cmp(&self, other: &Self) -> std::cmp::Ordering {
        other
            .count
            .cmp(&self.count)
            .then_with(|| self.name.cmp(&other.name))
    }
}

/// A frozen, ranked report.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MetricsReport {
    pub version: u32,
    pub kind: ReportKind,
    pub name: String,
    pub summary: String,
    pub help: String,
    total_count: u64,
    items: Vec<MetricRecord>,
}

impl MetricsReport {
    /// Compute the total, ratios and ranking, and freeze the report.
    ///
    /// A zero `declared_total` means the items partition the total, which is
    /// then their sum. A nonzero one is raised to the largest item count if
    /// needed, so no item exceeds 100% even when rows overlap (the naming
    /// rules, or "Total files" next to "Sources"). With a zero total every
    /// percent is zero.
    pub fn assemble(
        kind: ReportKind,
        name: impl Into<String>,
        summary: impl Into<String>,
        help: impl Into<String>,
        declared_total: u64,
        mut items: Vec<MetricRecord>,
    ) -> Self {
        let total_count = if declared_total != 0 {
            let largest = items.iter().map(|i| i.count).max().unwrap_or(0);
            declared_total.max(largest)
        } else {
            items.iter().map(|i| i.count).sum()
        };

        for item in &mut items {
            item.percent = crate::metrics::ratio(item.count, total_count);
        }
        items.sort_by(MetricRecord::rank_cmp);

        Self {
            version: REPORT_VERSION,
            kind,
            name: name.into(),
            summary: summary.into(),
            help: help.into(),
            total_count,
            items,
        }
    }

    pub fn total_count(&self) -> u64 {
        self.total_count
    }

    pub fn items(&self) -> &[MetricRecord] {
        &self.items
    }

    pub fn get(&self, name: &str) -> Option<&MetricRecord> {
        self.items.iter().find(|item| item.name == name)
    }

    /// Report ordering: category precedence, then display name.
    pub fn precedence_cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.kind
            .cmp(&other.kind)
            .then_with(|| self.name.cmp(&other.name))
    }
}

/// The de-facto convention inferred from the naming report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConventionSummary {
    pub headline: String,
    pub rationale: String,
}

/// File counts supplied by the external traversal collaborator.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScanSummary {
    pub total_files: u64,
    /// Extension (lowercase, without dot, `(no-ext)` when missing) to count
    #[serde(default)]
    pub extension_counts: BTreeMap<String, u64>,
    #[serde(default)]
    pub source_files: u64,
    #[serde(default)]
    pub test_files: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_assemble_uses_item_sum_when_no_declared_total() {
        let report = MetricsReport::assemble(
            ReportKind::Tokens,
            "Tokens",
            "",
            "",
            0,
            vec![
                MetricRecord::of("b", 5),
                MetricRecord::of("top", 10),
                MetricRecord::of("a", 5),
            ],
        );

        assert_eq!(report.total_count(), 20);
        let names: Vec<&str> = report.items().iter().map(|i| i.name.as_str()).collect();
        assert_eq!(names, vec!["top", "a", "b"]);
        assert!((report.items()[0].percent() - 0.50).abs() < 1e-9);
        assert!((report.items()[1].percent() - 0.25).abs() < 1e-9);
        assert!((report.items()[2].percent() - 0.25).abs() < 1e-9);
    }

    #[test]
    fn test_assemble_prefers_declared_total() {
        let report = MetricsReport::assemble(
            ReportKind::Tokens,
            "Tokens",
            "",
            "",
            40,
            vec![MetricRecord::of("x", 10)],
        );
        assert_eq!(report.total_count(), 40);
        assert!((report.get("x").unwrap().percent() - 0.25).abs() < 1e-9);
    }

    #[test]
    fn test_declared_total_below_an_item_is_raised() {
        let report = MetricsReport::assemble(
            ReportKind::Tokens,
            "Tokens",
            "",
            "",
            3,
            vec![MetricRecord::of("x", 9), MetricRecord::of("y", 3)],
        );
        assert_eq!(report.total_count(), 9);
        assert_eq!(report.get("x").unwrap().percent(), 1.0);
        assert!((report.get("y").unwrap().percent() - 1.0 / 3.0).abs() < 1e-9);
    }

    #[test]
    fn test_overlapping_rows_keep_declared_total() {
        let report = MetricsReport::assemble(
            ReportKind::TestMethodNaming,
            "Test naming",
            "",
            "",
            4,
            vec![
                MetricRecord::of("All tests", 4),
                MetricRecord::of("camelCase", 3),
                MetricRecord::of("Is like a phrase", 3),
            ],
        );
        assert_eq!(report.total_count(), 4);
        assert!((report.get("camelCase").unwrap().percent() - 0.75).abs() < 1e-9);
    }

    #[test]
    fn test_zero_total_gives_zero_percent() {
        let report = MetricsReport::assemble(
            ReportKind::Patterns,
            "Patterns",
            "",
            "",
            0,
            vec![MetricRecord::of("a", 0), MetricRecord::of("b", 0)],
        );
        assert_eq!(report.total_count(), 0);
        assert!(report.items().iter().all(|i| i.percent() == 0.0));
    }

    #[test]
    fn test_report_precedence() {
        let naming = MetricsReport::assemble(ReportKind::TestMethodNaming, "B", "", "", 0, vec![]);
        let summary = MetricsReport::assemble(ReportKind::Summary, "Z", "", "", 0, vec![]);
        let tokens_a = MetricsReport::assemble(ReportKind::Tokens, "A", "", "", 0, vec![]);
        let tokens_b = MetricsReport::assemble(ReportKind::Tokens, "B", "", "", 0, vec![]);

        let mut reports = vec![tokens_b.clone(), naming.clone(), tokens_a.clone(), summary.clone()];
        reports.sort_by(MetricsReport::precedence_cmp);
        assert_eq!(reports, vec![summary, naming, tokens_a, tokens_b]);
    }

    #[test]
    fn test_identifier_population_and_qualified_name() {
        let id = Identifier::new("shouldWork").with_owner("UserServiceTest");
        assert_eq!(id.qualified(), "UserServiceTest.shouldWork");
        assert!(id.is_in_population("test"));

        let tagged = Identifier::new("save").with_population("reference");
        assert!(!tagged.is_in_population("test"));
        assert_eq!(tagged.qualified(), "save");
    }

    #[test]
    fn test_report_serializes_kind_id() {
        let report = MetricsReport::assemble(
            ReportKind::SrcVsTest,
            "Source vs Test",
            "",
            "",
            0,
            vec![MetricRecord::of("Tests", 1)],
        );
        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["kind"], "SRC_VS_TEST");
        assert_eq!(json["total_count"], 1);
    }
}
