//! The output of one analysis run

use crate::models::{ConventionSummary, MetricsReport, ReportKind};
use serde::Serialize;
use std::collections::BTreeMap;

/// Reports keyed by kind, plus the human-readable summary pieces.
#[derive(Debug, Clone, Serialize)]
pub struct ProjectAnalysis {
    pub project_label: String,
    reports: BTreeMap<ReportKind, MetricsReport>,
    pub convention: Option<ConventionSummary>,
    /// Greedy "most likely name" produced by the n-gram model
    pub ngram_summary: Option<String>,
    /// One-line description of the dominant pattern
    pub pattern_summary: Option<String>,
}

impl ProjectAnalysis {
    pub fn new(project_label: impl Into<String>) -> Self {
        Self {
            project_label: project_label.into(),
            reports: BTreeMap::new(),
            convention: None,
            ngram_summary: None,
            pattern_summary: None,
        }
    }

    /// Insert a report, replacing any previous report of the same kind.
    pub fn add_report(&mut self, report: MetricsReport) {
        self.reports.insert(report.kind, report);
    }

    pub fn report(&self, kind: ReportKind) -> Option<&MetricsReport> {
        self.reports.get(&kind)
    }

    /// Look a report up by its string id (`"TOKENS"`, `"PATTERNS"`, ...).
    pub fn report_by_id(&self, id: &str) -> Option<&MetricsReport> {
        self.reports.values().find(|r| r.kind.id() == id)
    }

    pub fn reports(&self) -> &BTreeMap<ReportKind, MetricsReport> {
        &self.reports
    }

    /// Reports in display order.
    pub fn sorted_reports(&self) -> Vec<&MetricsReport> {
        let mut reports: Vec<&MetricsReport> = self.reports.values().collect();
        reports.sort_by(|a, b| a.precedence_cmp(b));
        reports
    }

    pub fn pretty_summary(&self) -> String {
        let mut out = String::new();
        out.push_str(&format!("Project: {}\n\n", self.project_label));

        if let Some(convention) = &self.convention {
            out.push_str("De-facto convention:\n");
            out.push_str(&format!("  {}\n", convention.headline));
            out.push_str(&format!("  {}\n", convention.rationale));
        }
        if let Some(pattern) = &self.pattern_summary {
            out.push_str(&format!("Dominant pattern: {}\n", pattern));
        }
        if let Some(ngram) = &self.ngram_summary {
            out.push_str(&format!("Most likely name: {}\n", ngram));
        }

        out
    }
}
