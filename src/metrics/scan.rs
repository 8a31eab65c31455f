//! Reports over the file counts supplied by the traversal collaborator

use crate::models::{MetricRecord, MetricsReport, ReportKind, ScanSummary};

/// Top extensions by file count.
pub fn file_types_report(scan: &ScanSummary, top_k: usize) -> MetricsReport {
    let mut items: Vec<MetricRecord> = scan
        .extension_counts
        .iter()
        .map(|(ext, count)| MetricRecord::of(ext.clone(), *count))
        .collect();
    items.sort_by(MetricRecord::rank_cmp);
    items.truncate(top_k);

    MetricsReport::assemble(
        ReportKind::FileTypes,
        format!("File Types (Top {})", top_k),
        "Top file extensions by count (useful to understand the project composition).",
        "",
        scan.total_files,
        items,
    )
}

/// Breakdown of files into production sources vs test sources.
pub fn src_vs_test_report(scan: &ScanSummary) -> MetricsReport {
    let items = vec![
        MetricRecord::of("Total files", scan.total_files),
        MetricRecord::of("Sources", scan.source_files),
        MetricRecord::of("Tests", scan.test_files),
    ];

    MetricsReport::assemble(
        ReportKind::SrcVsTest,
        "Source vs Test",
        "Breakdown of files into production sources vs test sources.",
        "",
        scan.total_files,
        items,
    )
}
