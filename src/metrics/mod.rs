//! Metric aggregation
//!
//! Every counting table in the crate (tokens, patterns, naming rules) is a
//! [`MetricTable`], and every key collision goes through [`merge_records`].
//! Because that reducer is associative and commutative on counts, partial
//! tables built on different workers can be merged in any grouping.

mod analysis;
mod scan;

pub use analysis::ProjectAnalysis;
pub use scan::{file_types_report, src_vs_test_report};

use crate::models::MetricRecord;
use rustc_hash::FxHashMap;

/// Default cap on sample lines kept per record
pub const DEFAULT_MAX_SAMPLE_LINES: usize = 20;

/// `count / total`, or 0.0 when `total` is 0.
pub fn ratio(count: u64, total: u64) -> f64 {
    if total == 0 {
        return 0.0;
    }
    count as f64 / total as f64
}

/// Join the lines of `a` then `b`, keeping at most `max_lines` lines.
pub fn concat_with_max_lines(a: &str, b: &str, max_lines: usize) -> String {
    let mut out = String::with_capacity(a.len() + b.len() + 1);
    for (i, line) in a.lines().chain(b.lines()).take(max_lines).enumerate() {
        if i > 0 {
            out.push('\n');
        }
        out.push_str(line);
    }
    out
}

/// Combine two records that share a key.
///
/// Counts are summed; samples are concatenated and capped. The cap is never
/// below one line so each key keeps at least one example.
pub fn merge_records(existing: MetricRecord, incoming: MetricRecord, max_lines: usize) -> MetricRecord {
    let sample = concat_with_max_lines(&existing.sample, &incoming.sample, max_lines.max(1));
    MetricRecord::new(existing.name, existing.count + incoming.count, sample)
}

/// A keyed counting table with bounded sample text.
#[derive(Debug, Clone)]
pub struct MetricTable {
    records: FxHashMap<String, MetricRecord>,
    max_sample_lines: usize,
}

impl MetricTable {
    pub fn new(max_sample_lines: usize) -> Self {
        Self {
            records: FxHashMap::default(),
            max_sample_lines: max_sample_lines.max(1),
        }
    }

    /// Count one occurrence of `key` with `sample` as its example line.
    pub fn record(&mut self, key: &str, sample: &str) {
        self.add(MetricRecord::new(key, 1, sample));
    }

    /// Fold a record into the table, merging on key collision.
    pub fn add(&mut self, incoming: MetricRecord) {
        let max = self.max_sample_lines;
        match self.records.remove(&incoming.name) {
            Some(existing) => {
                let merged = merge_records(existing, incoming, max);
                self.records.insert(merged.name.clone(), merged);
            }
            None => {
                let capped = MetricRecord::new(
                    incoming.name,
                    incoming.count,
                    concat_with_max_lines(&incoming.sample, "", max),
                );
                self.records.insert(capped.name.clone(), capped);
            }
        }
    }

    /// Merge every record of `other` into this table.
    pub fn merge(&mut self, other: MetricTable) {
        for (_, record) in other.records {
            self.add(record);
        }
    }

    pub fn get(&self, key: &str) -> Option<&MetricRecord> {
        self.records.get(key)
    }

    pub fn count(&self, key: &str) -> u64 {
        self.records.get(key).map_or(0, |r| r.count)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Sum of all counts in the table.
    pub fn total_count(&self) -> u64 {
        self.records.values().map(|r| r.count).sum()
    }

    /// All records, count descending then name ascending.
    pub fn ranked(&self) -> Vec<MetricRecord> {
        let mut items: Vec<MetricRecord> = self.records.values().cloned().collect();
        items.sort_by(MetricRecord::rank_cmp);
        items
    }

    /// The first `k` records of [`ranked`](Self::ranked).
    pub fn top_k(&self, k: usize) -> Vec<MetricRecord> {
        let mut items = self.ranked();
        items.truncate(k);
        items
    }
}

impl Default for MetricTable {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_SAMPLE_LINES)
    }
}
