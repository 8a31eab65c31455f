//! Analysis pipeline
//!
//! Drives one run over an identifier stream:
//! 1. Partition identifiers into the analyzed population and the rest
//! 2. Build the reference index from the rest (plus any supplied methods)
//! 3. Feed shards of the analyzed population through every model in parallel
//! 4. Merge the shard states and freeze them into reports
//!
//! Shard states merge associatively and rayon reduces them in input order,
//! so the result does not depend on the worker count or shard size.

mod progress;
mod state;

pub use progress::{CancellationToken, Progress, RunContext};

use crate::classify::ReferenceIndex;
use crate::config::MiningConfig;
use crate::convention::infer_convention;
use crate::metrics::{file_types_report, src_vs_test_report, ProjectAnalysis};
use crate::models::{Identifier, MetricRecord, MetricsReport, ReportKind, ScanSummary};
use progress::ProgressCounter;
use rayon::prelude::*;
use state::MiningState;
use thiserror::Error;
use tracing::{debug, info};

/// Identifiers between two progress updates
const PROGRESS_EVERY: u64 = 500;

/// Errors that end a run
#[derive(Error, Debug)]
pub enum MiningError {
    #[error("No identifiers found in population '{population}'")]
    NoIdentifiers { population: String },

    #[error("Analysis cancelled")]
    Cancelled,

    #[error("Project label must not be empty")]
    EmptyProjectLabel,

    #[error("Invalid configuration: {0}")]
    Config(String),

    #[error("Failed to start worker pool: {0}")]
    ThreadPool(#[from] rayon::ThreadPoolBuildError),
}

pub type MiningResult<T> = Result<T, MiningError>;

/// Everything the source enumerator hands to a run.
#[derive(Debug, Clone, Default)]
pub struct AnalysisInput {
    pub project_label: String,
    pub identifiers: Vec<Identifier>,
    /// Extra reference methods (name + owner) that are never analyzed
    pub reference_methods: Vec<Identifier>,
    /// File counts from the traversal, if one was done
    pub scan: Option<ScanSummary>,
}

impl AnalysisInput {
    pub fn new(project_label: impl Into<String>, identifiers: Vec<Identifier>) -> Self {
        Self {
            project_label: project_label.into(),
            identifiers,
            ..Default::default()
        }
    }

    pub fn with_reference_methods(mut self, methods: Vec<Identifier>) -> Self {
        self.reference_methods = methods;
        self
    }

    pub fn with_scan(mut self, scan: ScanSummary) -> Self {
        self.scan = Some(scan);
        self
    }
}

/// Population sizes of one run, reported in the summary.
struct RunCounts {
    supplied: u64,
    analyzed: u64,
    reference: u64,
    skipped: u64,
}

/// Runs the mining pipeline with a fixed configuration.
#[derive(Debug, Clone, Default)]
pub struct Analyzer {
    config: MiningConfig,
}

impl Analyzer {
    pub fn new(config: MiningConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &MiningConfig {
        &self.config
    }

    /// Run one analysis.
    ///
    /// Cancellation is checked between identifiers; a cancelled run returns
    /// [`MiningError::Cancelled`] and no partial result.
    pub fn run(&self, input: AnalysisInput, ctx: &RunContext) -> MiningResult<ProjectAnalysis> {
        let label = input.project_label.trim();
        if label.is_empty() {
            return Err(MiningError::EmptyProjectLabel);
        }
        self.config.validate().map_err(MiningError::Config)?;
        if ctx.is_cancelled() {
            return Err(MiningError::Cancelled);
        }

        let population = self.config.analyzed_population.as_str();
        ctx.report(Progress::message("Partitioning identifiers…"));
        let (analyzed, others): (Vec<&Identifier>, Vec<&Identifier>) = input
            .identifiers
            .iter()
            .partition(|id| id.is_in_population(population));

        if analyzed.is_empty() {
            return Err(MiningError::NoIdentifiers {
                population: population.to_string(),
            });
        }

        let mut index = ReferenceIndex::from_identifiers(&input.identifiers, population);
        for method in &input.reference_methods {
            if let Some(owner) = method.owner.as_deref() {
                index.insert(owner, &method.name);
            }
        }

        info!(
            "Mining {} identifiers of '{}' ({} others, {} reference classes)",
            analyzed.len(),
            population,
            others.len(),
            index.len()
        );

        let state = self.process(&analyzed, &index, ctx)?;

        let counts = RunCounts {
            supplied: input.identifiers.len() as u64,
            analyzed: analyzed.len() as u64,
            reference: others.len() as u64,
            skipped: state.skipped,
        };
        if counts.skipped > 0 {
            debug!("Skipped {} identifiers without tokens", counts.skipped);
        }

        ctx.report(Progress::message("Assembling reports…"));
        let analysis = self.freeze(label, state, &counts, input.scan.as_ref());
        info!("Built {} reports for {}", analysis.reports().len(), label);
        Ok(analysis)
    }

    /// Feed the analyzed identifiers through a fresh state per shard and
    /// reduce the shard states.
    fn process(
        &self,
        analyzed: &[&Identifier],
        index: &ReferenceIndex,
        ctx: &RunContext,
    ) -> MiningResult<MiningState> {
        let config = &self.config;
        let counter = ProgressCounter::new(ctx, analyzed.len() as u64, PROGRESS_EVERY);

        let shard = |chunk: &[&Identifier]| -> MiningResult<MiningState> {
            let mut state = MiningState::new(config);
            for id in chunk {
                if ctx.is_cancelled() {
                    return Err(MiningError::Cancelled);
                }
                state.accept(id, index.siblings_for(id.owner.as_deref()));
                counter.tick();
            }
            Ok(state)
        };

        if config.workers == 1 {
            debug!("Processing sequentially, shard size {}", config.shard_size);
            return analyzed
                .chunks(config.shard_size)
                .try_fold(MiningState::new(config), |acc, chunk| Ok(acc.merge(shard(chunk)?)));
        }

        let parallel = || {
            analyzed
                .par_chunks(config.shard_size)
                .map(&shard)
                .try_reduce(|| MiningState::new(config), |a, b| Ok(a.merge(b)))
        };

        let state = if config.workers > 1 {
            let pool = rayon::ThreadPoolBuilder::new()
                .num_threads(config.workers)
                .build()?;
            pool.install(parallel)?
        } else {
            parallel()?
        };
        debug!(
            "Merged {} shards of up to {} identifiers",
            analyzed.len().div_ceil(config.shard_size),
            config.shard_size
        );
        Ok(state)
    }

    fn freeze(
        &self,
        label: &str,
        state: MiningState,
        counts: &RunCounts,
        scan: Option<&ScanSummary>,
    ) -> ProjectAnalysis {
        let config = &self.config;
        let mut analysis = ProjectAnalysis::new(label);

        analysis.add_report(summary_report(counts, &config.analyzed_population));
        if let Some(scan) = scan {
            analysis.add_report(file_types_report(scan, config.file_types_top_k));
            analysis.add_report(src_vs_test_report(scan));
        }
        analysis.add_report(state.naming.report());
        analysis.add_report(state.tokens.report(config.top_k));
        analysis.add_report(state.patterns.report(config.top_k));
        analysis.add_report(state.ngrams.bigram_report(config.top_k));
        analysis.add_report(
            state
                .ngrams
                .trigram_report(config.top_k, config.greedy_max_tokens),
        );

        analysis.convention = Some(infer_convention(&state.naming));
        analysis.pattern_summary = state.patterns.dominant().map(|template| {
            format!(
                "{} ({} of {} anchored names)",
                template,
                state.patterns.count(&template),
                state.patterns.anchored()
            )
        });

        let greedy = state.ngrams.generate_greedy(config.greedy_max_tokens);
        if !greedy.is_empty() {
            analysis.ngram_summary = Some(greedy.join(" "));
        }

        analysis
    }
}

fn summary_report(counts: &RunCounts, population: &str) -> MetricsReport {
    MetricsReport::assemble(
        ReportKind::Summary,
        "Summary",
        format!("{} of {} identifiers analyzed", counts.analyzed, counts.supplied),
        format!(
            "Identifiers outside the '{}' population are only used to find same-named \
             source methods. Skipped identifiers produced no tokens.",
            population
        ),
        counts.supplied,
        vec![
            MetricRecord::of("Identifiers supplied", counts.supplied),
            MetricRecord::of("Analyzed", counts.analyzed),
            MetricRecord::of("Reference", counts.reference),
            MetricRecord::of("Skipped (no tokens)", counts.skipped),
        ],
    )
}
