//! naming-miner - Convention mining over method identifiers
//!
//! Turns a stream of identifiers (typically test method names) into ranked,
//! percentage-annotated reports describing how a project names things:
//! which tokens recur, which naming rules hold, which phrase templates
//! dominate, and which word sequences are most likely.
//!
//! Reading source files is left to the caller. Identifiers arrive already
//! extracted, tagged with a population and an owner class.
//!
//! ```rust,ignore
//! use naming_miner::{AnalysisInput, Analyzer, Identifier, MiningConfig, RunContext};
//!
//! let ids = vec![Identifier::new("shouldReturnTrue").with_population("test")];
//! let analysis = Analyzer::new(MiningConfig::default())
//!     .run(AnalysisInput::new("demo", ids), &RunContext::new())?;
//! println!("{}", analysis.pretty_summary());
//! ```

pub mod classify;
pub mod config;
pub mod convention;
pub mod metrics;
pub mod models;
pub mod ngram;
pub mod patterns;
pub mod pipeline;
pub mod tokens;

pub use config::{load_mining_config, MiningConfig};
pub use metrics::ProjectAnalysis;
pub use models::{
    ConventionSummary, Identifier, MetricRecord, MetricsReport, ReportKind, ScanSummary,
};
pub use patterns::PatternMode;
pub use pipeline::{
    AnalysisInput, Analyzer, CancellationToken, MiningError, MiningResult, Progress, RunContext,
};
