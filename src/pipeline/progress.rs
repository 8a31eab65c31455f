//! Progress reporting and cooperative cancellation

use crossbeam_channel::Sender;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::Arc;

/// One progress update: a message plus an optional `current / max` pair.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Progress {
    pub message: String,
    pub max: Option<u64>,
    pub current: Option<u64>,
}

impl Progress {
    pub fn message(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            max: None,
            current: None,
        }
    }

    pub fn step(message: impl Into<String>, current: u64, max: u64) -> Self {
        Self {
            message: message.into(),
            max: Some(max),
            current: Some(current),
        }
    }
}

/// Shared cancel flag, checked between identifiers.
#[derive(Debug, Clone, Default)]
pub struct CancellationToken {
    cancelled: Arc<AtomicBool>,
}

impl CancellationToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::Relaxed);
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::Relaxed)
    }
}

/// Everything a run needs from its caller besides the input itself.
#[derive(Debug, Clone, Default)]
pub struct RunContext {
    progress: Option<Sender<Progress>>,
    cancel: CancellationToken,
}

impl RunContext {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_progress(mut self, sender: Sender<Progress>) -> Self {
        self.progress = Some(sender);
        self
    }

    pub fn with_cancellation(mut self, token: CancellationToken) -> Self {
        self.cancel = token;
        self
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancel.is_cancelled()
    }

    /// Send without blocking. A full or disconnected channel drops the update.
    pub fn report(&self, progress: Progress) {
        if let Some(tx) = &self.progress {
            let _ = tx.try_send(progress);
        }
    }
}

/// Identifier counter shared by all shards of a run.
pub(crate) struct ProgressCounter<'a> {
    ctx: &'a RunContext,
    done: AtomicU64,
    total: u64,
    every: u64,
}

impl<'a> ProgressCounter<'a> {
    pub(crate) fn new(ctx: &'a RunContext, total: u64, every: u64) -> Self {
        Self {
            ctx,
            done: AtomicU64::new(0),
            total,
            every: every.max(1),
        }
    }

    pub(crate) fn tick(&self) {
        let done = self.done.fetch_add(1, Ordering::Relaxed) + 1;
        if done % self.every == 0 || done == self.total {
            self.ctx.report(Progress::step(
                format!("Analyzing identifiers… {}/{}", done, self.total),
                done,
                self.total,
            ));
        }
    }
}
