//! Pipeline: drives lines from a feed through the extractor into a sink.
//!
//! ```text
//! LineFeed ──► Extractor ──► RecordSerializer ──► sink
//! ```
//!
//! [`Pipeline::run`] is strictly sequential. [`Pipeline::run_concurrent`]
//! numbers batches of lines at intake, fans them out to tokio tasks and
//! writes results back through a sequence-keyed reorder buffer, so both
//! modes produce byte-identical output.
//!
//! Per-line failures are logged and counted; only feed, sink and
//! serialization failures end a run.

use anyhow::Context;
use std::collections::BTreeMap;
use std::io::Write;
use std::sync::Arc;
use tokio::task::JoinSet;
use wglog_core::{ExtractError, ExtractResult, Extraction, Extractor, RecordSerializer, SkipReason};
use wglog_feeds::LineFeed;

/// Lines per batch handed to a worker task.
pub const DEFAULT_BATCH_SIZE: usize = 512;
/// Emit a progress event every this many records.
pub const DEFAULT_PROGRESS_EVERY: u64 = 10_000;
/// Upper bound on worker threads in [`Pipeline::run_concurrent`].
pub const MAX_WORKERS: usize = 64;

/// Counters for one run. Diagnostic only.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunStats {
    pub lines_read: u64,
    pub records: u64,
    pub other_subsystem: u64,
    pub excluded: u64,
    pub malformed: u64,
    pub bad_timestamps: u64,
    pub unresolved_peers: u64,
}

impl RunStats {
    /// Lines dropped because of a recoverable error.
    pub fn rejected(&self) -> u64 {
        self.malformed + self.bad_timestamps + self.unresolved_peers
    }
}

impl std::fmt::Display for RunStats {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} lines read, {} records, {} other-subsystem, {} excluded, {} rejected",
            self.lines_read,
            self.records,
            self.other_subsystem,
            self.excluded,
            self.rejected()
        )
    }
}

/// A line after extraction and serialization.
#[derive(Debug)]
enum Processed {
    Emitted(String),
    Skipped(SkipReason),
}

/// Extraction plus serialization; shared read-only by all workers.
#[derive(Debug)]
struct Stage {
    extractor: Extractor,
    serializer: RecordSerializer,
}

impl Stage {
    fn process(&self, line: &str) -> ExtractResult<Processed> {
        match self.extractor.extract(line)? {
            Extraction::Record(record) => Ok(Processed::Emitted(self.serializer.serialize(&record)?)),
            Extraction::Skipped(reason) => Ok(Processed::Skipped(reason)),
        }
    }
}

/// Lines `first_line..first_line + lines.len()` of the feed.
struct Batch {
    seq: u64,
    first_line: u64,
    lines: Vec<String>,
}

struct Done {
    seq: u64,
    first_line: u64,
    outcomes: Vec<ExtractResult<Processed>>,
}

pub struct Pipeline {
    stage: Arc<Stage>,
    batch_size: usize,
    progress_every: u64,
}

impl Pipeline {
    pub fn new(extractor: Extractor, serializer: RecordSerializer) -> Self {
        Self {
            stage: Arc::new(Stage {
                extractor,
                serializer,
            }),
            batch_size: DEFAULT_BATCH_SIZE,
            progress_every: DEFAULT_PROGRESS_EVERY,
        }
    }

    pub fn with_batch_size(mut self, batch_size: usize) -> Self {
        self.batch_size = batch_size.max(1);
        self
    }

    pub fn with_progress_every(mut self, every: u64) -> Self {
        self.progress_every = every.max(1);
        self
    }

    /// Process every line of `feed` in order on the calling thread.
    pub fn run(&self, feed: &mut dyn LineFeed, sink: &mut dyn Write) -> anyhow::Result<RunStats> {
        let mut stats = RunStats::default();
        tracing::info!(feed = feed.name(), "extraction started");

        while let Some(line) = feed.next_line()? {
            stats.lines_read += 1;
            let outcome = self.stage.process(&line);
            self.commit(stats.lines_read, outcome, sink, &mut stats)?;
        }

        sink.flush().context("failed to flush output")?;
        tracing::info!(feed = feed.name(), %stats, "extraction finished");
        Ok(stats)
    }

    /// Process `feed` on `workers` tokio tasks, at most [`MAX_WORKERS`].
    /// Output order still follows input order. Falls back to
    /// [`Pipeline::run`] for a single worker.
    pub fn run_concurrent(
        &self,
        feed: &mut dyn LineFeed,
        sink: &mut dyn Write,
        workers: usize,
    ) -> anyhow::Result<RunStats> {
        if workers <= 1 {
            return self.run(feed, sink);
        }
        if workers > MAX_WORKERS {
            tracing::warn!(requested = workers, max = MAX_WORKERS, "clamping worker count");
        }
        let workers = workers.min(MAX_WORKERS);

        let runtime = tokio::runtime::Builder::new_multi_thread()
            .worker_threads(workers)
            .thread_name("wglog-worker")
            .build()
            .context("failed to start worker runtime")?;
        runtime.block_on(self.run_workers(feed, sink, workers))
    }

    async fn run_workers(
        &self,
        feed: &mut dyn LineFeed,
        sink: &mut dyn Write,
        workers: usize,
    ) -> anyhow::Result<RunStats> {
        let mut stats = RunStats::default();
        let mut tasks: JoinSet<Done> = JoinSet::new();
        let mut reorder: BTreeMap<u64, Done> = BTreeMap::new();
        let max_in_flight = workers * 2;
        let mut next_seq = 0u64;
        let mut next_to_write = 0u64;
        let mut lines_read = 0u64;
        let mut exhausted = false;

        tracing::info!(feed = feed.name(), workers, batch_size = self.batch_size, "extraction started");

        loop {
            while !exhausted && tasks.len() + reorder.len() < max_in_flight {
                let mut batch = Batch {
                    seq: next_seq,
                    first_line: lines_read + 1,
                    lines: Vec::with_capacity(self.batch_size),
                };
                while batch.lines.len() < self.batch_size {
                    match feed.next_line()? {
                        Some(line) => batch.lines.push(line),
                        None => {
                            exhausted = true;
                            break;
                        }
                    }
                }
                if batch.lines.is_empty() {
                    break;
                }
                lines_read += batch.lines.len() as u64;
                next_seq += 1;

                let stage = Arc::clone(&self.stage);
                tasks.spawn(async move {
                    let outcomes = batch.lines.iter().map(|line| stage.process(line)).collect();
                    Done {
                        seq: batch.seq,
                        first_line: batch.first_line,
                        outcomes,
                    }
                });
            }

            let Some(joined) = tasks.join_next().await else {
                break;
            };
            let done = joined.context("worker task failed")?;
            reorder.insert(done.seq, done);

            while let Some(done) = reorder.remove(&next_to_write) {
                tracing::trace!(seq = done.seq, lines = done.outcomes.len(), "writing batch");
                for (offset, outcome) in done.outcomes.into_iter().enumerate() {
                    stats.lines_read += 1;
                    self.commit(done.first_line + offset as u64, outcome, sink, &mut stats)?;
                }
                next_to_write += 1;
            }
        }

        debug_assert!(reorder.is_empty(), "batches left in reorder buffer");
        sink.flush().context("failed to flush output")?;
        tracing::info!(feed = feed.name(), %stats, "extraction finished");
        Ok(stats)
    }

    /// Write or account for the outcome of line `line_no`.
    fn commit(
        &self,
        line_no: u64,
        outcome: ExtractResult<Processed>,
        sink: &mut dyn Write,
        stats: &mut RunStats,
    ) -> anyhow::Result<()> {
        match outcome {
            Ok(Processed::Emitted(text)) => {
                sink.write_all(text.as_bytes())
                    .with_context(|| format!("failed to write record for line {line_no}"))?;
                stats.records += 1;
                tracing::trace!(line_no, record = stats.records, "record written");
                if stats.records % self.progress_every == 0 {
                    tracing::info!(records = stats.records, lines_read = stats.lines_read, "progress");
                }
            }
            Ok(Processed::Skipped(SkipReason::OtherSubsystem)) => stats.other_subsystem += 1,
            Ok(Processed::Skipped(SkipReason::Excluded)) => {
                stats.excluded += 1;
                tracing::trace!(line_no, "excluded message skipped");
            }
            Err(err @ ExtractError::MalformedLine { .. }) => {
                stats.malformed += 1;
                tracing::debug!(line_no, kind = err.kind(), error = %err, "skipping line");
            }
            Err(err @ ExtractError::TimestampParse { .. }) => {
                stats.bad_timestamps += 1;
                tracing::warn!(line_no, kind = err.kind(), error = %err, "skipping line");
            }
            Err(err @ ExtractError::UnresolvedPeer) => {
                stats.unresolved_peers += 1;
                tracing::warn!(line_no, kind = err.kind(), error = %err, "skipping line");
            }
            Err(err) => {
                return Err(err).with_context(|| format!("line {line_no}"));
            }
        }
        Ok(())
    }
}
