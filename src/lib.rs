//! wglog: WireGuard kernel log extractor.
//!
//! Scans a kernel log, keeps the lines emitted by the WireGuard module and
//! rewrites each one as a syslog-shaped JSON record. The extraction core
//! lives in [`wglog_core`], line sources and sinks in [`wglog_feeds`]; this
//! crate holds the driver that connects them.
//!
//! # Architecture
//!
//! ```text
//! Feed ──► Extractor ──► Serializer ──► Sink
//!            │
//!            └──► RunStats (diagnostic)
//! ```
//!
//! The default run is single-threaded. With more than one worker, batches
//! are processed on tokio tasks and re-ordered before they reach the sink.

pub mod pipeline;

pub use pipeline::{Pipeline, RunStats, MAX_WORKERS};
