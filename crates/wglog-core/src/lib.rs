//! wglog-core: extraction core for wglog.
//!
//! This crate turns single WireGuard kernel log lines into normalised
//! records and serializes them. It performs no I/O of its own apart from
//! loading configuration.
//!
//! # Architecture
//!
//! ```text
//! line ──► grammar (classify, message, exclusion) ──► timestamp ──► peer ──► assemble ──► export
//! ```
//!
//! Every stage is a pure function of its input and the configuration, so an
//! [`Extractor`] can be shared by any number of workers.

pub mod config;
pub mod error;
pub mod export;
pub mod grammar;
pub mod normalizer;
pub mod peer;
pub mod timestamp;
pub mod types;

pub use config::Config;
pub use error::{ExtractError, ExtractResult};
pub use export::RecordSerializer;
pub use normalizer::Extractor;
pub use types::{Extraction, LogRecord, PeerAddress, PeerInfo, PeerShape, SkipReason};
