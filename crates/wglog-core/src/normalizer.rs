//! Normalizer: turns one raw kernel log line into a [`LogRecord`](crate::LogRecord).
//!
//! Stages run in order: arity gate for the tag → classification → arity gate
//! for the remaining fields → message extraction → exclusion filter →
//! timestamp normalisation → peer resolution → record assembly. Every stage
//! is pure; an [`Extractor`] holds nothing but configuration and compiled
//! patterns and can be shared across threads.

use crate::config::ExtractorConfig;
use crate::error::{ExtractError, ExtractResult};
use crate::grammar::{self, Classification, RawLine, HOST, LINE_GRAMMAR, TAG, TIMESTAMP};
use crate::peer::PeerResolver;
use crate::timestamp::TimestampNormalizer;
use crate::types::{Extraction, LogRecord, PeerInfo, SkipReason};
use chrono::NaiveDateTime;

#[derive(Debug, Clone)]
pub struct Extractor {
    subsystem_tag: String,
    excluded_prefix: String,
    strict_peer: bool,
    peers: PeerResolver,
    timestamps: TimestampNormalizer,
}

impl Extractor {
    /// Extractor resolving missing years against today's date.
    pub fn new(config: &ExtractorConfig) -> Self {
        Self::with_timestamps(config, TimestampNormalizer::new(config.year_policy))
    }

    pub fn with_timestamps(config: &ExtractorConfig, timestamps: TimestampNormalizer) -> Self {
        Self {
            subsystem_tag: config.subsystem_tag.clone(),
            excluded_prefix: config.excluded_prefix.clone(),
            strict_peer: config.strict_peer,
            peers: PeerResolver::new(),
            timestamps,
        }
    }

    /// Extract a record from `line`, or report why there is none.
    ///
    /// Lines from other subsystems and excluded messages are `Ok(Skipped)`,
    /// not errors.
    pub fn extract(&self, line: &str) -> ExtractResult<Extraction> {
        let line = RawLine::new(line);

        if grammar::classify(&line, &self.subsystem_tag)? == Classification::NotInteresting {
            return Ok(Extraction::Skipped(SkipReason::OtherSubsystem));
        }
        line.check_all(LINE_GRAMMAR)?;

        let message = grammar::extract_message(&line)?;
        if grammar::is_excluded(&message, &self.excluded_prefix) {
            return Ok(Extraction::Skipped(SkipReason::Excluded));
        }

        let timestamp = self.timestamps.normalize(&line.field(&TIMESTAMP)?.join(" "))?;
        let host = line.token(&HOST)?;
        let application = line.token(&TAG)?.trim_end_matches(':');

        let peer = PeerInfo::from(self.peers.resolve(line.text()));
        if self.strict_peer && peer.is_unresolved() {
            return Err(ExtractError::UnresolvedPeer);
        }

        Ok(Extraction::Record(assemble(timestamp, host, application, message, peer)))
    }
}

/// Pure record construction.
pub fn assemble(
    timestamp: NaiveDateTime,
    host: &str,
    application: &str,
    message: String,
    peer: PeerInfo,
) -> LogRecord {
    LogRecord {
        timestamp,
        host: host.to_string(),
        application: application.to_string(),
        message,
        peer,
    }
}
