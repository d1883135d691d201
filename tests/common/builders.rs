//! Test builders: ergonomic constructors for extractors, pipelines and
//! expected records.
//!
//! These builders are designed for readability in test assertions, not for
//! production use. They panic on invalid input rather than returning `Result`.

use chrono::{NaiveDate, NaiveDateTime};
use std::net::Ipv4Addr;
use wglog::Pipeline;
use wglog_core::config::{ExtractorConfig, OutputConfig, YearPolicy};
use wglog_core::timestamp::TimestampNormalizer;
use wglog_core::{Extractor, LogRecord, PeerAddress, PeerInfo, RecordSerializer};

/// Reference date for year resolution in every harness.
pub fn reference_date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2020, 8, 1).unwrap()
}

pub fn extractor_with(config: &ExtractorConfig) -> Extractor {
    Extractor::with_timestamps(
        config,
        TimestampNormalizer::with_reference(config.year_policy, reference_date()),
    )
}

/// Extractor with default config and the fixed reference date.
pub fn extractor() -> Extractor {
    extractor_with(&ExtractorConfig::default())
}

pub fn pipeline_with(output: OutputConfig) -> Pipeline {
    Pipeline::new(extractor(), RecordSerializer::new(output))
}

/// Pipeline with default config and the fixed reference date.
pub fn pipeline() -> Pipeline {
    pipeline_with(OutputConfig::default())
}

pub fn addr(ip: [u8; 4], port: u16) -> PeerAddress {
    PeerAddress {
        ip: Ipv4Addr::from(ip),
        port,
    }
}

pub fn ts(year: i32, month: u32, day: u32, h: u32, m: u32, s: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(year, month, day)
        .unwrap()
        .and_hms_opt(h, m, s)
        .unwrap()
}

// ---------------------------------------------------------------------------
// LogRecordBuilder
// ---------------------------------------------------------------------------

/// Fluent builder for expected [`LogRecord`] values.
///
/// # Example
///
/// ```rust
/// let record = LogRecordBuilder::new("Interface created")
///     .peer_number(296)
///     .peer_address(addr([90, 253, 165, 83], 51722))
///     .build();
/// ```
pub struct LogRecordBuilder {
    timestamp: NaiveDateTime,
    host: String,
    application: String,
    message: String,
    peer: PeerInfo,
}

impl LogRecordBuilder {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            timestamp: ts(2020, 7, 22, 14, 13, 18),
            host: "vpn-gw-1".to_string(),
            application: "wireguard".to_string(),
            message: message.into(),
            peer: PeerInfo::default(),
        }
    }

    pub fn timestamp(mut self, timestamp: NaiveDateTime) -> Self {
        self.timestamp = timestamp;
        self
    }

    pub fn host(mut self, host: impl Into<String>) -> Self {
        self.host = host.into();
        self
    }

    pub fn application(mut self, application: impl Into<String>) -> Self {
        self.application = application.into();
        self
    }

    pub fn peer_number(mut self, number: u16) -> Self {
        self.peer.peer_number = Some(number);
        self
    }

    pub fn peer_address(mut self, address: PeerAddress) -> Self {
        self.peer.peer_address = Some(address);
        self
    }

    pub fn build(self) -> LogRecord {
        LogRecord {
            timestamp: self.timestamp,
            host: self.host,
            application: self.application,
            message: self.message,
            peer: self.peer,
        }
    }
}

/// Extractor config with the given year policy.
pub fn with_year_policy(policy: YearPolicy) -> ExtractorConfig {
    ExtractorConfig {
        year_policy: policy,
        ..ExtractorConfig::default()
    }
}
