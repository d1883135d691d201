//! Core types for wglog-core.
//!
//! This module defines the data structures shared by the extractor, the
//! serializer and the driver: the normalised [`LogRecord`], the peer
//! information attached to it, and the [`Extraction`] outcome of a single
//! line.

use chrono::NaiveDateTime;
use std::net::Ipv4Addr;

/// A normalised record produced from one WireGuard kernel log line.
///
/// Records are serialized as soon as they are produced; nothing downstream
/// keeps them around.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogRecord {
    /// Timestamp from the line header. Syslog headers carry neither year nor
    /// offset, so this stays naive.
    pub timestamp: NaiveDateTime,
    /// Host that wrote the kernel log line.
    pub host: String,
    /// Subsystem that emitted the line, without its trailing `:`.
    pub application: String,
    /// Free-form message, tokens joined by a single space.
    pub message: String,
    /// Peer identification, best-effort.
    pub peer: PeerInfo,
}

/// Remote endpoint of a WireGuard peer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PeerAddress {
    pub ip: Ipv4Addr,
    pub port: u16,
}

impl std::fmt::Display for PeerAddress {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{}", self.ip, self.port)
    }
}

/// Peer fields of a record. `None` means the line did not say.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PeerInfo {
    pub peer_number: Option<u16>,
    pub peer_address: Option<PeerAddress>,
}

impl PeerInfo {
    /// True when neither the number nor the address could be resolved.
    pub fn is_unresolved(&self) -> bool {
        self.peer_number.is_none() && self.peer_address.is_none()
    }
}

/// Which peer shape a line matched. Recognisers run in declaration order and
/// the first one that matches wins.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PeerShape {
    /// `peer 296 (90.253.165.83:51722)`
    Full { number: u16, address: PeerAddress },
    /// `... for peer 264` at end of line
    NumberOnly { number: u16 },
    /// `Invalid handshake response from 109.201.133.24:3000`
    AddressOnly { address: PeerAddress },
    /// Nothing recognisable.
    Unknown,
}

impl From<PeerShape> for PeerInfo {
    fn from(shape: PeerShape) -> Self {
        match shape {
            PeerShape::Full { number, address } => PeerInfo {
                peer_number: Some(number),
                peer_address: Some(address),
            },
            PeerShape::NumberOnly { number } => PeerInfo {
                peer_number: Some(number),
                peer_address: None,
            },
            PeerShape::AddressOnly { address } => PeerInfo {
                peer_number: None,
                peer_address: Some(address),
            },
            PeerShape::Unknown => PeerInfo::default(),
        }
    }
}

/// Why a well-formed line produced no record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SkipReason {
    /// Token 6 is not the configured subsystem tag.
    OtherSubsystem,
    /// Message starts with the excluded prefix (`Keypair ...`).
    Excluded,
}

impl std::fmt::Display for SkipReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SkipReason::OtherSubsystem => write!(f, "other-subsystem"),
            SkipReason::Excluded => write!(f, "excluded"),
        }
    }
}

/// Outcome of running the extractor over one line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Extraction {
    Record(LogRecord),
    Skipped(SkipReason),
}

impl Extraction {
    pub fn record(&self) -> Option<&LogRecord> {
        match self {
            Extraction::Record(record) => Some(record),
            Extraction::Skipped(_) => None,
        }
    }

    pub fn into_record(self) -> Option<LogRecord> {
        match self {
            Extraction::Record(record) => Some(record),
            Extraction::Skipped(_) => None,
        }
    }
}
