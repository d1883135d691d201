//! Peer resolution: recognise which of the known peer shapes a line carries.
//!
//! WireGuard prints peers as `peer <id> (<ip>:<port>)`, as a bare
//! `peer <id>` at the end of a message, or, for handshake failures, only as
//! `<ip>:<port>`. One recogniser per shape runs in a fixed priority order and
//! the first one that matches decides the [`PeerShape`].
//!
//! Peer ids must be exactly three digits. Addresses must parse as an
//! [`Ipv4Addr`] and a `u16` port; a candidate that does not is treated as no
//! match for that shape.

use crate::types::{PeerAddress, PeerShape};
use regex::{Captures, Regex};
use std::net::Ipv4Addr;

/// `peer 296 (90.253.165.83:51722)` anywhere in the line.
const FULL_PATTERN: &str = r"\bpeer\s(\d{3})\s\((\d+\.\d+\.\d+\.\d+):(\d+)\)";
/// `peer 264` closing the line.
const NUMBER_ONLY_PATTERN: &str = r"\bpeer\s(\d{3})$";
/// First `ip:port` in the line.
const ADDRESS_PATTERN: &str = r"\b(\d+\.\d+\.\d+\.\d+):(\d+)\b";
/// Lines mentioning this carry an address but no peer id.
const ADDRESS_ONLY_TRIGGER: &str = "Invalid";

type Recogniser = fn(&PeerResolver, &str) -> Option<PeerShape>;

/// Recognisers in priority order.
const RECOGNISERS: &[Recogniser] = &[
    PeerResolver::full,
    PeerResolver::number_only,
    PeerResolver::address_only,
];

#[derive(Debug, Clone)]
pub struct PeerResolver {
    full: Regex,
    number_only: Regex,
    address: Regex,
}

impl Default for PeerResolver {
    fn default() -> Self {
        Self::new()
    }
}

impl PeerResolver {
    pub fn new() -> Self {
        Self {
            full: Regex::new(FULL_PATTERN).expect("full peer pattern must compile"),
            number_only: Regex::new(NUMBER_ONLY_PATTERN)
                .expect("number-only peer pattern must compile"),
            address: Regex::new(ADDRESS_PATTERN).expect("address pattern must compile"),
        }
    }

    /// Resolve the peer shape of `line`. The line must not carry its
    /// terminator, otherwise the end-anchored shape never matches.
    pub fn resolve(&self, line: &str) -> PeerShape {
        RECOGNISERS
            .iter()
            .find_map(|recognise| recognise(self, line))
            .unwrap_or(PeerShape::Unknown)
    }

    fn full(&self, line: &str) -> Option<PeerShape> {
        let caps = self.full.captures(line)?;
        Some(PeerShape::Full {
            number: peer_number(&caps, 1)?,
            address: peer_address(&caps, 2, 3)?,
        })
    }

    fn number_only(&self, line: &str) -> Option<PeerShape> {
        let caps = self.number_only.captures(line)?;
        Some(PeerShape::NumberOnly {
            number: peer_number(&caps, 1)?,
        })
    }

    fn address_only(&self, line: &str) -> Option<PeerShape> {
        if !line.contains(ADDRESS_ONLY_TRIGGER) {
            return None;
        }
        let caps = self.address.captures(line)?;
        Some(PeerShape::AddressOnly {
            address: peer_address(&caps, 1, 2)?,
        })
    }
}

fn peer_number(caps: &Captures<'_>, group: usize) -> Option<u16> {
    caps.get(group)?.as_str().parse().ok()
}

fn peer_address(caps: &Captures<'_>, ip_group: usize, port_group: usize) -> Option<PeerAddress> {
    let ip: Ipv4Addr = caps.get(ip_group)?.as_str().parse().ok()?;
    let port: u16 = caps.get(port_group)?.as_str().parse().ok()?;
    Some(PeerAddress { ip, port })
}
