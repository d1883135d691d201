//! Export: serializes [`LogRecord`](crate::LogRecord) values into syslog-shaped JSON.
//!
//! The key set mirrors the RFC 5424 header names (`PRI`, `TIMESTAMP`,
//! `HOSTNAME`, `APPLICATION`, `PID`, `MESSAGEID`, `STRUCTURED-DATA`,
//! `MESSAGE`) without implementing RFC 5424 framing. Values the kernel log
//! never provides come from [`OutputConfig`]: `pri` and `nil_value`.
//!
//! With `ascii_only` set, non-ASCII characters are written as `\uXXXX`
//! escapes, astral characters as a surrogate pair, matching the legacy
//! output byte for byte.

use crate::config::{OutputConfig, OutputFormat};
use crate::error::{ExtractError, ExtractResult};
use crate::timestamp;
use crate::types::LogRecord;
use serde::Serialize;
use serde_json::Value;

/// On-the-wire field layout. Field order is output order.
#[derive(Debug, Serialize)]
struct WireRecord<'a> {
    #[serde(rename = "PRI")]
    pri: &'a str,
    #[serde(rename = "TIMESTAMP")]
    timestamp: String,
    #[serde(rename = "HOSTNAME")]
    hostname: &'a str,
    #[serde(rename = "APPLICATION")]
    application: &'a str,
    #[serde(rename = "PID", skip_serializing_if = "Option::is_none")]
    pid: Option<&'a str>,
    #[serde(rename = "MESSAGEID", skip_serializing_if = "Option::is_none")]
    message_id: Option<&'a str>,
    #[serde(rename = "STRUCTURED-DATA", skip_serializing_if = "Option::is_none")]
    structured_data: Option<&'a str>,
    #[serde(rename = "MESSAGE")]
    message: &'a str,
    #[serde(rename = "PEER-NUMBER", skip_serializing_if = "Option::is_none")]
    peer_number: Option<Value>,
    #[serde(rename = "PEER-ADDRESS", skip_serializing_if = "Option::is_none")]
    peer_address: Option<Value>,
}

#[derive(Debug, Clone)]
pub struct RecordSerializer {
    config: OutputConfig,
}

impl RecordSerializer {
    pub fn new(config: OutputConfig) -> Self {
        Self { config }
    }

    /// Serialized form of `record`, terminated by a newline.
    pub fn serialize(&self, record: &LogRecord) -> ExtractResult<String> {
        let wire = self.wire(record);
        let mut text = match self.config.format {
            OutputFormat::Pretty => {
                let mut buf = Vec::new();
                let formatter = serde_json::ser::PrettyFormatter::with_indent(b"    ");
                let mut ser = serde_json::Serializer::with_formatter(&mut buf, formatter);
                wire.serialize(&mut ser)?;
                String::from_utf8(buf)
                    .map_err(|e| ExtractError::Serialize(serde::ser::Error::custom(e)))?
            }
            OutputFormat::Compact => serde_json::to_string(&wire)?,
        };
        if self.config.ascii_only {
            text = escape_non_ascii(text);
        }
        text.push('\n');
        Ok(text)
    }

    fn wire<'a>(&'a self, record: &'a LogRecord) -> WireRecord<'a> {
        let nil = self.nil();
        let peer_number = record
            .peer
            .peer_number
            .map(Value::from)
            .or_else(|| nil.map(Value::from));
        let peer_address = record
            .peer
            .peer_address
            .map(|addr| Value::from(addr.to_string()))
            .or_else(|| nil.map(Value::from));
        let with_peers = self.config.include_peer_fields;

        WireRecord {
            pri: &self.config.pri,
            timestamp: timestamp::render(&record.timestamp),
            hostname: &record.host,
            application: &record.application,
            pid: nil,
            message_id: nil,
            structured_data: nil,
            message: &record.message,
            peer_number: peer_number.filter(|_| with_peers),
            peer_address: peer_address.filter(|_| with_peers),
        }
    }

    /// Placeholder for unknown values, `None` when they are omitted.
    fn nil(&self) -> Option<&str> {
        (!self.config.omit_nil_fields).then_some(self.config.nil_value.as_str())
    }
}

/// Rewrite non-ASCII characters of serialized JSON as `\uXXXX` escapes.
/// serde_json only emits non-ASCII inside string literals, so the result is
/// the same JSON value.
fn escape_non_ascii(text: String) -> String {
    if text.is_ascii() {
        return text;
    }
    let mut out = String::with_capacity(text.len() + 16);
    let mut units = [0u16; 2];
    for ch in text.chars() {
        if ch.is_ascii() {
            out.push(ch);
        } else {
            for unit in ch.encode_utf16(&mut units) {
                out.push_str(&format!("\\u{unit:04x}"));
            }
        }
    }
    out
}
