//! Domain-specific assertion macros for wglog harnesses.
//!
//! These wrap `pretty_assertions` and add context-rich failure messages that
//! make it clear *which* line broke *which* extraction rule.

// ---------------------------------------------------------------------------
// Outcome assertions
// ---------------------------------------------------------------------------

/// Assert that a line extracts to a record and return it.
///
/// ```rust
/// let record = assert_record!(extractor(), line);
/// ```
#[macro_export]
macro_rules! assert_record {
    ($extractor:expr, $line:expr) => {{
        let line: &str = $line;
        match $extractor.extract(line) {
            Ok(wglog_core::Extraction::Record(record)) => record,
            Ok(wglog_core::Extraction::Skipped(reason)) => panic!(
                "assert_record! failed: line was skipped ({})\n  line: {:?}",
                reason, line
            ),
            Err(err) => panic!(
                "assert_record! failed: extraction error: {}\n  line: {:?}",
                err, line
            ),
        }
    }};
}

/// Assert that a line is skipped for the given reason.
///
/// ```rust
/// assert_skipped!(extractor(), line, SkipReason::Excluded);
/// ```
#[macro_export]
macro_rules! assert_skipped {
    ($extractor:expr, $line:expr, $reason:expr) => {{
        let line: &str = $line;
        let expected: wglog_core::SkipReason = $reason;
        match $extractor.extract(line) {
            Ok(wglog_core::Extraction::Skipped(actual)) if actual == expected => {}
            Ok(other) => panic!(
                "assert_skipped! failed:\n  expected: Skipped({})\n  actual:   {:?}\n  line: {:?}",
                expected, other, line
            ),
            Err(err) => panic!(
                "assert_skipped! failed: extraction error: {}\n  line: {:?}",
                err, line
            ),
        }
    }};
}

/// Assert that a line fails with an error matching a pattern.
///
/// ```rust
/// assert_rejected!(extractor(), line, ExtractError::MalformedLine { .. });
/// ```
#[macro_export]
macro_rules! assert_rejected {
    ($extractor:expr, $line:expr, $pattern:pat) => {{
        let line: &str = $line;
        match $extractor.extract(line) {
            Err(err) => {
                if !matches!(err, $pattern) {
                    panic!(
                        "assert_rejected! failed: wrong error {:?}\n  line: {:?}",
                        err, line
                    );
                }
                assert!(err.is_recoverable(), "per-line errors must be recoverable");
            }
            Ok(outcome) => panic!(
                "assert_rejected! failed: expected an error, got {:?}\n  line: {:?}",
                outcome, line
            ),
        }
    }};
}

// ---------------------------------------------------------------------------
// Peer assertions
// ---------------------------------------------------------------------------

/// Assert the peer fields of a record.
///
/// ```rust
/// assert_peer!(record, Some(296), Some(addr([90, 253, 165, 83], 51722)));
/// ```
#[macro_export]
macro_rules! assert_peer {
    ($record:expr, $number:expr, $address:expr) => {{
        let record: &wglog_core::LogRecord = &$record;
        let number: Option<u16> = $number;
        let address: Option<wglog_core::PeerAddress> = $address;
        pretty_assertions::assert_eq!(
            record.peer.peer_number, number,
            "peer number of message {:?}", record.message
        );
        pretty_assertions::assert_eq!(
            record.peer.peer_address, address,
            "peer address of message {:?}", record.message
        );
    }};
}

// ---------------------------------------------------------------------------
// Output assertions
// ---------------------------------------------------------------------------

/// Split pretty-printed output into one JSON value per record.
pub fn parse_pretty_records(output: &str) -> Vec<serde_json::Value> {
    serde_json::Deserializer::from_str(output)
        .into_iter::<serde_json::Value>()
        .map(|value| value.expect("output must be a stream of JSON objects"))
        .collect()
}

/// Assert that every record carries the legacy key set, in order.
pub fn assert_legacy_keys(output: &str) {
    const KEYS: &[&str] = &[
        "\"PRI\"",
        "\"TIMESTAMP\"",
        "\"HOSTNAME\"",
        "\"APPLICATION\"",
        "\"PID\"",
        "\"MESSAGEID\"",
        "\"STRUCTURED-DATA\"",
        "\"MESSAGE\"",
    ];
    for (index, chunk) in output.split("}\n").filter(|c| !c.trim().is_empty()).enumerate() {
        let mut last = 0;
        for key in KEYS {
            let pos = chunk[last..]
                .find(key)
                .unwrap_or_else(|| panic!("record {index} lacks {key} after offset {last}:\n{chunk}"));
            last += pos + key.len();
        }
    }
}
