//! Error taxonomy for the extraction core.

use thiserror::Error;

pub type ExtractResult<T> = Result<T, ExtractError>;

/// Per-line failures. Every variant except [`ExtractError::Serialize`] is
/// recoverable: the driver logs the line and moves on to the next one.
#[derive(Debug, Error)]
pub enum ExtractError {
    #[error("malformed line: `{field}` needs at least {needed} tokens, found {found}")]
    MalformedLine {
        field: &'static str,
        needed: usize,
        found: usize,
    },
    #[error("unparsable timestamp: {raw:?}")]
    TimestampParse { raw: String },
    #[error("no peer number or address in line")]
    UnresolvedPeer,
    #[error("record serialization failed: {0}")]
    Serialize(#[from] serde_json::Error),
}

impl ExtractError {
    /// Whether the driver may skip the offending line and continue.
    pub fn is_recoverable(&self) -> bool {
        !matches!(self, ExtractError::Serialize(_))
    }

    /// Short label used in logs and run summaries.
    pub fn kind(&self) -> &'static str {
        match self {
            ExtractError::MalformedLine { .. } => "malformed-line",
            ExtractError::TimestampParse { .. } => "timestamp-parse",
            ExtractError::UnresolvedPeer => "unresolved-peer",
            ExtractError::Serialize(_) => "serialize",
        }
    }
}
