//! Line grammar: which token holds which field of a kernel log line.
//!
//! ```text
//! Jul 22 14:13:18 vpn-gw-1 kernel: [28341.470052] wireguard: wg0: Sending keepalive packet to peer 296 (90.253.165.83:51722)
//!
//! tokens[0..3]  timestamp   Jul 22 14:13:18
//! tokens[3]     host        vpn-gw-1
//! tokens[6]     tag         wireguard:
//! tokens[8..]   message     Sending keepalive packet to peer 296 (90.253.165.83:51722)
//! ```
//!
//! Each field is a [`FieldRule`] with an explicit span. [`RawLine::field`]
//! is the only place tokens are indexed, so an out-of-range access turns into
//! [`ExtractError::MalformedLine`] instead of a panic.

use crate::error::{ExtractError, ExtractResult};

/// Token span of a named field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Span {
    /// Exactly one token.
    One(usize),
    /// Tokens `start..end`.
    Range(usize, usize),
    /// Token `start` and everything after it; at least one token.
    From(usize),
}

impl Span {
    /// Smallest token count for which this span is fully present.
    pub const fn min_tokens(&self) -> usize {
        match *self {
            Span::One(index) => index + 1,
            Span::Range(_, end) => end,
            Span::From(start) => start + 1,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldRule {
    pub name: &'static str,
    pub span: Span,
}

pub const TIMESTAMP: FieldRule = FieldRule { name: "timestamp", span: Span::Range(0, 3) };
pub const HOST: FieldRule = FieldRule { name: "host", span: Span::One(3) };
pub const TAG: FieldRule = FieldRule { name: "tag", span: Span::One(6) };
pub const MESSAGE: FieldRule = FieldRule { name: "message", span: Span::From(8) };

/// Fields in the order they are read from a tagged line.
pub const LINE_GRAMMAR: &[FieldRule] = &[TAG, TIMESTAMP, HOST, MESSAGE];

/// One input line split into whitespace-delimited tokens.
#[derive(Debug, Clone)]
pub struct RawLine<'a> {
    text: &'a str,
    tokens: Vec<&'a str>,
}

impl<'a> RawLine<'a> {
    /// Strip trailing line terminators and tokenize.
    pub fn new(line: &'a str) -> Self {
        let text = line.trim_end_matches(['\n', '\r']);
        Self {
            text,
            tokens: text.split_whitespace().collect(),
        }
    }

    /// Line text without its terminator.
    pub fn text(&self) -> &'a str {
        self.text
    }

    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    /// Arity gate for `rule`.
    pub fn check(&self, rule: &FieldRule) -> ExtractResult<()> {
        let needed = rule.span.min_tokens();
        if self.tokens.len() < needed {
            return Err(ExtractError::MalformedLine {
                field: rule.name,
                needed,
                found: self.tokens.len(),
            });
        }
        Ok(())
    }

    /// Arity gate for every rule of the grammar.
    pub fn check_all(&self, rules: &[FieldRule]) -> ExtractResult<()> {
        rules.iter().try_for_each(|rule| self.check(rule))
    }

    /// Tokens covered by `rule`.
    pub fn field(&self, rule: &FieldRule) -> ExtractResult<&[&'a str]> {
        self.check(rule)?;
        Ok(match rule.span {
            Span::One(index) => &self.tokens[index..=index],
            Span::Range(start, end) => &self.tokens[start..end],
            Span::From(start) => &self.tokens[start..],
        })
    }

    /// Single-token field.
    pub fn token(&self, rule: &FieldRule) -> ExtractResult<&'a str> {
        self.field(rule).map(|tokens| tokens[0])
    }
}

/// Result of [`classify`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Classification {
    Interesting,
    NotInteresting,
}

/// Interesting iff token 6 equals `tag` exactly.
pub fn classify(line: &RawLine<'_>, tag: &str) -> ExtractResult<Classification> {
    if line.token(&TAG)? == tag {
        Ok(Classification::Interesting)
    } else {
        Ok(Classification::NotInteresting)
    }
}

/// Message tokens joined by a single space. Token content is kept verbatim.
pub fn extract_message(line: &RawLine<'_>) -> ExtractResult<String> {
    Ok(line.field(&MESSAGE)?.join(" "))
}

/// True iff `message` starts with `prefix`. An empty prefix excludes nothing.
pub fn is_excluded(message: &str, prefix: &str) -> bool {
    !prefix.is_empty() && message.starts_with(prefix)
}
