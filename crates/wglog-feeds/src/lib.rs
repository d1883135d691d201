//! wglog-feeds: input feeds and output sinks for wglog.
//!
//! A feed yields raw lines in their original order, terminators included,
//! until end of input. The driver owns the feed and the sink; the
//! extraction core never sees either.

pub mod file;
pub mod sink;
pub mod stdin;

use std::io::BufRead;
use std::path::PathBuf;
use thiserror::Error;

pub use file::FileFeed;
pub use sink::open_sink;
pub use stdin::StdinFeed;

pub type FeedResult<T> = Result<T, FeedError>;

#[derive(Debug, Error)]
pub enum FeedError {
    #[error("cannot open {path}: {source}")]
    Open {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("cannot create {path}: {source}")]
    Create {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("read failed on {feed} after line {line}: {source}")]
    Read {
        feed: String,
        line: u64,
        #[source]
        source: std::io::Error,
    },
}

/// Trait implemented by each line source.
pub trait LineFeed: Send {
    /// Human-readable feed name (file path or `<stdin>`).
    fn name(&self) -> &str;

    /// Next raw line, or `None` at end of input.
    fn next_line(&mut self) -> FeedResult<Option<String>>;
}

/// Line feed over any buffered reader. Invalid UTF-8 is replaced, never
/// rejected.
#[derive(Debug)]
pub struct ReaderFeed<R> {
    name: String,
    reader: R,
    buf: Vec<u8>,
    lines_read: u64,
}

impl<R: BufRead> ReaderFeed<R> {
    pub fn new(name: impl Into<String>, reader: R) -> Self {
        Self {
            name: name.into(),
            reader,
            buf: Vec::new(),
            lines_read: 0,
        }
    }

    pub fn lines_read(&self) -> u64 {
        self.lines_read
    }
}

impl<R: BufRead + Send> LineFeed for ReaderFeed<R> {
    fn name(&self) -> &str {
        &self.name
    }

    fn next_line(&mut self) -> FeedResult<Option<String>> {
        self.buf.clear();
        let n = self
            .reader
            .read_until(b'\n', &mut self.buf)
            .map_err(|source| FeedError::Read {
                feed: self.name.clone(),
                line: self.lines_read,
                source,
            })?;
        if n == 0 {
            return Ok(None);
        }
        self.lines_read += 1;
        Ok(Some(String::from_utf8_lossy(&self.buf).into_owned()))
    }
}
