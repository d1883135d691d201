//! Stdin feed, reads lines piped into the process.

use crate::{FeedResult, LineFeed, ReaderFeed};
use std::io::{BufReader, Stdin};

pub struct StdinFeed {
    inner: ReaderFeed<BufReader<Stdin>>,
}

impl StdinFeed {
    pub fn new() -> Self {
        Self {
            inner: ReaderFeed::new("<stdin>", BufReader::new(std::io::stdin())),
        }
    }
}

impl Default for StdinFeed {
    fn default() -> Self {
        Self::new()
    }
}

impl LineFeed for StdinFeed {
    fn name(&self) -> &str {
        self.inner.name()
    }

    fn next_line(&mut self) -> FeedResult<Option<String>> {
        self.inner.next_line()
    }
}
