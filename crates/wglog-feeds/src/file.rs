//! File feed, reads a log file from the beginning to its current end.
//!
//! No tailing: the feed stops at end of file.

use crate::{FeedError, FeedResult, LineFeed, ReaderFeed};
use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};

#[derive(Debug)]
pub struct FileFeed {
    path: PathBuf,
    inner: ReaderFeed<BufReader<File>>,
}

impl FileFeed {
    pub fn open(path: impl AsRef<Path>) -> FeedResult<Self> {
        let path = path.as_ref().to_path_buf();
        let file = File::open(&path).map_err(|source| FeedError::Open {
            path: path.clone(),
            source,
        })?;
        tracing::debug!(path = %path.display(), "opened file feed");
        Ok(Self {
            inner: ReaderFeed::new(path.display().to_string(), BufReader::new(file)),
            path,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl LineFeed for FileFeed {
    fn name(&self) -> &str {
        self.inner.name()
    }

    fn next_line(&mut self) -> FeedResult<Option<String>> {
        self.inner.next_line()
    }
}
