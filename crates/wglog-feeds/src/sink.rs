//! Output sinks. Records are appended to the sink in emission order; the
//! sink is flushed by the driver at end of input.

use crate::{FeedError, FeedResult};
use std::fs::OpenOptions;
use std::io::{BufWriter, Write};
use std::path::Path;

/// Open the output sink: `path` in append or truncate mode, stdout when
/// `path` is `None`.
pub fn open_sink(path: Option<&Path>, append: bool) -> FeedResult<Box<dyn Write + Send>> {
    let Some(path) = path else {
        return Ok(Box::new(BufWriter::new(std::io::stdout())));
    };

    let file = OpenOptions::new()
        .create(true)
        .write(true)
        .append(append)
        .truncate(!append)
        .open(path)
        .map_err(|source| FeedError::Create {
            path: path.to_path_buf(),
            source,
        })?;
    tracing::debug!(path = %path.display(), append, "opened output sink");
    Ok(Box::new(BufWriter::new(file)))
}
