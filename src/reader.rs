//! Streaming NDJSON record reader

use crate::error::{Error, Result};
use crate::types::Record;
use std::fs::File;
use std::io::{BufRead, BufReader, Lines};
use std::path::{Path, PathBuf};

/// Lazily decoded records of one source file, in file order
pub struct RecordStream {
    path: PathBuf,
    lines: Lines<BufReader<File>>,
    line_no: usize,
}

/// Open `path` and stream its records one line at a time.
///
/// Every call re-opens the file, so callers that need two passes call this
/// twice.
pub fn load_jsonl<P: AsRef<Path>>(path: P) -> Result<RecordStream> {
    let path = path.as_ref().to_path_buf();
    let file = File::open(&path).map_err(|source| Error::Io {
        path: path.clone(),
        source,
    })?;

    Ok(RecordStream {
        path,
        lines: BufReader::new(file).lines(),
        line_no: 0,
    })
}

impl Iterator for RecordStream {
    type Item = Result<Record>;

    fn next(&mut self) -> Option<Self::Item> {
        let line = match self.lines.next()? {
            Ok(line) => line,
            Err(source) => {
                return Some(Err(Error::Io {
                    path: self.path.clone(),
                    source,
                }))
            }
        };
        self.line_no += 1;

        // Every line must hold one record; a blank line is a decoding error
        Some(serde_json::from_str(&line).map_err(|source| Error::Json {
            line: self.line_no,
            source,
        }))
    }
}
