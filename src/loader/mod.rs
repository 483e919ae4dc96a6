//! Input loading: one record per non-blank line of a text file

use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::Path;

use thiserror::Error;
use tracing::info;

use crate::record::{Record, RecordStore};

#[derive(Debug, Error)]
pub enum LoaderError {
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("Input file not found: {0}")]
    FileNotFound(String),
}

pub type LoaderResult<T> = Result<T, LoaderError>;

/// Build a record store from the lines of `reader`
///
/// Each line is trimmed of surrounding whitespace; lines left empty are
/// skipped.
pub fn load_reader<R: BufRead>(reader: R) -> LoaderResult<RecordStore> {
    let mut store = RecordStore::new();
    for line in reader.lines() {
        let line = line?;
        let key = line.trim();
        if key.is_empty() {
            continue;
        }
        store.append(Record::new(key));
    }
    Ok(store)
}

/// Build a record store from a text file
pub fn load_file(path: &Path) -> LoaderResult<RecordStore> {
    if !path.exists() {
        return Err(LoaderError::FileNotFound(path.display().to_string()));
    }

    let file = File::open(path)?;
    let store = load_reader(BufReader::new(file))?;

    info!(path = %path.display(), records = store.size(), "loaded input");
    Ok(store)
}
