use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::Path;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum LineReadError {
    #[error("cannot open '{path}': {source}")]
    Open { path: String, source: io::Error },
    #[error("error while reading '{path}': {source}")]
    Read { path: String, source: io::Error },
}

/// Reads every line of a text stream, stripping `\n` and `\r\n` terminators.
pub fn read_lines(reader: &mut impl BufRead) -> io::Result<Vec<String>> {
    reader.lines().collect()
}

/// Loads a whole text file into memory, one `String` per line.
pub fn read_lines_from_path<P: AsRef<Path>>(path: P) -> Result<Vec<String>, LineReadError> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|e| LineReadError::Open {
        path: path.to_string_lossy().to_string(),
        source: e,
    })?;
    let mut reader = BufReader::new(file);
    read_lines(&mut reader).map_err(|e| LineReadError::Read {
        path: path.to_string_lossy().to_string(),
        source: e,
    })
}
