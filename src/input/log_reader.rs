use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Errors raised while reading the log source
#[derive(Error, Debug)]
pub enum InputError {
    #[error("Failed to open log file {path:?}: {source}")]
    Open {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to read log file {path:?}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
}

/// Reads a whole access log into memory, one entry per line
pub struct LogFileReader {
    file_path: PathBuf,
}

impl LogFileReader {
    /// Create a reader for the given file
    pub fn new(file_path: impl Into<PathBuf>) -> Self {
        LogFileReader {
            file_path: file_path.into(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.file_path
    }

    /// Read every line of the file
    ///
    /// Line terminators are stripped and invalid UTF-8 is replaced, so a
    /// stray binary byte never aborts the run.
    pub fn read_lines(&self) -> Result<Vec<String>, InputError> {
        let file = File::open(&self.file_path).map_err(|source| InputError::Open {
            path: self.file_path.clone(),
            source,
        })?;

        Self::read_from(BufReader::new(file)).map_err(|source| InputError::Read {
            path: self.file_path.clone(),
            source,
        })
    }

    /// Read every line from any buffered source
    pub fn read_from<R: BufRead>(mut reader: R) -> Result<Vec<String>, std::io::Error> {
        let mut lines = Vec::new();
        let mut buf = Vec::new();

        loop {
            buf.clear();
            let bytes_read = reader.read_until(b'\n', &mut buf)?;
            if bytes_read == 0 {
                break; // EOF
            }

            while matches!(buf.last(), Some(b'\n') | Some(b'\r')) {
                buf.pop();
            }
            lines.push(String::from_utf8_lossy(&buf).into_owned());
        }

        Ok(lines)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::{Cursor, Write};
    use tempfile::NamedTempFile;

    #[test]
    fn test_read_lines_strips_terminators() {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, "first\r\nsecond\nthird").unwrap();

        let lines = LogFileReader::new(file.path()).read_lines().unwrap();
        assert_eq!(lines, vec!["first", "second", "third"]);
    }

    #[test]
    fn test_missing_file_is_error() {
        let dir = tempfile::tempdir().unwrap();
        let reader = LogFileReader::new(dir.path().join("access.log"));

        match reader.read_lines() {
            Err(InputError::Open { path, .. }) => assert!(path.ends_with("access.log")),
            other => panic!("expected open error, got {:?}", other),
        }
    }

    #[test]
    fn test_invalid_utf8_is_replaced() {
        let data: &[u8] = b"1.2.3.4 \"GET /\xff HTTP/1.1\"\n";
        let lines = LogFileReader::read_from(Cursor::new(data)).unwrap();

        assert_eq!(lines.len(), 1);
        assert!(lines[0].starts_with("1.2.3.4"));
        assert!(lines[0].contains('\u{FFFD}'));
    }

    #[test]
    fn test_empty_source() {
        let lines = LogFileReader::read_from(Cursor::new(Vec::<u8>::new())).unwrap();
        assert!(lines.is_empty());
    }
}
