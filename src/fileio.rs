//! Reading and writing document files
//!
//! Files are treated as byte-oriented text: invalid UTF-8 is replaced on
//! load rather than rejected. Line endings are normalized on load (both
//! `\n` and `\r\n` accepted) and written back as `\n`.

use std::fs;
use std::io;
use std::path::Path;

use tracing::info;

/// Load a file as a list of lines.
pub fn load(path: &Path) -> io::Result<Vec<String>> {
    let bytes = fs::read(path)?;
    let text = String::from_utf8_lossy(&bytes);

    let mut lines: Vec<String> = text
        .split('\n')
        .map(|line| line.strip_suffix('\r').unwrap_or(line).to_string())
        .collect();

    // a trailing newline produces one empty fragment, not an extra line
    if lines.last().is_some_and(|last| last.is_empty()) {
        lines.pop();
    }

    info!(path = %path.display(), lines = lines.len(), "loaded file");
    Ok(lines)
}

/// Write the document text to disk. Returns the number of bytes written.
pub fn save(path: &Path, text: &str) -> io::Result<usize> {
    fs::write(path, text)?;
    info!(path = %path.display(), bytes = text.len(), "saved file");
    Ok(text.len())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_load_splits_lines() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "one\ntwo\nthree\n").unwrap();

        let lines = load(file.path()).unwrap();
        assert_eq!(lines, vec!["one", "two", "three"]);
    }

    #[test]
    fn test_load_without_trailing_newline() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "one\ntwo").unwrap();

        let lines = load(file.path()).unwrap();
        assert_eq!(lines, vec!["one", "two"]);
    }

    #[test]
    fn test_load_strips_carriage_returns() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "one\r\ntwo\r\n").unwrap();

        let lines = load(file.path()).unwrap();
        assert_eq!(lines, vec!["one", "two"]);
    }

    #[test]
    fn test_save_reports_byte_count() {
        let file = tempfile::NamedTempFile::new().unwrap();
        let n = save(file.path(), "hello\nworld\n").unwrap();
        assert_eq!(n, 12);
        assert_eq!(fs::read_to_string(file.path()).unwrap(), "hello\nworld\n");
    }

    #[test]
    fn test_load_missing_file_errors() {
        let err = load(Path::new("/nonexistent/sumi-test")).unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::NotFound);
    }
}
