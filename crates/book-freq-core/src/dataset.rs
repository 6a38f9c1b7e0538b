//! Whole-file text loading and saving.

use camino::Utf8Path;

use crate::error::{DatasetError, DatasetResult};

/// Default maximum input size: 32 MiB.
///
/// Comfortably above any single book; prevents accidentally loading a
/// multi-gigabyte file into memory. Override with `max_input_bytes`, or set
/// `disable_input_limit` to turn the check off.
pub const DEFAULT_MAX_INPUT_BYTES: usize = 32 * 1024 * 1024;

/// Load a UTF-8 text file as a list of lines with line terminators removed.
///
/// Any line break accepted by [`split_lines`] ends a line. An empty file
/// yields no lines.
/// When `max_bytes` is set, the file size is checked before reading.
#[tracing::instrument(skip_all, fields(path = %path))]
pub fn load_text(path: &Utf8Path, max_bytes: Option<usize>) -> DatasetResult<Vec<String>> {
    let content = read_to_string(path, max_bytes)?;
    let lines = split_lines(&content);
    tracing::debug!(lines = lines.len(), bytes = content.len(), "loaded text");
    Ok(lines)
}

/// Read a whole UTF-8 file, enforcing the optional size limit.
pub fn read_to_string(path: &Utf8Path, max_bytes: Option<usize>) -> DatasetResult<String> {
    // Preflight: check file size via metadata before reading into memory.
    let metadata = std::fs::metadata(path.as_std_path()).map_err(|source| DatasetError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    if let Some(limit) = max_bytes
        && metadata.len() > limit as u64
    {
        return Err(DatasetError::TooLarge {
            path: path.to_path_buf(),
            size: metadata.len(),
            limit,
        });
    }

    let bytes = std::fs::read(path.as_std_path()).map_err(|source| DatasetError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    String::from_utf8(bytes).map_err(|_| DatasetError::InvalidUtf8 {
        path: path.to_path_buf(),
    })
}

/// Split text into lines, dropping the terminators.
///
/// Lines end at `\n`, `\r`, `\r\n`, vertical tab, form feed, the
/// `\x1c`..`\x1e` separators, NEL, and U+2028/U+2029. A trailing break does not
/// start an extra empty line.
pub fn split_lines(text: &str) -> Vec<String> {
    let mut lines = Vec::new();
    let mut rest = text;
    while let Some(pos) = rest.find(is_line_break) {
        lines.push(rest[..pos].to_string());
        let tail = &rest[pos..];
        let skip = if tail.starts_with("\r\n") {
            2
        } else {
            tail.chars().next().map_or(1, char::len_utf8)
        };
        rest = &tail[skip..];
    }
    if !rest.is_empty() {
        lines.push(rest.to_string());
    }
    lines
}

const fn is_line_break(c: char) -> bool {
    matches!(
        c,
        '\n' | '\r' | '\u{0b}' | '\u{0c}' | '\u{1c}'..='\u{1e}' | '\u{85}' | '\u{2028}' | '\u{2029}'
    )
}

/// Write `text` to `path` verbatim, creating parent directories as needed.
#[tracing::instrument(skip_all, fields(path = %path, bytes = text.len()))]
pub fn save_text(path: &Utf8Path, text: &str) -> DatasetResult<()> {
    ensure_parent_dir(path)?;
    std::fs::write(path.as_std_path(), text).map_err(|source| DatasetError::Write {
        path: path.to_path_buf(),
        source,
    })
}

/// Create the parent directory of `path` if it does not exist yet.
pub(crate) fn ensure_parent_dir(path: &Utf8Path) -> DatasetResult<()> {
    match path.parent() {
        Some(parent) if !parent.as_str().is_empty() => std::fs::create_dir_all(parent)
            .map_err(|source| DatasetError::Write {
                path: path.to_path_buf(),
                source,
            }),
        _ => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use camino::Utf8PathBuf;
    use std::fs;
    use tempfile::TempDir;

    fn tmp_file(dir: &TempDir, content: &[u8]) -> Utf8PathBuf {
        let path = dir.path().join("test.txt");
        fs::write(&path, content).unwrap();
        Utf8PathBuf::try_from(path).unwrap()
    }

    #[test]
    fn loads_lines_without_terminators() {
        let tmp = TempDir::new().unwrap();
        let path = tmp_file(&tmp, b"line1\nline2\nline3\n");
        assert_eq!(load_text(&path, None).unwrap(), ["line1", "line2", "line3"]);
    }

    #[test]
    fn empty_file_has_no_lines() {
        let tmp = TempDir::new().unwrap();
        let path = tmp_file(&tmp, b"");
        assert!(load_text(&path, None).unwrap().is_empty());
    }

    #[test]
    fn single_line_without_newline() {
        let tmp = TempDir::new().unwrap();
        let path = tmp_file(&tmp, b"single line");
        assert_eq!(load_text(&path, None).unwrap(), ["single line"]);
    }

    #[test]
    fn crlf_endings_are_stripped() {
        let tmp = TempDir::new().unwrap();
        let path = tmp_file(&tmp, b"a\r\nb\r\n");
        assert_eq!(load_text(&path, None).unwrap(), ["a", "b"]);
    }

    #[test]
    fn bare_cr_endings_are_stripped() {
        let tmp = TempDir::new().unwrap();
        let path = tmp_file(&tmp, b"a\rb\r\rc\r");
        assert_eq!(load_text(&path, None).unwrap(), ["a", "b", "", "c"]);
    }

    #[test]
    fn split_lines_handles_every_break() {
        assert_eq!(
            split_lines("a\u{0b}b\u{0c}c\u{1c}d\u{85}e\u{2028}f\u{2029}g"),
            ["a", "b", "c", "d", "e", "f", "g"]
        );
        assert_eq!(split_lines("a\r\n\r\nb"), ["a", "", "b"]);
        assert_eq!(split_lines("\n"), [""]);
        assert!(split_lines("").is_empty());
    }

    #[test]
    fn unicode_round_trips() {
        let tmp = TempDir::new().unwrap();
        let path = tmp_file(&tmp, "héllo wörld\nünicode tëst\n".as_bytes());
        assert_eq!(
            load_text(&path, None).unwrap(),
            ["héllo wörld", "ünicode tëst"]
        );
    }

    #[test]
    fn invalid_utf8_is_an_error() {
        let tmp = TempDir::new().unwrap();
        let path = tmp_file(&tmp, &[0x66, 0x6f, 0xff, 0xfe]);
        assert!(matches!(
            load_text(&path, None),
            Err(DatasetError::InvalidUtf8 { .. })
        ));
    }

    #[test]
    fn missing_file_is_a_read_error() {
        let tmp = TempDir::new().unwrap();
        let path = Utf8PathBuf::try_from(tmp.path().join("nope.txt")).unwrap();
        let err = load_text(&path, None).unwrap_err();
        assert!(matches!(err, DatasetError::Read { .. }));
        assert!(err.to_string().contains("nope.txt"));
    }

    #[test]
    fn size_limit_is_enforced() {
        let tmp = TempDir::new().unwrap();
        let path = tmp_file(&tmp, b"0123456789");
        assert!(matches!(
            load_text(&path, Some(4)),
            Err(DatasetError::TooLarge {
                size: 10,
                limit: 4,
                ..
            })
        ));
        assert!(load_text(&path, Some(10)).is_ok());
    }

    #[test]
    fn save_writes_verbatim() {
        let tmp = TempDir::new().unwrap();
        let path = Utf8PathBuf::try_from(tmp.path().join("out.txt")).unwrap();
        for text in ["Hello\nWorld\nTest", "", "héllo wörld\nünicode tëst"] {
            save_text(&path, text).unwrap();
            assert_eq!(fs::read_to_string(&path).unwrap(), text);
        }
    }

    #[test]
    fn save_creates_parent_directories() {
        let tmp = TempDir::new().unwrap();
        let path = Utf8PathBuf::try_from(tmp.path().join("a").join("b").join("out.txt")).unwrap();
        save_text(&path, "body").unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), "body");
    }
}
