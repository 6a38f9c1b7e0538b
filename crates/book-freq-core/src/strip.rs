//! Project Gutenberg header and footer removal.
//!
//! Gutenberg books wrap the actual text in licensing boilerplate. The start
//! and end of the body are announced by lines such as
//! `*** START OF THE PROJECT GUTENBERG EBOOK ALICE ***`, all of which contain
//! [`GUTENBERG_MARKER`]. The scan keeps only what lies between the first two
//! such lines.

/// Substring that identifies a boilerplate boundary line.
pub const GUTENBERG_MARKER: &str = "PROJECT GUTENBERG EBOOK ";

/// Position of the scan relative to the book body.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ScanState {
    /// No marker seen yet; lines are discarded.
    BeforeBody,
    /// Start marker seen; lines are kept until the next marker.
    InBody,
}

/// Strip Gutenberg headers and footers from a sequence of lines.
///
/// Returns the lines between the first and second marker lines, joined with
/// `\n` and trimmed. When only one marker exists everything after it is kept.
/// When no marker exists the result is empty, never the original text.
#[tracing::instrument(skip_all)]
pub fn strip_headers<I, S>(lines: I) -> String
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut state = ScanState::BeforeBody;
    let mut body: Vec<S> = Vec::new();

    for line in lines {
        let is_marker = line.as_ref().contains(GUTENBERG_MARKER);
        match (state, is_marker) {
            (ScanState::BeforeBody, true) => state = ScanState::InBody,
            (ScanState::BeforeBody, false) => {}
            // End marker: no transition back, the scan is over.
            (ScanState::InBody, true) => break,
            (ScanState::InBody, false) => body.push(line),
        }
    }

    tracing::debug!(
        body_lines = body.len(),
        found_start = state == ScanState::InBody,
        "scanned for gutenberg markers"
    );

    let mut joined = String::new();
    for (i, line) in body.iter().enumerate() {
        if i > 0 {
            joined.push('\n');
        }
        joined.push_str(line.as_ref());
    }
    joined.trim().to_string()
}
