//! Line normalization ahead of lexing.

use crate::error::{DpgenError, Result};

/// Two-character marker for an explicit error annotation.
pub const ERROR_MARKER: &str = "//";

/// A non-blank source line with trailing whitespace removed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SourceLine<'a> {
    /// Line number (1-indexed)
    pub number: usize,
    /// Line text without trailing whitespace
    pub text: &'a str,
}

/// Split the netlist into normalized lines.
///
/// Trailing whitespace and control characters are stripped and blank lines
/// are dropped. Any line containing [`ERROR_MARKER`] aborts normalization;
/// the text after the marker becomes the diagnostic.
pub fn normalize(source: &str) -> Result<Vec<SourceLine<'_>>> {
    let mut lines = Vec::new();

    for (index, raw) in source.lines().enumerate() {
        let number = index + 1;
        let text = raw.trim_end_matches(|c: char| c.is_whitespace() || c.is_control());
        if text.is_empty() {
            continue;
        }

        if let Some(pos) = text.find(ERROR_MARKER) {
            let message = text[pos + ERROR_MARKER.len()..].trim().to_string();
            return Err(DpgenError::ErrorMarker {
                line: number,
                message,
            });
        }

        lines.push(SourceLine { number, text });
    }

    Ok(lines)
}
