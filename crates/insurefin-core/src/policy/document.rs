//! In-memory policy text with line and context helpers.

/// A policy document held entirely in memory.
#[derive(Debug, Clone, Default)]
pub struct PolicyDocument {
    text: String,
}

impl PolicyDocument {
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }

    /// Full document text.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Lines split on `\n`, numbered from 1.
    ///
    /// An empty document yields a single empty line.
    pub fn lines(&self) -> impl Iterator<Item = (usize, &str)> {
        self.text.split('\n').enumerate().map(|(i, line)| (i + 1, line))
    }

    /// 1-based line containing the given byte offset.
    pub fn line_number_at(&self, offset: usize) -> usize {
        self.text[..offset].bytes().filter(|&b| b == b'\n').count() + 1
    }

    /// Text around `start..end` widened by `radius` characters on each side.
    ///
    /// The window is clipped to the document, newlines become spaces and the
    /// result is trimmed. `start` and `end` must lie on char boundaries.
    pub fn context_window(&self, start: usize, end: usize, radius: usize) -> String {
        let from = if radius == 0 {
            start
        } else {
            self.text[..start]
                .char_indices()
                .rev()
                .nth(radius - 1)
                .map_or(0, |(i, _)| i)
        };
        let to = self.text[end..]
            .char_indices()
            .nth(radius)
            .map_or(self.text.len(), |(i, _)| end + i);

        self.text[from..to].replace('\n', " ").trim().to_string()
    }
}
