/// Source location information for error reporting
///
/// Line and column numbers are 1-indexed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ErrorLocation {
    /// Byte offset from the beginning of the source file
    offset: usize,
    /// Line number where the error occurred (1-indexed)
    line: usize,
    /// Column number where the error occurred (1-indexed)
    column: usize,
    /// Optional length of the highlighted range in characters
    length: Option<usize>,
    /// The source line content where the error occurred
    line_source: String,
}

impl ErrorLocation {
    fn new(source: &str, offset: usize, length: Option<usize>) -> Self {
        // the offset may sit just past the last character
        assert!(
            offset <= source.len(),
            "offset ({}) must be less than or equal to the length of the source ({})",
            offset,
            source.len()
        );

        let line_start = source[..offset]
            .rfind('\n')
            .map_or(0, |newline_idx| newline_idx + 1);

        let num_tabs = source[line_start..offset]
            .chars()
            .filter(|c| *c == '\t')
            .count();

        // tabs are displayed as 4 columns
        let column = offset - line_start + 1 + num_tabs * 3;

        let line = source[..offset].matches('\n').count() + 1;

        let line_source = source
            .lines()
            .nth(line - 1)
            .unwrap_or_default()
            .replace('\t', "    ");

        Self {
            offset,
            line,
            column,
            length,
            line_source,
        }
    }

    /// Creates a new error location from source content and offset
    #[must_use]
    pub fn from_source_and_offset(source: &str, offset: usize) -> Self {
        Self::new(source, offset, None)
    }

    /// Creates a new error location from source content and span
    #[must_use]
    pub fn from_source_and_span(source: &str, offset: usize, length: usize) -> Self {
        Self::new(source, offset, Some(length))
    }

    /// Creates a location highlighting the content of a whole line
    ///
    /// Leading indentation is skipped so that the highlight starts at the
    /// first visible character. Returns `None` if the source has fewer than
    /// `line` lines.
    #[must_use]
    pub fn from_source_and_line(source: &str, line: usize) -> Option<Self> {
        let mut line_start = 0;
        for (index, text) in source.split_inclusive('\n').enumerate() {
            if index + 1 == line {
                let content = text.trim_end_matches(['\n', '\r']);
                let indent = content.len() - content.trim_start().len();
                let length = content.trim().len().max(1);
                let offset = (line_start + indent).min(source.len());
                let location = if content.trim().is_empty() {
                    Self::new(source, offset, None)
                } else {
                    Self::new(source, offset, Some(length))
                };
                return Some(location);
            }
            line_start += text.len();
        }
        None
    }

    /// Returns the byte offset from the beginning of the source file
    #[must_use]
    pub const fn offset(&self) -> usize {
        self.offset
    }

    /// Returns the line number where the error occurred (1-indexed)
    #[must_use]
    pub const fn line(&self) -> usize {
        self.line
    }

    /// Returns the column number where the error occurred (1-indexed)
    #[must_use]
    pub const fn column(&self) -> usize {
        self.column
    }

    /// Returns the length of the highlighted range in characters
    #[must_use]
    pub fn length(&self) -> usize {
        // a single character when no length was given
        self.length.unwrap_or(1)
    }

    /// Returns the source line content where the error occurred
    #[must_use]
    pub fn line_source(&self) -> &str {
        &self.line_source
    }
}
