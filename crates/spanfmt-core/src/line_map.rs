use crate::error::{FormatError, Result};
use crate::model::{Document, DocumentUri, Point, PositionEncoding, Span, TextRange};

/// Maps between line/column points and byte offsets for one snapshot of a
/// document's text.
///
/// Lines are terminated by `\n`; the terminator belongs to the line it ends
/// but is not counted in its column length. Columns are measured in units of
/// the mapper's [`PositionEncoding`]. Nothing is clamped: coordinates outside
/// the snapshot are errors.
pub struct ColumnMapper<'a> {
    uri: DocumentUri,
    text: &'a str,
    encoding: PositionEncoding,
    line_starts: Vec<usize>,
}

impl<'a> ColumnMapper<'a> {
    pub fn new(uri: DocumentUri, text: &'a str, encoding: PositionEncoding) -> Self {
        let mut line_starts = vec![0];
        for (i, b) in text.bytes().enumerate() {
            if b == b'\n' {
                line_starts.push(i + 1);
            }
        }
        Self {
            uri,
            text,
            encoding,
            line_starts,
        }
    }

    pub fn for_document(document: &'a Document) -> Self {
        Self::new(document.uri.clone(), &document.text, document.encoding)
    }

    pub fn uri(&self) -> &DocumentUri {
        &self.uri
    }

    pub fn encoding(&self) -> PositionEncoding {
        self.encoding
    }

    pub fn line_count(&self) -> usize {
        self.line_starts.len()
    }

    /// Text of `line` without its terminator.
    fn line_text(&self, line: usize) -> &'a str {
        let start = self.line_starts[line];
        let end = match self.line_starts.get(line + 1) {
            Some(next) => next - 1,
            None => self.text.len(),
        };
        &self.text[start..end]
    }

    /// Length of `line` in encoding units, `None` past the last line.
    pub fn line_len(&self, line: u32) -> Option<u32> {
        let line = line as usize;
        if line >= self.line_count() {
            return None;
        }
        Some(self.units(self.line_text(line)))
    }

    fn units(&self, text: &str) -> u32 {
        text.chars().map(|c| self.encoding.len_of(c)).sum()
    }

    pub fn point_to_offset(&self, point: Point) -> Result<usize> {
        let out_of_range = || FormatError::OutOfRange {
            uri: self.uri.clone(),
            line: point.line,
            col: point.col,
        };

        let line = point.line as usize;
        if line >= self.line_count() {
            return Err(out_of_range());
        }

        let line_start = self.line_starts[line];
        let line_text = self.line_text(line);
        let mut units = 0u32;

        for (i, c) in line_text.char_indices() {
            if units == point.col {
                return Ok(line_start + i);
            }
            units += self.encoding.len_of(c);
            if units > point.col {
                return Err(FormatError::conversion(
                    &self.uri,
                    format!(
                        "column {} on line {} falls inside the character {:?}",
                        point.col, point.line, c
                    ),
                ));
            }
        }

        if units == point.col {
            return Ok(line_start + line_text.len());
        }

        Err(out_of_range())
    }

    pub fn offset_to_point(&self, offset: usize) -> Result<Point> {
        if offset > self.text.len() {
            return Err(FormatError::conversion(
                &self.uri,
                format!(
                    "offset {} is past the end of the text ({} bytes)",
                    offset,
                    self.text.len()
                ),
            ));
        }
        if !self.text.is_char_boundary(offset) {
            return Err(FormatError::conversion(
                &self.uri,
                format!("offset {} is not on a character boundary", offset),
            ));
        }

        let line = match self.line_starts.binary_search(&offset) {
            Ok(line) => line,
            Err(next_line) => next_line - 1,
        };
        let line_start = self.line_starts[line];
        let col = self.units(&self.text[line_start..offset]);

        Ok(Point::new(line as u32, col))
    }

    pub fn range_to_span(&self, range: TextRange) -> Result<Span> {
        let start = self.point_to_offset(range.start)?;
        let end = self.point_to_offset(range.end)?;
        Span::new(self.uri.clone(), start, end)
    }

    pub fn span_to_range(&self, span: &Span) -> Result<TextRange> {
        if span.uri() != &self.uri {
            return Err(FormatError::conversion(
                &self.uri,
                format!("span belongs to another document: {}", span.uri()),
            ));
        }
        let start = self.offset_to_point(span.start())?;
        let end = self.offset_to_point(span.end())?;
        Ok(TextRange::new(start, end))
    }
}
