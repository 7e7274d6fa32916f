use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::{FormatError, Result};

/// Opaque document identifier (usually a `file://` URI).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct DocumentUri(String);

impl DocumentUri {
    pub fn new(uri: impl Into<String>) -> Self {
        Self(uri.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for DocumentUri {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for DocumentUri {
    fn from(uri: &str) -> Self {
        Self(uri.to_string())
    }
}

impl From<String> for DocumentUri {
    fn from(uri: String) -> Self {
        Self(uri)
    }
}

/// Core line/column coordinate (0-based).
/// `col` counts units of the document's [`PositionEncoding`], not bytes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Point {
    pub line: u32,
    pub col: u32,
}

impl Point {
    pub const fn new(line: u32, col: u32) -> Self {
        Self { line, col }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TextRange {
    pub start: Point,
    pub end: Point,
}

impl TextRange {
    pub const fn new(start: Point, end: Point) -> Self {
        Self { start, end }
    }

    pub const fn point(at: Point) -> Self {
        Self { start: at, end: at }
    }

    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }
}

/// Unit in which columns are counted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum PositionEncoding {
    /// Bytes.
    #[serde(rename = "utf-8")]
    Utf8,
    /// UTF-16 code units. The LSP default.
    #[default]
    #[serde(rename = "utf-16")]
    Utf16,
    /// Unicode scalar values.
    #[serde(rename = "utf-32")]
    Utf32,
}

impl PositionEncoding {
    /// Number of column units `ch` occupies.
    pub fn len_of(self, ch: char) -> u32 {
        match self {
            PositionEncoding::Utf8 => ch.len_utf8() as u32,
            PositionEncoding::Utf16 => ch.len_utf16() as u32,
            PositionEncoding::Utf32 => 1,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            PositionEncoding::Utf8 => "utf-8",
            PositionEncoding::Utf16 => "utf-16",
            PositionEncoding::Utf32 => "utf-32",
        }
    }

    pub fn parse(name: &str) -> Option<Self> {
        match name {
            "utf-8" => Some(PositionEncoding::Utf8),
            "utf-16" => Some(PositionEncoding::Utf16),
            "utf-32" => Some(PositionEncoding::Utf32),
            _ => None,
        }
    }
}

/// Half-open byte interval `[start, end)` within one document.
///
/// A span with `start == end == 0` is the unanchored sentinel used to ask
/// for whole-document import organization.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Span {
    uri: DocumentUri,
    start: usize,
    end: usize,
}

impl Span {
    pub fn new(uri: DocumentUri, start: usize, end: usize) -> Result<Self> {
        if start > end {
            return Err(FormatError::conversion(
                &uri,
                format!("span start {} is after end {}", start, end),
            ));
        }
        Ok(Self { uri, start, end })
    }

    pub fn point(uri: DocumentUri, offset: usize) -> Self {
        Self {
            uri,
            start: offset,
            end: offset,
        }
    }

    pub fn sentinel(uri: DocumentUri) -> Self {
        Self::point(uri, 0)
    }

    pub fn uri(&self) -> &DocumentUri {
        &self.uri
    }

    pub fn start(&self) -> usize {
        self.start
    }

    pub fn end(&self) -> usize {
        self.end
    }

    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }

    pub fn is_sentinel(&self) -> bool {
        self.start == 0 && self.end == 0
    }
}

/// Internal edit: replace the bytes of `span` with `new_text`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpanEdit {
    pub span: Span,
    pub new_text: String,
}

impl SpanEdit {
    pub fn new(span: Span, new_text: impl Into<String>) -> Self {
        Self {
            span,
            new_text: new_text.into(),
        }
    }
}

/// Protocol-facing edit; the document is implied by the request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineEdit {
    pub range: TextRange,
    pub new_text: String,
}

impl LineEdit {
    pub fn new(range: TextRange, new_text: impl Into<String>) -> Self {
        Self {
            range,
            new_text: new_text.into(),
        }
    }
}

/// Content snapshot handed out by a document resolver.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Document {
    pub uri: DocumentUri,
    pub text: String,
    pub encoding: PositionEncoding,
}

impl Document {
    pub fn new(uri: DocumentUri, text: impl Into<String>, encoding: PositionEncoding) -> Self {
        Self {
            uri,
            text: text.into(),
            encoding,
        }
    }
}

/// Apply non-overlapping edits to `text`, back to front so earlier offsets
/// stay valid.
pub fn apply_edits(uri: &DocumentUri, text: &str, edits: &[SpanEdit]) -> Result<String> {
    let mut ordered: Vec<&SpanEdit> = edits.iter().collect();
    ordered.sort_by_key(|e| (e.span.start, e.span.end));

    let mut prev_end = 0;
    for edit in &ordered {
        let span = &edit.span;
        if span.uri() != uri {
            return Err(FormatError::conversion(
                uri,
                format!("edit targets another document: {}", span.uri()),
            ));
        }
        if span.end > text.len()
            || !text.is_char_boundary(span.start)
            || !text.is_char_boundary(span.end)
        {
            return Err(FormatError::conversion(
                uri,
                format!("edit span {}..{} is not within the text", span.start, span.end),
            ));
        }
        if span.start < prev_end {
            return Err(FormatError::conversion(
                uri,
                format!("edit span {}..{} overlaps a previous edit", span.start, span.end),
            ));
        }
        prev_end = span.end;
    }

    let mut result = text.to_string();
    for edit in ordered.iter().rev() {
        result.replace_range(edit.span.start..edit.span.end, &edit.new_text);
    }
    Ok(result)
}
