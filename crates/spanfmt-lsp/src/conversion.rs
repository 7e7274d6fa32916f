//! Conversion utilities between Core types and LSP types

use serde_json::json;
use spanfmt_core::{
    ColumnMapper, DocumentUri, ErrorKind, FormatError, LineEdit, Point, PositionEncoding,
    SpanEdit, TextRange,
};
use tower_lsp::jsonrpc::{Error, ErrorCode};
use tower_lsp::lsp_types::{Position, PositionEncodingKind, Range, TextEdit};
use url::Url;

/// Convert LSP Position to Core Point
/// Both count columns in the negotiated position encoding
pub fn lsp_position_to_point(position: Position) -> Point {
    Point {
        line: position.line,
        col: position.character,
    }
}

/// Convert Core Point to LSP Position
pub fn point_to_lsp_position(point: Point) -> Position {
    Position {
        line: point.line,
        character: point.col,
    }
}

pub fn lsp_range_to_text_range(range: Range) -> TextRange {
    TextRange {
        start: lsp_position_to_point(range.start),
        end: lsp_position_to_point(range.end),
    }
}

/// Convert Core TextRange to LSP Range
pub fn text_range_to_lsp_range(range: TextRange) -> Range {
    Range {
        start: point_to_lsp_position(range.start),
        end: point_to_lsp_position(range.end),
    }
}

pub fn line_edit_to_text_edit(edit: LineEdit) -> TextEdit {
    TextEdit {
        range: text_range_to_lsp_range(edit.range),
        new_text: edit.new_text,
    }
}

pub fn text_edit_to_line_edit(edit: &TextEdit) -> LineEdit {
    LineEdit::new(lsp_range_to_text_range(edit.range), edit.new_text.clone())
}

pub fn url_to_document_uri(url: &Url) -> DocumentUri {
    DocumentUri::new(url.as_str())
}

/// Byte-span edits to LSP edits. `None` stays `None`, empty stays empty.
pub fn to_protocol_edits(
    mapper: &ColumnMapper<'_>,
    edits: Option<&[SpanEdit]>,
) -> Result<Option<Vec<TextEdit>>, FormatError> {
    let line_edits = spanfmt_core::to_line_edits(mapper, edits)?;
    Ok(line_edits.map(|edits| edits.into_iter().map(line_edit_to_text_edit).collect()))
}

/// LSP edits to byte-span edits against the mapper's snapshot.
pub fn from_protocol_edits(
    mapper: &ColumnMapper<'_>,
    edits: Option<&[TextEdit]>,
) -> Result<Option<Vec<SpanEdit>>, FormatError> {
    let line_edits: Option<Vec<LineEdit>> =
        edits.map(|edits| edits.iter().map(text_edit_to_line_edit).collect());
    spanfmt_core::from_line_edits(mapper, line_edits.as_deref())
}

pub fn encoding_to_lsp(encoding: PositionEncoding) -> PositionEncodingKind {
    match encoding {
        PositionEncoding::Utf8 => PositionEncodingKind::UTF8,
        PositionEncoding::Utf16 => PositionEncodingKind::UTF16,
        PositionEncoding::Utf32 => PositionEncodingKind::UTF32,
    }
}

pub fn lsp_to_encoding(kind: &PositionEncodingKind) -> Option<PositionEncoding> {
    PositionEncoding::parse(kind.as_str())
}

/// Convert a Core FormatError to a JSON-RPC error
pub fn format_error_to_jsonrpc(err: &FormatError) -> Error {
    let code = match err.kind() {
        ErrorKind::OutOfRange => ErrorCode::InvalidParams,
        ErrorKind::ServiceFailure | ErrorKind::ConversionFailure => ErrorCode::InternalError,
    };

    Error {
        code,
        message: err.to_string().into(),
        data: Some(json!({
            "kind": err.kind().as_str(),
            "uri": err.uri().as_str(),
        })),
    }
}
