//! Edit conversion between byte spans and line/column ranges.
//!
//! `None` means "nothing was computed" and stays `None`; an empty list means
//! "computed, no changes" and stays empty. A single failing edit fails the
//! whole batch so callers never see a partial list.

use crate::error::Result;
use crate::line_map::ColumnMapper;
use crate::model::{LineEdit, SpanEdit};

pub fn to_line_edits(
    mapper: &ColumnMapper<'_>,
    edits: Option<&[SpanEdit]>,
) -> Result<Option<Vec<LineEdit>>> {
    let Some(edits) = edits else {
        return Ok(None);
    };

    edits
        .iter()
        .map(|edit| {
            let range = mapper.span_to_range(&edit.span)?;
            Ok(LineEdit::new(range, edit.new_text.clone()))
        })
        .collect::<Result<Vec<_>>>()
        .map(Some)
}

pub fn from_line_edits(
    mapper: &ColumnMapper<'_>,
    edits: Option<&[LineEdit]>,
) -> Result<Option<Vec<SpanEdit>>> {
    let Some(edits) = edits else {
        return Ok(None);
    };

    edits
        .iter()
        .map(|edit| {
            let span = mapper.range_to_span(edit.range)?;
            Ok(SpanEdit::new(span, edit.new_text.clone()))
        })
        .collect::<Result<Vec<_>>>()
        .map(Some)
}
