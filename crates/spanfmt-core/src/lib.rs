//! Spanfmt Core Library
//!
//! Coordinate mapping, edit conversion and format dispatch.
//! No IO dependencies, pure logic only.
//!

pub mod builtin;
pub mod config;
pub mod convert;
pub mod error;
pub mod format;
pub mod line_map;
pub mod model;

pub use config::FormatterConfig;
pub use convert::{from_line_edits, to_line_edits};
pub use error::{ErrorKind, FormatError, ServiceError};
pub use format::{
    DocumentFormatter, DocumentResolver, FormatRequest, ImportOrganizer, RangeFormatter,
};
pub use line_map::ColumnMapper;
pub use model::{
    Document, DocumentUri, LineEdit, Point, PositionEncoding, Span, SpanEdit, TextRange,
};
