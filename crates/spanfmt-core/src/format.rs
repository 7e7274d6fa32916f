//! Format request dispatch.
//!
//! A request either asks for the whole document (import organization) or for
//! a range (scoped formatting). Both end up as byte-span edits from one of two
//! injected services, which are then converted back to line/column edits
//! against the same snapshot the request was resolved with.

use std::sync::Arc;

use log::debug;

use crate::config::DispatchConfig;
use crate::convert::to_line_edits;
use crate::error::{FormatError, Result, ServiceError};
use crate::line_map::ColumnMapper;
use crate::model::{Document, DocumentUri, LineEdit, Span, SpanEdit, TextRange};

/// Resolves a document identifier to its current content snapshot.
pub trait DocumentResolver {
    fn resolve(&self, uri: &DocumentUri) -> Result<Document, ServiceError>;
}

/// Whole-document import organization.
pub trait ImportOrganizer: Send + Sync {
    fn organize_imports(&self, document: &Document) -> Result<Vec<SpanEdit>, ServiceError>;
}

/// Formatting scoped to a span. Implementations may return edits that reach
/// past the span (e.g. widened to whole statements).
pub trait RangeFormatter: Send + Sync {
    fn format(&self, document: &Document, span: &Span) -> Result<Vec<SpanEdit>, ServiceError>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormatRequest {
    WholeDocument,
    Range(TextRange),
}

pub struct DocumentFormatter {
    organizer: Arc<dyn ImportOrganizer>,
    formatter: Arc<dyn RangeFormatter>,
    config: DispatchConfig,
}

impl DocumentFormatter {
    pub fn new(
        organizer: Arc<dyn ImportOrganizer>,
        formatter: Arc<dyn RangeFormatter>,
        config: DispatchConfig,
    ) -> Self {
        Self {
            organizer,
            formatter,
            config,
        }
    }

    pub fn config(&self) -> &DispatchConfig {
        &self.config
    }

    pub fn set_config(&mut self, config: DispatchConfig) {
        self.config = config;
    }

    pub fn format_whole_document(
        &self,
        resolver: &dyn DocumentResolver,
        uri: &DocumentUri,
    ) -> Result<Vec<LineEdit>> {
        self.format(resolver, uri, FormatRequest::WholeDocument)
    }

    pub fn format_range(
        &self,
        resolver: &dyn DocumentResolver,
        uri: &DocumentUri,
        range: TextRange,
    ) -> Result<Vec<LineEdit>> {
        self.format(resolver, uri, FormatRequest::Range(range))
    }

    /// Resolve the document once, compute edits, and express them in the
    /// document's line/column coordinates.
    pub fn format(
        &self,
        resolver: &dyn DocumentResolver,
        uri: &DocumentUri,
        request: FormatRequest,
    ) -> Result<Vec<LineEdit>> {
        let document = resolver
            .resolve(uri)
            .map_err(|e| FormatError::service(uri, e))?;
        let mapper = ColumnMapper::for_document(&document);

        let edits = match request {
            FormatRequest::WholeDocument => self.organize_imports(&document)?,
            FormatRequest::Range(range) => {
                let span = mapper.range_to_span(range)?;
                self.dispatch(&document, &span)?
            }
        };

        Ok(to_line_edits(&mapper, Some(edits.as_slice()))?.unwrap_or_default())
    }

    /// Route an already resolved span: the origin point organizes imports
    /// (unless disabled), anything else is formatted as a range.
    pub fn dispatch(&self, document: &Document, span: &Span) -> Result<Vec<SpanEdit>> {
        if span.is_sentinel() && self.config.origin_point_organizes_imports {
            return self.organize_imports(document);
        }

        debug!(
            "formatting {} bytes {}..{}",
            document.uri,
            span.start(),
            span.end()
        );
        let edits = self
            .formatter
            .format(document, span)
            .map_err(|e| FormatError::service(&document.uri, e))?;
        check_edits(document, edits)
    }

    fn organize_imports(&self, document: &Document) -> Result<Vec<SpanEdit>> {
        debug!("organizing imports in {}", document.uri);
        let edits = self
            .organizer
            .organize_imports(document)
            .map_err(|e| FormatError::service(&document.uri, e))?;
        check_edits(document, edits)
    }
}

fn check_edits(document: &Document, edits: Vec<SpanEdit>) -> Result<Vec<SpanEdit>> {
    if let Some(stray) = edits.iter().find(|e| e.span.uri() != &document.uri) {
        return Err(FormatError::conversion(
            &document.uri,
            format!("service returned an edit for {}", stray.span.uri()),
        ));
    }
    debug!("{} edit(s) for {}", edits.len(), document.uri);
    Ok(edits)
}
