use crate::model::DocumentUri;

/// Failure reported by an external collaborator (document resolver,
/// import organizer, range formatter).
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{service}: {message}")]
pub struct ServiceError {
    pub service: &'static str,
    pub message: String,
}

impl ServiceError {
    pub fn new(service: &'static str, message: impl Into<String>) -> Self {
        Self {
            service,
            message: message.into(),
        }
    }
}

/// Closed set of failure kinds, for callers that branch on the kind only.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    OutOfRange,
    ServiceFailure,
    ConversionFailure,
}

impl ErrorKind {
    pub fn as_str(self) -> &'static str {
        match self {
            ErrorKind::OutOfRange => "outOfRange",
            ErrorKind::ServiceFailure => "serviceFailure",
            ErrorKind::ConversionFailure => "conversionFailure",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FormatError {
    /// A line or column beyond the bounds of the document snapshot.
    #[error("position {line}:{col} is out of range in {uri}")]
    OutOfRange { uri: DocumentUri, line: u32, col: u32 },

    #[error("formatting {uri} failed: {source}")]
    ServiceFailure {
        uri: DocumentUri,
        #[source]
        source: ServiceError,
    },

    /// An offset or position that does not denote a character boundary of
    /// the snapshot, or an edit naming another document.
    #[error("cannot convert coordinates in {uri}: {detail}")]
    ConversionFailure { uri: DocumentUri, detail: String },
}

impl FormatError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            FormatError::OutOfRange { .. } => ErrorKind::OutOfRange,
            FormatError::ServiceFailure { .. } => ErrorKind::ServiceFailure,
            FormatError::ConversionFailure { .. } => ErrorKind::ConversionFailure,
        }
    }

    pub fn uri(&self) -> &DocumentUri {
        match self {
            FormatError::OutOfRange { uri, .. }
            | FormatError::ServiceFailure { uri, .. }
            | FormatError::ConversionFailure { uri, .. } => uri,
        }
    }

    pub(crate) fn conversion(uri: &DocumentUri, detail: impl Into<String>) -> Self {
        FormatError::ConversionFailure {
            uri: uri.clone(),
            detail: detail.into(),
        }
    }

    pub(crate) fn service(uri: &DocumentUri, source: ServiceError) -> Self {
        FormatError::ServiceFailure {
            uri: uri.clone(),
            source,
        }
    }
}

pub type Result<T, E = FormatError> = std::result::Result<T, E>;
