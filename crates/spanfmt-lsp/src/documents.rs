use std::collections::HashMap;

use spanfmt_core::{Document, DocumentResolver, DocumentUri, PositionEncoding, ServiceError};

/// Text of an open document as last sent by the client
#[derive(Debug, Clone)]
pub struct OpenDocument {
    pub version: i32,
    pub text: String,
}

/// Open documents keyed by URI, plus the position encoding negotiated with
/// the client. Serves as the `DocumentResolver` for format requests.
#[derive(Debug, Default)]
pub struct DocumentStore {
    encoding: PositionEncoding,
    documents: HashMap<DocumentUri, OpenDocument>,
}

impl DocumentStore {
    pub fn new(encoding: PositionEncoding) -> Self {
        Self {
            encoding,
            documents: HashMap::new(),
        }
    }

    pub fn encoding(&self) -> PositionEncoding {
        self.encoding
    }

    pub fn set_encoding(&mut self, encoding: PositionEncoding) {
        self.encoding = encoding;
    }

    pub fn open(&mut self, uri: DocumentUri, version: i32, text: String) {
        self.documents.insert(uri, OpenDocument { version, text });
    }

    /// Replace the full text. Out-of-order versions are ignored.
    pub fn update(&mut self, uri: DocumentUri, version: i32, text: String) {
        match self.documents.get_mut(&uri) {
            Some(doc) if doc.version > version => {
                log::warn!(
                    "ignoring stale change for {} (version {} < {})",
                    uri,
                    version,
                    doc.version
                );
            }
            Some(doc) => {
                doc.version = version;
                doc.text = text;
            }
            None => {
                self.documents.insert(uri, OpenDocument { version, text });
            }
        }
    }

    pub fn close(&mut self, uri: &DocumentUri) -> Option<OpenDocument> {
        self.documents.remove(uri)
    }

    pub fn get(&self, uri: &DocumentUri) -> Option<&OpenDocument> {
        self.documents.get(uri)
    }

    pub fn len(&self) -> usize {
        self.documents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.documents.is_empty()
    }
}

impl DocumentResolver for DocumentStore {
    fn resolve(&self, uri: &DocumentUri) -> Result<Document, ServiceError> {
        let doc = self
            .documents
            .get(uri)
            .ok_or_else(|| ServiceError::new("documents", format!("{} is not open", uri)))?;
        Ok(Document::new(uri.clone(), doc.text.clone(), self.encoding))
    }
}
