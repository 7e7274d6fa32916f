use crate::conversion::url_to_document_uri;
use crate::state::GlobalState;
use tower_lsp::lsp_types::*;

/// Handle "textDocument/didOpen" notification
pub async fn handle_did_open(state: &GlobalState, params: DidOpenTextDocumentParams) {
    let doc = params.text_document;
    let uri = url_to_document_uri(&doc.uri);
    log::debug!("opened {} (version {})", uri, doc.version);

    let mut documents = state.documents.write().await;
    documents.open(uri, doc.version, doc.text);
}

/// Handle "textDocument/didChange" notification
/// Full sync: the last change carries the whole text.
pub async fn handle_did_change(state: &GlobalState, params: DidChangeTextDocumentParams) {
    let uri = url_to_document_uri(&params.text_document.uri);
    let version = params.text_document.version;

    if let Some(last_change) = params.content_changes.into_iter().last() {
        let mut documents = state.documents.write().await;
        documents.update(uri, version, last_change.text);
    }
}

/// Handle "textDocument/didClose" notification
pub async fn handle_did_close(state: &GlobalState, params: DidCloseTextDocumentParams) {
    let uri = url_to_document_uri(&params.text_document.uri);
    let mut documents = state.documents.write().await;
    if documents.close(&uri).is_none() {
        log::warn!("closed {} which was not open", uri);
    }
}
