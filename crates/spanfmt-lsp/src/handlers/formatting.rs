use crate::conversion::{
    format_error_to_jsonrpc, line_edit_to_text_edit, lsp_range_to_text_range, url_to_document_uri,
};
use crate::state::GlobalState;
use spanfmt_core::{DocumentUri, FormatError, FormatRequest, LineEdit};
use tower_lsp::jsonrpc::Result;
use tower_lsp::lsp_types::*;
use tower_lsp::Client;

/// Handle "textDocument/formatting" request
pub async fn handle_formatting(
    client: &Client,
    state: &GlobalState,
    params: DocumentFormattingParams,
) -> Result<Option<Vec<TextEdit>>> {
    let uri = url_to_document_uri(&params.text_document.uri);
    let result = run(state, &uri, FormatRequest::WholeDocument).await;
    respond(client, &uri, result).await
}

/// Handle "textDocument/rangeFormatting" request
pub async fn handle_range_formatting(
    client: &Client,
    state: &GlobalState,
    params: DocumentRangeFormattingParams,
) -> Result<Option<Vec<TextEdit>>> {
    let uri = url_to_document_uri(&params.text_document.uri);
    let range = lsp_range_to_text_range(params.range);
    let result = run(state, &uri, FormatRequest::Range(range)).await;
    respond(client, &uri, result).await
}

/// Format against one snapshot: the document lock is held until the edits
/// are expressed in line/column form.
async fn run(
    state: &GlobalState,
    uri: &DocumentUri,
    request: FormatRequest,
) -> std::result::Result<Vec<LineEdit>, FormatError> {
    let documents = state.documents.read().await;
    let formatter = state.formatter.read().await;
    formatter.format(&*documents, uri, request)
}

async fn respond(
    client: &Client,
    uri: &DocumentUri,
    result: std::result::Result<Vec<LineEdit>, FormatError>,
) -> Result<Option<Vec<TextEdit>>> {
    match result {
        Ok(edits) => {
            log::debug!("{} edit(s) for {}", edits.len(), uri);
            Ok(Some(edits.into_iter().map(line_edit_to_text_edit).collect()))
        }
        Err(e) => {
            client
                .log_message(MessageType::ERROR, format!("Formatting failed: {}", e))
                .await;
            Err(format_error_to_jsonrpc(&e))
        }
    }
}
