use crate::config::LogLevel;
use crate::handlers;
use crate::state::GlobalState;
use crate::Backend;
use spanfmt_core::{Document, ImportOrganizer, PositionEncoding, ServiceError, Span, SpanEdit};
use std::fs;
use std::sync::Arc;
use tempfile::TempDir;
use tower_lsp::jsonrpc::ErrorCode;
use tower_lsp::lsp_types::*;
use tower_lsp::{Client, LspService};

fn setup_test_context() -> (GlobalState, Client) {
    let (service, _) = LspService::new(Backend::new);
    let client = service.inner().client.clone();
    let state = service.inner().state.clone();
    (state, client)
}

fn test_uri() -> Url {
    Url::parse("file:///workspace/src/main.rs").unwrap()
}

#[allow(deprecated)]
fn create_initialize_params(
    root_uri: Option<Url>,
    encodings: Option<Vec<PositionEncodingKind>>,
) -> InitializeParams {
    InitializeParams {
        process_id: None,
        root_path: None,
        root_uri,
        initialization_options: None,
        capabilities: ClientCapabilities {
            general: Some(GeneralClientCapabilities {
                position_encodings: encodings,
                ..Default::default()
            }),
            ..Default::default()
        },
        trace: None,
        workspace_folders: None,
        client_info: None,
        locale: None,
    }
}

async fn open(state: &GlobalState, text: &str) {
    handlers::handle_did_open(
        state,
        DidOpenTextDocumentParams {
            text_document: TextDocumentItem {
                uri: test_uri(),
                language_id: "rust".to_string(),
                version: 1,
                text: text.to_string(),
            },
        },
    )
    .await;
}

fn formatting_params(uri: Url) -> DocumentFormattingParams {
    DocumentFormattingParams {
        text_document: TextDocumentIdentifier { uri },
        options: FormattingOptions::default(),
        work_done_progress_params: Default::default(),
    }
}

fn range_formatting_params(range: Range) -> DocumentRangeFormattingParams {
    DocumentRangeFormattingParams {
        text_document: TextDocumentIdentifier { uri: test_uri() },
        range,
        options: FormattingOptions::default(),
        work_done_progress_params: Default::default(),
    }
}

fn range(start: (u32, u32), end: (u32, u32)) -> Range {
    Range {
        start: Position {
            line: start.0,
            character: start.1,
        },
        end: Position {
            line: end.0,
            character: end.1,
        },
    }
}

#[tokio::test]
async fn test_lsp_initialize_negotiates_encoding() {
    let (state, client) = setup_test_context();

    let params = create_initialize_params(
        None,
        Some(vec![PositionEncodingKind::UTF16, PositionEncodingKind::UTF8]),
    );
    let result = handlers::handle_initialize(&client, &state, params)
        .await
        .unwrap();

    assert_eq!(
        result.capabilities.position_encoding,
        Some(PositionEncodingKind::UTF8)
    );
    assert!(result.capabilities.document_formatting_provider.is_some());
    assert!(result.capabilities.document_range_formatting_provider.is_some());
    assert_eq!(
        state.documents.read().await.encoding(),
        PositionEncoding::Utf8
    );
}

#[tokio::test]
async fn test_lsp_initialize_defaults_to_utf16() {
    let (state, client) = setup_test_context();

    let result = handlers::handle_initialize(&client, &state, create_initialize_params(None, None))
        .await
        .unwrap();

    assert_eq!(
        result.capabilities.position_encoding,
        Some(PositionEncodingKind::UTF16)
    );
    assert_eq!(
        state.documents.read().await.encoding(),
        PositionEncoding::Utf16
    );
}

#[test]
fn test_negotiation_follows_server_preference() {
    let offered = [PositionEncodingKind::UTF16, PositionEncodingKind::UTF32];
    assert_eq!(
        handlers::negotiate_encoding(
            &[PositionEncoding::Utf32, PositionEncoding::Utf16],
            Some(&offered[..]),
        ),
        PositionEncoding::Utf32
    );
    assert_eq!(
        handlers::negotiate_encoding(&[PositionEncoding::Utf8], Some(&offered[..])),
        PositionEncoding::Utf16
    );
}

#[tokio::test]
async fn test_lsp_initialize_loads_workspace_config() {
    let (state, client) = setup_test_context();
    let temp_dir = TempDir::new().unwrap();
    fs::write(
        temp_dir.path().join("spanfmt.yaml"),
        concat!(
            "dispatch:\n  origin_point_organizes_imports: false\n",
            "imports:\n  prefixes: [\"#include \"]\n",
        ),
    )
    .unwrap();

    let root = Url::from_file_path(temp_dir.path()).unwrap();
    handlers::handle_initialize(&client, &state, create_initialize_params(Some(root), None))
        .await
        .unwrap();

    let config = state.formatter_config.read().await;
    assert_eq!(config.imports.prefixes, vec!["#include ".to_string()]);
    assert!(!state.formatter.read().await.config().origin_point_organizes_imports);
}

#[tokio::test]
async fn test_lsp_formatting_organizes_imports() {
    let (state, client) = setup_test_context();
    open(&state, "use b;\nuse a;\n\nfn main() {}\n").await;

    let edits = handlers::handle_formatting(&client, &state, formatting_params(test_uri()))
        .await
        .unwrap()
        .unwrap();

    assert_eq!(
        edits,
        vec![TextEdit {
            range: range((0, 0), (1, 6)),
            new_text: "use a;\nuse b;".to_string(),
        }]
    );
}

#[tokio::test]
async fn test_lsp_formatting_with_nothing_to_do_is_empty() {
    let (state, client) = setup_test_context();
    open(&state, "use a;\nuse b;\n").await;

    let edits = handlers::handle_formatting(&client, &state, formatting_params(test_uri()))
        .await
        .unwrap();

    assert_eq!(edits, Some(vec![]));
}

#[tokio::test]
async fn test_lsp_origin_range_matches_document_formatting() {
    let (state, client) = setup_test_context();
    open(&state, "use b;  \nuse a;\n").await;

    let whole = handlers::handle_formatting(&client, &state, formatting_params(test_uri()))
        .await
        .unwrap();
    let origin = handlers::handle_range_formatting(
        &client,
        &state,
        range_formatting_params(range((0, 0), (0, 0))),
    )
    .await
    .unwrap();

    assert_eq!(whole, origin);
}

#[tokio::test]
async fn test_lsp_range_formatting_counts_utf16_units() {
    let (state, client) = setup_test_context();
    open(&state, "let s = \"😀\";   \nnext  \n").await;

    let edits = handlers::handle_range_formatting(
        &client,
        &state,
        range_formatting_params(range((0, 0), (0, 1))),
    )
    .await
    .unwrap()
    .unwrap();

    // The emoji is two UTF-16 units, so the blanks sit at columns 13..16.
    assert_eq!(
        edits,
        vec![TextEdit {
            range: range((0, 13), (0, 16)),
            new_text: String::new(),
        }]
    );
}

#[tokio::test]
async fn test_lsp_range_formatting_counts_utf8_bytes() {
    let (state, client) = setup_test_context();
    handlers::handle_initialize(
        &client,
        &state,
        create_initialize_params(None, Some(vec![PositionEncodingKind::UTF8])),
    )
    .await
    .unwrap();
    open(&state, "let s = \"😀\";   \nnext  \n").await;

    let edits = handlers::handle_range_formatting(
        &client,
        &state,
        range_formatting_params(range((0, 0), (0, 1))),
    )
    .await
    .unwrap()
    .unwrap();

    assert_eq!(edits[0].range, range((0, 15), (0, 18)));
}

#[tokio::test]
async fn test_lsp_out_of_range_is_invalid_params() {
    let (state, client) = setup_test_context();
    open(&state, "one\ntwo\n").await;

    let err = handlers::handle_range_formatting(
        &client,
        &state,
        range_formatting_params(range((0, 0), (5, 0))),
    )
    .await
    .unwrap_err();

    assert_eq!(err.code, ErrorCode::InvalidParams);
    assert_eq!(err.data.unwrap()["kind"], "outOfRange");
}

#[tokio::test]
async fn test_lsp_unknown_document_fails() {
    let (state, client) = setup_test_context();

    let unknown = Url::parse("file:///workspace/missing.rs").unwrap();
    let err = handlers::handle_formatting(&client, &state, formatting_params(unknown))
        .await
        .unwrap_err();

    assert_eq!(err.code, ErrorCode::InternalError);
    assert_eq!(err.data.unwrap()["kind"], "serviceFailure");
}

#[tokio::test]
async fn test_lsp_formats_latest_change_and_forgets_closed() {
    let (state, client) = setup_test_context();
    open(&state, "use a;\n").await;

    handlers::handle_did_change(
        &state,
        DidChangeTextDocumentParams {
            text_document: VersionedTextDocumentIdentifier {
                uri: test_uri(),
                version: 2,
            },
            content_changes: vec![TextDocumentContentChangeEvent {
                range: None,
                range_length: None,
                text: "use z;\nuse y;\n".to_string(),
            }],
        },
    )
    .await;

    let edits = handlers::handle_formatting(&client, &state, formatting_params(test_uri()))
        .await
        .unwrap()
        .unwrap();
    assert_eq!(edits.len(), 1);
    assert_eq!(edits[0].new_text, "use y;\nuse z;");

    handlers::handle_did_close(
        &state,
        DidCloseTextDocumentParams {
            text_document: TextDocumentIdentifier { uri: test_uri() },
        },
    )
    .await;

    assert!(handlers::handle_formatting(&client, &state, formatting_params(test_uri()))
        .await
        .is_err());
}

#[tokio::test]
async fn test_lsp_configuration_can_disable_origin_sentinel() {
    let (state, client) = setup_test_context();
    open(&state, "use b;  \nuse a;\n").await;

    handlers::handle_did_change_configuration(
        &client,
        &state,
        DidChangeConfigurationParams {
            settings: serde_json::json!({
                "spanfmt": { "originPointOrganizesImports": false }
            }),
        },
    )
    .await;

    let edits = handlers::handle_range_formatting(
        &client,
        &state,
        range_formatting_params(range((0, 0), (0, 0))),
    )
    .await
    .unwrap()
    .unwrap();

    // Whitespace formatting of line 0 instead of import sorting.
    assert_eq!(
        edits,
        vec![TextEdit {
            range: range((0, 6), (0, 8)),
            new_text: String::new(),
        }]
    );
}

struct BrokenImports;

impl ImportOrganizer for BrokenImports {
    fn organize_imports(&self, _document: &Document) -> Result<Vec<SpanEdit>, ServiceError> {
        Err(ServiceError::new("imports", "expected `;`"))
    }
}

struct EchoFormatter;

impl spanfmt_core::RangeFormatter for EchoFormatter {
    fn format(&self, document: &Document, span: &Span) -> Result<Vec<SpanEdit>, ServiceError> {
        let text = &document.text[span.start()..span.end()];
        Ok(vec![SpanEdit::new(span.clone(), text.to_uppercase())])
    }
}

#[tokio::test]
async fn test_lsp_injected_services() {
    let (service, _) = LspService::new(|client| {
        Backend::with_services(client, Arc::new(BrokenImports), Arc::new(EchoFormatter))
    });
    let client = service.inner().client.clone();
    let state = service.inner().state.clone();
    open(&state, "fn main() {}\n").await;

    let err = handlers::handle_formatting(&client, &state, formatting_params(test_uri()))
        .await
        .unwrap_err();
    assert_eq!(err.code, ErrorCode::InternalError);

    let edits = handlers::handle_range_formatting(
        &client,
        &state,
        range_formatting_params(range((0, 3), (0, 7))),
    )
    .await
    .unwrap()
    .unwrap();
    assert_eq!(
        edits,
        vec![TextEdit {
            range: range((0, 3), (0, 7)),
            new_text: "MAIN".to_string(),
        }]
    );

    // Re-reading configuration keeps the injected services.
    state.reconfigure().await;
    assert!(handlers::handle_formatting(&client, &state, formatting_params(test_uri()))
        .await
        .is_err());
}

#[tokio::test]
async fn test_lsp_log_level_setting_enables_debug_records() {
    // Other tests may already have installed the logger.
    let _ = crate::logging::init();
    let (state, client) = setup_test_context();

    handlers::handle_did_change_configuration(
        &client,
        &state,
        DidChangeConfigurationParams {
            settings: serde_json::json!({ "spanfmt": { "logLevel": "debug" } }),
        },
    )
    .await;

    let debug = log::Metadata::builder()
        .level(log::Level::Debug)
        .target("spanfmt_lsp")
        .build();
    assert!(log::logger().enabled(&debug));
    assert_eq!(state.config.read().await.log_level, LogLevel::Debug);
}
