use std::path::PathBuf;

use crate::config::LspSettings;
use crate::conversion::{encoding_to_lsp, lsp_to_encoding};
use crate::state::GlobalState;
use spanfmt_core::{FormatterConfig, PositionEncoding};
use tower_lsp::jsonrpc::Result;
use tower_lsp::lsp_types::*;
use tower_lsp::Client;

/// Handle "initialize" request
pub async fn handle_initialize(
    client: &Client,
    state: &GlobalState,
    params: InitializeParams,
) -> Result<InitializeResult> {
    if let Some(options) = params.initialization_options.clone() {
        match serde_json::from_value::<LspSettings>(options) {
            Ok(settings) => {
                crate::logging::set_level(settings.log_level);
                *state.config.write().await = settings;
            }
            Err(e) => {
                client
                    .log_message(
                        MessageType::WARNING,
                        format!("Ignoring invalid initializationOptions: {}", e),
                    )
                    .await;
            }
        }
    }

    match workspace_root(&params) {
        Some(root) => {
            client
                .log_message(
                    MessageType::INFO,
                    format!("Initializing workspace at: {:?}", root),
                )
                .await;

            let config_path = root.join(FormatterConfig::FILE_NAME);
            if let Ok(content) = std::fs::read_to_string(&config_path) {
                match FormatterConfig::from_yaml(&content) {
                    Ok(config) => {
                        log::info!("loaded {:?}", config_path);
                        *state.formatter_config.write().await = config;
                    }
                    Err(e) => {
                        client
                            .log_message(
                                MessageType::ERROR,
                                format!("Failed to parse {:?}: {}", config_path, e),
                            )
                            .await;
                    }
                }
            }
        }
        None => {
            client
                .log_message(MessageType::WARNING, "No workspace root provided!")
                .await;
        }
    }

    state.reconfigure().await;

    let preferred = state.config.read().await.position_encodings.clone();
    let offered = params
        .capabilities
        .general
        .as_ref()
        .and_then(|general| general.position_encodings.as_deref());
    let encoding = negotiate_encoding(&preferred, offered);
    state.documents.write().await.set_encoding(encoding);

    client
        .log_message(
            MessageType::INFO,
            format!("Using {} position encoding", encoding.as_str()),
        )
        .await;

    Ok(InitializeResult {
        capabilities: ServerCapabilities {
            position_encoding: Some(encoding_to_lsp(encoding)),
            text_document_sync: Some(TextDocumentSyncCapability::Kind(TextDocumentSyncKind::FULL)),
            document_formatting_provider: Some(OneOf::Left(true)),
            document_range_formatting_provider: Some(OneOf::Left(true)),
            ..Default::default()
        },
        server_info: Some(ServerInfo {
            name: "spanfmt".to_string(),
            version: Some(env!("CARGO_PKG_VERSION").to_string()),
        }),
    })
}

#[allow(deprecated)]
fn workspace_root(params: &InitializeParams) -> Option<PathBuf> {
    params
        .workspace_folders
        .as_ref()
        .and_then(|folders| folders.first())
        .map(|folder| &folder.uri)
        .or(params.root_uri.as_ref())
        .and_then(|uri| uri.to_file_path().ok())
}

/// First server-preferred encoding the client offers. Clients that offer
/// nothing only speak UTF-16.
pub fn negotiate_encoding(
    preferred: &[PositionEncoding],
    offered: Option<&[PositionEncodingKind]>,
) -> PositionEncoding {
    let offered: Vec<PositionEncoding> = offered
        .unwrap_or_default()
        .iter()
        .filter_map(lsp_to_encoding)
        .collect();

    preferred
        .iter()
        .copied()
        .find(|encoding| offered.contains(encoding))
        .unwrap_or(PositionEncoding::Utf16)
}

/// Handle "shutdown" request
pub async fn handle_shutdown(state: &GlobalState) -> Result<()> {
    let open = state.documents.read().await.len();
    log::info!("shutdown requested with {} open document(s)", open);
    Ok(())
}
