//! Spanfmt LSP Library
//!
//! LSP protocol layer, converts formatting requests to Core library calls.

use std::sync::Arc;

use spanfmt_core::{ImportOrganizer, RangeFormatter};
use tower_lsp::jsonrpc::Result;
use tower_lsp::lsp_types::*;
use tower_lsp::{Client, LspService};

use crate::state::GlobalState;

pub mod config;
pub mod conversion;
pub mod documents;
mod handlers;
pub mod logging;
mod state;
#[cfg(test)]
mod tests;

/// LSP backend implementation
pub struct Backend {
    client: Client,
    state: GlobalState,
}

impl Backend {
    /// Backend using the built-in import sorter and whitespace formatter
    pub fn new(client: Client) -> Self {
        Self {
            client,
            state: GlobalState::new(),
        }
    }

    pub fn with_services(
        client: Client,
        organizer: Arc<dyn ImportOrganizer>,
        formatter: Arc<dyn RangeFormatter>,
    ) -> Self {
        Self {
            client,
            state: GlobalState::with_services(organizer, formatter),
        }
    }
}

#[tower_lsp::async_trait]
impl tower_lsp::LanguageServer for Backend {
    async fn initialize(&self, params: InitializeParams) -> Result<InitializeResult> {
        handlers::handle_initialize(&self.client, &self.state, params).await
    }

    async fn initialized(&self, _: InitializedParams) {
        log::info!("client initialized, ready to accept requests");
    }

    async fn shutdown(&self) -> Result<()> {
        handlers::handle_shutdown(&self.state).await
    }

    async fn did_open(&self, params: DidOpenTextDocumentParams) {
        handlers::handle_did_open(&self.state, params).await
    }

    async fn did_change(&self, params: DidChangeTextDocumentParams) {
        handlers::handle_did_change(&self.state, params).await
    }

    async fn did_close(&self, params: DidCloseTextDocumentParams) {
        handlers::handle_did_close(&self.state, params).await
    }

    async fn did_change_configuration(&self, params: DidChangeConfigurationParams) {
        handlers::handle_did_change_configuration(&self.client, &self.state, params).await
    }

    async fn formatting(&self, params: DocumentFormattingParams) -> Result<Option<Vec<TextEdit>>> {
        handlers::handle_formatting(&self.client, &self.state, params).await
    }

    async fn range_formatting(
        &self,
        params: DocumentRangeFormattingParams,
    ) -> Result<Option<Vec<TextEdit>>> {
        handlers::handle_range_formatting(&self.client, &self.state, params).await
    }
}

/// Create and return LSP service and client socket
pub fn create_lsp_service() -> (LspService<Backend>, tower_lsp::ClientSocket) {
    LspService::new(Backend::new)
}
