//! Spanfmt LSP Server Binary Entry Point

use spanfmt_lsp::create_lsp_service;
use tower_lsp::Server;

#[tokio::main]
async fn main() {
    // stdout carries the protocol; logs go to stderr.
    if let Err(e) = spanfmt_lsp::logging::init() {
        eprintln!("spanfmt: logger already installed: {}", e);
    }

    log::info!("spanfmt {} starting on stdin/stdout", env!("CARGO_PKG_VERSION"));

    let stdin = tokio::io::stdin();
    let stdout = tokio::io::stdout();

    let (service, socket) = create_lsp_service();
    Server::new(stdin, stdout, socket).serve(service).await;
}
