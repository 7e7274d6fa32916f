use crate::state::GlobalState;
use tower_lsp::lsp_types::*;
use tower_lsp::Client;

pub async fn handle_did_change_configuration(
    client: &Client,
    state: &GlobalState,
    params: DidChangeConfigurationParams,
) {
    client
        .log_message(MessageType::INFO, "Configuration changed")
        .await;

    // Settings live under the "spanfmt" section.
    let serde_json::Value::Object(map) = params.settings else {
        return;
    };
    let Some(section) = map.get("spanfmt") else {
        return;
    };

    match serde_json::from_value::<crate::config::LspSettings>(section.clone()) {
        Ok(new_settings) => {
            crate::logging::set_level(new_settings.log_level);
            *state.config.write().await = new_settings;
            state.reconfigure().await;

            client
                .log_message(MessageType::INFO, "LSP settings updated successfully")
                .await;
        }
        Err(e) => {
            client
                .log_message(
                    MessageType::ERROR,
                    format!("Failed to parse updated settings: {}", e),
                )
                .await;
        }
    }
}
