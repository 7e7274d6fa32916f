use std::sync::Arc;
use tokio::sync::RwLock;

use spanfmt_core::builtin::{ImportBlockSorter, WhitespaceFormatter};
use spanfmt_core::{DocumentFormatter, FormatterConfig, ImportOrganizer, RangeFormatter};

use crate::config::LspSettings;
use crate::documents::DocumentStore;

/// Global state for LSP server
/// Must be Send + Sync
#[derive(Clone)]
pub struct GlobalState {
    /// Open documents. Format requests hold the read lock for their whole
    /// duration so they see a single snapshot.
    pub documents: Arc<RwLock<DocumentStore>>,

    pub formatter: Arc<RwLock<DocumentFormatter>>,

    /// Workspace `spanfmt.yaml`, or defaults
    pub formatter_config: Arc<RwLock<FormatterConfig>>,

    /// Client settings (`workspace/didChangeConfiguration`)
    pub config: Arc<RwLock<LspSettings>>,

    /// Whether `formatter` uses the built-in services and should be rebuilt
    /// when `spanfmt.yaml` changes them.
    pub builtin_services: bool,
}

impl GlobalState {
    pub fn new() -> Self {
        let config = FormatterConfig::default();
        let formatter = builtin_formatter(&config);
        Self::build(formatter, config, true)
    }

    /// State around caller-provided services
    pub fn with_services(
        organizer: Arc<dyn ImportOrganizer>,
        formatter: Arc<dyn RangeFormatter>,
    ) -> Self {
        let config = FormatterConfig::default();
        let formatter = DocumentFormatter::new(organizer, formatter, config.dispatch.clone());
        Self::build(formatter, config, false)
    }

    fn build(
        formatter: DocumentFormatter,
        config: FormatterConfig,
        builtin_services: bool,
    ) -> Self {
        Self {
            documents: Arc::new(RwLock::new(DocumentStore::default())),
            formatter: Arc::new(RwLock::new(formatter)),
            formatter_config: Arc::new(RwLock::new(config)),
            config: Arc::new(RwLock::new(LspSettings::default())),
            builtin_services,
        }
    }

    /// Re-apply `spanfmt.yaml` and client settings to the formatter.
    pub async fn reconfigure(&self) {
        let file_config = self.formatter_config.read().await.clone();
        let settings = self.config.read().await.clone();

        let mut dispatch = file_config.dispatch.clone();
        if let Some(origin) = settings.origin_point_organizes_imports {
            dispatch.origin_point_organizes_imports = origin;
        }

        let mut formatter = self.formatter.write().await;
        if self.builtin_services {
            *formatter = builtin_formatter(&file_config);
        }
        formatter.set_config(dispatch);
    }
}

impl Default for GlobalState {
    fn default() -> Self {
        Self::new()
    }
}

fn builtin_formatter(config: &FormatterConfig) -> DocumentFormatter {
    DocumentFormatter::new(
        Arc::new(ImportBlockSorter::new(&config.imports)),
        Arc::new(WhitespaceFormatter::new(&config.whitespace)),
        config.dispatch.clone(),
    )
}
