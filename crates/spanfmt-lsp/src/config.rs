use serde::{Deserialize, Serialize};
use spanfmt_core::PositionEncoding;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct LspSettings {
    /// Logging level for the LSP server
    pub log_level: LogLevel,

    /// Position encodings the server accepts, most preferred first
    pub position_encodings: Vec<PositionEncoding>,

    /// Overrides `dispatch.origin_point_organizes_imports` from spanfmt.yaml
    pub origin_point_organizes_imports: Option<bool>,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub enum LogLevel {
    Trace,
    Debug,
    Info,
    Warning,
    Error,
}

impl LogLevel {
    pub fn to_level_filter(self) -> log::LevelFilter {
        match self {
            LogLevel::Trace => log::LevelFilter::Trace,
            LogLevel::Debug => log::LevelFilter::Debug,
            LogLevel::Info => log::LevelFilter::Info,
            LogLevel::Warning => log::LevelFilter::Warn,
            LogLevel::Error => log::LevelFilter::Error,
        }
    }
}

impl Default for LspSettings {
    fn default() -> Self {
        Self {
            log_level: LogLevel::Info,
            position_encodings: vec![
                PositionEncoding::Utf8,
                PositionEncoding::Utf16,
                PositionEncoding::Utf32,
            ],
            origin_point_organizes_imports: None,
        }
    }
}
