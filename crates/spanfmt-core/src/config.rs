use serde::{Deserialize, Serialize};

/// Top-level configuration, read from `spanfmt.yaml` at the workspace root.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FormatterConfig {
    #[serde(default)]
    pub dispatch: DispatchConfig,
    #[serde(default)]
    pub imports: ImportConfig,
    #[serde(default)]
    pub whitespace: WhitespaceConfig,
}

/// How format requests are routed
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DispatchConfig {
    /// Treat a `(0,0)-(0,0)` range request as a whole-document request.
    /// Editors that send no range for "format document" rely on this.
    #[serde(default = "default_true")]
    pub origin_point_organizes_imports: bool,
}

/// Settings for the built-in import block sorter
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImportConfig {
    /// A line starting with any of these prefixes is an import line.
    #[serde(default = "default_import_prefixes")]
    pub prefixes: Vec<String>,
}

/// Settings for the built-in whitespace formatter
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WhitespaceConfig {
    #[serde(default = "default_true")]
    pub trim_trailing: bool,
    /// Ensure exactly one `\n` at the end when the range reaches the end of
    /// the document.
    #[serde(default = "default_true")]
    pub final_newline: bool,
}

fn default_true() -> bool {
    true
}

fn default_import_prefixes() -> Vec<String> {
    vec!["use ".to_string(), "import ".to_string()]
}

impl Default for DispatchConfig {
    fn default() -> Self {
        Self {
            origin_point_organizes_imports: true,
        }
    }
}

impl Default for ImportConfig {
    fn default() -> Self {
        Self {
            prefixes: default_import_prefixes(),
        }
    }
}

impl Default for WhitespaceConfig {
    fn default() -> Self {
        Self {
            trim_trailing: true,
            final_newline: true,
        }
    }
}

impl Default for FormatterConfig {
    fn default() -> Self {
        Self {
            dispatch: DispatchConfig::default(),
            imports: ImportConfig::default(),
            whitespace: WhitespaceConfig::default(),
        }
    }
}

impl FormatterConfig {
    /// File name looked up at the workspace root
    pub const FILE_NAME: &'static str = "spanfmt.yaml";

    pub fn from_yaml(content: &str) -> Result<Self, serde_yaml::Error> {
        serde_yaml::from_str(content)
    }

    pub fn to_yaml(&self) -> Result<String, serde_yaml::Error> {
        serde_yaml::to_string(self)
    }
}
