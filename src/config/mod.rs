//! Runtime settings for the built-in converters.
//!
//! Settings are deserialized via the `config` crate from an optional TOML
//! file and then from environment variables prefixed with `DOCBRIDGE_`,
//! using `__` between nested keys (`DOCBRIDGE_PDF__STRATEGY=ocr`).


use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

const ENV_PREFIX: &str = "DOCBRIDGE";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("failed to load configuration: {0}")]
    Load(#[from] config::ConfigError),
}

/// Root settings handed to every converter through the dispatcher
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// External programs used by the converters
    pub tools: ToolPaths,
    /// PDF text recovery
    pub pdf: PdfSettings,
    /// Options passed to pandoc when rendering PDFs
    pub pandoc: PandocSettings,
    /// Plain-text rendering
    pub text: TextSettings,
    /// Parent directory for scratch dirs (system temp dir when unset)
    pub scratch_dir: Option<PathBuf>,
    pub logging: LoggingSettings,
}

/// Program names or absolute paths of the external tools
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ToolPaths {
    pub soffice: String,
    pub pandoc: String,
    pub pdftoppm: String,
    pub tesseract: String,
}

/// How text is recovered from a PDF before it is written to DOCX
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PdfTextStrategy {
    /// Extract embedded text, OCR only when too little comes out
    #[default]
    Auto,
    /// Embedded text only
    Extract,
    /// Always rasterise and OCR
    Ocr,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PdfSettings {
    pub strategy: PdfTextStrategy,
    /// Non-whitespace characters below which `auto` treats a PDF as scanned
    pub min_text_chars: usize,
    /// Tesseract language pack(s), e.g. "eng" or "chi_sim+eng"
    pub ocr_language: String,
    /// Rasterisation resolution handed to pdftoppm
    pub ocr_dpi: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PandocSettings {
    pub pdf_engine: String,
    /// Passed as `-V mainfont=...` when set (needed for CJK text with xelatex)
    pub main_font: Option<String>,
    /// Passed as `-V geometry:<paper>`
    pub paper: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TextSettings {
    /// Column width used when rendering HTML to plain text
    pub wrap_width: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingSettings {
    /// Log level: `"trace"`, `"debug"`, `"info"`, `"warn"`, `"error"`
    pub level: String,
    /// `"pretty"` or `"json"`
    pub format: String,
}

impl Default for ToolPaths {
    fn default() -> Self {
        Self {
            soffice: "soffice".to_string(),
            pandoc: "pandoc".to_string(),
            pdftoppm: "pdftoppm".to_string(),
            tesseract: "tesseract".to_string(),
        }
    }
}

impl Default for PdfSettings {
    fn default() -> Self {
        Self {
            strategy: PdfTextStrategy::Auto,
            min_text_chars: 32,
            ocr_language: "eng".to_string(),
            ocr_dpi: 300,
        }
    }
}

impl Default for PandocSettings {
    fn default() -> Self {
        Self {
            pdf_engine: "xelatex".to_string(),
            main_font: None,
            paper: "a4paper".to_string(),
        }
    }
}

impl Default for TextSettings {
    fn default() -> Self {
        Self { wrap_width: 80 }
    }
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: "warn".to_string(),
            format: "pretty".to_string(),
        }
    }
}

impl Settings {
    /// Load settings from an optional TOML file, then the environment
    ///
    /// A missing `path` is an error when given explicitly; with `None` only
    /// defaults and environment overrides apply.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let mut builder = config::Config::builder();
        if let Some(path) = path {
            builder = builder.add_source(config::File::from(path).required(true));
        }

        let settings = builder
            .add_source(
                config::Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?
            .try_deserialize()?;

        Ok(settings)
    }
}
