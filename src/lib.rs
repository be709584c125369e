// Public API exports
pub mod backends;
pub mod config;
pub mod converter;
pub mod error;
pub mod format;
pub mod logging;

// Re-export main types for convenience
pub use converter::{
    CapabilityRegistry, Chain, Converter, ConverterEntry, ConverterKind, Dispatcher, StagedOutput,
};

pub use backends::{load_converters, DocConverter, DocxConverter, HtmlConverter, PdfConverter};

pub use config::{PdfTextStrategy, Settings};

pub use error::{ConvertError, ConvertResult, ErrorKind};

pub use format::{ConversionRequest, FormatMap, FormatTag};
