mod doc;
mod docx;
mod html;
mod ooxml;
mod pandoc;
mod pdf;
mod process;

#[cfg(test)]
mod tests;

pub use doc::DocConverter;
pub use docx::DocxConverter;
pub use html::HtmlConverter;
pub use ooxml::{parse_document_xml, read_paragraphs, write_docx};
pub use pdf::PdfConverter;
pub use process::{ToolCommand, ToolOutput};

use crate::converter::{CapabilityRegistry, ConverterEntry};

/// Every built-in converter, in registration order
///
/// Later entries win when two converters declare the same pair.
pub fn builtin() -> [ConverterEntry; 4] {
    [
        ConverterEntry::of::<DocxConverter>(),
        ConverterEntry::of::<PdfConverter>(),
        ConverterEntry::of::<HtmlConverter>(),
        ConverterEntry::of::<DocConverter>(),
    ]
}

/// Register every built-in converter's declared pairs
///
/// Idempotent: loading twice leaves the registry unchanged.
pub fn load_converters(registry: &mut CapabilityRegistry) {
    for entry in builtin() {
        registry.register_converter(entry);
    }
    tracing::debug!("Loaded {} conversion pairs", registry.len());
}
