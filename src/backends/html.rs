use super::pandoc;
use crate::config::Settings;
use crate::converter::{format_map, require_input, Converter, ConverterKind, Dispatcher, StagedOutput};
use crate::error::{ConvertError, ConvertResult};
use crate::format::FormatMap;
use std::fs;
use std::path::Path;
use std::sync::Arc;

/// HTML -> plain text and PDF
pub struct HtmlConverter {
    settings: Arc<Settings>,
}

impl ConverterKind for HtmlConverter {
    const NAME: &'static str = "html";

    fn capabilities() -> FormatMap {
        format_map("html", &["txt", "pdf"])
    }

    fn build(dispatcher: &Dispatcher) -> Self {
        Self {
            settings: dispatcher.shared_settings(),
        }
    }
}

impl Converter for HtmlConverter {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    fn supported_formats(&self) -> FormatMap {
        Self::capabilities()
    }

    fn convert(
        &self,
        input_path: &Path,
        output_path: &Path,
        input_format: &str,
        output_format: &str,
    ) -> ConvertResult<()> {
        if !self.can_convert(input_format, output_format) {
            return Err(ConvertError::unsupported(input_format, output_format));
        }
        require_input(input_path)?;

        match output_format {
            "txt" => self.to_text(input_path, output_path),
            "pdf" => pandoc::render_pdf(&self.settings, input_path, "html", output_path),
            _ => Err(ConvertError::unsupported(input_format, output_format)),
        }
    }
}

impl HtmlConverter {
    fn to_text(&self, input_path: &Path, output_path: &Path) -> ConvertResult<()> {
        let html = fs::read(input_path).map_err(|e| ConvertError::read(input_path, e))?;
        let text = html2text::from_read(html.as_slice(), self.settings.text.wrap_width.max(1));

        let mut staged = StagedOutput::new(output_path)?;
        staged.write_all(text.as_bytes())?;
        staged.commit()
    }
}
