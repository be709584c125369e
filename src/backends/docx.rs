use super::{ooxml, pandoc};
use crate::converter::{format_map, require_input, Converter, ConverterKind, Dispatcher, StagedOutput};
use crate::config::Settings;
use crate::error::{ConvertError, ConvertResult};
use crate::format::FormatMap;
use quick_xml::escape::escape;
use std::path::Path;
use std::sync::Arc;

/// DOCX -> plain text, HTML and PDF
pub struct DocxConverter {
    settings: Arc<Settings>,
}

impl ConverterKind for DocxConverter {
    const NAME: &'static str = "docx";

    fn capabilities() -> FormatMap {
        format_map("docx", &["txt", "html", "pdf"])
    }

    fn build(dispatcher: &Dispatcher) -> Self {
        Self {
            settings: dispatcher.shared_settings(),
        }
    }
}

impl Converter for DocxConverter {
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
            "txt" => Self::to_text(input_path, output_path),
            "html" => Self::to_html(input_path, output_path),
            "pdf" => pandoc::render_pdf(&self.settings, input_path, "docx", output_path),
            _ => Err(ConvertError::unsupported(input_format, output_format)),
        }
    }
}

impl DocxConverter {
    fn to_text(input_path: &Path, output_path: &Path) -> ConvertResult<()> {
        let paragraphs = ooxml::read_paragraphs(input_path)?;

        let mut text = String::new();
        for paragraph in &paragraphs {
            text.push_str(paragraph);
            text.push('\n');
        }

        let mut staged = StagedOutput::new(output_path)?;
        staged.write_all(text.as_bytes())?;
        staged.commit()
    }

    fn to_html(input_path: &Path, output_path: &Path) -> ConvertResult<()> {
        let paragraphs = ooxml::read_paragraphs(input_path)?;
        let html = render_html(&paragraphs);

        let mut staged = StagedOutput::new(output_path)?;
        staged.write_all(html.as_bytes())?;
        staged.commit()
    }
}

/// One escaped `<p>` per paragraph inside a UTF-8 HTML document
pub(crate) fn render_html(paragraphs: &[String]) -> String {
    let mut lines = vec![
        "<!DOCTYPE html>".to_string(),
        r#"<html><head><meta charset="UTF-8"></head><body>"#.to_string(),
    ];
    lines.extend(
        paragraphs
            .iter()
            .map(|p| format!("<p>{}</p>", escape(p.as_str()))),
    );
    lines.push("</body></html>".to_string());
    lines.join("\n")
}
