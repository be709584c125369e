use super::ooxml;
use super::process::ToolCommand;
use crate::config::PdfTextStrategy;
use crate::converter::{format_map, require_input, Converter, ConverterKind, Dispatcher, StagedOutput};
use crate::error::{ConvertError, ConvertResult};
use crate::format::FormatMap;
use std::cell::Cell;
use std::fs;
use std::panic::{self, UnwindSafe};
use std::path::{Path, PathBuf};
use std::sync::Once;
use std::thread;

/// PDF -> plain text and DOCX
///
/// DOCX output carries recovered text only; layout is not reconstructed.
pub struct PdfConverter {
    dispatcher: Dispatcher,
}

impl ConverterKind for PdfConverter {
    const NAME: &'static str = "pdf";

    fn capabilities() -> FormatMap {
        format_map("pdf", &["docx", "txt"])
    }

    fn build(dispatcher: &Dispatcher) -> Self {
        Self {
            dispatcher: dispatcher.clone(),
        }
    }
}

impl Converter for PdfConverter {
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
            "docx" => self.to_docx(input_path, output_path),
            _ => Err(ConvertError::unsupported(input_format, output_format)),
        }
    }
}

impl PdfConverter {
    fn to_text(input_path: &Path, output_path: &Path) -> ConvertResult<()> {
        let text = extract_text(input_path)?;

        let mut staged = StagedOutput::new(output_path)?;
        staged.write_all(text.as_bytes())?;
        staged.commit()
    }

    fn to_docx(&self, input_path: &Path, output_path: &Path) -> ConvertResult<()> {
        let text = self.recover_text(input_path, output_path)?;
        let paragraphs: Vec<&str> = text.lines().map(str::trim_end).collect();

        let mut staged = StagedOutput::new(output_path)?;
        ooxml::write_docx(staged.file(), &paragraphs)
            .map_err(|e| ConvertError::write(output_path, e))?;
        staged.commit()
    }

    /// Text for DOCX output according to the configured strategy
    fn recover_text(&self, input_path: &Path, output_path: &Path) -> ConvertResult<String> {
        let pdf = &self.dispatcher.settings().pdf;

        match pdf.strategy {
            PdfTextStrategy::Extract => extract_text(input_path),
            PdfTextStrategy::Ocr => self.ocr_text(input_path, output_path),
            PdfTextStrategy::Auto => match extract_text(input_path) {
                Ok(text) if visible_chars(&text) >= pdf.min_text_chars => Ok(text),
                Ok(text) => {
                    tracing::info!(
                        "{} has only {} characters of embedded text, treating it as scanned",
                        input_path.display(),
                        visible_chars(&text)
                    );
                    self.ocr_text(input_path, output_path)
                }
                Err(e) => {
                    tracing::warn!("Text extraction failed ({}), falling back to OCR", e);
                    self.ocr_text(input_path, output_path)
                }
            },
        }
    }

    /// Rasterise every page with pdftoppm and recognise it with tesseract
    fn ocr_text(&self, input_path: &Path, output_path: &Path) -> ConvertResult<String> {
        let settings = self.dispatcher.settings();
        let scratch = self.dispatcher.scratch_dir()?;

        ToolCommand::new(&settings.tools.pdftoppm)
            .arg("-r")
            .arg(settings.pdf.ocr_dpi.to_string())
            .arg("-png")
            .arg(input_path)
            .arg(scratch.path().join("page"))
            .run(output_path)?;

        let pages = rendered_pages(scratch.path()).map_err(|e| ConvertError::read(input_path, e))?;
        if pages.is_empty() {
            return Err(ConvertError::read(input_path, "no pages could be rasterised"));
        }

        let mut text = String::new();
        for page in &pages {
            let recognised = ToolCommand::new(&settings.tools.tesseract)
                .arg(page)
                .arg("stdout")
                .arg("-l")
                .arg(&settings.pdf.ocr_language)
                .run(output_path)?;
            text.push_str(&String::from_utf8_lossy(&recognised.stdout));
            if !recognised.stderr.trim().is_empty() {
                tracing::debug!("tesseract {}: {}", page.display(), recognised.stderr.trim());
            }
        }
        tracing::debug!("OCR recognised {} pages", pages.len());

        if let Err(e) = scratch.close() {
            tracing::warn!("Failed to remove OCR scratch directory: {}", e);
        }
        Ok(text)
    }
}

/// Embedded text of every page
///
/// The PDF parser can panic on malformed input; that is reported as a read
/// failure like any other parse error.
fn extract_text(input_path: &Path) -> ConvertResult<String> {
    match quiet_panics(|| pdf_extract::extract_text(input_path)) {
        Ok(Ok(text)) => Ok(text),
        Ok(Err(e)) => Err(ConvertError::read(input_path, e)),
        Err(_) => Err(ConvertError::read(input_path, "PDF parser aborted on malformed input")),
    }
}

thread_local! {
    pub(super) static QUIET_PANICS: Cell<bool> = const { Cell::new(false) };
}

static PANIC_HOOK: Once = Once::new();

/// `catch_unwind` that keeps the panic message off stderr
///
/// The process-wide hook is wrapped once; it only stays silent (logging at
/// debug instead) on the thread currently inside `f`.
pub(super) fn quiet_panics<T>(f: impl FnOnce() -> T + UnwindSafe) -> thread::Result<T> {
    PANIC_HOOK.call_once(|| {
        let previous = panic::take_hook();
        panic::set_hook(Box::new(move |info| {
            if QUIET_PANICS.with(Cell::get) {
                tracing::debug!("PDF parser panicked: {}", info);
            } else {
                previous(info);
            }
        }));
    });

    QUIET_PANICS.with(|quiet| quiet.set(true));
    let result = panic::catch_unwind(f);
    QUIET_PANICS.with(|quiet| quiet.set(false));
    result
}

fn visible_chars(text: &str) -> usize {
    text.chars().filter(|c| !c.is_whitespace()).count()
}

/// PNG pages written by pdftoppm, in page order
fn rendered_pages(dir: &Path) -> std::io::Result<Vec<PathBuf>> {
    let mut pages: Vec<PathBuf> = fs::read_dir(dir)?
        .filter_map(Result::ok)
        .map(|entry| entry.path())
        .filter(|path| path.extension().is_some_and(|ext| ext == "png"))
        .collect();
    // pdftoppm zero-pads page numbers to a common width
    pages.sort();
    Ok(pages)
}
