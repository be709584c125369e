use super::process::ToolCommand;
use crate::converter::{
    format_map, require_input, Chain, Converter, ConverterKind, Dispatcher, StagedOutput,
};
use crate::error::{ConvertError, ConvertResult};
use crate::format::FormatMap;
use std::path::Path;

/// Format LibreOffice hands over to the docx converter
const INTERMEDIATE: &str = "docx";

/// Legacy Word (.doc) through LibreOffice
///
/// DOCX and PDF come straight from `soffice`; HTML and text are produced by
/// converting to DOCX first and delegating to whichever converter handles
/// `docx -> <output>`.
pub struct DocConverter {
    dispatcher: Dispatcher,
}

impl ConverterKind for DocConverter {
    const NAME: &'static str = "doc";

    fn capabilities() -> FormatMap {
        format_map("doc", &["docx", "pdf", "html", "txt"])
    }

    fn build(dispatcher: &Dispatcher) -> Self {
        Self {
            dispatcher: dispatcher.clone(),
        }
    }
}

impl Converter for DocConverter {
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
            "docx" | "pdf" => {
                let mut staged = StagedOutput::new(output_path)?;
                self.soffice_into(input_path, output_format, &mut staged)?;
                staged.commit()
            }
            "html" | "txt" => Chain::via(&self.dispatcher, INTERMEDIATE).run(
                input_path,
                output_path,
                output_format,
                |intermediate| self.soffice_to_path(input_path, intermediate),
            ),
            _ => Err(ConvertError::unsupported(input_format, output_format)),
        }
    }
}

impl DocConverter {
    /// Run `soffice --convert-to` in a scratch dir and stage its result
    ///
    /// LibreOffice picks its own output name (`<stem>.<format>`) inside
    /// `--outdir`, so the file is located there and copied into `staged`.
    fn soffice_into(
        &self,
        input_path: &Path,
        format: &str,
        staged: &mut StagedOutput,
    ) -> ConvertResult<()> {
        let target = staged.target().to_path_buf();
        let scratch = self.dispatcher.scratch_dir()?;

        let soffice = ToolCommand::new(&self.dispatcher.settings().tools.soffice)
            .args(["--headless", "--convert-to", format])
            .arg(input_path)
            .arg("--outdir")
            .arg(scratch.path())
            .run(&target)?;
        if !soffice.stderr.trim().is_empty() {
            tracing::debug!("soffice: {}", soffice.stderr.trim());
        }

        let stem = input_path
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or("output");
        let produced = scratch.path().join(format!("{}.{}", stem, format));
        if !produced.is_file() {
            return Err(ConvertError::write(
                &target,
                "LibreOffice finished without producing an output file",
            ));
        }

        staged.copy_from(&produced)?;

        if let Err(e) = scratch.close() {
            tracing::warn!("Failed to remove LibreOffice scratch directory: {}", e);
        }
        Ok(())
    }

    /// First hop of a chain: write DOCX straight to `intermediate`
    fn soffice_to_path(&self, input_path: &Path, intermediate: &Path) -> ConvertResult<()> {
        let mut staged = StagedOutput::new(intermediate)?;
        self.soffice_into(input_path, INTERMEDIATE, &mut staged)?;
        staged.commit()
    }
}
