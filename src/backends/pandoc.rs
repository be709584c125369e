use super::process::ToolCommand;
use crate::config::Settings;
use crate::converter::StagedOutput;
use crate::error::{ConvertError, ConvertResult};
use std::fs;
use std::path::Path;

/// Render `input_path` (pandoc reader `from`) to a PDF at `output_path`
///
/// Pandoc writes into the staging file, which keeps the `.pdf` extension
/// pandoc needs to pick its PDF writer.
pub(crate) fn render_pdf(
    settings: &Settings,
    input_path: &Path,
    from: &str,
    output_path: &Path,
) -> ConvertResult<()> {
    let staged = StagedOutput::new(output_path)?;

    let mut cmd = ToolCommand::new(&settings.tools.pandoc)
        .arg(input_path)
        .args(["-f", from, "-o"])
        .arg(staged.path())
        .arg(format!("--pdf-engine={}", settings.pandoc.pdf_engine))
        .arg("-V")
        .arg(format!("geometry:{}", settings.pandoc.paper));
    if let Some(font) = &settings.pandoc.main_font {
        cmd = cmd.arg("-V").arg(format!("mainfont={}", font));
    }

    cmd.run(output_path)?;

    let written = fs::metadata(staged.path())
        .map(|m| m.len())
        .map_err(|e| ConvertError::write(output_path, e))?;
    if written == 0 {
        return Err(ConvertError::write(
            output_path,
            format!("'{}' produced an empty file", cmd.program()),
        ));
    }

    staged.commit()
}
