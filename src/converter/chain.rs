use super::Dispatcher;
use crate::error::{ConvertError, ConvertResult};
use crate::format::FormatTag;
use std::path::Path;

/// One-hop conversion through a fixed intermediate format
///
/// The first hop is supplied by the calling converter and writes the
/// intermediate file; the second hop is whatever converter the registry
/// holds for (intermediate -> requested output). The intermediate lives in
/// a scratch directory that is removed on every exit path.
#[derive(Debug, Clone, Copy)]
pub struct Chain<'d> {
    dispatcher: &'d Dispatcher,
    via: &'static str,
}

impl<'d> Chain<'d> {
    pub fn via(dispatcher: &'d Dispatcher, intermediate_format: &'static str) -> Self {
        Self {
            dispatcher,
            via: intermediate_format,
        }
    }

    /// Run `first_hop` into a private intermediate file, then delegate
    ///
    /// The second hop is resolved before `first_hop` runs so an impossible
    /// chain fails without doing any work.
    pub fn run<F>(
        &self,
        input_path: &Path,
        output_path: &Path,
        output_format: &str,
        first_hop: F,
    ) -> ConvertResult<()>
    where
        F: FnOnce(&Path) -> ConvertResult<()>,
    {
        let next = self.dispatcher.get_converter(self.via, output_format)?;
        let scratch = self.dispatcher.scratch_dir()?;

        let stem = input_path
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or("intermediate");
        let intermediate = scratch
            .path()
            .join(format!("{}.{}", stem, FormatTag::new(self.via)));

        tracing::debug!(
            "Chaining {} via {} ({})",
            input_path.display(),
            self.via,
            intermediate.display()
        );

        first_hop(&intermediate)?;
        if !intermediate.is_file() {
            return Err(ConvertError::failed(format!(
                "intermediate {} file was not produced",
                self.via
            )));
        }

        next.convert(&intermediate, output_path, self.via, output_format)?;

        if let Err(e) = scratch.close() {
            tracing::warn!("Failed to remove scratch directory: {}", e);
        }
        Ok(())
    }
}
