mod chain;
mod dispatch;
mod output;
mod registry;


pub use chain::Chain;
pub use dispatch::Dispatcher;
pub use output::StagedOutput;
pub use registry::{CapabilityRegistry, ConverterEntry};

use crate::error::{ConvertError, ConvertResult};
use crate::format::{FormatMap, FormatTag};
use std::fs;
use std::path::Path;

/// Contract every converter implementation must satisfy
///
/// Implementations are stateless: each `convert` call is independent and
/// re-running it with the same arguments overwrites the same output file.
pub trait Converter: Send + Sync {
    /// Unique name this converter is registered under
    fn name(&self) -> &'static str;

    /// Every (input -> outputs) pair this converter handles directly
    fn supported_formats(&self) -> FormatMap;

    /// True iff the pair appears in `supported_formats()`
    fn can_convert(&self, input_format: &str, output_format: &str) -> bool {
        self.supported_formats()
            .get(input_format)
            .is_some_and(|outputs| outputs.contains(output_format))
    }

    /// Convert `input_path` into exactly one file at `output_path`
    ///
    /// # Contract
    /// * Creates missing parent directories of `output_path`
    /// * Never leaves a partial `output_path` behind on failure
    /// * Deletes any intermediate artifact on every exit path
    /// * Every failure is reported as a `ConvertError`
    fn convert(
        &self,
        input_path: &Path,
        output_path: &Path,
        input_format: &str,
        output_format: &str,
    ) -> ConvertResult<()>;
}

/// Static side of a converter: its name, capabilities and constructor
///
/// Used to build a `ConverterEntry` without instantiating the converter.
pub trait ConverterKind: Converter + Sized + 'static {
    const NAME: &'static str;

    fn capabilities() -> FormatMap;

    fn build(dispatcher: &Dispatcher) -> Self;
}

/// Build a single-input `FormatMap` from literal tags
pub fn format_map(input: &str, outputs: &[&str]) -> FormatMap {
    let mut map = FormatMap::new();
    map.insert(
        FormatTag::new(input),
        outputs.iter().map(|o| FormatTag::new(o)).collect(),
    );
    map
}

/// Create the directory tree that will hold `output_path`
pub fn ensure_output_dir(output_path: &Path) -> ConvertResult<()> {
    match output_path.parent() {
        Some(dir) if !dir.as_os_str().is_empty() => {
            fs::create_dir_all(dir).map_err(|e| ConvertError::write(output_path, e))
        }
        _ => Ok(()),
    }
}

/// Fail with a read error unless `input_path` is an existing file
pub fn require_input(input_path: &Path) -> ConvertResult<()> {
    if input_path.is_file() {
        Ok(())
    } else if input_path.exists() {
        Err(ConvertError::read(input_path, "input is not a regular file"))
    } else {
        Err(ConvertError::read(input_path, "input file does not exist"))
    }
}
