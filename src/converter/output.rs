use super::ensure_output_dir;
use crate::error::{ConvertError, ConvertResult};
use std::fs::File;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;

/// Output file that only appears at its final path once committed
///
/// Data goes to a hidden temporary file next to the target (same filesystem,
/// same extension so tools that sniff extensions still work). `commit`
/// atomically renames it over the target; dropping without committing
/// deletes it.
#[derive(Debug)]
pub struct StagedOutput {
    temp: NamedTempFile,
    target: PathBuf,
}

impl StagedOutput {
    /// Stage a new output for `target`, creating its parent directories
    pub fn new(target: &Path) -> ConvertResult<Self> {
        ensure_output_dir(target)?;

        let dir = match target.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };
        let stem = target
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or("output");
        let suffix = target
            .extension()
            .and_then(|e| e.to_str())
            .map(|ext| format!(".{}", ext))
            .unwrap_or_default();

        let prefix = format!(".{}-", stem);
        let temp = tempfile::Builder::new()
            .prefix(&prefix)
            .suffix(&suffix)
            .tempfile_in(dir)
            .map_err(|e| ConvertError::write(target, e))?;

        Ok(Self {
            temp,
            target: target.to_path_buf(),
        })
    }

    /// Path of the staging file, for tools that write by path
    pub fn path(&self) -> &Path {
        self.temp.path()
    }

    pub fn target(&self) -> &Path {
        &self.target
    }

    pub fn file(&mut self) -> &mut File {
        self.temp.as_file_mut()
    }

    pub fn write_all(&mut self, bytes: &[u8]) -> ConvertResult<()> {
        self.temp
            .write_all(bytes)
            .map_err(|e| ConvertError::write(&self.target, e))
    }

    /// Copy the contents of a file some tool produced elsewhere
    pub fn copy_from(&mut self, source: &Path) -> ConvertResult<()> {
        let mut produced = File::open(source).map_err(|e| ConvertError::write(&self.target, e))?;
        io::copy(&mut produced, self.temp.as_file_mut())
            .map_err(|e| ConvertError::write(&self.target, e))?;
        Ok(())
    }

    /// Publish the staged data at the target path, replacing any old file
    pub fn commit(self) -> ConvertResult<()> {
        let target = self.target;
        self.temp
            .persist(&target)
            .map_err(|e| ConvertError::write(&target, e.error))?;
        Ok(())
    }
}
