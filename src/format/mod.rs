
use crate::error::{ConvertError, ConvertResult};
use serde::Serialize;
use std::borrow::Borrow;
use std::collections::{BTreeMap, BTreeSet};
use std::fmt;
use std::ops::Deref;
use std::path::{Path, PathBuf};

/// Input format -> every output format reachable from it
pub type FormatMap = BTreeMap<FormatTag, BTreeSet<FormatTag>>;

/// Normalized, lowercase file format token (e.g. "docx", "pdf")
///
/// Never carries a leading dot. Maps keyed by `FormatTag` can be queried
/// with a plain `&str`.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct FormatTag(String);

impl FormatTag {
    pub fn new(raw: &str) -> Self {
        let trimmed = raw.trim();
        let trimmed = trimmed.strip_prefix('.').unwrap_or(trimmed);
        Self(trimmed.to_lowercase())
    }

    /// Derive the tag from a path's extension
    ///
    /// Returns `None` when the path has no extension or it is empty.
    pub fn from_path(path: &Path) -> Option<Self> {
        path.extension()
            .and_then(|e| e.to_str())
            .map(Self::new)
            .filter(|tag| !tag.is_empty())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Deref for FormatTag {
    type Target = str;

    fn deref(&self) -> &str {
        &self.0
    }
}

impl Borrow<str> for FormatTag {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for FormatTag {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl From<&str> for FormatTag {
    fn from(raw: &str) -> Self {
        Self::new(raw)
    }
}

impl fmt::Display for FormatTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(&self.0)
    }
}

/// A validated conversion job handed from a front end to the dispatcher
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConversionRequest {
    pub input_path: PathBuf,
    pub output_path: PathBuf,
    pub input_format: FormatTag,
    pub output_format: FormatTag,
}

impl ConversionRequest {
    /// Validate both paths and derive their format tags
    ///
    /// The input must already exist; the output's parent directory may not.
    pub fn from_paths(input: impl AsRef<Path>, output: impl AsRef<Path>) -> ConvertResult<Self> {
        let input_path = input.as_ref();
        let output_path = output.as_ref();

        if !input_path.exists() {
            return Err(ConvertError::read(input_path, "input file does not exist"));
        }

        let input_format = FormatTag::from_path(input_path).ok_or_else(|| {
            ConvertError::InvalidRequest(format!(
                "input path has no extension: {}",
                input_path.display()
            ))
        })?;
        let output_format = FormatTag::from_path(output_path).ok_or_else(|| {
            ConvertError::InvalidRequest(format!(
                "output path has no extension: {}",
                output_path.display()
            ))
        })?;

        Ok(Self {
            input_path: input_path.to_path_buf(),
            output_path: output_path.to_path_buf(),
            input_format,
            output_format,
        })
    }
}
