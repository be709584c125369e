use std::fmt;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Result alias used across the conversion core
pub type ConvertResult<T> = Result<T, ConvertError>;

/// Every failure a conversion can surface to a front end
#[derive(Error, Debug)]
pub enum ConvertError {
    #[error("unsupported conversion from '{input}' to '{output}'")]
    Unsupported { input: String, output: String },

    #[error("failed to read {path}: {reason}")]
    Read { path: PathBuf, reason: String },

    #[error("failed to write {path}: {reason}")]
    Write { path: PathBuf, reason: String },

    #[error("conversion failed: {0}")]
    Failed(String),

    #[error("invalid conversion request: {0}")]
    InvalidRequest(String),
}

/// Classification printed by front ends alongside the message
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    UnsupportedConversion,
    ReadFailure,
    WriteFailure,
    ConversionFailure,
    InvalidRequest,
}

impl ErrorKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::UnsupportedConversion => "unsupported-conversion",
            Self::ReadFailure => "read-failure",
            Self::WriteFailure => "write-failure",
            Self::ConversionFailure => "conversion-failure",
            Self::InvalidRequest => "invalid-request",
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl ConvertError {
    pub fn unsupported(input: impl Into<String>, output: impl Into<String>) -> Self {
        Self::Unsupported {
            input: input.into(),
            output: output.into(),
        }
    }

    /// Wrap a failure to open or parse `path`, keeping the original message
    pub fn read(path: &Path, reason: impl fmt::Display) -> Self {
        Self::Read {
            path: path.to_path_buf(),
            reason: reason.to_string(),
        }
    }

    /// Wrap a failure to produce `path`, keeping the original message
    pub fn write(path: &Path, reason: impl fmt::Display) -> Self {
        Self::Write {
            path: path.to_path_buf(),
            reason: reason.to_string(),
        }
    }

    pub fn failed(reason: impl fmt::Display) -> Self {
        Self::Failed(reason.to_string())
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Unsupported { .. } => ErrorKind::UnsupportedConversion,
            Self::Read { .. } => ErrorKind::ReadFailure,
            Self::Write { .. } => ErrorKind::WriteFailure,
            Self::Failed(_) => ErrorKind::ConversionFailure,
            Self::InvalidRequest(_) => ErrorKind::InvalidRequest,
        }
    }
}
