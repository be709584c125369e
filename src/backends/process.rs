//! Blocking execution of external conversion tools.
//!
//! Every failure to launch or a non-zero exit becomes a write error for the
//! output the tool was supposed to produce.

use crate::error::{ConvertError, ConvertResult};
use std::ffi::{OsStr, OsString};
use std::io;
use std::path::Path;
use std::process::{Command, Stdio};
use std::time::Instant;

/// Maximum stderr characters carried into an error message
const STDERR_LIMIT: usize = 2000;

/// An external program invocation (soffice, pandoc, tesseract, ...)
#[derive(Debug, Clone)]
pub struct ToolCommand {
    program: String,
    args: Vec<OsString>,
}

/// Captured output of a successful run
#[derive(Debug, Clone)]
pub struct ToolOutput {
    pub stdout: Vec<u8>,
    /// Diagnostics the tool printed even though it succeeded
    pub stderr: String,
}

impl ToolCommand {
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
        }
    }

    pub fn arg(mut self, arg: impl AsRef<OsStr>) -> Self {
        self.args.push(arg.as_ref().to_os_string());
        self
    }

    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<OsStr>,
    {
        self.args
            .extend(args.into_iter().map(|a| a.as_ref().to_os_string()));
        self
    }

    pub fn program(&self) -> &str {
        &self.program
    }

    /// Run to completion; failures are attributed to `produces`
    pub fn run(&self, produces: &Path) -> ConvertResult<ToolOutput> {
        let start = Instant::now();
        tracing::info!("Executing {} {:?}", self.program, self.args);

        let mut cmd = Command::new(&self.program);
        cmd.args(&self.args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped());

        let output = cmd.output().map_err(|e| {
            let reason = if e.kind() == io::ErrorKind::NotFound {
                format!("'{}' is not installed or not on PATH", self.program)
            } else {
                format!("failed to run '{}': {}", self.program, e)
            };
            tracing::error!("{}", reason);
            ConvertError::write(produces, reason)
        })?;

        let duration_ms = start.elapsed().as_millis() as u64;
        let stderr = String::from_utf8_lossy(&output.stderr).into_owned();

        if !output.status.success() {
            let code = output
                .status
                .code()
                .map(|c| c.to_string())
                .unwrap_or_else(|| "signal".to_string());
            tracing::error!(
                "{} exited with {} after {}ms",
                self.program,
                code,
                duration_ms
            );
            return Err(ConvertError::write(
                produces,
                format!(
                    "'{}' exited with {}: {}",
                    self.program,
                    code,
                    stderr.trim().chars().take(STDERR_LIMIT).collect::<String>()
                ),
            ));
        }

        tracing::debug!("{} finished in {}ms", self.program, duration_ms);
        Ok(ToolOutput {
            stdout: output.stdout,
            stderr,
        })
    }
}
