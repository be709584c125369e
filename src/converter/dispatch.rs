use super::{CapabilityRegistry, Converter};
use crate::backends;
use crate::config::Settings;
use crate::error::{ConvertError, ConvertResult};
use crate::format::{ConversionRequest, FormatMap};
use std::sync::Arc;
use std::time::Instant;
use tempfile::TempDir;

/// Resolves (input, output) pairs to fresh converter instances
///
/// Cheap to clone; converters that chain keep a clone so they can delegate
/// their second hop through the same registry.
#[derive(Debug, Clone)]
pub struct Dispatcher {
    registry: Arc<CapabilityRegistry>,
    settings: Arc<Settings>,
}

impl Dispatcher {
    /// Wrap a fully populated registry; it is read-only from here on
    pub fn new(registry: CapabilityRegistry, settings: Settings) -> Self {
        Self {
            registry: Arc::new(registry),
            settings: Arc::new(settings),
        }
    }

    /// Dispatcher over every built-in converter
    pub fn with_builtin(settings: Settings) -> Self {
        let mut registry = CapabilityRegistry::new();
        backends::load_converters(&mut registry);
        Self::new(registry, settings)
    }

    /// Instantiate the converter registered for a pair
    ///
    /// A registry miss is returned unchanged so the caller sees which pair
    /// was missing.
    pub fn get_converter(
        &self,
        input_format: &str,
        output_format: &str,
    ) -> ConvertResult<Box<dyn Converter>> {
        let entry = self.registry.resolve(input_format, output_format)?;
        tracing::debug!(
            "{} -> {} dispatched to '{}'",
            input_format,
            output_format,
            entry.id()
        );
        Ok(entry.instantiate(self))
    }

    /// Resolve and run a validated request
    pub fn convert(&self, request: &ConversionRequest) -> ConvertResult<()> {
        let converter = self.get_converter(&request.input_format, &request.output_format)?;
        let start = Instant::now();

        tracing::info!(
            "Converting {} -> {} with '{}'",
            request.input_path.display(),
            request.output_path.display(),
            converter.name()
        );

        let result = converter.convert(
            &request.input_path,
            &request.output_path,
            &request.input_format,
            &request.output_format,
        );

        match &result {
            Ok(()) => tracing::info!(
                "Converted {} [{:.2}s]",
                request.output_path.display(),
                start.elapsed().as_secs_f64()
            ),
            Err(e) => tracing::error!("Conversion via '{}' failed: {}", converter.name(), e),
        }

        result
    }

    pub fn registry(&self) -> &CapabilityRegistry {
        &self.registry
    }

    pub fn supported_conversions(&self) -> FormatMap {
        self.registry.supported_conversions()
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Settings handle for converters that outlive this borrow
    pub fn shared_settings(&self) -> Arc<Settings> {
        Arc::clone(&self.settings)
    }

    /// Fresh scratch directory, removed when the returned guard drops
    pub fn scratch_dir(&self) -> ConvertResult<TempDir> {
        let mut builder = tempfile::Builder::new();
        builder.prefix("docbridge-");

        let dir = match &self.settings.scratch_dir {
            Some(parent) => builder.tempdir_in(parent),
            None => builder.tempdir(),
        };

        dir.map_err(|e| ConvertError::failed(format!("cannot create scratch directory: {}", e)))
    }
}
