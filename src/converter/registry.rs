use super::{Converter, ConverterKind, Dispatcher};
use crate::error::{ConvertError, ConvertResult};
use crate::format::{FormatMap, FormatTag};
use std::collections::HashMap;
use std::fmt;

/// Registration record for one converter implementation
///
/// Identity is the converter's name; the function pointers let the registry
/// introspect capabilities and the dispatcher build fresh instances.
#[derive(Clone, Copy)]
pub struct ConverterEntry {
    id: &'static str,
    capabilities: fn() -> FormatMap,
    build: fn(&Dispatcher) -> Box<dyn Converter>,
}

impl ConverterEntry {
    pub fn new(
        id: &'static str,
        capabilities: fn() -> FormatMap,
        build: fn(&Dispatcher) -> Box<dyn Converter>,
    ) -> Self {
        Self {
            id,
            capabilities,
            build,
        }
    }

    /// Entry for a converter type
    pub fn of<T: ConverterKind>() -> Self {
        Self::new(T::NAME, T::capabilities, build_boxed::<T>)
    }

    pub fn id(&self) -> &'static str {
        self.id
    }

    pub fn capabilities(&self) -> FormatMap {
        (self.capabilities)()
    }

    /// Create a new converter instance bound to `dispatcher`
    pub fn instantiate(&self, dispatcher: &Dispatcher) -> Box<dyn Converter> {
        (self.build)(dispatcher)
    }
}

fn build_boxed<T: ConverterKind>(dispatcher: &Dispatcher) -> Box<dyn Converter> {
    Box::new(T::build(dispatcher))
}

impl PartialEq for ConverterEntry {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for ConverterEntry {}

impl fmt::Debug for ConverterEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("ConverterEntry").field(&self.id).finish()
    }
}

/// Mapping of (input format, output format) -> converter
///
/// Populated once at startup and treated as read-only afterwards.
#[derive(Debug, Default)]
pub struct CapabilityRegistry {
    map: HashMap<FormatTag, HashMap<FormatTag, ConverterEntry>>,
}

impl CapabilityRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Upsert a single pair; a different converter replaces the old one
    ///
    /// The pair must be one the converter declares, otherwise `resolve`
    /// could hand out a converter that refuses the request.
    pub fn register(
        &mut self,
        input_format: impl Into<FormatTag>,
        output_format: impl Into<FormatTag>,
        entry: ConverterEntry,
    ) -> ConvertResult<()> {
        let input_format = input_format.into();
        let output_format = output_format.into();

        let declared = entry
            .capabilities()
            .get(input_format.as_str())
            .is_some_and(|outputs| outputs.contains(output_format.as_str()));
        if !declared {
            tracing::warn!(
                "Converter '{}' does not declare {} -> {}",
                entry.id(),
                input_format,
                output_format
            );
            return Err(ConvertError::unsupported(
                input_format.as_str(),
                output_format.as_str(),
            ));
        }

        self.insert(input_format, output_format, entry);
        Ok(())
    }

    /// Register every pair the converter declares
    pub fn register_converter(&mut self, entry: ConverterEntry) {
        for (input, outputs) in entry.capabilities() {
            for output in outputs {
                self.insert(input.clone(), output, entry);
            }
        }
    }

    fn insert(&mut self, input_format: FormatTag, output_format: FormatTag, entry: ConverterEntry) {
        let previous = self
            .map
            .entry(input_format.clone())
            .or_default()
            .insert(output_format.clone(), entry);

        match previous {
            Some(old) if old != entry => tracing::debug!(
                "{} -> {}: converter '{}' replaced by '{}'",
                input_format,
                output_format,
                old.id(),
                entry.id()
            ),
            Some(_) => {}
            None => tracing::debug!(
                "{} -> {}: registered converter '{}'",
                input_format,
                output_format,
                entry.id()
            ),
        }
    }

    /// Exact-match lookup of the converter handling a pair
    pub fn resolve(&self, input_format: &str, output_format: &str) -> ConvertResult<ConverterEntry> {
        self.map
            .get(input_format)
            .and_then(|outputs| outputs.get(output_format))
            .copied()
            .ok_or_else(|| ConvertError::unsupported(input_format, output_format))
    }

    /// Every registered input format with its reachable outputs
    pub fn supported_conversions(&self) -> FormatMap {
        self.map
            .iter()
            .map(|(input, outputs)| (input.clone(), outputs.keys().cloned().collect()))
            .collect()
    }

    /// Every registered pair with the converter that handles it, sorted
    pub fn entries(&self) -> Vec<(&FormatTag, &FormatTag, ConverterEntry)> {
        let mut entries: Vec<_> = self
            .map
            .iter()
            .flat_map(|(input, outputs)| {
                outputs
                    .iter()
                    .map(move |(output, entry)| (input, output, *entry))
            })
            .collect();
        entries.sort_by(|a, b| (a.0, a.1).cmp(&(b.0, b.1)));
        entries
    }

    /// Number of registered pairs
    pub fn len(&self) -> usize {
        self.map.values().map(HashMap::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
